use crate::types::{ExecutionReport, ExecutionResult};

/// Render a terminal execution result as the text block shown to the user.
///
/// Output sections appear in a fixed order (stdout, stderr, compiler output,
/// service message), separated by a blank line, followed by a one-line
/// status/time/memory summary.
pub fn format_report(result: &ExecutionResult) -> ExecutionReport {
    let sections = [
        (None, result.stdout.as_deref()),
        (Some("Error:"), result.stderr.as_deref()),
        (Some("Compiler Output:"), result.compile_output.as_deref()),
        (Some("Message:"), result.message.as_deref()),
    ];

    let blocks: Vec<String> = sections
        .iter()
        .filter_map(|(heading, text)| {
            let text = text.map(str::trim).filter(|t| !t.is_empty())?;
            Some(match heading {
                Some(heading) => format!("{}\n{}", heading, text),
                None => text.to_string(),
            })
        })
        .collect();

    let body = if blocks.is_empty() {
        "No output.".to_string()
    } else {
        blocks.join("\n\n")
    };

    ExecutionReport::new(format!("{}{}", body, summary_line(result)))
}

fn summary_line(result: &ExecutionResult) -> String {
    let description = result
        .status
        .description
        .as_deref()
        .unwrap_or("Unknown");

    let mut summary = format!("\n\nStatus: {}", description);
    if let Some(time) = result.time.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
        summary.push_str(&format!(" | Time: {}s", time));
    }
    if let Some(memory) = result.memory {
        summary.push_str(&format!(" | Memory: {} KB", memory));
    }
    summary
}
