use anyhow::Result;
use career_cli::settings::{read_source, ConfigOverrides};
use career_runner::{supported_languages, CodeRunner};
use clap::{Parser, Subcommand};
use log::LevelFilter;
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;

#[derive(Parser, Debug)]
#[clap(
    name = "career-run",
    author,
    version = "0.1.0",
    about = "Run code snippets on a Judge0-compatible execution service"
)]
struct Cli {
    #[clap(subcommand)]
    command: Commands,

    #[clap(long, short, help = "YAML configuration file for the execution service")]
    config: Option<PathBuf>,

    #[clap(long, help = "Execution service base URL (overrides JUDGE0_API_URL)")]
    base_url: Option<String>,

    #[clap(long, help = "Maximum number of result polls before giving up")]
    max_poll_attempts: Option<u32>,

    #[clap(long, help = "Delay between result polls in milliseconds")]
    poll_interval_ms: Option<u64>,

    #[clap(long, short, default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a snippet and print the execution report
    Run {
        #[clap(help = "Source file to run; reads stdin when omitted")]
        file: Option<PathBuf>,

        #[clap(long, short, help = "Language label, e.g. python, js, c++")]
        language: String,
    },
    /// List the languages the execution service can run
    Languages,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout carries only the report
    let log_level_filter = cli.log_level.parse().unwrap_or(LevelFilter::Warn);
    env_logger::Builder::new()
        .filter_level(log_level_filter)
        .target(env_logger::Target::Stderr)
        .init();

    let overrides = ConfigOverrides {
        config_file: cli.config,
        base_url: cli.base_url,
        max_poll_attempts: cli.max_poll_attempts,
        poll_interval_ms: cli.poll_interval_ms,
    };

    match cli.command {
        Commands::Run { file, language } => run_snippet(&overrides, file, &language).await,
        Commands::Languages => {
            for (name, id) in supported_languages() {
                println!("{:<12} {}", name, id);
            }
            Ok(())
        }
    }
}

async fn run_snippet(
    overrides: &ConfigOverrides,
    file: Option<PathBuf>,
    language: &str,
) -> Result<()> {
    let config = overrides.resolve()?;
    log::info!("Using execution service at {}", config.base_url);

    let source = read_source(file.as_deref()).await?;
    let runner = CodeRunner::new(config)?;

    let cancel = CancellationToken::new();
    let ctrl_c_token = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            log::info!("Interrupt received, cancelling run");
            ctrl_c_token.cancel();
        }
    });

    match runner.execute_cancellable(&source, language, &cancel).await {
        Ok(report) => {
            println!("{}", report);
            Ok(())
        }
        Err(e) => {
            println!("{}", e);
            std::process::exit(1);
        }
    }
}
