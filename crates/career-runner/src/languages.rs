//! Language label resolution for the execution service.
//!
//! Labels come from code fences and user input, so they arrive in every
//! spelling imaginable. Resolution lowercases, expands a short alias table and
//! then looks the canonical name up in the Judge0 CE id table.

/// Short or alternate spellings mapped to their canonical name.
const LANGUAGE_ALIASES: &[(&str, &str)] = &[
    ("js", "javascript"),
    ("node", "javascript"),
    ("ts", "typescript"),
    ("py", "python"),
    ("python3", "python"),
    ("rb", "ruby"),
    ("sh", "bash"),
    ("shell", "bash"),
    ("yml", "yaml"),
    ("c++", "cpp"),
    ("golang", "go"),
    ("rs", "rust"),
    ("cs", "csharp"),
    ("c#", "csharp"),
    ("kt", "kotlin"),
];

/// Canonical name to Judge0 CE language id.
const LANGUAGE_IDS: &[(&str, u32)] = &[
    ("bash", 46),
    ("c", 50),
    ("cpp", 54),
    ("csharp", 51),
    ("go", 60),
    ("java", 62),
    ("javascript", 63),
    ("kotlin", 78),
    ("php", 68),
    ("python", 71),
    ("ruby", 72),
    ("rust", 73),
    ("swift", 83),
    ("typescript", 74),
];

/// Lowercase a label and expand it through the alias table.
pub fn canonical_language(label: &str) -> String {
    let normalized = label.trim().to_lowercase();
    LANGUAGE_ALIASES
        .iter()
        .find(|(alias, _)| *alias == normalized)
        .map(|(_, canonical)| canonical.to_string())
        .unwrap_or(normalized)
}

/// Resolve a human-readable label to an execution service language id.
pub fn resolve_language(label: &str) -> Option<u32> {
    let canonical = canonical_language(label);
    LANGUAGE_IDS
        .iter()
        .find(|(name, _)| *name == canonical)
        .map(|(_, id)| *id)
}

/// Every executable language as `(canonical name, id)`, sorted by name.
pub fn supported_languages() -> Vec<(&'static str, u32)> {
    let mut languages = LANGUAGE_IDS.to_vec();
    languages.sort_by_key(|(name, _)| *name);
    languages
}
