//! Language code to display name lookup
//!
//! Purely cosmetic: the resolved names only feed the HUD label and the
//! --show-langs listing. A missing table degrades to echoing the raw codes.

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::Path;
use tracing::warn;

/// Tab-delimited code/name table expected next to the executable
pub const LANGS_FILE: &str = "Tesseract_Langs.txt";

/// Load the code/name table, or None if the file is missing
pub fn load_language_table(path: &Path) -> Option<HashMap<String, String>> {
    let raw = std::fs::read_to_string(path).ok()?;
    let mut table = HashMap::new();
    for line in raw.lines() {
        if let Some((code, name)) = line.split_once('\t') {
            table.insert(code.trim().to_string(), name.trim().to_string());
        }
    }
    Some(table)
}

/// Resolve a language spec ("xx" or "xx+yy+...") against the shipped table.
///
/// `None` means tesseract's default, shown as "English". Unknown codes are
/// echoed verbatim.
pub fn language_string(spec: Option<&str>) -> String {
    let table = load_language_table(Path::new(LANGS_FILE));
    if table.is_none() {
        warn!(
            "{} not found in the working directory, language codes will be shown as-is",
            LANGS_FILE
        );
    }
    language_string_from(table.as_ref(), spec)
}

/// Table-injected core of [`language_string`]
pub fn language_string_from(
    table: Option<&HashMap<String, String>>,
    spec: Option<&str>,
) -> String {
    match spec {
        None => "English".to_string(),
        Some(spec) => spec
            .split('+')
            .map(|code| resolve(table, code))
            .collect::<Vec<_>>()
            .join(", "),
    }
}

fn resolve(table: Option<&HashMap<String, String>>, code: &str) -> String {
    table
        .and_then(|t| t.get(code))
        .cloned()
        .unwrap_or_else(|| code.to_string())
}

/// Print the full code/name listing for the --show-langs flag
pub fn show_codes() -> Result<()> {
    let table = load_language_table(Path::new(LANGS_FILE)).with_context(|| {
        format!("{LANGS_FILE} is missing - it ships at the root of this repository")
    })?;
    let mut codes: Vec<_> = table.iter().collect();
    codes.sort();
    println!("{:<20}{:<40}", "CODE", "LANGUAGE");
    for (code, name) in codes {
        println!("{code:<20}{name:<40}");
    }
    Ok(())
}
