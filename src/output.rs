//! CLI output formatting.
//!
//! Output is information-centric: the primary display for every tool is
//! its name and positional index, with file paths as secondary context via
//! indented `Source:` lines.
//!
//! ```text
//! Tools
//! 001 Calculator
//!     Source: 010-calculator/tool.json
//! 002 broken
//!     Source: 020-broken/tool.json
//!     Error: tool config (020-broken/tool.json): field `name` must be a string, got a number
//!
//! 2 tools checked, 1 error
//! ```
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::export::ExportSummary;

/// Result of strictly validating one tool bundle.
#[derive(Debug)]
pub struct ToolCheck {
    /// Tool path (folder-derived).
    pub path: String,
    /// Where the config record lives.
    pub source_id: String,
    /// Display name on success, validation error text on failure.
    pub outcome: Result<String, String>,
}

pub fn format_check_output(checks: &[ToolCheck]) -> Vec<String> {
    let mut lines = vec!["Tools".to_string()];
    let mut errors = 0;

    for (index, check) in checks.iter().enumerate() {
        let display = match &check.outcome {
            Ok(name) => name.as_str(),
            Err(_) => check.path.as_str(),
        };
        lines.push(format!("{:03} {}", index + 1, display));
        lines.push(format!("    Source: {}", check.source_id));
        if let Err(message) = &check.outcome {
            errors += 1;
            lines.push(format!("    Error: {message}"));
        }
    }

    lines.push(String::new());
    let noun = if checks.len() == 1 { "tool" } else { "tools" };
    let tail = match errors {
        0 => "all valid".to_string(),
        1 => "1 error".to_string(),
        n => format!("{n} errors"),
    };
    lines.push(format!("{} {noun} checked, {tail}", checks.len()));
    lines
}

pub fn print_check_output(checks: &[ToolCheck]) {
    for line in format_check_output(checks) {
        println!("{line}");
    }
}

pub fn format_export_output(summary: &ExportSummary) -> Vec<String> {
    let mut lines = Vec::new();
    for (name, path) in &summary.pages {
        lines.push(format!("{name} → {path}"));
    }
    lines.push(String::new());
    let noun = if summary.pages.len() == 1 {
        "page"
    } else {
        "pages"
    };
    lines.push(format!("Exported {} {noun}", summary.pages.len()));
    lines
}

pub fn print_export_output(summary: &ExportSummary) {
    for line in format_export_output(summary) {
        println!("{line}");
    }
}
