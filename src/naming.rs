//! Folder naming convention for tool bundles.
//!
//! Tool folders (and section folders) may carry a numeric prefix that fixes
//! their position in the overview: `020-calculator` registers the tool under
//! the path `calculator` with order `20`. The prefix is an authoring
//! convenience only; it never leaks into routes, anchors, or storage keys.
//!
//! Folders without a prefix are still registered; they sort after every
//! prefixed entry (see [`UNORDERED`]).

/// Order assigned to entries without a numeric prefix. Sorts last.
pub const UNORDERED: u32 = u32::MAX;

/// Result of parsing a folder name like `020-calculator`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedFolder {
    /// Order prefix if present (e.g. `20` from `020-calculator`).
    pub order: Option<u32>,
    /// Name part after `NNN-`. For unprefixed folders, the full input.
    pub name: String,
}

impl ParsedFolder {
    /// Effective sort order: the prefix, or [`UNORDERED`] when absent.
    pub fn order_or_last(&self) -> u32 {
        self.order.unwrap_or(UNORDERED)
    }
}

/// Parse a folder name following the `NNN-name` convention.
///
/// - `"020-calculator"` → order=Some(20), name="calculator"
/// - `"007-date-converter"` → order=Some(7), name="date-converter"
/// - `"scratchpad"` → order=None, name="scratchpad"
/// - `"007"` / `"007-"` → order=Some(7), name=""
pub fn parse_folder_name(name: &str) -> ParsedFolder {
    if let Some(dash_pos) = name.find('-')
        && let Ok(num) = name[..dash_pos].parse::<u32>()
    {
        return ParsedFolder {
            order: Some(num),
            name: name[dash_pos + 1..].to_string(),
        };
    }
    if let Ok(num) = name.parse::<u32>() {
        return ParsedFolder {
            order: Some(num),
            name: String::new(),
        };
    }
    ParsedFolder {
        order: None,
        name: name.to_string(),
    }
}
