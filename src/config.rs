//! Site configuration module.
//!
//! Handles loading, validating, and merging `site.toml`. Configuration is
//! two-layered: stock defaults are overridden by an optional user file at the
//! content root. The resolved [`SiteConfig`] is the read-only site context
//! the rest of the shell consumes: built once at boot, never mutated
//! afterwards.
//!
//! ## Config File Location
//!
//! Place `site.toml` next to your tool folders:
//!
//! ```text
//! tools/
//! ├── site.toml                # Site config (optional)
//! ├── 010-calculator/
//! └── 020-date-converter/
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! title = "Toolshed"
//! description = "A collection of small self-contained tools"
//! footer_text = "Built with {{title}}"
//! show_examples = true
//!
//! [[sections]]
//! id = "general"
//! title = "General"
//! description = "General helpers and utilities."
//! ```
//!
//! Section order in the file is display order in the overview. Sections a
//! tool references without a `[[sections]]` entry still render, after all
//! configured sections (see the overview module).
//!
//! ## Partial Configuration
//!
//! User files are sparse: override just the values you want. Unknown keys
//! are rejected to catch typos early; keys *missing* from the user file are
//! reported once as a developer warning so derived projects notice new
//! options, then fall back to the defaults.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::warn;

/// File name of the user override, looked up in the content root.
pub const SITE_CONFIG_FILE: &str = "site.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `site.toml`.
///
/// All fields have sensible defaults. User config files need only specify
/// the values they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Site title, shown in the header and the exported page titles.
    pub title: String,
    /// Short site description, shown under the title.
    pub description: String,
    /// Footer text. May reference context variables like `{{title}}`.
    pub footer_text: String,
    /// Whether tools marked `example` are registered at all.
    /// Derived projects set this to false to drop the demo tools.
    pub show_examples: bool,
    /// Tool sections, in display order.
    pub sections: Vec<SectionConfig>,
}

/// A named grouping of tools in the overview.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SectionConfig {
    /// Identifier tools reference via their folder grouping.
    pub id: String,
    /// Display title of the section.
    pub title: String,
    /// Optional description rendered under the section title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Toolshed".to_string(),
            description: "A collection of small self-contained tools".to_string(),
            footer_text: "Built with {{title}}".to_string(),
            show_examples: true,
            sections: vec![
                SectionConfig {
                    id: "general".to_string(),
                    title: "General".to_string(),
                    description: Some("General helpers and utilities.".to_string()),
                },
                SectionConfig {
                    id: "examples".to_string(),
                    title: "Examples".to_string(),
                    description: Some("Demo tools showing the shell's structure.".to_string()),
                },
            ],
        }
    }
}

impl SiteConfig {
    /// Validate config values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.title.trim().is_empty() {
            return Err(ConfigError::Validation("title must not be empty".into()));
        }
        let mut seen = std::collections::BTreeSet::new();
        for section in &self.sections {
            if section.id.trim().is_empty() {
                return Err(ConfigError::Validation(
                    "sections[].id must not be empty".into(),
                ));
            }
            if !seen.insert(section.id.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "duplicate section id `{}`",
                    section.id
                )));
            }
        }
        Ok(())
    }

    /// Look up a configured section by id.
    pub fn section(&self, id: &str) -> Option<&SectionConfig> {
        self.sections.iter().find(|s| s.id == id)
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the canonical representation of all default values, used as the
/// base layer for merging user overrides on top.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely, so the
///   `sections` array is always taken wholesale from whichever layer
///   defines it last.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a `site.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if no `site.toml` exists in the directory.
/// Returns `Err` if the file exists but contains invalid TOML.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = path.join(SITE_CONFIG_FILE);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Top-level default keys absent from a user override.
///
/// Never an error: new options appearing in a newer shell version must not
/// break existing derived projects. Exposed for the warning text test.
pub fn missing_override_keys(overlay: &toml::Value) -> Vec<String> {
    let defaults = stock_defaults_value();
    let (Some(default_table), Some(overlay_table)) = (defaults.as_table(), overlay.as_table())
    else {
        return Vec::new();
    };
    default_table
        .keys()
        .filter(|key| !overlay_table.contains_key(*key))
        .cloned()
        .collect()
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
///
/// When an overlay is present, keys it does not set are reported as a
/// developer warning (`tracing::warn`) before the defaults fill them in.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => {
            let missing = missing_override_keys(&ov);
            if !missing.is_empty() {
                warn!(
                    keys = %missing.join(", "),
                    "site config options not set, using defaults"
                );
            }
            merge_toml(base, ov)
        }
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `site.toml` in the given directory.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(root)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `site.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Toolshed Site Configuration
# ===========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Place this file as site.toml in your content root, next to the tool
# folders. Each derived project only needs the keys it wants to override.
# Unknown keys will cause an error.

# Site title, shown in the header and exported page titles.
title = "Toolshed"

# Short description, shown under the title.
description = "A collection of small self-contained tools"

# Footer text. {{title}} and {{description}} are substituted at render time;
# unknown variables render as a visible [missing: name] marker.
footer_text = "Built with {{title}}"

# Register tools marked `example`? Set to false in derived projects to drop
# the demo tools without deleting their folders.
show_examples = true

# ---------------------------------------------------------------------------
# Sections
# ---------------------------------------------------------------------------
# Tools are grouped into sections by their folder layout; the order of the
# [[sections]] entries here is the display order in the overview. Sections
# used by tools but not listed here render after these, in the order first
# encountered. Ungrouped tools land in a synthetic "Additional Tools"
# section (configure a section with id = "other" to rename it).

[[sections]]
id = "general"
title = "General"
description = "General helpers and utilities."

[[sections]]
id = "examples"
title = "Examples"
description = "Demo tools showing the shell's structure."
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn default_config_has_title_and_sections() {
        let config = SiteConfig::default();
        assert_eq!(config.title, "Toolshed");
        assert!(config.show_examples);
        let ids: Vec<&str> = config.sections.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["general", "examples"]);
    }

    #[test]
    fn parse_partial_config() {
        let toml = r#"title = "My Tools""#;
        let config: SiteConfig = toml::from_str(toml).unwrap();
        // Overridden value
        assert_eq!(config.title, "My Tools");
        // Default values preserved
        assert!(config.show_examples);
        assert_eq!(config.sections.len(), 2);
    }

    #[test]
    fn sections_keep_file_order() {
        let toml = r#"
[[sections]]
id = "text"
title = "Text"

[[sections]]
id = "numbers"
title = "Numbers"
"#;
        let config: SiteConfig = toml::from_str(toml).unwrap();
        let ids: Vec<&str> = config.sections.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["text", "numbers"]);
    }

    #[test]
    fn section_lookup() {
        let config = SiteConfig::default();
        assert_eq!(config.section("general").unwrap().title, "General");
        assert!(config.section("nope").is_none());
    }

    // =========================================================================
    // load_config tests
    // =========================================================================

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();

        assert_eq!(config.title, "Toolshed");
        assert_eq!(config.sections.len(), 2);
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();

        fs::write(
            tmp.path().join(SITE_CONFIG_FILE),
            r#"
title = "Derived"
show_examples = false
"#,
        )
        .unwrap();

        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.title, "Derived");
        assert!(!config.show_examples);
        // Unspecified values should be defaults
        assert_eq!(config.sections.len(), 2);
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();

        fs::write(tmp.path().join(SITE_CONFIG_FILE), "this is not valid toml [[[").unwrap();

        let result = load_config(tmp.path());
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn override_replaces_sections_wholesale() {
        let tmp = TempDir::new().unwrap();

        fs::write(
            tmp.path().join(SITE_CONFIG_FILE),
            r#"
[[sections]]
id = "mine"
title = "Mine"
"#,
        )
        .unwrap();

        let config = load_config(tmp.path()).unwrap();
        let ids: Vec<&str> = config.sections.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["mine"]);
    }

    // =========================================================================
    // merge_toml tests
    // =========================================================================

    #[test]
    fn merge_toml_scalar_override() {
        let base: toml::Value = toml::from_str(r#"title = "Toolshed""#).unwrap();
        let overlay: toml::Value = toml::from_str(r#"title = "Derived""#).unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged.get("title").unwrap().as_str(), Some("Derived"));
    }

    #[test]
    fn merge_toml_preserves_base_keys() {
        let base: toml::Value = toml::from_str(
            r#"
a = 1
b = 2
"#,
        )
        .unwrap();
        let overlay: toml::Value = toml::from_str(r#"a = 10"#).unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged.get("a").unwrap().as_integer(), Some(10));
        assert_eq!(merged.get("b").unwrap().as_integer(), Some(2));
    }

    #[test]
    fn merge_toml_array_replaced_not_merged() {
        let base = stock_defaults_value();
        let overlay: toml::Value = toml::from_str(
            r#"
[[sections]]
id = "only"
title = "Only"
"#,
        )
        .unwrap();
        let merged = merge_toml(base, overlay);
        let sections = merged.get("sections").unwrap().as_array().unwrap();
        assert_eq!(sections.len(), 1);
    }

    // =========================================================================
    // Missing / unknown key tests
    // =========================================================================

    #[test]
    fn missing_override_keys_reported() {
        let overlay: toml::Value = toml::from_str(r#"title = "Derived""#).unwrap();
        let missing = missing_override_keys(&overlay);
        assert!(missing.contains(&"description".to_string()));
        assert!(missing.contains(&"show_examples".to_string()));
        assert!(!missing.contains(&"title".to_string()));
    }

    #[test]
    fn full_override_reports_nothing_missing() {
        let overlay = stock_defaults_value();
        assert!(missing_override_keys(&overlay).is_empty());
    }

    #[test]
    fn missing_keys_never_fatal() {
        let base = stock_defaults_value();
        let overlay: toml::Value = toml::from_str(r#"title = "Sparse""#).unwrap();
        let config = resolve_config(base, Some(overlay)).unwrap();
        assert_eq!(config.title, "Sparse");
        assert_eq!(
            config.description,
            "A collection of small self-contained tools"
        );
    }

    #[test]
    fn unknown_key_rejected() {
        let toml_str = r#"titel = "typo""#;
        let result: Result<SiteConfig, _> = toml::from_str(toml_str);
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("unknown field"));
    }

    #[test]
    fn unknown_section_key_rejected() {
        let toml_str = r#"
[[sections]]
id = "general"
titel = "typo"
"#;
        let result: Result<SiteConfig, _> = toml::from_str(toml_str);
        assert!(result.is_err());
    }

    // =========================================================================
    // Validation tests
    // =========================================================================

    #[test]
    fn validate_default_config_passes() {
        assert!(SiteConfig::default().validate().is_ok());
    }

    #[test]
    fn validate_empty_title() {
        let mut config = SiteConfig::default();
        config.title = "   ".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("title"));
    }

    #[test]
    fn validate_duplicate_section_id() {
        let mut config = SiteConfig::default();
        config.sections.push(SectionConfig {
            id: "general".to_string(),
            title: "Again".to_string(),
            description: None,
        });
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("general"));
    }

    #[test]
    fn validate_empty_section_id() {
        let mut config = SiteConfig::default();
        config.sections[0].id = "".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn load_config_validates_values() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(SITE_CONFIG_FILE), r#"title = """#).unwrap();

        let result = load_config(tmp.path());
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    // =========================================================================
    // stock_config_toml tests
    // =========================================================================

    #[test]
    fn stock_config_toml_is_valid_toml() {
        let content = stock_config_toml();
        let _: toml::Value = toml::from_str(content).expect("stock config must be valid TOML");
    }

    #[test]
    fn stock_config_toml_roundtrips_to_defaults() {
        let content = stock_config_toml();
        let config: SiteConfig = toml::from_str(content).unwrap();
        let defaults = SiteConfig::default();
        assert_eq!(config.title, defaults.title);
        assert_eq!(config.footer_text, defaults.footer_text);
        assert_eq!(config.show_examples, defaults.show_examples);
        assert_eq!(config.sections.len(), defaults.sections.len());
    }
}
