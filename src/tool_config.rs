//! Tool configuration parsing and validation.
//!
//! Every tool bundle carries a raw JSON record (`tool.json`) describing the
//! tool. This module turns that untyped record into a strict [`ToolConfig`]
//! with every field populated, so nothing downstream ever sees a partial
//! config.
//!
//! Two validation modes, selected by the caller:
//!
//! - **strict** (development builds): the first type mismatch fails with an
//!   error naming the offending source, field, expected type, and actual
//!   type. Boot halts; a broken config is an authoring bug to fix now.
//! - **lenient** (production builds): each mismatched field logs a warning
//!   and falls back to its default; the remaining fields still parse
//!   normally. The tool stays usable.
//!
//! String fields are trimmed. A `name` or `description` that is empty after
//! trimming falls back to the caller-supplied name / the stock description
//! without a warning; that is normal sparse authoring, not an error.

use serde_json::Value;
use thiserror::Error;
use tracing::warn;

/// Description used when a tool config provides none.
pub const DEFAULT_DESCRIPTION: &str = "No description";

#[derive(Error, Debug)]
pub enum ToolConfigError {
    #[error("tool config ({source_id}): expected an object, got {actual}")]
    NotAnObject {
        source_id: String,
        actual: &'static str,
    },
    #[error("tool config ({source_id}): field `{field}` must be {expected}, got {actual}")]
    FieldType {
        source_id: String,
        field: &'static str,
        expected: &'static str,
        actual: &'static str,
    },
}

/// Parsed, validated tool configuration. Always fully populated; only
/// `icon` may be absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolConfig {
    pub name: String,
    pub description: String,
    /// Draft tools are only registered in development builds.
    pub draft: bool,
    /// Example tools are dropped when the site hides examples.
    pub example: bool,
    pub tags: Vec<String>,
    pub keywords: Vec<String>,
    /// Icon id, resolved by the icon collaborator at render time.
    pub icon: Option<String>,
}

impl ToolConfig {
    /// The all-defaults config used for missing or unusable records.
    pub fn defaults(fallback_name: &str) -> Self {
        Self {
            name: fallback_name.to_string(),
            description: DEFAULT_DESCRIPTION.to_string(),
            draft: false,
            example: false,
            tags: Vec::new(),
            keywords: Vec::new(),
            icon: None,
        }
    }
}

/// Validation mode and error context for [`parse_tool_config`].
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Fail on the first type mismatch instead of defaulting the field.
    pub strict: bool,
    /// Where the record came from, named in errors and warnings
    /// (e.g. `tools/020-calculator/tool.json`).
    pub source_id: String,
}

/// Parse outcome: the config plus which fields were defaulted away in
/// lenient mode. In strict mode `defaulted` is always empty, a mismatch
/// is an error instead.
#[derive(Debug, Clone)]
pub struct ParsedToolConfig {
    pub config: ToolConfig,
    pub defaulted: Vec<&'static str>,
}

/// JSON type name for error messages.
fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// The whole array is rejected if any element is not a string.
fn as_string_array(value: &Value) -> Option<Vec<String>> {
    let items = value.as_array()?;
    items
        .iter()
        .map(|item| item.as_str().map(String::from))
        .collect()
}

/// Per-field validation shared by all field kinds.
///
/// A mismatch is an error in strict mode; in lenient mode it is logged,
/// recorded in `defaulted`, and the field reads as absent.
struct FieldChecker<'a> {
    options: &'a ParseOptions,
    record: &'a serde_json::Map<String, Value>,
    defaulted: Vec<&'static str>,
}

impl<'a> FieldChecker<'a> {
    fn mismatch(
        &mut self,
        field: &'static str,
        expected: &'static str,
        actual: &'static str,
    ) -> Result<(), ToolConfigError> {
        if self.options.strict {
            return Err(ToolConfigError::FieldType {
                source_id: self.options.source_id.clone(),
                field,
                expected,
                actual,
            });
        }
        warn!(
            source = %self.options.source_id,
            field,
            expected,
            actual,
            "tool config field has the wrong type, using the default"
        );
        self.defaulted.push(field);
        Ok(())
    }

    fn string(&mut self, field: &'static str) -> Result<Option<&'a str>, ToolConfigError> {
        match self.record.get(field) {
            None => Ok(None),
            Some(value) => match value.as_str() {
                Some(s) => Ok(Some(s)),
                None => {
                    self.mismatch(field, "a string", type_name(value))?;
                    Ok(None)
                }
            },
        }
    }

    /// Trimmed string; blank values read as absent without a warning.
    fn trimmed(&mut self, field: &'static str) -> Result<Option<&'a str>, ToolConfigError> {
        Ok(self.string(field)?.map(str::trim).filter(|s| !s.is_empty()))
    }

    fn boolean(&mut self, field: &'static str) -> Result<Option<bool>, ToolConfigError> {
        match self.record.get(field) {
            None => Ok(None),
            Some(value) => match value.as_bool() {
                Some(b) => Ok(Some(b)),
                None => {
                    self.mismatch(field, "a boolean", type_name(value))?;
                    Ok(None)
                }
            },
        }
    }

    fn string_list(
        &mut self,
        field: &'static str,
    ) -> Result<Option<Vec<String>>, ToolConfigError> {
        match self.record.get(field) {
            None => Ok(None),
            Some(value) => match as_string_array(value) {
                Some(items) => Ok(Some(items)),
                None => {
                    self.mismatch(field, "an array of strings", type_name(value))?;
                    Ok(None)
                }
            },
        }
    }
}

/// Parse a raw JSON record into a fully-populated [`ToolConfig`].
///
/// `fallback_name` is the tool's folder-derived name, used when the record
/// has no usable `name`. See the module docs for the strict/lenient rules.
pub fn parse_tool_config(
    raw: &Value,
    fallback_name: &str,
    options: &ParseOptions,
) -> Result<ParsedToolConfig, ToolConfigError> {
    let Some(record) = raw.as_object() else {
        if options.strict {
            return Err(ToolConfigError::NotAnObject {
                source_id: options.source_id.clone(),
                actual: type_name(raw),
            });
        }
        if !raw.is_null() {
            warn!(
                source = %options.source_id,
                actual = type_name(raw),
                "tool config is not an object, using defaults"
            );
        }
        return Ok(ParsedToolConfig {
            config: ToolConfig::defaults(fallback_name),
            defaulted: Vec::new(),
        });
    };

    let mut fields = FieldChecker {
        options,
        record,
        defaulted: Vec::new(),
    };

    let name = fields.trimmed("name")?;
    let description = fields.trimmed("description")?;
    let draft = fields.boolean("draft")?;
    let example = fields.boolean("example")?;
    let tags = fields.string_list("tags")?;
    let keywords = fields.string_list("keywords")?;
    let icon = fields.trimmed("icon")?;

    Ok(ParsedToolConfig {
        config: ToolConfig {
            name: name.unwrap_or(fallback_name).to_string(),
            description: description.unwrap_or(DEFAULT_DESCRIPTION).to_string(),
            draft: draft.unwrap_or(false),
            example: example.unwrap_or(false),
            tags: tags.unwrap_or_default(),
            keywords: keywords.unwrap_or_default(),
            icon: icon.map(String::from),
        },
        defaulted: fields.defaulted,
    })
}
