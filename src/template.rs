//! Context-variable substitution for runtime markup.
//!
//! Tool templates and configured footer text may reference site and tool
//! context as `{{name}}`. Unlike the compile-time maud templates, these
//! strings arrive at runtime, so misses cannot be build errors. Instead a
//! miss is deliberately loud: it renders as a visible `[missing: name]`
//! marker *and* logs a warning. Template/config drift should be caught by
//! looking at the page, not hidden in it.

use crate::config::SiteConfig;
use crate::registry::Tool;
use std::collections::BTreeMap;
use tracing::warn;

/// Variables available to a piece of markup.
pub type TemplateContext = BTreeMap<String, String>;

/// Context for site-level text (the footer, the overview chrome).
pub fn site_context(site: &SiteConfig) -> TemplateContext {
    TemplateContext::from([
        ("title".to_string(), site.title.clone()),
        ("description".to_string(), site.description.clone()),
    ])
}

/// Context for a tool's own markup: the site context plus the tool's
/// identity.
pub fn tool_context(site: &SiteConfig, tool: &Tool) -> TemplateContext {
    let mut context = site_context(site);
    context.insert("tool_name".to_string(), tool.name().to_string());
    context.insert("tool_path".to_string(), tool.path.clone());
    context.insert(
        "tool_description".to_string(),
        tool.description().to_string(),
    );
    context
}

/// Replace every `{{name}}` in `markup` with its context value.
///
/// Inner whitespace is tolerated (`{{ title }}`). Unknown names render as
/// `[missing: name]` and log a warning. A `{{` without a closing `}}` is
/// emitted literally.
pub fn substitute(markup: &str, context: &TemplateContext) -> String {
    let mut out = String::with_capacity(markup.len());
    let mut rest = markup;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after_open = &rest[start + 2..];
        let Some(end) = after_open.find("}}") else {
            // Unterminated marker: not a variable, emit as-is
            out.push_str(&rest[start..]);
            return out;
        };
        let name = after_open[..end].trim();
        match context.get(name) {
            Some(value) => out.push_str(value),
            None => {
                warn!(variable = name, "template variable not found in context");
                out.push_str(&format!("[missing: {name}]"));
            }
        }
        rest = &after_open[end + 2..];
    }
    out.push_str(rest);
    out
}
