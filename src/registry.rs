//! Tool registry construction.
//!
//! The registry is the boot-time product the rest of the shell runs on: an
//! immutable list of [`Tool`] entities, one per usable bundle from the
//! injected [`AssetSource`]. It is built exactly once; tools are never
//! added, removed, or mutated afterwards.
//!
//! ## Build pipeline
//!
//! For every bundle the source enumerates:
//!
//! 1. Parse its raw config record (strict in development builds, lenient in
//!    production; see the `tool_config` module).
//! 2. Decide visibility: `example` tools are dropped when the site hides
//!    examples, `draft` tools are dropped outside development builds. This
//!    happens *before* the bundle's markup or script is requested, so
//!    hidden tools cost nothing beyond their config record.
//! 3. Load the markup (a placeholder naming the tool when absent, never
//!    fatal) and the optional initializer.
//!
//! The result carries no ordering guarantee; display order is the overview
//! presenter's job. Path uniqueness is an authoring invariant of the
//! content directory, not something the builder re-checks.

use crate::config::SiteConfig;
use crate::naming::UNORDERED;
use crate::tool_config::{ParseOptions, ToolConfig, ToolConfigError, parse_tool_config};
use serde_json::Value;
use std::fmt;
use std::rc::Rc;
use tracing::debug;

/// One-shot data attached to a programmatic navigation, delivered to the
/// destination tool's initializer.
pub type Payload = Value;

/// Teardown returned by a tool initializer. Runs exactly once, before the
/// next tool mounts.
pub type Cleanup = Box<dyn FnOnce()>;

/// A tool's initializer: mounts the tool's behavior and may hand back the
/// cleanup that undoes it (listeners, timers, observers).
pub type InitFn = Rc<dyn Fn(Option<&Payload>) -> Option<Cleanup>>;

/// Build mode for the registry.
///
/// Development registers drafts and validates configs strictly; production
/// drops drafts and degrades config problems to warnings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildMode {
    Development,
    Production,
}

impl BuildMode {
    /// Strict config validation is a development-only behavior.
    pub fn strict(self) -> bool {
        matches!(self, BuildMode::Development)
    }
}

/// Where a bundle lives, as reported by an [`AssetSource`].
#[derive(Debug, Clone)]
pub struct BundleLocator {
    /// Unique identifier: hash-route key, DOM anchor id, favorites key.
    pub path: String,
    /// Display order from the folder prefix ([`UNORDERED`] when absent).
    pub order: u32,
    /// Section this bundle belongs to, from its folder grouping.
    pub section_id: Option<String>,
    /// Human-readable origin of the config record, named in errors.
    pub source_id: String,
}

impl BundleLocator {
    pub fn new(path: &str) -> Self {
        Self {
            path: path.to_string(),
            order: UNORDERED,
            section_id: None,
            source_id: format!("memory:{path}"),
        }
    }
}

/// Supplier of tool bundles: enumerable identifiers plus on-demand
/// retrieval of the three artifacts (config record, markup, initializer).
///
/// The builder promises to call `markup` and `script` only for bundles
/// that survive the visibility check.
pub trait AssetSource {
    fn bundles(&self) -> Vec<BundleLocator>;
    /// Raw config record for a bundle. `None` is treated as `null`
    /// (all defaults leniently, an error strictly).
    fn config(&self, path: &str) -> Option<Value>;
    fn markup(&self, path: &str) -> Option<String>;
    fn script(&self, path: &str) -> Option<InitFn>;
}

/// A registered tool: validated config plus the loaded artifacts and its
/// place in the overview. Constructed once at boot, immutable after.
#[derive(Clone)]
pub struct Tool {
    pub path: String,
    pub html: String,
    pub script: Option<InitFn>,
    pub order: u32,
    pub section_id: Option<String>,
    pub config: ToolConfig,
}

impl Tool {
    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn description(&self) -> &str {
        &self.config.description
    }
}

impl fmt::Debug for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tool")
            .field("path", &self.path)
            .field("order", &self.order)
            .field("section_id", &self.section_id)
            .field("config", &self.config)
            .field("has_script", &self.script.is_some())
            .finish_non_exhaustive()
    }
}

/// Markup used when a bundle has no template.
pub fn placeholder_markup(name: &str) -> String {
    format!(
        "<section class=\"tool-missing\"><p>No template found for \u{201c}{name}\u{201d}. \
         Add a template.html next to this tool's config.</p></section>"
    )
}

/// Build the tool registry from an asset source.
///
/// Fails only on config validation errors, and only in strict
/// (development) mode; production builds always come up.
pub fn build_registry(
    source: &dyn AssetSource,
    site: &SiteConfig,
    mode: BuildMode,
) -> Result<Vec<Tool>, ToolConfigError> {
    let mut tools = Vec::new();

    for locator in source.bundles() {
        let raw = source.config(&locator.path).unwrap_or(Value::Null);
        let options = ParseOptions {
            strict: mode.strict(),
            source_id: locator.source_id.clone(),
        };
        let parsed = parse_tool_config(&raw, &locator.path, &options)?;
        let config = parsed.config;

        // Visibility gate. Must run before markup/script retrieval: hidden
        // bundles never load their heavier artifacts.
        if config.example && !site.show_examples {
            debug!(path = %locator.path, "skipping example tool, examples hidden");
            continue;
        }
        if config.draft && mode != BuildMode::Development {
            debug!(path = %locator.path, "skipping draft tool in production build");
            continue;
        }

        let html = source
            .markup(&locator.path)
            .unwrap_or_else(|| placeholder_markup(&config.name));
        let script = source.script(&locator.path);

        tools.push(Tool {
            path: locator.path,
            html,
            script,
            order: locator.order,
            section_id: locator.section_id,
            config,
        });
    }

    Ok(tools)
}

// =============================================================================
// In-memory asset source
// =============================================================================

/// A programmatic bundle for [`MemorySource`]: embedders register tools
/// (including Rust closures as initializers) without a filesystem.
pub struct MemoryBundle {
    locator: BundleLocator,
    config: Value,
    markup: Option<String>,
    script: Option<InitFn>,
}

impl MemoryBundle {
    pub fn new(path: &str) -> Self {
        Self {
            locator: BundleLocator::new(path),
            config: Value::Null,
            markup: None,
            script: None,
        }
    }

    pub fn order(mut self, order: u32) -> Self {
        self.locator.order = order;
        self
    }

    pub fn section(mut self, section_id: &str) -> Self {
        self.locator.section_id = Some(section_id.to_string());
        self
    }

    pub fn config(mut self, config: Value) -> Self {
        self.config = config;
        self
    }

    pub fn markup(mut self, markup: &str) -> Self {
        self.markup = Some(markup.to_string());
        self
    }

    pub fn script(
        mut self,
        script: impl Fn(Option<&Payload>) -> Option<Cleanup> + 'static,
    ) -> Self {
        self.script = Some(Rc::new(script));
        self
    }
}

/// In-memory [`AssetSource`], the reference implementation for embedders
/// and tests.
#[derive(Default)]
pub struct MemorySource {
    bundles: Vec<MemoryBundle>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, bundle: MemoryBundle) -> Self {
        self.bundles.push(bundle);
        self
    }

    fn find(&self, path: &str) -> Option<&MemoryBundle> {
        self.bundles.iter().find(|b| b.locator.path == path)
    }
}

impl AssetSource for MemorySource {
    fn bundles(&self) -> Vec<BundleLocator> {
        self.bundles.iter().map(|b| b.locator.clone()).collect()
    }

    fn config(&self, path: &str) -> Option<Value> {
        self.find(path)
            .filter(|b| !b.config.is_null())
            .map(|b| b.config.clone())
    }

    fn markup(&self, path: &str) -> Option<String> {
        self.find(path).and_then(|b| b.markup.clone())
    }

    fn script(&self, path: &str) -> Option<InitFn> {
        self.find(path).and_then(|b| b.script.clone())
    }
}
