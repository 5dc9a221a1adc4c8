//! Filesystem discovery of tool bundles.
//!
//! Your content directory is the data source: every folder containing a
//! `tool.json` becomes a tool bundle, and one optional level of grouping
//! folders assigns tools to sections.
//!
//! ## Directory Structure
//!
//! ```text
//! tools/                         # Content root
//! ├── site.toml                  # Site configuration (optional)
//! ├── 010-calculator/            # Tool (order 10, path "calculator")
//! │   ├── tool.json              # Config record (required to register)
//! │   └── template.html          # Markup (placeholder when absent)
//! ├── 020-date-converter/
//! │   ├── tool.json
//! │   └── template.html
//! ├── 030-text/                  # Section folder (no tool.json)
//! │   ├── 010-counter/           # Tool in section "text"
//! │   │   ├── tool.json
//! │   │   └── template.html
//! │   └── 020-slugger/
//! │       └── tool.json
//! └── scratchpad/                # Unprefixed = sorts after prefixed tools
//!     └── tool.json
//! ```
//!
//! Folder names follow the `NNN-name` convention (see the `naming`
//! module): the prefix fixes overview order and is stripped from the tool
//! path and the section id.
//!
//! ## Validation
//!
//! A folder holding both a `tool.json` and nested tool folders is
//! ambiguous (tool or section?) and rejected as mixed content.
//!
//! ## What discovery loads when
//!
//! All `tool.json` records are read up front (they are the enumeration
//! keys and they are small). Templates are only read when the registry
//! builder asks, i.e. never for tools the build mode filters out. A
//! `tool.json` that is not valid JSON degrades to a `null` record; the
//! registry's strict mode then rejects it naming the file, lenient mode
//! registers the tool with defaults. Scripts cannot be discovered from the
//! filesystem at all; embedders attach initializers through their own
//! [`AssetSource`](crate::registry::AssetSource) (or
//! [`MemorySource`](crate::registry::MemorySource)).

use crate::naming::parse_folder_name;
use crate::registry::{AssetSource, BundleLocator, InitFn};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

/// Config record file, one per tool folder.
pub const TOOL_CONFIG_FILE: &str = "tool.json";
/// Markup file, one per tool folder.
pub const TOOL_TEMPLATE_FILE: &str = "template.html";

#[derive(Error, Debug)]
pub enum DiscoverError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("folder holds both a tool.json and nested tool folders: {0}")]
    MixedContent(PathBuf),
}

struct FsBundle {
    locator: BundleLocator,
    config: Value,
    template: Option<PathBuf>,
}

/// [`AssetSource`] over a content directory.
pub struct DirectorySource {
    bundles: Vec<FsBundle>,
}

impl DirectorySource {
    /// Walk `root` and collect every tool bundle in it.
    pub fn open(root: &Path) -> Result<Self, DiscoverError> {
        let mut bundles = Vec::new();
        for dir in sorted_subdirs(root)? {
            let has_config = dir.join(TOOL_CONFIG_FILE).is_file();
            let nested: Vec<PathBuf> = sorted_subdirs(&dir)?
                .into_iter()
                .filter(|d| d.join(TOOL_CONFIG_FILE).is_file())
                .collect();

            if has_config && !nested.is_empty() {
                return Err(DiscoverError::MixedContent(dir));
            }

            if has_config {
                bundles.push(read_bundle(root, &dir, None)?);
            } else {
                let section = parse_folder_name(&folder_name(&dir)).name;
                for tool_dir in nested {
                    bundles.push(read_bundle(root, &tool_dir, Some(&section))?);
                }
            }
        }
        Ok(Self { bundles })
    }

    fn find(&self, path: &str) -> Option<&FsBundle> {
        self.bundles.iter().find(|b| b.locator.path == path)
    }
}

impl AssetSource for DirectorySource {
    fn bundles(&self) -> Vec<BundleLocator> {
        self.bundles.iter().map(|b| b.locator.clone()).collect()
    }

    fn config(&self, path: &str) -> Option<Value> {
        self.find(path)
            .filter(|b| !b.config.is_null())
            .map(|b| b.config.clone())
    }

    fn markup(&self, path: &str) -> Option<String> {
        let template = self.find(path)?.template.as_ref()?;
        fs::read_to_string(template).ok()
    }

    fn script(&self, _path: &str) -> Option<InitFn> {
        None
    }
}

fn folder_name(dir: &Path) -> String {
    dir.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default()
}

/// Subdirectories of `path`, hidden folders skipped, sorted by the
/// `NNN-name` convention (prefixed first, then by name).
fn sorted_subdirs(path: &Path) -> Result<Vec<PathBuf>, DiscoverError> {
    let mut dirs: Vec<PathBuf> = fs::read_dir(path)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_dir() && !folder_name(p).starts_with('.'))
        .collect();
    dirs.sort_by_key(|d| {
        let parsed = parse_folder_name(&folder_name(d));
        (parsed.order_or_last(), parsed.name)
    });
    Ok(dirs)
}

fn read_bundle(
    root: &Path,
    dir: &Path,
    section: Option<&str>,
) -> Result<FsBundle, DiscoverError> {
    let parsed = parse_folder_name(&folder_name(dir));
    let config_path = dir.join(TOOL_CONFIG_FILE);
    let source_id = config_path
        .strip_prefix(root)
        .unwrap_or(&config_path)
        .to_string_lossy()
        .to_string();

    let content = fs::read_to_string(&config_path)?;
    let config = match serde_json::from_str(&content) {
        Ok(value) => value,
        Err(err) => {
            warn!(source = %source_id, %err, "tool config is not valid JSON");
            Value::Null
        }
    };

    let template_path = dir.join(TOOL_TEMPLATE_FILE);
    let template = template_path.is_file().then_some(template_path);

    Ok(FsBundle {
        locator: BundleLocator {
            path: parsed.name.clone(),
            order: parsed.order_or_last(),
            section_id: section.map(String::from),
            source_id,
        },
        config,
        template,
    })
}
