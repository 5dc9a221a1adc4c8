//! Static site export.
//!
//! Writes a browsable rendering of the shell to an output directory: the
//! overview at `index.html` and every registered tool at
//! `<path>/index.html`. The export is a plain snapshot, with no search box
//! wiring, no favorites (they are per-user state), and no scripts. Useful as
//! a deployable fallback and as a quick visual check of a content
//! directory.
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html                 # Overview page
//! ├── calculator/
//! │   └── index.html             # Tool page
//! └── date-converter/
//!     └── index.html
//! ```

use crate::config::SiteConfig;
use crate::html;
use crate::overview::build_overview;
use crate::registry::Tool;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// What an export wrote, for CLI reporting.
#[derive(Debug)]
pub struct ExportSummary {
    /// (tool name, relative output path) per page, overview first.
    pub pages: Vec<(String, String)>,
}

/// Render and write the whole site.
pub fn export_site(
    tools: &[Tool],
    site: &SiteConfig,
    output_dir: &Path,
) -> Result<ExportSummary, ExportError> {
    fs::create_dir_all(output_dir)?;
    let mut pages = Vec::new();

    // Overview: no search, no favorites, just the canonical grouped view.
    let model = build_overview(tools, "", &BTreeSet::new(), site);
    let index = html::overview_page(&model, site);
    fs::write(output_dir.join("index.html"), index.into_string())?;
    pages.push(("Overview".to_string(), "index.html".to_string()));

    for tool in tools {
        let tool_dir = output_dir.join(&tool.path);
        fs::create_dir_all(&tool_dir)?;
        let page = html::tool_page(Some(tool), site);
        fs::write(tool_dir.join("index.html"), page.into_string())?;
        pages.push((
            tool.name().to_string(),
            format!("{}/index.html", tool.path),
        ));
    }

    Ok(ExportSummary { pages })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{BuildMode, MemoryBundle, MemorySource, build_registry};
    use serde_json::json;
    use tempfile::TempDir;

    fn sample_tools() -> Vec<Tool> {
        let source = MemorySource::new()
            .with(
                MemoryBundle::new("calculator")
                    .order(10)
                    .config(json!({"name": "Calculator", "description": "Adds."}))
                    .markup("<form>calc</form>"),
            )
            .with(
                MemoryBundle::new("notes")
                    .order(20)
                    .config(json!({"name": "Notes"})),
            );
        build_registry(&source, &SiteConfig::default(), BuildMode::Production).unwrap()
    }

    #[test]
    fn writes_overview_and_tool_pages() {
        let tmp = TempDir::new().unwrap();
        let summary = export_site(&sample_tools(), &SiteConfig::default(), tmp.path()).unwrap();

        assert_eq!(summary.pages.len(), 3);
        assert_eq!(summary.pages[0].1, "index.html");

        let index = fs::read_to_string(tmp.path().join("index.html")).unwrap();
        assert!(index.contains("Calculator"));
        assert!(index.contains("Notes"));

        let calc = fs::read_to_string(tmp.path().join("calculator/index.html")).unwrap();
        assert!(calc.contains("<form>calc</form>"));
    }

    #[test]
    fn placeholder_markup_reaches_the_export() {
        let tmp = TempDir::new().unwrap();
        export_site(&sample_tools(), &SiteConfig::default(), tmp.path()).unwrap();

        let notes = fs::read_to_string(tmp.path().join("notes/index.html")).unwrap();
        assert!(notes.contains("No template found"));
    }

    #[test]
    fn export_into_existing_directory() {
        let tmp = TempDir::new().unwrap();
        export_site(&sample_tools(), &SiteConfig::default(), tmp.path()).unwrap();
        // Second export overwrites in place
        let summary = export_site(&sample_tools(), &SiteConfig::default(), tmp.path()).unwrap();
        assert_eq!(summary.pages.len(), 3);
    }
}
