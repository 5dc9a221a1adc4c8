//! Overview grid model.
//!
//! Turns the registry, the current search term, and the favorites set into
//! the grouped, ordered model the rendering layer draws: an optional
//! favorites block on top, then one block per section.
//!
//! ## Ordering rules
//!
//! - Canonical order is `order` ascending, ties broken by case-insensitive
//!   name comparison.
//! - An active search keeps only matching tools and re-sorts them by
//!   descending score; the sort is stable, so equal scores keep the
//!   canonical order.
//! - Section display order: sections configured in `site.toml` first, in
//!   file order; any other section encountered on tools after that, in
//!   first-encountered order. Ungrouped tools land in a synthetic section
//!   (id `other`), shown as "Additional Tools" unless a section with that
//!   id is configured.
//!
//! ## Favorites block
//!
//! With no search active, favorited tools are pulled out of their sections
//! into a leading pseudo-section. During a search the block is suppressed
//! and favorited hits stay in their home sections; results are ranked,
//! not re-partitioned.

use crate::config::SiteConfig;
use crate::registry::Tool;
use crate::search::{NO_MATCH, match_score};
use std::collections::BTreeSet;

/// Section id given to tools without a folder grouping.
pub const FALLBACK_SECTION_ID: &str = "other";
/// Display title of the fallback section when `site.toml` does not
/// configure one.
pub const FALLBACK_SECTION_TITLE: &str = "Additional Tools";

/// One rendered section of the overview.
#[derive(Debug)]
pub struct SectionGroup<'a> {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub tools: Vec<&'a Tool>,
}

/// The full overview rendering model.
#[derive(Debug)]
pub struct OverviewModel<'a> {
    /// Favorited tools, leading the grid. Empty while a search is active.
    pub favorites: Vec<&'a Tool>,
    pub sections: Vec<SectionGroup<'a>>,
}

/// Build the overview model. Pure; re-run on every keystroke and
/// favorite toggle.
pub fn build_overview<'a>(
    tools: &'a [Tool],
    term: &str,
    favorites: &BTreeSet<String>,
    site: &SiteConfig,
) -> OverviewModel<'a> {
    let searching = !term.trim().is_empty();
    let term = term.trim();

    // Canonical order first; a stable score sort on top preserves it
    // between equal scores.
    let mut working: Vec<(f64, &Tool)> = tools
        .iter()
        .map(|tool| (match_score(tool.name(), tool.description(), term), tool))
        .filter(|(score, _)| *score > NO_MATCH)
        .collect();
    working.sort_by_key(|(_, tool)| (tool.order, tool.name().to_lowercase()));
    if searching {
        working.sort_by(|(a, _), (b, _)| b.partial_cmp(a).unwrap_or(std::cmp::Ordering::Equal));
    }
    let working: Vec<&Tool> = working.into_iter().map(|(_, tool)| tool).collect();

    let (favorite_tools, grouped): (Vec<&Tool>, Vec<&Tool>) = if searching {
        (Vec::new(), working)
    } else {
        working
            .into_iter()
            .partition(|tool| favorites.contains(&tool.path))
    };

    // Group by section id, in working-set order within each group.
    let mut groups: Vec<(String, Vec<&Tool>)> = Vec::new();
    for tool in grouped {
        let id = tool
            .section_id
            .as_deref()
            .unwrap_or(FALLBACK_SECTION_ID)
            .to_string();
        if let Some(pos) = groups.iter().position(|(gid, _)| *gid == id) {
            groups[pos].1.push(tool);
        } else {
            groups.push((id, vec![tool]));
        }
    }

    // Configured sections first, in file order; leftovers afterwards in
    // first-encountered order.
    let mut sections = Vec::new();
    for configured in &site.sections {
        if let Some(pos) = groups.iter().position(|(gid, _)| *gid == configured.id) {
            let (_, members) = groups.remove(pos);
            sections.push(SectionGroup {
                id: configured.id.clone(),
                title: configured.title.clone(),
                description: configured.description.clone(),
                tools: members,
            });
        }
    }
    for (gid, members) in groups {
        let title = if gid == FALLBACK_SECTION_ID {
            FALLBACK_SECTION_TITLE.to_string()
        } else {
            gid.clone()
        };
        sections.push(SectionGroup {
            id: gid,
            title,
            description: None,
            tools: members,
        });
    }

    OverviewModel {
        favorites: favorite_tools,
        sections,
    }
}
