//! HTML rendering for the shell's views.
//!
//! The reference implementation of the rendering collaborator: pure
//! functions from view models to markup, built with
//! [maud](https://maud.lambda.xyz/) so the page chrome is checked at
//! compile time and interpolation is escaped by default.
//!
//! Tool-supplied markup is the one deliberate exception: it is authored
//! HTML, passed through [`substitute`] for context variables and then
//! embedded unescaped, the same trust model as the content directory
//! itself.
//!
//! Styling is class-hook-only: every element carries stable class names
//! and ids (`tool-card`, anchor id = tool path) for an external stylesheet
//! to target, but no CSS ships from here.

use crate::config::SiteConfig;
use crate::overview::{OverviewModel, SectionGroup};
use crate::registry::Tool;
use crate::shell::Renderer;
use crate::template::{site_context, substitute, tool_context};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use std::cell::RefCell;

/// Renders the base HTML document structure.
fn base_document(site: &SiteConfig, page_title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (page_title) " — " (site.title) }
            }
            body {
                (site_header(site))
                main #app { (content) }
                (site_footer(site))
            }
        }
    }
}

fn site_header(site: &SiteConfig) -> Markup {
    html! {
        header.site-header {
            h1 #header-title { (site.title) }
            p #header-description { (site.description) }
        }
    }
}

fn site_footer(site: &SiteConfig) -> Markup {
    let footer = substitute(&site.footer_text, &site_context(site));
    html! {
        footer.site-footer {
            span #footer-text { (PreEscaped(footer)) }
        }
    }
}

/// One overview card. The anchor id doubles as the scroll target the
/// router uses when returning from a tool without history support.
pub fn tool_card(tool: &Tool, favorite: bool) -> Markup {
    html! {
        div.tool-card id=(tool.path) data-icon=[tool.config.icon.as_deref()] {
            a.tool-card-link href=(format!("#{}", tool.path)) {
                h3 { (tool.name()) }
                p { (tool.description()) }
            }
            @if tool.config.draft {
                span.badge-draft { "DRAFT" }
            }
            button.favorite-toggle type="button"
                data-path=(tool.path)
                aria-pressed=(favorite) {
                @if favorite { "★" } @else { "☆" }
            }
        }
    }
}

fn section_block(section: &SectionGroup, favorites: &[&Tool]) -> Markup {
    html! {
        section.tool-section id=(format!("section-{}", section.id)) {
            h2 { (section.title) }
            @if let Some(description) = &section.description {
                p.section-description { (description) }
            }
            div.tools-grid {
                @for tool in &section.tools {
                    (tool_card(tool, favorites.iter().any(|f| f.path == tool.path)))
                }
            }
        }
    }
}

/// The overview page: search box, favorites block, grouped sections.
pub fn overview_page(model: &OverviewModel, site: &SiteConfig) -> Markup {
    let content = html! {
        input #search type="search" placeholder="Search tools…" autocomplete="off";
        @if !model.favorites.is_empty() {
            section.tool-section.favorites #section-favorites {
                h2 { "Favorites" }
                div.tools-grid {
                    @for tool in &model.favorites {
                        (tool_card(tool, true))
                    }
                }
            }
            hr.favorites-separator;
        }
        @for section in &model.sections {
            (section_block(section, &model.favorites))
        }
    };
    base_document(site, "Overview", content)
}

/// A tool page, or the not-found view when the route matches nothing.
pub fn tool_page(tool: Option<&Tool>, site: &SiteConfig) -> Markup {
    let (title, content) = match tool {
        Some(tool) => {
            let markup = substitute(&tool.html, &tool_context(site, tool));
            (
                tool.name(),
                html! {
                    nav.tool-nav {
                        a #back-btn href="#" { "← All tools" }
                    }
                    article #tool-content { (PreEscaped(markup)) }
                },
            )
        }
        None => (
            "Tool not found",
            html! {
                div.not-found {
                    h2 { "Tool not found" }
                    p { a href="#" { "Back to the overview" } }
                }
            },
        ),
    };
    base_document(site, title, content)
}

/// [`Renderer`] that keeps the latest rendered page. Embedders hand the
/// string to whatever displays it; tests read it back.
#[derive(Default)]
pub struct HtmlBuffer {
    current: RefCell<String>,
}

impl HtmlBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recently rendered page.
    pub fn current(&self) -> String {
        self.current.borrow().clone()
    }
}

impl Renderer for HtmlBuffer {
    fn render_overview(&self, model: &OverviewModel, site: &SiteConfig) {
        *self.current.borrow_mut() = overview_page(model, site).into_string();
    }

    fn render_tool(&self, tool: Option<&Tool>, site: &SiteConfig) {
        *self.current.borrow_mut() = tool_page(tool, site).into_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overview::build_overview;
    use crate::tool_config::ToolConfig;
    use std::collections::BTreeSet;

    fn tool(path: &str, name: &str, draft: bool) -> Tool {
        Tool {
            path: path.to_string(),
            html: format!("<p>{name} at {{{{tool_path}}}}</p>"),
            script: None,
            order: 1,
            section_id: None,
            config: ToolConfig {
                name: name.to_string(),
                draft,
                ..ToolConfig::defaults(name)
            },
        }
    }

    #[test]
    fn card_carries_anchor_and_route() {
        let card = tool_card(&tool("calculator", "Calculator", false), false).into_string();
        assert!(card.contains("id=\"calculator\""));
        assert!(card.contains("href=\"#calculator\""));
        assert!(card.contains("Calculator"));
        assert!(!card.contains("DRAFT"));
    }

    #[test]
    fn draft_card_shows_badge() {
        let card = tool_card(&tool("wip", "WIP", true), false).into_string();
        assert!(card.contains("DRAFT"));
    }

    #[test]
    fn favorite_state_reflected_on_the_toggle() {
        let on = tool_card(&tool("a", "A", false), true).into_string();
        let off = tool_card(&tool("a", "A", false), false).into_string();
        assert!(on.contains("aria-pressed=\"true\""));
        assert!(off.contains("aria-pressed=\"false\""));
    }

    #[test]
    fn overview_page_renders_favorites_block_and_separator() {
        let tools = vec![tool("a", "Alpha", false), tool("b", "Beta", false)];
        let favorites = BTreeSet::from(["b".to_string()]);
        let site = SiteConfig::default();
        let model = build_overview(&tools, "", &favorites, &site);

        let page = overview_page(&model, &site).into_string();
        assert!(page.contains("Favorites"));
        assert!(page.contains("favorites-separator"));
        assert!(page.contains("Alpha"));
        assert!(page.contains("Beta"));
    }

    #[test]
    fn overview_page_without_favorites_has_no_separator() {
        let tools = vec![tool("a", "Alpha", false)];
        let site = SiteConfig::default();
        let model = build_overview(&tools, "", &BTreeSet::new(), &site);
        let page = overview_page(&model, &site).into_string();
        assert!(!page.contains("favorites-separator"));
    }

    #[test]
    fn tool_page_substitutes_context_into_markup() {
        let site = SiteConfig::default();
        let page = tool_page(Some(&tool("calc", "Calc", false)), &site).into_string();
        assert!(page.contains("<p>Calc at calc</p>"));
    }

    #[test]
    fn missing_variable_is_visible_in_the_page() {
        let site = SiteConfig::default();
        let mut t = tool("calc", "Calc", false);
        t.html = "<p>{{no_such_var}}</p>".to_string();
        let page = tool_page(Some(&t), &site).into_string();
        assert!(page.contains("[missing: no_such_var]"));
    }

    #[test]
    fn unknown_tool_renders_not_found() {
        let site = SiteConfig::default();
        let page = tool_page(None, &site).into_string();
        assert!(page.contains("Tool not found"));
    }

    #[test]
    fn footer_text_is_substituted() {
        let mut site = SiteConfig::default();
        site.footer_text = "{{title}} forever".to_string();
        let page = tool_page(None, &site).into_string();
        assert!(page.contains("Toolshed forever"));
    }

    #[test]
    fn html_buffer_keeps_latest_page() {
        let site = SiteConfig::default();
        let buffer = HtmlBuffer::new();
        buffer.render_tool(None, &site);
        assert!(buffer.current().contains("Tool not found"));

        let tools = vec![tool("a", "Alpha", false)];
        let model = build_overview(&tools, "", &BTreeSet::new(), &site);
        buffer.render_overview(&model, &site);
        assert!(buffer.current().contains("Alpha"));
    }
}
