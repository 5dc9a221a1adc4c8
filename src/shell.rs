//! The application shell: boot wiring and view lifecycle.
//!
//! The shell binds the boot products together: the immutable registry, the
//! resolved site context, the router, the favorites store, and a rendering
//! collaborator. Its only per-view state is which tool script is currently
//! mounted.
//!
//! ## Lifecycle discipline
//!
//! At most one tool script is mounted at a time. On every route change the
//! shell first runs (and forgets) the cleanup returned by the previous
//! tool's initializer, then renders the new view, then mounts the new
//! tool's script. A strict hand-off: event listeners, timers, and
//! observers never leak across navigations.
//!
//! ## Overview interactions
//!
//! Search input and favorite toggles land here, not in the router. Both
//! rebuild the overview model and re-render, and neither touches the
//! address fragment.

use crate::config::SiteConfig;
use crate::favorites::FavoritesStore;
use crate::overview::{OverviewModel, build_overview};
use crate::registry::{Cleanup, Payload, Tool};
use crate::router::{Router, SubscriptionId};
use std::cell::RefCell;
use std::rc::Rc;

/// The rendering collaborator, as seen from the core: draw the overview
/// model, or draw a tool (or its absence). Implementations decide where
/// the markup goes; [`HtmlBuffer`](crate::html::HtmlBuffer) is the
/// reference implementation.
pub trait Renderer {
    fn render_overview(&self, model: &OverviewModel, site: &SiteConfig);
    fn render_tool(&self, tool: Option<&Tool>, site: &SiteConfig);
}

/// One application instance. Create with [`AppShell::new`], then call
/// [`AppShell::boot`] once to bind the router and draw the initial view.
pub struct AppShell {
    tools: Vec<Tool>,
    site: SiteConfig,
    router: Rc<Router>,
    favorites: FavoritesStore,
    renderer: Rc<dyn Renderer>,
    active_cleanup: RefCell<Option<Cleanup>>,
    search_term: RefCell<String>,
}

impl AppShell {
    pub fn new(
        tools: Vec<Tool>,
        site: SiteConfig,
        router: Rc<Router>,
        favorites: FavoritesStore,
        renderer: Rc<dyn Renderer>,
    ) -> Rc<Self> {
        Rc::new(Self {
            tools,
            site,
            router,
            favorites,
            renderer,
            active_cleanup: RefCell::new(None),
            search_term: RefCell::new(String::new()),
        })
    }

    /// Subscribe the shell to route changes and render the state the app
    /// came up in (deep links included). Call once after construction.
    pub fn boot(self: &Rc<Self>) -> SubscriptionId {
        let weak = Rc::downgrade(self);
        let id = self.router.subscribe(move |path, payload| {
            if let Some(shell) = weak.upgrade() {
                shell.handle_route(path, payload);
            }
        });
        let path = self.router.current_path();
        self.handle_route(path.as_deref(), None);
        id
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    pub fn tools(&self) -> &[Tool] {
        &self.tools
    }

    pub fn site(&self) -> &SiteConfig {
        &self.site
    }

    pub fn find_tool(&self, path: &str) -> Option<&Tool> {
        self.tools.iter().find(|tool| tool.path == path)
    }

    /// Update the overview search term and re-render. A no-op for the
    /// rendered page while a tool view is active; the term is kept and
    /// applies on the next overview render.
    pub fn set_search_term(&self, term: &str) {
        *self.search_term.borrow_mut() = term.to_string();
        if self.router.current_path().is_none() {
            self.render_overview();
        }
    }

    /// Toggle a favorite and immediately re-render the overview so the
    /// favorites block updates. Returns the new membership state.
    pub fn toggle_favorite(&self, path: &str) -> bool {
        let now_favorite = self.favorites.toggle(path);
        if self.router.current_path().is_none() {
            self.render_overview();
        }
        now_favorite
    }

    fn render_overview(&self) {
        let term = self.search_term.borrow().clone();
        let favorites = self.favorites.list();
        let model = build_overview(&self.tools, &term, &favorites, &self.site);
        self.renderer.render_overview(&model, &self.site);
    }

    /// Route-change handling: cleanup → render → mount.
    fn handle_route(&self, path: Option<&str>, payload: Option<&Payload>) {
        if let Some(cleanup) = self.active_cleanup.borrow_mut().take() {
            cleanup();
        }

        match path {
            None => self.render_overview(),
            Some(path) => {
                let tool = self.find_tool(path);
                self.renderer.render_tool(tool, &self.site);
                if let Some(tool) = tool
                    && let Some(script) = &tool.script
                {
                    *self.active_cleanup.borrow_mut() = script(payload);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{BuildMode, MemoryBundle, MemorySource, build_registry};
    use crate::router::MemoryNavigation;
    use crate::store::MemoryStore;
    use serde_json::json;

    /// Renderer that records what it was asked to draw.
    #[derive(Default)]
    struct RecordingRenderer {
        events: RefCell<Vec<Rendered>>,
    }

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Rendered {
        /// Favorite paths, then (section id, tool paths) pairs.
        Overview(Vec<String>, Vec<(String, Vec<String>)>),
        Tool(Option<String>),
    }

    impl Renderer for RecordingRenderer {
        fn render_overview(&self, model: &OverviewModel, _site: &SiteConfig) {
            self.events.borrow_mut().push(Rendered::Overview(
                model.favorites.iter().map(|t| t.path.clone()).collect(),
                model
                    .sections
                    .iter()
                    .map(|s| {
                        (
                            s.id.clone(),
                            s.tools.iter().map(|t| t.path.clone()).collect(),
                        )
                    })
                    .collect(),
            ));
        }

        fn render_tool(&self, tool: Option<&Tool>, _site: &SiteConfig) {
            self.events
                .borrow_mut()
                .push(Rendered::Tool(tool.map(|t| t.path.clone())));
        }
    }

    struct Harness {
        shell: Rc<AppShell>,
        nav: Rc<MemoryNavigation>,
        renderer: Rc<RecordingRenderer>,
        mount_log: Rc<RefCell<Vec<String>>>,
    }

    impl Harness {
        fn pump(&self) {
            self.nav.pump(self.shell.router());
        }

        fn last_render(&self) -> Rendered {
            self.renderer.events.borrow().last().unwrap().clone()
        }
    }

    /// Two scripted tools: "a" returns a cleanup, "b" does not.
    fn harness() -> Harness {
        let mount_log: Rc<RefCell<Vec<String>>> = Rc::new(RefCell::new(Vec::new()));

        let log_a = mount_log.clone();
        let log_b = mount_log.clone();
        let source = MemorySource::new()
            .with(
                MemoryBundle::new("a")
                    .order(1)
                    .config(json!({"name": "Tool A"}))
                    .markup("<p>a</p>")
                    .script(move |payload| {
                        log_a.borrow_mut().push(match payload {
                            Some(p) => format!("init a {p}"),
                            None => "init a".to_string(),
                        });
                        let log = log_a.clone();
                        Some(Box::new(move || {
                            log.borrow_mut().push("cleanup a".to_string());
                        }) as Cleanup)
                    }),
            )
            .with(
                MemoryBundle::new("b")
                    .order(2)
                    .config(json!({"name": "Tool B"}))
                    .markup("<p>b</p>")
                    .script({
                        let log = log_b;
                        move |_| {
                            log.borrow_mut().push("init b".to_string());
                            None
                        }
                    }),
            );

        let site = SiteConfig::default();
        let tools = build_registry(&source, &site, BuildMode::Development).unwrap();

        let nav = MemoryNavigation::new();
        let router = Rc::new(Router::new(nav.clone()));
        let renderer = Rc::new(RecordingRenderer::default());
        let favorites = FavoritesStore::new(Rc::new(MemoryStore::new()));

        let shell = AppShell::new(tools, site, router, favorites, renderer.clone());
        shell.boot();

        Harness {
            shell,
            nav,
            renderer,
            mount_log,
        }
    }

    #[test]
    fn boot_renders_the_overview() {
        let h = harness();
        match h.last_render() {
            Rendered::Overview(favorites, sections) => {
                assert!(favorites.is_empty());
                assert_eq!(sections.len(), 1);
                assert_eq!(sections[0].1, vec!["a", "b"]);
            }
            other => panic!("expected overview, got {other:?}"),
        }
    }

    #[test]
    fn previous_cleanup_runs_before_next_mount() {
        let h = harness();

        h.shell.router().go_to("a", None);
        h.pump();
        h.shell.router().go_to("b", None);
        h.pump();

        assert_eq!(
            *h.mount_log.borrow(),
            vec!["init a", "cleanup a", "init b"]
        );
    }

    #[test]
    fn cleanup_runs_when_leaving_for_the_overview() {
        let h = harness();

        h.shell.router().go_to("a", None);
        h.pump();
        h.shell.router().go_overview();
        h.pump();

        assert_eq!(*h.mount_log.borrow(), vec!["init a", "cleanup a"]);
        // And only once, even after further navigation
        h.shell.router().go_to("b", None);
        h.pump();
        assert_eq!(
            *h.mount_log.borrow(),
            vec!["init a", "cleanup a", "init b"]
        );
    }

    #[test]
    fn tool_without_cleanup_hands_off_silently() {
        let h = harness();

        h.shell.router().go_to("b", None);
        h.pump();
        h.shell.router().go_to("a", None);
        h.pump();

        assert_eq!(*h.mount_log.borrow(), vec!["init b", "init a"]);
    }

    #[test]
    fn payload_reaches_the_initializer() {
        let h = harness();

        h.shell.router().go_to("a", Some(json!(7)));
        h.pump();

        assert_eq!(*h.mount_log.borrow(), vec!["init a 7"]);
    }

    #[test]
    fn unknown_route_renders_not_found() {
        let h = harness();

        h.shell.router().go_to("missing", None);
        h.pump();

        assert_eq!(h.last_render(), Rendered::Tool(None));
        // Navigation still works afterwards
        h.shell.router().go_to("a", None);
        h.pump();
        assert_eq!(h.last_render(), Rendered::Tool(Some("a".to_string())));
    }

    #[test]
    fn toggle_favorite_rerenders_with_favorites_block() {
        let h = harness();

        assert!(h.shell.toggle_favorite("b"));
        match h.last_render() {
            Rendered::Overview(favorites, sections) => {
                assert_eq!(favorites, vec!["b"]);
                assert_eq!(sections[0].1, vec!["a"]);
            }
            other => panic!("expected overview, got {other:?}"),
        }

        assert!(!h.shell.toggle_favorite("b"));
        match h.last_render() {
            Rendered::Overview(favorites, _) => assert!(favorites.is_empty()),
            other => panic!("expected overview, got {other:?}"),
        }
    }

    #[test]
    fn search_rerenders_and_filters() {
        let h = harness();

        h.shell.set_search_term("tool b");
        match h.last_render() {
            Rendered::Overview(_, sections) => {
                assert_eq!(sections[0].1, vec!["b"]);
            }
            other => panic!("expected overview, got {other:?}"),
        }
    }

    #[test]
    fn search_on_a_tool_view_does_not_rerender() {
        let h = harness();
        h.shell.router().go_to("a", None);
        h.pump();

        let before = h.renderer.events.borrow().len();
        h.shell.set_search_term("x");
        assert_eq!(h.renderer.events.borrow().len(), before);

        // But the term survives until the overview returns
        h.shell.router().go_overview();
        h.pump();
        match h.last_render() {
            Rendered::Overview(_, sections) => assert!(sections.is_empty()),
            other => panic!("expected overview, got {other:?}"),
        }
    }
}
