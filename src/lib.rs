//! # Toolshed
//!
//! A hash-routed shell for collections of small self-contained tools: a
//! calculator here, a date converter there, each one a folder with a config
//! record and a scrap of markup, all rendered into one shared page with an
//! overview grid, search, favorites, and per-tool routes.
//!
//! # Architecture: Boot Pipeline + Event Loop
//!
//! Everything structural happens once, at boot:
//!
//! ```text
//! 1. Resolve    site.toml   →  SiteConfig     (defaults + user override)
//! 2. Discover   tools/      →  bundles        (folder → config/markup/script)
//! 3. Register   bundles     →  Vec<Tool>      (validate, filter, assemble)
//! ```
//!
//! After boot the registry and site context are immutable; the only moving
//! parts are the router's current path, the pending navigation payload,
//! and the favorites set, each single-writer by construction, serialized
//! through the host's event loop.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | `site.toml` loading, defaults/overlay merging, validation |
//! | [`tool_config`] | strict/lenient validation of raw tool records |
//! | [`naming`] | `NNN-name` folder convention shared by tools and sections |
//! | [`discover`] | filesystem asset source over a content directory |
//! | [`registry`] | tool entities, asset-source capability, registry builder |
//! | [`search`] | fuzzy subsequence scoring for the overview |
//! | [`favorites`] | persisted favorites set over the key-value capability |
//! | [`theme`] | theme preference persistence |
//! | [`overview`] | grouped/ordered overview model |
//! | [`router`] | hash-route state machine with injectable navigation |
//! | [`shell`] | app shell: route binding, mount/cleanup, re-rendering |
//! | [`template`] | `{{var}}` substitution with loud misses |
//! | [`html`] | maud rendering of overview, cards, tool pages |
//! | [`export`] | static HTML export of the whole site |
//! | [`store`] | key-value storage capability and in-memory impl |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Capabilities Over Ambience
//!
//! The core never touches a browser API, a global, or a singleton. Storage
//! ([`store::KvStore`]), navigation ([`router::NavigationHost`]), assets
//! ([`registry::AssetSource`]), and rendering ([`shell::Renderer`]) are
//! traits injected at construction. The in-memory implementations
//! ([`store::MemoryStore`], [`router::MemoryNavigation`],
//! [`registry::MemorySource`], [`html::HtmlBuffer`]) run the whole shell
//! (boot, navigation, mount/cleanup, favorites) inside a plain test.
//!
//! ## Strict Development, Lenient Production
//!
//! A mistyped tool config halts a development build with an error naming
//! the file and field; the same mistake in production logs a warning and
//! falls back field-by-field. Correctness of the registry matters more
//! than availability while authoring; availability wins once deployed.
//!
//! ## Asynchronous Navigation, Synchronous Notification
//!
//! `go_to` never calls listeners directly: it requests a fragment change
//! and the host reports it back on a later turn, the way `hashchange`
//! behaves. Within one change event, listeners run synchronously in
//! subscription order, and a navigation payload is delivered to that event
//! only, then dropped.
//!
//! ## Maud Over Template Engines
//!
//! Page chrome is generated with [Maud](https://maud.lambda.xyz/):
//! compile-time checked, type-safe, escaped by default. Tool-authored
//! markup is the deliberate exception: it passes through the runtime
//! [`template`] substituter, where a missing variable renders as a visible
//! `[missing: name]` marker instead of silently vanishing.

pub mod config;
pub mod discover;
pub mod export;
pub mod favorites;
pub mod html;
pub mod naming;
pub mod output;
pub mod overview;
pub mod registry;
pub mod router;
pub mod search;
pub mod shell;
pub mod store;
pub mod template;
pub mod theme;
pub mod tool_config;
