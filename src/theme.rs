//! Theme preference persistence.
//!
//! The theme toggle itself belongs to the page shell; the core only owns the
//! storage contract: a light/dark preference under the [`THEME_KEY`] key,
//! degrading to [`Theme::Light`] when absent or unreadable.

use crate::store::{KvStore, THEME_KEY};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

/// Stored preference, or `None` when unset or unrecognized.
pub fn load_theme(store: &dyn KvStore) -> Option<Theme> {
    match store.get(THEME_KEY)?.as_str() {
        "light" => Some(Theme::Light),
        "dark" => Some(Theme::Dark),
        _ => None,
    }
}

pub fn save_theme(store: &dyn KvStore, theme: Theme) {
    store.set(THEME_KEY, theme.as_str());
}
