//! Persistent favorites.
//!
//! A favorited tool is pinned to the top of the overview. The set of
//! favorited tool paths lives in the injected [`KvStore`] under the
//! [`FAVORITES_KEY`] key, as a JSON array of strings.
//!
//! State is read fresh from the store on every query, so another tab (or an
//! embedder writing to the same store) updates favorites without this
//! instance noticing a thing. Corrupt or missing data degrades to an empty
//! set; persistence problems never surface to callers.

use crate::store::{FAVORITES_KEY, KvStore};
use std::collections::BTreeSet;
use std::rc::Rc;

/// Favorites over a durable key-value store.
#[derive(Clone)]
pub struct FavoritesStore {
    store: Rc<dyn KvStore>,
}

impl FavoritesStore {
    pub fn new(store: Rc<dyn KvStore>) -> Self {
        Self { store }
    }

    /// The current favorites set. Empty on any read or parse failure.
    pub fn list(&self) -> BTreeSet<String> {
        let Some(stored) = self.store.get(FAVORITES_KEY) else {
            return BTreeSet::new();
        };
        serde_json::from_str::<Vec<String>>(&stored)
            .map(BTreeSet::from_iter)
            .unwrap_or_default()
    }

    /// Add the path if absent, remove it if present, persist, and return
    /// the new membership state.
    pub fn toggle(&self, path: &str) -> bool {
        let mut favorites = self.list();
        let now_favorite = if favorites.contains(path) {
            favorites.remove(path);
            false
        } else {
            favorites.insert(path.to_string());
            true
        };
        let encoded = serde_json::to_string(&favorites.iter().collect::<Vec<_>>())
            .unwrap_or_else(|_| "[]".to_string());
        self.store.set(FAVORITES_KEY, &encoded);
        now_favorite
    }

    pub fn is_favorite(&self, path: &str) -> bool {
        self.list().contains(path)
    }
}
