//! Durable key-value storage capability.
//!
//! The shell persists small per-user state (the favorites set and the theme
//! preference) through this seam instead of touching any concrete storage
//! directly. Hosts inject whatever backs it (browser local storage, a file,
//! a test map).
//!
//! ## Failure contract
//!
//! Implementations must never propagate storage failures: a failed read is
//! an absent value, a failed write is silently dropped. Per-user convenience
//! state is not worth breaking navigation over, so callers are written
//! against a store that cannot error.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

/// Storage key for the favorites set (JSON-encoded array of tool paths).
pub const FAVORITES_KEY: &str = "favorites";
/// Storage key for the theme preference.
pub const THEME_KEY: &str = "theme";

/// Durable string-to-string storage. See the module docs for the
/// failure contract.
pub trait KvStore {
    /// Read a value. Absent and unreadable are the same thing: `None`.
    fn get(&self, key: &str) -> Option<String>;
    /// Write a value. Failures are swallowed.
    fn set(&self, key: &str, value: &str);
}

/// In-memory [`KvStore`], the reference implementation for embedders
/// without durable storage and for tests.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: Rc<RefCell<BTreeMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }
}
