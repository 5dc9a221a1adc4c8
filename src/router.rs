//! Hash-route state machine.
//!
//! The router owns the current path and nothing else: rendering, mounting,
//! and not-found handling belong to the shell. Two observable states:
//!
//! - **Overview** — `current_path() == None` (empty fragment)
//! - **Tool** — `current_path() == Some(path)` (fragment names a tool)
//!
//! Transitions come from the user navigating (the host fires a
//! fragment-change event) or programmatically via [`Router::go_to`] /
//! [`Router::go_overview`] / [`Router::go_back`]. A programmatic call never
//! notifies listeners synchronously: it asks the host to change the
//! fragment, and the host reports the change back on a later turn through
//! [`Router::handle_fragment_change`], exactly like a `hashchange` event.
//!
//! ## Payloads
//!
//! `go_to` may attach a payload: one-shot data for the destination view.
//! The next fragment-change notification delivers it to every listener of
//! that event, then drops it. Listeners subscribing afterwards, and all
//! later events, see none. A second `go_to` before the event fires
//! replaces any unconsumed payload.
//!
//! ## The navigation capability
//!
//! All address-fragment access goes through [`NavigationHost`], injected at
//! construction. [`MemoryNavigation`] is the reference host: an in-memory
//! fragment plus history list with an explicit event pump, so the full
//! state machine runs in tests without a browser.

use crate::registry::Payload;
use std::cell::RefCell;
use std::collections::{BTreeSet, VecDeque};
use std::rc::Rc;

/// One past navigation entry, oldest first.
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    /// The entry's address fragment; empty means the overview.
    pub fragment: String,
}

/// The host environment's navigable address fragment.
///
/// `request_*` methods schedule navigation; the resulting fragment-change
/// event must reach [`Router::handle_fragment_change`] on a later turn,
/// never from inside the request call.
pub trait NavigationHost {
    /// Current fragment, without the leading `#`. Empty = overview.
    fn fragment(&self) -> String;
    /// Schedule a fragment change.
    fn request_fragment(&self, fragment: &str);
    /// Schedule one step back through history.
    fn request_back(&self);
    /// History introspection, if the host supports it: all entries
    /// (oldest first) and the current position. Used opportunistically by
    /// [`Router::go_overview`]; `None` selects the fallback strategy.
    fn entries(&self) -> Option<(Vec<HistoryEntry>, usize)> {
        None
    }
    /// Schedule a jump of `delta` entries through history. Only called
    /// when [`NavigationHost::entries`] returned `Some`.
    fn request_travel(&self, _delta: isize) {}
    /// Bring a tool's anchor into view. Best effort.
    fn scroll_to_anchor(&self, _anchor: &str) {}
}

/// Handle returned by [`Router::subscribe`]; pass to
/// [`Router::unsubscribe`]. Ids are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SubscriptionId(usize);

type RouteListener = Box<dyn FnMut(Option<&str>, Option<&Payload>)>;

struct RouterState {
    current_path: Option<String>,
    payload: Option<Payload>,
    listeners: Vec<(SubscriptionId, RouteListener)>,
    next_id: usize,
    notifying: bool,
    removed_during_notify: BTreeSet<SubscriptionId>,
}

/// Single-slot hash router. One instance per application; inject test
/// doubles through the [`NavigationHost`] parameter.
pub struct Router {
    host: Rc<dyn NavigationHost>,
    state: RefCell<RouterState>,
}

impl Router {
    /// Build a router over a navigation host. The initial path is read
    /// from the host's current fragment; no listeners fire for it.
    pub fn new(host: Rc<dyn NavigationHost>) -> Self {
        let fragment = host.fragment();
        Self {
            host,
            state: RefCell::new(RouterState {
                current_path: path_of(&fragment),
                payload: None,
                listeners: Vec::new(),
                next_id: 0,
                notifying: false,
                removed_during_notify: BTreeSet::new(),
            }),
        }
    }

    /// Current route: `None` on the overview, the tool path otherwise.
    pub fn current_path(&self) -> Option<String> {
        self.state.borrow().current_path.clone()
    }

    /// Navigate to a tool, optionally attaching one-shot data for it.
    /// Overwrites any unconsumed payload from an earlier `go_to`.
    pub fn go_to(&self, path: &str, payload: Option<Payload>) {
        self.state.borrow_mut().payload = payload;
        self.host.request_fragment(path);
    }

    /// One step back through the host's history.
    pub fn go_back(&self) {
        self.host.request_back();
    }

    /// Return to the overview.
    ///
    /// With history introspection, jumps straight to the earliest prior
    /// entry with an empty fragment, collapsing the tool visits in
    /// between instead of stacking a fresh overview entry. Otherwise (or
    /// when no such entry exists) navigates to the empty fragment and
    /// scrolls the tool just left back into view, since no history entry
    /// carries scroll position for it.
    pub fn go_overview(&self) {
        if let Some((entries, position)) = self.host.entries() {
            let prior = &entries[..position.min(entries.len())];
            if let Some(index) = prior.iter().position(|entry| entry.fragment.is_empty()) {
                self.host.request_travel(index as isize - position as isize);
                return;
            }
        }
        let anchor = self.state.borrow().current_path.clone();
        self.go_to("", None);
        if let Some(anchor) = anchor {
            self.host.scroll_to_anchor(&anchor);
        }
    }

    /// Register a route listener. Listeners are notified synchronously in
    /// subscription order on every fragment change; none fires for the
    /// state current at subscription time.
    pub fn subscribe(
        &self,
        listener: impl FnMut(Option<&str>, Option<&Payload>) + 'static,
    ) -> SubscriptionId {
        let mut state = self.state.borrow_mut();
        let id = SubscriptionId(state.next_id);
        state.next_id += 1;
        state.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Safe to call any number of times, including for
    /// ids that were never subscribed.
    pub fn unsubscribe(&self, id: SubscriptionId) {
        let mut state = self.state.borrow_mut();
        state.listeners.retain(|(lid, _)| *lid != id);
        if state.notifying {
            state.removed_during_notify.insert(id);
        }
    }

    /// Entry point for the host's fragment-change event.
    ///
    /// Recomputes the current path, notifies listeners in subscription
    /// order, and consumes the pending payload. Listeners may subscribe,
    /// unsubscribe, or navigate from inside the notification.
    pub fn handle_fragment_change(&self) {
        let fragment = self.host.fragment();
        let path = path_of(&fragment);

        let (payload, mut active) = {
            let mut state = self.state.borrow_mut();
            state.current_path = path.clone();
            state.notifying = true;
            (state.payload.take(), std::mem::take(&mut state.listeners))
        };

        for (_, listener) in active.iter_mut() {
            listener(path.as_deref(), payload.as_ref());
        }

        let mut state = self.state.borrow_mut();
        // Listeners subscribed during notification live in state.listeners;
        // keep overall subscription order and apply any removals that
        // targeted the set we were iterating.
        let added = std::mem::take(&mut state.listeners);
        active.extend(added);
        let removed = std::mem::take(&mut state.removed_during_notify);
        active.retain(|(id, _)| !removed.contains(id));
        state.listeners = active;
        state.notifying = false;
    }
}

fn path_of(fragment: &str) -> Option<String> {
    if fragment.is_empty() {
        None
    } else {
        Some(fragment.to_string())
    }
}

// =============================================================================
// In-memory navigation host
// =============================================================================

enum PendingNav {
    Set(String),
    Back,
    Travel(isize),
}

struct MemoryNavState {
    /// Fragments of all history entries, oldest first.
    entries: Vec<String>,
    position: usize,
    pending: VecDeque<PendingNav>,
    scrolled: Vec<String>,
}

/// In-memory [`NavigationHost`]: fragment, linear history, and an explicit
/// event pump. Requests queue up; [`MemoryNavigation::pump`] applies them
/// and fires the router's fragment-change handling: the "later turn" of a
/// real event loop, made explicit.
pub struct MemoryNavigation {
    state: RefCell<MemoryNavState>,
}

impl Default for MemoryNavigation {
    fn default() -> Self {
        Self {
            state: RefCell::new(MemoryNavState {
                entries: vec![String::new()],
                position: 0,
                pending: VecDeque::new(),
                scrolled: Vec::new(),
            }),
        }
    }
}

impl MemoryNavigation {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// Apply all queued navigation requests, firing `router`'s
    /// fragment-change handling for each one that actually changes the
    /// fragment (matching `hashchange`, which stays silent when the value
    /// is already current). Returns the number of events fired.
    pub fn pump(&self, router: &Router) -> usize {
        let mut fired = 0;
        loop {
            let action = self.state.borrow_mut().pending.pop_front();
            let Some(action) = action else { break };

            let changed = {
                let mut state = self.state.borrow_mut();
                let before = state.entries[state.position].clone();
                match action {
                    PendingNav::Set(fragment) => {
                        if fragment != before {
                            // New navigation truncates the forward stack
                            let position = state.position;
                            state.entries.truncate(position + 1);
                            state.entries.push(fragment);
                            state.position += 1;
                        }
                    }
                    PendingNav::Back => {
                        state.position = state.position.saturating_sub(1);
                    }
                    PendingNav::Travel(delta) => {
                        let target = state.position as isize + delta;
                        state.position = target.clamp(0, state.entries.len() as isize - 1) as usize;
                    }
                }
                state.entries[state.position] != before
            };

            if changed {
                fired += 1;
                router.handle_fragment_change();
            }
        }
        fired
    }

    /// Anchors passed to [`NavigationHost::scroll_to_anchor`], in order.
    pub fn scrolled_anchors(&self) -> Vec<String> {
        self.state.borrow().scrolled.clone()
    }
}

impl NavigationHost for MemoryNavigation {
    fn fragment(&self) -> String {
        let state = self.state.borrow();
        state.entries[state.position].clone()
    }

    fn request_fragment(&self, fragment: &str) {
        self.state
            .borrow_mut()
            .pending
            .push_back(PendingNav::Set(fragment.to_string()));
    }

    fn request_back(&self) {
        self.state.borrow_mut().pending.push_back(PendingNav::Back);
    }

    fn entries(&self) -> Option<(Vec<HistoryEntry>, usize)> {
        let state = self.state.borrow();
        let entries = state
            .entries
            .iter()
            .map(|fragment| HistoryEntry {
                fragment: fragment.clone(),
            })
            .collect();
        Some((entries, state.position))
    }

    fn request_travel(&self, delta: isize) {
        self.state
            .borrow_mut()
            .pending
            .push_back(PendingNav::Travel(delta));
    }

    fn scroll_to_anchor(&self, anchor: &str) {
        self.state.borrow_mut().scrolled.push(anchor.to_string());
    }
}
