// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! History provider interface and an in-memory implementation.
//!
//! ## Overview
//!
//! The navigation manager reacts to history changes; it never owns the notion of "the
//! current URL" itself. A [`History`] implementation wraps whatever the host uses (a
//! browser history, a native back stack, or [`MemoryHistory`]).
//!
//! Change notifications are pulled rather than pushed: a listener obtains a
//! [`Subscription`] with [`History::listen`] and drains changes with
//! [`History::poll_change`]. This keeps the manager free of re-entrant callbacks.

use std::collections::VecDeque;

use crate::types::NavDirection;

/// State attached to a history entry.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LocationState {
    /// Explicit transition direction; overrides the inferred one.
    pub direction: Option<NavDirection>,
}

impl LocationState {
    /// State carrying a direction hint.
    pub fn with_direction(direction: NavDirection) -> Self {
        Self {
            direction: Some(direction),
        }
    }
}

/// A history entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Location {
    /// Path name, starting with `/`.
    pub pathname: String,
    /// Attached state.
    pub state: LocationState,
}

impl Location {
    /// A location without state.
    pub fn new(pathname: &str) -> Self {
        Self {
            pathname: pathname.to_string(),
            state: LocationState::default(),
        }
    }
}

/// How a location was reached.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum HistoryAction {
    /// A new entry was pushed.
    Push,
    /// The history moved to an earlier entry.
    Pop,
    /// The current entry was replaced.
    Replace,
}

/// A change notification delivered to listeners.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryChange {
    /// The new current location.
    pub location: Location,
    /// How it was reached.
    pub action: HistoryAction,
}

/// A registered listener.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Subscription(pub(crate) u64);

/// The location/history provider consumed by the manager.
pub trait History {
    /// The current location.
    fn location(&self) -> &Location;

    /// Push a new entry.
    fn push(&mut self, path: &str, state: LocationState);

    /// Replace the current entry.
    fn replace(&mut self, path: &str, state: LocationState);

    /// Move to the previous entry, if any.
    fn go_back(&mut self);

    /// Start listening for changes.
    fn listen(&mut self) -> Subscription;

    /// Stop listening; pending changes for `subscription` are discarded.
    fn unlisten(&mut self, subscription: Subscription);

    /// Take the next change for `subscription`, oldest first.
    fn poll_change(&mut self, subscription: Subscription) -> Option<HistoryChange>;
}

impl<H: History + ?Sized> History for &mut H {
    fn location(&self) -> &Location {
        (**self).location()
    }

    fn push(&mut self, path: &str, state: LocationState) {
        (**self).push(path, state);
    }

    fn replace(&mut self, path: &str, state: LocationState) {
        (**self).replace(path, state);
    }

    fn go_back(&mut self) {
        (**self).go_back();
    }

    fn listen(&mut self) -> Subscription {
        (**self).listen()
    }

    fn unlisten(&mut self, subscription: Subscription) {
        (**self).unlisten(subscription);
    }

    fn poll_change(&mut self, subscription: Subscription) -> Option<HistoryChange> {
        (**self).poll_change(subscription)
    }
}

/// An in-memory history stack.
///
/// Used for presentation stacks, which keep their own isolated history, and in tests.
#[derive(Clone, Debug)]
pub struct MemoryHistory {
    entries: Vec<Location>,
    index: usize,
    listeners: Vec<(Subscription, VecDeque<HistoryChange>)>,
    next_subscription: u64,
}

impl MemoryHistory {
    /// Create a history with a single entry at `initial`.
    pub fn new(initial: &str) -> Self {
        Self {
            entries: vec![Location::new(initial)],
            index: 0,
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    /// All entries, oldest first.
    pub fn entries(&self) -> &[Location] {
        &self.entries
    }

    /// Index of the current entry.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    fn notify(&mut self, action: HistoryAction) {
        let change = HistoryChange {
            location: self.entries[self.index].clone(),
            action,
        };
        for (_, queue) in &mut self.listeners {
            queue.push_back(change.clone());
        }
    }
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new("/")
    }
}

impl History for MemoryHistory {
    fn location(&self) -> &Location {
        &self.entries[self.index]
    }

    fn push(&mut self, path: &str, state: LocationState) {
        self.entries.truncate(self.index + 1);
        self.entries.push(Location {
            pathname: path.to_string(),
            state,
        });
        self.index = self.entries.len() - 1;
        self.notify(HistoryAction::Push);
    }

    fn replace(&mut self, path: &str, state: LocationState) {
        self.entries[self.index] = Location {
            pathname: path.to_string(),
            state,
        };
        self.notify(HistoryAction::Replace);
    }

    fn go_back(&mut self) {
        if self.index == 0 {
            return;
        }
        self.index -= 1;
        self.notify(HistoryAction::Pop);
    }

    fn listen(&mut self) -> Subscription {
        let subscription = Subscription(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((subscription, VecDeque::new()));
        subscription
    }

    fn unlisten(&mut self, subscription: Subscription) {
        self.listeners.retain(|(s, _)| *s != subscription);
    }

    fn poll_change(&mut self, subscription: Subscription) -> Option<HistoryChange> {
        self.listeners
            .iter_mut()
            .find(|(s, _)| *s == subscription)
            .and_then(|(_, queue)| queue.pop_front())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_truncates_forward_entries() {
        let mut h = MemoryHistory::new("/a");
        h.push("/b", LocationState::default());
        h.push("/c", LocationState::default());
        h.go_back();
        h.go_back();
        h.push("/d", LocationState::default());
        let paths: Vec<_> = h.entries().iter().map(|l| l.pathname.as_str()).collect();
        assert_eq!(paths, ["/a", "/d"]);
        assert_eq!(h.location().pathname, "/d");
    }

    #[test]
    fn go_back_at_start_is_a_no_op() {
        let mut h = MemoryHistory::new("/a");
        let sub = h.listen();
        h.go_back();
        assert_eq!(h.poll_change(sub), None);
        assert_eq!(h.index(), 0);
    }

    #[test]
    fn listeners_receive_changes_in_order() {
        let mut h = MemoryHistory::new("/a");
        let sub = h.listen();
        h.push("/b", LocationState::default());
        h.replace("/c", LocationState::with_direction(NavDirection::Back));
        h.go_back();

        let first = h.poll_change(sub).unwrap();
        assert_eq!(first.action, HistoryAction::Push);
        assert_eq!(first.location.pathname, "/b");
        let second = h.poll_change(sub).unwrap();
        assert_eq!(second.action, HistoryAction::Replace);
        assert_eq!(second.location.state.direction, Some(NavDirection::Back));
        let third = h.poll_change(sub).unwrap();
        assert_eq!(third.action, HistoryAction::Pop);
        assert_eq!(third.location.pathname, "/a");
        assert_eq!(h.poll_change(sub), None);
    }

    #[test]
    fn unlisten_drops_the_queue() {
        let mut h = MemoryHistory::new("/a");
        let sub = h.listen();
        h.push("/b", LocationState::default());
        h.unlisten(sub);
        assert_eq!(h.listener_count(), 0);
        assert_eq!(h.poll_change(sub), None);
    }
}
