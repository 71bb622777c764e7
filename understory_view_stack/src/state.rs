// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Navigation state store.
//!
//! ## Overview
//!
//! [`NavState`] maps stack ids to [`ViewStack`]s in registration order and remembers which
//! stack owns the visible transition target.
//!
//! ## Snapshots
//!
//! The store is copy-on-write at every level: the stack list and each stack sit behind an
//! [`Arc`], and mutation goes through [`Arc::make_mut`]. Cloning a `NavState` is cheap and
//! the clone never observes later mutations of the original, down to individual views.
//!
//! ## Lookups
//!
//! [`NavState::find_view_by_id`] and [`NavState::find_view_by_location`] scan stacks in
//! registration order, then views in declaration order. The first hit wins.

use std::sync::Arc;

use understory_route::RouteMatch;

use crate::ids::{StackId, ViewId};
use crate::types::{ViewItem, ViewStack};

/// A view together with the stack that owns it.
#[derive(Copy, Clone, Debug)]
pub struct ViewLookup<'a> {
    /// The view.
    pub view: &'a ViewItem,
    /// Its stack.
    pub stack: &'a ViewStack,
}

/// A view whose route matches a location, with the fresh match.
#[derive(Clone, Debug)]
pub struct LocationLookup<'a> {
    /// The matching view.
    pub view: &'a ViewItem,
    /// Its stack.
    pub stack: &'a ViewStack,
    /// The match of the view's route against the location.
    pub matched: RouteMatch,
}

/// Stack registry plus the active stack id.
#[derive(Clone, Debug, Default)]
pub struct NavState {
    stacks: Arc<Vec<Arc<ViewStack>>>,
    active_stack_id: Option<StackId>,
}

impl NavState {
    /// Create an empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a stack.
    pub fn get(&self, stack_id: &StackId) -> Option<&ViewStack> {
        self.stacks
            .iter()
            .find(|s| &s.stack_id == stack_id)
            .map(|s| &**s)
    }

    /// All stacks in registration order.
    pub fn stacks(&self) -> impl Iterator<Item = &ViewStack> + '_ {
        self.stacks.iter().map(|s| &**s)
    }

    /// Number of registered stacks.
    pub fn len(&self) -> usize {
        self.stacks.len()
    }

    /// Whether no stack is registered.
    pub fn is_empty(&self) -> bool {
        self.stacks.is_empty()
    }

    /// The stack that owns the visible transition target.
    pub fn active_stack_id(&self) -> Option<&StackId> {
        self.active_stack_id.as_ref()
    }

    /// Insert a stack, or replace the one with the same id in place.
    pub fn upsert(&mut self, stack: ViewStack) {
        let stacks = Arc::make_mut(&mut self.stacks);
        match stacks.iter().position(|s| s.stack_id == stack.stack_id) {
            Some(i) => stacks[i] = Arc::new(stack),
            None => stacks.push(Arc::new(stack)),
        }
    }

    /// Remove a stack and return it.
    ///
    /// Clears the active stack id if it named the removed stack.
    pub fn remove(&mut self, stack_id: &StackId) -> Option<ViewStack> {
        let i = self.stacks.iter().position(|s| &s.stack_id == stack_id)?;
        let removed = Arc::make_mut(&mut self.stacks).remove(i);
        if self.active_stack_id.as_ref() == Some(stack_id) {
            self.active_stack_id = None;
        }
        Some(Arc::unwrap_or_clone(removed))
    }

    /// Find a view by id across all stacks.
    pub fn find_view_by_id(&self, id: ViewId) -> Option<ViewLookup<'_>> {
        self.stacks().find_map(|stack| {
            stack
                .view(id)
                .map(|view| ViewLookup { view, stack })
        })
    }

    /// Find the first view whose route matches `pathname`.
    pub fn find_view_by_location(&self, pathname: &str) -> Option<LocationLookup<'_>> {
        self.stacks().find_map(|stack| {
            stack.views.iter().find_map(|view| {
                view.route
                    .match_path(pathname)
                    .map(|matched| LocationLookup {
                        view,
                        stack,
                        matched,
                    })
            })
        })
    }

    /// Whether `self` and `other` share the same stack list allocation.
    ///
    /// Two snapshots taken without an intervening mutation share storage.
    pub fn shares_storage_with(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.stacks, &other.stacks)
    }

    pub(crate) fn set_active_stack_id(&mut self, stack_id: Option<StackId>) {
        self.active_stack_id = stack_id;
    }

    pub(crate) fn stack_mut(&mut self, stack_id: &StackId) -> Option<&mut ViewStack> {
        let i = self.stacks.iter().position(|s| &s.stack_id == stack_id)?;
        Some(Arc::make_mut(&mut Arc::make_mut(&mut self.stacks)[i]))
    }

    pub(crate) fn view_mut(&mut self, id: ViewId) -> Option<&mut ViewItem> {
        let stack_id = self.find_view_by_id(id)?.stack.stack_id.clone();
        self.stack_mut(&stack_id)?.view_mut(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{ElementKind, RouteDef, RouteNode, build_views};
    use crate::types::ViewFlags;

    fn stack(id: &str, paths: &[&str], location: &str) -> ViewStack {
        let children = paths
            .iter()
            .map(|p| RouteNode::from(RouteDef::exact(p, ElementKind::component(p)).unwrap()))
            .collect();
        let (views, active) = build_views(children, location);
        let mut stack = ViewStack::new(id.into(), views, false, None);
        if let Some(active) = active {
            stack.set_active(active);
        }
        stack
    }

    #[test]
    fn upsert_keeps_registration_order() {
        let mut state = NavState::new();
        state.upsert(stack("a", &["/a"], "/a"));
        state.upsert(stack("b", &["/b"], "/a"));
        state.upsert(stack("a", &["/a2"], "/a"));
        let ids: Vec<_> = state.stacks().map(|s| s.stack_id().as_str()).collect();
        assert_eq!(ids, ["a", "b"]);
        assert_eq!(state.len(), 2);
    }

    #[test]
    fn location_lookup_prefers_earlier_stacks() {
        let mut state = NavState::new();
        state.upsert(stack("first", &["/shared"], "/"));
        state.upsert(stack("second", &["/shared", "/other"], "/"));
        let hit = state.find_view_by_location("/shared").unwrap();
        assert_eq!(hit.stack.stack_id().as_str(), "first");
        assert_eq!(hit.matched.url, "/shared");
        let other = state.find_view_by_location("/other").unwrap();
        assert_eq!(other.stack.stack_id().as_str(), "second");
        assert!(state.find_view_by_location("/missing").is_none());
    }

    #[test]
    fn id_lookup_finds_owning_stack() {
        let mut state = NavState::new();
        state.upsert(stack("a", &["/a"], "/a"));
        state.upsert(stack("b", &["/b"], "/b"));
        let b_view = state.get(&"b".into()).unwrap().views()[0].id();
        let hit = state.find_view_by_id(b_view).unwrap();
        assert_eq!(hit.stack.stack_id().as_str(), "b");
        assert!(state.find_view_by_id(ViewId::generate()).is_none());
    }

    #[test]
    fn snapshots_do_not_see_later_mutations() {
        let mut state = NavState::new();
        state.upsert(stack("a", &["/a"], "/a"));
        let snapshot = state.clone();
        assert!(state.shares_storage_with(&snapshot));

        let id = state.get(&"a".into()).unwrap().views()[0].id();
        state.view_mut(id).unwrap().set(ViewFlags::SHOW, false);

        assert!(!state.shares_storage_with(&snapshot));
        assert!(snapshot.find_view_by_id(id).unwrap().view.is_shown());
        assert!(!state.find_view_by_id(id).unwrap().view.is_shown());
    }

    #[test]
    fn remove_clears_active_stack() {
        let mut state = NavState::new();
        state.upsert(stack("a", &["/a"], "/a"));
        state.set_active_stack_id(Some("a".into()));
        let removed = state.remove(&"a".into()).unwrap();
        assert_eq!(removed.stack_id().as_str(), "a");
        assert!(state.is_empty());
        assert_eq!(state.active_stack_id(), None);
        assert!(state.remove(&"a".into()).is_none());
    }
}
