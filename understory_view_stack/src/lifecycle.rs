// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-view lifecycle hooks and the destruction protocol.
//!
//! ## Overview
//!
//! Every realized view owns a [`LifeCycle`]. The hosted page registers handlers for the
//! enter/leave notifications; the host forwards the outlet's events to
//! [`NavManager::lifecycle_event`](crate::NavManager::lifecycle_event).
//!
//! Leaving always ends with a "can be destroyed" signal: [`LifeCycle::did_leave`] triggers
//! it right after the did-leave handler, and [`LifecycleEvent::ForceDestroy`] triggers it
//! directly. The manager reacts to that signal by hiding the view if it is no longer
//! mounted, so teardown only happens once the page has finished leaving.
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use understory_view_stack::{LifeCycle, LifecycleEvent};
//!
//! let left = Rc::new(Cell::new(false));
//! let mut lc = LifeCycle::new();
//! let flag = left.clone();
//! lc.on_did_leave(move || flag.set(true));
//!
//! // `DidLeave` runs the handler and reports that the view may be destroyed.
//! assert!(lc.dispatch(LifecycleEvent::DidLeave));
//! assert!(left.get());
//! assert!(!lc.dispatch(LifecycleEvent::WillEnter));
//! ```

use std::fmt;

/// A registered lifecycle handler.
pub type Handler = Box<dyn FnMut()>;

/// Events delivered to a view's root element.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum LifecycleEvent {
    /// The view is about to become visible.
    WillEnter,
    /// The view finished entering.
    DidEnter,
    /// The view is about to leave.
    WillLeave,
    /// The view finished leaving.
    DidLeave,
    /// The manager no longer needs the view on screen.
    ForceDestroy,
}

/// Handler slots for one view.
#[derive(Default)]
pub struct LifeCycle {
    will_enter: Option<Handler>,
    did_enter: Option<Handler>,
    will_leave: Option<Handler>,
    did_leave: Option<Handler>,
    can_be_destroyed: Option<Handler>,
}

impl fmt::Debug for LifeCycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LifeCycle")
            .field("will_enter", &self.will_enter.is_some())
            .field("did_enter", &self.did_enter.is_some())
            .field("will_leave", &self.will_leave.is_some())
            .field("did_leave", &self.did_leave.is_some())
            .field("can_be_destroyed", &self.can_be_destroyed.is_some())
            .finish()
    }
}

impl LifeCycle {
    /// Create a lifecycle with no handlers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the will-enter handler, replacing any previous one.
    pub fn on_will_enter(&mut self, handler: impl FnMut() + 'static) {
        self.will_enter = Some(Box::new(handler));
    }

    /// Register the did-enter handler.
    pub fn on_did_enter(&mut self, handler: impl FnMut() + 'static) {
        self.did_enter = Some(Box::new(handler));
    }

    /// Register the will-leave handler.
    pub fn on_will_leave(&mut self, handler: impl FnMut() + 'static) {
        self.will_leave = Some(Box::new(handler));
    }

    /// Register the did-leave handler.
    pub fn on_did_leave(&mut self, handler: impl FnMut() + 'static) {
        self.did_leave = Some(Box::new(handler));
    }

    /// Register the can-be-destroyed handler.
    pub fn on_can_be_destroyed(&mut self, handler: impl FnMut() + 'static) {
        self.can_be_destroyed = Some(Box::new(handler));
    }

    /// Trigger will-enter.
    pub fn will_enter(&mut self) {
        fire(&mut self.will_enter);
    }

    /// Trigger did-enter.
    pub fn did_enter(&mut self) {
        fire(&mut self.did_enter);
    }

    /// Trigger will-leave.
    pub fn will_leave(&mut self) {
        fire(&mut self.will_leave);
    }

    /// Trigger did-leave, then can-be-destroyed.
    pub fn did_leave(&mut self) {
        fire(&mut self.did_leave);
        self.can_be_destroyed();
    }

    /// Trigger can-be-destroyed.
    pub fn can_be_destroyed(&mut self) {
        fire(&mut self.can_be_destroyed);
    }

    /// Route an event to the matching trigger.
    ///
    /// Returns `true` when the event signalled that the view can be destroyed.
    pub fn dispatch(&mut self, event: LifecycleEvent) -> bool {
        match event {
            LifecycleEvent::WillEnter => self.will_enter(),
            LifecycleEvent::DidEnter => self.did_enter(),
            LifecycleEvent::WillLeave => self.will_leave(),
            LifecycleEvent::DidLeave => {
                self.did_leave();
                return true;
            }
            LifecycleEvent::ForceDestroy => {
                self.can_be_destroyed();
                return true;
            }
        }
        false
    }
}

fn fire(slot: &mut Option<Handler>) {
    if let Some(handler) = slot {
        handler();
    }
}
