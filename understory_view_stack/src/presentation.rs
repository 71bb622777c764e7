// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Modal presentation stacks.
//!
//! ## Overview
//!
//! A presentation runs its own [`NavManager`] over an in-memory history that starts on a
//! close route. The close route renders an empty placeholder; presenting pushes a real
//! route onto the inner history and dismissing goes back to the close route.
//!
//! [`PresentationBridge`] keeps the host's own history in step with the inner one:
//!
//! - Presenting pushes a duplicate of the current outer entry, so the host's "back"
//!   lands on the presentation instead of leaving the page.
//! - A pop on the outer history is forwarded as "back" to the inner manager. If the
//!   presentation is still showing content afterwards, the outer entry is pushed again.
//! - When the inner history reaches the close route on its own, the duplicate outer
//!   entry is popped and the completion passed to [`PresentationBridge::present`] fires
//!   once the dismiss animation has had time to run.
//!
//! Time is passed in by the host; nothing here reads a clock.

use std::fmt;
use std::time::{Duration, Instant};

use log::debug;

use crate::config::NavConfig;
use crate::error::NavResult;
use crate::history::{History, Location, LocationState, MemoryHistory};
use crate::ids::StackId;
use crate::manager::NavManager;
use crate::outlet::Outlet;
use crate::registry::{ElementKind, RouteDef, RouteNode};

/// Called once a dismissal has finished animating.
pub type DismissCallback = Box<dyn FnOnce()>;

/// Glue between an inner presentation manager and the host's history.
pub struct PresentationBridge {
    close_path: String,
    is_presenting: bool,
    inner_location: Option<Location>,
    on_dismissed: Option<DismissCallback>,
    due: Option<Instant>,
    dismiss_duration: Duration,
}

impl fmt::Debug for PresentationBridge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PresentationBridge")
            .field("close_path", &self.close_path)
            .field("is_presenting", &self.is_presenting)
            .field("inner_location", &self.inner_location)
            .field("has_callback", &self.on_dismissed.is_some())
            .field("due", &self.due)
            .field("dismiss_duration", &self.dismiss_duration)
            .finish()
    }
}

impl PresentationBridge {
    /// Create a bridge using the configured close route and dismiss duration.
    pub fn new(config: &NavConfig) -> Self {
        Self {
            close_path: config.default_close_path.clone(),
            is_presenting: false,
            inner_location: None,
            on_dismissed: None,
            due: None,
            dismiss_duration: config.dismiss_duration,
        }
    }

    /// Whether the inner history is away from the close route.
    pub fn is_presenting(&self) -> bool {
        self.is_presenting
    }

    /// Whether [`PresentationBridge::config`] has run at least once.
    pub fn is_configured(&self) -> bool {
        self.inner_location.is_some()
    }

    /// The inner close route.
    pub fn close_path(&self) -> &str {
        &self.close_path
    }

    /// When the pending completion is due, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.due
    }

    /// Update the bridge with the inner manager's location.
    ///
    /// Called after every inner render. Reaching the close route from somewhere else pops
    /// the duplicate outer entry and schedules the completion.
    pub fn config(
        &mut self,
        inner_location: &Location,
        close_path: &str,
        outer: &mut impl History,
        now: Instant,
    ) {
        let was_presenting = self
            .inner_location
            .as_ref()
            .is_some_and(|l| l.pathname != self.close_path);
        self.close_path = close_path.to_string();
        self.is_presenting = inner_location.pathname != self.close_path;
        if was_presenting && !self.is_presenting {
            debug!("presentation closed; popping the outer entry");
            outer.go_back();
            if self.on_dismissed.is_some() {
                self.due = Some(now + self.dismiss_duration);
            }
        }
        self.inner_location = Some(inner_location.clone());
    }

    /// Present `path` on the inner manager.
    ///
    /// Returns `false`, doing nothing, until the bridge has been configured.
    pub fn present<H: History>(
        &mut self,
        inner: &mut NavManager<H>,
        outer: &mut impl History,
        path: &str,
        state: LocationState,
        on_dismissed: Option<DismissCallback>,
    ) -> bool {
        if !self.is_configured() {
            return false;
        }
        debug!("present {path}");
        inner.push(path, state);
        let current = outer.location().pathname.clone();
        outer.push(&current, LocationState::default());
        self.on_dismissed = on_dismissed;
        true
    }

    /// Forward a pop of the outer history to the inner manager.
    pub fn on_outer_pop<H: History>(&mut self, inner: &mut NavManager<H>, outer: &mut impl History) {
        if !self.is_configured() {
            return;
        }
        inner.go_back(None);
        if self.is_presenting {
            let current = outer.location().pathname.clone();
            outer.push(&current, LocationState::default());
        }
    }

    /// Fire the completion if it is due. Returns whether it fired.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.due.is_none_or(|due| due > now) {
            return false;
        }
        self.due = None;
        match self.on_dismissed.take() {
            Some(callback) => {
                callback();
                true
            }
            None => false,
        }
    }
}

/// A self-contained presentation stack: inner history, manager, outlet, and bridge.
#[derive(Debug)]
pub struct Presentation {
    manager: NavManager<MemoryHistory>,
    bridge: PresentationBridge,
    stack_id: StackId,
}

impl Presentation {
    /// Create a presentation whose close route is `/{close}`.
    ///
    /// The close route renders [`ElementKind::Placeholder`] and is declared ahead of
    /// `routes`. `close` defaults to `close`.
    pub fn new(
        stack_id: Option<StackId>,
        close: Option<&str>,
        routes: Vec<RouteDef>,
        outlet: Box<dyn Outlet>,
        config: NavConfig,
    ) -> NavResult<Self> {
        let close = close.unwrap_or("close");
        let close_path = format!("/{close}");
        let placeholder = RouteDef::exact(&format!("/:tab({close})"), ElementKind::Placeholder)?;
        let mut switch = vec![placeholder];
        switch.extend(routes);

        let bridge = PresentationBridge::new(&config);
        let stack_id = stack_id.unwrap_or_else(StackId::generate);
        let mut manager = NavManager::with_config(MemoryHistory::new(&close_path), config);
        manager.setup_outlet(
            stack_id.clone(),
            vec![RouteNode::Switch(switch)],
            outlet,
            true,
            Some(close_path),
        );
        Ok(Self {
            manager,
            bridge,
            stack_id,
        })
    }

    /// The inner manager.
    pub fn manager(&self) -> &NavManager<MemoryHistory> {
        &self.manager
    }

    /// Mutable access to the inner manager.
    pub fn manager_mut(&mut self) -> &mut NavManager<MemoryHistory> {
        &mut self.manager
    }

    /// The bridge.
    pub fn bridge(&self) -> &PresentationBridge {
        &self.bridge
    }

    /// The inner stack id.
    pub fn stack_id(&self) -> &StackId {
        &self.stack_id
    }

    /// Whether content is being presented.
    pub fn is_presenting(&self) -> bool {
        self.bridge.is_presenting()
    }

    /// See [`PresentationBridge::present`].
    pub fn present(
        &mut self,
        outer: &mut impl History,
        path: &str,
        state: LocationState,
        on_dismissed: Option<DismissCallback>,
    ) -> bool {
        self.bridge
            .present(&mut self.manager, outer, path, state, on_dismissed)
    }

    /// Dismiss whatever is presented.
    pub fn dismiss(&mut self) {
        self.manager.go_back(None);
    }

    /// Run queued inner commits, then sync the bridge with the inner location.
    pub fn after_render(&mut self, outer: &mut impl History, now: Instant) {
        self.manager.after_render();
        let location = self.manager.history().location().clone();
        let close_path = self
            .manager
            .state()
            .get(&self.stack_id)
            .and_then(|stack| stack.close_path())
            .unwrap_or(&self.manager.config().default_close_path)
            .to_string();
        self.bridge.config(&location, &close_path, outer, now);
    }

    /// See [`PresentationBridge::on_outer_pop`].
    pub fn on_outer_pop(&mut self, outer: &mut impl History) {
        self.bridge.on_outer_pop(&mut self.manager, outer);
    }

    /// See [`PresentationBridge::tick`].
    pub fn tick(&mut self, now: Instant) -> bool {
        self.bridge.tick(now)
    }
}
