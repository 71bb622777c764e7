// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The navigation manager: composition root for state, outlets, and history.

use std::collections::HashMap;
use std::fmt;

use log::{debug, trace, warn};

use crate::config::NavConfig;
use crate::error::{NavError, NavResult};
use crate::history::{History, LocationState, Subscription};
use crate::ids::{CommitTicket, RenderKey, StackId, ViewId};
use crate::lifecycle::{LifeCycle, LifecycleEvent};
use crate::outlet::Outlet;
use crate::registry::{RouteNode, build_views};
use crate::resolve;
use crate::state::NavState;
use crate::swipe::SwipeState;
use crate::transition::{Completion, InFlight, TransitionRequest, Waiting};
use crate::types::{NavDirection, ViewFlags, ViewStack};

/// Tracks every outlet's view stack and drives transitions between views.
///
/// ## Usage
///
/// 1) Create the manager over a [`History`]; it subscribes immediately and unsubscribes
///    when dropped.
/// 2) Bind each outlet with [`NavManager::setup_outlet`] and release it with
///    [`NavManager::remove_outlet`].
/// 3) Render each outlet from [`NavManager::outlet_views`]. Attach a lifecycle to each
///    rendered page with [`NavManager::attach_view`], then call
///    [`NavManager::after_render`] so queued commits can run against realized views.
/// 4) Navigate with [`NavManager::push`], [`NavManager::replace`], or
///    [`NavManager::go_back`]. Changes made directly on the history are picked up by
///    [`NavManager::sync_history`].
/// 5) Report pending commits with [`NavManager::commit_settled`] and forward page events
///    with [`NavManager::lifecycle_event`].
///
/// ## Snapshots
///
/// [`NavManager::state`] is always current. [`NavManager::snapshot`] is what the last
/// render should show; it lags behind while a dismiss or swipe commit animates against
/// the views that are already on screen.
pub struct NavManager<H: History> {
    pub(crate) config: NavConfig,
    pub(crate) history: H,
    subscription: Subscription,
    pub(crate) state: NavState,
    published: NavState,
    revision: u64,
    pub(crate) outlets: HashMap<StackId, Box<dyn Outlet>>,
    lifecycles: HashMap<ViewId, LifeCycle>,
    pub(crate) active_view_id: Option<ViewId>,
    pub(crate) prev_view_id: Option<ViewId>,
    pub(crate) swipe: SwipeState,
    pub(crate) deferred: Vec<TransitionRequest>,
    pub(crate) waiting: Vec<Waiting>,
    pub(crate) in_flight: HashMap<CommitTicket, InFlight>,
    pub(crate) next_ticket: u64,
}

impl<H: History> fmt::Debug for NavManager<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NavManager")
            .field("location", &self.history.location().pathname)
            .field("stacks", &self.state.len())
            .field("active_view_id", &self.active_view_id)
            .field("revision", &self.revision)
            .field("deferred", &self.deferred.len())
            .field("waiting", &self.waiting.len())
            .field("in_flight", &self.in_flight.len())
            .finish_non_exhaustive()
    }
}

impl<H: History> Drop for NavManager<H> {
    fn drop(&mut self) {
        self.history.unlisten(self.subscription);
    }
}

impl<H: History> NavManager<H> {
    /// Create a manager with the default configuration.
    pub fn new(history: H) -> Self {
        Self::with_config(history, NavConfig::default())
    }

    /// Create a manager with an explicit configuration.
    pub fn with_config(mut history: H, config: NavConfig) -> Self {
        let subscription = history.listen();
        Self {
            config,
            history,
            subscription,
            state: NavState::new(),
            published: NavState::new(),
            revision: 0,
            outlets: HashMap::new(),
            lifecycles: HashMap::new(),
            active_view_id: None,
            prev_view_id: None,
            swipe: SwipeState::default(),
            deferred: Vec::new(),
            waiting: Vec::new(),
            in_flight: HashMap::new(),
            next_ticket: 0,
        }
    }

    /// The configuration.
    pub fn config(&self) -> &NavConfig {
        &self.config
    }

    /// The history provider.
    pub fn history(&self) -> &H {
        &self.history
    }

    /// Mutable access to the history provider.
    ///
    /// Call [`NavManager::sync_history`] after navigating through it.
    pub fn history_mut(&mut self) -> &mut H {
        &mut self.history
    }

    /// The current navigation state.
    pub fn state(&self) -> &NavState {
        &self.state
    }

    /// The last published navigation state.
    pub fn snapshot(&self) -> &NavState {
        &self.published
    }

    /// Incremented every time a new snapshot is published.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Id of the view that was last navigated to.
    pub fn active_view_id(&self) -> Option<ViewId> {
        self.active_view_id
    }

    /// Id of the view that was active before [`NavManager::active_view_id`].
    pub fn prev_view_id(&self) -> Option<ViewId> {
        self.prev_view_id
    }

    /// Number of commits handed to outlets and not yet settled.
    pub fn in_flight_count(&self) -> usize {
        self.in_flight.len()
    }

    /// Number of commits queued for the next [`NavManager::after_render`].
    pub fn deferred_count(&self) -> usize {
        self.deferred.len()
    }

    /// Push a new history entry and process the change.
    pub fn push(&mut self, path: &str, state: LocationState) {
        self.history.push(path, state);
        self.sync_history();
    }

    /// Replace the current history entry and process the change.
    pub fn replace(&mut self, path: &str, state: LocationState) {
        self.history.replace(path, state);
        self.sync_history();
    }

    /// Process every pending history change, oldest first.
    pub fn sync_history(&mut self) {
        while let Some(change) = self.history.poll_change(self.subscription) {
            self.history_changed(&change.location, change.action);
        }
    }

    /// Bind an outlet to a new view stack.
    ///
    /// Presentation stacks get `close_path`, or the configured default when it is `None`;
    /// other stacks ignore it. If a route matches the current location its view becomes
    /// active and an initial commit is queued for the next [`NavManager::after_render`].
    pub fn setup_outlet(
        &mut self,
        stack_id: StackId,
        children: Vec<RouteNode>,
        outlet: Box<dyn Outlet>,
        is_presentation: bool,
        close_path: Option<String>,
    ) {
        let location = self.history.location().clone();
        let (views, active) = build_views(children, &location.pathname);
        let close_path = is_presentation
            .then(|| close_path.unwrap_or_else(|| self.config.default_close_path.clone()));

        self.forget_stack(&stack_id);
        let mut stack = ViewStack::new(stack_id.clone(), views, is_presentation, close_path);
        if let Some(active) = active {
            stack.set_active(active);
        }
        debug!(
            "bind stack `{stack_id}` with {} views at {} (active: {active:?})",
            stack.views().len(),
            location.pathname
        );
        self.state.upsert(stack);
        if self.state.active_stack_id().is_none() && !is_presentation {
            self.state.set_active_stack_id(Some(stack_id.clone()));
        }
        self.outlets.insert(stack_id.clone(), outlet);
        self.publish();

        if let Some(active) = active {
            self.prev_view_id = self.active_view_id;
            self.active_view_id = Some(active);
            self.deferred.push(TransitionRequest {
                entering: active,
                leaving: self.prev_view_id,
                stack_id,
                direction: location.state.direction.unwrap_or(NavDirection::None),
                completion: Completion::None,
            });
        }
    }

    /// Unbind an outlet; other stacks are untouched.
    pub fn remove_outlet(&mut self, stack_id: &StackId) {
        self.forget_stack(stack_id);
        if self.state.remove(stack_id).is_some() {
            debug!("unbind stack `{stack_id}`");
            self.publish();
        }
    }

    /// Hide a view and give it a fresh render key so it remounts when shown again.
    pub fn hide_view(&mut self, id: ViewId) -> NavResult<()> {
        let view = self.state.view_mut(id).ok_or(NavError::UnknownView(id))?;
        view.set(ViewFlags::SHOW, false);
        view.key = RenderKey::generate();
        trace!("hide view {id}");
        self.publish();
        Ok(())
    }

    /// Go back from the current location.
    ///
    /// See [`resolve::go_back_href`] for how the target is chosen. The current history
    /// entry is replaced with a [`NavDirection::Back`] hint.
    pub fn go_back(&mut self, default_href: Option<&str>) {
        let href = resolve::go_back_href(
            &self.state,
            &self.history.location().pathname,
            default_href,
            &self.config,
        );
        debug!("go back to {href}");
        self.history
            .replace(&href, LocationState::with_direction(NavDirection::Back));
        self.sync_history();
    }

    /// Register the lifecycle of a view whose page is now realized.
    ///
    /// Only realized views take part in commits. Attaching twice keeps the existing
    /// handlers.
    pub fn attach_view(&mut self, id: ViewId) -> NavResult<&mut LifeCycle> {
        if self.state.find_view_by_id(id).is_none() {
            return Err(NavError::UnknownView(id));
        }
        Ok(self.lifecycles.entry(id).or_default())
    }

    /// Drop the lifecycle of a view whose page was torn down.
    pub fn detach_view(&mut self, id: ViewId) {
        self.lifecycles.remove(&id);
    }

    /// Whether a view's page is realized.
    pub fn is_realized(&self, id: ViewId) -> bool {
        self.lifecycles.contains_key(&id)
    }

    /// Deliver a lifecycle event to a realized view.
    ///
    /// When the event signals that the view can be destroyed and the view is no longer
    /// mounted, the view is hidden.
    pub fn lifecycle_event(&mut self, id: ViewId, event: LifecycleEvent) -> NavResult<()> {
        let Some(lifecycle) = self.lifecycles.get_mut(&id) else {
            warn!("{event:?} for view {id}, which is not attached");
            return Err(NavError::ViewNotAttached(id));
        };
        if !lifecycle.dispatch(event) {
            return Ok(());
        }
        let mounted = self
            .state
            .find_view_by_id(id)
            .map(|hit| hit.view.is_mounted());
        if mounted == Some(false) {
            self.hide_view(id)?;
        }
        Ok(())
    }

    pub(crate) fn publish(&mut self) {
        self.published = self.state.clone();
        self.revision += 1;
    }

    /// Drop everything the manager holds for a stack besides its state entry.
    ///
    /// Commits still owed to the stack's outlet are abandoned.
    fn forget_stack(&mut self, stack_id: &StackId) {
        if let Some(stack) = self.state.get(stack_id) {
            for view in stack.views() {
                self.lifecycles.remove(&view.id());
            }
        }
        self.outlets.remove(stack_id);
        self.deferred.retain(|r| &r.stack_id != stack_id);
        self.abandon_stack(stack_id);
    }
}
