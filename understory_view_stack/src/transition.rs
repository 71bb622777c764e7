// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Transition orchestration.
//!
//! ## Overview
//!
//! A history change becomes a state update plus one visual commit:
//!
//! - Resolve the entering view by location and the leaving view by the active view id.
//! - Update flags, the stack's active view, and the presentation flags in the state.
//! - Pick a direction: an explicit hint wins, then push/pop on the same tab, then
//!   present/dismiss, which override everything.
//! - Hand the commit to the owning outlet.
//!
//! ## Timing
//!
//! Dismissals and swipe-driven changes commit immediately against the views already on
//! screen and only publish state once the commit settles. Every other change publishes
//! first and queues the commit until [`NavManager::after_render`] runs, so the entering
//! page exists when the outlet animates it.
//!
//! Commits against an outlet that is not ready are parked. [`NavManager::outlet_ready`]
//! flushes them and [`NavManager::retry_waiting`] polls them, dropping any that stay
//! parked past [`NavConfig::max_ready_retries`](crate::NavConfig::max_ready_retries).

use std::time::Duration;

use log::{debug, trace, warn};

use crate::error::{NavError, NavResult};
use crate::history::{History, HistoryAction, Location};
use crate::ids::{CommitTicket, StackId, ViewId};
use crate::lifecycle::LifecycleEvent;
use crate::manager::NavManager;
use crate::outlet::{CommitRequest, CommitStatus};
use crate::resolve;
use crate::types::{NavDirection, ViewFlags};

/// What to run once a commit settles.
pub(crate) enum Completion {
    None,
    Callback(Box<dyn FnOnce()>),
    Settle(Settle),
}

/// Bookkeeping deferred until a synchronous commit settles.
pub(crate) struct Settle {
    entering_stack: StackId,
    dismissed_stack: Option<StackId>,
    leaving: Option<ViewId>,
}

pub(crate) struct TransitionRequest {
    pub(crate) entering: ViewId,
    pub(crate) leaving: Option<ViewId>,
    pub(crate) stack_id: StackId,
    pub(crate) direction: NavDirection,
    pub(crate) completion: Completion,
}

/// A commit parked until its outlet is ready.
pub(crate) struct Waiting {
    pub(crate) request: TransitionRequest,
    attempts: u32,
}

pub(crate) struct InFlight {
    stack_id: StackId,
    completion: Completion,
}

/// The parts of the leaving view the orchestrator needs after it starts mutating state.
struct Leaving {
    id: ViewId,
    stack_id: StackId,
    url: Option<String>,
    tab: Option<String>,
    is_close: bool,
    is_redirect: bool,
}

impl<H: History> NavManager<H> {
    /// React to the history moving to `location`.
    pub(crate) fn history_changed(&mut self, location: &Location, action: HistoryAction) {
        let Some(hit) = resolve::resolve_by_location(&self.state, &location.pathname) else {
            trace!("no view matches {}", location.pathname);
            return;
        };
        let entering = hit.view.id();
        let entering_stack = hit.stack.stack_id().clone();
        let entering_was_hidden = !hit.view.is_shown();
        let is_dismiss = hit.stack.close_path() == Some(hit.matched.url.as_str());
        let matched = hit.matched;

        let leaving = resolve::resolve_by_id(&self.state, self.active_view_id).map(|l| Leaving {
            id: l.view.id(),
            stack_id: l.stack.stack_id().clone(),
            url: l.view.matched_url().map(str::to_string),
            tab: l.view.tab().map(str::to_string),
            is_close: l.stack.is_close_view(l.view),
            is_redirect: l.view.is_redirect(),
        });
        if leaving
            .as_ref()
            .is_some_and(|l| l.url.as_deref() == Some(matched.url.as_str()))
        {
            trace!("already at {}", matched.url);
            return;
        }
        let is_present = leaving.as_ref().is_some_and(|l| l.is_close);
        let entering_tab = matched.params.get("tab").map(str::to_string);

        let going_back = self.swipe.going_back;
        if let Some(view) = self.state.view_mut(entering) {
            if entering_was_hidden && action == HistoryAction::Push {
                view.prev_id = leaving.as_ref().map(|l| l.id);
            }
            view.set(ViewFlags::SHOW, true);
            view.set(ViewFlags::MOUNT, true);
            view.set(ViewFlags::PREVENT_HIDE, going_back);
            view.matched = Some(matched);
        }
        if let Some(stack) = self.state.stack_mut(&entering_stack) {
            stack.set_active(entering);
            if !is_dismiss {
                stack.is_active = true;
            }
        }
        self.active_view_id = Some(entering);

        let mut direction = location.state.direction;
        let mut leaving_id = None;
        let mut dismissed_stack = None;
        if let Some(l) = &leaving {
            let same_view = l.id == entering;
            self.prev_view_id = Some(l.id);
            if !same_view {
                leaving_id = Some(l.id);
            }
            if l.url.is_some() && l.tab == entering_tab {
                if action == HistoryAction::Push {
                    direction.get_or_insert(NavDirection::Forward);
                } else {
                    direction.get_or_insert(NavDirection::Back);
                    if !same_view {
                        self.set_view_flags(l.id, ViewFlags::MOUNT, false);
                    }
                }
            }
            if l.is_redirect && !same_view {
                self.set_view_flags(l.id, ViewFlags::MOUNT | ViewFlags::SHOW, false);
            }
            if is_dismiss {
                self.unmount_views_on_stack(&l.stack_id);
                dismissed_stack = Some(l.stack_id.clone());
                direction = Some(NavDirection::Dismiss);
            } else if is_present {
                direction = Some(NavDirection::Present);
            }
        }
        let direction = direction.unwrap_or(NavDirection::None);
        debug!(
            "{action:?} {} on `{entering_stack}` ({direction:?})",
            location.pathname
        );

        if is_dismiss || self.swipe.going_back || self.swipe.reverting {
            let settle = Settle {
                entering_stack: entering_stack.clone(),
                dismissed_stack,
                leaving: leaving_id,
            };
            if self.is_realized(entering) {
                let leaving = leaving_id.filter(|id| self.is_realized(*id));
                self.transition(TransitionRequest {
                    entering,
                    leaving,
                    stack_id: entering_stack,
                    direction,
                    completion: Completion::Settle(settle),
                });
            } else {
                debug!("view {entering} is not realized; settling without a commit");
                self.settle(settle);
            }
        } else {
            self.state.set_active_stack_id(Some(entering_stack.clone()));
            self.publish();
            self.deferred.push(TransitionRequest {
                entering,
                leaving: leaving_id,
                stack_id: entering_stack,
                direction,
                completion: Completion::None,
            });
        }
    }

    /// Run a visual transition on the outlet bound to `stack_id`.
    ///
    /// `on_complete` runs once the commit settles. The transition is parked if the outlet
    /// is not ready.
    pub fn transition_view(
        &mut self,
        entering: ViewId,
        leaving: Option<ViewId>,
        stack_id: &StackId,
        direction: NavDirection,
        on_complete: Option<Box<dyn FnOnce()>>,
    ) -> NavResult<()> {
        if !self.outlets.contains_key(stack_id) {
            return Err(NavError::UnknownStack(stack_id.clone()));
        }
        self.transition(TransitionRequest {
            entering,
            leaving,
            stack_id: stack_id.clone(),
            direction,
            completion: on_complete.map_or(Completion::None, Completion::Callback),
        });
        Ok(())
    }

    /// Run the commits queued by the last state changes.
    ///
    /// Call this once the host has rendered the latest [`NavManager::snapshot`] and
    /// attached the views it realized. Commits whose entering view is still not realized
    /// are dropped.
    pub fn after_render(&mut self) {
        for request in std::mem::take(&mut self.deferred) {
            if !self.is_realized(request.entering) {
                debug!("skip commit: view {} is not realized", request.entering);
                continue;
            }
            let leaving = request.leaving.filter(|id| self.is_realized(*id));
            self.transition(TransitionRequest { leaving, ..request });
        }
    }

    /// Report that the commit behind `ticket` finished.
    pub fn commit_settled(&mut self, ticket: CommitTicket) -> NavResult<()> {
        if !self.in_flight.contains_key(&ticket) {
            warn!("{ticket} settled but is not in flight");
            return Err(NavError::UnknownCommit(ticket));
        }
        self.finish_commit(ticket);
        Ok(())
    }

    /// Flush commits parked on `stack_id`.
    pub fn outlet_ready(&mut self, stack_id: &StackId) {
        let (ready, parked): (Vec<_>, Vec<_>) = std::mem::take(&mut self.waiting)
            .into_iter()
            .partition(|w| &w.request.stack_id == stack_id);
        self.waiting = parked;
        for w in ready {
            self.transition(w.request);
        }
    }

    /// Poll every outlet with parked commits and run those that became ready.
    ///
    /// Hosts call this every [`NavManager::next_retry_delay`] while commits are parked.
    pub fn retry_waiting(&mut self) {
        for mut w in std::mem::take(&mut self.waiting) {
            match self.outlets.get(&w.request.stack_id).map(|o| o.is_ready()) {
                None => {
                    debug!("drop commit: stack `{}` is gone", w.request.stack_id);
                    self.abandon(w.request);
                }
                Some(true) => self.commit(w.request),
                Some(false) => {
                    w.attempts += 1;
                    if w.attempts > self.config.max_ready_retries {
                        warn!(
                            "drop commit: outlet `{}` not ready after {} retries",
                            w.request.stack_id, self.config.max_ready_retries
                        );
                        self.abandon(w.request);
                    } else {
                        self.waiting.push(w);
                    }
                }
            }
        }
    }

    /// How long the host should wait before calling [`NavManager::retry_waiting`].
    pub fn next_retry_delay(&self) -> Option<Duration> {
        (!self.waiting.is_empty()).then_some(self.config.ready_retry_interval)
    }

    /// Number of parked commits.
    pub fn waiting_count(&self) -> usize {
        self.waiting.len()
    }

    pub(crate) fn transition(&mut self, request: TransitionRequest) {
        let Some(outlet) = self.outlets.get(&request.stack_id) else {
            warn!("no outlet bound for stack `{}`", request.stack_id);
            self.abandon(request);
            return;
        };
        if !outlet.is_ready() {
            debug!("park commit: outlet `{}` not ready", request.stack_id);
            self.waiting.push(Waiting {
                request,
                attempts: 0,
            });
            return;
        }
        self.commit(request);
    }

    fn commit(&mut self, request: TransitionRequest) {
        let commit = CommitRequest::new(
            request.entering,
            request.leaving,
            request.direction,
            self.swipe.going_back,
            self.swipe.reverting,
        );
        let ticket = CommitTicket(self.next_ticket);
        self.next_ticket += 1;
        let Some(outlet) = self.outlets.get_mut(&request.stack_id) else {
            return;
        };
        trace!("{ticket} on `{}`: {commit:?}", request.stack_id);
        self.in_flight.insert(
            ticket,
            InFlight {
                stack_id: request.stack_id,
                completion: request.completion,
            },
        );
        if outlet.commit(ticket, &commit) == CommitStatus::Settled {
            self.finish_commit(ticket);
        }
    }

    fn finish_commit(&mut self, ticket: CommitTicket) {
        let Some(done) = self.in_flight.remove(&ticket) else {
            return;
        };
        trace!("{ticket} on `{}` settled", done.stack_id);
        match done.completion {
            Completion::None => {}
            Completion::Callback(callback) => callback(),
            Completion::Settle(settle) => self.settle(settle),
        }
    }

    /// Drop every commit parked on, or in flight against, the outlet of `stack_id`.
    ///
    /// Nothing will settle these once the outlet is gone. Settle bookkeeping still runs;
    /// callbacks do not.
    pub(crate) fn abandon_stack(&mut self, stack_id: &StackId) {
        let (dropped, parked): (Vec<_>, Vec<_>) = std::mem::take(&mut self.waiting)
            .into_iter()
            .partition(|w| &w.request.stack_id == stack_id);
        self.waiting = parked;
        for w in dropped {
            debug!("drop parked commit: stack `{stack_id}` unbound");
            self.abandon(w.request);
        }

        let mut tickets: Vec<_> = self
            .in_flight
            .iter()
            .filter(|(_, f)| &f.stack_id == stack_id)
            .map(|(ticket, _)| *ticket)
            .collect();
        tickets.sort_unstable();
        for ticket in tickets {
            let Some(done) = self.in_flight.remove(&ticket) else {
                continue;
            };
            debug!("drop {ticket}: stack `{stack_id}` unbound");
            if let Completion::Settle(settle) = done.completion {
                self.settle(settle);
            }
        }
    }

    /// Drop a commit that will never run. Settle bookkeeping still applies so the state
    /// does not get stuck half way through a dismissal.
    fn abandon(&mut self, request: TransitionRequest) {
        if let Completion::Settle(settle) = request.completion {
            self.settle(settle);
        }
    }

    fn settle(&mut self, settle: Settle) {
        if let Some(stack) = settle
            .dismissed_stack
            .as_ref()
            .and_then(|id| self.state.stack_mut(id))
        {
            stack.is_active = false;
        }
        if self.state.get(&settle.entering_stack).is_some() {
            self.state.set_active_stack_id(Some(settle.entering_stack));
        }
        self.publish();
        if let Some(leaving) = settle.leaving.filter(|id| self.is_realized(*id))
            && let Err(err) = self.lifecycle_event(leaving, LifecycleEvent::ForceDestroy)
        {
            warn!("could not tear down view {leaving}: {err}");
        }
        self.swipe.reverting = false;
    }

    fn set_view_flags(&mut self, id: ViewId, flags: ViewFlags, on: bool) {
        if let Some(view) = self.state.view_mut(id) {
            view.set(flags, on);
        }
    }

    /// Unmount and hide every view of a stack except the one on its close route.
    fn unmount_views_on_stack(&mut self, stack_id: &StackId) {
        let Some(stack) = self.state.stack_mut(stack_id) else {
            return;
        };
        let close = stack.close_path.clone();
        for view in &mut stack.views {
            if close.is_none() || view.matched_url() != close.as_deref() {
                view.set(ViewFlags::MOUNT | ViewFlags::SHOW, false);
            }
        }
    }
}
