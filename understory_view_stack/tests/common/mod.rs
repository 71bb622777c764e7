// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared helpers for navigation integration tests.

#![allow(
    missing_docs,
    dead_code,
    reason = "Integration-test helper module; not every test uses every helper."
)]

use std::cell::RefCell;
use std::rc::Rc;

use understory_view_stack::{
    CommitRequest, CommitStatus, CommitTicket, ElementKind, History, NavManager, Outlet,
    RouteDef, RouteNode, StackId, ViewId,
};

#[derive(Debug)]
struct ProbeState {
    ready: bool,
    pending: bool,
    commits: Vec<(CommitTicket, CommitRequest)>,
}

/// Records every commit an outlet receives.
///
/// Clones share the same record, so a test keeps one handle while the manager owns the
/// boxed outlet.
#[derive(Clone, Debug)]
pub(crate) struct Probe(Rc<RefCell<ProbeState>>);

impl Probe {
    pub(crate) fn new() -> Self {
        Self(Rc::new(RefCell::new(ProbeState {
            ready: true,
            pending: false,
            commits: Vec::new(),
        })))
    }

    pub(crate) fn outlet(&self) -> Box<dyn Outlet> {
        Box::new(ProbeOutlet(self.0.clone()))
    }

    pub(crate) fn set_ready(&self, ready: bool) {
        self.0.borrow_mut().ready = ready;
    }

    /// Make commits report [`CommitStatus::Pending`] instead of settling.
    pub(crate) fn set_pending(&self, pending: bool) {
        self.0.borrow_mut().pending = pending;
    }

    pub(crate) fn commits(&self) -> Vec<CommitRequest> {
        self.0.borrow().commits.iter().map(|(_, r)| r.clone()).collect()
    }

    pub(crate) fn tickets(&self) -> Vec<CommitTicket> {
        self.0.borrow().commits.iter().map(|(t, _)| *t).collect()
    }

    pub(crate) fn last(&self) -> CommitRequest {
        self.0
            .borrow()
            .commits
            .last()
            .map(|(_, r)| r.clone())
            .expect("no commit recorded")
    }

    pub(crate) fn count(&self) -> usize {
        self.0.borrow().commits.len()
    }
}

#[derive(Debug)]
struct ProbeOutlet(Rc<RefCell<ProbeState>>);

impl Outlet for ProbeOutlet {
    fn is_ready(&self) -> bool {
        self.0.borrow().ready
    }

    fn commit(&mut self, ticket: CommitTicket, request: &CommitRequest) -> CommitStatus {
        let mut state = self.0.borrow_mut();
        state.commits.push((ticket, request.clone()));
        if state.pending {
            CommitStatus::Pending
        } else {
            CommitStatus::Settled
        }
    }
}

pub(crate) fn page(path: &str) -> RouteDef {
    RouteDef::exact(path, ElementKind::component(path)).unwrap()
}

pub(crate) fn switch(paths: &[&str]) -> Vec<RouteNode> {
    vec![RouteNode::Switch(paths.iter().map(|p| page(p)).collect())]
}

/// Bind a regular outlet with the given exact routes.
pub(crate) fn bind<H: History>(nav: &mut NavManager<H>, id: &str, paths: &[&str], probe: &Probe) -> StackId {
    let stack = StackId::new(id);
    nav.setup_outlet(stack.clone(), switch(paths), probe.outlet(), false, None);
    stack
}

/// Play the host's part of a render: realize every shown view, then run queued commits.
pub(crate) fn render<H: History>(nav: &mut NavManager<H>) {
    let stacks: Vec<_> = nav.snapshot().stacks().map(|s| s.stack_id().clone()).collect();
    for stack in stacks {
        for entry in nav.outlet_views(&stack) {
            nav.attach_view(entry.child.view_id).unwrap();
        }
    }
    nav.after_render();
}

/// Id of the view whose route matches `path`.
pub(crate) fn view_at<H: History>(nav: &NavManager<H>, path: &str) -> ViewId {
    nav.state().find_view_by_location(path).unwrap().view.id()
}
