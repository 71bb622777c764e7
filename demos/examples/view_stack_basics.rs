// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! View stack basics.
//!
//! Binds one outlet, pushes a detail page, and goes back, printing the render list and
//! every commit the outlet receives. The manager's debug log is printed alongside.
//!
//! Run:
//! - `cargo run -p understory_demos --example view_stack_basics`

use tracing_subscriber::filter::LevelFilter;
use understory_view_stack::{
    CommitRequest, CommitStatus, CommitTicket, ElementKind, History, LifecycleEvent,
    LocationState, MemoryHistory, NavManager, Outlet, RouteDef, RouteNode, StackId,
};

struct PrintOutlet;

impl Outlet for PrintOutlet {
    fn commit(&mut self, ticket: CommitTicket, request: &CommitRequest) -> CommitStatus {
        println!(
            "  {ticket}: {:?} entering={} leaving={:?} back_button={}",
            request.direction, request.entering, request.leaving, request.show_go_back
        );
        CommitStatus::Settled
    }
}

fn render(nav: &mut NavManager<MemoryHistory>, stack: &StackId) {
    println!("render at {}", nav.history().location().pathname);
    for entry in nav.outlet_views(stack) {
        println!(
            "  {:?} mount={} hidden_until_ready={}",
            entry.child.element, entry.mount, entry.hidden_until_ready
        );
        nav.attach_view(entry.child.view_id).unwrap();
    }
    nav.after_render();
}

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(LevelFilter::DEBUG)
        .init();

    let mut nav = NavManager::new(MemoryHistory::new("/home"));
    let stack = StackId::new("main");
    nav.setup_outlet(
        stack.clone(),
        vec![RouteNode::Switch(vec![
            RouteDef::exact("/home", ElementKind::component("Home")).unwrap(),
            RouteDef::exact("/detail/:id", ElementKind::component("Detail")).unwrap(),
        ])],
        Box::new(PrintOutlet),
        false,
        None,
    );
    render(&mut nav, &stack);

    nav.push("/detail/42", LocationState::default());
    render(&mut nav, &stack);

    let detail = nav.active_view_id().unwrap();
    nav.go_back(None);
    render(&mut nav, &stack);

    // The outlet reports that the detail page finished leaving.
    nav.lifecycle_event(detail, LifecycleEvent::DidLeave).unwrap();
    render(&mut nav, &stack);
}
