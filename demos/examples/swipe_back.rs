// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Swipe to go back.
//!
//! Feeds pointer positions to a `SwipeBackGesture`: one swipe is cancelled halfway and
//! restores the page, the next one completes.
//!
//! Run:
//! - `cargo run -p understory_demos --example swipe_back`

use kurbo::Point;
use understory_view_stack::{
    CommitRequest, CommitStatus, CommitTicket, ElementKind, History, LocationState,
    MemoryHistory, NavManager, Outlet, RouteDef, RouteNode, StackId, SwipeBackGesture,
};

struct PrintOutlet;

impl Outlet for PrintOutlet {
    fn commit(&mut self, ticket: CommitTicket, request: &CommitRequest) -> CommitStatus {
        println!(
            "  {ticket}: {:?} progress_animation={} leaving={:?}",
            request.direction, request.progress_animation, request.leaving
        );
        CommitStatus::Settled
    }
}

fn realize(nav: &mut NavManager<MemoryHistory>, stack: &StackId) {
    for entry in nav.outlet_views(stack) {
        nav.attach_view(entry.child.view_id).unwrap();
    }
    nav.after_render();
}

fn main() {
    let mut nav = NavManager::new(MemoryHistory::new("/inbox"));
    let stack = StackId::new("mail");
    nav.setup_outlet(
        stack.clone(),
        vec![RouteNode::Switch(vec![
            RouteDef::exact("/inbox", ElementKind::component("Inbox")).unwrap(),
            RouteDef::exact("/inbox/:id", ElementKind::component("Message")).unwrap(),
        ])],
        Box::new(PrintOutlet),
        false,
        None,
    );
    realize(&mut nav, &stack);
    nav.push("/inbox/7", LocationState::default());
    realize(&mut nav, &stack);

    let mut gesture = SwipeBackGesture::new(390.0);
    for (end_x, velocity) in [(120.0, -0.3), (300.0, 0.0)] {
        println!("swipe to x={end_x} from {}", nav.history().location().pathname);
        if !gesture.begin(Point::new(8.0, 400.0), &mut nav) {
            println!("  nothing to go back to");
            continue;
        }
        let progress = gesture.update(Point::new(end_x / 2.0, 400.0));
        println!("  progress {progress:?}");
        let completed = gesture.end(Point::new(end_x, 400.0), velocity, &mut nav);
        realize(&mut nav, &stack);
        println!(
            "  completed={completed:?}, now at {}",
            nav.history().location().pathname
        );
    }
}
