// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Presenting and dismissing a modal stack.
//!
//! The host page sits at `/settings`. A presentation is opened on top of it, dismissed,
//! and the dismissal callback runs once the animation time has passed.
//!
//! Run:
//! - `cargo run -p understory_demos --example view_stack_presentation`

use std::time::{Duration, Instant};

use tracing_subscriber::filter::LevelFilter;
use understory_view_stack::{
    CommitRequest, CommitStatus, CommitTicket, ElementKind, History, LocationState,
    MemoryHistory, NavConfig, Outlet, Presentation, RouteDef, StackId,
};

struct PrintOutlet;

impl Outlet for PrintOutlet {
    fn commit(&mut self, ticket: CommitTicket, request: &CommitRequest) -> CommitStatus {
        println!(
            "  {ticket}: {:?} {:?} entering={}",
            request.animation, request.direction, request.entering
        );
        CommitStatus::Settled
    }
}

fn render(p: &mut Presentation, outer: &mut MemoryHistory, now: Instant) {
    let stack = p.stack_id().clone();
    let nav = p.manager_mut();
    for entry in nav.outlet_views(&stack) {
        nav.attach_view(entry.child.view_id).unwrap();
    }
    p.after_render(outer, now);
    println!(
        "inner at {}, outer at {} (entry {}), presenting: {}",
        p.manager().history().location().pathname,
        outer.location().pathname,
        outer.index(),
        p.is_presenting()
    );
}

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(LevelFilter::DEBUG)
        .init();

    let mut outer = MemoryHistory::new("/settings");
    let mut p = Presentation::new(
        Some(StackId::new("modal")),
        None,
        vec![RouteDef::exact("/compose", ElementKind::component("Compose")).unwrap()],
        Box::new(PrintOutlet),
        NavConfig::default(),
    )
    .unwrap();

    let mut now = Instant::now();
    render(&mut p, &mut outer, now);

    p.present(
        &mut outer,
        "/compose",
        LocationState::default(),
        Some(Box::new(|| println!("dismissed"))),
    );
    render(&mut p, &mut outer, now);

    p.dismiss();
    render(&mut p, &mut outer, now);

    while !p.tick(now) {
        now += Duration::from_millis(50);
    }
}
