// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for presentation stacks: present, dismiss, and the outer-history bridge.

mod common;

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use common::{Probe, page, render};
use understory_view_stack::{
    AnimationKind, ElementKind, History, LocationState, MemoryHistory, NavConfig,
    NavDirection, NavManager, Presentation, RouteDef, RouteNode, StackId, ViewId,
};

fn modal(probe: &Probe) -> Presentation {
    Presentation::new(
        Some(StackId::new("modal")),
        None,
        vec![page("/form"), page("/form/step2")],
        probe.outlet(),
        NavConfig::default(),
    )
    .unwrap()
}

/// The outer page at `/home` with the presentation rendered on its close route.
fn rendered(probe: &Probe) -> (Presentation, MemoryHistory, Instant) {
    let mut outer = MemoryHistory::new("/home");
    let mut p = modal(probe);
    let now = Instant::now();
    render(p.manager_mut());
    p.after_render(&mut outer, now);
    (p, outer, now)
}

fn view_at(p: &Presentation, path: &str) -> ViewId {
    common::view_at(p.manager(), path)
}

#[test]
fn starts_closed_on_the_placeholder() {
    let probe = Probe::new();
    let (p, outer, _) = rendered(&probe);
    let stack = p.stack_id().clone();

    assert!(!p.is_presenting());
    assert!(!p.manager().is_active_presentation(&stack));
    assert_eq!(p.manager().history().location().pathname, "/close");
    let s = p.manager().state().get(&stack).unwrap();
    assert!(s.is_presentation());
    assert_eq!(s.close_path(), Some("/close"));
    // Presentation stacks never claim the active stack on bind.
    assert_eq!(p.manager().state().active_stack_id(), None);

    assert_eq!(probe.count(), 1);
    assert_eq!(probe.last().entering, view_at(&p, "/close"));
    assert_eq!(outer.entries().len(), 1);
}

#[test]
fn present_then_dismiss() {
    let probe = Probe::new();
    let (mut p, mut outer, t0) = rendered(&probe);
    let stack = p.stack_id().clone();
    let placeholder = view_at(&p, "/close");

    let dismissed = Rc::new(Cell::new(false));
    let flag = dismissed.clone();
    assert!(p.present(
        &mut outer,
        "/form",
        LocationState::default(),
        Some(Box::new(move || flag.set(true))),
    ));
    let form = view_at(&p, "/form");
    assert!(p.manager().is_active_presentation(&stack));
    assert_eq!(outer.entries().len(), 2);
    assert_eq!(outer.location().pathname, "/home");

    render(p.manager_mut());
    p.after_render(&mut outer, t0);
    assert!(p.is_presenting());
    let present = probe.last();
    assert_eq!(present.entering, form);
    assert_eq!(present.leaving, Some(placeholder));
    assert_eq!(present.direction, NavDirection::Forward);
    assert_eq!(present.animation, AnimationKind::Presentation);

    let destroyed = Rc::new(Cell::new(false));
    let flag = destroyed.clone();
    p.manager_mut()
        .attach_view(form)
        .unwrap()
        .on_can_be_destroyed(move || flag.set(true));

    p.dismiss();
    assert_eq!(p.manager().history().location().pathname, "/close");
    let dismiss = probe.last();
    assert_eq!(dismiss.entering, placeholder);
    assert_eq!(dismiss.leaving, Some(form));
    assert_eq!(dismiss.direction, NavDirection::Back);
    assert_eq!(dismiss.animation, AnimationKind::Presentation);

    // Settled synchronously: the stack is closed and the form is torn down.
    assert!(destroyed.get());
    assert!(!p.manager().is_active_presentation(&stack));
    assert_eq!(p.manager().state().active_stack_id(), Some(&stack));
    let ids: Vec<_> = p
        .manager()
        .outlet_views(&stack)
        .iter()
        .map(|e| e.child.view_id)
        .collect();
    assert_eq!(ids, [placeholder]);

    let t1 = t0 + Duration::from_millis(500);
    render(p.manager_mut());
    p.after_render(&mut outer, t1);
    assert!(!p.is_presenting());
    assert_eq!(outer.index(), 0);
    assert_eq!(p.bridge().deadline(), Some(t1 + Duration::from_millis(200)));

    assert!(!p.tick(t1 + Duration::from_millis(100)));
    assert!(!dismissed.get());
    assert!(p.tick(t1 + Duration::from_millis(200)));
    assert!(dismissed.get());
}

#[test]
fn pushes_inside_a_presentation_are_regular_pushes() {
    let probe = Probe::new();
    let (mut p, mut outer, t0) = rendered(&probe);
    p.present(&mut outer, "/form", LocationState::default(), None);
    render(p.manager_mut());
    p.after_render(&mut outer, t0);

    p.manager_mut().push("/form/step2", LocationState::default());
    render(p.manager_mut());
    assert_eq!(probe.last().direction, NavDirection::Forward);
    assert_eq!(probe.last().animation, AnimationKind::Platform);

    // Back goes to the previous step, not to the close route.
    p.manager_mut().go_back(None);
    assert_eq!(p.manager().history().location().pathname, "/form");
}

#[test]
fn outer_back_is_forwarded() {
    let probe = Probe::new();
    let (mut p, mut outer, t0) = rendered(&probe);
    p.present(&mut outer, "/form", LocationState::default(), None);
    render(p.manager_mut());
    p.after_render(&mut outer, t0);
    p.manager_mut().push("/form/step2", LocationState::default());
    render(p.manager_mut());
    p.after_render(&mut outer, t0);

    // The host pops its history; the presentation steps back and restores the entry.
    outer.go_back();
    p.on_outer_pop(&mut outer);
    assert_eq!(p.manager().history().location().pathname, "/form");
    assert_eq!(outer.index(), 1);

    render(p.manager_mut());
    p.after_render(&mut outer, t0);
    assert!(p.is_presenting());
}

#[test]
fn present_needs_a_render_first() {
    let probe = Probe::new();
    let mut outer = MemoryHistory::new("/home");
    let mut p = modal(&probe);
    assert!(!p.present(&mut outer, "/form", LocationState::default(), None));
    assert_eq!(outer.entries().len(), 1);
}

#[test]
fn custom_close_route() {
    let probe = Probe::new();
    let p = Presentation::new(None, Some("done"), vec![page("/form")], probe.outlet(), NavConfig::default())
        .unwrap();
    assert_eq!(p.manager().history().location().pathname, "/done");
    let stack = p.manager().state().get(p.stack_id()).unwrap();
    assert_eq!(stack.close_path(), Some("/done"));
    assert!(stack.active_view().is_some());
}

#[test]
fn presentation_stack_next_to_a_regular_stack() {
    let main_probe = Probe::new();
    let modal_probe = Probe::new();
    let mut nav = NavManager::new(MemoryHistory::new("/home"));
    let main = common::bind(&mut nav, "main", &["/home"], &main_probe);
    let sheet = StackId::new("sheet");
    nav.setup_outlet(
        sheet.clone(),
        vec![RouteNode::Switch(vec![
            RouteDef::exact("/sheet", ElementKind::Placeholder).unwrap(),
            page("/sheet/edit"),
        ])],
        modal_probe.outlet(),
        true,
        Some("/sheet".to_string()),
    );
    render(&mut nav);
    assert_eq!(nav.state().active_stack_id(), Some(&main));

    // Reaching a presentation route from a regular view is a plain push.
    nav.push("/sheet/edit", LocationState::default());
    render(&mut nav);
    assert_eq!(modal_probe.last().direction, NavDirection::Forward);
    assert_eq!(modal_probe.last().animation, AnimationKind::Platform);
    assert!(nav.is_active_presentation(&sheet));
    assert_eq!(nav.state().active_stack_id(), Some(&sheet));

    // Reaching the close route dismisses the stack. The placeholder was never rendered,
    // so there is nothing to animate and the dismissal settles at once.
    let edit = common::view_at(&nav, "/sheet/edit");
    let commits = modal_probe.count();
    nav.replace("/sheet", LocationState::default());
    assert_eq!(modal_probe.count(), commits);
    let view = nav.state().find_view_by_id(edit).unwrap().view;
    assert!(!view.is_mounted());
    assert!(!view.is_shown());
    assert!(!nav.is_active_presentation(&sheet));
    assert_eq!(nav.state().active_stack_id(), Some(&sheet));
    assert!(nav.outlet_views(&sheet).iter().all(|e| e.child.view_id != edit));
}
