// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use understory_view_stack::{
    CommitRequest, CommitStatus, CommitTicket, ElementKind, LocationState, MemoryHistory,
    NavManager, Outlet, RouteDef, RouteNode, StackId,
};

struct Settles;

impl Outlet for Settles {
    fn commit(&mut self, _: CommitTicket, _: &CommitRequest) -> CommitStatus {
        CommitStatus::Settled
    }
}

/// A manager with one stack of `n` detail routes, every view realized.
fn manager(n: usize) -> NavManager<MemoryHistory> {
    let mut nav = NavManager::new(MemoryHistory::new("/home"));
    let mut routes = vec![RouteDef::exact("/home", ElementKind::component("home")).unwrap()];
    for i in 0..n {
        let path = format!("/page{i}/:id");
        routes.push(RouteDef::exact(&path, ElementKind::component(&path)).unwrap());
    }
    let stack = StackId::new("main");
    nav.setup_outlet(
        stack.clone(),
        vec![RouteNode::Switch(routes)],
        Box::new(Settles),
        false,
        None,
    );
    let ids: Vec<_> = nav
        .state()
        .get(&stack)
        .unwrap()
        .views()
        .iter()
        .map(|v| v.id())
        .collect();
    for id in ids {
        nav.attach_view(id).unwrap();
    }
    nav.after_render();
    nav
}

fn bench_push_back(c: &mut Criterion) {
    let mut group = c.benchmark_group("navigation");
    for n in [8_usize, 64] {
        group.bench_function(format!("push_back_{n}_routes"), |b| {
            b.iter_batched(
                || manager(n),
                |mut nav| {
                    for i in 0..n {
                        nav.push(&format!("/page{i}/1"), LocationState::default());
                        nav.after_render();
                    }
                    for _ in 0..n {
                        nav.go_back(None);
                        nav.after_render();
                    }
                    black_box(nav.revision())
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_lookup(c: &mut Criterion) {
    let nav = manager(256);
    c.bench_function("find_view_by_location_256", |b| {
        b.iter(|| black_box(nav.state().find_view_by_location(black_box("/page255/9")).is_some()));
    });
}

criterion_group!(benches, bench_push_back, bench_lookup);
criterion_main!(benches);
