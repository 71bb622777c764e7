// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_route::RoutePattern;

fn gen_paths(n: usize) -> Vec<String> {
    (0..n)
        .map(|i| match i % 4 {
            0 => format!("/home/detail/{i}"),
            1 => format!("/settings/detail/{i}/comments"),
            2 => "/home".to_string(),
            _ => format!("/other/{i}"),
        })
        .collect()
}

fn bench_parse(c: &mut Criterion) {
    let sources = [
        "/home",
        "/detail/:id",
        "/:tab(home|settings)/detail/:id",
        "/:lang?/docs/*",
    ];
    let mut group = c.benchmark_group("route_parse");
    group.throughput(Throughput::Elements(sources.len() as u64));
    group.bench_function("mixed", |b| {
        b.iter(|| {
            for s in sources {
                black_box(RoutePattern::parse(black_box(s)).ok());
            }
        });
    });
    group.finish();
}

fn bench_match(c: &mut Criterion) {
    let paths = gen_paths(1_000);
    let literal = RoutePattern::parse("/home").unwrap();
    let params = RoutePattern::parse("/:tab(home|settings)/detail/:id").unwrap();
    let exact = params.clone().exact(true);

    let mut group = c.benchmark_group("route_match");
    group.throughput(Throughput::Elements(paths.len() as u64));
    for (name, pattern) in [("literal", &literal), ("params", &params), ("exact", &exact)] {
        group.bench_function(name, |b| {
            b.iter(|| {
                let mut hits = 0_usize;
                for p in &paths {
                    if pattern.match_path(black_box(p)).is_some() {
                        hits += 1;
                    }
                }
                black_box(hits)
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_parse, bench_match);
criterion_main!(benches);
