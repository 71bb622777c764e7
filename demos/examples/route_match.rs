// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Route pattern matching.
//!
//! Parses a few patterns and prints which locations they match, with the matched prefix
//! and captured parameters.
//!
//! Run:
//! - `cargo run -p understory_demos --example route_match`

use understory_route::RoutePattern;

fn main() {
    let patterns = [
        RoutePattern::parse("/home").unwrap(),
        RoutePattern::parse("/:tab(home|settings)/detail/:id").unwrap(),
        RoutePattern::parse("/:tab(home|settings)/detail/:id").unwrap().exact(true),
        RoutePattern::parse("/files/*").unwrap(),
    ];
    let locations = [
        "/home",
        "/home/",
        "/home/detail/42",
        "/settings/detail/7/comments",
        "/files/a/b.txt",
        "/elsewhere",
    ];

    for pattern in &patterns {
        let kind = if pattern.is_exact() { "exact" } else { "prefix" };
        println!("{} ({kind})", pattern.source());
        for location in locations {
            match pattern.match_path(location) {
                Some(m) => {
                    let params: Vec<_> = m.params.iter().map(|(k, v)| format!("{k}={v}")).collect();
                    println!("  {location:<30} -> {} [{}]", m.url, params.join(", "));
                }
                None => println!("  {location:<30} -> no match"),
            }
        }
    }

    match RoutePattern::parse("detail/:id") {
        Ok(_) => println!("unexpected success"),
        Err(err) => println!("error: {err}"),
    }
}
