// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_route --heading-base-level=0

//! Understory Route: path patterns for view stacks.
//!
//! ## Overview
//!
//! This crate parses route patterns such as `/detail/:id` or `/:tab(home|settings)` and matches
//! them against a location's path name.
//! A successful match yields a [`RouteMatch`] with the matched URL prefix and the captured
//! [`Params`].
//! It does not own any history or navigation state; see `understory_view_stack` for that.
//!
//! ## Syntax
//!
//! Patterns start with `/` and are split into `/`-separated segments:
//!
//! - `home`: a literal segment, compared case-insensitively unless the pattern is [sensitive](RoutePattern::sensitive).
//! - `:id`: a named parameter that captures one non-empty segment.
//! - `:id?`: an optional parameter; it is skipped when the segment is missing or does not fit.
//! - `:tab(home|settings)`: a parameter constrained to a set of alternatives.
//! - `*`: a trailing catch-all, captured under the name `*`.
//!
//! ## Prefix matching
//!
//! By default a pattern matches any path that starts with it at a segment boundary, and
//! [`RouteMatch::url`] holds the matched prefix.
//! [`RoutePattern::exact`] requires the whole path to be consumed.
//! A single trailing `/` on the path is ignored.
//!
//! ## Example
//!
//! ```rust
//! use understory_route::RoutePattern;
//!
//! let pattern = RoutePattern::parse("/:tab(home|settings)/detail/:id").unwrap();
//!
//! let m = pattern.match_path("/home/detail/42/comments").unwrap();
//! assert_eq!(m.url, "/home/detail/42");
//! assert_eq!(m.params.get("tab"), Some("home"));
//! assert_eq!(m.params.get("id"), Some("42"));
//! assert!(!m.is_exact);
//!
//! let exact = pattern.exact(true);
//! assert!(exact.match_path("/home/detail/42/comments").is_none());
//! assert!(exact.match_path("/settings/detail/7").is_some());
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod error;
mod matching;
mod pattern;

pub use error::RouteError;
pub use matching::{Params, RouteMatch};
pub use pattern::RoutePattern;
