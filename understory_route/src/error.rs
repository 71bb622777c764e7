// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors produced while parsing route patterns.

use alloc::string::String;

/// A route pattern could not be parsed.
///
/// Returned by [`RoutePattern::parse`](crate::RoutePattern::parse).
/// Matching itself never fails; a path that does not fit simply yields no match.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    /// The pattern does not start with `/`.
    #[error("route pattern `{0}` must start with `/`")]
    MissingLeadingSlash(String),

    /// A `:` was not followed by a parameter name.
    #[error("parameter in segment `{0}` has no name")]
    EmptyParamName(String),

    /// A constraint group `(` was never closed.
    #[error("unclosed constraint in segment `{0}`")]
    UnclosedConstraint(String),

    /// A constraint group contains an empty alternative, as in `:tab(a||b)`.
    #[error("empty alternative in constraint of segment `{0}`")]
    EmptyAlternative(String),

    /// Characters follow a parameter that are neither a constraint nor `?`.
    #[error("unexpected `{rest}` after parameter in segment `{segment}`")]
    TrailingCharacters {
        /// The offending segment.
        segment: String,
        /// The unparsed remainder.
        rest: String,
    },

    /// The same parameter name appears twice.
    #[error("parameter `{0}` is declared more than once")]
    DuplicateParam(String),

    /// A `*` catch-all is followed by more segments.
    #[error("`*` must be the last segment of `{0}`")]
    WildcardNotLast(String),
}
