// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pattern parsing.

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use crate::error::RouteError;

/// One `/`-separated piece of a pattern.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Segment {
    Literal(String),
    Param {
        name: String,
        optional: bool,
        /// Accepted values; empty means any non-empty segment.
        choices: Vec<String>,
    },
    Wildcard,
}

/// A parsed route pattern.
///
/// Build with [`RoutePattern::parse`], then tune with [`RoutePattern::exact`] and
/// [`RoutePattern::sensitive`]. Matching is done with
/// [`RoutePattern::match_path`](crate::RoutePattern::match_path).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoutePattern {
    pub(crate) source: String,
    pub(crate) segments: Vec<Segment>,
    pub(crate) exact: bool,
    pub(crate) sensitive: bool,
}

impl RoutePattern {
    /// Parse a pattern such as `/detail/:id` or `/:tab(close)`.
    ///
    /// The result is a non-exact, case-insensitive pattern.
    pub fn parse(source: &str) -> Result<Self, RouteError> {
        let Some(rest) = source.strip_prefix('/') else {
            return Err(RouteError::MissingLeadingSlash(source.to_string()));
        };
        let rest = rest.strip_suffix('/').unwrap_or(rest);

        let mut segments: Vec<Segment> = Vec::new();
        if !rest.is_empty() {
            for raw in rest.split('/') {
                if matches!(segments.last(), Some(Segment::Wildcard)) {
                    return Err(RouteError::WildcardNotLast(source.to_string()));
                }
                let segment = parse_segment(raw)?;
                if let Segment::Param { name, .. } = &segment
                    && segments.iter().any(|s| s.param_name() == Some(name.as_str()))
                {
                    return Err(RouteError::DuplicateParam(name.clone()));
                }
                segments.push(segment);
            }
        }

        Ok(Self {
            source: source.to_string(),
            segments,
            exact: false,
            sensitive: false,
        })
    }

    /// Require the whole path to be consumed by the pattern.
    #[must_use]
    pub fn exact(mut self, exact: bool) -> Self {
        self.exact = exact;
        self
    }

    /// Compare literals and constraint alternatives case-sensitively.
    #[must_use]
    pub fn sensitive(mut self, sensitive: bool) -> Self {
        self.sensitive = sensitive;
        self
    }

    /// The pattern text as given to [`RoutePattern::parse`].
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Whether the pattern only matches whole paths.
    pub fn is_exact(&self) -> bool {
        self.exact
    }

    /// Names of the declared parameters, in order.
    pub fn param_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.segments.iter().filter_map(Segment::param_name)
    }
}

impl Segment {
    fn param_name(&self) -> Option<&str> {
        match self {
            Self::Param { name, .. } => Some(name),
            Self::Wildcard => Some("*"),
            Self::Literal(_) => None,
        }
    }
}

fn parse_segment(raw: &str) -> Result<Segment, RouteError> {
    if raw == "*" {
        return Ok(Segment::Wildcard);
    }
    let Some(body) = raw.strip_prefix(':') else {
        return Ok(Segment::Literal(raw.to_string()));
    };

    let name_len = body
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .unwrap_or(body.len());
    let (name, mut tail) = body.split_at(name_len);
    if name.is_empty() {
        return Err(RouteError::EmptyParamName(raw.to_string()));
    }

    let mut choices = Vec::new();
    if let Some(group) = tail.strip_prefix('(') {
        let Some(end) = group.find(')') else {
            return Err(RouteError::UnclosedConstraint(raw.to_string()));
        };
        for alternative in group[..end].split('|') {
            if alternative.is_empty() {
                return Err(RouteError::EmptyAlternative(raw.to_string()));
            }
            choices.push(alternative.to_string());
        }
        tail = &group[end + 1..];
    }

    let optional = match tail {
        "" => false,
        "?" => true,
        rest => {
            return Err(RouteError::TrailingCharacters {
                segment: raw.to_string(),
                rest: rest.to_string(),
            });
        }
    };

    Ok(Segment::Param {
        name: name.to_string(),
        optional,
        choices,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn parses_literals_params_and_constraints() {
        let p = RoutePattern::parse("/users/:id/:tab(posts|likes)?").unwrap();
        assert_eq!(
            p.segments,
            vec![
                Segment::Literal("users".into()),
                Segment::Param {
                    name: "id".into(),
                    optional: false,
                    choices: vec![],
                },
                Segment::Param {
                    name: "tab".into(),
                    optional: true,
                    choices: vec!["posts".into(), "likes".into()],
                },
            ]
        );
        assert_eq!(p.param_names().collect::<Vec<_>>(), vec!["id", "tab"]);
    }

    #[test]
    fn root_has_no_segments() {
        let p = RoutePattern::parse("/").unwrap();
        assert!(p.segments.is_empty());
    }

    #[test]
    fn trailing_slash_is_ignored() {
        let a = RoutePattern::parse("/home/").unwrap();
        let b = RoutePattern::parse("/home").unwrap();
        assert_eq!(a.segments, b.segments);
    }

    #[test]
    fn rejects_malformed_patterns() {
        assert_eq!(
            RoutePattern::parse("home"),
            Err(RouteError::MissingLeadingSlash("home".into()))
        );
        assert_eq!(
            RoutePattern::parse("/:"),
            Err(RouteError::EmptyParamName(":".into()))
        );
        assert_eq!(
            RoutePattern::parse("/:tab(a"),
            Err(RouteError::UnclosedConstraint(":tab(a".into()))
        );
        assert_eq!(
            RoutePattern::parse("/:tab(a||b)"),
            Err(RouteError::EmptyAlternative(":tab(a||b)".into()))
        );
        assert_eq!(
            RoutePattern::parse("/:id-x"),
            Err(RouteError::TrailingCharacters {
                segment: ":id-x".into(),
                rest: "-x".into(),
            })
        );
        assert_eq!(
            RoutePattern::parse("/:id/:id"),
            Err(RouteError::DuplicateParam("id".into()))
        );
        assert_eq!(
            RoutePattern::parse("/files/*/more"),
            Err(RouteError::WildcardNotLast("/files/*/more".into()))
        );
    }
}
