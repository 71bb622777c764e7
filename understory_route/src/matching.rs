// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Matching a path name against a [`RoutePattern`].

use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use crate::pattern::{RoutePattern, Segment};

/// Parameters captured by a match, in pattern order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Params(Vec<(String, String)>);

impl Params {
    /// Look up a captured parameter by name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Iterate `(name, value)` pairs in pattern order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of captured parameters.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether nothing was captured.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn push(&mut self, name: &str, value: &str) {
        self.0.push((name.to_string(), value.to_string()));
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for Params {
    fn from_iter<I: IntoIterator<Item = (&'a str, &'a str)>>(iter: I) -> Self {
        let mut params = Self::default();
        for (k, v) in iter {
            params.push(k, v);
        }
        params
    }
}

/// The result of matching a path against a [`RoutePattern`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteMatch {
    /// The matched portion of the path, always starting with `/`.
    pub url: String,
    /// The source of the pattern that matched.
    pub pattern: String,
    /// Whether the whole path was consumed.
    pub is_exact: bool,
    /// Captured parameters.
    pub params: Params,
}

impl RoutePattern {
    /// Match `pathname` against this pattern.
    ///
    /// Returns `None` when the path does not fit. Optional parameters are taken greedily:
    /// when the next segment fits they consume it, otherwise they are skipped.
    pub fn match_path(&self, pathname: &str) -> Option<RouteMatch> {
        let trimmed = pathname.strip_prefix('/').unwrap_or(pathname);
        let trimmed = trimmed.strip_suffix('/').unwrap_or(trimmed);
        let parts: Vec<&str> = if trimmed.is_empty() {
            Vec::new()
        } else {
            trimmed.split('/').collect()
        };

        let mut params = Params::default();
        let mut consumed = 0;
        for segment in &self.segments {
            match segment {
                Segment::Literal(literal) => {
                    let part = parts.get(consumed)?;
                    if !self.text_eq(literal, part) {
                        return None;
                    }
                    consumed += 1;
                }
                Segment::Param {
                    name,
                    optional,
                    choices,
                } => match parts.get(consumed) {
                    Some(part) if !part.is_empty() && self.accepts(choices, part) => {
                        params.push(name, part);
                        consumed += 1;
                    }
                    _ if *optional => {}
                    _ => return None,
                },
                Segment::Wildcard => {
                    params.push("*", &parts[consumed..].join("/"));
                    consumed = parts.len();
                }
            }
        }

        let is_exact = consumed == parts.len();
        if self.exact && !is_exact {
            return None;
        }
        let url = if consumed == 0 {
            "/".to_string()
        } else {
            format!("/{}", parts[..consumed].join("/"))
        };

        Some(RouteMatch {
            url,
            pattern: self.source.clone(),
            is_exact,
            params,
        })
    }

    fn text_eq(&self, expected: &str, actual: &str) -> bool {
        if self.sensitive {
            expected == actual
        } else {
            expected.eq_ignore_ascii_case(actual)
        }
    }

    fn accepts(&self, choices: &[String], part: &str) -> bool {
        choices.is_empty() || choices.iter().any(|c| self.text_eq(c, part))
    }
}
