// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Route declarations and the outlet binder.
//!
//! ## Overview
//!
//! An outlet declares its pages as a list of [`RouteNode`]s.
//! Binding the outlet ([`NavManager::setup_outlet`](crate::NavManager::setup_outlet))
//! flattens one level of [`RouteNode::Switch`] grouping, creates one
//! [`ViewItem`](crate::ViewItem) per route, and activates the first route that matches the
//! current location.

use std::sync::Arc;

use understory_route::{RouteError, RouteMatch, RoutePattern};

use crate::ids::ViewId;
use crate::types::{ViewFlags, ViewItem};

/// What a route renders.
///
/// The manager only cares whether an element is a redirect; the rest is carried through
/// to [`RenderChild`](crate::RenderChild) for the host to instantiate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ElementKind {
    /// A page component, identified by name.
    Component(String),
    /// A route rendered through a callback rather than a component.
    ///
    /// These are treated as redirects: they are never kept on screen.
    Render(String),
    /// A redirect to another location.
    Redirect {
        /// Target location.
        to: String,
    },
    /// The empty screen that sits on a presentation stack's close route.
    Placeholder,
}

impl ElementKind {
    /// Shorthand for [`ElementKind::Component`].
    pub fn component(name: &str) -> Self {
        Self::Component(name.to_string())
    }

    /// Shorthand for [`ElementKind::Redirect`].
    pub fn redirect(to: &str) -> Self {
        Self::Redirect { to: to.to_string() }
    }

    /// Whether this element must be taken out of rendering as soon as it is left.
    pub fn is_redirect(&self) -> bool {
        matches!(self, Self::Redirect { .. } | Self::Render(_))
    }
}

/// A route declared by an outlet: an optional path pattern and the element it renders.
///
/// A route without a pattern never matches a location.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteDef {
    pattern: Option<RoutePattern>,
    element: ElementKind,
}

impl RouteDef {
    /// Declare a prefix-matching route.
    pub fn new(path: &str, element: ElementKind) -> Result<Self, RouteError> {
        Ok(Self {
            pattern: Some(RoutePattern::parse(path)?),
            element,
        })
    }

    /// Declare a route that only matches whole paths.
    pub fn exact(path: &str, element: ElementKind) -> Result<Self, RouteError> {
        Ok(Self {
            pattern: Some(RoutePattern::parse(path)?.exact(true)),
            element,
        })
    }

    /// Declare a route with a pre-built pattern.
    pub fn with_pattern(pattern: RoutePattern, element: ElementKind) -> Self {
        Self {
            pattern: Some(pattern),
            element,
        }
    }

    /// Declare a route without a path.
    pub fn without_path(element: ElementKind) -> Self {
        Self {
            pattern: None,
            element,
        }
    }

    /// The path pattern, if any.
    pub fn pattern(&self) -> Option<&RoutePattern> {
        self.pattern.as_ref()
    }

    /// The rendered element.
    pub fn element(&self) -> &ElementKind {
        &self.element
    }

    /// Match a path name against this route.
    pub fn match_path(&self, pathname: &str) -> Option<RouteMatch> {
        self.pattern.as_ref()?.match_path(pathname)
    }
}

/// A direct child of an outlet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RouteNode {
    /// A single route.
    Route(RouteDef),
    /// An exclusive-choice group; its routes are flattened into the outlet.
    Switch(Vec<RouteDef>),
}

impl From<RouteDef> for RouteNode {
    fn from(route: RouteDef) -> Self {
        Self::Route(route)
    }
}

/// Build the views of a new stack, matching each against `pathname`.
///
/// Every view starts mounted; only the first matching one is shown and returned as active.
pub(crate) fn build_views(
    children: Vec<RouteNode>,
    pathname: &str,
) -> (Vec<ViewItem>, Option<ViewId>) {
    let mut views = Vec::new();
    let mut active = None;
    let mut add_view = |route: RouteDef| {
        let matched = route.match_path(pathname);
        let mut view = ViewItem::new(Arc::new(route), matched);
        if active.is_none() && view.matched.is_some() {
            view.set(ViewFlags::SHOW, true);
            active = Some(view.id);
        }
        views.push(view);
    };

    for child in children {
        match child {
            RouteNode::Switch(routes) => routes.into_iter().for_each(&mut add_view),
            RouteNode::Route(route) => add_view(route),
        }
    }

    (views, active)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(path: &str) -> RouteDef {
        RouteDef::exact(path, ElementKind::component(path)).unwrap()
    }

    #[test]
    fn switch_children_are_flattened_in_order() {
        let children = vec![
            RouteNode::Switch(vec![page("/a"), page("/b")]),
            page("/c").into(),
        ];
        let (views, active) = build_views(children, "/b");
        let patterns: Vec<_> = views
            .iter()
            .map(|v| v.route().pattern().unwrap().source())
            .collect();
        assert_eq!(patterns, ["/a", "/b", "/c"]);
        assert_eq!(active, Some(views[1].id()));
        assert!(views.iter().all(ViewItem::is_mounted));
        assert!(views[1].is_shown());
        assert!(!views[0].is_shown());
    }

    #[test]
    fn first_match_wins() {
        let children = vec![
            RouteDef::new("/", ElementKind::component("root")).unwrap().into(),
            page("/home").into(),
        ];
        let (views, active) = build_views(children, "/home");
        assert_eq!(active, Some(views[0].id()));
        assert!(!views[1].is_shown());
        assert!(views[1].matched().is_some());
    }

    #[test]
    fn no_match_leaves_stack_without_active_view() {
        let (views, active) = build_views(vec![page("/a").into()], "/zzz");
        assert_eq!(views.len(), 1);
        assert_eq!(active, None);
    }

    #[test]
    fn prebuilt_patterns_keep_their_options() {
        let pattern = RoutePattern::parse("/Inbox").unwrap().sensitive(true);
        let route = RouteDef::with_pattern(pattern, ElementKind::component("inbox"));
        assert!(route.match_path("/inbox").is_none());
        let hit = route.match_path("/Inbox/3").unwrap();
        assert_eq!(hit.url, "/Inbox");
        assert!(!hit.is_exact);
    }

    #[test]
    fn pathless_routes_never_match() {
        let route = RouteDef::without_path(ElementKind::redirect("/home"));
        assert!(route.match_path("/").is_none());
        assert!(route.element().is_redirect());
        assert!(ElementKind::Render("legacy".into()).is_redirect());
        assert!(!ElementKind::Placeholder.is_redirect());
    }
}
