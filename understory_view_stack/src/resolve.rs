// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Read-only queries shared by the orchestrator, the swipe controller, and "go back".

use crate::config::NavConfig;
use crate::ids::ViewId;
use crate::state::{LocationLookup, NavState, ViewLookup};
use crate::types::ViewItem;

/// The view (and stack) whose route matches `pathname`.
pub fn resolve_by_location<'a>(state: &'a NavState, pathname: &str) -> Option<LocationLookup<'a>> {
    state.find_view_by_location(pathname)
}

/// The view (and stack) with id `id`, if `id` is set and still registered.
pub fn resolve_by_id(state: &NavState, id: Option<ViewId>) -> Option<ViewLookup<'_>> {
    state.find_view_by_id(id?)
}

/// Whether two views sit on the same tab.
///
/// Views without a `tab` parameter share the unnamed tab.
pub fn same_tab(a: &ViewItem, b: &ViewItem) -> bool {
    a.tab() == b.tab()
}

/// The view that navigated to `view`, if it still exists and has matched before.
pub fn back_target<'a>(state: &'a NavState, view: &ViewItem) -> Option<&'a ViewItem> {
    let target = resolve_by_id(state, view.prev_id())?.view;
    target.matched().is_some().then_some(target)
}

/// Like [`back_target`], restricted to the same tab; this is what a swipe may go back to.
pub fn swipe_back_target<'a>(state: &'a NavState, view: &ViewItem) -> Option<&'a ViewItem> {
    let target = back_target(state, view)?;
    (view.matched().is_some() && same_tab(view, target)).then_some(target)
}

/// The location "back" from `pathname` should replace the current entry with.
///
/// A presentation stack falls back to its close route; a recorded back target wins over
/// any fallback; otherwise `default_href` or the configured default applies.
pub fn go_back_href(
    state: &NavState,
    pathname: &str,
    default_href: Option<&str>,
    config: &NavConfig,
) -> String {
    let mut href = default_href.unwrap_or(&config.default_href);
    if let Some(hit) = resolve_by_location(state, pathname) {
        if hit.stack.is_presentation() {
            href = default_href
                .or(hit.stack.close_path())
                .unwrap_or(&config.default_close_path);
        }
        if let Some(url) = back_target(state, hit.view).and_then(ViewItem::matched_url) {
            href = url;
        }
    }
    href.to_string()
}
