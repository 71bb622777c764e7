// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core value types: views, stacks, flags, and directions.

use std::sync::Arc;

use understory_route::RouteMatch;

use crate::ids::{RenderKey, StackId, ViewId};
use crate::registry::RouteDef;

/// Direction of a transition between two views.
///
/// `Forward`, `Back`, and `None` are *structural* directions handled by the outlet's
/// platform animation. `Present` and `Dismiss` are *presentation* directions used when a
/// modal-style stack is entered or left; they use the presentation animation instead.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NavDirection {
    /// Push: the entering view slides over the leaving one.
    Forward,
    /// Pop: the leaving view slides away.
    Back,
    /// A presentation stack is being shown.
    Present,
    /// A presentation stack is being closed.
    Dismiss,
    /// No animation; the entering view appears immediately.
    #[default]
    None,
}

impl NavDirection {
    /// Whether this is one of `Forward`, `Back`, or `None`.
    pub fn is_structural(self) -> bool {
        matches!(self, Self::Forward | Self::Back | Self::None)
    }

    /// Whether this is one of `Present` or `Dismiss`.
    pub fn is_presentation(self) -> bool {
        !self.is_structural()
    }
}

bitflags::bitflags! {
    /// Render state of a view.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct ViewFlags: u8 {
        /// The page subtree should be instantiated.
        const MOUNT        = 0b0000_0001;
        /// The page is part of the outlet's render list.
        const SHOW         = 0b0000_0010;
        /// Skip the "invisible until ready" treatment (set while swiping back).
        const PREVENT_HIDE = 0b0000_0100;
    }
}

/// One page placed in a [`ViewStack`].
///
/// Views are created when their outlet is bound, one per declared route, and live as long
/// as the stack does.
#[derive(Clone, Debug)]
pub struct ViewItem {
    pub(crate) id: ViewId,
    pub(crate) key: RenderKey,
    pub(crate) route: Arc<RouteDef>,
    pub(crate) matched: Option<RouteMatch>,
    pub(crate) prev_id: Option<ViewId>,
    pub(crate) flags: ViewFlags,
}

impl ViewItem {
    pub(crate) fn new(route: Arc<RouteDef>, matched: Option<RouteMatch>) -> Self {
        Self {
            id: ViewId::generate(),
            key: RenderKey::generate(),
            route,
            matched,
            prev_id: None,
            flags: ViewFlags::MOUNT,
        }
    }

    /// Stable id.
    pub fn id(&self) -> ViewId {
        self.id
    }

    /// Current render key.
    pub fn key(&self) -> RenderKey {
        self.key
    }

    /// Route this view was declared with.
    pub fn route(&self) -> &RouteDef {
        &self.route
    }

    /// Last match of this view's route, if it ever matched.
    pub fn matched(&self) -> Option<&RouteMatch> {
        self.matched.as_ref()
    }

    /// URL of the last match.
    pub fn matched_url(&self) -> Option<&str> {
        self.matched.as_ref().map(|m| m.url.as_str())
    }

    /// The `tab` parameter of the last match.
    pub fn tab(&self) -> Option<&str> {
        self.matched.as_ref().and_then(|m| m.params.get("tab"))
    }

    /// View that navigated to this one, used to resolve "back".
    pub fn prev_id(&self) -> Option<ViewId> {
        self.prev_id
    }

    /// Raw flags.
    pub fn flags(&self) -> ViewFlags {
        self.flags
    }

    /// Whether the page subtree should be instantiated.
    pub fn is_mounted(&self) -> bool {
        self.flags.contains(ViewFlags::MOUNT)
    }

    /// Whether the page is in the outlet's render list.
    pub fn is_shown(&self) -> bool {
        self.flags.contains(ViewFlags::SHOW)
    }

    /// Whether the "invisible until ready" treatment is suppressed.
    pub fn prevents_hide(&self) -> bool {
        self.flags.contains(ViewFlags::PREVENT_HIDE)
    }

    /// Whether this view stands for a redirect and must never stay on screen.
    pub fn is_redirect(&self) -> bool {
        self.route.element().is_redirect()
    }

    pub(crate) fn set(&mut self, flag: ViewFlags, on: bool) {
        self.flags.set(flag, on);
    }
}

/// An ordered collection of views bound to one outlet.
///
/// `views` keeps declaration order. `active_id` is either unset or the id of one of
/// `views`; it can only change through a setter that checks this.
#[derive(Clone, Debug)]
pub struct ViewStack {
    pub(crate) stack_id: StackId,
    pub(crate) active_id: Option<ViewId>,
    pub(crate) views: Vec<ViewItem>,
    pub(crate) is_presentation: bool,
    pub(crate) close_path: Option<String>,
    pub(crate) is_active: bool,
}

impl ViewStack {
    pub(crate) fn new(
        stack_id: StackId,
        views: Vec<ViewItem>,
        is_presentation: bool,
        close_path: Option<String>,
    ) -> Self {
        Self {
            stack_id,
            active_id: None,
            views,
            is_presentation,
            close_path,
            is_active: false,
        }
    }

    /// Id of this stack.
    pub fn stack_id(&self) -> &StackId {
        &self.stack_id
    }

    /// Id of the front-most view.
    pub fn active_id(&self) -> Option<ViewId> {
        self.active_id
    }

    /// The front-most view.
    pub fn active_view(&self) -> Option<&ViewItem> {
        self.active_id.and_then(|id| self.view(id))
    }

    /// All views in declaration order.
    pub fn views(&self) -> &[ViewItem] {
        &self.views
    }

    /// Look up a view of this stack.
    pub fn view(&self, id: ViewId) -> Option<&ViewItem> {
        self.views.iter().find(|v| v.id == id)
    }

    /// Whether this is a modal-style stack with a close route.
    pub fn is_presentation(&self) -> bool {
        self.is_presentation
    }

    /// Route that stands for "fully dismissed".
    pub fn close_path(&self) -> Option<&str> {
        self.close_path.as_deref()
    }

    /// Whether this stack is currently presented.
    pub fn is_active(&self) -> bool {
        self.is_active
    }

    /// Whether `view` currently sits on this stack's close route.
    pub fn is_close_view(&self, view: &ViewItem) -> bool {
        match (view.matched_url(), self.close_path()) {
            (Some(url), Some(close)) => url == close,
            _ => false,
        }
    }

    pub(crate) fn set_active(&mut self, id: ViewId) -> bool {
        if self.view(id).is_none() {
            return false;
        }
        self.active_id = Some(id);
        true
    }

    pub(crate) fn view_mut(&mut self, id: ViewId) -> Option<&mut ViewItem> {
        self.views.iter_mut().find(|v| v.id == id)
    }
}
