// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render-side queries over the published snapshot.

use understory_route::RouteMatch;

use crate::history::{History, Location};
use crate::ids::{RenderKey, StackId, ViewId};
use crate::manager::NavManager;
use crate::registry::ElementKind;
use crate::types::ViewItem;

/// What the host should render for one view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderChild {
    /// The view being rendered.
    pub view_id: ViewId,
    /// The route's element.
    pub element: ElementKind,
    /// The current location.
    pub location: Location,
    /// The view's route match, given to the element as its parameters.
    pub matched: Option<RouteMatch>,
}

/// One entry of an outlet's render list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutletEntry {
    /// Remount the page whenever this changes.
    pub key: RenderKey,
    /// Whether the page subtree should be instantiated.
    pub mount: bool,
    /// Keep the page invisible until its first commit runs.
    pub hidden_until_ready: bool,
    /// The page itself.
    pub child: RenderChild,
}

impl<H: History> NavManager<H> {
    /// Build the render description of `view`.
    pub fn render_child(&self, view: &ViewItem) -> RenderChild {
        RenderChild {
            view_id: view.id(),
            element: view.route().element().clone(),
            location: self.history.location().clone(),
            matched: view.matched().cloned(),
        }
    }

    /// The shown views of a stack in declaration order, from the published snapshot.
    pub fn outlet_views(&self, stack_id: &StackId) -> Vec<OutletEntry> {
        let Some(stack) = self.snapshot().get(stack_id) else {
            return Vec::new();
        };
        stack
            .views()
            .iter()
            .filter(|view| view.is_shown())
            .map(|view| OutletEntry {
                key: view.key(),
                mount: view.is_mounted(),
                hidden_until_ready: stack.active_id() == Some(view.id()) && !view.prevents_hide(),
                child: self.render_child(view),
            })
            .collect()
    }

    /// Whether a presentation stack is currently showing content.
    pub fn is_active_presentation(&self, stack_id: &StackId) -> bool {
        self.snapshot()
            .get(stack_id)
            .is_some_and(|stack| stack.is_presentation() && stack.is_active())
    }
}
