// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_view_stack --heading-base-level=0

//! Understory View Stack: stack navigation for outlets that keep pages alive.
//!
//! ## Overview
//!
//! An outlet is a region that hosts a stack of pages. Pages stay mounted while they are
//! on the stack, so going back reveals the previous page as it was left.
//! This crate keeps one [`ViewStack`] per outlet, follows a [`History`], and tells each
//! outlet which page to animate in and out, in which direction.
//!
//! It does not render anything. The host renders [`NavManager::outlet_views`], attaches a
//! [`LifeCycle`] to each realized page, and implements [`Outlet`] to run animations.
//!
//! ## Directions
//!
//! Every transition carries a [`NavDirection`]:
//!
//! - An explicit hint in the location state wins.
//! - Otherwise a push within the same tab goes `Forward` and any other change within the
//!   same tab goes `Back`.
//! - Leaving a presentation stack's close route is `Present`; reaching it is `Dismiss`.
//!   These override hints.
//! - Anything else is `None` and runs without animation.
//!
//! ## Back navigation
//!
//! Every page remembers the page that pushed it. [`NavManager::go_back`] returns to that
//! page, falls back to the close route inside a presentation stack, and otherwise to a
//! default location. Swipe-to-back is driven through [`SwipeBackHandler`].
//!
//! ## Host loop
//!
//! Nothing here blocks or spawns. After each render the host calls
//! [`NavManager::after_render`]; it reports finished animations with
//! [`NavManager::commit_settled`] and, while commits are parked on an outlet that is not
//! ready, polls [`NavManager::retry_waiting`] on [`NavManager::next_retry_delay`].
//!
//! ## Example
//!
//! ```rust
//! use understory_view_stack::{
//!     CommitRequest, CommitStatus, CommitTicket, ElementKind, History, LocationState,
//!     MemoryHistory, NavManager, Outlet, RouteDef, RouteNode, StackId,
//! };
//!
//! struct Immediate;
//! impl Outlet for Immediate {
//!     fn commit(&mut self, _: CommitTicket, _: &CommitRequest) -> CommitStatus {
//!         CommitStatus::Settled
//!     }
//! }
//!
//! let mut nav = NavManager::new(MemoryHistory::new("/home"));
//! let stack = StackId::new("main");
//! nav.setup_outlet(
//!     stack.clone(),
//!     vec![RouteNode::Switch(vec![
//!         RouteDef::exact("/home", ElementKind::component("Home")).unwrap(),
//!         RouteDef::exact("/detail/:id", ElementKind::component("Detail")).unwrap(),
//!     ])],
//!     Box::new(Immediate),
//!     false,
//!     None,
//! );
//!
//! // Render, then realize the pages that were rendered.
//! for entry in nav.outlet_views(&stack) {
//!     nav.attach_view(entry.child.view_id).unwrap();
//! }
//! nav.after_render();
//!
//! nav.push("/detail/42", LocationState::default());
//! let detail = nav.active_view_id().unwrap();
//! let view = nav.state().find_view_by_id(detail).unwrap().view;
//! assert_eq!(view.matched().unwrap().params.get("id"), Some("42"));
//!
//! nav.go_back(None);
//! assert_eq!(nav.history().location().pathname, "/home");
//! ```

mod config;
mod error;
mod history;
mod ids;
mod lifecycle;
mod manager;
mod outlet;
mod presentation;
mod registry;
mod render;
pub mod resolve;
mod state;
mod swipe;
mod transition;
mod types;

pub use config::NavConfig;
pub use error::{NavError, NavResult};
pub use history::{
    History, HistoryAction, HistoryChange, Location, LocationState, MemoryHistory, Subscription,
};
pub use ids::{CommitTicket, RenderKey, StackId, ViewId};
pub use lifecycle::{Handler, LifeCycle, LifecycleEvent};
pub use manager::NavManager;
pub use outlet::{AnimationKind, CommitRequest, CommitStatus, Outlet};
pub use presentation::{DismissCallback, Presentation, PresentationBridge};
pub use registry::{ElementKind, RouteDef, RouteNode};
pub use render::{OutletEntry, RenderChild};
pub use state::{LocationLookup, NavState, ViewLookup};
pub use swipe::{SwipeBackGesture, SwipeBackHandler};
pub use types::{NavDirection, ViewFlags, ViewItem, ViewStack};
pub use understory_route::{Params, RouteError, RouteMatch, RoutePattern};
