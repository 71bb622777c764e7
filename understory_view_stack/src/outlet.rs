// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The visual commit interface owned by an outlet.

use std::time::Duration;

use crate::ids::{CommitTicket, ViewId};
use crate::types::NavDirection;

/// Which animation family a commit should use.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum AnimationKind {
    /// The outlet's platform push/pop animation.
    Platform,
    /// The modal present/dismiss animation.
    Presentation,
}

/// Parameters of one visual transition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommitRequest {
    /// View to bring in.
    pub entering: ViewId,
    /// View to take out, if it is realized.
    pub leaving: Option<ViewId>,
    /// `Forward`, `Back`, or `None`; presentation directions are mapped onto these.
    pub direction: NavDirection,
    /// Fixed duration; `None` means the outlet's default.
    pub duration: Option<Duration>,
    /// Whether the entering page should offer a back button.
    pub show_go_back: bool,
    /// Whether the animation is driven by gesture progress rather than time.
    pub progress_animation: bool,
    /// Animation family.
    pub animation: AnimationKind,
}

impl CommitRequest {
    /// Build the request for a transition in `direction`.
    ///
    /// `swiping` marks a gesture-driven back transition and `reverting` drops the leaving
    /// view so a cancelled swipe restores the entering view in place.
    pub fn new(
        entering: ViewId,
        leaving: Option<ViewId>,
        direction: NavDirection,
        swiping: bool,
        reverting: bool,
    ) -> Self {
        if direction.is_structural() {
            Self {
                entering,
                leaving: if reverting { None } else { leaving },
                direction,
                duration: (direction == NavDirection::None).then_some(Duration::ZERO),
                show_go_back: direction == NavDirection::Forward,
                progress_animation: swiping,
                animation: AnimationKind::Platform,
            }
        } else {
            Self {
                entering,
                leaving,
                direction: if direction == NavDirection::Present {
                    NavDirection::Forward
                } else {
                    NavDirection::Back
                },
                duration: None,
                show_go_back: false,
                progress_animation: false,
                animation: AnimationKind::Presentation,
            }
        }
    }
}

/// Outcome of [`Outlet::commit`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CommitStatus {
    /// The transition finished synchronously.
    Settled,
    /// The transition is running; the host reports completion later with
    /// [`NavManager::commit_settled`](crate::NavManager::commit_settled).
    Pending,
}

/// The physical region hosting a view stack.
pub trait Outlet {
    /// Whether the outlet can accept a commit yet.
    ///
    /// When this returns `false` the manager parks the commit until
    /// [`NavManager::outlet_ready`](crate::NavManager::outlet_ready) or
    /// [`NavManager::retry_waiting`](crate::NavManager::retry_waiting) is called.
    fn is_ready(&self) -> bool {
        true
    }

    /// Start the visual transition described by `request`.
    fn commit(&mut self, ticket: CommitTicket, request: &CommitRequest) -> CommitStatus;
}
