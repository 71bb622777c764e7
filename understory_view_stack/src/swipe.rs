// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Swipe-to-go-back.
//!
//! ## Overview
//!
//! A swipe starts a real "back" navigation as soon as it begins, so the previous page is
//! rendered under the finger. If the swipe is cancelled, the manager pushes the original
//! location again and the resulting commit restores the page in place.
//!
//! [`SwipeBackHandler`] is the seam between the pointer side and the navigation side.
//! [`SwipeBackGesture`] turns pointer positions into handler calls; hosts with their own
//! gesture recognizer can drive the handler directly.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Point;
//! use understory_view_stack::{SwipeBackGesture, SwipeBackHandler};
//!
//! struct Log(Vec<&'static str>);
//! impl SwipeBackHandler for Log {
//!     fn can_start(&self) -> bool { true }
//!     fn on_start(&mut self) { self.0.push("start"); }
//!     fn on_end(&mut self, completed: bool) {
//!         self.0.push(if completed { "done" } else { "cancel" });
//!     }
//! }
//!
//! let mut log = Log(Vec::new());
//! let mut gesture = SwipeBackGesture::new(400.0);
//! assert!(gesture.begin(Point::new(10.0, 300.0), &mut log));
//! assert_eq!(gesture.update(Point::new(110.0, 300.0)), Some(0.25));
//! assert_eq!(gesture.end(Point::new(260.0, 300.0), 0.0, &mut log), Some(true));
//! assert_eq!(log.0, ["start", "done"]);
//! ```

use kurbo::Point;
use log::debug;

use crate::history::{History, LocationState};
use crate::manager::NavManager;
use crate::resolve;
use crate::types::ViewItem;

/// Swipe bookkeeping kept by the manager.
#[derive(Clone, Debug, Default)]
pub(crate) struct SwipeState {
    pub(crate) going_back: bool,
    pub(crate) revert_path: Option<String>,
    pub(crate) reverting: bool,
}

/// Receiver of swipe-back gestures.
pub trait SwipeBackHandler {
    /// Whether a swipe may start now.
    fn can_start(&self) -> bool;
    /// A swipe started.
    fn on_start(&mut self);
    /// The swipe ended; `completed` is `false` when it was cancelled.
    fn on_end(&mut self, completed: bool);
}

impl<H: History> NavManager<H> {
    /// The location a swipe would go back to from the current location.
    ///
    /// Only a recorded predecessor on the same tab qualifies.
    pub fn swipe_back_path(&self) -> Option<String> {
        let hit = resolve::resolve_by_location(&self.state, &self.history.location().pathname)?;
        resolve::swipe_back_target(&self.state, hit.view)
            .and_then(ViewItem::matched_url)
            .map(str::to_string)
    }

    /// Whether a swipe-back is in progress.
    pub fn is_swiping_back(&self) -> bool {
        self.swipe.going_back
    }

    /// Whether a cancelled swipe is being undone.
    pub fn is_reverting_swipe(&self) -> bool {
        self.swipe.reverting
    }
}

impl<H: History> SwipeBackHandler for NavManager<H> {
    fn can_start(&self) -> bool {
        self.swipe_back_path().is_some()
    }

    fn on_start(&mut self) {
        if self.swipe_back_path().is_none() {
            return;
        }
        let from = self.history.location().pathname.clone();
        debug!("swipe back from {from}");
        self.swipe.going_back = true;
        self.swipe.revert_path = Some(from);
        self.go_back(None);
    }

    fn on_end(&mut self, completed: bool) {
        self.swipe.going_back = false;
        let revert_path = self.swipe.revert_path.take();
        if completed {
            return;
        }
        if let Some(path) = revert_path {
            debug!("swipe cancelled; restoring {path}");
            self.swipe.reverting = true;
            self.push(&path, LocationState::default());
        }
    }
}

/// Edge-swipe recognizer for a horizontally laid out outlet.
///
/// Positions are in outlet coordinates. A swipe must begin within
/// [`SwipeBackGesture::DEFAULT_EDGE`] (or the configured edge) of the leading edge.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SwipeBackGesture {
    width: f64,
    edge: f64,
    start: Option<Point>,
}

impl SwipeBackGesture {
    /// Default width of the leading-edge strip a swipe must start in.
    pub const DEFAULT_EDGE: f64 = 50.0;

    /// Create a recognizer for an outlet `width` pixels wide.
    pub fn new(width: f64) -> Self {
        Self {
            width,
            edge: Self::DEFAULT_EDGE,
            start: None,
        }
    }

    /// Use a different leading-edge strip.
    pub fn with_edge(mut self, edge: f64) -> Self {
        self.edge = edge;
        self
    }

    /// Update the outlet width, for example after a resize.
    pub fn set_width(&mut self, width: f64) {
        self.width = width;
    }

    /// Whether a swipe is being tracked.
    pub fn is_active(&self) -> bool {
        self.start.is_some()
    }

    /// Pointer down. Returns `true` if a swipe started.
    pub fn begin(&mut self, pos: Point, handler: &mut impl SwipeBackHandler) -> bool {
        if self.start.is_some() || pos.x > self.edge || !handler.can_start() {
            return false;
        }
        self.start = Some(pos);
        handler.on_start();
        true
    }

    /// Pointer move. Returns the swipe progress in `0.0..=1.0`.
    pub fn update(&self, pos: Point) -> Option<f64> {
        let start = self.start?;
        Some(self.progress((pos - start).x))
    }

    /// Pointer up, with the horizontal velocity in pixels per millisecond.
    ///
    /// The swipe completes when it is not moving backwards and is either fast or past
    /// the middle of the outlet. Returns whether it completed.
    pub fn end(
        &mut self,
        pos: Point,
        velocity_x: f64,
        handler: &mut impl SwipeBackHandler,
    ) -> Option<bool> {
        let start = self.start.take()?;
        let dx = (pos - start).x;
        let completed = velocity_x >= 0.0 && (velocity_x > 0.2 || dx > self.width / 2.0);
        handler.on_end(completed);
        Some(completed)
    }

    /// Abort a tracked swipe, for example when the pointer is captured elsewhere.
    pub fn cancel(&mut self, handler: &mut impl SwipeBackHandler) {
        if self.start.take().is_some() {
            handler.on_end(false);
        }
    }

    fn progress(&self, dx: f64) -> f64 {
        if self.width <= 0.0 {
            return 0.0;
        }
        (dx / self.width).clamp(0.0, 1.0)
    }
}
