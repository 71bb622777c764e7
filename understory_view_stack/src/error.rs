// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors reported to the host.
//!
//! Navigation itself never fails: unknown locations are ignored and "back" falls back to a
//! default. These errors only flag host protocol mistakes, such as settling a commit twice.

use understory_route::RouteError;

use crate::ids::{CommitTicket, StackId, ViewId};

/// Result alias for manager operations.
pub type NavResult<T> = Result<T, NavError>;

/// A host protocol mistake.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum NavError {
    /// No stack is registered under this id.
    #[error("unknown view stack `{0}`")]
    UnknownStack(StackId),

    /// No registered stack owns this view.
    #[error("unknown view {0}")]
    UnknownView(ViewId),

    /// The view has no attached lifecycle.
    #[error("view {0} is not attached")]
    ViewNotAttached(ViewId),

    /// The ticket was never issued or already settled.
    #[error("{0} is not in flight")]
    UnknownCommit(CommitTicket),

    /// A route pattern failed to parse.
    #[error(transparent)]
    Route(#[from] RouteError),
}
