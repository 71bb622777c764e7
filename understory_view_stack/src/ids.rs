// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Identifiers for views, render keys, stacks, and commits.

use std::fmt;
use std::sync::Arc;

use uuid::Uuid;

/// Stable identity of a view within the navigation state.
///
/// Generated once when the owning outlet is bound and never reused.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewId(Uuid);

impl ViewId {
    /// Generate a fresh, collision-resistant id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Render identity of a view.
///
/// Regenerated whenever a view is hidden so that the host framework instantiates the
/// page from scratch the next time it is shown.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct RenderKey(Uuid);

impl RenderKey {
    /// Generate a fresh, collision-resistant key.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for RenderKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Logical id of a view stack (one per outlet).
///
/// Outlets usually name their stack; [`StackId::generate`] covers the ones that don't.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StackId(Arc<str>);

impl StackId {
    /// Create a stack id from a name.
    pub fn new(name: &str) -> Self {
        Self(Arc::from(name))
    }

    /// Generate an anonymous stack id.
    pub fn generate() -> Self {
        Self::new(&Uuid::new_v4().to_string())
    }

    /// The stack name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for StackId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl fmt::Display for StackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Handle for one commit handed to an [`Outlet`](crate::outlet::Outlet).
///
/// The host reports completion of a pending commit with
/// [`NavManager::commit_settled`](crate::NavManager::commit_settled).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CommitTicket(pub(crate) u64);

impl fmt::Display for CommitTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "commit#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn generated_ids_and_keys_do_not_collide() {
        let mut views = HashSet::new();
        let mut keys = HashSet::new();
        for _ in 0..10_000 {
            assert!(views.insert(ViewId::generate()));
            assert!(keys.insert(RenderKey::generate()));
        }
    }

    #[test]
    fn generated_stack_ids_are_distinct() {
        assert_ne!(StackId::generate(), StackId::generate());
        assert_eq!(StackId::from("main").as_str(), "main");
    }
}
