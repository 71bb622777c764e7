// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Manager configuration.

use std::time::Duration;

/// Tunables for a [`NavManager`](crate::NavManager).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NavConfig {
    /// Where "back" goes when nothing else resolves.
    pub default_href: String,
    /// Close route of presentation stacks that don't name one.
    pub default_close_path: String,
    /// Length of the dismiss animation; presentation completions fire after it.
    pub dismiss_duration: Duration,
    /// Suggested interval for [`NavManager::retry_waiting`](crate::NavManager::retry_waiting).
    pub ready_retry_interval: Duration,
    /// How many retries a commit gets while its outlet is not ready before it is dropped.
    pub max_ready_retries: u32,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            default_href: "/".to_string(),
            default_close_path: "/close".to_string(),
            dismiss_duration: Duration::from_millis(200),
            ready_retry_interval: Duration::from_millis(10),
            max_ready_retries: 500,
        }
    }
}
