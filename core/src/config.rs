// SPDX-FileCopyrightText: Copyright (c) 2025 NVIDIA CORPORATION & AFFILIATES. All rights reserved.
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Runtime configuration
//!
//! ```rust
//! use redfish_runtime_core::ClientConfig;
//! use std::time::Duration;
//!
//! let config = ClientConfig::new()
//!     .task_poll_interval(Duration::from_secs(5))
//!     .max_collection_pages(64)
//!     .etag_match(false);
//! assert_eq!(config.max_collection_pages, 64);
//! ```

use std::time::Duration;

/// Task monitor poll interval used when neither the caller nor the service
/// provides one.
pub const DEFAULT_TASK_POLL_INTERVAL: Duration = Duration::from_secs(10);

/// Configuration shared by a [`crate::Client`] and every resource it loads.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Poll interval applied when a wait is requested with a zero interval
    /// and the monitor sends no `Retry-After`.
    pub task_poll_interval: Duration,
    /// Upper bound of pages fetched by one collection walk.
    pub max_collection_pages: usize,
    /// Maximum number of body bytes quoted in status errors.
    pub error_excerpt_len: usize,
    /// Send `If-Match` with the known ETag on `PATCH` and on actions run
    /// through [`crate::Action::run_on`].
    pub etag_match: bool,
    /// Remove the double quotes around the ETag before it goes into
    /// `If-Match`. A weak prefix is kept: `W/"3"` is sent as `W/3`.
    pub strip_etag_quotes: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            task_poll_interval: DEFAULT_TASK_POLL_INTERVAL,
            max_collection_pages: 1000,
            error_excerpt_len: 512,
            etag_match: true,
            strip_etag_quotes: false,
        }
    }
}

impl ClientConfig {
    /// Configuration with the defaults: 10 s poll interval, 1000 pages,
    /// 512 byte excerpts, `If-Match` on, ETag quotes kept.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the fallback task monitor poll interval.
    #[must_use]
    pub const fn task_poll_interval(mut self, interval: Duration) -> Self {
        self.task_poll_interval = interval;
        self
    }

    /// Set the page cap of collection walks.
    #[must_use]
    pub const fn max_collection_pages(mut self, pages: usize) -> Self {
        self.max_collection_pages = pages;
        self
    }

    /// Set how much of an error body is kept in status errors.
    #[must_use]
    pub const fn error_excerpt_len(mut self, len: usize) -> Self {
        self.error_excerpt_len = len;
        self
    }

    /// Enable or disable `If-Match` on conditional requests.
    #[must_use]
    pub const fn etag_match(mut self, enabled: bool) -> Self {
        self.etag_match = enabled;
        self
    }

    /// Send ETags without their quotes, for services that only match the
    /// bare tag.
    #[must_use]
    pub const fn strip_etag_quotes(mut self, enabled: bool) -> Self {
        self.strip_etag_quotes = enabled;
        self
    }
}
