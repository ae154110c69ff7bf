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

//! `Retry-After` header values
//!
//! RFC 9110 allows either a number of seconds or an HTTP-date:
//!
//! ```text
//! Retry-After: 120
//! Retry-After: Wed, 21 Oct 2015 07:28:00 GMT
//! ```
//!
//! Besides the preferred IMF-fixdate form the parser accepts asctime dates
//! and RFC 2822 dates with numeric offsets, which some BMCs emit.

use std::convert::TryFrom;
use std::time::Duration;
use time::format_description::well_known::Rfc2822;
use time::macros::format_description;
use time::OffsetDateTime;
use time::PrimitiveDateTime;

/// Parsed `Retry-After` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryAfter {
    /// Relative delay (`Retry-After: <seconds>`).
    Delay(Duration),
    /// Absolute instant (`Retry-After: <HTTP-date>`).
    At(OffsetDateTime),
}

impl RetryAfter {
    /// Parse a header value. Returns `None` when the value is neither a
    /// number of seconds nor a recognized date.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.is_empty() {
            return None;
        }
        if let Ok(seconds) = value.parse::<u64>() {
            return Some(Self::Delay(Duration::from_secs(seconds)));
        }
        parse_http_date(value).map(Self::At)
    }

    /// Instant after which the service expects the next request.
    ///
    /// `None` if a relative delay cannot be represented as a date.
    #[must_use]
    pub fn instant(&self, now: OffsetDateTime) -> Option<OffsetDateTime> {
        match self {
            Self::Delay(delay) => time::Duration::try_from(*delay)
                .ok()
                .and_then(|delay| now.checked_add(delay)),
            Self::At(at) => Some(*at),
        }
    }

    /// Time left to wait from `now`. Instants in the past give zero.
    #[must_use]
    pub fn delay(&self, now: OffsetDateTime) -> Duration {
        match self {
            Self::Delay(delay) => *delay,
            Self::At(at) => until(*at, now),
        }
    }
}

/// Non-negative distance from `now` to `at`.
pub(crate) fn until(at: OffsetDateTime, now: OffsetDateTime) -> Duration {
    Duration::try_from(at - now).unwrap_or(Duration::ZERO)
}

fn parse_http_date(value: &str) -> Option<OffsetDateTime> {
    let imf_fixdate = format_description!(
        "[weekday repr:short], [day] [month repr:short] [year] [hour]:[minute]:[second] GMT"
    );
    let asctime = format_description!(
        "[weekday repr:short] [month repr:short] [day padding:space] [hour]:[minute]:[second] [year]"
    );
    PrimitiveDateTime::parse(value, imf_fixdate)
        .or_else(|_| PrimitiveDateTime::parse(value, asctime))
        .map(PrimitiveDateTime::assume_utc)
        .or_else(|_| OffsetDateTime::parse(value, &Rfc2822))
        .ok()
}
