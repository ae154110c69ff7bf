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

//! `Edm.DateTimeOffset` primitive wrapper
//!
//! Timestamps in Redfish payloads (`StartTime`, `EndTime` of a task) are
//! RFC 3339 strings. The wrapper keeps the original offset and renders
//! `+00:00` as `Z`.
//!
//! ```rust
//! use redfish_runtime_core::EdmDateTimeOffset;
//!
//! let v: EdmDateTimeOffset = "2021-03-04T05:06:07+00:00".parse().unwrap();
//! assert_eq!(v.to_string(), "2021-03-04T05:06:07Z");
//! ```

use core::str::FromStr;
use serde::Deserialize;
use serde::Serialize;
use std::fmt::Display;
use std::fmt::Error as FmtError;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

/// Type corresponding to `Edm.DateTimeOffset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EdmDateTimeOffset(#[serde(with = "time::serde::rfc3339")] OffsetDateTime);

impl EdmDateTimeOffset {
    /// Wrapped date and time.
    #[must_use]
    pub const fn as_offset_date_time(&self) -> OffsetDateTime {
        self.0
    }
}

impl From<OffsetDateTime> for EdmDateTimeOffset {
    fn from(dt: OffsetDateTime) -> Self {
        Self(dt)
    }
}

impl From<EdmDateTimeOffset> for OffsetDateTime {
    fn from(w: EdmDateTimeOffset) -> Self {
        w.0
    }
}

impl Display for EdmDateTimeOffset {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let s = self.0.format(&Rfc3339).map_err(|_| FmtError)?;
        f.write_str(&s)
    }
}

#[allow(clippy::absolute_paths)]
impl FromStr for EdmDateTimeOffset {
    type Err = time::error::Parse;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OffsetDateTime::parse(s, &Rfc3339).map(Self)
    }
}
