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

//! OData identifiers
//!
//! - [`ODataId`]: value of `@odata.id`, an absolute or service-relative URI
//! - [`ODataETag`]: value of `@odata.etag` or of the `ETag` response header
//! - [`ODataType`]: parsed view of `@odata.type`
//!
//! URIs are opaque. The runtime never looks into their path structure and
//! compares them as plain strings. An empty [`ODataId`] stands for "no
//! linked resource".
//!
//! ```rust
//! use redfish_runtime_core::ODataId;
//!
//! let root = ODataId::service_root();
//! assert_eq!(root.to_string(), "/redfish/v1");
//! assert!(ODataId::default().is_empty());
//! ```

use core::fmt::Display;
use core::fmt::Formatter;
use core::fmt::Result as FmtResult;
use serde::Deserialize;
use serde::Serialize;

/// Type for `@odata.id` identifier.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct ODataId(String);

impl ODataId {
    /// Redfish service root id.
    #[must_use]
    pub fn service_root() -> Self {
        Self("/redfish/v1".into())
    }

    /// True when the identifier does not point anywhere.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Underlying URI string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for ODataId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ODataId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<ODataId> for String {
    fn from(id: ODataId) -> Self {
        id.0
    }
}

impl AsRef<str> for ODataId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for ODataId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        self.0.fmt(f)
    }
}

/// Type for `@odata.etag` identifier.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct ODataETag(String);

impl ODataETag {
    /// Underlying tag string, quotes included.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Tag with the quotes around the opaque part removed. A weak prefix
    /// stays in place.
    #[must_use]
    pub fn unquoted(&self) -> String {
        match self.0.strip_prefix("W/") {
            Some(tag) => format!("W/{}", tag.trim_matches('"')),
            None => self.0.trim_matches('"').to_string(),
        }
    }
}

impl From<String> for ODataETag {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl Display for ODataETag {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        self.0.fmt(f)
    }
}

/// Parsed `@odata.type` value, for example `#Task.v1_4_3.Task`.
#[derive(Debug, PartialEq, Eq)]
pub struct ODataType<'a> {
    /// Namespace of the data type. For example: `["Task", "v1_4_3"]`.
    pub namespace: Vec<&'a str>,
    /// Name of the type. For example "Task".
    pub type_name: &'a str,
}

impl<'a> ODataType<'a> {
    /// Parse a type tag. The leading `#` is optional; some services
    /// omit it.
    #[must_use]
    pub fn parse(v: &'a str) -> Option<Self> {
        let v = v.strip_prefix('#').unwrap_or(v);
        if v.is_empty() {
            return None;
        }
        let mut all = v.split('.').collect::<Vec<_>>();
        all.pop().map(|type_name| ODataType {
            namespace: all,
            type_name,
        })
    }
}
