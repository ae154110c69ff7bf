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

//! Redfish link decoder
//!
//! Links appear on the wire in three shapes:
//!
//! - single link: `{"@odata.id": "/redfish/v1/Chassis/1"}`
//! - link array: `[{"@odata.id": "/A/1"}, {"@odata.id": "/A/2"}]`
//! - paged collection: `{"Members": [...], "Members@odata.nextLink": "..."}`
//!
//! [`Link`] and [`Links`] are serde types for schema structs, so a link
//! field with the wrong shape fails the decode of the enclosing resource.
//! Missing or `null` link fields decode to empty links, which the navigator
//! treats as "no such resource". The free functions decode the same shapes
//! from an already parsed [`JsonValue`].
//!
//! References:
//! - DMTF Redfish Specification DSP0266 `https://www.dmtf.org/standards/redfish`

use crate::NavProperty;
use crate::ODataId;
use serde::de;
use serde::ser::SerializeMap;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;
use serde_json::Value as JsonValue;
use std::error::Error as StdError;
use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;

const ODATA_ID: &str = "@odata.id";
const NEXT_LINK: &str = "Members@odata.nextLink";

/// A link field had a shape that is not a Redfish link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkError {
    expected: &'static str,
    found: &'static str,
}

impl LinkError {
    pub(crate) const fn new(expected: &'static str, found: &'static str) -> Self {
        Self { expected, found }
    }
}

impl Display for LinkError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(
            f,
            "malformed link: expected {}, found {}",
            self.expected, self.found
        )
    }
}

impl StdError for LinkError {}

pub(crate) const fn json_kind(v: &JsonValue) -> &'static str {
    match v {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}

/// Single link to another resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Link {
    odata_id: ODataId,
}

impl Link {
    /// Link to `odata_id`.
    #[must_use]
    pub const fn new(odata_id: ODataId) -> Self {
        Self { odata_id }
    }

    /// Target URI. Empty when the link was absent.
    #[must_use]
    pub const fn id(&self) -> &ODataId {
        &self.odata_id
    }

    /// Take the target URI.
    #[must_use]
    pub fn into_id(self) -> ODataId {
        self.odata_id
    }

    /// True when the link does not point anywhere.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.odata_id.is_empty()
    }

    pub(crate) fn from_json(value: &JsonValue) -> Result<Self, LinkError> {
        match value {
            JsonValue::Null => Ok(Self::default()),
            JsonValue::Object(obj) => {
                // Some older services use `href` instead of `@odata.id`.
                match obj.get(ODATA_ID).or_else(|| obj.get("href")) {
                    None | Some(JsonValue::Null) => Ok(Self::default()),
                    Some(JsonValue::String(uri)) => Ok(Self::new(uri.clone().into())),
                    Some(other) => Err(LinkError::new("string URI", json_kind(other))),
                }
            }
            other => Err(LinkError::new("single link object", json_kind(other))),
        }
    }
}

impl From<ODataId> for Link {
    fn from(odata_id: ODataId) -> Self {
        Self::new(odata_id)
    }
}

impl Serialize for Link {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(ODATA_ID, &self.odata_id)?;
        map.end()
    }
}

impl<'de> Deserialize<'de> for Link {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = JsonValue::deserialize(deserializer)?;
        Self::from_json(&value).map_err(de::Error::custom)
    }
}

/// Sequence of links: a link array or the first page of a paged
/// collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Links {
    links: Vec<Link>,
    next_link: Option<ODataId>,
}

impl Links {
    /// Links in wire order.
    pub fn iter(&self) -> impl Iterator<Item = &Link> {
        self.links.iter()
    }

    /// Number of links.
    #[must_use]
    pub fn len(&self) -> usize {
        self.links.len()
    }

    /// True when there are no links.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Continuation of a paged collection, if the field held one.
    #[must_use]
    pub const fn next_link(&self) -> Option<&ODataId> {
        self.next_link.as_ref()
    }

    /// Non-empty target URIs in wire order.
    #[must_use]
    pub fn ids(&self) -> Vec<ODataId> {
        self.iter()
            .filter(|l| !l.is_empty())
            .map(|l| l.id().clone())
            .collect()
    }

    /// Non-empty target URIs as strings.
    #[must_use]
    pub fn to_strings(&self) -> Vec<String> {
        self.iter()
            .filter(|l| !l.is_empty())
            .map(|l| l.id().to_string())
            .collect()
    }

    fn from_json(value: &JsonValue) -> Result<Self, LinkError> {
        match value {
            JsonValue::Null => Ok(Self::default()),
            JsonValue::Array(items) => Ok(Self {
                links: items.iter().map(Link::from_json).collect::<Result<_, _>>()?,
                next_link: None,
            }),
            JsonValue::Object(obj)
                if obj.contains_key("Members")
                    || obj.contains_key(NEXT_LINK)
                    || obj.get("Links").map_or(false, |l| l.get("Members").is_some()) =>
            {
                let page = CollectionPage::from_json(value)?;
                Ok(Self {
                    links: page
                        .members
                        .iter()
                        .map(|m| Link::new(m.id().clone()))
                        .collect(),
                    next_link: page.next_link,
                })
            }
            other => Err(LinkError::new(
                "link array or paged collection",
                json_kind(other),
            )),
        }
    }
}

impl<'a> IntoIterator for &'a Links {
    type Item = &'a Link;
    type IntoIter = std::slice::Iter<'a, Link>;

    fn into_iter(self) -> Self::IntoIter {
        self.links.iter()
    }
}

impl From<Vec<Link>> for Links {
    fn from(links: Vec<Link>) -> Self {
        Self {
            links,
            next_link: None,
        }
    }
}

impl Serialize for Links {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.links.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Links {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = JsonValue::deserialize(deserializer)?;
        Self::from_json(&value).map_err(de::Error::custom)
    }
}

/// One page of a Redfish collection.
#[derive(Debug, Clone, Default)]
pub struct CollectionPage {
    members: Vec<NavProperty>,
    next_link: Option<ODataId>,
    count: Option<u64>,
}

impl CollectionPage {
    /// Decode a page. Members are read from `Members`, or from
    /// `Links.Members` for services that still use the older layout.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError`] if the page or one of its members has the
    /// wrong shape.
    pub fn from_json(value: &JsonValue) -> Result<Self, LinkError> {
        let obj = value
            .as_object()
            .ok_or_else(|| LinkError::new("paged collection object", json_kind(value)))?;
        let members = match obj
            .get("Members")
            .or_else(|| obj.get("Links").and_then(|links| links.get("Members")))
        {
            None | Some(JsonValue::Null) => Vec::new(),
            Some(JsonValue::Array(items)) => items
                .iter()
                .cloned()
                .map(NavProperty::from_json)
                .collect::<Result<_, _>>()?,
            Some(other) => return Err(LinkError::new("member array", json_kind(other))),
        };
        let next_link = match obj.get(NEXT_LINK) {
            None | Some(JsonValue::Null) => None,
            Some(JsonValue::String(uri)) if uri.is_empty() => None,
            Some(JsonValue::String(uri)) => Some(ODataId::from(uri.clone())),
            Some(other) => return Err(LinkError::new("string next link", json_kind(other))),
        };
        let count = obj
            .get("Members@odata.count")
            .or_else(|| obj.get("@odata.count"))
            .and_then(JsonValue::as_u64);
        Ok(Self {
            members,
            next_link,
            count,
        })
    }

    /// Members of this page in wire order.
    #[must_use]
    pub fn members(&self) -> &[NavProperty] {
        &self.members
    }

    /// Take the members.
    #[must_use]
    pub fn into_members(self) -> Vec<NavProperty> {
        self.members
    }

    /// Continuation URI, `None` on the last page.
    #[must_use]
    pub const fn next_link(&self) -> Option<&ODataId> {
        self.next_link.as_ref()
    }

    /// Total member count across all pages when the service reports it.
    #[must_use]
    pub const fn count(&self) -> Option<u64> {
        self.count
    }
}

/// Decode `{"@odata.id": "..."}`. Absent or empty yields an empty URI.
///
/// # Errors
///
/// Returns [`LinkError`] if the value is not a link object.
pub fn decode_single_link(value: &JsonValue) -> Result<ODataId, LinkError> {
    Link::from_json(value).map(Link::into_id)
}

/// Decode a link array or the first page of a paged collection into
/// member URIs. Continuation pages are left to the collection walker.
///
/// # Errors
///
/// Returns [`LinkError`] if the value has none of the link shapes.
pub fn decode_link_array(value: &JsonValue) -> Result<Vec<ODataId>, LinkError> {
    Links::from_json(value).map(|links| links.links.into_iter().map(Link::into_id).collect())
}

/// Flatten decoded links into the non-empty URI strings the navigator
/// consumes.
#[must_use]
pub fn to_strings(links: &Links) -> Vec<String> {
    links.to_strings()
}
