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

//! Collection member wrapper
//!
//! Members of a collection page appear either as a reference or inline:
//!
//! - Reference form: `{ "@odata.id": "/redfish/v1/Systems/1" }`
//! - Expanded form: the full member payload, recognized by its `Id`
//!   property (services answering `$expand` or embedding small members).
//!
//! The collection walker fetches references and decodes expanded members
//! in place.

use crate::link::Link;
use crate::link::LinkError;
use crate::ODataId;
use serde::de;
use serde::de::Deserializer;
use serde::Deserialize;
use serde_json::Value as JsonValue;

/// Member payload that was delivered inline.
#[derive(Debug, Clone)]
pub struct Expanded {
    odata_id: ODataId,
    payload: JsonValue,
}

impl Expanded {
    /// Inline JSON of the member.
    #[must_use]
    pub const fn payload(&self) -> &JsonValue {
        &self.payload
    }
}

/// Navigation property variants of a collection member.
#[derive(Debug, Clone)]
pub enum NavProperty {
    /// Member content included in the page.
    Expanded(Expanded),
    /// Only the member link is included in the page.
    Reference(Link),
}

impl NavProperty {
    /// Member URI. Empty if the service sent none.
    #[must_use]
    pub fn id(&self) -> &ODataId {
        match self {
            Self::Reference(link) => link.id(),
            Self::Expanded(v) => &v.odata_id,
        }
    }

    pub(crate) fn from_json(value: JsonValue) -> Result<Self, LinkError> {
        let is_expanded = value.as_object().map_or(false, |obj| obj.contains_key("Id"));
        if is_expanded {
            let odata_id = Link::from_json(&value)?.into_id();
            Ok(Self::Expanded(Expanded {
                odata_id,
                payload: value,
            }))
        } else {
            Link::from_json(&value).map(Self::Reference)
        }
    }
}

impl<'de> Deserialize<'de> for NavProperty {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = JsonValue::deserialize(deserializer)?;
        Self::from_json(value).map_err(de::Error::custom)
    }
}
