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

//! Entity base shared by every Redfish resource
//!
//! Schema types embed [`Entity`] (usually with `#[serde(flatten)]`) and
//! implement [`EntityType`]. The trait is the whole contract between a
//! schema binding and the runtime:
//!
//! - `entity()` exposes the common properties, most importantly the
//!   self-URI used by refresh, update and delete;
//! - `WRITABLE` lists the properties the update engine may send in a
//!   `PATCH`. `None` marks the type read-only and the runtime then keeps no
//!   raw snapshot of its responses.
//!
//! ```rust
//! use redfish_runtime_core::Entity;
//! use redfish_runtime_core::EntityType;
//! use serde::Deserialize;
//! use serde::Serialize;
//!
//! #[derive(Serialize, Deserialize)]
//! struct ServiceProtocol {
//!     #[serde(flatten)]
//!     entity: Entity,
//!     #[serde(rename = "ServiceEnabled")]
//!     service_enabled: bool,
//! }
//!
//! impl EntityType for ServiceProtocol {
//!     const WRITABLE: Option<&'static [&'static str]> = Some(&["ServiceEnabled"]);
//!
//!     fn entity(&self) -> &Entity {
//!         &self.entity
//!     }
//! }
//! ```

use crate::ODataETag;
use crate::ODataId;
use crate::ODataType;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value as JsonValue;
use tagged_types::TaggedType;

/// Redfish resource identifier (`Id`).
pub type ResourceId = TaggedType<String, ResourceIdTag>;
#[doc(hidden)]
#[derive(tagged_types::Tag)]
#[implement(Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[transparent(Debug, Display, FromStr, Serialize, Deserialize)]
#[capability(inner_access, cloned)]
pub enum ResourceIdTag {}

/// Redfish resource name (`Name`).
pub type ResourceName = TaggedType<String, ResourceNameTag>;
#[doc(hidden)]
#[derive(tagged_types::Tag)]
#[implement(Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[transparent(Debug, Display, FromStr, Serialize, Deserialize)]
#[capability(inner_access, cloned)]
pub enum ResourceNameTag {}

/// Redfish resource description (`Description`).
pub type ResourceDescription = TaggedType<String, ResourceDescriptionTag>;
#[doc(hidden)]
#[derive(tagged_types::Tag)]
#[implement(Clone, PartialEq, Eq)]
#[transparent(Debug, Display, FromStr, Serialize, Deserialize)]
#[capability(inner_access, cloned)]
pub enum ResourceDescriptionTag {}

/// Properties common to all Redfish resources.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Entity {
    /// Self-URI of the resource.
    #[serde(rename = "@odata.id", default, skip_serializing_if = "ODataId::is_empty")]
    pub odata_id: ODataId,
    /// Schema type tag, opaque to the runtime.
    #[serde(rename = "@odata.type", default, skip_serializing_if = "Option::is_none")]
    pub odata_type: Option<String>,
    /// Entity tag reported in the body.
    #[serde(rename = "@odata.etag", default, skip_serializing_if = "Option::is_none")]
    pub odata_etag: Option<ODataETag>,
    /// Resource identifier, unique within its collection.
    #[serde(rename = "Id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ResourceId>,
    /// Resource name.
    #[serde(rename = "Name", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<ResourceName>,
    /// Resource description.
    #[serde(rename = "Description", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<ResourceDescription>,
    /// Vendor extensions.
    #[serde(rename = "Oem", default, skip_serializing_if = "Option::is_none")]
    pub oem: Option<Oem>,
}

impl Entity {
    /// Parsed `@odata.type`.
    #[must_use]
    pub fn odata_type(&self) -> Option<ODataType<'_>> {
        self.odata_type.as_deref().and_then(ODataType::parse)
    }
}

/// Opaque vendor extension payload (`Oem`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Oem(JsonValue);

impl Oem {
    /// Payload as JSON text bytes.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        self.0.to_string().into_bytes()
    }

    /// Extension of one vendor, e.g. `oem.vendor("Contoso")`.
    #[must_use]
    pub fn vendor(&self, name: &str) -> Option<&JsonValue> {
        self.0.get(name)
    }

    /// Decode the payload into a vendor specific type.
    ///
    /// # Errors
    ///
    /// Returns the decode error if the payload does not match `T`.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        T::deserialize(&self.0)
    }
}

/// Entity type trait implemented by schema types.
pub trait EntityType: DeserializeOwned + Send + Sync + 'static {
    /// Writable properties. Entries are property names or dotted paths
    /// into nested objects (`Boot.BootSourceOverrideTarget`).
    const WRITABLE: Option<&'static [&'static str]> = None;

    /// Common properties of the entity.
    fn entity(&self) -> &Entity;

    /// Value of `@odata.id` field of the Entity.
    fn odata_id(&self) -> &ODataId {
        &self.entity().odata_id
    }

    /// Value of `@odata.etag` field of the Entity.
    fn etag(&self) -> Option<&ODataETag> {
        self.entity().odata_etag.as_ref()
    }
}
