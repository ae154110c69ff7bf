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

//! Loaded resource bound to its transport
//!
//! [`Resource<T, B>`] is what the navigator hands out: the decoded schema
//! value plus everything needed to keep working with it:
//!
//! - a weak handle to the transport, so links can be followed without
//!   passing the client around. Dropping a resource never keeps the
//!   connection alive, and using a resource after the transport is gone
//!   fails with [`Error::Detached`];
//! - the effective ETag (`@odata.etag` in the body, else the `ETag`
//!   response header);
//! - for types with a writable allow-list, the exact bytes of the response
//!   the value was decoded from. This raw snapshot is the baseline of the
//!   update engine and is replaced only by [`Resource::refresh`].
//!
//! Following links takes `&self`: navigation never changes the resource it
//! starts from.

use crate::bmc::decode;
use crate::Bmc;
use crate::Client;
use crate::ClientConfig;
use crate::EntityType;
use crate::Error;
use crate::Link;
use crate::Links;
use crate::ODataETag;
use crate::ODataId;
use http::header;
use http::HeaderMap;
use http::HeaderValue;
use serde_json::Value as JsonValue;
use std::fmt::Debug;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;
use std::ops::Deref;
use std::ops::DerefMut;
use std::sync::Arc;
use std::sync::Weak;
use tracing::debug;
use tracing::warn;

/// Decoded Redfish resource bound to the transport it was loaded with.
pub struct Resource<T, B: Bmc> {
    data: T,
    etag: Option<ODataETag>,
    raw: Option<Vec<u8>>,
    bmc: Weak<B>,
    config: Arc<ClientConfig>,
}

impl<T: EntityType, B: Bmc> Resource<T, B> {
    /// Decode `body` and bind it to `client`.
    pub(crate) fn from_body(
        client: &Client<B>,
        body: Vec<u8>,
        header_etag: Option<ODataETag>,
    ) -> Result<Self, Error<B>> {
        let data: T = decode(&body).map_err(Error::Json)?;
        let etag = data.etag().cloned().or(header_etag);
        Ok(Self {
            data,
            etag,
            raw: T::WRITABLE.map(|_| body),
            bmc: client.downgrade(),
            config: client.shared_config(),
        })
    }

    /// Decode a member that was delivered inline in a collection page.
    pub(crate) fn from_value(client: &Client<B>, payload: &JsonValue) -> Result<Self, Error<B>> {
        // Inline members have no bytes of their own; the canonical
        // serialization of the member becomes the baseline.
        let body = payload.to_string().into_bytes();
        Self::from_body(client, body, None)
    }

    /// Client bound to the transport this resource was loaded with.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Detached`] if the transport has been dropped.
    pub fn client(&self) -> Result<Client<B>, Error<B>> {
        self.bmc
            .upgrade()
            .map(|bmc| Client::from_parts(bmc, self.config.clone()))
            .ok_or(Error::Detached)
    }

    /// Self-URI of the resource.
    #[must_use]
    pub fn odata_id(&self) -> &ODataId {
        self.data.odata_id()
    }

    /// ETag of the loaded representation.
    #[must_use]
    pub const fn etag(&self) -> Option<&ODataETag> {
        self.etag.as_ref()
    }

    /// Exact response bytes the value was decoded from. `None` for
    /// read-only types.
    #[must_use]
    pub fn raw_data(&self) -> Option<&[u8]> {
        self.raw.as_deref()
    }

    /// Decoded value.
    #[must_use]
    pub const fn data(&self) -> &T {
        &self.data
    }

    /// Drop the binding and keep the decoded value.
    #[must_use]
    pub fn into_inner(self) -> T {
        self.data
    }

    /// Fetch the resource a single link points to. An empty link yields
    /// `None` without any request.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body cannot be decoded.
    pub async fn follow<U: EntityType>(
        &self,
        link: &Link,
    ) -> Result<Option<Resource<U, B>>, Error<B>> {
        if link.is_empty() {
            return Ok(None);
        }
        self.client()?.get_object(link.id()).await
    }

    /// Fetch every resource of a link array, in order.
    ///
    /// # Errors
    ///
    /// Fails as a whole if any element fails.
    pub async fn follow_all<U: EntityType>(
        &self,
        links: &Links,
    ) -> Result<Vec<Resource<U, B>>, Error<B>> {
        let ids = links.ids();
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        self.client()?.get_objects(&ids).await
    }

    /// Walk the collection a link points to.
    ///
    /// # Errors
    ///
    /// See [`Client::get_collection_objects`].
    pub async fn follow_collection<U: EntityType>(
        &self,
        link: &Link,
    ) -> Result<Vec<Resource<U, B>>, Error<B>> {
        if link.is_empty() {
            return Ok(Vec::new());
        }
        self.client()?.get_collection_objects(link.id()).await
    }

    /// Re-read the resource, replacing value, ETag and raw snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body cannot be decoded.
    /// The resource is unchanged on error.
    pub async fn refresh(&mut self) -> Result<(), Error<B>> {
        let id = self.required_id()?.clone();
        debug!(uri = %id, "refresh resource");
        let fresh = self
            .client()?
            .get_object::<T>(&id)
            .await?
            .ok_or(Error::MissingODataId)?;
        *self = fresh;
        Ok(())
    }

    /// Delete the resource on the service.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the service answers with a
    /// non-success status.
    pub async fn delete(&self) -> Result<(), Error<B>> {
        let id = self.required_id()?;
        self.client()?.delete_object(id, &HeaderMap::new()).await
    }

    /// `If-Match` header for a conditional request on this resource.
    ///
    /// Empty when the client has ETag matching disabled or no ETag is
    /// known. Quotes are removed when
    /// [`ClientConfig::strip_etag_quotes()`] is set.
    #[must_use]
    pub fn conditional_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        let etag = match &self.etag {
            Some(etag) if self.config.etag_match => etag,
            _ => return headers,
        };
        let value = if self.config.strip_etag_quotes {
            HeaderValue::from_str(&etag.unquoted())
        } else {
            HeaderValue::from_str(etag.as_str())
        };
        match value {
            Ok(value) => {
                headers.insert(header::IF_MATCH, value);
            }
            Err(_) => warn!(%etag, "ETag is not a valid header value"),
        }
        headers
    }

    pub(crate) fn required_id(&self) -> Result<&ODataId, Error<B>> {
        let id = self.odata_id();
        if id.is_empty() {
            Err(Error::MissingODataId)
        } else {
            Ok(id)
        }
    }
}

impl<T, B: Bmc> Deref for Resource<T, B> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.data
    }
}

impl<T, B: Bmc> DerefMut for Resource<T, B> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.data
    }
}

impl<T: Clone, B: Bmc> Clone for Resource<T, B> {
    fn clone(&self) -> Self {
        Self {
            data: self.data.clone(),
            etag: self.etag.clone(),
            raw: self.raw.clone(),
            bmc: self.bmc.clone(),
            config: self.config.clone(),
        }
    }
}

impl<T: Debug, B: Bmc> Debug for Resource<T, B> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("Resource")
            .field("data", &self.data)
            .field("etag", &self.etag)
            .field("raw", &self.raw.as_ref().map(Vec::len))
            .finish()
    }
}
