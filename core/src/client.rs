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

//! Resource navigator
//!
//! [`Client`] turns URIs into typed [`Resource`] values. It holds the
//! transport and the runtime configuration and nothing else, so it is cheap
//! to clone and safe to share between tasks.
//!
//! Empty URIs are the "optional link" convention of the runtime: asking
//! for an empty URI returns "no resource" without touching the transport.

use crate::Bmc;
use crate::BmcResponse;
use crate::ClientConfig;
use crate::CollectionPage;
use crate::EntityType;
use crate::Error;
use crate::NavProperty;
use crate::ODataETag;
use crate::ODataId;
use crate::Query;
use crate::Resource;
use crate::ServiceError;
use http::header;
use http::HeaderMap;
use serde_json::Value as JsonValue;
use std::fmt::Debug;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;
use std::sync::Arc;
use std::sync::Weak;
use tracing::debug;
use tracing::trace;

/// Redfish client runtime bound to a transport.
pub struct Client<B: Bmc> {
    bmc: Arc<B>,
    config: Arc<ClientConfig>,
}

impl<B: Bmc> Client<B> {
    /// Create a client with default configuration.
    #[must_use]
    pub fn new(bmc: Arc<B>) -> Self {
        Self::with_config(bmc, ClientConfig::default())
    }

    /// Create a client with explicit configuration.
    #[must_use]
    pub fn with_config(bmc: Arc<B>, config: ClientConfig) -> Self {
        Self::from_parts(bmc, Arc::new(config))
    }

    pub(crate) const fn from_parts(bmc: Arc<B>, config: Arc<ClientConfig>) -> Self {
        Self { bmc, config }
    }

    /// Underlying transport.
    #[must_use]
    pub const fn bmc(&self) -> &Arc<B> {
        &self.bmc
    }

    /// Runtime configuration.
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub(crate) fn downgrade(&self) -> Weak<B> {
        Arc::downgrade(&self.bmc)
    }

    pub(crate) fn shared_config(&self) -> Arc<ClientConfig> {
        self.config.clone()
    }

    /// Turn a non-success response into [`Error::InvalidStatus`].
    pub(crate) fn expect_success(&self, response: BmcResponse) -> Result<BmcResponse, Error<B>> {
        if response.is_success() {
            Ok(response)
        } else {
            Err(Error::InvalidStatus(ServiceError::from_response(
                &response,
                self.config.error_excerpt_len,
            )))
        }
    }

    /// `GET` a resource and decode it as `T`.
    ///
    /// Returns `None` for an empty `uri` without any request.
    ///
    /// # Errors
    ///
    /// - [`Error::Bmc`] if the transport fails;
    /// - [`Error::InvalidStatus`] on a non-success status;
    /// - [`Error::Json`] if the body does not decode as `T`.
    pub async fn get_object<T: EntityType>(
        &self,
        uri: &ODataId,
    ) -> Result<Option<Resource<T, B>>, Error<B>> {
        self.get_object_with(uri, &Query::default()).await
    }

    /// [`Client::get_object`] with query options appended to `uri`.
    ///
    /// # Errors
    ///
    /// Same as [`Client::get_object`].
    pub async fn get_object_with<T: EntityType>(
        &self,
        uri: &ODataId,
        query: &Query,
    ) -> Result<Option<Resource<T, B>>, Error<B>> {
        if uri.is_empty() {
            trace!("empty link, nothing to fetch");
            return Ok(None);
        }
        let uri = query.apply(uri);
        debug!(%uri, "get object");
        let response = self.bmc.get(&uri).await.map_err(Error::Bmc)?;
        let response = self.expect_success(response)?;
        let header_etag = response
            .header(header::ETAG)
            .map(|etag| ODataETag::from(etag.to_string()));
        Resource::from_body(self, response.body, header_etag).map(Some)
    }

    /// `GET` the service root (`/redfish/v1`).
    ///
    /// # Errors
    ///
    /// Same as [`Client::get_object`].
    pub async fn service_root<T: EntityType>(&self) -> Result<Resource<T, B>, Error<B>> {
        self.get_object(&ODataId::service_root())
            .await?
            .ok_or(Error::MissingODataId)
    }

    /// `GET` every URI of `uris` in order.
    ///
    /// Empty URIs are skipped. The first failure fails the whole call.
    ///
    /// # Errors
    ///
    /// Same as [`Client::get_object`].
    pub async fn get_objects<T: EntityType>(
        &self,
        uris: &[ODataId],
    ) -> Result<Vec<Resource<T, B>>, Error<B>> {
        let mut result = Vec::with_capacity(uris.len());
        for uri in uris {
            if let Some(resource) = self.get_object(uri).await? {
                result.push(resource);
            }
        }
        Ok(result)
    }

    /// Walk a paged collection and load every member.
    ///
    /// Pages are followed through `Members@odata.nextLink`. Members that
    /// the service delivered inline are decoded from the page without an
    /// extra request. Returns an empty list for an empty `uri`.
    ///
    /// # Errors
    ///
    /// - [`Error::NextLinkLoop`] if a page names itself as its continuation;
    /// - [`Error::PageLimit`] if the walk exceeds
    ///   [`ClientConfig::max_collection_pages()`];
    /// - [`Error::MalformedLink`] if a page is not a collection;
    /// - any error of [`Client::get_object`].
    pub async fn get_collection_objects<T: EntityType>(
        &self,
        uri: &ODataId,
    ) -> Result<Vec<Resource<T, B>>, Error<B>> {
        self.get_collection_objects_with(uri, &Query::default()).await
    }

    /// [`Client::get_collection_objects`] with query options on the first
    /// page. Continuation links are followed as the service sent them, and
    /// referenced members are fetched without options.
    ///
    /// With [`query::ExpandQuery`](crate::query::ExpandQuery) the service
    /// may deliver members inline, which saves one request per member.
    ///
    /// # Errors
    ///
    /// Same as [`Client::get_collection_objects`].
    pub async fn get_collection_objects_with<T: EntityType>(
        &self,
        uri: &ODataId,
        query: &Query,
    ) -> Result<Vec<Resource<T, B>>, Error<B>> {
        let mut result = Vec::new();
        let mut next = Some(query.apply(uri)).filter(|uri| !uri.is_empty());
        let mut pages = 0;
        while let Some(page_uri) = next.take() {
            if pages == self.config.max_collection_pages {
                return Err(Error::PageLimit(pages));
            }
            pages += 1;
            let page = self.get_page(&page_uri).await?;
            debug!(
                uri = %page_uri,
                members = page.members().len(),
                total = ?page.count(),
                "collection page"
            );
            if let Some(next_uri) = page.next_link() {
                if *next_uri == page_uri {
                    return Err(Error::NextLinkLoop(page_uri));
                }
                next = Some(next_uri.clone());
            }
            for member in page.into_members() {
                match member {
                    NavProperty::Expanded(expanded) => {
                        result.push(Resource::from_value(self, expanded.payload())?);
                    }
                    NavProperty::Reference(link) => {
                        if let Some(resource) = self.get_object(link.id()).await? {
                            result.push(resource);
                        }
                    }
                }
            }
        }
        Ok(result)
    }

    async fn get_page(&self, uri: &ODataId) -> Result<CollectionPage, Error<B>> {
        let response = self.bmc.get(uri).await.map_err(Error::Bmc)?;
        let response = self.expect_success(response)?;
        let value: JsonValue = response.json().map_err(Error::Json)?;
        CollectionPage::from_json(&value).map_err(Error::MalformedLink)
    }

    /// `DELETE` a resource.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Bmc`] if the transport fails or
    /// [`Error::InvalidStatus`] on a non-success status.
    pub async fn delete_object(&self, uri: &ODataId, headers: &HeaderMap) -> Result<(), Error<B>> {
        debug!(%uri, "delete object");
        let response = self.bmc.delete(uri, headers).await.map_err(Error::Bmc)?;
        self.expect_success(response).map(|_| ())
    }
}

impl<B: Bmc> Clone for Client<B> {
    fn clone(&self) -> Self {
        Self {
            bmc: self.bmc.clone(),
            config: self.config.clone(),
        }
    }
}

impl<B: Bmc> Debug for Client<B> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("Client")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
