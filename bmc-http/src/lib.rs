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

//! HTTP transport for the Redfish runtime.
//!
//! [`HttpBmc`] implements [`Bmc`] on top of any [`HttpClient`]. It turns
//! URIs into URLs against the service endpoint, attaches credentials and
//! the connection-wide headers, and hands back every response whatever its
//! status. Credentials only go to the endpoint's own origin; an absolute
//! URI on another host, such as a task monitor elsewhere, is requested
//! without them. With the default `reqwest` feature, [`reqwest::Client`] is the
//! ready-made [`HttpClient`].

pub mod credentials;

#[cfg(feature = "reqwest")]
pub mod reqwest;

use http::HeaderMap;
use redfish_runtime_core::Bmc;
use redfish_runtime_core::BmcResponse;
use redfish_runtime_core::Multipart;
use redfish_runtime_core::ODataId;
use serde_json::Value as JsonValue;
use std::error::Error as StdError;
use std::future::Future;
use tracing::debug;
use url::Url;

#[doc(inline)]
pub use credentials::BmcCredentials;

/// Plain HTTP client used by [`HttpBmc`].
///
/// Implementations return the complete response for every status; only
/// failures below HTTP are errors.
pub trait HttpClient: Send + Sync {
    type Error: StdError + Send + Sync + 'static;

    /// Perform an HTTP GET request.
    fn get(
        &self,
        url: Url,
        credentials: Option<&BmcCredentials>,
        headers: &HeaderMap,
    ) -> impl Future<Output = Result<BmcResponse, Self::Error>> + Send;

    /// Perform an HTTP POST request with a JSON body.
    fn post(
        &self,
        url: Url,
        body: &JsonValue,
        credentials: Option<&BmcCredentials>,
        headers: &HeaderMap,
    ) -> impl Future<Output = Result<BmcResponse, Self::Error>> + Send;

    /// Perform an HTTP POST request with a `multipart/form-data` body.
    fn post_multipart(
        &self,
        url: Url,
        form: &Multipart,
        credentials: Option<&BmcCredentials>,
        headers: &HeaderMap,
    ) -> impl Future<Output = Result<BmcResponse, Self::Error>> + Send;

    /// Perform an HTTP PATCH request with a JSON body.
    fn patch(
        &self,
        url: Url,
        body: &JsonValue,
        credentials: Option<&BmcCredentials>,
        headers: &HeaderMap,
    ) -> impl Future<Output = Result<BmcResponse, Self::Error>> + Send;

    /// Perform an HTTP DELETE request.
    fn delete(
        &self,
        url: Url,
        credentials: Option<&BmcCredentials>,
        headers: &HeaderMap,
    ) -> impl Future<Output = Result<BmcResponse, Self::Error>> + Send;
}

/// HTTP-based BMC implementation that wraps an [`HttpClient`].
///
/// # Examples
///
/// ```rust,no_run
/// use redfish_runtime_bmc_http::reqwest::Client;
/// use redfish_runtime_bmc_http::BmcCredentials;
/// use redfish_runtime_bmc_http::HttpBmc;
/// use redfish_runtime_core::Client as RedfishClient;
/// use std::sync::Arc;
/// use url::Url;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let credentials = BmcCredentials::new("admin".to_string(), "password".to_string());
/// let endpoint = Url::parse("https://192.168.1.100")?;
/// let bmc = HttpBmc::new(Client::new()?, endpoint, credentials);
/// let client = RedfishClient::new(Arc::new(bmc));
/// # Ok(())
/// # }
/// ```
pub struct HttpBmc<C: HttpClient> {
    client: C,
    redfish_endpoint: RedfishEndpoint,
    credentials: Option<BmcCredentials>,
    custom_headers: HeaderMap,
}

impl<C: HttpClient> HttpBmc<C> {
    /// Create a BMC transport authenticating with `credentials`.
    pub fn new(client: C, redfish_endpoint: Url, credentials: BmcCredentials) -> Self {
        Self::with_custom_headers(client, redfish_endpoint, Some(credentials), HeaderMap::new())
    }

    /// Create a BMC transport that sends no credentials, e.g. for session
    /// tokens passed through custom headers.
    pub fn anonymous(client: C, redfish_endpoint: Url) -> Self {
        Self::with_custom_headers(client, redfish_endpoint, None, HeaderMap::new())
    }

    /// Create a BMC transport with headers added to every request.
    ///
    /// Headers passed with a single request take precedence over these.
    ///
    /// ```rust,no_run
    /// use http::HeaderMap;
    /// use redfish_runtime_bmc_http::reqwest::Client;
    /// use redfish_runtime_bmc_http::HttpBmc;
    /// use url::Url;
    ///
    /// # fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let mut headers = HeaderMap::new();
    /// headers.insert("X-Auth-Token", "custom-token-value".parse()?);
    /// let bmc = HttpBmc::with_custom_headers(
    ///     Client::new()?,
    ///     Url::parse("https://192.168.1.100")?,
    ///     None,
    ///     headers,
    /// );
    /// # Ok(())
    /// # }
    /// ```
    pub fn with_custom_headers(
        client: C,
        redfish_endpoint: Url,
        credentials: Option<BmcCredentials>,
        custom_headers: HeaderMap,
    ) -> Self {
        Self {
            client,
            redfish_endpoint: RedfishEndpoint::from(redfish_endpoint),
            credentials,
            custom_headers,
        }
    }

    /// Endpoint requests are resolved against.
    #[must_use]
    pub const fn endpoint(&self) -> &RedfishEndpoint {
        &self.redfish_endpoint
    }

    fn credentials_for(&self, url: &Url) -> Option<&BmcCredentials> {
        if self.redfish_endpoint.same_origin(url) {
            self.credentials.as_ref()
        } else {
            if self.credentials.is_some() {
                debug!(%url, "foreign origin, credentials withheld");
            }
            None
        }
    }

    fn headers(&self, request: &HeaderMap) -> HeaderMap {
        let mut headers = self.custom_headers.clone();
        for (name, value) in request {
            headers.insert(name.clone(), value.clone());
        }
        headers
    }
}

/// Base URL of a Redfish service.
#[derive(Debug, Clone)]
pub struct RedfishEndpoint {
    base_url: Url,
}

impl RedfishEndpoint {
    #[must_use]
    pub const fn new(base_url: Url) -> Self {
        Self { base_url }
    }

    /// URL of `uri`. Absolute URIs are used as they are; anything else is
    /// resolved against the base URL. Query strings are kept.
    ///
    /// # Errors
    ///
    /// Returns the parse error if `uri` is not a valid URI reference.
    pub fn resolve(&self, uri: &str) -> Result<Url, url::ParseError> {
        match Url::parse(uri) {
            Err(url::ParseError::RelativeUrlWithoutBase) => self.base_url.join(uri),
            result => result,
        }
    }

    /// True when `url` has the scheme, host and port of the base URL.
    #[must_use]
    pub fn same_origin(&self, url: &Url) -> bool {
        url.origin() == self.base_url.origin()
    }
}

impl From<Url> for RedfishEndpoint {
    fn from(url: Url) -> Self {
        Self::new(url)
    }
}

impl From<&RedfishEndpoint> for Url {
    fn from(endpoint: &RedfishEndpoint) -> Self {
        endpoint.base_url.clone()
    }
}

impl<C: HttpClient> Bmc for HttpBmc<C>
where
    C::Error: From<url::ParseError>,
{
    type Error = C::Error;

    async fn get(&self, uri: &ODataId) -> Result<BmcResponse, Self::Error> {
        let url = self.redfish_endpoint.resolve(uri.as_str())?;
        debug!(%url, "GET");
        let credentials = self.credentials_for(&url);
        self.client
            .get(url, credentials, &self.custom_headers)
            .await
    }

    async fn post(
        &self,
        uri: &ODataId,
        body: &JsonValue,
        headers: &HeaderMap,
    ) -> Result<BmcResponse, Self::Error> {
        let url = self.redfish_endpoint.resolve(uri.as_str())?;
        debug!(%url, "POST");
        let credentials = self.credentials_for(&url);
        self.client
            .post(url, body, credentials, &self.headers(headers))
            .await
    }

    async fn post_multipart(
        &self,
        uri: &ODataId,
        form: &Multipart,
        headers: &HeaderMap,
    ) -> Result<BmcResponse, Self::Error> {
        let url = self.redfish_endpoint.resolve(uri.as_str())?;
        debug!(%url, parts = form.parts().len(), "POST multipart");
        let credentials = self.credentials_for(&url);
        self.client
            .post_multipart(url, form, credentials, &self.headers(headers))
            .await
    }

    async fn patch(
        &self,
        uri: &ODataId,
        body: &JsonValue,
        headers: &HeaderMap,
    ) -> Result<BmcResponse, Self::Error> {
        let url = self.redfish_endpoint.resolve(uri.as_str())?;
        debug!(%url, "PATCH");
        let credentials = self.credentials_for(&url);
        self.client
            .patch(url, body, credentials, &self.headers(headers))
            .await
    }

    async fn delete(&self, uri: &ODataId, headers: &HeaderMap) -> Result<BmcResponse, Self::Error> {
        let url = self.redfish_endpoint.resolve(uri.as_str())?;
        debug!(%url, "DELETE");
        let credentials = self.credentials_for(&url);
        self.client
            .delete(url, credentials, &self.headers(headers))
            .await
    }
}
