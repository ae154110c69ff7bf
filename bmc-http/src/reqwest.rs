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

use crate::BmcCredentials;
use crate::HttpClient;
use http::header;
use http::HeaderMap;
use http::HeaderValue;
use redfish_runtime_core::BmcResponse;
use redfish_runtime_core::Multipart;
use serde_json::Value as JsonValue;
use std::time::Duration;
use tracing::trace;
use url::Url;

#[derive(Debug)]
pub enum BmcError {
    ReqwestError(reqwest::Error),
    InvalidUri(url::ParseError),
}

impl From<reqwest::Error> for BmcError {
    fn from(value: reqwest::Error) -> Self {
        Self::ReqwestError(value)
    }
}

impl From<url::ParseError> for BmcError {
    fn from(value: url::ParseError) -> Self {
        Self::InvalidUri(value)
    }
}

#[allow(clippy::absolute_paths)]
impl std::fmt::Display for BmcError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ReqwestError(e) => write!(f, "HTTP client error: {e:?}"),
            Self::InvalidUri(e) => write!(f, "invalid resource URI: {e}"),
        }
    }
}

#[allow(clippy::absolute_paths)]
impl std::error::Error for BmcError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ReqwestError(e) => Some(e),
            Self::InvalidUri(e) => Some(e),
        }
    }
}

/// Configuration parameters for the reqwest HTTP client.
///
/// # Examples
///
/// ```rust
/// use redfish_runtime_bmc_http::reqwest::ClientParams;
/// use std::time::Duration;
///
/// let params = ClientParams::new()
///     .timeout(Duration::from_secs(30))
///     .connect_timeout(Duration::from_secs(10))
///     .user_agent("MyApp/1.0")
///     .accept_invalid_certs(true);
/// ```
#[derive(Debug, Clone)]
pub struct ClientParams {
    /// HTTP request timeout
    pub timeout: Option<Duration>,
    /// TCP connection timeout
    pub connect_timeout: Option<Duration>,
    /// User-Agent header value
    pub user_agent: Option<String>,
    /// Whether to accept invalid TLS certificates
    pub accept_invalid_certs: bool,
    /// Maximum number of HTTP redirects to follow
    pub max_redirects: Option<usize>,
    /// TCP keep-alive timeout
    pub tcp_keepalive: Option<Duration>,
    /// Connection pool idle timeout
    pub pool_idle_timeout: Option<Duration>,
    /// Maximum idle connections per host
    pub pool_max_idle_per_host: Option<usize>,
    /// Headers added to every request
    pub default_headers: Option<HeaderMap>,
    /// Forces use of rust TLS, enabled by default
    pub use_rust_tls: bool,
}

impl Default for ClientParams {
    fn default() -> Self {
        Self {
            timeout: Some(Duration::from_secs(120)),
            connect_timeout: Some(Duration::from_secs(5)),
            user_agent: Some("redfish-runtime/v1".to_string()),
            accept_invalid_certs: false,
            max_redirects: Some(10),
            tcp_keepalive: Some(Duration::from_secs(60)),
            pool_idle_timeout: Some(Duration::from_secs(90)),
            pool_max_idle_per_host: Some(1),
            default_headers: None,
            use_rust_tls: true,
        }
    }
}

impl ClientParams {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    #[must_use]
    pub const fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    #[must_use]
    pub fn user_agent<S: Into<String>>(mut self, user_agent: S) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    #[must_use]
    pub const fn accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }

    #[must_use]
    pub const fn max_redirects(mut self, max: usize) -> Self {
        self.max_redirects = Some(max);
        self
    }

    #[must_use]
    pub const fn tcp_keepalive(mut self, keepalive: Duration) -> Self {
        self.tcp_keepalive = Some(keepalive);
        self
    }

    #[must_use]
    pub const fn pool_max_idle_per_host(mut self, pool_max_idle_per_host: usize) -> Self {
        self.pool_max_idle_per_host = Some(pool_max_idle_per_host);
        self
    }

    #[must_use]
    pub const fn idle_timeout(mut self, pool_idle_timeout: Duration) -> Self {
        self.pool_idle_timeout = Some(pool_idle_timeout);
        self
    }

    /// Task monitors of firmware updates can legitimately stall a request
    /// for a long time; disables the request timeout.
    #[must_use]
    pub const fn no_timeout(mut self) -> Self {
        self.timeout = None;
        self
    }

    #[must_use]
    pub fn default_headers(mut self, default_headers: HeaderMap) -> Self {
        self.default_headers = Some(default_headers);
        self
    }
}

/// [`HttpClient`] on top of reqwest.
///
/// Every request asks for `application/json`. Bodies are read to the end
/// before the response is returned.
///
/// ```rust,no_run
/// use redfish_runtime_bmc_http::reqwest::Client;
/// use redfish_runtime_bmc_http::reqwest::ClientParams;
/// use std::time::Duration;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let params = ClientParams::new().timeout(Duration::from_secs(60));
/// let client = Client::with_params(params)?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Client {
    client: reqwest::Client,
}

#[allow(clippy::missing_errors_doc)]
#[allow(clippy::absolute_paths)]
impl Client {
    pub fn new() -> Result<Self, reqwest::Error> {
        Self::with_params(ClientParams::default())
    }

    pub fn with_params(params: ClientParams) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder();

        if params.use_rust_tls {
            builder = builder.use_rustls_tls();
        }

        if let Some(timeout) = params.timeout {
            builder = builder.timeout(timeout);
        }

        if let Some(connect_timeout) = params.connect_timeout {
            builder = builder.connect_timeout(connect_timeout);
        }

        if let Some(user_agent) = params.user_agent {
            builder = builder.user_agent(user_agent);
        }

        if params.accept_invalid_certs {
            builder = builder.danger_accept_invalid_certs(true);
        }

        if let Some(max_redirects) = params.max_redirects {
            builder = builder.redirect(reqwest::redirect::Policy::limited(max_redirects));
        }

        if let Some(keepalive) = params.tcp_keepalive {
            builder = builder.tcp_keepalive(keepalive);
        }

        if let Some(idle_timeout) = params.pool_idle_timeout {
            builder = builder.pool_idle_timeout(idle_timeout);
        }

        if let Some(max_idle) = params.pool_max_idle_per_host {
            builder = builder.pool_max_idle_per_host(max_idle);
        }

        if let Some(default_headers) = params.default_headers {
            builder = builder.default_headers(default_headers);
        }

        Ok(Self {
            client: builder.build()?,
        })
    }

    #[must_use]
    pub const fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Client {
    async fn send(
        &self,
        request: reqwest::RequestBuilder,
        credentials: Option<&BmcCredentials>,
        headers: &HeaderMap,
    ) -> Result<BmcResponse, BmcError> {
        let mut request = request
            .header(header::ACCEPT, HeaderValue::from_static("application/json"))
            .headers(headers.clone());
        if let Some(credentials) = credentials {
            request = request.basic_auth(&credentials.username, Some(credentials.password()));
        }

        let response = request.send().await?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?.to_vec();
        trace!(%status, len = body.len(), "response");
        Ok(BmcResponse::new(status, headers, body))
    }
}

fn multipart_form(form: &Multipart) -> Result<reqwest::multipart::Form, BmcError> {
    form.parts()
        .iter()
        .try_fold(reqwest::multipart::Form::new(), |acc, part| {
            let mut field = reqwest::multipart::Part::bytes(part.body.clone());
            if let Some(file_name) = &part.file_name {
                field = field.file_name(file_name.clone());
            }
            if let Some(content_type) = &part.content_type {
                field = field.mime_str(content_type)?;
            }
            Ok(acc.part(part.name.clone(), field))
        })
}

impl HttpClient for Client {
    type Error = BmcError;

    async fn get(
        &self,
        url: Url,
        credentials: Option<&BmcCredentials>,
        headers: &HeaderMap,
    ) -> Result<BmcResponse, Self::Error> {
        self.send(self.client.get(url), credentials, headers).await
    }

    async fn post(
        &self,
        url: Url,
        body: &JsonValue,
        credentials: Option<&BmcCredentials>,
        headers: &HeaderMap,
    ) -> Result<BmcResponse, Self::Error> {
        self.send(self.client.post(url).json(body), credentials, headers)
            .await
    }

    async fn post_multipart(
        &self,
        url: Url,
        form: &Multipart,
        credentials: Option<&BmcCredentials>,
        headers: &HeaderMap,
    ) -> Result<BmcResponse, Self::Error> {
        let form = multipart_form(form)?;
        self.send(self.client.post(url).multipart(form), credentials, headers)
            .await
    }

    async fn patch(
        &self,
        url: Url,
        body: &JsonValue,
        credentials: Option<&BmcCredentials>,
        headers: &HeaderMap,
    ) -> Result<BmcResponse, Self::Error> {
        self.send(self.client.patch(url).json(body), credentials, headers)
            .await
    }

    async fn delete(
        &self,
        url: Url,
        credentials: Option<&BmcCredentials>,
        headers: &HeaderMap,
    ) -> Result<BmcResponse, Self::Error> {
        self.send(self.client.delete(url), credentials, headers)
            .await
    }
}
