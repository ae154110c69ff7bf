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

//! Baseboard Management Controller (BMC) transport abstraction
//!
//! This module defines the [`Bmc`] trait, the only capability the runtime
//! consumes from the embedding application. Implementors issue raw HTTP
//! requests against absolute or service-relative URIs and hand back the
//! complete response: status, headers and the fully read body.
//!
//! Operation semantics:
//! - Every HTTP status is a successful transport call. Interpreting
//!   `2xx`, `202 Accepted` and error statuses is the runtime's job.
//! - `Err` is reserved for failures below HTTP (connect, TLS, timeouts,
//!   unreadable body).
//! - Bodies are read to the end by the transport, so nothing is left
//!   half-consumed once a call returns.
//!
//! Notes for implementors:
//! - The trait is `Send + Sync` and returns `Send` futures to support use in
//!   async runtimes and multithreaded contexts.
//! - Authentication, connection pooling and retries belong to the
//!   implementation.

use crate::ODataId;
use http::header::AsHeaderName;
use http::HeaderMap;
use http::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;
use std::error::Error as StdError;
use std::future::Future;

/// BMC trait defines raw HTTP access to a Redfish service.
pub trait Bmc: Send + Sync {
    /// BMC Error.
    type Error: StdError + Send + Sync + 'static;

    /// Perform `GET uri`.
    fn get(&self, uri: &ODataId) -> impl Future<Output = Result<BmcResponse, Self::Error>> + Send;

    /// Perform `POST uri` with a JSON body.
    fn post(
        &self,
        uri: &ODataId,
        body: &JsonValue,
        headers: &HeaderMap,
    ) -> impl Future<Output = Result<BmcResponse, Self::Error>> + Send;

    /// Perform `POST uri` with a `multipart/form-data` body.
    fn post_multipart(
        &self,
        uri: &ODataId,
        form: &Multipart,
        headers: &HeaderMap,
    ) -> impl Future<Output = Result<BmcResponse, Self::Error>> + Send;

    /// Perform `PATCH uri` with a JSON body.
    fn patch(
        &self,
        uri: &ODataId,
        body: &JsonValue,
        headers: &HeaderMap,
    ) -> impl Future<Output = Result<BmcResponse, Self::Error>> + Send;

    /// Perform `DELETE uri`.
    fn delete(
        &self,
        uri: &ODataId,
        headers: &HeaderMap,
    ) -> impl Future<Output = Result<BmcResponse, Self::Error>> + Send;
}

/// Complete HTTP response returned by a [`Bmc`].
#[derive(Debug, Clone)]
pub struct BmcResponse {
    /// Response status.
    pub status: StatusCode,
    /// Response headers.
    pub headers: HeaderMap,
    /// Response body, read to the end.
    pub body: Vec<u8>,
}

impl BmcResponse {
    /// Create a response from its parts.
    #[must_use]
    pub const fn new(status: StatusCode, headers: HeaderMap, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// True for `2xx` statuses.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Header value as trimmed text. Missing, empty and non-ASCII values
    /// are reported as `None`.
    pub fn header<K: AsHeaderName>(&self, name: K) -> Option<&str> {
        self.headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
    }

    /// Decode the body as `T`.
    ///
    /// # Errors
    ///
    /// Returns the decode error with the JSON path where it happened.
    pub fn json<T: DeserializeOwned>(
        &self,
    ) -> Result<T, serde_path_to_error::Error<serde_json::Error>> {
        decode(&self.body)
    }

    /// Decode the body as `T`, treating an empty body as `{}`.
    ///
    /// # Errors
    ///
    /// Returns the decode error with the JSON path where it happened.
    pub fn json_or_empty<T: DeserializeOwned>(
        &self,
    ) -> Result<T, serde_path_to_error::Error<serde_json::Error>> {
        if self.body.iter().all(u8::is_ascii_whitespace) {
            decode(b"{}")
        } else {
            decode(&self.body)
        }
    }

    /// Leading part of the body as text, at most `max` bytes.
    #[must_use]
    pub fn excerpt(&self, max: usize) -> String {
        let end = self.body.len().min(max);
        let mut text = String::from_utf8_lossy(&self.body[..end]).into_owned();
        if end < self.body.len() {
            text.push_str("...");
        }
        text
    }
}

pub(crate) fn decode<T: DeserializeOwned>(
    body: &[u8],
) -> Result<T, serde_path_to_error::Error<serde_json::Error>> {
    serde_path_to_error::deserialize(&mut serde_json::Deserializer::from_slice(body))
}

/// Body of a `multipart/form-data` request.
///
/// Parts are sent in insertion order. A part with a file name is encoded
/// as a file upload, otherwise as a plain form field.
#[derive(Debug, Clone, Default)]
pub struct Multipart {
    parts: Vec<Part>,
}

impl Multipart {
    /// Empty form.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a part.
    #[must_use]
    pub fn part(mut self, part: Part) -> Self {
        self.parts.push(part);
        self
    }

    /// Append a plain text form field.
    #[must_use]
    pub fn field<N: Into<String>, V: Into<String>>(self, name: N, value: V) -> Self {
        self.part(Part::new(name, value.into().into_bytes()))
    }

    /// Append a file part.
    #[must_use]
    pub fn file<N: Into<String>, F: Into<String>>(
        self,
        name: N,
        file_name: F,
        body: Vec<u8>,
    ) -> Self {
        self.part(Part::new(name, body).with_file_name(file_name))
    }

    /// Parts in wire order.
    #[must_use]
    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    /// True when the form has no parts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}

/// One part of a [`Multipart`] body.
#[derive(Debug, Clone)]
pub struct Part {
    /// Form field name.
    pub name: String,
    /// Part content.
    pub body: Vec<u8>,
    /// File name; marks the part as a file upload.
    pub file_name: Option<String>,
    /// Explicit part content type.
    pub content_type: Option<String>,
}

impl Part {
    /// Create a part without file name or content type.
    #[must_use]
    pub fn new<N: Into<String>>(name: N, body: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            body,
            file_name: None,
            content_type: None,
        }
    }

    /// Set the file name.
    #[must_use]
    pub fn with_file_name<F: Into<String>>(mut self, file_name: F) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    /// Set the content type, for example `application/json`.
    #[must_use]
    pub fn with_content_type<C: Into<String>>(mut self, content_type: C) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}
