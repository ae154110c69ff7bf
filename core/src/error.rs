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

//! Runtime errors

use crate::Bmc;
use crate::BmcResponse;
use crate::LinkError;
use crate::Message;
use crate::ODataId;
use http::StatusCode;
use serde::Deserialize;
use std::error::Error as StdError;
use std::fmt::Debug;
use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;

/// Errors returned by the runtime. `B` is the transport whose errors are
/// wrapped in [`Error::Bmc`].
pub enum Error<B: Bmc> {
    /// The transport failed below HTTP.
    Bmc(B::Error),
    /// The service answered with a status the operation does not accept.
    InvalidStatus(ServiceError),
    /// A body could not be decoded as the expected type.
    Json(serde_path_to_error::Error<serde_json::Error>),
    /// A link field had the wrong shape.
    MalformedLink(LinkError),
    /// Task monitor URI is missing.
    MissingTaskMonitor,
    /// `Members@odata.nextLink` points at the page that carried it.
    NextLinkLoop(ODataId),
    /// Collection walk exceeded the configured number of pages.
    PageLimit(usize),
    /// Wait was cancelled through its cancellation token.
    Cancelled,
    /// Update requested on a type without writable properties.
    ReadOnly,
    /// The resource has no `@odata.id` to address it with.
    MissingODataId,
    /// The transport the resource was loaded with has been dropped.
    Detached,
}

impl<B: Bmc> Display for Error<B> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Bmc(err) => write!(f, "BMC error: {err}"),
            Self::InvalidStatus(err) => write!(f, "{err}"),
            Self::Json(err) => write!(f, "JSON error at path {}: {}", err.path(), err.inner()),
            Self::MalformedLink(err) => write!(f, "{err}"),
            Self::MissingTaskMonitor => write!(f, "task monitor URI is missing"),
            Self::NextLinkLoop(id) => {
                write!(f, "collection page {id} names itself as next link")
            }
            Self::PageLimit(pages) => {
                write!(f, "collection has more than {pages} pages")
            }
            Self::Cancelled => write!(f, "operation cancelled"),
            Self::ReadOnly => write!(f, "resource type has no writable properties"),
            Self::MissingODataId => write!(f, "resource has no @odata.id"),
            Self::Detached => write!(f, "BMC connection has been dropped"),
        }
    }
}

impl<B: Bmc> Debug for Error<B> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Bmc(err) => f.debug_tuple("Bmc").field(err).finish(),
            Self::InvalidStatus(err) => f.debug_tuple("InvalidStatus").field(err).finish(),
            Self::Json(err) => f.debug_tuple("Json").field(err).finish(),
            Self::MalformedLink(err) => f.debug_tuple("MalformedLink").field(err).finish(),
            Self::MissingTaskMonitor => f.write_str("MissingTaskMonitor"),
            Self::NextLinkLoop(id) => f.debug_tuple("NextLinkLoop").field(id).finish(),
            Self::PageLimit(pages) => f.debug_tuple("PageLimit").field(pages).finish(),
            Self::Cancelled => f.write_str("Cancelled"),
            Self::ReadOnly => f.write_str("ReadOnly"),
            Self::MissingODataId => f.write_str("MissingODataId"),
            Self::Detached => f.write_str("Detached"),
        }
    }
}

impl<B: Bmc> StdError for Error<B> {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Bmc(err) => Some(err),
            Self::Json(err) => Some(err.inner()),
            Self::MalformedLink(err) => Some(err),
            _ => None,
        }
    }
}

/// Unexpected HTTP status with what the service said about it.
#[derive(Debug, Clone)]
pub struct ServiceError {
    /// Response status.
    pub status: StatusCode,
    /// Leading part of the response body.
    pub excerpt: String,
    /// Redfish `error` object when the body carries one.
    pub error: Option<RedfishError>,
}

impl ServiceError {
    pub(crate) fn from_response(response: &BmcResponse, excerpt_len: usize) -> Self {
        let error = response
            .json::<ErrorResponse>()
            .ok()
            .map(|response| response.error);
        Self {
            status: response.status,
            excerpt: response.excerpt(excerpt_len),
            error,
        }
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match &self.error {
            Some(err) => write!(f, "{}: {}: {}", self.status, err.code, err.message),
            None => write!(f, "{}: {}", self.status, self.excerpt),
        }
    }
}

impl StdError for ServiceError {}

#[derive(Deserialize)]
struct ErrorResponse {
    error: RedfishError,
}

/// Redfish error response object.
#[derive(Debug, Clone, Deserialize)]
pub struct RedfishError {
    /// Registry `MessageId` summarizing the error.
    #[serde(default)]
    pub code: String,
    /// Human readable text.
    #[serde(default)]
    pub message: String,
    /// Details, one message per problem.
    #[serde(rename = "@Message.ExtendedInfo", default)]
    pub extended_info: Vec<Message>,
}
