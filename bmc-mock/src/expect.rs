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

//! Expectations for Bmc Mock.

use http::header::HeaderName;
use http::HeaderMap;
use http::HeaderValue;
use http::StatusCode;
use redfish_runtime_core::BmcResponse;
use redfish_runtime_core::ODataId;
use serde_json::from_str;
use serde_json::Value as JsonValue;
use std::fmt::Display;

pub type Response<E> = Result<BmcResponse, E>;

/// Request as seen by the mock.
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    Get { id: ODataId },
    Post { id: ODataId, request: JsonValue },
    /// Multipart post, compared by part names in wire order.
    PostMultipart { id: ODataId, parts: Vec<String> },
    Patch { id: ODataId, request: JsonValue },
    Delete { id: ODataId },
}

impl Request {
    /// URI the request was sent to.
    #[must_use]
    pub const fn id(&self) -> &ODataId {
        match self {
            Self::Get { id }
            | Self::Post { id, .. }
            | Self::PostMultipart { id, .. }
            | Self::Patch { id, .. }
            | Self::Delete { id } => id,
        }
    }
}

/// Expectation for the tests.
#[derive(Debug)]
pub struct Expect<E> {
    pub request: Request,
    pub response: Response<E>,
}

fn json(v: impl Display) -> JsonValue {
    from_str(&v.to_string()).expect("invalid json")
}

impl<E> Expect<E> {
    /// `GET uri` answered with `200 OK` and `response` as body.
    pub fn get(uri: impl Display, response: impl Display) -> Self {
        Self::get_with(uri, Reply::ok(response))
    }

    pub fn get_with(uri: impl Display, response: impl Into<BmcResponse>) -> Self {
        Expect {
            request: Request::Get {
                id: uri.to_string().into(),
            },
            response: Ok(response.into()),
        }
    }

    pub fn post(
        uri: impl Display,
        request: impl Display,
        response: impl Into<BmcResponse>,
    ) -> Self {
        Expect {
            request: Request::Post {
                id: uri.to_string().into(),
                request: json(request),
            },
            response: Ok(response.into()),
        }
    }

    pub fn post_multipart(
        uri: impl Display,
        parts: &[&str],
        response: impl Into<BmcResponse>,
    ) -> Self {
        Expect {
            request: Request::PostMultipart {
                id: uri.to_string().into(),
                parts: parts.iter().map(ToString::to_string).collect(),
            },
            response: Ok(response.into()),
        }
    }

    pub fn patch(
        uri: impl Display,
        request: impl Display,
        response: impl Into<BmcResponse>,
    ) -> Self {
        Expect {
            request: Request::Patch {
                id: uri.to_string().into(),
                request: json(request),
            },
            response: Ok(response.into()),
        }
    }

    pub fn delete(uri: impl Display, response: impl Into<BmcResponse>) -> Self {
        Expect {
            request: Request::Delete {
                id: uri.to_string().into(),
            },
            response: Ok(response.into()),
        }
    }

    /// `request` fails in the transport with `err`.
    pub fn failure(request: Request, err: E) -> Self {
        Expect {
            request,
            response: Err(err),
        }
    }
}

/// Response builder.
///
/// ```rust
/// use redfish_runtime_bmc_mock::Reply;
///
/// let response = Reply::accepted("{}")
///     .header("Location", "/redfish/v1/TaskService/TaskMonitors/1")
///     .header("Retry-After", "5")
///     .build();
/// assert_eq!(response.status, 202);
/// ```
#[derive(Debug, Clone)]
pub struct Reply {
    status: StatusCode,
    headers: HeaderMap,
    body: Vec<u8>,
}

impl Reply {
    pub fn new(status: u16, body: impl Display) -> Self {
        Self {
            status: StatusCode::from_u16(status).expect("valid status code"),
            headers: HeaderMap::new(),
            body: body.to_string().into_bytes(),
        }
    }

    pub fn ok(body: impl Display) -> Self {
        Self::new(200, body)
    }

    pub fn accepted(body: impl Display) -> Self {
        Self::new(202, body)
    }

    pub fn no_content() -> Self {
        Self::new(204, "")
    }

    #[must_use]
    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.append(
            HeaderName::from_bytes(name.as_bytes()).expect("valid header name"),
            HeaderValue::from_str(value).expect("valid header value"),
        );
        self
    }

    #[must_use]
    pub fn build(self) -> BmcResponse {
        BmcResponse::new(self.status, self.headers, self.body)
    }
}

impl From<Reply> for BmcResponse {
    fn from(reply: Reply) -> Self {
        reply.build()
    }
}
