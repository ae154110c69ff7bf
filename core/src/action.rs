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

//! Action invocation
//!
//! Actions are advertised in the `Actions` object of a resource:
//!
//! ```json
//! "Actions": {
//!     "#ComputerSystem.Reset": {
//!         "target": "/redfish/v1/Systems/1/Actions/ComputerSystem.Reset",
//!         "@Redfish.ActionInfo": {"@odata.id": "/redfish/v1/Systems/1/ResetActionInfo"}
//!     }
//! }
//! ```
//!
//! A `POST` to the target either completes synchronously or is accepted
//! with `202` and a task monitor in `Location`. [`ActionResponse`] carries
//! the raw result, [`ActionOutcome`] the decoded one.

use crate::bmc::Multipart;
use crate::Bmc;
use crate::BmcResponse;
use crate::Client;
use crate::EntityType;
use crate::Error;
use crate::Link;
use crate::ODataId;
use crate::Resource;
use crate::TaskMonitorInfo;
use http::HeaderMap;
use http::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;
use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;
use std::marker::PhantomData;
use time::OffsetDateTime;
use tracing::debug;
use tracing::warn;

/// Type for `target` field of Action.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct ActionTarget(ODataId);

impl ActionTarget {
    #[must_use]
    pub const fn new(v: ODataId) -> Self {
        Self(v)
    }

    /// URI the action is posted to.
    #[must_use]
    pub const fn id(&self) -> &ODataId {
        &self.0
    }
}

impl Display for ActionTarget {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        self.0.fmt(f)
    }
}

/// Typed action descriptor. `T` is the parameter type, `R` the type of a
/// synchronous result.
#[derive(Deserialize, Debug)]
pub struct Action<T, R> {
    #[serde(rename = "target")]
    pub target: ActionTarget,
    /// Link to the `ActionInfo` resource describing allowed parameters.
    #[serde(rename = "@Redfish.ActionInfo", default)]
    pub action_info: Option<Link>,
    #[serde(skip_deserializing)]
    pub _marker: PhantomData<T>,
    #[serde(skip_deserializing)]
    pub _marker_retval: PhantomData<R>,
}

impl<T: Serialize + Send + Sync, R: DeserializeOwned> Action<T, R> {
    /// Run specific action with parameters passed as argument.
    ///
    /// # Errors
    ///
    /// See [`Client::post_object`].
    pub async fn run<B: Bmc>(
        &self,
        client: &Client<B>,
        params: &T,
    ) -> Result<ActionOutcome<R>, Error<B>> {
        let body = serde_path_to_error::serialize(params, serde_json::value::Serializer)
            .map_err(Error::Json)?;
        client
            .post_object(self.target.id(), &ActionPayload::Json(body), &HeaderMap::new())
            .await
    }

    /// Run the action of `resource` through the client it was loaded with,
    /// conditioned on its ETag like [`Resource::update`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Detached`] if the transport has been dropped,
    /// otherwise see [`Client::post_object`].
    pub async fn run_on<U: EntityType, B: Bmc>(
        &self,
        resource: &Resource<U, B>,
        params: &T,
    ) -> Result<ActionOutcome<R>, Error<B>> {
        let body = serde_path_to_error::serialize(params, serde_json::value::Serializer)
            .map_err(Error::Json)?;
        let client = resource.client()?;
        client
            .post_object(
                self.target.id(),
                &ActionPayload::Json(body),
                &resource.conditional_headers(),
            )
            .await
    }
}

/// All actions of a resource keyed by their `#Namespace.Action` name.
///
/// Use it for actions a schema binding does not know about.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Actions {
    #[serde(flatten)]
    entries: BTreeMap<String, JsonValue>,
}

impl Actions {
    /// Target of the named action, e.g. `"#ComputerSystem.Reset"`.
    #[must_use]
    pub fn target(&self, name: &str) -> Option<ActionTarget> {
        self.entries
            .get(name)
            .and_then(|action| action.get("target"))
            .and_then(JsonValue::as_str)
            .map(|target| ActionTarget::new(target.into()))
    }

    /// Names of advertised actions. The vendor `Oem` object is skipped.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries
            .keys()
            .filter(|name| name.starts_with('#'))
            .map(String::as_str)
    }
}

/// Body of an action request.
#[derive(Debug, Clone)]
pub enum ActionPayload {
    /// JSON parameters object.
    Json(JsonValue),
    /// `multipart/form-data` body, e.g. for `UpdateService` uploads.
    Multipart(Multipart),
}

/// Raw result of [`Client::post_action`].
#[derive(Debug, Clone)]
pub enum ActionResponse {
    /// The action completed; the response is returned as received.
    Completed(BmcResponse),
    /// The action was accepted and runs as a task.
    Accepted(TaskMonitorInfo),
}

/// Decoded result of [`Client::post_object`].
#[derive(Debug, Clone)]
pub enum ActionOutcome<R> {
    /// The action completed; the body decoded as `R`.
    Completed(R),
    /// The action was accepted and runs as a task.
    Accepted(TaskMonitorInfo),
}

impl<R> ActionOutcome<R> {
    /// Synchronous result, if any.
    #[must_use]
    pub fn completed(self) -> Option<R> {
        match self {
            Self::Completed(v) => Some(v),
            Self::Accepted(_) => None,
        }
    }

    /// Task monitor, if the action was accepted.
    #[must_use]
    pub fn accepted(self) -> Option<TaskMonitorInfo> {
        match self {
            Self::Completed(_) => None,
            Self::Accepted(info) => Some(info),
        }
    }
}

/// Placeholder result for actions that return no body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct Empty {}

impl<B: Bmc> Client<B> {
    /// `POST` an action.
    ///
    /// `202 Accepted` with a `Location` header yields
    /// [`ActionResponse::Accepted`]. Any other success status, including a
    /// `202` without `Location`, yields [`ActionResponse::Completed`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Bmc`] if the transport fails or
    /// [`Error::InvalidStatus`] on a non-success status.
    pub async fn post_action(
        &self,
        target: &ODataId,
        payload: &ActionPayload,
        headers: &HeaderMap,
    ) -> Result<ActionResponse, Error<B>> {
        let response = match payload {
            ActionPayload::Json(body) => {
                debug!(uri = %target, "post action");
                self.bmc().post(target, body, headers).await
            }
            ActionPayload::Multipart(form) => {
                debug!(uri = %target, parts = form.parts().len(), "post multipart action");
                self.bmc().post_multipart(target, form, headers).await
            }
        }
        .map_err(Error::Bmc)?;
        if response.status == StatusCode::ACCEPTED {
            match TaskMonitorInfo::from_response(&response, OffsetDateTime::now_utc()) {
                Some(info) => return Ok(ActionResponse::Accepted(info)),
                None => warn!(uri = %target, "202 Accepted without Location header"),
            }
        }
        self.expect_success(response).map(ActionResponse::Completed)
    }

    /// `POST` an action and decode a synchronous result as `R`.
    ///
    /// An empty body decodes as `{}`, so [`Empty`] fits actions that
    /// return nothing.
    ///
    /// # Errors
    ///
    /// Same as [`Client::post_action`], plus [`Error::Json`] if the body
    /// does not decode as `R`.
    pub async fn post_object<R: DeserializeOwned>(
        &self,
        target: &ODataId,
        payload: &ActionPayload,
        headers: &HeaderMap,
    ) -> Result<ActionOutcome<R>, Error<B>> {
        match self.post_action(target, payload, headers).await? {
            ActionResponse::Completed(response) => response
                .json_or_empty()
                .map(ActionOutcome::Completed)
                .map_err(Error::Json),
            ActionResponse::Accepted(info) => Ok(ActionOutcome::Accepted(info)),
        }
    }
}
