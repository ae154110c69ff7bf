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

//! Tasks and task monitors
//!
//! A long running action answers `202 Accepted` with a task monitor URI in
//! `Location`. The monitor keeps answering `202` (usually with the current
//! [`Task`] in the body) while the task runs; the first other status is
//! the final result of the action.
//!
//! [`Client::wait_for_task_monitor`] polls the monitor until then. Every
//! suspension (the initial `Retry-After` wait, the pause between polls,
//! each request and each observer delivery) ends early when the
//! cancellation token fires.

use crate::retry_after::until;
use crate::Bmc;
use crate::BmcResponse;
use crate::Client;
use crate::EdmDateTimeOffset;
use crate::Entity;
use crate::EntityType;
use crate::Error;
use crate::Message;
use crate::ODataId;
use crate::RetryAfter;
use http::header;
use http::HeaderMap;
use http::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde::Serialize;
use std::time::Duration;
use time::OffsetDateTime;
use tokio::sync::mpsc;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::debug;
use tracing::trace;
use tracing::warn;

/// State of a Redfish task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskState {
    New,
    Starting,
    Running,
    Suspended,
    Interrupted,
    Pending,
    Stopping,
    Completed,
    Killed,
    Exception,
    Service,
    Cancelling,
    Cancelled,
    /// State not known to this version of the runtime.
    #[serde(other)]
    Unknown,
}

impl TaskState {
    /// The task will not change state anymore.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(
            self,
            Self::Completed | Self::Killed | Self::Exception | Self::Cancelled
        )
    }
}

/// Redfish `Task` resource.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Task {
    #[serde(flatten)]
    pub entity: Entity,
    #[serde(rename = "TaskState", default, skip_serializing_if = "Option::is_none")]
    pub task_state: Option<TaskState>,
    /// Health of the task (`OK`, `Warning`, `Critical`).
    #[serde(rename = "TaskStatus", default, skip_serializing_if = "Option::is_none")]
    pub task_status: Option<String>,
    #[serde(rename = "PercentComplete", default, skip_serializing_if = "Option::is_none")]
    pub percent_complete: Option<u32>,
    #[serde(rename = "StartTime", default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<EdmDateTimeOffset>,
    #[serde(rename = "EndTime", default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<EdmDateTimeOffset>,
    /// Monitor URI of the task.
    #[serde(rename = "TaskMonitor", default, skip_serializing_if = "Option::is_none")]
    pub task_monitor: Option<String>,
    #[serde(rename = "Messages", default, skip_serializing_if = "Vec::is_empty")]
    pub messages: Vec<Message>,
    /// The service hides the action payload of this task.
    #[serde(rename = "HidePayload", default, skip_serializing_if = "Option::is_none")]
    pub hide_payload: Option<bool>,
}

impl EntityType for Task {
    fn entity(&self) -> &Entity {
        &self.entity
    }
}

/// Where to poll an accepted action.
#[derive(Debug, Clone)]
pub struct TaskMonitorInfo {
    /// Task monitor URI from `Location`. Never empty when produced by
    /// [`Client::post_action`].
    pub monitor: ODataId,
    /// Earliest instant the service wants to be polled.
    pub retry_after: Option<OffsetDateTime>,
    /// Task snapshot from the `202` body, when it names itself.
    pub task: Option<Task>,
}

impl TaskMonitorInfo {
    #[must_use]
    pub const fn new(monitor: ODataId) -> Self {
        Self {
            monitor,
            retry_after: None,
            task: None,
        }
    }

    /// Build from a `202 Accepted` response. `None` if the response has no
    /// usable `Location` header.
    #[must_use]
    pub fn from_response(response: &BmcResponse, now: OffsetDateTime) -> Option<Self> {
        let monitor = ODataId::from(response.header(header::LOCATION)?);
        let retry_after = response
            .header(header::RETRY_AFTER)
            .and_then(|value| match RetryAfter::parse(value) {
                Some(retry_after) => retry_after.instant(now),
                None => {
                    warn!(value, "ignoring unparsable Retry-After");
                    None
                }
            });
        let task = response
            .json::<Task>()
            .ok()
            .filter(|task| !task.odata_id().is_empty());
        Some(Self {
            monitor,
            retry_after,
            task,
        })
    }
}

/// Sleep for `delay` unless `cancel` fires first. Returns `false` when
/// cancelled.
async fn sleep_unless_cancelled(cancel: &CancellationToken, delay: Duration) -> bool {
    tokio::select! {
        biased;
        () = cancel.cancelled() => false,
        () = sleep(delay) => true,
    }
}

impl<B: Bmc> Client<B> {
    /// Poll a task monitor until it stops answering `202 Accepted` and
    /// return that final response, whatever its status.
    ///
    /// A zero `default_interval` selects
    /// [`crate::ClientConfig::task_poll_interval`]. A `Retry-After` on a
    /// `202` overrides the interval for the next pause.
    ///
    /// While polling, every `202` body is decoded as a [`Task`] and sent to
    /// `observer` (`None` when it does not decode). The observer is never
    /// closed here; a receiver that went away is ignored.
    ///
    /// # Errors
    ///
    /// - [`Error::MissingTaskMonitor`] if `info` has no monitor URI;
    /// - [`Error::Cancelled`] if `cancel` fires;
    /// - [`Error::Bmc`] if a poll fails in the transport.
    pub async fn wait_for_task_monitor(
        &self,
        cancel: &CancellationToken,
        default_interval: Duration,
        info: &TaskMonitorInfo,
        observer: Option<&mpsc::Sender<Option<Task>>>,
    ) -> Result<BmcResponse, Error<B>> {
        if info.monitor.is_empty() {
            return Err(Error::MissingTaskMonitor);
        }
        let interval = if default_interval == Duration::ZERO {
            self.config().task_poll_interval
        } else {
            default_interval
        };

        if let Some(at) = info.retry_after {
            let delay = until(at, OffsetDateTime::now_utc());
            trace!(?delay, "initial Retry-After wait");
            if !sleep_unless_cancelled(cancel, delay).await {
                return Err(Error::Cancelled);
            }
        }

        loop {
            if cancel.is_cancelled() {
                return Err(Error::Cancelled);
            }
            debug!(uri = %info.monitor, "poll task monitor");
            let response = tokio::select! {
                biased;
                () = cancel.cancelled() => return Err(Error::Cancelled),
                response = self.bmc().get(&info.monitor) => response.map_err(Error::Bmc)?,
            };
            if response.status != StatusCode::ACCEPTED {
                trace!(status = %response.status, "task monitor finished");
                return Ok(response);
            }

            if let Some(observer) = observer {
                let task = match response.json::<Task>() {
                    Ok(task) => Some(task),
                    Err(err) => {
                        trace!(%err, "task monitor body is not a task");
                        None
                    }
                };
                tokio::select! {
                    biased;
                    () = cancel.cancelled() => return Err(Error::Cancelled),
                    sent = observer.send(task) => {
                        if sent.is_err() {
                            trace!("task observer is closed");
                        }
                    }
                }
            }

            let delay = match response.header(header::RETRY_AFTER) {
                Some(value) => match RetryAfter::parse(value) {
                    Some(retry_after) => retry_after.delay(OffsetDateTime::now_utc()),
                    None => {
                        warn!(value, "ignoring unparsable Retry-After");
                        interval
                    }
                },
                None => interval,
            };
            trace!(?delay, "next task monitor poll");
            if !sleep_unless_cancelled(cancel, delay).await {
                return Err(Error::Cancelled);
            }
        }
    }

    /// Poll a task monitor and decode the final body as `T`.
    ///
    /// Returns the decoded value together with the headers of the final
    /// response. An empty final body decodes as `{}`.
    ///
    /// # Errors
    ///
    /// Same as [`Client::wait_for_task_monitor`], plus
    /// [`Error::InvalidStatus`] if the final status is not a success and
    /// [`Error::Json`] if the body does not decode as `T`.
    pub async fn wait_for_task_monitor_object<T: DeserializeOwned>(
        &self,
        cancel: &CancellationToken,
        default_interval: Duration,
        info: &TaskMonitorInfo,
        observer: Option<&mpsc::Sender<Option<Task>>>,
    ) -> Result<(T, HeaderMap), Error<B>> {
        let response = self
            .wait_for_task_monitor(cancel, default_interval, info, observer)
            .await?;
        let response = self.expect_success(response)?;
        let value = response.json_or_empty().map_err(Error::Json)?;
        Ok((value, response.headers))
    }
}
