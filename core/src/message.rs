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

//! Registry messages carried by tasks and error responses.

use serde::Deserialize;
use serde::Serialize;

/// `Message` object from the Redfish message registry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Registry message identifier, e.g. `Base.1.8.Success`.
    #[serde(rename = "MessageId", default)]
    pub message_id: String,
    /// Human readable text.
    #[serde(rename = "Message", default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Arguments substituted into the registry text.
    #[serde(rename = "MessageArgs", default, skip_serializing_if = "Vec::is_empty")]
    pub message_args: Vec<String>,
    /// Severity, newer schema versions.
    #[serde(rename = "MessageSeverity", default, skip_serializing_if = "Option::is_none")]
    pub message_severity: Option<String>,
    /// Severity, deprecated property still sent by many services.
    #[serde(rename = "Severity", default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
    /// Suggested resolution.
    #[serde(rename = "Resolution", default, skip_serializing_if = "Option::is_none")]
    pub resolution: Option<String>,
    /// JSON pointers to the properties the message is about.
    #[serde(rename = "RelatedProperties", default, skip_serializing_if = "Vec::is_empty")]
    pub related_properties: Vec<String>,
}
