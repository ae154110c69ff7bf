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

//! Schema-agnostic Redfish client runtime.
//!
//! Schema bindings (plain serde types implementing [`EntityType`]) plug
//! into four engines:
//!
//! - link decoding ([`Link`], [`Links`], [`CollectionPage`]);
//! - navigation ([`Client::get_object`], [`Client::get_objects`],
//!   [`Client::get_collection_objects`] and the link-following methods
//!   of [`Resource`]), optionally with [`Query`] options;
//! - partial updates ([`Resource::update`]);
//! - actions and task monitors ([`Client::post_action`],
//!   [`Client::post_object`], [`Client::wait_for_task_monitor`]).
//!
//! HTTP is abstracted by the [`Bmc`] trait.

/// Action descriptors and invocation.
pub mod action;
/// Transport trait and raw responses.
pub mod bmc;
/// Navigator client.
pub mod client;
/// Runtime configuration.
pub mod config;
/// Type for `Edm.DateTimeOffset` values.
pub mod edm_date_time_offset;
/// Entity base and the schema-type trait.
pub mod entity;
/// Runtime errors.
pub mod error;
/// Field decoders tolerant to inconsistent services.
pub mod lenient;
/// Link decoder.
pub mod link;
/// Registry messages.
pub mod message;
/// Collection member navigation property.
pub mod nav_property;
/// OData identifiers.
pub mod odata;
/// OData query options.
pub mod query;
/// Resource wrapper.
pub mod resource;
/// `Retry-After` parsing.
pub mod retry_after;
/// Tasks and task monitor polling.
pub mod task;
/// Partial update engine.
pub mod update;

#[doc(inline)]
pub use action::Action;
#[doc(inline)]
pub use action::ActionOutcome;
#[doc(inline)]
pub use action::ActionPayload;
#[doc(inline)]
pub use action::ActionResponse;
#[doc(inline)]
pub use action::ActionTarget;
#[doc(inline)]
pub use action::Actions;
#[doc(inline)]
pub use action::Empty;
#[doc(inline)]
pub use bmc::Bmc;
#[doc(inline)]
pub use bmc::BmcResponse;
#[doc(inline)]
pub use bmc::Multipart;
#[doc(inline)]
pub use bmc::Part;
#[doc(inline)]
pub use client::Client;
#[doc(inline)]
pub use config::ClientConfig;
#[doc(inline)]
pub use edm_date_time_offset::EdmDateTimeOffset;
#[doc(inline)]
pub use entity::Entity;
#[doc(inline)]
pub use entity::EntityType;
#[doc(inline)]
pub use entity::Oem;
#[doc(inline)]
pub use entity::ResourceDescription;
#[doc(inline)]
pub use entity::ResourceId;
#[doc(inline)]
pub use entity::ResourceName;
#[doc(inline)]
pub use error::Error;
#[doc(inline)]
pub use error::RedfishError;
#[doc(inline)]
pub use error::ServiceError;
#[doc(inline)]
pub use link::CollectionPage;
#[doc(inline)]
pub use link::Link;
#[doc(inline)]
pub use link::LinkError;
#[doc(inline)]
pub use link::Links;
#[doc(inline)]
pub use message::Message;
#[doc(inline)]
pub use nav_property::NavProperty;
#[doc(inline)]
pub use odata::ODataETag;
#[doc(inline)]
pub use odata::ODataId;
#[doc(inline)]
pub use odata::ODataType;
#[doc(inline)]
pub use query::Query;
#[doc(inline)]
pub use resource::Resource;
#[doc(inline)]
pub use retry_after::RetryAfter;
#[doc(inline)]
pub use task::Task;
#[doc(inline)]
pub use task::TaskMonitorInfo;
#[doc(inline)]
pub use task::TaskState;

/// Reexport so that schema bindings and transports name the same
/// cancellation type.
pub use tokio_util::sync::CancellationToken;
