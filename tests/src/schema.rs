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

//! Small subset of the Redfish schema, enough to drive the runtime the
//! way generated bindings do.

use redfish_runtime_core::Action;
use redfish_runtime_core::Actions;
use redfish_runtime_core::Empty;
use redfish_runtime_core::Entity;
use redfish_runtime_core::EntityType;
use redfish_runtime_core::Link;
use redfish_runtime_core::Links;
use serde::Deserialize;
use serde::Serialize;

macro_rules! entity_type {
    ($name:ident) => {
        entity_type!($name, None);
    };
    ($name:ident, $writable:expr) => {
        impl EntityType for $name {
            const WRITABLE: Option<&'static [&'static str]> = $writable;

            fn entity(&self) -> &Entity {
                &self.entity
            }
        }
    };
}

/// Service root.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceRoot {
    #[serde(flatten)]
    pub entity: Entity,
    #[serde(rename = "RedfishVersion", default)]
    pub redfish_version: Option<String>,
    #[serde(rename = "Systems", default)]
    pub systems: Link,
    #[serde(rename = "TaskService", default)]
    pub task_service: Link,
}
entity_type!(ServiceRoot);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResetType {
    On,
    ForceOff,
    GracefulRestart,
    ForceRestart,
}

/// Parameters of `#ComputerSystem.Reset`.
#[derive(Debug, Clone, Serialize)]
pub struct ResetParams {
    #[serde(rename = "ResetType")]
    pub reset_type: ResetType,
}

#[derive(Debug, Default, Deserialize)]
pub struct ComputerSystemActions {
    #[serde(rename = "#ComputerSystem.Reset")]
    pub reset: Option<Action<ResetParams, Empty>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Boot {
    #[serde(
        rename = "BootSourceOverrideTarget",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub boot_source_override_target: Option<String>,
    #[serde(
        rename = "BootSourceOverrideEnabled",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub boot_source_override_enabled: Option<String>,
    #[serde(rename = "BootOrder", default)]
    pub boot_order: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ComputerSystemLinks {
    #[serde(rename = "Chassis", default)]
    pub chassis: Links,
    #[serde(rename = "ManagedBy", default)]
    pub managed_by: Links,
}

/// Computer system.
#[derive(Debug, Serialize, Deserialize)]
pub struct ComputerSystem {
    #[serde(flatten)]
    pub entity: Entity,
    #[serde(rename = "AssetTag", default)]
    pub asset_tag: Option<String>,
    #[serde(rename = "PowerState", default, skip_serializing_if = "Option::is_none")]
    pub power_state: Option<String>,
    #[serde(rename = "Boot", default, skip_serializing_if = "Option::is_none")]
    pub boot: Option<Boot>,
    #[serde(rename = "PCIeDevices", default)]
    pub pcie_devices: Links,
    #[serde(rename = "Links", default)]
    pub links: ComputerSystemLinks,
    #[serde(rename = "Actions", default, skip_serializing)]
    pub actions: ComputerSystemActions,
}
entity_type!(
    ComputerSystem,
    Some(&[
        "AssetTag",
        "Boot.BootSourceOverrideTarget",
        "Boot.BootSourceOverrideEnabled",
    ])
);

/// `Actions` of a system read without a typed binding.
#[derive(Debug, Deserialize)]
pub struct UntypedSystem {
    #[serde(flatten)]
    pub entity: Entity,
    #[serde(rename = "Actions", default)]
    pub actions: Actions,
}
entity_type!(UntypedSystem);

/// Network protocol settings of a manager service.
#[derive(Debug, Serialize, Deserialize)]
pub struct ProtocolService {
    #[serde(flatten)]
    pub entity: Entity,
    #[serde(rename = "ServiceEnabled", default)]
    pub service_enabled: Option<bool>,
    #[serde(rename = "Port", default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
}
entity_type!(ProtocolService, Some(&["ServiceEnabled"]));

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PcieDeviceLinks {
    #[serde(rename = "PCIeFunctions", default)]
    pub pcie_functions: Links,
}

/// PCIe device.
#[derive(Debug, Serialize, Deserialize)]
pub struct PcieDevice {
    #[serde(flatten)]
    pub entity: Entity,
    #[serde(rename = "Manufacturer", default)]
    pub manufacturer: Option<String>,
    #[serde(rename = "Links", default)]
    pub links: PcieDeviceLinks,
}
entity_type!(PcieDevice);

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PcieFunctionLinks {
    #[serde(rename = "PCIeDevice", default)]
    pub pcie_device: Link,
    #[serde(rename = "Endpoints", default)]
    pub endpoints: Links,
}

/// PCIe function. Some services report `FunctionId` as a string.
#[derive(Debug, Serialize, Deserialize)]
pub struct PcieFunction {
    #[serde(flatten)]
    pub entity: Entity,
    #[serde(
        rename = "FunctionId",
        default,
        deserialize_with = "redfish_runtime_core::lenient::int"
    )]
    pub function_id: Option<i64>,
    #[serde(rename = "Links", default)]
    pub links: PcieFunctionLinks,
}
entity_type!(PcieFunction);

/// Fabric endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct Endpoint {
    #[serde(flatten)]
    pub entity: Entity,
    #[serde(rename = "EndpointProtocol", default)]
    pub endpoint_protocol: Option<String>,
}
entity_type!(Endpoint);

/// Result body of a firmware update task.
#[derive(Debug, Deserialize, PartialEq)]
pub struct UpdateResult {
    #[serde(rename = "Status")]
    pub status: String,
}
