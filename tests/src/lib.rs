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

//! Support library for the runtime integration tests.

/// Merging of JSON fixtures.
pub mod json_merge;
/// Hand written bindings for a few Redfish schemas.
pub mod schema;

#[doc(inline)]
pub use error::Error;
#[doc(inline)]
pub use json_merge::json_merge;

/// Used in tests for `@odata.id` fields.
pub const ODATA_ID: &str = "@odata.id";
/// Used in tests for `@odata.type` fields.
pub const ODATA_TYPE: &str = "@odata.type";

use error::TestError;
use redfish_runtime_bmc_mock::Bmc as MockBmc;
use redfish_runtime_bmc_mock::Expect as MockExpect;
use redfish_runtime_core::Client;
use redfish_runtime_core::ClientConfig;
use std::sync::Arc;

pub type Bmc = MockBmc<TestError>;
pub type Expect = MockExpect<TestError>;

/// Fresh mock together with a client talking to it.
#[must_use]
pub fn new_client() -> (Arc<Bmc>, Client<Bmc>) {
    new_client_with(ClientConfig::default())
}

#[must_use]
pub fn new_client_with(config: ClientConfig) -> (Arc<Bmc>, Client<Bmc>) {
    let bmc = Arc::new(Bmc::default());
    let client = Client::with_config(bmc.clone(), config);
    (bmc, client)
}
