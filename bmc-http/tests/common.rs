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

#[cfg(feature = "reqwest")]
#[allow(dead_code)]
pub mod test_utils {
    use redfish_runtime_bmc_http::reqwest::Client;
    use redfish_runtime_bmc_http::BmcCredentials;
    use redfish_runtime_bmc_http::HttpBmc;
    use redfish_runtime_core::Client as RedfishClient;
    use redfish_runtime_core::Entity;
    use redfish_runtime_core::EntityType;
    use serde::Deserialize;
    use serde::Serialize;
    use std::sync::Arc;
    use url::Url;
    use wiremock::MockServer;

    /// `Basic` authorization of `root:password`.
    pub const BASIC_AUTH: &str = "Basic cm9vdDpwYXNzd29yZA==";

    /// Test resource struct used across integration tests
    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct TestResource {
        #[serde(flatten)]
        pub entity: Entity,
        #[serde(rename = "AssetTag", default)]
        pub asset_tag: Option<String>,
        #[serde(rename = "Value")]
        pub value: i32,
    }

    impl EntityType for TestResource {
        const WRITABLE: Option<&'static [&'static str]> = Some(&["AssetTag"]);

        fn entity(&self) -> &Entity {
            &self.entity
        }
    }

    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
    pub struct ActionRequest {
        #[serde(rename = "ResetType")]
        pub reset_type: String,
    }

    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
    pub struct ActionResult {
        pub result: String,
    }

    pub type TestBmc = HttpBmc<Client>;

    pub fn create_test_bmc(mock_server: &MockServer) -> Arc<TestBmc> {
        let credentials = BmcCredentials::new("root".to_string(), "password".to_string());
        let endpoint = Url::parse(&mock_server.uri()).unwrap();
        Arc::new(HttpBmc::new(Client::new().unwrap(), endpoint, credentials))
    }

    pub fn create_test_client(mock_server: &MockServer) -> RedfishClient<TestBmc> {
        RedfishClient::new(create_test_bmc(mock_server))
    }
}
