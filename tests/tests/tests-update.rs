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

use redfish_runtime_bmc_mock::Reply;
use redfish_runtime_bmc_mock::Request;
use redfish_runtime_core::ClientConfig;
use redfish_runtime_core::Error as RuntimeError;
use redfish_runtime_tests::new_client;
use redfish_runtime_tests::new_client_with;
use redfish_runtime_tests::schema::ComputerSystem;
use redfish_runtime_tests::schema::Endpoint;
use redfish_runtime_tests::schema::ProtocolService;
use redfish_runtime_tests::Error;
use redfish_runtime_tests::Expect;
use redfish_runtime_tests::ODATA_ID;
use redfish_runtime_tests::ODATA_TYPE;
use redfish_runtime_tests::json_merge;

use serde_json::json;
use serde_json::Value as JsonValue;
use tokio::test;

const SSH_ID: &str = "/redfish/v1/Managers/BMC/NetworkProtocol/SSH";
const SYSTEM_ID: &str = "/redfish/v1/Systems/1";

fn system_json() -> JsonValue {
    json!({
        ODATA_ID: SYSTEM_ID,
        ODATA_TYPE: "#ComputerSystem.v1_20_0.ComputerSystem",
        "@odata.etag": "W/\"1\"",
        "Id": "1",
        "AssetTag": "rack-1",
        "PowerState": "On",
        "Boot": {
            "BootSourceOverrideTarget": "None",
            "BootSourceOverrideEnabled": "Disabled",
            "BootOrder": ["Boot0001", "Boot0002"],
        },
    })
}

fn patches(bmc: &redfish_runtime_tests::Bmc) -> Vec<JsonValue> {
    bmc.history()
        .into_iter()
        .filter_map(|r| match r.request {
            Request::Patch { request, .. } => Some(request),
            _ => None,
        })
        .collect()
}

// Unchanged writable property issues no request at all.
#[test]
async fn update_noop_test() -> Result<(), Error> {
    let (bmc, client) = new_client();
    bmc.expect(Expect::get(SSH_ID, json!({ ODATA_ID: SSH_ID, "ServiceEnabled": true })));
    let ssh = client
        .get_object::<ProtocolService>(&SSH_ID.into())
        .await?
        .ok_or(Error::ExpectedProperty("ssh"))?;
    ssh.update().await?;
    assert_eq!(bmc.history().len(), 1);
    assert!(bmc.is_satisfied());
    Ok(())
}

// Only the changed writable property is sent; unknown and read-only
// baseline fields are left alone.
#[test]
async fn update_change_test() -> Result<(), Error> {
    let (bmc, client) = new_client();
    bmc.expect(Expect::get(
        SSH_ID,
        json!({ ODATA_ID: SSH_ID, "ServiceEnabled": true, "OtherField": "x" }),
    ));
    bmc.expect(Expect::patch(
        SSH_ID,
        json!({ "ServiceEnabled": false }),
        Reply::no_content(),
    ));
    let mut ssh = client
        .get_object::<ProtocolService>(&SSH_ID.into())
        .await?
        .ok_or(Error::ExpectedProperty("ssh"))?;
    ssh.service_enabled = Some(false);
    ssh.update().await?;
    assert!(bmc.is_satisfied());
    assert_eq!(patches(&bmc), vec![json!({ "ServiceEnabled": false })]);
    Ok(())
}

// Nested writable paths produce nested patch objects. Read-only
// properties changed locally are not sent.
#[test]
async fn update_nested_test() -> Result<(), Error> {
    let (bmc, client) = new_client();
    bmc.expect(Expect::get(SYSTEM_ID, system_json()));
    bmc.expect(Expect::patch(
        SYSTEM_ID,
        json!({
            "AssetTag": "rack-2",
            "Boot": { "BootSourceOverrideTarget": "Pxe" },
        }),
        Reply::ok("{}"),
    ));
    let mut system = client
        .get_object::<ComputerSystem>(&SYSTEM_ID.into())
        .await?
        .ok_or(Error::ExpectedProperty("system"))?;
    system.asset_tag = Some("rack-2".into());
    system.power_state = Some("Off".into());
    let boot = system.boot.as_mut().ok_or(Error::ExpectedProperty("boot"))?;
    boot.boot_source_override_target = Some("Pxe".into());
    boot.boot_order.reverse();
    system.update().await?;
    assert!(bmc.is_satisfied());
    Ok(())
}

// Clearing a writable property sends `null`.
#[test]
async fn update_clear_property_test() -> Result<(), Error> {
    let (bmc, client) = new_client();
    bmc.expect(Expect::get(SYSTEM_ID, system_json()));
    bmc.expect(Expect::patch(
        SYSTEM_ID,
        json!({ "AssetTag": null }),
        Reply::no_content(),
    ));
    let mut system = client
        .get_object::<ComputerSystem>(&SYSTEM_ID.into())
        .await?
        .ok_or(Error::ExpectedProperty("system"))?;
    system.asset_tag = None;
    system.update().await?;
    assert!(bmc.is_satisfied());
    Ok(())
}

// Known ETag goes into `If-Match` unless switched off.
#[test]
async fn update_if_match_test() -> Result<(), Error> {
    for etag_match in [true, false].iter() {
        let (bmc, client) = new_client_with(ClientConfig::new().etag_match(*etag_match));
        bmc.expect(Expect::get(SYSTEM_ID, system_json()));
        bmc.expect(Expect::patch(
            SYSTEM_ID,
            json!({ "AssetTag": "rack-3" }),
            Reply::no_content(),
        ));
        let mut system = client
            .get_object::<ComputerSystem>(&SYSTEM_ID.into())
            .await?
            .ok_or(Error::ExpectedProperty("system"))?;
        system.asset_tag = Some("rack-3".into());
        system.update().await?;

        let history = bmc.history();
        let if_match = history[1]
            .headers
            .get("if-match")
            .and_then(|v| v.to_str().ok());
        if *etag_match {
            assert_eq!(if_match, Some("W/\"1\""));
        } else {
            assert_eq!(if_match, None);
        }
    }
    Ok(())
}

// Services that only match bare tags get the ETag without its quotes.
#[test]
async fn update_strip_etag_quotes_test() -> Result<(), Error> {
    let (bmc, client) = new_client_with(ClientConfig::new().strip_etag_quotes(true));
    bmc.expect(Expect::get(
        SSH_ID,
        json!({ ODATA_ID: SSH_ID, "@odata.etag": "\"5\"", "ServiceEnabled": true }),
    ));
    bmc.expect(Expect::patch(
        SSH_ID,
        json!({ "ServiceEnabled": false }),
        Reply::no_content(),
    ));
    bmc.expect(Expect::get(SYSTEM_ID, system_json()));
    bmc.expect(Expect::patch(
        SYSTEM_ID,
        json!({ "AssetTag": "rack-9" }),
        Reply::no_content(),
    ));
    let mut ssh = client
        .get_object::<ProtocolService>(&SSH_ID.into())
        .await?
        .ok_or(Error::ExpectedProperty("ssh"))?;
    ssh.service_enabled = Some(false);
    ssh.update().await?;
    let mut system = client
        .get_object::<ComputerSystem>(&SYSTEM_ID.into())
        .await?
        .ok_or(Error::ExpectedProperty("system"))?;
    system.asset_tag = Some("rack-9".into());
    system.update().await?;

    let if_match = bmc
        .history()
        .into_iter()
        .filter(|r| matches!(r.request, Request::Patch { .. }))
        .map(|r| r.headers.get("if-match").and_then(|v| v.to_str().ok()).map(String::from))
        .collect::<Vec<_>>();
    assert_eq!(if_match, vec![Some("5".to_string()), Some("W/1".to_string())]);
    assert!(bmc.is_satisfied());
    Ok(())
}

// Types without writable properties refuse to update.
#[test]
async fn update_read_only_test() -> Result<(), Error> {
    let (bmc, client) = new_client();
    bmc.expect(Expect::get("/E/1", json!({ ODATA_ID: "/E/1" })));
    let endpoint = client
        .get_object::<Endpoint>(&"/E/1".into())
        .await?
        .ok_or(Error::ExpectedProperty("endpoint"))?;
    match endpoint.update().await {
        Err(RuntimeError::ReadOnly) => {}
        other => panic!("unexpected result: {other:?}"),
    }
    assert_eq!(bmc.history().len(), 1);
    Ok(())
}

// Rejected PATCH surfaces the service error.
#[test]
async fn update_rejected_test() -> Result<(), Error> {
    let (bmc, client) = new_client();
    bmc.expect(Expect::get(SSH_ID, json!({ ODATA_ID: SSH_ID, "ServiceEnabled": true })));
    bmc.expect(Expect::patch(
        SSH_ID,
        json!({ "ServiceEnabled": false }),
        Reply::new(
            412,
            json!({
                "error": {
                    "code": "Base.1.8.PreconditionFailed",
                    "message": "The ETag supplied did not match.",
                }
            }),
        ),
    ));
    let mut ssh = client
        .get_object::<ProtocolService>(&SSH_ID.into())
        .await?
        .ok_or(Error::ExpectedProperty("ssh"))?;
    ssh.service_enabled = Some(false);
    match ssh.update().await {
        Err(RuntimeError::InvalidStatus(err)) => {
            assert_eq!(err.status, 412);
            assert!(err.to_string().contains("PreconditionFailed"));
        }
        other => panic!("unexpected result: {other:?}"),
    }
    Ok(())
}

// Refresh re-reads value, ETag and baseline.
#[test]
async fn refresh_test() -> Result<(), Error> {
    let (bmc, client) = new_client();
    bmc.expect(Expect::get(SYSTEM_ID, system_json()));
    let refreshed = json_merge(&[
        system_json(),
        json!({ "@odata.etag": "W/\"2\"", "AssetTag": "rack-9" }),
    ]);
    bmc.expect(Expect::get(SYSTEM_ID, refreshed));
    let mut system = client
        .get_object::<ComputerSystem>(&SYSTEM_ID.into())
        .await?
        .ok_or(Error::ExpectedProperty("system"))?;
    system.asset_tag = Some("local".into());
    system.refresh().await?;
    assert_eq!(system.asset_tag.as_deref(), Some("rack-9"));
    assert_eq!(system.etag().map(|e| e.as_str()), Some("W/\"2\""));
    // Refreshed baseline matches the value: nothing to send.
    system.update().await?;
    assert!(bmc.is_satisfied());
    Ok(())
}

#[test]
async fn delete_test() -> Result<(), Error> {
    let (bmc, client) = new_client();
    let session = "/redfish/v1/SessionService/Sessions/7";
    bmc.expect(Expect::get(session, json!({ ODATA_ID: session, "Id": "7" })));
    bmc.expect(Expect::delete(session, Reply::no_content()));
    let resource = client
        .get_object::<Endpoint>(&session.into())
        .await?
        .ok_or(Error::ExpectedProperty("session"))?;
    resource.delete().await?;
    assert!(bmc.is_satisfied());
    Ok(())
}
