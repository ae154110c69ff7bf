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

use redfish_runtime_core::ClientConfig;
use redfish_runtime_core::Error as RuntimeError;
use redfish_runtime_core::query::ExpandQuery;
use redfish_runtime_core::ODataId;
use redfish_runtime_core::Query;
use redfish_runtime_tests::new_client;
use redfish_runtime_tests::new_client_with;
use redfish_runtime_tests::schema::ComputerSystem;
use redfish_runtime_tests::schema::Endpoint;
use redfish_runtime_tests::schema::ServiceRoot;
use redfish_runtime_tests::Error;
use redfish_runtime_tests::Expect;
use redfish_runtime_tests::ODATA_ID;
use redfish_runtime_tests::ODATA_TYPE;

use serde_json::json;
use serde_json::Value as JsonValue;
use tokio::test;

const SYSTEMS: &str = "/redfish/v1/Systems";

fn page(members: &[&str], next: Option<&str>) -> JsonValue {
    let mut page = json!({
        ODATA_ID: SYSTEMS,
        ODATA_TYPE: "#ComputerSystemCollection.ComputerSystemCollection",
        "Members": members.iter().map(|id| json!({ ODATA_ID: id })).collect::<Vec<_>>(),
        "Members@odata.count": 3,
    });
    if let Some(next) = next {
        page["Members@odata.nextLink"] = json!(next);
    }
    page
}

fn system(id: &str) -> JsonValue {
    json!({
        ODATA_ID: id,
        ODATA_TYPE: "#ComputerSystem.v1_20_0.ComputerSystem",
        "Id": id.rsplit('/').next(),
        "AssetTag": "",
    })
}

fn requested(bmc: &redfish_runtime_tests::Bmc) -> Vec<String> {
    bmc.history()
        .into_iter()
        .map(|r| r.request.id().to_string())
        .collect()
}

// Pages are walked through nextLink, an empty page in the middle
// included, and members come back in page order.
#[test]
async fn paged_collection_test() -> Result<(), Error> {
    let (bmc, client) = new_client();
    let page2 = "/redfish/v1/Systems?$skip=1";
    let page3 = "/redfish/v1/Systems?$skip=2";
    bmc.expect(Expect::get(SYSTEMS, page(&["/S/1"], Some(page2))));
    bmc.expect(Expect::get("/S/1", system("/S/1")));
    bmc.expect(Expect::get(page2, page(&[], Some(page3))));
    bmc.expect(Expect::get(page3, page(&["/S/2", "/S/3"], None)));
    bmc.expect(Expect::get("/S/2", system("/S/2")));
    bmc.expect(Expect::get("/S/3", system("/S/3")));

    let systems = client
        .get_collection_objects::<ComputerSystem>(&SYSTEMS.into())
        .await?;
    assert_eq!(
        systems
            .iter()
            .map(|s| s.odata_id().to_string())
            .collect::<Vec<_>>(),
        vec!["/S/1", "/S/2", "/S/3"]
    );
    assert!(bmc.is_satisfied());
    Ok(())
}

// Query options go on the first page only; the service's nextLink is
// followed untouched and expanded members need no further requests.
#[test]
async fn collection_query_test() -> Result<(), Error> {
    let (bmc, client) = new_client();
    let first = "/redfish/v1/Systems?$expand=.($levels=1)&$top=2";
    let second = "/redfish/v1/Systems?$expand=.($levels=1)&$skip=2&$top=2";
    let mut page1 = page(&[], Some(second));
    page1["Members"] = json!([system("/S/1"), system("/S/2")]);
    let mut page2 = page(&[], None);
    page2["Members"] = json!([system("/S/3")]);
    bmc.expect(Expect::get(first, page1));
    bmc.expect(Expect::get(second, page2));

    let query = Query::new().expand(ExpandQuery::current()).top(2);
    let systems = client
        .get_collection_objects_with::<ComputerSystem>(&SYSTEMS.into(), &query)
        .await?;
    assert_eq!(systems.len(), 3);
    assert_eq!(requested(&bmc), vec![first, second]);
    Ok(())
}

// A single object fetch carries its options in the request URI.
#[test]
async fn object_query_test() -> Result<(), Error> {
    let (bmc, client) = new_client();
    bmc.expect(Expect::get("/S/1?$select=AssetTag,PowerState", system("/S/1")));
    let query = Query::new().select(&["AssetTag", "PowerState"]);
    let system = client
        .get_object_with::<ComputerSystem>(&"/S/1".into(), &query)
        .await?
        .ok_or(Error::ExpectedProperty("system"))?;
    assert_eq!(system.odata_id().as_str(), "/S/1");

    assert!(client
        .get_object_with::<ComputerSystem>(&ODataId::default(), &query)
        .await?
        .is_none());
    assert_eq!(requested(&bmc), vec!["/S/1?$select=AssetTag,PowerState"]);
    Ok(())
}

// Collection reached from a link of another resource.
#[test]
async fn follow_collection_test() -> Result<(), Error> {
    let (bmc, client) = new_client();
    bmc.expect(Expect::get(
        "/redfish/v1",
        json!({ ODATA_ID: "/redfish/v1", "Systems": { ODATA_ID: SYSTEMS } }),
    ));
    bmc.expect(Expect::get(SYSTEMS, page(&["/S/1"], None)));
    bmc.expect(Expect::get("/S/1", system("/S/1")));
    let root = client.service_root::<ServiceRoot>().await?;
    let systems = root.follow_collection::<ComputerSystem>(&root.systems).await?;
    assert_eq!(systems.len(), 1);
    assert_eq!(
        systems[0].entity.id.as_ref().map(ToString::to_string),
        Some("1".to_string())
    );
    Ok(())
}

// Older services list members under `Links.Members`.
#[test]
async fn links_members_test() -> Result<(), Error> {
    let (bmc, client) = new_client();
    bmc.expect(Expect::get(
        SYSTEMS,
        json!({ ODATA_ID: SYSTEMS, "Links": { "Members": [{ ODATA_ID: "/S/1" }] } }),
    ));
    bmc.expect(Expect::get("/S/1", system("/S/1")));
    let systems = client
        .get_collection_objects::<ComputerSystem>(&SYSTEMS.into())
        .await?;
    assert_eq!(systems.len(), 1);
    Ok(())
}

// Inline members are decoded from the page and keep a raw snapshot.
#[test]
async fn expanded_members_test() -> Result<(), Error> {
    let (bmc, client) = new_client();
    bmc.expect(Expect::get(
        SYSTEMS,
        json!({
            ODATA_ID: SYSTEMS,
            "Members": [system("/S/1"), { ODATA_ID: "/S/2" }],
        }),
    ));
    bmc.expect(Expect::get("/S/2", system("/S/2")));
    let systems = client
        .get_collection_objects::<ComputerSystem>(&SYSTEMS.into())
        .await?;
    assert_eq!(systems.len(), 2);
    assert_eq!(requested(&bmc), vec![SYSTEMS, "/S/2"]);
    let raw: JsonValue = serde_json::from_slice(
        systems[0]
            .raw_data()
            .ok_or(Error::ExpectedProperty("raw_data"))?,
    )
    .map_err(|_| Error::ExpectedProperty("raw json"))?;
    assert_eq!(raw, system("/S/1"));
    Ok(())
}

#[test]
async fn empty_collection_test() -> Result<(), Error> {
    let (bmc, client) = new_client();
    bmc.expect(Expect::get(SYSTEMS, json!({ ODATA_ID: SYSTEMS, "Members": [] })));
    let systems = client
        .get_collection_objects::<Endpoint>(&SYSTEMS.into())
        .await?;
    assert!(systems.is_empty());

    let systems = client
        .get_collection_objects::<Endpoint>(&ODataId::default())
        .await?;
    assert!(systems.is_empty());
    assert_eq!(bmc.history().len(), 1);
    Ok(())
}

// A page naming itself as continuation stops the walk.
#[test]
async fn next_link_loop_test() -> Result<(), Error> {
    let (bmc, client) = new_client();
    bmc.expect(Expect::get(SYSTEMS, page(&["/S/1"], Some(SYSTEMS))));
    match client
        .get_collection_objects::<ComputerSystem>(&SYSTEMS.into())
        .await
    {
        Err(RuntimeError::NextLinkLoop(id)) => assert_eq!(id.as_str(), SYSTEMS),
        other => panic!("unexpected result: {other:?}"),
    }
    Ok(())
}

// Walks longer than the configured page cap fail.
#[test]
async fn page_limit_test() -> Result<(), Error> {
    let (bmc, client) = new_client_with(ClientConfig::new().max_collection_pages(2));
    bmc.expect(Expect::get(SYSTEMS, page(&[], Some("/P/2"))));
    bmc.expect(Expect::get("/P/2", page(&[], Some("/P/3"))));
    match client
        .get_collection_objects::<ComputerSystem>(&SYSTEMS.into())
        .await
    {
        Err(RuntimeError::PageLimit(pages)) => assert_eq!(pages, 2),
        other => panic!("unexpected result: {other:?}"),
    }
    assert!(bmc.is_satisfied());
    Ok(())
}

// Members that are neither links nor objects are rejected.
#[test]
async fn malformed_page_test() -> Result<(), Error> {
    let (bmc, client) = new_client();
    bmc.expect(Expect::get(SYSTEMS, json!({ "Members": ["/S/1"] })));
    match client
        .get_collection_objects::<ComputerSystem>(&SYSTEMS.into())
        .await
    {
        Err(RuntimeError::MalformedLink(_)) => {}
        other => panic!("unexpected result: {other:?}"),
    }
    Ok(())
}
