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

//! Partial update engine
//!
//! A `PATCH` body is the difference between the value the application
//! holds now and the raw snapshot of the last `GET`, projected onto the
//! writable properties of the type:
//!
//! ```rust
//! use redfish_runtime_core::update::patch_payload;
//! use serde_json::json;
//!
//! let baseline = json!({"ServiceEnabled": true, "OtherField": "x"});
//! let current = json!({"ServiceEnabled": false, "OtherField": "y"});
//! let patch = patch_payload(&current, &baseline, &["ServiceEnabled"]);
//! assert_eq!(serde_json::Value::Object(patch), json!({"ServiceEnabled": false}));
//! ```
//!
//! Successful updates do not touch the snapshot. Call
//! [`Resource::refresh`] before the next mutate-then-update cycle.

use crate::bmc::decode;
use crate::Bmc;
use crate::EntityType;
use crate::Error;
use crate::Resource;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value as JsonValue;
use tracing::debug;

/// Compute the minimal patch of `current` against `baseline`.
///
/// For every entry of `writable` (a property name or a dotted path) the
/// current value is included when it differs from the baseline. Entries
/// absent on both sides are skipped. A property present only in the
/// baseline is sent as `null`.
///
/// Overlapping entries such as `"Boot"` and `"Boot.BootOrder"` are allowed.
/// When the whole property changed it is sent whole, in whatever order the
/// entries are listed, since its value already carries every nested change.
#[must_use]
pub fn patch_payload(
    current: &JsonValue,
    baseline: &JsonValue,
    writable: &[&str],
) -> Map<String, JsonValue> {
    let mut patch = Map::new();
    for path in writable {
        let now = lookup(current, path);
        let before = lookup(baseline, path);
        if now.is_none() && before.is_none() {
            continue;
        }
        let now = now.cloned().unwrap_or(JsonValue::Null);
        if Some(&now) != before && !(now.is_null() && before.is_none()) {
            insert(&mut patch, path, now);
        }
    }
    patch
}

fn lookup<'a>(value: &'a JsonValue, path: &str) -> Option<&'a JsonValue> {
    path.split('.').try_fold(value, |value, key| value.get(key))
}

fn insert(patch: &mut Map<String, JsonValue>, path: &str, value: JsonValue) {
    match path.split_once('.') {
        None => {
            patch.insert(path.to_string(), value);
        }
        Some((head, rest)) => {
            let nested = patch
                .entry(head)
                .or_insert_with(|| JsonValue::Object(Map::new()));
            // A non-object here is a whole value set by an enclosing entry.
            if let JsonValue::Object(nested) = nested {
                insert(nested, rest, value);
            }
        }
    }
}

impl<T: EntityType + Serialize, B: Bmc> Resource<T, B> {
    /// Send the changes made to this resource since it was loaded.
    ///
    /// No request is issued when nothing writable has changed. The local
    /// value and snapshot stay as they are in every case.
    ///
    /// # Errors
    ///
    /// - [`Error::ReadOnly`] if `T` has no writable properties;
    /// - [`Error::MissingODataId`] if the resource has no self-URI;
    /// - [`Error::Detached`] if the transport has been dropped;
    /// - [`Error::InvalidStatus`] if the service rejects the `PATCH`.
    pub async fn update(&self) -> Result<(), Error<B>> {
        let writable = T::WRITABLE.ok_or(Error::ReadOnly)?;
        let raw = self.raw_data().ok_or(Error::ReadOnly)?;
        let baseline: JsonValue = decode(raw).map_err(Error::Json)?;
        let current = serde_path_to_error::serialize(self.data(), serde_json::value::Serializer)
            .map_err(Error::Json)?;
        let patch = patch_payload(&current, &baseline, writable);
        if patch.is_empty() {
            debug!(uri = %self.odata_id(), "nothing to update");
            return Ok(());
        }

        let uri = self.required_id()?;
        let client = self.client()?;
        let headers = self.conditional_headers();
        debug!(%uri, fields = patch.len(), "patch object");
        let response = client
            .bmc()
            .patch(uri, &JsonValue::Object(patch), &headers)
            .await
            .map_err(Error::Bmc)?;
        client.expect_success(response).map(|_| ())
    }
}
