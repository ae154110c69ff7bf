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

use serde_json::Value as JsonValue;

/// Merge JSON objects left to right. Later keys replace earlier ones;
/// nested objects are merged recursively.
pub fn json_merge<'a, I>(values: I) -> JsonValue
where
    I: IntoIterator<Item = &'a JsonValue>,
{
    values
        .into_iter()
        .fold(JsonValue::Object(Default::default()), |mut acc, v| {
            merge_into(&mut acc, v);
            acc
        })
}

fn merge_into(acc: &mut JsonValue, v: &JsonValue) {
    match (acc, v) {
        (JsonValue::Object(acc), JsonValue::Object(v)) => {
            for (key, value) in v {
                merge_into(acc.entry(key.clone()).or_insert(JsonValue::Null), value);
            }
        }
        (acc, v) => *acc = v.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn nested_objects_are_merged() {
        let merged = json_merge(&[
            json!({"A": 1, "Boot": {"X": 1, "Y": 2}}),
            json!({"Boot": {"Y": 3}, "B": null}),
        ]);
        assert_eq!(merged, json!({"A": 1, "B": null, "Boot": {"X": 1, "Y": 3}}));
    }
}
