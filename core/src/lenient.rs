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

//! Lenient field decoders
//!
//! Some services report numeric properties as strings (PCI function
//! numbers are a common case). Use on an `Option<i64>` field:
//!
//! ```rust
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct PciId {
//!     #[serde(rename = "FunctionNumber", default, deserialize_with = "redfish_runtime_core::lenient::int")]
//!     function_number: Option<i64>,
//! }
//!
//! let v: PciId = serde_json::from_str(r#"{"FunctionNumber":"3"}"#).unwrap();
//! assert_eq!(v.function_number, Some(3));
//! ```

use serde::Deserialize;
use serde::Deserializer;
use serde_json::Number;

#[derive(Deserialize)]
#[serde(untagged)]
enum IntOrString {
    Number(Number),
    Text(String),
    Other(serde::de::IgnoredAny),
}

/// Accept a JSON number or a decimal string. Anything else leaves the
/// field absent.
///
/// # Errors
///
/// Only fails when the underlying deserializer does.
pub fn int<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
    Ok(match IntOrString::deserialize(deserializer)? {
        IntOrString::Number(n) => n.as_i64(),
        IntOrString::Text(s) => s.trim().parse().ok(),
        IntOrString::Other(_) => None,
    })
}
