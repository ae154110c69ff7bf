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

//! Scripted BMC for tests.
//!
//! Expectations are answered strictly in the order they were queued. Every
//! request, expected or not, is recorded together with its headers and the
//! (tokio) instant it arrived, so tests can check timing under a paused
//! clock.

pub mod expect;

#[doc(inline)]
pub use expect::Expect;
#[doc(inline)]
pub use expect::Reply;
pub use expect::Request;

use http::HeaderMap;
use redfish_runtime_core::Bmc as RedfishBmc;
use redfish_runtime_core::BmcResponse;
use redfish_runtime_core::Multipart;
use redfish_runtime_core::ODataId;
use serde_json::Value as JsonValue;
use std::collections::VecDeque;
use std::error::Error as StdError;
use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;
use std::sync::Mutex;
use std::sync::PoisonError;
use tokio::time::Instant;

#[derive(Debug)]
pub enum Error {
    ErrorResponse(Box<dyn StdError + Send + Sync>),
    MutexLock(String),
    NothingIsExpected(Request),
    Unexpected { actual: Request, expected: Request },
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::ErrorResponse(err) => write!(f, "response: {err}"),
            Self::MutexLock(err) => write!(f, "lock error: {err}"),
            Self::NothingIsExpected(actual) => {
                write!(f, "nothing is expected to happen but got {actual:?}")
            }
            Self::Unexpected { actual, expected } => {
                write!(f, "unexpected request: {actual:?}; expected: {expected:?}")
            }
        }
    }
}

impl StdError for Error {}

impl Error {
    pub fn mutex_lock<T>(err: PoisonError<T>) -> Self {
        Self::MutexLock(err.to_string())
    }
}

/// Request received by the mock.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub request: Request,
    pub headers: HeaderMap,
    pub at: Instant,
}

pub struct Bmc<E> {
    expect: Mutex<VecDeque<Expect<E>>>,
    history: Mutex<Vec<Recorded>>,
}

impl<E> Default for Bmc<E> {
    fn default() -> Self {
        Self {
            expect: Mutex::new(VecDeque::new()),
            history: Mutex::new(Vec::new()),
        }
    }
}

impl<E> Bmc<E> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an expectation after the ones already queued.
    pub fn expect(&self, exp: Expect<E>) {
        self.expect.lock().expect("not poisoned").push_back(exp);
    }

    /// All queued expectations have been consumed.
    pub fn is_satisfied(&self) -> bool {
        self.expect.lock().expect("not poisoned").is_empty()
    }

    /// Requests received so far.
    pub fn history(&self) -> Vec<Recorded> {
        self.history.lock().expect("not poisoned").clone()
    }
}

impl<E> Bmc<E>
where
    E: StdError + Send + Sync + 'static,
{
    fn answer(&self, actual: Request, headers: &HeaderMap) -> Result<BmcResponse, Error> {
        self.history
            .lock()
            .map_err(Error::mutex_lock)?
            .push(Recorded {
                request: actual.clone(),
                headers: headers.clone(),
                at: Instant::now(),
            });
        let expect = self.expect.lock().map_err(Error::mutex_lock)?.pop_front();
        match expect {
            None => Err(Error::NothingIsExpected(actual)),
            Some(Expect { request, response }) if request == actual => {
                response.map_err(|err| Error::ErrorResponse(Box::new(err)))
            }
            Some(Expect { request, .. }) => Err(Error::Unexpected {
                actual,
                expected: request,
            }),
        }
    }
}

impl<E> RedfishBmc for Bmc<E>
where
    E: StdError + Send + Sync + 'static,
{
    type Error = Error;

    async fn get(&self, uri: &ODataId) -> Result<BmcResponse, Self::Error> {
        self.answer(Request::Get { id: uri.clone() }, &HeaderMap::new())
    }

    async fn post(
        &self,
        uri: &ODataId,
        body: &JsonValue,
        headers: &HeaderMap,
    ) -> Result<BmcResponse, Self::Error> {
        let request = Request::Post {
            id: uri.clone(),
            request: body.clone(),
        };
        self.answer(request, headers)
    }

    async fn post_multipart(
        &self,
        uri: &ODataId,
        form: &Multipart,
        headers: &HeaderMap,
    ) -> Result<BmcResponse, Self::Error> {
        let request = Request::PostMultipart {
            id: uri.clone(),
            parts: form.parts().iter().map(|part| part.name.clone()).collect(),
        };
        self.answer(request, headers)
    }

    async fn patch(
        &self,
        uri: &ODataId,
        body: &JsonValue,
        headers: &HeaderMap,
    ) -> Result<BmcResponse, Self::Error> {
        let request = Request::Patch {
            id: uri.clone(),
            request: body.clone(),
        };
        self.answer(request, headers)
    }

    async fn delete(&self, uri: &ODataId, headers: &HeaderMap) -> Result<BmcResponse, Self::Error> {
        self.answer(Request::Delete { id: uri.clone() }, headers)
    }
}
