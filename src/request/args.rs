//! Copyright © 2025-2026 Wenze Wei. All Rights Reserved.
//!
//! This file is part of Jxn.
//! The Jxn project belongs to the Dunimd Team.
//!
//! Licensed under the Apache License, Version 2.0 (the "License");
//! You may not use this file except in compliance with the License.
//! You may obtain a copy of the License at
//!
//!     http://www.apache.org/licenses/LICENSE-2.0
//!
//! Unless required by applicable law or agreed to in writing, software
//! distributed under the License is distributed on an "AS IS" BASIS,
//! WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//! See the License for the specific language governing permissions and
//! limitations under the License.

//! # Jxn Argument Module
//!
//! Decoding of call arguments. The default decoder reads the `jxnargs`
//! parameter as a JSON array; hosts with another wire format plug in their
//! own [`JxnArgumentDecoder`].

use serde_json::Value;

use crate::errors::{JxnError, Result};
use crate::request::call::{JxnRequest, JXN_PARAM_ARGS};

pub trait JxnArgumentDecoder: Send + Sync {
    fn decode(&self, request: &JxnRequest) -> Result<Vec<Value>>;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct JxnJsonArgumentDecoder;

impl JxnArgumentDecoder for JxnJsonArgumentDecoder {
    fn decode(&self, request: &JxnRequest) -> Result<Vec<Value>> {
        let raw = match request.param(JXN_PARAM_ARGS) {
            Some(raw) => raw,
            None => return Ok(Vec::new()),
        };
        match serde_json::from_str::<Value>(raw) {
            Ok(Value::Array(args)) => Ok(args),
            Ok(_) => Err(JxnError::request(
                JXN_PARAM_ARGS,
                "call arguments must be a JSON array",
            )),
            Err(e) => Err(JxnError::request(
                JXN_PARAM_ARGS,
                format!("malformed call arguments: {}", e),
            )),
        }
    }
}
