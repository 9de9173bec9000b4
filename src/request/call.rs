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

//! # Jxn Call Module
//!
//! Parameters of one inbound call, the target a request plugin resolves from
//! them, and the context a claimed call executes in.
//!
//! Parameters come from the query string and the body; a body value wins
//! over a query value of the same name. Values are trimmed and otherwise
//! untrusted: request plugins validate them before use.

use std::collections::HashMap;
use std::fmt;

use serde_json::Value;

use crate::errors::Result;
use crate::request::args::JxnArgumentDecoder;
use crate::response::{JxnResponse, JxnResponseManager};

pub const JXN_PARAM_CLASS: &str = "jxncls";
pub const JXN_PARAM_METHOD: &str = "jxnmthd";
pub const JXN_PARAM_FUNCTION: &str = "jxnfun";
pub const JXN_PARAM_ARGS: &str = "jxnargs";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct JxnRequest {
    query: HashMap<String, String>,
    body: HashMap<String, String>,
}

impl JxnRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_query(mut self, name: &str, value: &str) -> Self {
        self.query.insert(name.to_string(), value.to_string());
        self
    }

    pub fn with_body(mut self, name: &str, value: &str) -> Self {
        self.body.insert(name.to_string(), value.to_string());
        self
    }

    /// Trimmed value of `name`, body first. Empty values count as absent.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.body
            .get(name)
            .or_else(|| self.query.get(name))
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }
}

/// What a request plugin resolved an inbound call to.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum JxnTarget {
    Function { name: String },
    Class { class: String, method: String },
}

impl JxnTarget {
    pub fn function(name: impl Into<String>) -> Self {
        JxnTarget::Function { name: name.into() }
    }

    pub fn class(class: impl Into<String>, method: impl Into<String>) -> Self {
        JxnTarget::Class {
            class: class.into(),
            method: method.into(),
        }
    }
}

impl fmt::Display for JxnTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JxnTarget::Function { name } => write!(f, "{}()", name),
            JxnTarget::Class { class, method } => write!(f, "{}::{}()", class, method),
        }
    }
}

/// Collaborators available to a plugin executing a claimed call.
pub struct JxnCallContext<'a> {
    decoder: &'a dyn JxnArgumentDecoder,
    response: &'a mut JxnResponseManager,
}

impl<'a> JxnCallContext<'a> {
    pub fn new(decoder: &'a dyn JxnArgumentDecoder, response: &'a mut JxnResponseManager) -> Self {
        JxnCallContext { decoder, response }
    }

    pub fn arguments(&self, request: &JxnRequest) -> Result<Vec<Value>> {
        self.decoder.decode(request)
    }

    pub fn append(&mut self, response: JxnResponse) {
        self.response.append(response);
    }
}
