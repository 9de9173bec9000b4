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

//! # Jxn Callable Options Module
//!
//! Typed options attached to a registered function, class or directory.
//!
//! Recognized keys: `alias`, `include`, `upload`, `class`, `namespace`,
//! `separator`, `autoload`, `directory`, `protected`. Any other key is kept
//! in [`JxnCallableOptions::extra`] and emitted verbatim into generated
//! stubs, so options the core does not know about keep working.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{JxnError, Result};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct JxnCallableOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include: Option<String>,
    /// JS expression naming the upload field, emitted as is.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upload: Option<String>,
    /// Host class whose method backs an exported function.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub separator: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub autoload: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory: Option<String>,
    /// Methods of a class that are not exported.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub protected: Vec<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl JxnCallableOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds options from a raw mapping, or `null` (or an empty list) for
    /// none. Anything else is a setup error. A single string under
    /// `protected` is accepted as a one-element list.
    pub fn from_value(identifier: &str, raw: &Value) -> Result<Self> {
        match raw {
            Value::Null => Ok(Self::default()),
            Value::Array(items) if items.is_empty() => Ok(Self::default()),
            Value::Object(map) => {
                let mut map = map.clone();
                if let Some(Value::String(method)) = map.get("protected").cloned() {
                    map.insert("protected".to_string(), Value::Array(vec![Value::String(method)]));
                }
                serde_json::from_value(Value::Object(map)).map_err(|e| {
                    JxnError::setup(format!("invalid options for '{}': {}", identifier, e))
                })
            }
            other => Err(JxnError::setup(format!(
                "options for '{}' must be a string or a mapping, got {}",
                identifier,
                value_kind(other)
            ))),
        }
    }

    /// Options that end up in a generated JS stub: `upload` and unknown keys.
    pub fn js_options(&self) -> Vec<(String, String)> {
        let mut out = Vec::new();
        if let Some(upload) = &self.upload {
            out.push(("upload".to_string(), upload.clone()));
        }
        for (key, value) in &self.extra {
            let rendered = match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            out.push((key.clone(), rendered));
        }
        out
    }

    /// Canonical rendering of every option, for change detection.
    pub fn fingerprint(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

pub(crate) fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a mapping",
    }
}
