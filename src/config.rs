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

//! # Jxn Configuration Module
//!
//! Library options plus the two registration sections, `functions` and
//! `classes`, read from JSON or YAML.
//!
//! ## Sections
//!
//! Both sections are kept as raw JSON values. A section is either a list
//! (entries with integer keys) or a map (entries with string keys); the
//! plugin manager walks them with [`JxnConfig::entries`].
//!
//! ```json
//! {
//!     "core": { "prefix": { "function": "jxn_" }, "registration": "strict" },
//!     "functions": { "my_first_function": {}, "my_second_function": { "alias": "second" } },
//!     "classes": [{ "directory": "/srv/app/ajax", "namespace": "App" }]
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{JxnError, Result};

/// How malformed entries in the registration sections are handled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JxnRegistrationMode {
    /// Skip the entry and log a warning.
    #[default]
    Lenient,
    /// Fail with a setup error.
    Strict,
}

/// Name prefixes applied to generated JS objects and functions.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JxnPrefixConfig {
    pub function: String,
    pub class: String,
}

impl Default for JxnPrefixConfig {
    fn default() -> Self {
        JxnPrefixConfig {
            function: "jaxon_".to_string(),
            class: "Jaxon".to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JxnCoreConfig {
    pub prefix: JxnPrefixConfig,
    /// Extension of the files a directory scan treats as classes.
    pub class_file_extension: String,
    pub registration: JxnRegistrationMode,
}

impl Default for JxnCoreConfig {
    fn default() -> Self {
        JxnCoreConfig {
            prefix: JxnPrefixConfig::default(),
            class_file_extension: "php".to_string(),
            registration: JxnRegistrationMode::default(),
        }
    }
}

/// Key of one entry in a registration section.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum JxnConfigKey<'a> {
    Index(usize),
    Name(&'a str),
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JxnConfig {
    pub core: JxnCoreConfig,
    pub functions: Value,
    pub classes: Value,
}

impl JxnConfig {
    pub fn from_json_str(source: &str) -> Result<Self> {
        Ok(serde_json::from_str(source)?)
    }

    /// Parses YAML through a JSON value. Mappings whose keys are all integers
    /// become lists; other mappings get string keys.
    #[cfg(feature = "yaml")]
    pub fn from_yaml_str(source: &str) -> Result<Self> {
        let yaml: serde_yaml::Value = serde_yaml::from_str(source)?;
        Ok(serde_json::from_value(yaml_to_json(&yaml))?)
    }

    /// Loads a configuration file, picking the format from its extension.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "json" => Self::from_json_str(&content),
            #[cfg(feature = "yaml")]
            "yaml" | "yml" => Self::from_yaml_str(&content),
            other => Err(JxnError::setup(format!(
                "unsupported configuration format '{}' for {}",
                other,
                path.display()
            ))),
        }
    }

    pub fn is_strict(&self) -> bool {
        self.core.registration == JxnRegistrationMode::Strict
    }

    /// Entries of a registration section: lists in order, maps by key.
    /// `null` is an empty section; a scalar section yields nothing.
    pub fn entries(section: &Value) -> Vec<(JxnConfigKey<'_>, &Value)> {
        match section {
            Value::Array(items) => items
                .iter()
                .enumerate()
                .map(|(i, v)| (JxnConfigKey::Index(i), v))
                .collect(),
            Value::Object(map) => map
                .iter()
                .map(|(k, v)| (JxnConfigKey::Name(k.as_str()), v))
                .collect(),
            _ => Vec::new(),
        }
    }
}

#[cfg(feature = "yaml")]
fn yaml_to_json(yaml: &serde_yaml::Value) -> Value {
    match yaml {
        serde_yaml::Value::Null => Value::Null,
        serde_yaml::Value::Bool(b) => Value::Bool(*b),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::from(i)
            } else if let Some(u) = n.as_u64() {
                Value::from(u)
            } else {
                n.as_f64()
                    .and_then(serde_json::Number::from_f64)
                    .map(Value::Number)
                    .unwrap_or(Value::Null)
            }
        }
        serde_yaml::Value::String(s) => Value::String(s.clone()),
        serde_yaml::Value::Sequence(seq) => Value::Array(seq.iter().map(yaml_to_json).collect()),
        serde_yaml::Value::Mapping(map) => {
            let mut indexed: Vec<(u64, Value)> = Vec::new();
            for (k, v) in map {
                match k.as_u64() {
                    Some(i) => indexed.push((i, yaml_to_json(v))),
                    None => break,
                }
            }
            if !map.is_empty() && indexed.len() == map.len() {
                indexed.sort_by_key(|(i, _)| *i);
                return Value::Array(indexed.into_iter().map(|(_, v)| v).collect());
            }

            let mut obj = serde_json::Map::new();
            for (k, v) in map {
                let key = match k {
                    serde_yaml::Value::String(s) => s.clone(),
                    serde_yaml::Value::Number(n) => n.to_string(),
                    serde_yaml::Value::Bool(b) => b.to_string(),
                    _ => continue,
                };
                obj.insert(key, yaml_to_json(v));
            }
            Value::Object(obj)
        }
        serde_yaml::Value::Tagged(tagged) => yaml_to_json(&tagged.value),
    }
}
