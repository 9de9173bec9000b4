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

//! # Jxn Function Plugin Module
//!
//! Request plugin for the `function` callable kind.
//!
//! A function is exported under its `alias` when one is given, otherwise
//! under its own name, and the browser calls it by that exported name
//! (`jxnfun`). With a `class` option the function is a method of a host
//! class; otherwise the container's function handler of the same name runs.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::sync::{Arc, PoisonError, RwLock};

use serde_json::Value;

use crate::callable::options::JxnCallableOptions;
use crate::callable::JXN_KIND_FUNCTION;
use crate::container::JxnContainer;
use crate::errors::{JxnError, Result};
use crate::hash::JxnBindingHasher;
use crate::plugin::roles::{JxnPlugin, JxnPluginRole, JxnRequestPlugin};
use crate::request::call::{JxnCallContext, JxnRequest, JxnTarget, JXN_PARAM_FUNCTION};
use crate::response::JxnResponse;
use crate::validator::JxnValidator;

pub const JXN_FUNCTION_PRIORITY: i64 = 103;

#[derive(Clone, Debug, PartialEq)]
pub struct JxnFunctionEntry {
    /// Name of the function, or of the method when `options.class` is set.
    pub name: String,
    /// Name the browser knows it by.
    pub js_name: String,
    pub options: JxnCallableOptions,
}

pub struct JxnFunctionPlugin {
    prefix: String,
    container: Arc<JxnContainer>,
    functions: RwLock<BTreeMap<String, JxnFunctionEntry>>,
}

impl JxnFunctionPlugin {
    pub fn new(prefix: &str, container: Arc<JxnContainer>) -> Self {
        JxnFunctionPlugin {
            prefix: prefix.to_string(),
            container,
            functions: RwLock::new(BTreeMap::new()),
        }
    }

    /// The function exported as `js_name`.
    pub fn function(&self, js_name: &str) -> Option<JxnFunctionEntry> {
        self.functions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(js_name)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.functions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn call(
        &self,
        entry: &JxnFunctionEntry,
        target: &JxnTarget,
        args: &[Value],
    ) -> Result<Option<JxnResponse>> {
        let output = match &entry.options.class {
            Some(class) => {
                let object = self.container.class(class).ok_or_else(|| {
                    JxnError::request(target.to_string(), format!("class '{}' cannot be built", class))
                })?;
                object.call(&entry.name, args)
            }
            None => {
                let handler = self.container.function(&entry.name).ok_or_else(|| {
                    JxnError::request(target.to_string(), "no handler bound to this function")
                })?;
                handler(args)
            }
        };
        output.map_err(|e| JxnError::request(target.to_string(), e.to_string()))
    }
}

pub(crate) fn js_options_suffix(options: &JxnCallableOptions) -> String {
    let mut out = String::new();
    for (key, value) in options.js_options() {
        let _ = write!(out, ", {}: {}", key, value);
    }
    out
}

impl JxnPlugin for JxnFunctionPlugin {
    fn roles(self: Arc<Self>) -> Vec<JxnPluginRole> {
        vec![JxnPluginRole::Request(self)]
    }

    fn hash(&self) -> Result<String> {
        let functions = self.functions.read().unwrap_or_else(PoisonError::into_inner);
        let mut hasher = JxnBindingHasher::new();
        hasher.setting("prefix", &self.prefix);
        for entry in functions.values() {
            hasher.marked(&entry.js_name, &format!("{}{}", entry.name, entry.options.fingerprint()));
        }
        Ok(hasher.finish())
    }

    fn script(&self) -> Result<String> {
        let functions = self.functions.read().unwrap_or_else(PoisonError::into_inner);
        let mut code = String::new();
        for entry in functions.values() {
            let _ = write!(
                code,
                "{prefix}{js} = function() {{\n    return jaxon.request({{ {param}: '{js}' }}, {{ parameters: arguments{opts} }});\n}};\n",
                prefix = self.prefix,
                js = entry.js_name,
                param = JXN_PARAM_FUNCTION,
                opts = js_options_suffix(&entry.options),
            );
        }
        Ok(code)
    }
}

impl JxnRequestPlugin for JxnFunctionPlugin {
    fn name(&self) -> &str {
        JXN_KIND_FUNCTION
    }

    fn check_options(&self, identifier: &str, options: &Value) -> Result<JxnCallableOptions> {
        let name = identifier.trim();
        if !JxnValidator::validate_function(name) {
            return Err(JxnError::setup(format!("invalid function name '{}'", identifier)));
        }
        let options = match options {
            Value::String(include) => JxnCallableOptions {
                include: Some(include.clone()),
                ..JxnCallableOptions::default()
            },
            other => JxnCallableOptions::from_value(name, other)?,
        };
        if let Some(alias) = &options.alias {
            if !JxnValidator::validate_function(alias) {
                return Err(JxnError::setup(format!(
                    "invalid alias '{}' for function '{}'",
                    alias, name
                )));
            }
        }
        Ok(options)
    }

    fn register(&self, _kind: &str, identifier: &str, options: JxnCallableOptions) -> Result<bool> {
        let name = identifier.trim().to_string();
        let js_name = options.alias.clone().unwrap_or_else(|| name.clone());
        log::debug!(
            "callable.function.register: function registered - name={}, js_name={}, class={:?}",
            name,
            js_name,
            options.class
        );
        self.functions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(
                js_name.clone(),
                JxnFunctionEntry {
                    name,
                    js_name,
                    options,
                },
            );
        Ok(true)
    }

    fn target(&self, request: &JxnRequest) -> Option<JxnTarget> {
        request
            .param(JXN_PARAM_FUNCTION)
            .filter(|name| JxnValidator::validate_function(name))
            .map(JxnTarget::function)
    }

    fn process_request(&self, request: &JxnRequest, context: &mut JxnCallContext<'_>) -> Result<bool> {
        let target = match self.target(request) {
            Some(target) => target,
            None => return Ok(false),
        };
        let js_name = match &target {
            JxnTarget::Function { name } => name.clone(),
            JxnTarget::Class { .. } => return Ok(false),
        };
        let entry = self.function(&js_name).ok_or_else(|| {
            JxnError::request(target.to_string(), "function is not registered")
        })?;

        let args = context.arguments(request)?;
        if let Some(response) = self.call(&entry, &target, &args)? {
            context.append(response);
        }
        Ok(true)
    }
}
