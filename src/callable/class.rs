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

//! # Jxn Class Plugin Module
//!
//! Request plugin for the `class` callable kind. It also emits and executes
//! the classes discovered in directories declared through the dir plugin.
//!
//! ## Emitted Code
//!
//! Namespace objects come first, parents before children, each exactly
//! once. Classes follow, shortest JS name first, so that `App.Admin` is
//! created before `App.Admin.Users` is attached to it. Re-ordering these
//! would let a parent's `= {}` wipe a child emitted earlier.
//!
//! ## Calls
//!
//! The browser sends the JS class name in `jxncls` and the method in
//! `jxnmthd`. Only methods the object lists and that are not `protected`
//! can be called.

use std::collections::BTreeSet;
use std::fmt::Write as _;
use std::sync::{Arc, PoisonError, RwLock};

use serde_json::Value;

use crate::callable::function::js_options_suffix;
use crate::callable::options::JxnCallableOptions;
use crate::callable::registry::{JxnClassEntry, JxnClassRegistry};
use crate::callable::{jxn_class_path, JxnCallableClass, JXN_KIND_CLASS};
use crate::container::JxnContainer;
use crate::errors::{JxnError, Result};
use crate::hash::JxnBindingHasher;
use crate::plugin::roles::{JxnPlugin, JxnPluginRole, JxnRequestPlugin};
use crate::request::call::{
    JxnCallContext, JxnRequest, JxnTarget, JXN_PARAM_CLASS, JXN_PARAM_METHOD,
};
use crate::validator::JxnValidator;

pub const JXN_CLASS_PRIORITY: i64 = 101;

pub struct JxnClassPlugin {
    prefix: String,
    container: Arc<JxnContainer>,
    registry: Arc<RwLock<JxnClassRegistry>>,
}

/// Methods of `object` that the browser may call.
pub fn jxn_exported_methods(object: &dyn JxnCallableClass, options: &JxnCallableOptions) -> Vec<String> {
    object
        .methods()
        .into_iter()
        .filter(|m| !options.protected.contains(m))
        .collect()
}

impl JxnClassPlugin {
    pub fn new(
        prefix: &str,
        container: Arc<JxnContainer>,
        registry: Arc<RwLock<JxnClassRegistry>>,
    ) -> Self {
        JxnClassPlugin {
            prefix: prefix.to_string(),
            container,
            registry,
        }
    }

    /// Runs `f` on the registry after bringing its discovered classes up
    /// to date.
    fn with_parsed<R>(&self, f: impl FnOnce(&JxnClassRegistry) -> R) -> Result<R> {
        let mut registry = self.registry.write().unwrap_or_else(PoisonError::into_inner);
        registry.parse(&self.container)?;
        Ok(f(&registry))
    }

    /// Registered and discovered classes, in emission order.
    pub fn classes(&self) -> Result<Vec<JxnClassEntry>> {
        let mut classes: Vec<JxnClassEntry> =
            self.with_parsed(|r| r.classes().into_values().collect())?;
        classes.sort_by(|a, b| {
            a.js_name
                .len()
                .cmp(&b.js_name.len())
                .then_with(|| a.js_name.cmp(&b.js_name))
        });
        Ok(classes)
    }

    fn namespaces_script(&self, classes: &[JxnClassEntry], emitted: &mut BTreeSet<String>) -> Result<String> {
        let mut paths: Vec<String> = self.with_parsed(|r| {
            r.namespaces()
                .keys()
                .map(|namespace| namespace.replace('\\', "."))
                .collect()
        })?;
        for entry in classes {
            if let Some((parent, _)) = entry.js_name.rsplit_once('.') {
                paths.push(parent.to_string());
            }
        }

        let mut prefixes: Vec<String> = Vec::new();
        for path in &paths {
            let segments: Vec<&str> = path.split('.').collect();
            for depth in 1..=segments.len() {
                prefixes.push(segments[..depth].join("."));
            }
        }
        prefixes.sort_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)));

        let mut code = String::new();
        for path in prefixes {
            if emitted.insert(path.clone()) {
                let _ = writeln!(code, "{}{} = {{}};", self.prefix, path);
            }
        }
        Ok(code)
    }

    fn class_script(&self, entry: &JxnClassEntry, emitted: &mut BTreeSet<String>) -> Result<String> {
        let object = self.container.class(&entry.class).ok_or_else(|| {
            JxnError::setup(format!(
                "class '{}' is registered but the container cannot build it",
                entry.class
            ))
        })?;

        let mut code = String::new();
        if emitted.insert(entry.js_name.clone()) {
            let _ = writeln!(code, "{}{} = {{}};", self.prefix, entry.js_name);
        }
        let opts = js_options_suffix(&entry.options);
        for method in jxn_exported_methods(object.as_ref(), &entry.options) {
            let _ = write!(
                code,
                "{prefix}{js}.{method} = function() {{\n    return jaxon.request({{ {cls}: '{js}', {mthd}: '{method}' }}, {{ parameters: arguments{opts} }});\n}};\n",
                prefix = self.prefix,
                js = entry.js_name,
                method = method,
                cls = JXN_PARAM_CLASS,
                mthd = JXN_PARAM_METHOD,
                opts = opts,
            );
        }
        Ok(code)
    }
}

impl JxnPlugin for JxnClassPlugin {
    fn roles(self: Arc<Self>) -> Vec<JxnPluginRole> {
        vec![JxnPluginRole::Request(self)]
    }

    fn hash(&self) -> Result<String> {
        self.with_parsed(|r| {
            let mut hasher = JxnBindingHasher::new();
            hasher.setting("prefix", &self.prefix);
            for (namespace, separator) in r.namespaces() {
                hasher.namespace(namespace, separator);
            }
            for entry in r.classes().values() {
                let detail = format!("{}{}", entry.js_name, entry.options.fingerprint());
                hasher.timestamped(&entry.class, entry.timestamp, &detail);
            }
            hasher.finish()
        })
    }

    fn script(&self) -> Result<String> {
        let classes = self.classes()?;
        let mut emitted = BTreeSet::new();
        let mut code = self.namespaces_script(&classes, &mut emitted)?;
        for entry in &classes {
            code.push_str(&self.class_script(entry, &mut emitted)?);
        }
        Ok(code)
    }
}

impl JxnRequestPlugin for JxnClassPlugin {
    fn name(&self) -> &str {
        JXN_KIND_CLASS
    }

    fn check_options(&self, identifier: &str, options: &Value) -> Result<JxnCallableOptions> {
        let class = identifier.trim().trim_matches('\\');
        if !JxnValidator::validate_class(class) {
            return Err(JxnError::setup(format!("invalid class name '{}'", identifier)));
        }
        match options {
            Value::String(include) => Ok(JxnCallableOptions {
                include: Some(include.clone()),
                ..JxnCallableOptions::default()
            }),
            other => JxnCallableOptions::from_value(class, other),
        }
    }

    fn register(&self, _kind: &str, identifier: &str, options: JxnCallableOptions) -> Result<bool> {
        let class = jxn_class_path(identifier);
        log::debug!(
            "callable.class.register: class registered - class={}, protected={:?}",
            class,
            options.protected
        );
        self.registry
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .add_class(&class, options);
        Ok(true)
    }

    fn target(&self, request: &JxnRequest) -> Option<JxnTarget> {
        let class = request
            .param(JXN_PARAM_CLASS)
            .filter(|c| JxnValidator::validate_class(c))?;
        let method = request
            .param(JXN_PARAM_METHOD)
            .filter(|m| JxnValidator::validate_method(m))?;
        Some(JxnTarget::class(class, method))
    }

    fn process_request(&self, request: &JxnRequest, context: &mut JxnCallContext<'_>) -> Result<bool> {
        let target = match self.target(request) {
            Some(target) => target,
            None => return Ok(false),
        };
        let (js_name, method) = match &target {
            JxnTarget::Class { class, method } => (class.clone(), method.clone()),
            JxnTarget::Function { .. } => return Ok(false),
        };

        let entry = self
            .with_parsed(|r| r.find_by_js_name(&js_name))?
            .ok_or_else(|| JxnError::request(target.to_string(), "class is not registered"))?;
        let object = self.container.class(&entry.class).ok_or_else(|| {
            JxnError::request(target.to_string(), "class cannot be built")
        })?;
        if !jxn_exported_methods(object.as_ref(), &entry.options).contains(&method) {
            return Err(JxnError::request(target.to_string(), "method is not exported"));
        }

        let args = context.arguments(request)?;
        let output = object
            .call(&method, &args)
            .map_err(|e| JxnError::request(target.to_string(), e.to_string()))?;
        if let Some(response) = output {
            context.append(response);
        }
        Ok(true)
    }
}
