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

//! # Jxn Directory Plugin Module
//!
//! Request plugin for the `dir` callable kind. It validates directories and
//! records them in the shared class registry, either as a namespace root
//! (non-empty `namespace` option) or as a bare directory. It never claims a
//! request: the classes it declares are executed by the class plugin.

use std::path::PathBuf;
use std::sync::{Arc, PoisonError, RwLock};

use serde_json::Value;

use crate::callable::options::JxnCallableOptions;
use crate::callable::registry::{jxn_separator, JxnClassRegistry};
use crate::callable::JXN_KIND_DIR;
use crate::errors::{JxnError, Result};
use crate::hash::JxnBindingHasher;
use crate::plugin::roles::{JxnPlugin, JxnPluginRole, JxnRequestPlugin};
use crate::request::call::{JxnCallContext, JxnRequest, JxnTarget};
use crate::validator::JxnValidator;

pub const JXN_DIR_PRIORITY: i64 = 102;

pub struct JxnDirPlugin {
    registry: Arc<RwLock<JxnClassRegistry>>,
}

/// Trims whitespace and trailing separators, then resolves `directory` to
/// its canonical absolute path. Fails unless it is an existing directory.
pub fn jxn_check_directory(directory: &str) -> Result<PathBuf> {
    let trimmed = directory.trim();
    let trimmed = trimmed.trim_end_matches(['/', '\\']);
    let trimmed = if trimmed.is_empty() && directory.trim().starts_with('/') {
        "/"
    } else {
        trimmed
    };
    let path = PathBuf::from(trimmed);
    if trimmed.is_empty() || !path.is_dir() {
        return Err(JxnError::setup(format!(
            "'{}' is not an existing directory",
            directory
        )));
    }
    path.canonicalize()
        .map_err(|e| JxnError::setup(format!("cannot resolve directory '{}': {}", directory, e)))
}

impl JxnDirPlugin {
    pub fn new(registry: Arc<RwLock<JxnClassRegistry>>) -> Self {
        JxnDirPlugin { registry }
    }
}

impl JxnPlugin for JxnDirPlugin {
    fn roles(self: Arc<Self>) -> Vec<JxnPluginRole> {
        vec![JxnPluginRole::Request(self)]
    }

    fn hash(&self) -> Result<String> {
        let registry = self.registry.read().unwrap_or_else(PoisonError::into_inner);
        let mut hasher = JxnBindingHasher::new();
        for root in registry.roots() {
            hasher.namespace(&root.namespace, &root.separator);
            hasher.marked(
                &root.directory.to_string_lossy(),
                &format!("{}{}", root.namespace, root.options.fingerprint()),
            );
        }
        for (directory, options) in registry.directories() {
            hasher.marked(&directory.to_string_lossy(), &options.fingerprint());
        }
        Ok(hasher.finish())
    }
}

impl JxnRequestPlugin for JxnDirPlugin {
    fn name(&self) -> &str {
        JXN_KIND_DIR
    }

    fn check_options(&self, identifier: &str, options: &Value) -> Result<JxnCallableOptions> {
        let directory = jxn_check_directory(identifier)?;
        let mut options = match options {
            Value::String(namespace) => JxnCallableOptions {
                namespace: Some(namespace.clone()),
                ..JxnCallableOptions::default()
            },
            other => JxnCallableOptions::from_value(identifier, other)?,
        };

        options.namespace = options
            .namespace
            .as_deref()
            .map(|ns| ns.trim_matches(|c| c == ' ' || c == '\\').to_string())
            .filter(|ns| !ns.is_empty());
        if let Some(namespace) = &options.namespace {
            if !JxnValidator::validate_class(namespace) {
                return Err(JxnError::setup(format!("invalid namespace '{}'", namespace)));
            }
        }
        if options.separator.is_some() {
            options.separator = Some(jxn_separator(options.separator.as_deref()));
        }
        options.directory = Some(directory.to_string_lossy().into_owned());
        Ok(options)
    }

    fn register(&self, _kind: &str, identifier: &str, options: JxnCallableOptions) -> Result<bool> {
        let directory = match &options.directory {
            Some(directory) => PathBuf::from(directory),
            None => jxn_check_directory(identifier)?,
        };
        let mut registry = self.registry.write().unwrap_or_else(PoisonError::into_inner);
        match options.namespace.clone() {
            Some(namespace) => {
                log::debug!(
                    "callable.dir.register: namespace root registered - namespace={}, directory={}",
                    namespace,
                    directory.display()
                );
                registry.add_namespace(&namespace, directory, options);
            }
            None => {
                log::debug!(
                    "callable.dir.register: directory registered - directory={}",
                    directory.display()
                );
                registry.add_directory(directory, options);
            }
        }
        Ok(true)
    }

    fn target(&self, _request: &JxnRequest) -> Option<JxnTarget> {
        None
    }

    fn process_request(&self, _request: &JxnRequest, _context: &mut JxnCallContext<'_>) -> Result<bool> {
        Ok(false)
    }
}
