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

//! # Jxn Plugin Manager Module
//!
//! Registration front door. The manager classifies each plugin, wires its
//! roles, indexes request and response plugins by name and keeps every
//! plugin in one priority table.
//!
//! ## Registration Rules
//!
//! - request and response plugins are indexed by name; the last one wins
//! - the last alert provider and the last confirm provider win
//! - event listeners accumulate
//! - every plugin gets a priority slot, whatever its roles
//! - a plugin with no role is rejected before anything is changed
//!
//! A request plugin replaced under its name keeps its priority slot but is
//! skipped from then on, both when routing and when emitting code.
//!
//! ## Callables
//!
//! `register_callable(kind, ...)` hands the registration to the request
//! plugin named `kind`. New callable kinds therefore only need a new named
//! request plugin.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::callable::{JXN_KIND_CLASS, JXN_KIND_DIR, JXN_KIND_FUNCTION};
use crate::config::{JxnConfig, JxnConfigKey};
use crate::container::{JxnContainer, JxnPackageFactory};
use crate::errors::{JxnError, Result};
use crate::plugin::dialog::JxnDialog;
use crate::plugin::event::JxnEventDispatcher;
use crate::plugin::priority::{JxnPriorityBand, JxnPriorityRegistry};
use crate::plugin::roles::{JxnCapabilities, JxnPlugin, JxnRequestPlugin, JxnResponsePlugin};

/// A registered plugin and what it was classified as.
#[derive(Clone)]
pub struct JxnPluginEntry {
    pub plugin: Arc<dyn JxnPlugin>,
    pub capabilities: JxnCapabilities,
}

fn same_object<A: ?Sized, B: ?Sized>(a: &Arc<A>, b: &Arc<B>) -> bool {
    Arc::as_ptr(a) as *const () == Arc::as_ptr(b) as *const ()
}

pub struct JxnPluginManager {
    container: Arc<JxnContainer>,
    plugins: JxnPriorityRegistry<JxnPluginEntry>,
    request_plugins: HashMap<String, Arc<dyn JxnRequestPlugin>>,
    response_plugins: HashMap<String, Arc<dyn JxnResponsePlugin>>,
    packages: Vec<String>,
    dialog: JxnDialog,
    events: JxnEventDispatcher,
}

impl JxnPluginManager {
    pub fn new(container: Arc<JxnContainer>) -> Self {
        JxnPluginManager {
            container,
            plugins: JxnPriorityRegistry::new(),
            request_plugins: HashMap::new(),
            response_plugins: HashMap::new(),
            packages: Vec::new(),
            dialog: JxnDialog::new(),
            events: JxnEventDispatcher::new(),
        }
    }

    pub fn container(&self) -> &Arc<JxnContainer> {
        &self.container
    }

    /// Registers `plugin` and returns the priority slot it was given.
    pub fn register_plugin(&mut self, plugin: Arc<dyn JxnPlugin>, priority: i64) -> Result<i64> {
        let capabilities = JxnCapabilities::classify(&plugin);
        if !capabilities.is_recognized() {
            log::error!(
                "plugin.register: plugin fulfills no recognized role - type={}",
                plugin.type_name()
            );
            return Err(JxnError::registration(format!(
                "plugin '{}' fulfills no recognized role",
                plugin.type_name()
            )));
        }

        let mut name = None;
        if let Some(request) = &capabilities.request {
            name = Some(request.name().to_string());
            self.request_plugins
                .insert(request.name().to_string(), Arc::clone(request));
        } else if let Some(response) = &capabilities.response {
            name = Some(response.name().to_string());
            self.response_plugins
                .insert(response.name().to_string(), Arc::clone(response));
        }
        if let Some(alert) = &capabilities.alert {
            self.dialog.set_alert(Arc::clone(alert));
        }
        if let Some(confirm) = &capabilities.confirm {
            self.dialog.set_confirm(Arc::clone(confirm));
        }
        if let Some(listener) = &capabilities.listener {
            self.events.add(Arc::clone(listener));
        }

        let roles = capabilities.roles();
        let slot = self.plugins.insert(
            JxnPluginEntry {
                plugin: Arc::clone(&plugin),
                capabilities,
            },
            priority,
        );
        log::info!(
            "plugin.register: plugin registered - type={}, name={}, priority={}, band={:?}, roles={:?}",
            plugin.type_name(),
            name.as_deref().unwrap_or("-"),
            slot,
            JxnPriorityBand::of(slot),
            roles
        );
        Ok(slot)
    }

    /// Records `id` in the package list and installs its lazy constructor.
    /// Ids are not deduplicated; the last factory is the one the container
    /// builds from.
    pub fn register_package(&mut self, id: &str, factory: JxnPackageFactory) {
        if self.packages.iter().any(|p| p == id) {
            log::warn!(
                "plugin.package.duplicate: package registered more than once - package={}, count={}",
                id,
                self.packages.iter().filter(|p| p.as_str() == id).count() + 1
            );
        }
        self.packages.push(id.to_string());
        self.container.set_package(id, factory);
        log::info!("plugin.package.register: package registered - package={}", id);
    }

    /// Package ids in registration order, duplicates included.
    pub fn packages(&self) -> &[String] {
        &self.packages
    }

    pub fn register_callable(&self, kind: &str, identifier: &str, options: &Value) -> Result<bool> {
        let plugin = self
            .request_plugin(kind)
            .ok_or_else(|| JxnError::unknown_plugin(kind))?;
        let options = plugin.check_options(identifier, options)?;
        plugin.register(kind, identifier, options)
    }

    /// Registers the `functions` and `classes` sections of `config`.
    pub fn register_from_config(&self, config: &JxnConfig) -> Result<()> {
        let strict = config.is_strict();
        check_section("functions", &config.functions, strict)?;
        check_section("classes", &config.classes, strict)?;

        for (key, value) in JxnConfig::entries(&config.functions) {
            match (&key, value) {
                (JxnConfigKey::Index(_), Value::String(name)) => {
                    self.register_callable(JXN_KIND_FUNCTION, name, &Value::Null)?;
                }
                (JxnConfigKey::Name(name), Value::String(_) | Value::Object(_) | Value::Array(_)) => {
                    self.register_callable(JXN_KIND_FUNCTION, name, value)?;
                }
                _ => skip_entry("functions", &key, strict)?,
            }
        }

        for (key, value) in JxnConfig::entries(&config.classes) {
            match (&key, value) {
                (JxnConfigKey::Index(_), Value::String(name)) => {
                    self.register_callable(JXN_KIND_CLASS, name, &Value::Null)?;
                }
                (JxnConfigKey::Name(name), Value::String(_) | Value::Object(_) | Value::Array(_)) => {
                    self.register_callable(JXN_KIND_CLASS, name, value)?;
                }
                (JxnConfigKey::Index(_), Value::Object(entry)) if entry.contains_key("directory") => {
                    self.register_directory_entry(entry, &key, strict)?;
                }
                _ => skip_entry("classes", &key, strict)?,
            }
        }
        Ok(())
    }

    fn register_directory_entry(&self, entry: &Map<String, Value>, key: &JxnConfigKey<'_>, strict: bool) -> Result<()> {
        let directory = match entry.get("directory") {
            Some(Value::String(directory)) => directory,
            _ => return skip_entry("classes", key, strict),
        };
        let mut options = match entry.get("options") {
            Some(Value::Object(map)) => map.clone(),
            Some(Value::String(namespace)) => {
                let mut map = Map::new();
                map.insert("namespace".to_string(), Value::String(namespace.clone()));
                map
            }
            _ => Map::new(),
        };
        for field in ["namespace", "separator", "autoload"] {
            if let Some(value) = entry.get(field) {
                options.insert(field.to_string(), value.clone());
            }
        }
        self.register_callable(JXN_KIND_DIR, directory, &Value::Object(options))?;
        Ok(())
    }

    pub fn request_plugin(&self, name: &str) -> Option<Arc<dyn JxnRequestPlugin>> {
        self.request_plugins.get(name).cloned()
    }

    pub fn response_plugin(&self, name: &str) -> Option<Arc<dyn JxnResponsePlugin>> {
        self.response_plugins.get(name).cloned()
    }

    /// Every registered plugin in ascending priority order.
    pub fn plugins(&self) -> impl Iterator<Item = &JxnPluginEntry> + '_ {
        self.plugins.iter()
    }

    /// Registered plugins minus those replaced under their name.
    pub fn active_plugins(&self) -> impl Iterator<Item = &JxnPluginEntry> + '_ {
        self.plugins.iter().filter(move |entry| self.is_active(entry))
    }

    /// Active request plugins in ascending priority order.
    pub fn request_plugins(&self) -> Vec<Arc<dyn JxnRequestPlugin>> {
        self.active_plugins()
            .filter_map(|entry| entry.capabilities.request.clone())
            .collect()
    }

    fn is_active(&self, entry: &JxnPluginEntry) -> bool {
        if let Some(request) = &entry.capabilities.request {
            return self
                .request_plugins
                .get(request.name())
                .is_some_and(|current| same_object(current, request));
        }
        if let Some(response) = &entry.capabilities.response {
            return self
                .response_plugins
                .get(response.name())
                .is_some_and(|current| same_object(current, response));
        }
        true
    }

    pub fn dialog(&self) -> &JxnDialog {
        &self.dialog
    }

    pub fn events(&self) -> &JxnEventDispatcher {
        &self.events
    }

    /// Unwires dialog providers and event listeners. Registered plugins and
    /// callables are kept.
    pub fn teardown(&mut self) {
        self.dialog.reset();
        self.events.clear();
        log::debug!("plugin.teardown: dialog providers and listeners reset");
    }
}

fn check_section(name: &str, section: &Value, strict: bool) -> Result<()> {
    match section {
        Value::Null | Value::Array(_) | Value::Object(_) => Ok(()),
        _ if strict => Err(JxnError::setup(format!(
            "configuration section '{}' must be a list or a mapping",
            name
        ))),
        _ => {
            log::warn!(
                "plugin.config.skip: section is neither a list nor a mapping - section={}",
                name
            );
            Ok(())
        }
    }
}

fn skip_entry(section: &str, key: &JxnConfigKey<'_>, strict: bool) -> Result<()> {
    if strict {
        return Err(JxnError::setup(format!(
            "malformed entry {:?} in configuration section '{}'",
            key, section
        )));
    }
    log::warn!(
        "plugin.config.skip: malformed entry skipped - section={}, key={:?}",
        section,
        key
    );
    Ok(())
}
