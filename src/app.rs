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

//! # Jxn Application Module
//!
//! Bootstrap facade. [`JxnApp::new`] builds the container, the shared class
//! registry and the built-in request plugins:
//!
//! | plugin | kind | priority |
//! |---|---|---|
//! | [`JxnClassPlugin`] | `class` | 101 |
//! | [`JxnDirPlugin`] | `dir` | 102 |
//! | [`JxnFunctionPlugin`] | `function` | 103 |
//!
//! All registration happens before the first request is routed. Between two
//! requests served by the same app, call [`JxnApp::reset_request`].
//!
//! ```rust
//! let mut app = JxnApp::new(JxnConfig::default())?;
//! app.container().set_class("App\\Greeter", || Arc::new(Greeter) as Arc<dyn JxnCallableClass>);
//! app.register("dir", "/srv/app/ajax", &json!({ "namespace": "App" }))?;
//!
//! let outcome = app.process_request(&request)?;
//! let body = app.response().output();
//! app.reset_request();
//! ```

use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use serde_json::Value;

use crate::callable::class::{JxnClassPlugin, JXN_CLASS_PRIORITY};
use crate::callable::dir::{JxnDirPlugin, JXN_DIR_PRIORITY};
use crate::callable::function::{JxnFunctionPlugin, JXN_FUNCTION_PRIORITY};
use crate::callable::registry::JxnClassRegistry;
use crate::codegen::JxnCodeGenerator;
use crate::config::JxnConfig;
use crate::container::JxnContainer;
use crate::errors::Result;
use crate::plugin::manager::JxnPluginManager;
use crate::request::args::{JxnArgumentDecoder, JxnJsonArgumentDecoder};
use crate::request::call::JxnRequest;
use crate::request::router::{JxnRequestRouter, JxnRouteOutcome, JxnRoutingState};
use crate::response::JxnResponseManager;

pub struct JxnApp {
    config: JxnConfig,
    container: Arc<JxnContainer>,
    classes: Arc<RwLock<JxnClassRegistry>>,
    manager: JxnPluginManager,
    router: JxnRequestRouter,
    response: JxnResponseManager,
    decoder: Box<dyn JxnArgumentDecoder>,
}

impl JxnApp {
    pub fn new(config: JxnConfig) -> Result<Self> {
        let container = Arc::new(JxnContainer::new());
        let classes = Arc::new(RwLock::new(JxnClassRegistry::new(
            &config.core.class_file_extension,
        )));
        let mut manager = JxnPluginManager::new(Arc::clone(&container));

        manager.register_plugin(
            Arc::new(JxnClassPlugin::new(
                &config.core.prefix.class,
                Arc::clone(&container),
                Arc::clone(&classes),
            )),
            JXN_CLASS_PRIORITY,
        )?;
        manager.register_plugin(
            Arc::new(JxnDirPlugin::new(Arc::clone(&classes))),
            JXN_DIR_PRIORITY,
        )?;
        manager.register_plugin(
            Arc::new(JxnFunctionPlugin::new(
                &config.core.prefix.function,
                Arc::clone(&container),
            )),
            JXN_FUNCTION_PRIORITY,
        )?;

        Ok(JxnApp {
            config,
            container,
            classes,
            manager,
            router: JxnRequestRouter::new(),
            response: JxnResponseManager::new(),
            decoder: Box::new(JxnJsonArgumentDecoder),
        })
    }

    /// Builds the app and registers the callables listed in `config`.
    pub fn from_config(config: JxnConfig) -> Result<Self> {
        let app = Self::new(config)?;
        app.register_from_config()?;
        Ok(app)
    }

    pub fn config(&self) -> &JxnConfig {
        &self.config
    }

    pub fn container(&self) -> &Arc<JxnContainer> {
        &self.container
    }

    /// Registry shared by the class and dir plugins.
    pub fn classes(&self) -> &Arc<RwLock<JxnClassRegistry>> {
        &self.classes
    }

    pub fn plugins(&self) -> &JxnPluginManager {
        &self.manager
    }

    pub fn plugins_mut(&mut self) -> &mut JxnPluginManager {
        &mut self.manager
    }

    pub fn set_argument_decoder(&mut self, decoder: Box<dyn JxnArgumentDecoder>) {
        self.decoder = decoder;
    }

    pub fn register(&self, kind: &str, identifier: &str, options: &Value) -> Result<bool> {
        self.manager.register_callable(kind, identifier, options)
    }

    pub fn register_from_config(&self) -> Result<()> {
        self.manager.register_from_config(&self.config)
    }

    pub fn can_process_request(&self, request: &JxnRequest) -> bool {
        JxnRequestRouter::owner(&self.manager, request).is_some()
    }

    pub fn process_request(&mut self, request: &JxnRequest) -> Result<JxnRouteOutcome> {
        self.router.route(
            &self.manager,
            request,
            self.decoder.as_ref(),
            &mut self.response,
        )
    }

    pub fn routing_state(&self) -> &JxnRoutingState {
        self.router.state()
    }

    pub fn response(&self) -> &JxnResponseManager {
        &self.response
    }

    /// Clears the response buffer and returns the router to `Unclaimed`.
    pub fn reset_request(&mut self) {
        self.response.clear();
        self.router.reset();
    }

    pub fn hash(&self) -> Result<String> {
        JxnCodeGenerator::new(&self.manager).hash()
    }

    pub fn script(&self) -> Result<String> {
        JxnCodeGenerator::new(&self.manager).script()
    }

    pub fn export_script(&self, dir: &Path) -> Result<PathBuf> {
        JxnCodeGenerator::new(&self.manager).export(dir)
    }
}
