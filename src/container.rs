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

//! # Jxn Container Module
//!
//! Narrow dependency-resolution context. It builds host objects on demand:
//! exported classes, function handlers, and packages. Each class and package
//! is built once, on first use, and then shared.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use serde_json::Value;

use crate::callable::{jxn_class_path, JxnCallableClass, JxnFunctionHandler};
use crate::response::JxnResponse;

pub type JxnClassFactory = Arc<dyn Fn() -> Arc<dyn JxnCallableClass> + Send + Sync>;

/// A bundle of client code and server objects installed as one unit.
pub trait JxnPackage: Send + Sync {
    /// JS appended to the generated bindings.
    fn script(&self) -> String {
        String::new()
    }
}

pub type JxnPackageFactory = Arc<dyn Fn() -> Arc<dyn JxnPackage> + Send + Sync>;

#[derive(Default)]
pub struct JxnContainer {
    class_factories: RwLock<HashMap<String, JxnClassFactory>>,
    classes: RwLock<HashMap<String, Arc<dyn JxnCallableClass>>>,
    functions: RwLock<HashMap<String, JxnFunctionHandler>>,
    package_factories: RwLock<HashMap<String, JxnPackageFactory>>,
    packages: RwLock<HashMap<String, Arc<dyn JxnPackage>>>,
}

impl JxnContainer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the factory for `class` (`A\B` or `A.B`). Replacing a
    /// factory drops the instance built by the previous one.
    pub fn set_class<F>(&self, class: &str, factory: F)
    where
        F: Fn() -> Arc<dyn JxnCallableClass> + Send + Sync + 'static,
    {
        let class = jxn_class_path(class);
        self.classes
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&class);
        self.class_factories
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(class, Arc::new(factory));
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.class_factories
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(&jxn_class_path(class))
    }

    pub fn class(&self, class: &str) -> Option<Arc<dyn JxnCallableClass>> {
        let class = jxn_class_path(class);
        if let Some(instance) = self
            .classes
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&class)
        {
            return Some(Arc::clone(instance));
        }

        let factory = self
            .class_factories
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&class)
            .cloned()?;
        let instance = factory();
        self.classes
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(class, Arc::clone(&instance));
        Some(instance)
    }

    pub fn set_function<F>(&self, name: &str, handler: F)
    where
        F: Fn(&[Value]) -> anyhow::Result<Option<JxnResponse>> + Send + Sync + 'static,
    {
        self.functions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.to_string(), Arc::new(handler));
    }

    pub fn function(&self, name: &str) -> Option<JxnFunctionHandler> {
        self.functions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }

    /// Registers the lazy constructor for a package. The last factory wins.
    pub fn set_package(&self, id: &str, factory: JxnPackageFactory) {
        self.packages
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(id);
        self.package_factories
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id.to_string(), factory);
    }

    pub fn package(&self, id: &str) -> Option<Arc<dyn JxnPackage>> {
        if let Some(instance) = self
            .packages
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
        {
            return Some(Arc::clone(instance));
        }

        let factory = self
            .package_factories
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned()?;
        let instance = factory();
        self.packages
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id.to_string(), Arc::clone(&instance));
        Some(instance)
    }
}
