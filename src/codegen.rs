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

//! # Jxn Code Generation Module
//!
//! Assembles the client bindings of every plugin, in priority order, and
//! caches them on disk under their combined hash.
//!
//! Superseded request plugins are skipped. Package scripts follow the
//! plugin scripts, one per distinct package id, in first-registration order.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::Result;
use crate::hash::jxn_combine_hashes;
use crate::plugin::manager::JxnPluginManager;

pub struct JxnCodeGenerator<'a> {
    manager: &'a JxnPluginManager,
}

impl<'a> JxnCodeGenerator<'a> {
    pub fn new(manager: &'a JxnPluginManager) -> Self {
        JxnCodeGenerator { manager }
    }

    fn package_ids(&self) -> Vec<&'a str> {
        let mut seen = HashSet::new();
        self.manager
            .packages()
            .iter()
            .map(String::as_str)
            .filter(|id| seen.insert(*id))
            .collect()
    }

    /// Digest over every plugin's hash and the installed packages. Fails
    /// as soon as one plugin cannot compute its own.
    pub fn hash(&self) -> Result<String> {
        let mut parts: Vec<String> = Vec::new();
        for entry in self.manager.active_plugins() {
            parts.push(entry.plugin.type_name().to_string());
            parts.push(entry.plugin.hash()?);
        }
        for id in self.package_ids() {
            parts.push(id.to_string());
        }
        Ok(jxn_combine_hashes(parts.iter().map(String::as_str)))
    }

    pub fn script(&self) -> Result<String> {
        let mut code = String::new();
        for entry in self.manager.active_plugins() {
            code.push_str(&entry.plugin.script()?);
        }
        for id in self.package_ids() {
            match self.manager.container().package(id) {
                Some(package) => code.push_str(&package.script()),
                None => log::warn!("codegen.package.missing: package has no factory - package={}", id),
            }
        }
        Ok(code)
    }

    /// Writes the bindings to `<dir>/<hash>.js` unless that file already
    /// exists, and returns its path.
    pub fn export(&self, dir: &Path) -> Result<PathBuf> {
        let hash = self.hash()?;
        let path = dir.join(format!("{}.js", hash));
        if path.is_file() {
            log::debug!("codegen.export.hit: bindings already cached - path={}", path.display());
            return Ok(path);
        }

        let code = self.script()?;
        fs::create_dir_all(dir)?;
        fs::write(&path, code.as_bytes())?;
        log::info!(
            "codegen.export.write: bindings written - path={}, bytes={}",
            path.display(),
            code.len()
        );
        Ok(path)
    }
}
