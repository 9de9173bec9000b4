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

//! # Jxn Class Registry Module
//!
//! Repository of exported classes, shared by the class and dir plugins.
//!
//! ## Sources
//!
//! - **explicit classes**, registered one by one (timestamp `0`)
//! - **namespace roots**: a directory scanned recursively; each
//!   sub-directory is a sub-namespace and each class file a class named
//!   `Namespace\Sub\FileStem`
//! - **bare directories**: top-level class files only, no namespace
//!
//! Directories are re-scanned by every read that needs classes, so class
//! files added, removed or touched on disk show up without registering
//! again. Discovered classes carry the file's modification time (seconds
//! since the epoch) as timestamp. Symbolic links are not followed.

use std::collections::BTreeMap;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

use walkdir::{DirEntry, WalkDir};

use crate::callable::options::JxnCallableOptions;
use crate::callable::{jxn_class_path, jxn_js_class_name};
use crate::container::JxnContainer;
use crate::errors::Result;
use crate::validator::JxnValidator;

pub const JXN_DEFAULT_SEPARATOR: &str = ".";

/// Returns `separator` if it is `.` or `_`, otherwise the default.
pub fn jxn_separator(separator: Option<&str>) -> String {
    match separator.map(str::trim) {
        Some("_") => "_".to_string(),
        Some(".") | None => JXN_DEFAULT_SEPARATOR.to_string(),
        Some(other) => {
            log::warn!(
                "callable.separator.invalid: unsupported separator replaced by default - separator={}, default={}",
                other,
                JXN_DEFAULT_SEPARATOR
            );
            JXN_DEFAULT_SEPARATOR.to_string()
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct JxnNamespaceRoot {
    pub namespace: String,
    pub directory: PathBuf,
    pub separator: String,
    /// When false, only classes the container can already build are
    /// discovered.
    pub autoload: bool,
    pub options: JxnCallableOptions,
}

#[derive(Clone, Debug, PartialEq)]
pub struct JxnClassEntry {
    /// `A\B\C`
    pub class: String,
    /// `A.B.C` or `A_B_C`, without prefix.
    pub js_name: String,
    pub separator: String,
    pub options: JxnCallableOptions,
    pub timestamp: u64,
}

#[derive(Debug)]
pub struct JxnClassRegistry {
    extension: String,
    roots: BTreeMap<String, JxnNamespaceRoot>,
    directories: BTreeMap<PathBuf, JxnCallableOptions>,
    explicit: BTreeMap<String, JxnCallableOptions>,
    namespaces: BTreeMap<String, String>,
    discovered: BTreeMap<String, JxnClassEntry>,
}

impl JxnClassRegistry {
    /// `extension` selects class files during directory scans, e.g. `"php"`.
    pub fn new(extension: &str) -> Self {
        JxnClassRegistry {
            extension: extension.trim_start_matches('.').to_string(),
            roots: BTreeMap::new(),
            directories: BTreeMap::new(),
            explicit: BTreeMap::new(),
            namespaces: BTreeMap::new(),
            discovered: BTreeMap::new(),
        }
    }

    pub fn add_class(&mut self, class: &str, options: JxnCallableOptions) {
        self.explicit.insert(jxn_class_path(class), options);
    }

    /// Declares a namespace root. Registering the same namespace again
    /// replaces the previous root.
    pub fn add_namespace(&mut self, namespace: &str, directory: PathBuf, options: JxnCallableOptions) {
        let namespace = jxn_class_path(namespace);
        let root = JxnNamespaceRoot {
            namespace: namespace.clone(),
            directory,
            separator: jxn_separator(options.separator.as_deref()),
            autoload: options.autoload.unwrap_or(true),
            options,
        };
        self.roots.insert(namespace, root);
    }

    pub fn add_directory(&mut self, directory: PathBuf, options: JxnCallableOptions) {
        self.directories.insert(directory, options);
    }

    pub fn roots(&self) -> impl Iterator<Item = &JxnNamespaceRoot> + '_ {
        self.roots.values()
    }

    pub fn directories(&self) -> impl Iterator<Item = (&PathBuf, &JxnCallableOptions)> + '_ {
        self.directories.iter()
    }

    /// Re-scans the registered directories.
    pub fn parse(&mut self, container: &JxnContainer) -> Result<()> {
        let mut namespaces = BTreeMap::new();
        let mut discovered = BTreeMap::new();
        for root in self.roots.values() {
            scan_namespace(&self.extension, root, container, &mut namespaces, &mut discovered)?;
        }
        for (directory, options) in &self.directories {
            let separator = jxn_separator(options.separator.as_deref());
            for (stem, timestamp) in class_files(&self.extension, directory)? {
                discovered.insert(
                    stem.clone(),
                    JxnClassEntry {
                        js_name: stem.clone(),
                        class: stem,
                        separator: separator.clone(),
                        options: options.clone(),
                        timestamp,
                    },
                );
            }
        }

        log::debug!(
            "callable.class.parse: directories scanned - roots={}, directories={}, classes={}",
            self.roots.len(),
            self.directories.len(),
            discovered.len()
        );

        self.namespaces = namespaces;
        self.discovered = discovered;
        Ok(())
    }

    /// Namespaces found by the last scan, each with its separator.
    pub fn namespaces(&self) -> &BTreeMap<String, String> {
        &self.namespaces
    }

    /// Explicit and discovered classes, keyed by class name. Explicit
    /// options override the options of a discovered class of the same name.
    pub fn classes(&self) -> BTreeMap<String, JxnClassEntry> {
        let mut out = self.discovered.clone();
        for (class, options) in &self.explicit {
            let separator = options
                .separator
                .as_deref()
                .map(|s| jxn_separator(Some(s)))
                .unwrap_or_else(|| self.separator_for(class));
            let timestamp = out.get(class).map(|e| e.timestamp).unwrap_or(0);
            out.insert(
                class.clone(),
                JxnClassEntry {
                    class: class.clone(),
                    js_name: jxn_js_class_name(class, &separator),
                    separator,
                    options: options.clone(),
                    timestamp,
                },
            );
        }
        out
    }

    pub fn find_by_js_name(&self, js_name: &str) -> Option<JxnClassEntry> {
        self.classes().into_values().find(|e| e.js_name == js_name)
    }

    /// Separator of the deepest namespace root containing `class`.
    fn separator_for(&self, class: &str) -> String {
        self.roots
            .values()
            .filter(|r| class.starts_with(&format!("{}\\", r.namespace)))
            .max_by_key(|r| r.namespace.len())
            .map(|r| r.separator.clone())
            .unwrap_or_else(|| JXN_DEFAULT_SEPARATOR.to_string())
    }
}

fn scan_namespace(
    extension: &str,
    root: &JxnNamespaceRoot,
    container: &JxnContainer,
    namespaces: &mut BTreeMap<String, String>,
    discovered: &mut BTreeMap<String, JxnClassEntry>,
) -> Result<()> {
    // Sub-directories whose name is not an identifier are skipped with
    // everything below them.
    let walker = WalkDir::new(&root.directory)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !e.file_type().is_dir() || is_identifier(e.file_name()));

    for entry in walker {
        let entry = entry?;
        let relative = match entry.path().strip_prefix(&root.directory) {
            Ok(relative) => relative,
            Err(_) => continue,
        };
        if entry.file_type().is_dir() {
            namespaces.insert(sub_namespace(&root.namespace, relative), root.separator.clone());
            continue;
        }
        let stem = match class_stem(extension, &entry) {
            Some(stem) => stem,
            None => continue,
        };
        let parent = relative.parent().unwrap_or_else(|| Path::new(""));
        let class = format!("{}\\{}", sub_namespace(&root.namespace, parent), stem);
        if !root.autoload && !container.has_class(&class) {
            continue;
        }
        discovered.insert(
            class.clone(),
            JxnClassEntry {
                js_name: jxn_js_class_name(&class, &root.separator),
                class,
                separator: root.separator.clone(),
                options: root.options.clone(),
                timestamp: modified_secs(&entry)?,
            },
        );
    }
    Ok(())
}

/// `(file stem, mtime)` of every class file directly inside `directory`.
fn class_files(extension: &str, directory: &Path) -> Result<Vec<(String, u64)>> {
    let mut out = Vec::new();
    for entry in WalkDir::new(directory).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry?;
        if let Some(stem) = class_stem(extension, &entry) {
            out.push((stem, modified_secs(&entry)?));
        }
    }
    Ok(out)
}

/// `App\Sub\Deeper` for `relative == "Sub/Deeper"`.
fn sub_namespace(namespace: &str, relative: &Path) -> String {
    relative
        .components()
        .filter_map(|c| c.as_os_str().to_str())
        .fold(namespace.to_string(), |mut out, part| {
            out.push('\\');
            out.push_str(part);
            out
        })
}

fn is_identifier(name: &OsStr) -> bool {
    name.to_str().is_some_and(JxnValidator::validate_method)
}

fn class_stem(extension: &str, entry: &DirEntry) -> Option<String> {
    let path = entry.path();
    if !entry.file_type().is_file() || path.extension().and_then(OsStr::to_str) != Some(extension) {
        return None;
    }
    path.file_stem()
        .and_then(OsStr::to_str)
        .filter(|stem| JxnValidator::validate_method(stem))
        .map(str::to_string)
}

fn modified_secs(entry: &DirEntry) -> Result<u64> {
    Ok(entry
        .metadata()?
        .modified()
        .ok()
        .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
        .map(|d| d.as_secs())
        .unwrap_or(0))
}
