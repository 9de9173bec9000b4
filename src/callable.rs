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

//! # Jxn Callable Module
//!
//! The three built-in callable kinds and the host-side contracts they call
//! into.
//!
//! ## Kinds
//!
//! - **function** ([`function::JxnFunctionPlugin`]): free functions, or a
//!   method of a host class exported as a function
//! - **class** ([`class::JxnClassPlugin`]): objects whose methods are
//!   exported under a JS object
//! - **dir** ([`dir::JxnDirPlugin`]): directories of class files, optionally
//!   rooted at a namespace
//!
//! Class and dir plugins share one [`registry::JxnClassRegistry`]; the class
//! plugin emits and executes what the dir plugin declares.

pub mod options;
pub mod registry;
pub mod function;
pub mod class;
pub mod dir;

use std::sync::Arc;

use serde_json::Value;

use crate::response::JxnResponse;

pub const JXN_KIND_FUNCTION: &str = "function";
pub const JXN_KIND_CLASS: &str = "class";
pub const JXN_KIND_DIR: &str = "dir";

/// A host object exported to the browser.
pub trait JxnCallableClass: Send + Sync {
    /// Methods that may be called. `protected` options are removed from this
    /// list before anything is exported.
    fn methods(&self) -> Vec<String>;

    fn call(&self, method: &str, args: &[Value]) -> anyhow::Result<Option<JxnResponse>>;
}

/// A host function exported to the browser.
pub type JxnFunctionHandler =
    Arc<dyn Fn(&[Value]) -> anyhow::Result<Option<JxnResponse>> + Send + Sync>;

/// Turns a server-side class name into its JS name.
pub fn jxn_js_class_name(class: &str, separator: &str) -> String {
    class.replace('\\', separator)
}

/// Normalizes a class name given with `.` or `\` separators to `A\B\C`.
pub fn jxn_class_path(name: &str) -> String {
    name.trim()
        .trim_matches('\\')
        .split(['.', '\\'])
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("\\")
}
