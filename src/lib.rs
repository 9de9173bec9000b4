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

//! # Jxn Core Library
//!
//! Dispatch and code-generation core for browser-callable server code.
//! Host functions, classes and whole directories of classes are exported to
//! the browser as generated JavaScript stubs, and AJAX calls coming back are
//! routed to the right server-side callable.
//!
//! ## Module Overview
//!
//! - **plugin**: plugin contracts, role classification, priority table and
//!   the plugin manager
//! - **callable**: the built-in `function`, `class` and `dir` request plugins
//! - **request**: inbound call parameters, argument decoding, routing
//! - **response**: response commands and the per-request output buffer
//! - **hash** / **codegen**: change detection and binding generation
//! - **config**: library options and registration sections
//! - **container**: lazy construction of host objects
//! - **app**: the bootstrap facade wiring all of the above
//!
//! ## Feature Flags
//!
//! - `yaml`: YAML configuration files
//! - `full`: Enables all features
//!
//! ## Request Lifecycle
//!
//! 1. **Bootstrap**: configuration is read and callables are registered
//! 2. **Bindings**: `script()` emits the JS stubs, `hash()` tells whether a
//!    cached copy is still valid
//! 3. **Routing**: each request plugin, in priority order, is asked whether
//!    it owns the call; the first one that does executes it
//! 4. **Reset**: the host clears the response buffer and routing state
//!    before the next call
//!
//! ## Error Handling
//!
//! All operations return `Result<T, JxnError>`. Registration and setup
//! errors stop the registration statement that raised them; request errors
//! stop the single call being routed.

pub mod errors;
pub mod config;
pub mod validator;
pub mod hash;
pub mod container;
pub mod plugin;
pub mod callable;
pub mod request;
pub mod response;
pub mod codegen;
pub mod app;

pub use errors::{JxnError, Result};
pub use config::{JxnConfig, JxnConfigKey, JxnCoreConfig, JxnPrefixConfig, JxnRegistrationMode};
pub use validator::JxnValidator;
pub use hash::{jxn_combine_hashes, JxnBindingHasher};
pub use container::{JxnClassFactory, JxnContainer, JxnPackage, JxnPackageFactory};
pub use plugin::{
    JxnAlert, JxnCapabilities, JxnConfirm, JxnDialog, JxnEvent, JxnEventDispatcher,
    JxnEventListener, JxnPlugin, JxnPluginEntry, JxnPluginManager, JxnPluginRole,
    JxnPriorityBand, JxnPriorityRegistry, JxnRequestPlugin, JxnResponsePlugin, JxnRole,
    JXN_DEFAULT_PRIORITY,
};
pub use callable::options::JxnCallableOptions;
pub use callable::registry::{JxnClassEntry, JxnClassRegistry, JxnNamespaceRoot};
pub use callable::class::JxnClassPlugin;
pub use callable::dir::JxnDirPlugin;
pub use callable::function::{JxnFunctionEntry, JxnFunctionPlugin};
pub use callable::{
    JxnCallableClass, JxnFunctionHandler, JXN_KIND_CLASS, JXN_KIND_DIR, JXN_KIND_FUNCTION,
};
pub use request::{
    JxnArgumentDecoder, JxnCallContext, JxnJsonArgumentDecoder, JxnRequest, JxnRequestRouter,
    JxnRouteOutcome, JxnRoutingState, JxnTarget,
};
pub use response::{JxnCommand, JxnResponse, JxnResponseManager};
pub use codegen::JxnCodeGenerator;
pub use app::JxnApp;
