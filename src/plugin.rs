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

//! # Jxn Plugin Module
//!
//! Plugin contracts, capability classification, priority ordering and the
//! manager that ties them together.

pub mod roles;
pub mod priority;
pub mod manager;
pub mod dialog;
pub mod event;

pub use roles::{
    JxnCapabilities, JxnPlugin, JxnPluginRole, JxnRequestPlugin, JxnResponsePlugin, JxnRole,
};
pub use priority::{JxnPriorityBand, JxnPriorityRegistry, JXN_DEFAULT_PRIORITY};
pub use manager::{JxnPluginEntry, JxnPluginManager};
pub use dialog::{jxn_js_string, JxnAlert, JxnConfirm, JxnDialog};
pub use event::{JxnEvent, JxnEventDispatcher, JxnEventListener};
