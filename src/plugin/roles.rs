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

//! # Jxn Plugin Roles Module
//!
//! Contracts a plugin can fulfill, and the classifier that folds a plugin's
//! declared roles into a [`JxnCapabilities`] record.
//!
//! ## Roles
//!
//! - **Request**: claims and executes inbound calls, owns one callable kind
//! - **Response**: a named response extension
//! - **Alert** / **Confirm**: dialog providers
//! - **Listener**: receives routing events
//!
//! A plugin declares its roles explicitly from [`JxnPlugin::roles`]; nothing
//! is inferred from the concrete type. A plugin declaring no role is
//! rejected by the manager.
//!
//! ```rust
//! struct Toast;
//!
//! impl JxnPlugin for Toast {
//!     fn roles(self: Arc<Self>) -> Vec<JxnPluginRole> {
//!         vec![JxnPluginRole::Alert(self)]
//!     }
//! }
//!
//! impl JxnAlert for Toast {
//!     fn alert(&self, message: &str) -> String {
//!         format!("toastr.info({});", jxn_js_string(message))
//!     }
//! }
//! ```

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::callable::options::JxnCallableOptions;
use crate::errors::Result;
use crate::plugin::dialog::{JxnAlert, JxnConfirm};
use crate::plugin::event::JxnEventListener;
use crate::request::call::{JxnCallContext, JxnRequest, JxnTarget};

/// Base contract of every plugin.
pub trait JxnPlugin: Send + Sync {
    /// The roles this plugin fulfills, each carrying the matching handle.
    fn roles(self: Arc<Self>) -> Vec<JxnPluginRole>;

    /// Concrete type name, used in diagnostics.
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Change-detection digest of whatever this plugin emits. Fails when
    /// the state it covers cannot be read.
    fn hash(&self) -> Result<String> {
        Ok(String::new())
    }

    /// Client-side code contributed by this plugin.
    fn script(&self) -> Result<String> {
        Ok(String::new())
    }
}

/// A plugin owning one callable kind and the requests that target it.
pub trait JxnRequestPlugin: JxnPlugin {
    /// Name of the callable kind, e.g. `"function"`.
    fn name(&self) -> &str;

    /// Validates `identifier` and normalizes raw options. A string is a
    /// shorthand for the plugin's main option; `null` means no options.
    fn check_options(&self, identifier: &str, options: &Value) -> Result<JxnCallableOptions>;

    fn register(&self, kind: &str, identifier: &str, options: JxnCallableOptions) -> Result<bool>;

    /// Reads this plugin's call parameters. Invalid values count as absent.
    fn target(&self, request: &JxnRequest) -> Option<JxnTarget>;

    fn can_process_request(&self, request: &JxnRequest) -> bool {
        self.target(request).is_some()
    }

    /// Executes a claimed call and appends its output to the context.
    fn process_request(&self, request: &JxnRequest, context: &mut JxnCallContext<'_>) -> Result<bool>;
}

pub trait JxnResponsePlugin: JxnPlugin {
    fn name(&self) -> &str;
}

/// Role tags, without handles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum JxnRole {
    RequestHandler,
    ResponseHandler,
    AlertProvider,
    ConfirmProvider,
    EventListener,
}

/// A declared role together with the handle that fulfills it.
#[derive(Clone)]
pub enum JxnPluginRole {
    Request(Arc<dyn JxnRequestPlugin>),
    Response(Arc<dyn JxnResponsePlugin>),
    Alert(Arc<dyn JxnAlert>),
    Confirm(Arc<dyn JxnConfirm>),
    Listener(Arc<dyn JxnEventListener>),
}

impl JxnPluginRole {
    pub fn role(&self) -> JxnRole {
        match self {
            JxnPluginRole::Request(_) => JxnRole::RequestHandler,
            JxnPluginRole::Response(_) => JxnRole::ResponseHandler,
            JxnPluginRole::Alert(_) => JxnRole::AlertProvider,
            JxnPluginRole::Confirm(_) => JxnRole::ConfirmProvider,
            JxnPluginRole::Listener(_) => JxnRole::EventListener,
        }
    }
}

/// What a plugin turned out to be.
#[derive(Clone, Default)]
pub struct JxnCapabilities {
    pub request: Option<Arc<dyn JxnRequestPlugin>>,
    pub response: Option<Arc<dyn JxnResponsePlugin>>,
    pub alert: Option<Arc<dyn JxnAlert>>,
    pub confirm: Option<Arc<dyn JxnConfirm>>,
    pub listener: Option<Arc<dyn JxnEventListener>>,
}

impl JxnCapabilities {
    /// Folds the plugin's declared roles. A role declared twice keeps the
    /// last handle.
    pub fn classify(plugin: &Arc<dyn JxnPlugin>) -> Self {
        let mut caps = JxnCapabilities::default();
        for role in Arc::clone(plugin).roles() {
            match role {
                JxnPluginRole::Request(p) => caps.request = Some(p),
                JxnPluginRole::Response(p) => caps.response = Some(p),
                JxnPluginRole::Alert(p) => caps.alert = Some(p),
                JxnPluginRole::Confirm(p) => caps.confirm = Some(p),
                JxnPluginRole::Listener(p) => caps.listener = Some(p),
            }
        }
        caps
    }

    pub fn has(&self, role: JxnRole) -> bool {
        match role {
            JxnRole::RequestHandler => self.request.is_some(),
            JxnRole::ResponseHandler => self.response.is_some(),
            JxnRole::AlertProvider => self.alert.is_some(),
            JxnRole::ConfirmProvider => self.confirm.is_some(),
            JxnRole::EventListener => self.listener.is_some(),
        }
    }

    pub fn roles(&self) -> Vec<JxnRole> {
        [
            JxnRole::RequestHandler,
            JxnRole::ResponseHandler,
            JxnRole::AlertProvider,
            JxnRole::ConfirmProvider,
            JxnRole::EventListener,
        ]
        .into_iter()
        .filter(|r| self.has(*r))
        .collect()
    }

    pub fn is_recognized(&self) -> bool {
        !self.roles().is_empty()
    }
}

impl fmt::Debug for JxnCapabilities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.roles()).finish()
    }
}
