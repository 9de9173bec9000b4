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

//! # Jxn Request Router Module
//!
//! Per-call state machine:
//!
//! ```text
//! Unclaimed --claim--> Claimed --execute--> Executed
//!     |                   |
//!     +-- no owner --> Rejected <-- failure
//! ```
//!
//! Request plugins are probed in ascending priority order and the first one
//! that can process the call owns it; no further plugin is asked. A call no
//! plugin claims is not a library request and should be served as a normal
//! page. Any failure of the owning plugin surfaces as a request error.
//!
//! The router never resets itself. Hosts that reuse it across requests call
//! [`JxnRequestRouter::reset`] (and clear the response buffer) in between.

use std::sync::Arc;

use crate::errors::{JxnError, Result};
use crate::plugin::event::JxnEvent;
use crate::plugin::manager::JxnPluginManager;
use crate::plugin::roles::JxnRequestPlugin;
use crate::request::args::JxnArgumentDecoder;
use crate::request::call::{JxnCallContext, JxnRequest, JxnTarget};
use crate::response::JxnResponseManager;

#[derive(Clone, Debug, Default, PartialEq)]
pub enum JxnRoutingState {
    #[default]
    Unclaimed,
    Claimed { plugin: String, target: JxnTarget },
    Executed { plugin: String, target: JxnTarget },
    Rejected,
}

#[derive(Clone, Debug, PartialEq)]
pub enum JxnRouteOutcome {
    /// No plugin claimed the call.
    NotLibraryRequest,
    Executed { plugin: String, target: JxnTarget },
}

#[derive(Debug, Default)]
pub struct JxnRequestRouter {
    state: JxnRoutingState,
}

impl JxnRequestRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &JxnRoutingState {
        &self.state
    }

    pub fn reset(&mut self) {
        self.state = JxnRoutingState::Unclaimed;
    }

    /// The plugin that would claim `request`, without changing any state.
    pub fn owner(
        manager: &JxnPluginManager,
        request: &JxnRequest,
    ) -> Option<(Arc<dyn JxnRequestPlugin>, JxnTarget)> {
        for plugin in manager.request_plugins() {
            if !plugin.can_process_request(request) {
                continue;
            }
            if let Some(target) = plugin.target(request) {
                return Some((plugin, target));
            }
        }
        None
    }

    /// Moves from `Unclaimed` to `Claimed`, or to `Rejected` when no plugin
    /// owns the call.
    pub fn claim(
        &mut self,
        manager: &JxnPluginManager,
        request: &JxnRequest,
    ) -> Result<Option<Arc<dyn JxnRequestPlugin>>> {
        if self.state != JxnRoutingState::Unclaimed {
            return Err(JxnError::request(
                "router",
                format!("cannot route a new call from state {:?}; reset first", self.state),
            ));
        }

        match Self::owner(manager, request) {
            Some((plugin, target)) => {
                log::debug!(
                    "request.route.claim: request claimed - plugin={}, target={}",
                    plugin.name(),
                    target
                );
                self.state = JxnRoutingState::Claimed {
                    plugin: plugin.name().to_string(),
                    target,
                };
                Ok(Some(plugin))
            }
            None => {
                log::debug!("request.route.unclaimed: not a library request");
                self.state = JxnRoutingState::Rejected;
                Ok(None)
            }
        }
    }

    /// Claims and executes `request`, appending its output to `response`.
    pub fn route(
        &mut self,
        manager: &JxnPluginManager,
        request: &JxnRequest,
        decoder: &dyn JxnArgumentDecoder,
        response: &mut JxnResponseManager,
    ) -> Result<JxnRouteOutcome> {
        let plugin = match self.claim(manager, request)? {
            Some(plugin) => plugin,
            None => return Ok(JxnRouteOutcome::NotLibraryRequest),
        };
        let (name, target) = match &self.state {
            JxnRoutingState::Claimed { plugin, target } => (plugin.clone(), target.clone()),
            _ => return Err(JxnError::request("router", "claimed state lost")),
        };

        manager.events().dispatch(&JxnEvent::BeforeRequest {
            plugin: name.clone(),
            target: target.clone(),
        });

        let mut context = JxnCallContext::new(decoder, response);
        let result = match plugin.process_request(request, &mut context) {
            Ok(true) => Ok(()),
            Ok(false) => Err(JxnError::request(
                target.to_string(),
                format!("plugin '{}' did not process the claimed call", name),
            )),
            Err(err @ JxnError::Request { .. }) => Err(err),
            Err(other) => Err(JxnError::request(target.to_string(), other.to_string())),
        };

        match result {
            Ok(()) => {
                self.state = JxnRoutingState::Executed {
                    plugin: name.clone(),
                    target: target.clone(),
                };
                manager.events().dispatch(&JxnEvent::AfterRequest {
                    plugin: name.clone(),
                    target: target.clone(),
                });
                Ok(JxnRouteOutcome::Executed { plugin: name, target })
            }
            Err(err) => {
                log::error!(
                    "request.route.failed: claimed call failed - plugin={}, target={}, error={}",
                    name,
                    target,
                    err
                );
                self.state = JxnRoutingState::Rejected;
                manager.events().dispatch(&JxnEvent::RequestFailed {
                    plugin: name,
                    target,
                    message: err.to_string(),
                });
                Err(err)
            }
        }
    }
}
