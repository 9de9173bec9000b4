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

//! # Jxn Event Module
//!
//! Listeners notified while a request is routed. Any number of listeners
//! may be registered; they are called in registration order.

use std::sync::Arc;

use crate::plugin::roles::JxnPlugin;
use crate::request::call::JxnTarget;

#[derive(Clone, Debug, PartialEq)]
pub enum JxnEvent {
    /// A request plugin claimed the call and is about to execute it.
    BeforeRequest { plugin: String, target: JxnTarget },
    /// The claimed call completed.
    AfterRequest { plugin: String, target: JxnTarget },
    /// The claimed call failed with a request error.
    RequestFailed {
        plugin: String,
        target: JxnTarget,
        message: String,
    },
}

pub trait JxnEventListener: JxnPlugin {
    fn on_event(&self, event: &JxnEvent);
}

#[derive(Clone, Default)]
pub struct JxnEventDispatcher {
    listeners: Vec<Arc<dyn JxnEventListener>>,
}

impl JxnEventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, listener: Arc<dyn JxnEventListener>) {
        self.listeners.push(listener);
    }

    pub fn dispatch(&self, event: &JxnEvent) {
        for listener in &self.listeners {
            listener.on_event(event);
        }
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    pub fn clear(&mut self) {
        self.listeners.clear();
    }
}
