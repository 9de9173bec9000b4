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

//! # Jxn Dialog Module
//!
//! Alert and confirm providers. At most one of each is active; the plugin
//! manager wires the last registered provider at bootstrap and the response
//! builders read it when they emit commands. Without a provider the
//! browser's own `alert()` and `confirm()` are used.

use std::sync::Arc;

use crate::plugin::roles::JxnPlugin;

/// Produces the JS that shows a message to the user.
pub trait JxnAlert: JxnPlugin {
    fn alert(&self, message: &str) -> String;
}

/// Produces the JS that asks a question and runs `yes` or `no`.
pub trait JxnConfirm: JxnPlugin {
    fn confirm(&self, question: &str, yes: &str, no: &str) -> String;
}

/// Quotes `text` as a single-quoted JS string literal.
pub fn jxn_js_string(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('\'');
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            _ => out.push(c),
        }
    }
    out.push('\'');
    out
}

/// The currently wired alert and confirm providers.
#[derive(Clone, Default)]
pub struct JxnDialog {
    alert: Option<Arc<dyn JxnAlert>>,
    confirm: Option<Arc<dyn JxnConfirm>>,
}

impl JxnDialog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_alert(&mut self, provider: Arc<dyn JxnAlert>) {
        self.alert = Some(provider);
    }

    pub fn set_confirm(&mut self, provider: Arc<dyn JxnConfirm>) {
        self.confirm = Some(provider);
    }

    pub fn has_alert(&self) -> bool {
        self.alert.is_some()
    }

    pub fn has_confirm(&self) -> bool {
        self.confirm.is_some()
    }

    pub fn alert(&self, message: &str) -> String {
        match &self.alert {
            Some(provider) => provider.alert(message),
            None => format!("alert({});", jxn_js_string(message)),
        }
    }

    pub fn confirm(&self, question: &str, yes: &str, no: &str) -> String {
        if let Some(provider) = &self.confirm {
            return provider.confirm(question, yes, no);
        }
        if no.is_empty() {
            format!("if(confirm({})){{{}}}", jxn_js_string(question), yes)
        } else {
            format!(
                "if(confirm({})){{{}}}else{{{}}}",
                jxn_js_string(question),
                yes,
                no
            )
        }
    }

    /// Drops both providers. Only called on explicit teardown.
    pub fn reset(&mut self) {
        self.alert = None;
        self.confirm = None;
    }
}
