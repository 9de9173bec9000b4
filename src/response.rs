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

//! # Jxn Response Module
//!
//! Commands returned to the browser, and the per-request output buffer the
//! winning request plugin appends to.
//!
//! Only one plugin claims a request, so the buffer sees a single writer. It
//! is never cleared implicitly: hosts that keep process state across
//! requests call [`JxnResponseManager::clear`] between them.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::plugin::dialog::JxnDialog;

/// One client-side command, e.g. `{"cmd": "as", "id": "msg", "prop": "innerHTML", "data": "Hi"}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct JxnCommand {
    pub cmd: String,
    #[serde(flatten)]
    pub args: Map<String, Value>,
}

impl JxnCommand {
    pub fn new(cmd: impl Into<String>, args: Value) -> Self {
        let args = match args {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        JxnCommand {
            cmd: cmd.into(),
            args,
        }
    }
}

/// Ordered list of commands produced by one callable.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct JxnResponse {
    commands: Vec<JxnCommand>,
}

impl JxnResponse {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_command(&mut self, command: JxnCommand) -> &mut Self {
        self.commands.push(command);
        self
    }

    /// Replaces a property of the element `id`.
    pub fn assign(&mut self, id: &str, prop: &str, data: impl Into<Value>) -> &mut Self {
        self.add_command(JxnCommand::new(
            "as",
            json!({ "id": id, "prop": prop, "data": data.into() }),
        ))
    }

    /// Appends to a property of the element `id`.
    pub fn append(&mut self, id: &str, prop: &str, data: impl Into<Value>) -> &mut Self {
        self.add_command(JxnCommand::new(
            "ap",
            json!({ "id": id, "prop": prop, "data": data.into() }),
        ))
    }

    pub fn alert(&mut self, message: &str) -> &mut Self {
        self.add_command(JxnCommand::new("al", json!({ "data": message })))
    }

    /// Alerts through whichever alert provider is wired into `dialog`.
    pub fn alert_with(&mut self, dialog: &JxnDialog, message: &str) -> &mut Self {
        let code = dialog.alert(message);
        self.script(&code)
    }

    /// Runs `code` only once the user accepts `question`.
    pub fn confirm_with(&mut self, dialog: &JxnDialog, question: &str, code: &str) -> &mut Self {
        let code = dialog.confirm(question, code, "");
        self.script(&code)
    }

    pub fn script(&mut self, code: &str) -> &mut Self {
        self.add_command(JxnCommand::new("js", json!({ "data": code })))
    }

    /// Calls the JS function `func` with `args`.
    pub fn call(&mut self, func: &str, args: Vec<Value>) -> &mut Self {
        self.add_command(JxnCommand::new(
            "jc",
            json!({ "func": func, "data": args }),
        ))
    }

    pub fn commands(&self) -> &[JxnCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

/// Append-only output buffer for the current request.
#[derive(Debug, Default)]
pub struct JxnResponseManager {
    commands: Vec<JxnCommand>,
}

impl JxnResponseManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, response: JxnResponse) {
        self.commands.extend(response.commands);
    }

    pub fn commands(&self) -> &[JxnCommand] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Renders the buffer as the JSON document the browser library expects.
    pub fn output(&self) -> String {
        json!({ "jxnobj": self.commands }).to_string()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }
}
