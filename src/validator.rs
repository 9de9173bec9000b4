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

//! # Jxn Validator Module
//!
//! Syntactic checks applied to identifiers before they are registered or
//! dispatched. Request parameters are untrusted, so the request plugins run
//! every value read from a call through these validators and treat a failure
//! as an absent parameter.

use std::sync::OnceLock;

use regex::Regex;

const IDENTIFIER: &str = r"[a-zA-Z_\x{7f}-\x{ff}][a-zA-Z0-9_\x{7f}-\x{ff}]*";

static FUNCTION_RE: OnceLock<Regex> = OnceLock::new();
static CLASS_RE: OnceLock<Regex> = OnceLock::new();

fn identifier_regex() -> Option<&'static Regex> {
    if let Some(re) = FUNCTION_RE.get() {
        return Some(re);
    }
    let re = Regex::new(&format!("^{}$", IDENTIFIER)).ok()?;
    Some(FUNCTION_RE.get_or_init(|| re))
}

fn class_regex() -> Option<&'static Regex> {
    if let Some(re) = CLASS_RE.get() {
        return Some(re);
    }
    let re = Regex::new(&format!(r"^{id}(?:[.\\]{id})*$", id = IDENTIFIER)).ok()?;
    Some(CLASS_RE.get_or_init(|| re))
}

/// Identifier validators for functions, classes and methods.
pub struct JxnValidator;

impl JxnValidator {
    /// A function name, or the alias it is exported under.
    pub fn validate_function(name: &str) -> bool {
        identifier_regex().is_some_and(|re| re.is_match(name))
    }

    /// A class name. Segments may be joined by `\` (server side) or `.`
    /// (the JS name sent back by the browser).
    pub fn validate_class(name: &str) -> bool {
        class_regex().is_some_and(|re| re.is_match(name))
    }

    pub fn validate_method(name: &str) -> bool {
        identifier_regex().is_some_and(|re| re.is_match(name))
    }
}
