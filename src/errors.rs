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

//! # Jxn Error Module
//!
//! This module defines the error types shared by registration, option
//! checking and request routing.
//!
//! ## Error Categories
//!
//! - **Registration**: a plugin fulfills no recognized role
//! - **UnknownPlugin**: a callable kind has no matching request plugin
//!   (a registration failure as well, see [`JxnError::is_registration`])
//! - **Setup**: malformed options, invalid identifiers, missing directories
//! - **Request**: a claimed call whose target cannot be located or executed
//! - **Io** / **Serde**: filesystem and (de)serialization failures
//!
//! Registration and setup errors are terminal to the registration statement
//! that raised them. Request errors are terminal to the single inbound call;
//! the host translates them into an error HTTP response.

use std::io;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Convenience result type used throughout Jxn.
pub type Result<T> = std::result::Result<T, JxnError>;

/// Canonical error enumeration for Jxn.
#[derive(Debug, Error, Serialize, Deserialize)]
pub enum JxnError {
    /// A plugin could not be registered.
    #[error("registration error: {message}")]
    Registration { message: String },

    /// No request plugin is registered under the requested callable kind.
    #[error("registration error: no request plugin named '{name}'")]
    UnknownPlugin { name: String },

    /// Malformed registration options or identifiers.
    #[error("setup error: {message}")]
    Setup { message: String },

    /// A claimed request could not be carried out.
    #[error("request error for {target}: {message}")]
    Request { target: String, message: String },

    /// Errors originating from filesystem IO.
    #[error("io error: {0}")]
    Io(String),

    /// Wrapper for serde-style serialization issues.
    #[error("serialization error: {0}")]
    Serde(String),
}

impl From<io::Error> for JxnError {
    fn from(err: io::Error) -> Self {
        JxnError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for JxnError {
    fn from(err: serde_json::Error) -> Self {
        JxnError::Serde(err.to_string())
    }
}

impl From<walkdir::Error> for JxnError {
    fn from(err: walkdir::Error) -> Self {
        JxnError::Io(err.to_string())
    }
}

#[cfg(feature = "yaml")]
impl From<serde_yaml::Error> for JxnError {
    fn from(err: serde_yaml::Error) -> Self {
        JxnError::Serde(err.to_string())
    }
}

impl JxnError {
    /// Helper to construct registration errors.
    pub fn registration<T: Into<String>>(message: T) -> Self {
        JxnError::Registration {
            message: message.into(),
        }
    }

    /// Helper to construct unknown plugin errors.
    pub fn unknown_plugin<T: Into<String>>(name: T) -> Self {
        JxnError::UnknownPlugin { name: name.into() }
    }

    /// Helper to construct setup errors.
    pub fn setup<T: Into<String>>(message: T) -> Self {
        JxnError::Setup {
            message: message.into(),
        }
    }

    /// Helper to construct request errors. `target` names the attempted
    /// class/method or function.
    pub fn request(target: impl Into<String>, message: impl Into<String>) -> Self {
        JxnError::Request {
            target: target.into(),
            message: message.into(),
        }
    }

    /// True for both plain registration failures and unknown callable kinds.
    pub fn is_registration(&self) -> bool {
        matches!(
            self,
            JxnError::Registration { .. } | JxnError::UnknownPlugin { .. }
        )
    }

    pub fn is_setup(&self) -> bool {
        matches!(self, JxnError::Setup { .. })
    }

    pub fn is_request(&self) -> bool {
        matches!(self, JxnError::Request { .. })
    }
}
