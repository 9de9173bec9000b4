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

//! # Jxn Request Module
//!
//! Inbound call parameters, argument decoding and routing.

pub mod call;
pub mod args;
pub mod router;

pub use call::{
    JxnCallContext, JxnRequest, JxnTarget, JXN_PARAM_ARGS, JXN_PARAM_CLASS, JXN_PARAM_FUNCTION,
    JXN_PARAM_METHOD,
};
pub use args::{JxnArgumentDecoder, JxnJsonArgumentDecoder};
pub use router::{JxnRequestRouter, JxnRouteOutcome, JxnRoutingState};
