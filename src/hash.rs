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

//! # Jxn Binding Hash Module
//!
//! Change-detection digest over a plugin's registration set. Generated
//! client bindings are cached under this digest; a different digest means
//! the cached script is stale.
//!
//! The digest covers settings that shape the output (such as name
//! prefixes), namespaces (name + separator) and callables (identifier +
//! timestamp or marker). Each section is sorted before it is
//! hashed, so only the final registration set matters, never the order in
//! which it was built. The digest is an xxHash3-128 value rendered as 32
//! lowercase hex digits. It is not an integrity proof.

use xxhash_rust::xxh3::Xxh3;

/// Marker used for callables without a modification timestamp.
pub const JXN_STABLE_MARKER: &str = "-";

/// Accumulates the hash source for one registration set.
#[derive(Debug, Default, Clone)]
pub struct JxnBindingHasher {
    settings: Vec<(String, String)>,
    namespaces: Vec<(String, String)>,
    callables: Vec<(String, String)>,
}

impl JxnBindingHasher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn setting(&mut self, key: &str, value: &str) -> &mut Self {
        self.settings.push((key.to_string(), value.to_string()));
        self
    }

    pub fn namespace(&mut self, name: &str, separator: &str) -> &mut Self {
        self.namespaces.push((name.to_string(), separator.to_string()));
        self
    }

    /// Adds a class together with its last-modified timestamp. `detail` is
    /// as for [`JxnBindingHasher::marked`].
    pub fn timestamped(&mut self, identifier: &str, timestamp: u64, detail: &str) -> &mut Self {
        self.callables
            .push((identifier.to_string(), format!("{}@{}", timestamp, detail)));
        self
    }

    /// Adds a callable with no timestamp. `detail` carries anything else that
    /// changes the emitted code, such as a fingerprint of its options.
    pub fn marked(&mut self, identifier: &str, detail: &str) -> &mut Self {
        self.callables.push((
            identifier.to_string(),
            format!("{}{}", JXN_STABLE_MARKER, detail),
        ));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.settings.is_empty() && self.namespaces.is_empty() && self.callables.is_empty()
    }

    pub fn finish(&self) -> String {
        let mut hasher = Xxh3::new();
        for section in [&self.settings, &self.namespaces, &self.callables] {
            let mut pairs = section.clone();
            pairs.sort();
            for (key, value) in &pairs {
                hasher.update(key.as_bytes());
                hasher.update(&[0]);
                hasher.update(value.as_bytes());
                hasher.update(&[0]);
            }
            // Section boundary.
            hasher.update(&[1]);
        }
        format!("{:032x}", hasher.digest128())
    }
}

/// Combines several digests, in the given order, into one.
pub fn jxn_combine_hashes<'a, I>(parts: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let mut hasher = Xxh3::new();
    for part in parts {
        hasher.update(part.as_bytes());
        hasher.update(&[0]);
    }
    format!("{:032x}", hasher.digest128())
}
