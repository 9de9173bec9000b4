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

//! # Jxn Priority Module
//!
//! Integer-keyed table that orders plugins. Lower priorities come first.
//!
//! Inserting at an occupied priority probes upward to the next free integer,
//! so nothing is ever overwritten and a slot, once assigned, never moves.
//! Only when every slot from the requested one up to `i64::MAX` is taken
//! does the probe continue downward, to the largest free slot below.
//! Bands are a convention the table does not enforce:
//!
//! | band | priorities |
//! |---|---|
//! | built-in | 0 to 999 |
//! | user | 1000 to 8999 |
//! | last | 9000 to 9999 |

use std::collections::BTreeMap;

/// Default priority for plugins registered without one.
pub const JXN_DEFAULT_PRIORITY: i64 = 1000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JxnPriorityBand {
    BuiltIn,
    User,
    Last,
    /// Outside the conventional bands.
    Other,
}

impl JxnPriorityBand {
    pub fn of(priority: i64) -> Self {
        match priority {
            0..=999 => JxnPriorityBand::BuiltIn,
            1000..=8999 => JxnPriorityBand::User,
            9000..=9999 => JxnPriorityBand::Last,
            _ => JxnPriorityBand::Other,
        }
    }
}

#[derive(Clone, Debug)]
pub struct JxnPriorityRegistry<T> {
    slots: BTreeMap<i64, T>,
}

impl<T> Default for JxnPriorityRegistry<T> {
    fn default() -> Self {
        JxnPriorityRegistry {
            slots: BTreeMap::new(),
        }
    }
}

impl<T> JxnPriorityRegistry<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `item` at `priority`, or at the smallest free slot above it.
    /// Returns the slot actually used.
    pub fn insert(&mut self, item: T, priority: i64) -> i64 {
        let slot = self.free_slot(priority);
        if slot != priority {
            log::debug!(
                "plugin.priority.collision: requested slot taken, probed - requested={}, assigned={}",
                priority,
                slot
            );
        }
        self.slots.insert(slot, item);
        slot
    }

    fn free_slot(&self, priority: i64) -> i64 {
        let mut slot = priority;
        while self.slots.contains_key(&slot) {
            match slot.checked_add(1) {
                Some(next) => slot = next,
                None => return self.free_slot_below(priority),
            }
        }
        slot
    }

    fn free_slot_below(&self, priority: i64) -> i64 {
        // A table cannot hold all 2^64 keys, so a free slot always exists.
        (i64::MIN..priority)
            .rev()
            .find(|slot| !self.slots.contains_key(slot))
            .unwrap_or(i64::MIN)
    }

    /// Items in ascending priority order.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.slots.values()
    }

    /// `(priority, item)` pairs in ascending priority order.
    pub fn entries(&self) -> impl Iterator<Item = (i64, &T)> + '_ {
        self.slots.iter().map(|(k, v)| (*k, v))
    }

    pub fn get(&self, priority: i64) -> Option<&T> {
        self.slots.get(&priority)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
