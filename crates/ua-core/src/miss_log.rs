//! Once-per-tag bookkeeping for lookup misses.
//!
//! Registries consult a `MissLog` when a tag has no provider so the warning
//! is emitted the first time only.  A broken action definition that is
//! scored every frame would otherwise flood the log.

use std::sync::{Mutex, PoisonError};

use crate::{Tag, TagHashSet};

#[derive(Default)]
pub struct MissLog {
    seen: Mutex<TagHashSet>,
}

impl MissLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` the first time `tag` is reported, `false` afterwards.
    pub fn first_miss(&self, tag: &Tag) -> bool {
        let mut seen = self.seen.lock().unwrap_or_else(PoisonError::into_inner);
        if seen.contains(tag) {
            false
        } else {
            seen.insert(tag.clone());
            true
        }
    }

    /// Number of distinct tags reported so far.
    pub fn len(&self) -> usize {
        self.seen.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Forget every reported tag, e.g. after providers are re-registered.
    pub fn reset(&self) {
        self.seen.lock().unwrap_or_else(PoisonError::into_inner).clear();
    }
}
