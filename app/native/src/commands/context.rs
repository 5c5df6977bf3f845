//! Legacy context-parameter accumulator.
//!
//! Earlier embedders expected entity fields to accumulate across dispatches
//! and be read back by a later `openEntity`. The canonical contract is
//! stateless (explicit parameters per call); this store only feeds the
//! compatibility path behind `compat.statefulEntityFields`.

use std::collections::HashMap;

use parking_lot::Mutex;

/// Case-insensitive key/value store retaining the most recent value per key.
#[derive(Debug, Default)]
pub struct ContextParams {
    map: Mutex<HashMap<String, String>>,
}

impl ContextParams {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Stores `value` under `key`, replacing any previous value. Empty
    /// values are ignored so they cannot shadow earlier data.
    pub fn add(&self, key: &str, value: &str) {
        if value.is_empty() {
            return;
        }
        self.map
            .lock()
            .insert(key.to_ascii_lowercase(), value.to_string());
    }

    /// Returns the stored value for `key`, or `""`.
    #[must_use]
    pub fn get(&self, key: &str) -> String {
        self.map
            .lock()
            .get(&key.to_ascii_lowercase())
            .cloned()
            .unwrap_or_default()
    }

    /// Returns `preferred` unless it is empty, in which case the stored
    /// value for `key` is used (the legacy fallback).
    #[must_use]
    pub fn or_stored(&self, preferred: &str, key: &str) -> String {
        if preferred.is_empty() {
            self.get(key)
        } else {
            preferred.to_string()
        }
    }
}
