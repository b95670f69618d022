//! In-memory key-value store modelling browser local storage.
//!
//! # Invariants
//! - Total usage never exceeds the configured quota; the offending write is
//!   rejected and the previous value stays intact.
//! - A disabled store rejects every operation with `AccessDenied`.

use super::port::{entry_size, KeyValueStore, StoreError, StoreResult};
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;

/// `BTreeMap`-backed store with optional byte quota and a disabled switch.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    entries: RefCell<BTreeMap<String, String>>,
    quota_bytes: Option<usize>,
    disabled: Cell<bool>,
}

impl InMemoryStore {
    /// Creates an empty, unlimited, enabled store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store that rejects writes beyond `quota_bytes`.
    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            quota_bytes: Some(quota_bytes),
            ..Self::default()
        }
    }

    /// Enables or disables the store, e.g. to model private browsing.
    pub fn set_disabled(&self, disabled: bool) {
        self.disabled.set(disabled);
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled.get()
    }

    /// Number of stored entries. Ignores the disabled switch.
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// Returns whether `key` exists. Ignores the disabled switch.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.borrow().contains_key(key)
    }

    fn ensure_enabled(&self) -> StoreResult<()> {
        if self.disabled.get() {
            return Err(StoreError::AccessDenied(
                "in-memory store is disabled".to_string(),
            ));
        }
        Ok(())
    }

    fn used_bytes(entries: &BTreeMap<String, String>) -> usize {
        entries
            .iter()
            .map(|(key, value)| entry_size(key, value))
            .sum()
    }
}

impl KeyValueStore for InMemoryStore {
    fn get_item(&self, key: &str) -> StoreResult<Option<String>> {
        self.ensure_enabled()?;
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> StoreResult<()> {
        self.ensure_enabled()?;
        let mut entries = self.entries.borrow_mut();

        if let Some(limit_bytes) = self.quota_bytes {
            let replaced = entries
                .get(key)
                .map_or(0, |previous| entry_size(key, previous));
            let requested_bytes = Self::used_bytes(&entries) - replaced + entry_size(key, value);
            if requested_bytes > limit_bytes {
                return Err(StoreError::QuotaExceeded {
                    requested_bytes,
                    limit_bytes,
                });
            }
        }

        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> StoreResult<()> {
        self.ensure_enabled()?;
        self.entries.borrow_mut().remove(key);
        Ok(())
    }

    fn entries(&self) -> StoreResult<Vec<(String, String)>> {
        self.ensure_enabled()?;
        Ok(self
            .entries
            .borrow()
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect())
    }
}
