//! Holiday persistence gateway.
//!
//! # Responsibility
//! - Feature-detect store availability without leaving probe data behind.
//! - Load the holiday collection, filtering invalid records and clearing
//!   unparsable payloads.
//! - Validate and overwrite the whole collection on save.
//! - Estimate usage against an assumed quota.
//!
//! # Invariants
//! - Save never touches the store when any input record is invalid.
//! - Load never returns an invalid record or a duplicate id.
//! - Logged diagnostics carry counts and kinds, never holiday contents.

use super::config::GatewayConfig;
use super::error::StorageError;
use super::port::{entry_size, KeyValueStore, StoreError};
use crate::model::holiday::HolidayRecord;
use log::{debug, error, info, warn};
use serde_json::Value;
use std::collections::HashSet;

const PROBE_KEY: &str = "__long_weekend_storage_probe__";

/// Result of `StorageGateway::load_holidays`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LoadOutcome {
    /// Valid holidays in stored order.
    pub holidays: Vec<HolidayRecord>,
    /// Set only for total failures (unparsable payload, store read error).
    pub error: Option<StorageError>,
    /// True when any stored data had to be discarded.
    pub had_corruption: bool,
}

impl LoadOutcome {
    fn empty() -> Self {
        Self::default()
    }

    fn failed(error: StorageError, had_corruption: bool) -> Self {
        Self {
            holidays: Vec::new(),
            error: Some(error),
            had_corruption,
        }
    }
}

/// Best-effort storage usage estimate in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QuotaInfo {
    pub used: usize,
    pub available: Option<usize>,
    pub total: Option<usize>,
}

/// Synchronous holiday persistence over a `KeyValueStore`.
pub struct StorageGateway<S: KeyValueStore> {
    store: S,
    config: GatewayConfig,
}

impl<S: KeyValueStore> StorageGateway<S> {
    /// Creates a gateway with default configuration.
    pub fn new(store: S) -> Self {
        Self::with_config(store, GatewayConfig::default())
    }

    pub fn with_config(store: S, config: GatewayConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns whether the store accepts a write/remove round trip.
    ///
    /// A store that rejects the probe only for lack of space but already
    /// holds entries is full, not disabled, and counts as available.
    pub fn is_storage_available(&self) -> bool {
        let probe = self
            .store
            .set_item(PROBE_KEY, PROBE_KEY)
            .and_then(|()| self.store.remove_item(PROBE_KEY));

        match probe {
            Ok(()) => true,
            Err(StoreError::QuotaExceeded { .. }) if self.holds_entries() => {
                debug!("event=storage_probe module=storage status=full");
                true
            }
            Err(err) => {
                // A failed remove after a successful write would strand the probe.
                let _ = self.store.remove_item(PROBE_KEY);
                debug!("event=storage_probe module=storage status=unavailable error={err}");
                false
            }
        }
    }

    fn holds_entries(&self) -> bool {
        self.store
            .entries()
            .is_ok_and(|entries| !entries.is_empty())
    }

    /// Loads the stored holiday collection.
    pub fn load_holidays(&self) -> LoadOutcome {
        if !self.is_storage_available() {
            info!("event=holidays_load module=storage status=skipped reason=unavailable");
            return LoadOutcome::empty();
        }

        let raw = match self.store.get_item(&self.config.storage_key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("event=holidays_load module=storage status=ok count=0 reason=missing");
                return LoadOutcome::empty();
            }
            Err(err) => {
                let storage_error = StorageError::from_store_error("load holidays", &err);
                error!(
                    "event=holidays_load module=storage status=error error_type={} error={}",
                    storage_error.kind, err
                );
                return LoadOutcome::failed(storage_error, false);
            }
        };

        let parsed: Value = match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(err) => {
                let storage_error = StorageError::from_parse_error(&err);
                error!(
                    "event=holidays_load module=storage status=corrupted error_type={} payload_bytes={}",
                    storage_error.kind,
                    raw.len()
                );
                self.clear_corrupted_payload();
                return LoadOutcome::failed(storage_error, true);
            }
        };

        let Value::Array(items) = parsed else {
            warn!(
                "event=holidays_load module=storage status=corrupted reason=not_an_array payload_bytes={}",
                raw.len()
            );
            return LoadOutcome {
                holidays: Vec::new(),
                error: None,
                had_corruption: true,
            };
        };

        let total = items.len();
        let holidays = sanitize_records(items);
        let removed = total - holidays.len();

        if removed > 0 {
            warn!(
                "event=holidays_load module=storage status=partial {removed} invalid entries removed out of {total} total"
            );
        } else {
            debug!("event=holidays_load module=storage status=ok count={total}");
        }

        LoadOutcome {
            holidays,
            error: None,
            had_corruption: removed > 0,
        }
    }

    /// Validates and overwrites the whole stored collection.
    ///
    /// The store is untouched when validation fails or storage is unavailable.
    pub fn save_holidays(&self, holidays: &[HolidayRecord]) -> Result<(), StorageError> {
        if let Err(storage_error) = validate_for_save(holidays) {
            warn!(
                "event=holidays_save module=storage status=rejected error_type={} error={}",
                storage_error.kind, storage_error.message
            );
            return Err(storage_error);
        }

        if !self.is_storage_available() {
            warn!("event=holidays_save module=storage status=rejected reason=unavailable");
            return Err(StorageError::security(
                "storage is disabled or unavailable; write skipped",
            ));
        }

        let payload = serde_json::to_string(holidays).map_err(|err| {
            StorageError::generic(format!("failed to serialize holidays: {err}"))
        })?;

        self.warn_if_near_quota(&payload);

        match self.store.set_item(&self.config.storage_key, &payload) {
            Ok(()) => {
                debug!(
                    "event=holidays_save module=storage status=ok count={} payload_bytes={}",
                    holidays.len(),
                    payload.len()
                );
                Ok(())
            }
            Err(err) => {
                let storage_error = StorageError::from_store_error("save holidays", &err);
                error!(
                    "event=holidays_save module=storage status=error error_type={} error={}",
                    storage_error.kind, err
                );
                Err(storage_error)
            }
        }
    }

    /// Estimates bytes used across all entries and bytes left in the
    /// assumed quota.
    pub fn storage_quota_info(&self) -> QuotaInfo {
        match self.used_bytes() {
            Some(used) => QuotaInfo {
                used,
                available: Some(self.config.assumed_quota_bytes.saturating_sub(used)),
                total: Some(self.config.assumed_quota_bytes),
            },
            None => QuotaInfo::default(),
        }
    }

    /// Estimated total usage if `payload` replaced the stored collection.
    pub fn estimated_usage_after_write(&self, payload: &str) -> Option<usize> {
        let key = self.config.storage_key.as_str();
        let entries = self.store.entries().ok()?;
        let others: usize = entries
            .iter()
            .filter(|(entry_key, _)| entry_key != key)
            .map(|(entry_key, value)| entry_size(entry_key, value))
            .sum();
        Some(others + entry_size(key, payload))
    }

    fn used_bytes(&self) -> Option<usize> {
        let entries = self.store.entries().ok()?;
        Some(
            entries
                .iter()
                .map(|(key, value)| entry_size(key, value))
                .sum(),
        )
    }

    /// Logs a warning when writing `payload` would pass the warning
    /// threshold. Returns whether the warning fired.
    pub fn warn_if_near_quota(&self, payload: &str) -> bool {
        let Some(estimated) = self.estimated_usage_after_write(payload) else {
            return false;
        };
        if !self.config.exceeds_warning_threshold(estimated) {
            return false;
        }
        warn!(
            "event=storage_quota module=storage status=near_limit estimated_bytes={} threshold_bytes={} quota_bytes={}",
            estimated,
            self.config.warning_threshold_bytes(),
            self.config.assumed_quota_bytes
        );
        true
    }

    fn clear_corrupted_payload(&self) {
        match self.store.remove_item(&self.config.storage_key) {
            Ok(()) => info!("event=holidays_reset module=storage status=ok"),
            Err(err) => warn!("event=holidays_reset module=storage status=error error={err}"),
        }
    }
}

/// Decodes and validates stored records, dropping invalid ones and repeated
/// ids (first occurrence wins).
fn sanitize_records(items: Vec<Value>) -> Vec<HolidayRecord> {
    let mut seen_ids = HashSet::new();
    items
        .into_iter()
        .filter_map(|item| serde_json::from_value::<HolidayRecord>(item).ok())
        .filter(|record| record.validate().is_ok())
        .filter(|record| seen_ids.insert(record.id.clone()))
        .collect()
}

fn validate_for_save(holidays: &[HolidayRecord]) -> Result<(), StorageError> {
    let mut seen_ids = HashSet::new();
    for (index, holiday) in holidays.iter().enumerate() {
        holiday.validate().map_err(|err| {
            StorageError::generic(format!("invalid holiday at index {index}: {err}"))
        })?;
        if !seen_ids.insert(holiday.id.as_str()) {
            return Err(StorageError::generic(format!(
                "duplicate holiday id at index {index}"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{sanitize_records, validate_for_save};
    use crate::model::holiday::HolidayRecord;
    use serde_json::json;

    #[test]
    fn sanitize_drops_wrong_types_and_repeated_ids() {
        let items = vec![
            json!({"id": "1", "name": "New Year", "date": "2025-01-01"}),
            json!({"id": 2, "name": "Numeric id", "date": "2025-01-02"}),
            json!({"id": "1", "name": "Repeat", "date": "2025-01-03"}),
            json!("not an object"),
            json!({"id": "3", "name": "Labor Day", "date": "2025-09-01", "extra": true}),
        ];

        let records = sanitize_records(items);
        let ids: Vec<&str> = records.iter().map(|record| record.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);
    }

    #[test]
    fn validate_for_save_rejects_duplicate_ids() {
        let holidays = vec![
            HolidayRecord::with_id("a", "One", "2025-01-01"),
            HolidayRecord::with_id("a", "Two", "2025-01-02"),
        ];
        let err = validate_for_save(&holidays).unwrap_err();
        assert!(err.message.contains("duplicate"));
    }
}
