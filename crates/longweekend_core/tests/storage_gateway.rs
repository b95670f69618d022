use longweekend_core::storage::config::DEFAULT_STORAGE_KEY;
use longweekend_core::{
    GatewayConfig, HolidayRecord, InMemoryStore, KeyValueStore, QuotaInfo, StorageErrorKind,
    StorageGateway, StoreError, StoreResult,
};
use std::cell::Cell;

fn sample_holidays() -> Vec<HolidayRecord> {
    vec![
        HolidayRecord::with_id("h-2", "Thanksgiving", "2025-11-27"),
        HolidayRecord::with_id("h-1", "New Year's Day", "2025-01-01"),
        HolidayRecord::new("Election Day", "2025-11-04"),
    ]
}

/// In-memory store whose operations on the holidays key can be made to fail.
#[derive(Default)]
struct FlakyStore {
    inner: InMemoryStore,
    fail_get: Cell<bool>,
    fail_set: Cell<bool>,
    fail_remove: Cell<bool>,
}

impl KeyValueStore for FlakyStore {
    fn get_item(&self, key: &str) -> StoreResult<Option<String>> {
        if self.fail_get.get() && key == DEFAULT_STORAGE_KEY {
            return Err(StoreError::Backend("read failed".to_string()));
        }
        self.inner.get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> StoreResult<()> {
        if self.fail_set.get() && key == DEFAULT_STORAGE_KEY {
            return Err(StoreError::Backend("write failed".to_string()));
        }
        self.inner.set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> StoreResult<()> {
        if self.fail_remove.get() && key == DEFAULT_STORAGE_KEY {
            return Err(StoreError::AccessDenied("remove blocked".to_string()));
        }
        self.inner.remove_item(key)
    }

    fn entries(&self) -> StoreResult<Vec<(String, String)>> {
        self.inner.entries()
    }
}

#[test]
fn save_then_load_roundtrips_in_order() {
    let store = InMemoryStore::new();
    let gateway = StorageGateway::new(&store);
    let holidays = sample_holidays();

    gateway.save_holidays(&holidays).unwrap();
    let outcome = gateway.load_holidays();

    assert_eq!(outcome.holidays, holidays);
    assert_eq!(outcome.error, None);
    assert!(!outcome.had_corruption);
}

#[test]
fn save_overwrites_the_whole_collection() {
    let store = InMemoryStore::new();
    let gateway = StorageGateway::new(&store);
    let holidays = sample_holidays();

    gateway.save_holidays(&holidays).unwrap();
    gateway.save_holidays(&holidays[1..2]).unwrap();

    let outcome = gateway.load_holidays();
    assert_eq!(outcome.holidays, vec![holidays[1].clone()]);
    assert_eq!(store.len(), 1);
}

#[test]
fn missing_key_loads_clean_empty_list() {
    let store = InMemoryStore::new();
    let outcome = StorageGateway::new(&store).load_holidays();

    assert!(outcome.holidays.is_empty());
    assert_eq!(outcome.error, None);
    assert!(!outcome.had_corruption);
}

#[test]
fn unparsable_payload_is_reported_and_cleared() {
    let store = InMemoryStore::new();
    store.set_item(DEFAULT_STORAGE_KEY, "{not json").unwrap();
    let gateway = StorageGateway::new(&store);

    let first = gateway.load_holidays();
    assert!(first.holidays.is_empty());
    assert!(first.had_corruption);
    let error = first.error.expect("corruption error");
    assert_eq!(error.kind, StorageErrorKind::CorruptionError);
    assert!(!error.message.contains("{not json"));
    assert!(!store.contains_key(DEFAULT_STORAGE_KEY));

    let second = gateway.load_holidays();
    assert!(second.holidays.is_empty());
    assert_eq!(second.error, None);
    assert!(!second.had_corruption);
}

#[test]
fn failed_cleanup_of_corrupted_payload_is_swallowed() {
    let store = FlakyStore::default();
    store.set_item(DEFAULT_STORAGE_KEY, "][").unwrap();
    store.fail_remove.set(true);

    let outcome = StorageGateway::new(&store).load_holidays();

    assert_eq!(
        outcome.error.map(|err| err.kind),
        Some(StorageErrorKind::CorruptionError)
    );
    assert!(outcome.had_corruption);
    assert!(store.inner.contains_key(DEFAULT_STORAGE_KEY));
}

#[test]
fn partially_invalid_payload_keeps_valid_entries() {
    let store = InMemoryStore::new();
    let payload = serde_json::json!([
        {"id": "1", "name": "New Year's Day", "date": "2025-01-01"},
        {"id": "", "name": "Empty id", "date": "2025-02-01"},
        {"id": "3", "name": 42, "date": "2025-03-01"},
        {"id": "4", "name": "Missing date"},
        {"id": "5", "name": "Labor Day", "date": "2025-09-01"}
    ]);
    store
        .set_item(DEFAULT_STORAGE_KEY, &payload.to_string())
        .unwrap();

    let outcome = StorageGateway::new(&store).load_holidays();

    let ids: Vec<&str> = outcome.holidays.iter().map(|h| h.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "5"]);
    assert!(outcome.had_corruption);
    assert_eq!(outcome.error, None);
}

#[test]
fn non_array_payload_is_corruption_without_error() {
    let store = InMemoryStore::new();
    store
        .set_item(DEFAULT_STORAGE_KEY, r#"{"id":"1","name":"x","date":"2025-01-01"}"#)
        .unwrap();

    let outcome = StorageGateway::new(&store).load_holidays();

    assert!(outcome.holidays.is_empty());
    assert!(outcome.had_corruption);
    assert_eq!(outcome.error, None);
}

#[test]
fn store_read_failure_is_classified() {
    let store = FlakyStore::default();
    store.fail_get.set(true);

    let outcome = StorageGateway::new(&store).load_holidays();

    assert!(outcome.holidays.is_empty());
    assert!(!outcome.had_corruption);
    assert_eq!(
        outcome.error.map(|err| err.kind),
        Some(StorageErrorKind::GenericError)
    );
}

#[test]
fn invalid_record_is_rejected_without_writing() {
    let store = InMemoryStore::new();
    let gateway = StorageGateway::new(&store);

    let err = gateway
        .save_holidays(&[HolidayRecord::with_id("1", "", "2025-01-01")])
        .unwrap_err();

    assert_eq!(err.kind, StorageErrorKind::GenericError);
    assert!(store.is_empty());
}

#[test]
fn one_bad_record_blocks_the_whole_save() {
    let store = InMemoryStore::new();
    let gateway = StorageGateway::new(&store);
    gateway.save_holidays(&sample_holidays()).unwrap();

    let mut next = sample_holidays();
    next.push(HolidayRecord::with_id("bad", "No date", "   "));
    let err = gateway.save_holidays(&next).unwrap_err();

    assert_eq!(err.kind, StorageErrorKind::GenericError);
    assert_eq!(gateway.load_holidays().holidays.len(), 3);
}

#[test]
fn disabled_store_degrades_gracefully() {
    let store = InMemoryStore::new();
    store.set_disabled(true);
    let gateway = StorageGateway::new(&store);

    assert!(!gateway.is_storage_available());

    let outcome = gateway.load_holidays();
    assert!(outcome.holidays.is_empty());
    assert_eq!(outcome.error, None);
    assert!(!outcome.had_corruption);

    let err = gateway.save_holidays(&sample_holidays()).unwrap_err();
    assert_eq!(err.kind, StorageErrorKind::SecurityError);

    assert_eq!(
        gateway.storage_quota_info(),
        QuotaInfo {
            used: 0,
            available: None,
            total: None
        }
    );
}

#[test]
fn availability_probe_leaves_no_trace() {
    let store = InMemoryStore::new();
    let gateway = StorageGateway::new(&store);

    assert!(gateway.is_storage_available());
    assert!(store.is_empty());
}

#[test]
fn quota_overflow_is_classified_and_keeps_previous_value() {
    let store = InMemoryStore::with_quota(256);
    let gateway = StorageGateway::new(&store);
    let small = vec![HolidayRecord::with_id("1", "New Year's Day", "2025-01-01")];
    gateway.save_holidays(&small).unwrap();

    let large: Vec<HolidayRecord> = (0..20)
        .map(|index| HolidayRecord::with_id(format!("id-{index}"), "Holiday", "2025-01-01"))
        .collect();
    let err = gateway.save_holidays(&large).unwrap_err();

    assert_eq!(err.kind, StorageErrorKind::QuotaExceeded);
    assert!(err.user_message.contains("free up space"));
    assert_eq!(gateway.load_holidays().holidays, small);
}

#[test]
fn store_write_failure_is_classified_as_generic() {
    let store = FlakyStore::default();
    store.fail_set.set(true);

    let err = StorageGateway::new(&store)
        .save_holidays(&sample_holidays())
        .unwrap_err();

    assert_eq!(err.kind, StorageErrorKind::GenericError);
    assert!(err.message.contains("save holidays failed"));
}

#[test]
fn near_quota_payload_still_saves() {
    let store = InMemoryStore::new();
    let config = GatewayConfig::default()
        .with_assumed_quota_bytes(200)
        .with_quota_warning_ratio(0.5);
    let gateway = StorageGateway::with_config(&store, config);
    let holidays = sample_holidays();

    let payload = serde_json::to_string(&holidays).unwrap();
    let estimated = gateway.estimated_usage_after_write(&payload).unwrap();
    assert!(gateway.config().exceeds_warning_threshold(estimated));
    assert!(gateway.warn_if_near_quota(&payload));
    assert!(!gateway.warn_if_near_quota("[]"));

    gateway.save_holidays(&holidays).unwrap();
    assert_eq!(gateway.load_holidays().holidays, holidays);
}

#[test]
fn full_store_still_loads_and_reports_quota_on_growth() {
    let holidays = vec![HolidayRecord::with_id("1", "Thanksgiving", "2025-11-27")];
    let payload = serde_json::to_string(&holidays).unwrap();
    let store = InMemoryStore::with_quota(DEFAULT_STORAGE_KEY.len() + payload.len() + 10);
    let gateway = StorageGateway::new(&store);
    gateway.save_holidays(&holidays).unwrap();

    assert!(gateway.is_storage_available());
    let outcome = gateway.load_holidays();
    assert_eq!(outcome.holidays, holidays);
    assert_eq!(outcome.error, None);
    assert!(!outcome.had_corruption);

    gateway.save_holidays(&holidays).unwrap();

    let mut grown = holidays.clone();
    grown.push(HolidayRecord::with_id("2", "Election Day", "2025-11-04"));
    let err = gateway.save_holidays(&grown).unwrap_err();
    assert_eq!(err.kind, StorageErrorKind::QuotaExceeded);
    assert_eq!(gateway.load_holidays().holidays, holidays);
}

#[test]
fn empty_store_too_small_for_the_probe_is_unavailable() {
    let store = InMemoryStore::with_quota(10);
    let gateway = StorageGateway::new(&store);

    assert!(!gateway.is_storage_available());
    assert!(store.is_empty());
}

#[test]
fn quota_info_sums_keys_and_values() {
    let store = InMemoryStore::new();
    store.set_item("other", "12345").unwrap();
    let gateway = StorageGateway::with_config(
        &store,
        GatewayConfig::default().with_assumed_quota_bytes(1_000),
    );
    let holidays = sample_holidays();
    gateway.save_holidays(&holidays).unwrap();

    let payload = serde_json::to_string(&holidays).unwrap();
    let expected_used = "other".len() + 5 + DEFAULT_STORAGE_KEY.len() + payload.len();

    let info = gateway.storage_quota_info();
    assert_eq!(info.used, expected_used);
    assert_eq!(info.total, Some(1_000));
    assert_eq!(info.available, Some(1_000 - expected_used));
}

#[test]
fn custom_storage_key_is_honored() {
    let store = InMemoryStore::new();
    let gateway = StorageGateway::with_config(
        &store,
        GatewayConfig::default().with_storage_key("custom.holidays"),
    );

    gateway.save_holidays(&sample_holidays()).unwrap();

    assert!(store.contains_key("custom.holidays"));
    assert!(!store.contains_key(DEFAULT_STORAGE_KEY));
}
