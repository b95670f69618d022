use longweekend_core::{HolidayRecord, HolidayValidationError};
use uuid::Uuid;

#[test]
fn new_generates_uuid_id() {
    let holiday = HolidayRecord::new("Thanksgiving", "2025-11-27");

    let parsed = Uuid::parse_str(&holiday.id).expect("id should be a uuid");
    assert!(!parsed.is_nil());
    assert_eq!(holiday.name, "Thanksgiving");
    assert_eq!(holiday.date, "2025-11-27");
    assert!(holiday.validate().is_ok());
}

#[test]
fn serialization_uses_stored_field_names() {
    let holiday = HolidayRecord::with_id("abc", "Labor Day", "2025-09-01");

    let json = serde_json::to_value(&holiday).unwrap();
    assert_eq!(
        json,
        serde_json::json!({"id": "abc", "name": "Labor Day", "date": "2025-09-01"})
    );

    let decoded: HolidayRecord = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, holiday);
}

#[test]
fn deserialize_rejects_wrong_primitive_types() {
    let value = serde_json::json!({"id": 7, "name": "Seven", "date": "2025-07-07"});
    assert!(serde_json::from_value::<HolidayRecord>(value).is_err());

    let value = serde_json::json!({"id": "7", "name": null, "date": "2025-07-07"});
    assert!(serde_json::from_value::<HolidayRecord>(value).is_err());
}

#[test]
fn whitespace_only_name_is_invalid() {
    let holiday = HolidayRecord::with_id("1", "   ", "2025-01-01");
    assert_eq!(holiday.validate(), Err(HolidayValidationError::EmptyName));
}
