use super::*;
use crate::ids::{GenerationId, GenerationIdError, OwnerId, OwnerIdError};

#[test]
fn owner_id_validation() {
    assert_eq!(OwnerId::try_new("").unwrap_err(), OwnerIdError::Empty);
    assert_eq!(OwnerId::try_new("   ").unwrap_err(), OwnerIdError::Empty);
    assert_eq!(
        OwnerId::try_new("tm\u{0007}1").unwrap_err(),
        OwnerIdError::ContainsControl
    );
    assert_eq!(
        OwnerId::try_new("x".repeat(129)).unwrap_err(),
        OwnerIdError::TooLong
    );
    assert_eq!(OwnerId::try_new("tm1").unwrap().as_str(), "tm1");
}

#[test]
fn generation_id_rejects_negative_values() {
    assert_eq!(
        GenerationId::try_new(-1).unwrap_err(),
        GenerationIdError::Negative
    );
    assert_eq!(GenerationId::try_new(0).unwrap(), GenerationId::ZERO);
    assert_eq!(GenerationId::try_new(4).unwrap().next().get(), 5);
}

#[test]
fn record_key_validation_reports_the_failing_part() {
    assert_eq!(
        RecordKey::new("", 1, "x").unwrap_err(),
        RecordKeyError::Owner(OwnerIdError::Empty)
    );
    assert_eq!(
        RecordKey::new("tm1", -3, "x").unwrap_err(),
        RecordKeyError::Generation(GenerationIdError::Negative)
    );
    assert_eq!(
        RecordKey::new("tm1", 1, " ").unwrap_err(),
        RecordKeyError::EmptyKey
    );
    assert_eq!(
        RecordKey::new("tm1", 1, "k".repeat(257)).unwrap_err(),
        RecordKeyError::KeyTooLong
    );
}

#[test]
fn record_keys_order_by_owner_then_generation_then_key() {
    let mut keys = vec![
        RecordKey::new("tm2", 1, "a").unwrap(),
        RecordKey::new("tm1", 2, "a").unwrap(),
        RecordKey::new("tm1", 1, "b").unwrap(),
        RecordKey::new("tm1", 1, "a").unwrap(),
    ];
    keys.sort();
    let rendered: Vec<String> = keys.iter().map(ToString::to_string).collect();
    assert_eq!(rendered, vec!["tm1/1/a", "tm1/1/b", "tm1/2/a", "tm2/1/a"]);
}

#[test]
fn with_generation_keeps_owner_and_key() {
    let key = RecordKey::new("tm1", 1, "x").unwrap();
    let moved = key.with_generation(GenerationId::try_new(7).unwrap());
    assert_eq!(moved.owner_id(), key.owner_id());
    assert_eq!(moved.key(), "x");
    assert_eq!(moved.generation_id().get(), 7);
}

#[test]
fn missed_update_count_only_grows() {
    let mut metadata = Metadata::new("pending", 10.0);
    assert_eq!(metadata.missed_update_count, 0);
    metadata.record_missed_update();
    metadata.record_missed_update();
    assert_eq!(metadata.missed_update_count, 2);

    metadata.missed_update_count = i64::MAX;
    metadata.record_missed_update();
    assert_eq!(metadata.missed_update_count, i64::MAX);
}

#[test]
fn dataproduct_json_helpers() {
    let value = DataProduct::from_json(&serde_json::json!({"vals": [1, 2, 3]})).unwrap();
    let decoded: serde_json::Value = value.decode_json().unwrap();
    assert_eq!(decoded["vals"][2], 3);

    let raw = DataProduct::new(b"not json".to_vec());
    assert!(raw.decode_json::<serde_json::Value>().is_err());
    assert_eq!(raw.len(), 8);
}

#[test]
fn owner_id_deserialization_is_validated() {
    let err = serde_json::from_str::<OwnerId>("\"\"");
    assert!(err.is_err());
    let owner: OwnerId = serde_json::from_str("\"tm1\"").unwrap();
    assert_eq!(owner.as_str(), "tm1");
}

#[test]
fn record_key_deserialization_is_validated() {
    let control = serde_json::from_str::<RecordKey>(
        r#"{"owner_id":"tm1","generation_id":1,"key":"\u0007"}"#,
    );
    assert!(control.is_err());
    let empty =
        serde_json::from_str::<RecordKey>(r#"{"owner_id":"tm1","generation_id":1,"key":""}"#);
    assert!(empty.is_err());
    let negative =
        serde_json::from_str::<RecordKey>(r#"{"owner_id":"tm1","generation_id":-1,"key":"x"}"#);
    assert!(negative.is_err());

    let key = RecordKey::new("tm1", 2, "x").unwrap();
    let encoded = serde_json::to_string(&key).unwrap();
    assert_eq!(serde_json::from_str::<RecordKey>(&encoded).unwrap(), key);
}
