#![forbid(unsafe_code)]

use ds_storage::{
    DataProduct, DataSpace, DataSpaceConfig, Header, Lifecycle, Metadata, OwnerId, RecordKey,
    StoreError,
};
use tempfile::TempDir;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn temp_config(dir: &TempDir) -> DataSpaceConfig {
    DataSpaceConfig::new(dir.path().join("dataspace.db"))
}

fn sample_header() -> Header {
    Header {
        create_time: 100.0,
        expiration_time: 200.0,
        scheduled_create_time: 90.0,
        creator: "c1".to_string(),
        schema_id: 1,
    }
}

#[test]
fn open_creates_a_ready_store() {
    init_tracing();
    let dir = TempDir::new().expect("temp dir");
    let config = temp_config(&dir);

    let store = DataSpace::open(&config).expect("open dataspace");
    assert_eq!(store.lifecycle(), Lifecycle::Ready);
    assert_eq!(store.path(), config.filename.as_path());
    assert!(config.filename.exists());
}

#[test]
fn open_destroys_an_existing_store() {
    init_tracing();
    let dir = TempDir::new().expect("temp dir");
    let config = temp_config(&dir);
    let key = RecordKey::new("tm1", 1, "x").expect("record key");

    {
        let mut first = DataSpace::open(&config).expect("open first");
        first
            .insert(
                &key,
                &DataProduct::new(b"42".to_vec()),
                &sample_header(),
                &Metadata::new("ready", 100.0),
            )
            .expect("insert");
        first.close().expect("close first");
    }

    let second = DataSpace::open(&config).expect("reopen");
    let err = second.get_dataproduct(&key).expect_err("data must be gone");
    assert!(matches!(err, StoreError::NotFound));
    let owner = OwnerId::try_new("tm1").expect("owner id");
    assert_eq!(
        second.get_last_generation_id(&owner).expect("last generation").get(),
        0
    );
}

#[test]
fn open_replaces_a_file_that_is_not_a_database() {
    let dir = TempDir::new().expect("temp dir");
    let config = temp_config(&dir);
    std::fs::write(&config.filename, b"definitely not sqlite").expect("write junk");

    let store = DataSpace::open(&config).expect("junk file is replaced");
    assert_eq!(store.lifecycle(), Lifecycle::Ready);
}

#[test]
fn open_reports_connection_error_when_location_is_unusable() {
    let dir = TempDir::new().expect("temp dir");
    let config = DataSpaceConfig::new(dir.path());

    let err = DataSpace::open(&config).expect_err("a directory cannot become a dataspace");
    assert_eq!(err.code(), "CONNECTION");
}

#[test]
fn create_twice_is_rejected() {
    let dir = TempDir::new().expect("temp dir");
    let mut store = DataSpace::open(&temp_config(&dir)).expect("open dataspace");

    let err = store.create().expect_err("second create must fail");
    assert!(matches!(err, StoreError::AlreadyInitialized));
    assert_eq!(store.lifecycle(), Lifecycle::Ready);
}

#[test]
fn close_twice_fails_loudly() {
    let dir = TempDir::new().expect("temp dir");
    let mut store = DataSpace::open(&temp_config(&dir)).expect("open dataspace");

    store.close().expect("first close");
    assert_eq!(store.lifecycle(), Lifecycle::Closed);

    let err = store.close().expect_err("second close must fail");
    assert!(matches!(err, StoreError::Closed));
}

#[test]
fn operations_after_close_are_rejected() {
    let dir = TempDir::new().expect("temp dir");
    let mut store = DataSpace::open(&temp_config(&dir)).expect("open dataspace");
    store.close().expect("close");

    let key = RecordKey::new("tm1", 1, "x").expect("record key");
    let err = store
        .insert(
            &key,
            &DataProduct::new(b"1".to_vec()),
            &sample_header(),
            &Metadata::new("ready", 1.0),
        )
        .expect_err("insert after close");
    assert_eq!(err.code(), "CLOSED");

    let err = store.get_header(&key).expect_err("read after close");
    assert_eq!(err.code(), "CLOSED");

    let err = store.create().expect_err("create after close");
    assert_eq!(err.code(), "CLOSED");
}

#[test]
fn config_loads_the_nested_dataspace_section() {
    let config = DataSpaceConfig::from_json_str(r#"{"dataspace": {"filename": "/tmp/ds.db"}}"#)
        .expect("config parses");
    assert_eq!(config.filename, std::path::PathBuf::from("/tmp/ds.db"));
    assert_eq!(config.busy_timeout_ms, 5_000);

    let config = DataSpaceConfig::from_json_str(
        r#"{"dataspace": {"filename": "ds.db", "busy_timeout_ms": 250}}"#,
    )
    .expect("config parses");
    assert_eq!(config.busy_timeout_ms, 250);
}

#[test]
fn config_rejects_missing_or_empty_filename() {
    let err = DataSpaceConfig::from_json_str(r#"{"dataspace": {}}"#).expect_err("missing");
    assert_eq!(err.code(), "CONFIG");

    let err =
        DataSpaceConfig::from_json_str(r#"{"dataspace": {"filename": ""}}"#).expect_err("empty");
    assert_eq!(err.code(), "CONFIG");

    let err = DataSpace::open(&DataSpaceConfig::new("")).expect_err("empty filename");
    assert_eq!(err.code(), "CONFIG");
}

#[test]
fn config_file_round_trip_through_disk() {
    let dir = TempDir::new().expect("temp dir");
    let config_path = dir.path().join("config.json");
    let db_path = dir.path().join("nested").join("ds.db");
    let raw = serde_json::json!({ "dataspace": { "filename": db_path } });
    std::fs::write(&config_path, raw.to_string()).expect("write config");

    let config = DataSpaceConfig::from_json_file(&config_path).expect("load config");
    let store = DataSpace::open(&config).expect("open creates parent directories");
    assert_eq!(store.path(), db_path.as_path());
}

#[test]
fn schema_registry_is_created_but_not_listed_as_a_row_store() {
    let dir = TempDir::new().expect("temp dir");
    let db_path = dir.path().join("dataspace.db");
    let _store = DataSpace::open(&DataSpaceConfig::new(&db_path)).expect("open");

    let raw = rusqlite::Connection::open(&db_path).expect("raw connection");
    let registry: i64 = raw
        .query_row(
            "SELECT COUNT(1) FROM sqlite_master WHERE type='table' AND name='schemas'",
            [],
            |row| row.get(0),
        )
        .expect("sqlite_master");
    assert_eq!(registry, 1);
    assert!(DataSpace::tables().iter().all(|t| t.name != "schemas"));
}

#[test]
fn table_layout_is_described() {
    let names: Vec<&str> = DataSpace::tables().iter().map(|t| t.name).collect();
    assert_eq!(names, vec!["dataproduct", "header", "metadata"]);

    let header = DataSpace::tables()
        .iter()
        .find(|t| t.name == "header")
        .expect("header table");
    let columns: Vec<&str> = header.columns().iter().map(|c| c.name).collect();
    assert_eq!(
        columns,
        vec![
            "owner_id",
            "generation_id",
            "key",
            "create_time",
            "expiration_time",
            "scheduled_create_time",
            "creator",
            "schema_id",
        ]
    );
}
