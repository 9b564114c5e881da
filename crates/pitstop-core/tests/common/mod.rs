#![allow(dead_code)]

use jiff::Timestamp;
use pitstop_core::{ChecklistService, ManualClock, ServiceBuilder, SqliteStore};
use tempfile::{NamedTempFile, TempDir};

/// Helper function to create a test service backed by a temporary database
pub async fn create_test_service(privileged_ops: bool) -> (TempDir, ChecklistService) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let service = ServiceBuilder::new()
        .with_database_path(Some(&db_path))
        .with_privileged_ops(privileged_ops)
        .build()
        .await
        .expect("Failed to create service");
    (temp_dir, service)
}

/// Helper function to create a temporary SQLite store
pub fn create_test_store(privileged_ops: bool) -> (NamedTempFile, SqliteStore) {
    let temp_file = NamedTempFile::new().expect("Failed to create temporary file");
    let store =
        SqliteStore::open(temp_file.path(), privileged_ops).expect("Failed to create test store");
    (temp_file, store)
}

pub fn ts(s: &str) -> Timestamp {
    s.parse().expect("valid timestamp")
}

pub fn clock_at(s: &str) -> ManualClock {
    ManualClock::new(ts(s))
}
