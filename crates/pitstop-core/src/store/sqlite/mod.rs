//! SQLite-backed checklist store.
//!
//! The schema is embedded from `assets/schema.sql` and applied on open. Two
//! constraints live in the database itself: a partial unique index allowing a
//! single open checklist per plate, and a trigger refusing writes to a locked
//! row unless the same write releases the lock.
//!
//! The privileged operations run as single transactions on the same
//! connection. Opening the store with `privileged_ops = false` emulates a
//! deployment where they are not installed.

use std::{
    path::Path,
    sync::{Mutex, MutexGuard},
};

use rusqlite::Connection;

use super::{ChecklistStore, PrivilegedOps};
use crate::{
    error::{DatabaseResultExt, StoreError, StoreResult},
    models::{
        AuditEntry, Checklist, ChecklistPatch, ChecklistQuery, FinalizeReceipt, FinalizeRequest,
        NewChecklistRecord, ReopenRequest,
    },
};

mod checklist_queries;
mod migrations;
mod privileged;

/// Checklist store persisted in a SQLite database file.
pub struct SqliteStore {
    connection: Mutex<Connection>,
    privileged_ops: bool,
}

impl std::fmt::Debug for SqliteStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteStore")
            .field("privileged_ops", &self.privileged_ops)
            .finish_non_exhaustive()
    }
}

impl SqliteStore {
    /// Opens (or creates) the database at `path` and initializes the schema.
    pub fn open<P: AsRef<Path>>(path: P, privileged_ops: bool) -> StoreResult<Self> {
        let connection =
            Connection::open(path).db_context("Failed to open database connection")?;
        Self::from_connection(connection, privileged_ops)
    }

    /// Opens a private in-memory database.
    pub fn open_in_memory(privileged_ops: bool) -> StoreResult<Self> {
        let connection =
            Connection::open_in_memory().db_context("Failed to open in-memory database")?;
        Self::from_connection(connection, privileged_ops)
    }

    fn from_connection(connection: Connection, privileged_ops: bool) -> StoreResult<Self> {
        migrations::initialize_schema(&connection)?;
        Ok(Self {
            connection: Mutex::new(connection),
            privileged_ops,
        })
    }

    fn connection(&self) -> StoreResult<MutexGuard<'_, Connection>> {
        self.connection
            .lock()
            .map_err(|_| StoreError::backend("database connection lock poisoned"))
    }

    fn require_privileged(&self, operation: &str) -> StoreResult<()> {
        if self.privileged_ops {
            Ok(())
        } else {
            Err(StoreError::unsupported(format!(
                "privileged operation {operation} is not installed"
            )))
        }
    }
}

impl ChecklistStore for SqliteStore {
    fn get(&self, id: u64) -> StoreResult<Option<Checklist>> {
        let connection = self.connection()?;
        checklist_queries::get(&connection, id)
    }

    fn insert(&self, record: NewChecklistRecord) -> StoreResult<Checklist> {
        let connection = self.connection()?;
        checklist_queries::insert(&connection, record)
    }

    fn update(&self, id: u64, patch: &ChecklistPatch) -> StoreResult<()> {
        let mut connection = self.connection()?;
        checklist_queries::update(&mut connection, id, patch)
    }

    fn delete(&self, id: u64) -> StoreResult<()> {
        let mut connection = self.connection()?;
        checklist_queries::delete(&mut connection, id)
    }

    fn find_open_by_plate(&self, plate: &str) -> StoreResult<Vec<Checklist>> {
        let connection = self.connection()?;
        checklist_queries::find_open_by_plate(&connection, plate)
    }

    fn list(&self, query: &ChecklistQuery) -> StoreResult<Vec<Checklist>> {
        let connection = self.connection()?;
        checklist_queries::list(&connection, query)
    }

    fn next_sequence_label(&self) -> StoreResult<String> {
        let connection = self.connection()?;
        privileged::next_sequence_label(&connection)
    }

    fn audit_trail(&self, id: u64) -> StoreResult<Vec<AuditEntry>> {
        let connection = self.connection()?;
        privileged::audit_trail(&connection, id)
    }
}

impl PrivilegedOps for SqliteStore {
    fn finalize(&self, request: &FinalizeRequest) -> StoreResult<FinalizeReceipt> {
        self.require_privileged("finalize_checklist")?;
        let mut connection = self.connection()?;
        privileged::finalize(&mut connection, request)
    }

    fn reopen(&self, request: &ReopenRequest) -> StoreResult<()> {
        self.require_privileged("reopen_checklist")?;
        let mut connection = self.connection()?;
        privileged::reopen(&mut connection, request)
    }
}
