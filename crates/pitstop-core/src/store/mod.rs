//! Persistence ports for the checklist lifecycle.
//!
//! The lifecycle manager talks to two collaborators:
//!
//! - [`ChecklistStore`]: a generic record store with read/patch/delete by id
//!   and conditional queries.
//! - [`PrivilegedOps`]: optional server-side operations that finalize or
//!   reopen a checklist in one atomic step.
//!
//! Adapters classify their failures with [`StoreErrorKind`]; in particular a
//! privileged operation that is not installed reports
//! [`StoreErrorKind::Unsupported`] and one rejected by the access policy
//! reports [`StoreErrorKind::PermissionDenied`].
//!
//! Two adapters ship with the crate: [`SqliteStore`] for local persistence and
//! [`MemoryStore`] for tests and policy emulation.

use std::sync::Arc;

use crate::{
    error::{StoreError, StoreErrorKind, StoreResult},
    models::{
        AuditEntry, Checklist, ChecklistPatch, ChecklistQuery, FinalizeReceipt, FinalizeRequest,
        NewChecklistRecord, ReopenRequest,
    },
};

pub mod memory;
pub mod sqlite;

pub use memory::{MemoryStore, RpcAvailability};
pub use sqlite::SqliteStore;

/// Prefix of human readable checklist sequence codes.
pub const SEQUENCE_PREFIX: &str = "CHK";

/// Format a counter value as a sequence label.
///
/// # Examples
///
/// ```rust
/// use pitstop_core::store::format_sequence_label;
///
/// assert_eq!(format_sequence_label(123), "CHK-000123");
/// ```
pub fn format_sequence_label(value: u64) -> String {
    format!("{SEQUENCE_PREFIX}-{value:06}")
}

/// Record store holding checklists.
pub trait ChecklistStore {
    /// Read a checklist by id.
    fn get(&self, id: u64) -> StoreResult<Option<Checklist>>;

    /// Insert a new `Draft` checklist and return it with its assigned id.
    fn insert(&self, record: NewChecklistRecord) -> StoreResult<Checklist>;

    /// Apply a partial patch. Fails with [`StoreErrorKind::NotFound`] when the
    /// id is absent.
    fn update(&self, id: u64, patch: &ChecklistPatch) -> StoreResult<()>;

    /// Remove a checklist and its audit trail.
    fn delete(&self, id: u64) -> StoreResult<()>;

    /// Checklists for `plate` whose status is `Draft` or `InProgress`.
    fn find_open_by_plate(&self, plate: &str) -> StoreResult<Vec<Checklist>>;

    /// Run a conditional query.
    fn list(&self, query: &ChecklistQuery) -> StoreResult<Vec<Checklist>>;

    /// Reserve the next sequence label from the store's atomic counter.
    fn next_sequence_label(&self) -> StoreResult<String>;

    /// Audit entries for a checklist, oldest first.
    fn audit_trail(&self, id: u64) -> StoreResult<Vec<AuditEntry>>;
}

/// Atomic, access-controlled lifecycle operations.
pub trait PrivilegedOps {
    /// Atomically read `started_at`, compute the duration and write the
    /// finalized state including the lock. Fails with
    /// [`StoreErrorKind::Conflict`] when the checklist is already finalized.
    fn finalize(&self, request: &FinalizeRequest) -> StoreResult<FinalizeReceipt>;

    /// Atomically move a finalized checklist back to `InProgress`, clearing
    /// the lock. Fails with [`StoreErrorKind::Conflict`] when the checklist is
    /// not finalized.
    fn reopen(&self, request: &ReopenRequest) -> StoreResult<()>;
}

/// Stand-in for a backend without privileged operations installed.
///
/// Every call fails with [`StoreErrorKind::Unsupported`], which sends
/// finalize down the fallback path.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPrivilegedOps;

impl PrivilegedOps for NoPrivilegedOps {
    fn finalize(&self, _request: &FinalizeRequest) -> StoreResult<FinalizeReceipt> {
        Err(StoreError::new(
            StoreErrorKind::Unsupported,
            "privileged finalize is not available",
        ))
    }

    fn reopen(&self, _request: &ReopenRequest) -> StoreResult<()> {
        Err(StoreError::new(
            StoreErrorKind::Unsupported,
            "privileged reopen is not available",
        ))
    }
}

impl<T: ChecklistStore + ?Sized> ChecklistStore for &T {
    fn get(&self, id: u64) -> StoreResult<Option<Checklist>> {
        (**self).get(id)
    }

    fn insert(&self, record: NewChecklistRecord) -> StoreResult<Checklist> {
        (**self).insert(record)
    }

    fn update(&self, id: u64, patch: &ChecklistPatch) -> StoreResult<()> {
        (**self).update(id, patch)
    }

    fn delete(&self, id: u64) -> StoreResult<()> {
        (**self).delete(id)
    }

    fn find_open_by_plate(&self, plate: &str) -> StoreResult<Vec<Checklist>> {
        (**self).find_open_by_plate(plate)
    }

    fn list(&self, query: &ChecklistQuery) -> StoreResult<Vec<Checklist>> {
        (**self).list(query)
    }

    fn next_sequence_label(&self) -> StoreResult<String> {
        (**self).next_sequence_label()
    }

    fn audit_trail(&self, id: u64) -> StoreResult<Vec<AuditEntry>> {
        (**self).audit_trail(id)
    }
}

impl<T: ChecklistStore + ?Sized> ChecklistStore for Arc<T> {
    fn get(&self, id: u64) -> StoreResult<Option<Checklist>> {
        (**self).get(id)
    }

    fn insert(&self, record: NewChecklistRecord) -> StoreResult<Checklist> {
        (**self).insert(record)
    }

    fn update(&self, id: u64, patch: &ChecklistPatch) -> StoreResult<()> {
        (**self).update(id, patch)
    }

    fn delete(&self, id: u64) -> StoreResult<()> {
        (**self).delete(id)
    }

    fn find_open_by_plate(&self, plate: &str) -> StoreResult<Vec<Checklist>> {
        (**self).find_open_by_plate(plate)
    }

    fn list(&self, query: &ChecklistQuery) -> StoreResult<Vec<Checklist>> {
        (**self).list(query)
    }

    fn next_sequence_label(&self) -> StoreResult<String> {
        (**self).next_sequence_label()
    }

    fn audit_trail(&self, id: u64) -> StoreResult<Vec<AuditEntry>> {
        (**self).audit_trail(id)
    }
}

impl<T: PrivilegedOps + ?Sized> PrivilegedOps for &T {
    fn finalize(&self, request: &FinalizeRequest) -> StoreResult<FinalizeReceipt> {
        (**self).finalize(request)
    }

    fn reopen(&self, request: &ReopenRequest) -> StoreResult<()> {
        (**self).reopen(request)
    }
}

impl<T: PrivilegedOps + ?Sized> PrivilegedOps for Arc<T> {
    fn finalize(&self, request: &FinalizeRequest) -> StoreResult<FinalizeReceipt> {
        (**self).finalize(request)
    }

    fn reopen(&self, request: &ReopenRequest) -> StoreResult<()> {
        (**self).reopen(request)
    }
}
