//! In-memory store with a configurable access policy.
//!
//! [`MemoryStore`] implements both store ports over a mutex-guarded map. Its
//! policy knobs emulate a hosted backend: the privileged operations can be
//! missing or denied, lock writes can be refused, and one-shot failures can be
//! queued for the next update.

use std::collections::{BTreeMap, VecDeque};
use std::sync::{Mutex, MutexGuard};

use log::debug;

use super::{format_sequence_label, ChecklistStore, PrivilegedOps};
use crate::{
    error::{StoreError, StoreErrorKind, StoreResult},
    models::{
        seconds_between, AuditAction, AuditEntry, Checklist, ChecklistPatch, ChecklistQuery,
        ChecklistStatus, FinalizeReceipt, FinalizeRequest, NewChecklistRecord, ReopenRequest,
    },
};

/// Availability of the privileged operations on the emulated backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RpcAvailability {
    /// Operations installed and permitted
    #[default]
    Installed,
    /// Operations not installed; calls fail with `Unsupported`
    Missing,
    /// Operations installed but rejected; calls fail with `PermissionDenied`
    Denied,
}

#[derive(Debug, Default)]
struct State {
    checklists: BTreeMap<u64, Checklist>,
    audit: Vec<AuditEntry>,
    last_id: u64,
    sequence: u64,
    writes: usize,
    injected_failures: VecDeque<StoreErrorKind>,
}

/// Thread-safe in-memory checklist store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<State>,
    rpc: RpcAvailability,
    deny_lock_writes: bool,
    deny_lock_with_status: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the availability of the privileged operations.
    pub fn with_rpc(mut self, rpc: RpcAvailability) -> Self {
        self.rpc = rpc;
        self
    }

    /// Refuse any plain update that sets `is_locked = true`.
    pub fn deny_lock_writes(mut self) -> Self {
        self.deny_lock_writes = true;
        self
    }

    /// Refuse a plain update that sets the lock and changes status at once.
    pub fn deny_lock_with_status(mut self) -> Self {
        self.deny_lock_with_status = true;
        self
    }

    /// Store a record as-is, bypassing policy and write accounting.
    pub fn seed(&self, checklist: Checklist) -> StoreResult<()> {
        let mut state = self.state()?;
        state.last_id = state.last_id.max(checklist.id);
        state.checklists.insert(checklist.id, checklist);
        Ok(())
    }

    /// Make the next plain update fail with `kind`.
    pub fn fail_next_update(&self, kind: StoreErrorKind) -> StoreResult<()> {
        self.state()?.injected_failures.push_back(kind);
        Ok(())
    }

    /// Number of successful mutations since creation.
    pub fn write_count(&self) -> StoreResult<usize> {
        Ok(self.state()?.writes)
    }

    /// Number of stored checklists.
    pub fn len(&self) -> StoreResult<usize> {
        Ok(self.state()?.checklists.len())
    }

    pub fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.len()? == 0)
    }

    fn state(&self) -> StoreResult<MutexGuard<'_, State>> {
        self.state
            .lock()
            .map_err(|_| StoreError::backend("memory store lock poisoned"))
    }

    fn check_rpc(&self, operation: &str) -> StoreResult<()> {
        match self.rpc {
            RpcAvailability::Installed => Ok(()),
            RpcAvailability::Missing => Err(StoreError::unsupported(format!(
                "function {operation} does not exist"
            ))),
            RpcAvailability::Denied => Err(StoreError::permission_denied(format!(
                "permission denied for function {operation}"
            ))),
        }
    }

    fn check_policy(&self, current: &Checklist, patch: &ChecklistPatch) -> StoreResult<()> {
        if current.is_locked {
            return Err(StoreError::permission_denied(format!(
                "checklist {} is locked",
                current.id
            )));
        }
        if self.deny_lock_writes && patch.is_locked == Some(true) {
            return Err(StoreError::permission_denied(
                "policy does not allow setting is_locked",
            ));
        }
        if self.deny_lock_with_status && patch.locks_with_status_change() {
            return Err(StoreError::permission_denied(
                "policy does not allow locking and changing status in one request",
            ));
        }
        Ok(())
    }
}

/// Mirror of the one-open-checklist-per-plate index of the SQLite schema.
fn ensure_no_open(state: &State, plate: &str, except: Option<u64>) -> StoreResult<()> {
    let taken = state
        .checklists
        .values()
        .any(|c| c.vehicle_plate == plate && c.status.is_open() && Some(c.id) != except);
    if taken {
        return Err(StoreError::conflict(format!(
            "an open checklist already exists for {plate}"
        )));
    }
    Ok(())
}

impl ChecklistStore for MemoryStore {
    fn get(&self, id: u64) -> StoreResult<Option<Checklist>> {
        Ok(self.state()?.checklists.get(&id).cloned())
    }

    fn insert(&self, record: NewChecklistRecord) -> StoreResult<Checklist> {
        let mut state = self.state()?;
        ensure_no_open(&state, &record.vehicle_plate, None)?;
        state.last_id += 1;
        let checklist = record.into_checklist(state.last_id);
        state.checklists.insert(checklist.id, checklist.clone());
        state.writes += 1;
        Ok(checklist)
    }

    fn update(&self, id: u64, patch: &ChecklistPatch) -> StoreResult<()> {
        let mut state = self.state()?;
        if let Some(kind) = state.injected_failures.pop_front() {
            return Err(StoreError::new(kind, format!("injected failure updating {id}")));
        }
        let current = state
            .checklists
            .get(&id)
            .ok_or_else(|| StoreError::not_found(format!("checklist {id} does not exist")))?;
        self.check_policy(current, patch)?;

        if let Some(checklist) = state.checklists.get_mut(&id) {
            patch.apply_to(checklist);
        }
        state.writes += 1;
        debug!("memory store patched checklist {id}");
        Ok(())
    }

    fn delete(&self, id: u64) -> StoreResult<()> {
        let mut state = self.state()?;
        if state.checklists.remove(&id).is_none() {
            return Err(StoreError::not_found(format!("checklist {id} does not exist")));
        }
        state.audit.retain(|entry| entry.checklist_id != id);
        state.writes += 1;
        Ok(())
    }

    fn find_open_by_plate(&self, plate: &str) -> StoreResult<Vec<Checklist>> {
        Ok(self
            .state()?
            .checklists
            .values()
            .filter(|c| c.vehicle_plate == plate && c.status.is_open())
            .cloned()
            .collect())
    }

    fn list(&self, query: &ChecklistQuery) -> StoreResult<Vec<Checklist>> {
        let mut found: Vec<Checklist> = self
            .state()?
            .checklists
            .values()
            .filter(|c| query.matches(c))
            .cloned()
            .collect();
        query.sort(&mut found);
        Ok(found)
    }

    fn next_sequence_label(&self) -> StoreResult<String> {
        let mut state = self.state()?;
        state.sequence += 1;
        Ok(format_sequence_label(state.sequence))
    }

    fn audit_trail(&self, id: u64) -> StoreResult<Vec<AuditEntry>> {
        Ok(self
            .state()?
            .audit
            .iter()
            .filter(|entry| entry.checklist_id == id)
            .cloned()
            .collect())
    }
}

impl PrivilegedOps for MemoryStore {
    fn finalize(&self, request: &FinalizeRequest) -> StoreResult<FinalizeReceipt> {
        self.check_rpc("finalize_checklist")?;
        let mut state = self.state()?;
        let checklist = state.checklists.get_mut(&request.id).ok_or_else(|| {
            StoreError::not_found(format!("checklist {} does not exist", request.id))
        })?;
        if checklist.status == ChecklistStatus::Finalized {
            return Err(StoreError::conflict(format!(
                "checklist {} is already finalized",
                request.id
            )));
        }

        let started = checklist.started_at.unwrap_or(request.at);
        let seconds = seconds_between(started, request.at);
        checklist.status = ChecklistStatus::Finalized;
        checklist.started_at = Some(started);
        checklist.finished_at = Some(request.at);
        checklist.maintenance_seconds = seconds;
        checklist.is_locked = true;

        state.audit.push(AuditEntry {
            checklist_id: request.id,
            action: AuditAction::Finalized,
            actor: request.actor.clone(),
            at: request.at,
            maintenance_seconds: Some(seconds),
        });
        state.writes += 1;
        Ok(FinalizeReceipt {
            success: true,
            maintenance_seconds: seconds,
        })
    }

    fn reopen(&self, request: &ReopenRequest) -> StoreResult<()> {
        self.check_rpc("reopen_checklist")?;
        let mut state = self.state()?;
        let plate = state
            .checklists
            .get(&request.id)
            .map(|c| c.vehicle_plate.clone())
            .ok_or_else(|| {
                StoreError::not_found(format!("checklist {} does not exist", request.id))
            })?;
        ensure_no_open(&state, &plate, Some(request.id))?;
        let checklist = state.checklists.get_mut(&request.id).ok_or_else(|| {
            StoreError::not_found(format!("checklist {} does not exist", request.id))
        })?;
        if checklist.status != ChecklistStatus::Finalized {
            return Err(StoreError::conflict(format!(
                "checklist {} is not finalized",
                request.id
            )));
        }

        let discarded = checklist.maintenance_seconds;
        checklist.is_locked = false;
        checklist.status = ChecklistStatus::InProgress;
        checklist.finished_at = None;
        checklist.maintenance_seconds = 0;

        state.audit.push(AuditEntry {
            checklist_id: request.id,
            action: AuditAction::Reopened,
            actor: request.actor.clone(),
            at: request.at,
            maintenance_seconds: Some(discarded),
        });
        state.writes += 1;
        Ok(())
    }
}
