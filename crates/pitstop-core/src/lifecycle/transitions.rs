//! Open, finalize and reopen.

use log::{debug, info, warn};

use super::LifecycleManager;
use crate::{
    clock::Clock,
    error::{ChecklistError, Result, StoreError, StoreErrorKind},
    models::{
        seconds_between, Checklist, ChecklistPatch, ChecklistStatus, FinalizeOutcome,
        FinalizePath, FinalizeRequest, ReopenRequest,
    },
    store::{ChecklistStore, PrivilegedOps},
};

impl<S, P, C> LifecycleManager<S, P, C>
where
    S: ChecklistStore,
    P: PrivilegedOps,
    C: Clock,
{
    /// Promotes a `Draft` checklist to `InProgress` and returns the stored
    /// record. Any other state is returned unchanged without writing.
    pub fn open(&self, id: u64) -> Result<Checklist> {
        let checklist = self.get(id)?;
        if checklist.status != ChecklistStatus::Draft {
            debug!("Checklist {id} already {}, open is a no-op", checklist.status.as_str());
            return Ok(checklist);
        }

        let now = self.clock.now();
        self.store
            .update(id, &ChecklistPatch::start(now))
            .map_err(|e| ChecklistError::from_store(id, e))?;
        debug!("Checklist {id} started at {now}");

        self.get(id)
    }

    /// Finalizes a checklist, preferring the atomic privileged operation.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyFinalized` when the checklist is already finalized and
    /// `NotFound` when it does not exist, and a store error when the privileged
    /// operation reports failure. An unavailable or denied privileged
    /// operation is not an error; the fallback writes run instead.
    pub fn finalize(&self, id: u64, actor: Option<&str>) -> Result<FinalizeOutcome> {
        let request = FinalizeRequest {
            id,
            actor: actor.map(str::to_string),
            at: self.clock.now(),
        };

        match self.privileged.finalize(&request) {
            Ok(receipt) if !receipt.success => Err(ChecklistError::Store(StoreError::backend(
                format!("privileged finalize of checklist {id} reported failure"),
            ))),
            Ok(receipt) => {
                info!(
                    "Checklist {id} finalized atomically after {}s",
                    receipt.maintenance_seconds
                );
                Ok(FinalizeOutcome {
                    success: true,
                    maintenance_seconds: receipt.maintenance_seconds,
                    path: FinalizePath::Privileged,
                    locked: true,
                })
            }
            Err(e) if e.kind().is_fallback_trigger() => {
                warn!("Privileged finalize unavailable for checklist {id} ({e}); using fallback writes");
                self.finalize_fallback(&request)
            }
            Err(e) if e.kind() == StoreErrorKind::Conflict => {
                Err(ChecklistError::AlreadyFinalized { id })
            }
            Err(e) => Err(ChecklistError::from_store(id, e)),
        }
    }

    /// Two-step finalize: status and timing first, then a best-effort lock.
    fn finalize_fallback(&self, request: &FinalizeRequest) -> Result<FinalizeOutcome> {
        let id = request.id;
        let now = request.at;
        let checklist = self.get(id)?;
        if !checklist.status.can_transition_to(ChecklistStatus::Finalized) {
            return Err(ChecklistError::AlreadyFinalized { id });
        }

        let started = checklist.started_at.unwrap_or(now);
        let seconds = seconds_between(started, now);
        let mut patch = ChecklistPatch::finish(now, seconds);
        if checklist.started_at.is_none() {
            // A finalized record always carries a start time
            patch.started_at = Some(Some(now));
        }
        self.store
            .update(id, &patch)
            .map_err(|e| ChecklistError::from_store(id, e))?;
        debug!("Checklist {id} finalized without lock after {seconds}s");

        let locked = match self.store.update(id, &ChecklistPatch::lock(true)) {
            Ok(()) => true,
            Err(e) => {
                warn!("Checklist {id} finalized but the lock write failed: {e}");
                false
            }
        };
        info!("Checklist {id} finalized via fallback after {seconds}s (locked: {locked})");

        Ok(FinalizeOutcome {
            success: true,
            maintenance_seconds: seconds,
            path: FinalizePath::Fallback,
            locked,
        })
    }

    /// Reopens a finalized checklist through the privileged operation.
    ///
    /// There is no fallback: without the privileged operation the store's
    /// error is returned as-is.
    pub fn reopen(&self, id: u64, actor: Option<&str>) -> Result<Checklist> {
        let checklist = self.get(id)?;
        if checklist.status != ChecklistStatus::Finalized {
            return Err(ChecklistError::invalid_input("status")
                .with_reason(format!("Checklist {id} is not finalized")));
        }

        let request = ReopenRequest {
            id,
            actor: actor.map(str::to_string),
            at: self.clock.now(),
        };
        self.privileged.reopen(&request).map_err(|e| match e.kind() {
            StoreErrorKind::Conflict => ChecklistError::Conflict {
                plate: checklist.vehicle_plate.clone(),
            },
            _ => ChecklistError::from_store(id, e),
        })?;
        info!("Checklist {id} reopened");

        self.get(id)
    }
}
