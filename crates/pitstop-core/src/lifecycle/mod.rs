//! Checklist lifecycle state machine.
//!
//! [`LifecycleManager`] enforces the `Draft → InProgress → Finalized`
//! transitions on top of an injected [`ChecklistStore`], an optional
//! [`PrivilegedOps`] implementation and a [`Clock`].
//!
//! ```text
//! ┌─────────────────┐    ┌──────────────────┐    ┌─────────────────┐
//! │ Service facade  │    │ LifecycleManager │    │  ChecklistStore │
//! │  (async, CLI)   │───▶│  transitions,    │───▶│  PrivilegedOps  │
//! │                 │    │  guards, reports │    │  (sqlite, mem)  │
//! └─────────────────┘    └──────────────────┘    └─────────────────┘
//! ```
//!
//! ## Finalize paths
//!
//! Finalize first calls the privileged operation, which computes the duration
//! and locks the record in one transaction. When that operation reports
//! [`StoreErrorKind::Unsupported`] or [`StoreErrorKind::PermissionDenied`] the
//! manager falls back to two plain updates: status and timing first, the lock
//! second. Between the two writes a reader can observe a finalized record that
//! is not yet locked, and a failed lock write still counts as success; the
//! returned [`FinalizeOutcome`] says which path ran and whether the lock
//! landed.
//!
//! # Examples
//!
//! ```rust
//! use jiff::Timestamp;
//! use pitstop_core::{
//!     clock::ManualClock,
//!     lifecycle::LifecycleManager,
//!     models::{ChecklistStatus, FinalizePath},
//!     params::CreateChecklist,
//!     store::{MemoryStore, RpcAvailability},
//! };
//!
//! # fn main() -> pitstop_core::Result<()> {
//! let store = MemoryStore::new().with_rpc(RpcAvailability::Missing);
//! let clock = ManualClock::new("2024-01-01T00:00:00Z".parse::<Timestamp>().unwrap());
//! let manager = LifecycleManager::new(&store, clock.clone()).with_privileged(&store);
//!
//! let checklist = manager.create(&CreateChecklist {
//!     vehicle_plate: "abc1d23".to_string(),
//!     ..Default::default()
//! })?;
//! manager.open(checklist.id)?;
//!
//! clock.advance_secs(5400);
//! let outcome = manager.finalize(checklist.id, None)?;
//! assert_eq!(outcome.path, FinalizePath::Fallback);
//! assert_eq!(outcome.maintenance_seconds, 5400);
//! assert_eq!(manager.get(checklist.id)?.status, ChecklistStatus::Finalized);
//! # Ok(())
//! # }
//! ```
//!
//! [`StoreErrorKind::Unsupported`]: crate::error::StoreErrorKind::Unsupported
//! [`StoreErrorKind::PermissionDenied`]: crate::error::StoreErrorKind::PermissionDenied
//! [`FinalizeOutcome`]: crate::models::FinalizeOutcome

use jiff::Timestamp;

use crate::{
    clock::{Clock, SystemClock},
    error::{ChecklistError, Result},
    models::Checklist,
    store::{ChecklistStore, NoPrivilegedOps, PrivilegedOps},
};

mod queries;
mod records;
pub mod sanitize;
mod transitions;

#[cfg(test)]
mod tests;

/// Coordinates lifecycle transitions against a store.
#[derive(Debug)]
pub struct LifecycleManager<S, P = NoPrivilegedOps, C = SystemClock> {
    store: S,
    privileged: P,
    clock: C,
}

impl<S, C> LifecycleManager<S, NoPrivilegedOps, C>
where
    S: ChecklistStore,
    C: Clock,
{
    /// Creates a manager without privileged operations; finalize always takes
    /// the fallback path and reopen is unavailable.
    pub fn new(store: S, clock: C) -> Self {
        Self {
            store,
            privileged: NoPrivilegedOps,
            clock,
        }
    }
}

impl<S, P, C> LifecycleManager<S, P, C>
where
    S: ChecklistStore,
    P: PrivilegedOps,
    C: Clock,
{
    /// Attaches the privileged operations used by finalize and reopen.
    pub fn with_privileged<Q: PrivilegedOps>(self, privileged: Q) -> LifecycleManager<S, Q, C> {
        LifecycleManager {
            store: self.store,
            privileged,
            clock: self.clock,
        }
    }

    /// Current instant according to the injected clock.
    pub fn now(&self) -> Timestamp {
        self.clock.now()
    }

    /// Reads a checklist, failing with `NotFound` when absent.
    pub fn get(&self, id: u64) -> Result<Checklist> {
        self.store
            .get(id)?
            .ok_or(ChecklistError::NotFound { id })
    }
}
