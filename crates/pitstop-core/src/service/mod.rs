//! Async service facade over the lifecycle manager.
//!
//! [`ChecklistService`] is what interface layers (the CLI, background jobs)
//! talk to. Each call opens the SQLite store on a blocking worker thread,
//! wires a [`LifecycleManager`] with the system clock and runs one operation.
//!
//! ```text
//! ┌─────────────────┐    ┌──────────────────┐    ┌─────────────────┐
//! │   CLI handler   │    │ ChecklistService │    │   SqliteStore   │
//! │  (async, tokio) │───▶│  spawn_blocking  │───▶│ + lifecycle     │
//! └─────────────────┘    └──────────────────┘    └─────────────────┘
//! ```
//!
//! # Usage Examples
//!
//! ```rust
//! use pitstop_core::{params::{CreateChecklist, Transition}, ServiceBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let service = ServiceBuilder::new()
//!     .with_database_path(Some("/tmp/pitstop-example.db"))
//!     .build()
//!     .await?;
//!
//! let checklist = service
//!     .create(&CreateChecklist {
//!         vehicle_plate: "ABC1D23".to_string(),
//!         supplier_id: Some("acme-motors".to_string()),
//!         ..Default::default()
//!     })
//!     .await?;
//! service.open(checklist.id).await?;
//! let outcome = service
//!     .finalize(&Transition { id: checklist.id, actor: None })
//!     .await?;
//! println!("Finalized after {}s", outcome.maintenance_seconds);
//! # Ok(())
//! # }
//! ```

use std::path::PathBuf;

use jiff::Timestamp;
use tokio::task;

use crate::{
    clock::SystemClock,
    error::{ChecklistError, Result},
    lifecycle::LifecycleManager,
    models::{AuditEntry, Checklist, FinalizeOutcome, Report},
    params::{
        CreateChecklist, DeleteChecklist, ListFinished, ListInProgress, ReportParams,
        SaveChecklist, Transition,
    },
    store::SqliteStore,
};

pub mod builder;


pub use builder::ServiceBuilder;

type SqliteManager<'a> = LifecycleManager<&'a SqliteStore, &'a SqliteStore, SystemClock>;

/// Main service interface for managing checklists.
#[derive(Debug, Clone)]
pub struct ChecklistService {
    pub(crate) db_path: PathBuf,
    pub(crate) privileged_ops: bool,
}

impl ChecklistService {
    /// Creates a new service with the specified database path.
    pub(crate) fn new(db_path: PathBuf, privileged_ops: bool) -> Self {
        Self {
            db_path,
            privileged_ops,
        }
    }

    /// Path of the backing database file.
    pub fn database_path(&self) -> &PathBuf {
        &self.db_path
    }

    /// Runs `operation` against a freshly opened store on a blocking thread.
    async fn with_manager<T, F>(&self, operation: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&SqliteManager<'_>) -> Result<T> + Send + 'static,
    {
        let db_path = self.db_path.clone();
        let privileged_ops = self.privileged_ops;

        task::spawn_blocking(move || {
            let store = SqliteStore::open(&db_path, privileged_ops)?;
            let manager = LifecycleManager::new(&store, SystemClock).with_privileged(&store);
            operation(&manager)
        })
        .await
        .map_err(|e| ChecklistError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Creates a `Draft` checklist for a vehicle.
    pub async fn create(&self, params: &CreateChecklist) -> Result<Checklist> {
        let params = params.clone();
        self.with_manager(move |manager| manager.create(&params)).await
    }

    /// Opens a checklist, starting it when it is still a draft.
    pub async fn open(&self, id: u64) -> Result<Checklist> {
        self.with_manager(move |manager| manager.open(id)).await
    }

    /// Reads a checklist without changing it.
    pub async fn get(&self, id: u64) -> Result<Checklist> {
        self.with_manager(move |manager| manager.get(id)).await
    }

    /// Edits the payload of an open checklist.
    pub async fn save(&self, params: &SaveChecklist) -> Result<Checklist> {
        let params = params.clone();
        self.with_manager(move |manager| manager.save_changes(&params)).await
    }

    /// Finalizes a checklist.
    pub async fn finalize(&self, params: &Transition) -> Result<FinalizeOutcome> {
        let params = params.clone();
        self.with_manager(move |manager| manager.finalize(params.id, params.actor.as_deref()))
            .await
    }

    /// Reopens a finalized checklist; requires the privileged operations.
    pub async fn reopen(&self, params: &Transition) -> Result<Checklist> {
        let params = params.clone();
        self.with_manager(move |manager| manager.reopen(params.id, params.actor.as_deref()))
            .await
    }

    /// Permanently removes a checklist.
    pub async fn delete(&self, params: &DeleteChecklist) -> Result<()> {
        let params = params.clone();
        self.with_manager(move |manager| manager.delete(&params)).await
    }

    /// Audit trail of a checklist.
    pub async fn history(&self, id: u64) -> Result<Vec<AuditEntry>> {
        self.with_manager(move |manager| manager.history(id)).await
    }

    /// Lists in-progress checklists. Also returns the instant used for
    /// elapsed-time filtering so callers can render consistent durations;
    /// the clock is read once for both.
    pub async fn list_in_progress(
        &self,
        params: &ListInProgress,
    ) -> Result<(Vec<Checklist>, Timestamp)> {
        let params = params.clone();
        self.with_manager(move |manager| {
            let now = manager.now();
            let checklists = manager.list_in_progress_at(&params, now)?;
            Ok((checklists, now))
        })
        .await
    }

    /// Lists finalized checklists.
    pub async fn list_finished(&self, params: &ListFinished) -> Result<Vec<Checklist>> {
        let params = params.clone();
        self.with_manager(move |manager| manager.list_finished(&params)).await
    }

    /// Builds the maintenance time report.
    pub async fn report(&self, params: &ReportParams) -> Result<Report> {
        let params = params.clone();
        self.with_manager(move |manager| manager.report(&params)).await
    }
}
