//! Core library for the Pitstop maintenance checklist application.
//!
//! This crate provides the checklist lifecycle state machine, its store ports
//! and adapters, the read models used for reports, and error handling.
//!
//! # Architecture
//!
//! - **Domain Models** ([`models`]): the [`Checklist`] record, its status
//!   machine, payload, query and report types
//! - **Store Ports** ([`store`]): [`store::ChecklistStore`] and
//!   [`store::PrivilegedOps`], with SQLite and in-memory adapters
//! - **Lifecycle** ([`lifecycle`]): open, finalize (atomic or fallback),
//!   reopen, creation guard, payload edits and read models
//! - **Service** ([`service`]): async facade used by the CLI
//! - **Display** ([`display`]): markdown formatting for terminal output
//!
//! # Quick Start
//!
//! ```rust
//! use pitstop_core::{params::{CreateChecklist, Transition}, ServiceBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let service = ServiceBuilder::new()
//!     .with_database_path(Some("test.db"))
//!     .build()
//!     .await?;
//!
//! let checklist = service
//!     .create(&CreateChecklist {
//!         vehicle_plate: "ABC1D23".to_string(),
//!         supplier_id: Some("acme-motors".to_string()),
//!         service: Some("Brake pads".to_string()),
//!         ..Default::default()
//!     })
//!     .await?;
//! println!("Created checklist: {}", checklist);
//!
//! service.open(checklist.id).await?;
//! let outcome = service
//!     .finalize(&Transition { id: checklist.id, actor: Some("maria".to_string()) })
//!     .await?;
//! println!("Maintenance took {}s", outcome.maintenance_seconds);
//! # Ok(())
//! # }
//! ```

pub mod clock;
pub mod display;
pub mod error;
pub mod lifecycle;
pub mod models;
pub mod params;
pub mod service;
pub mod store;

// Re-export commonly used types
pub use clock::{Clock, ManualClock, SystemClock};
pub use display::{
    Checklists, CreateResult, DeleteResult, FinalizeResult, OperationStatus, UpdateResult,
};
pub use error::{ChecklistError, Result, StoreError, StoreErrorKind};
pub use lifecycle::LifecycleManager;
pub use models::{
    AuditEntry, Checklist, ChecklistStatus, FinalizeOutcome, FinalizePath, Report,
};
pub use params::{
    CreateChecklist, DeleteChecklist, Id, ListFinished, ListInProgress, ReportParams,
    SaveChecklist, Transition,
};
pub use service::{ChecklistService, ServiceBuilder};
pub use store::{ChecklistStore, MemoryStore, PrivilegedOps, SqliteStore};
