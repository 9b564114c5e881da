//! Display formatting functions and result types.
//!
//! Domain models implement [`std::fmt::Display`] directly; the wrappers in this
//! module add context such as the instant used for elapsed time or the
//! outcome of an operation. Every formatter produces markdown.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Domain Models  │    │    Wrappers     │    │    Markdown     │
//! │   (Checklist)   │───▶│ (Checklists,    │───▶│  (terminal via  │
//! │                 │    │  results, Hms)  │    │   termimad)     │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`collections`]: lists of checklists and audit entries
//! - [`results`]: create, update, finalize and delete results
//! - [`status`]: status labels and one-line feedback ([`OperationStatus`])
//! - [`datetime`]: timestamps in the local timezone and `HH:MM:SS` durations
//! - [`models`]: Display implementations for domain models

pub mod collections;
pub mod datetime;
pub mod models;
pub mod results;
pub mod status;

pub use collections::{AuditTrail, Checklists};
pub use datetime::{format_hms, Hms, LocalDateTime, OptionalDateTime};
pub use models::ChecklistDetail;
pub use results::{CreateResult, DeleteResult, FinalizeResult, UpdateResult};
pub use status::{OperationStatus, StatusLevel};
