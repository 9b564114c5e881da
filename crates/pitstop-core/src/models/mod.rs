//! Data models for maintenance checklists.
//!
//! This module contains the domain types of the checklist lifecycle: the
//! [`Checklist`] record itself, its [`ChecklistStatus`] state machine, the
//! payload carried while the checklist is open, and the request/outcome types
//! exchanged with the store ports. Display implementations live in
//! [`crate::display::models`].
//!
//! # Lifecycle fields
//!
//! | status | `started_at` | `finished_at` | `maintenance_seconds` | `is_locked` |
//! |---|---|---|---|---|
//! | `Draft` | unset | unset | 0 | false |
//! | `InProgress` | set | unset | 0 | false |
//! | `Finalized` | set | set | measured | true |
//!
//! The fallback finalize path may leave `is_locked` false on a finalized
//! record; status and duration are authoritative.
//!
//! # Examples
//!
//! ```rust
//! use jiff::Timestamp;
//! use pitstop_core::models::{Checklist, ChecklistStatus, FuelGaugePhotos};
//!
//! let started: Timestamp = "2024-01-01T00:00:00Z".parse().unwrap();
//! let checklist = Checklist {
//!     id: 1,
//!     sequence_label: Some("CHK-000001".to_string()),
//!     vehicle_plate: "ABC1D23".to_string(),
//!     supplier_id: None,
//!     service: None,
//!     status: ChecklistStatus::InProgress,
//!     started_at: Some(started),
//!     finished_at: None,
//!     maintenance_seconds: 0,
//!     is_locked: false,
//!     notes: None,
//!     defect_items: vec![],
//!     media: vec![],
//!     budget_attachments: vec![],
//!     fuel_gauge_photos: FuelGaugePhotos::default(),
//!     created_at: started,
//! };
//!
//! let now: Timestamp = "2024-01-01T00:10:00Z".parse().unwrap();
//! assert_eq!(checklist.elapsed_seconds(now), 600);
//! ```

pub mod checklist;
pub mod filters;
pub mod outcome;
pub mod payload;
pub mod report;
pub mod requests;
pub mod status;
pub mod timing;

#[cfg(test)]
mod tests;

pub use checklist::Checklist;
pub use filters::{ChecklistOrder, ChecklistQuery};
pub use outcome::{
    AuditAction, AuditEntry, FinalizeOutcome, FinalizePath, FinalizeReceipt, FinalizeRequest,
    ReopenRequest,
};
pub use payload::{BudgetAttachment, DefectItem, FuelGaugePhotos, MediaItem};
pub use report::{GroupAverage, Report, ReportRow};
pub use requests::{ChecklistEdit, ChecklistPatch, NewChecklistRecord};
pub use status::ChecklistStatus;
pub use timing::{hours_rounded, seconds_between, AgeBand};
