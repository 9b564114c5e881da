//! Result wrapper types for displaying operation outcomes.

use std::fmt;

use jiff::Timestamp;

use super::{datetime::Hms, models::ChecklistDetail};
use crate::models::{Checklist, FinalizeOutcome};

/// Result of creating a checklist.
pub struct CreateResult<T> {
    pub resource: T,
}

impl<T> CreateResult<T> {
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for CreateResult<Checklist> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Created checklist {} with ID: {}",
            self.resource.display_code(),
            self.resource.id
        )?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// Result of an operation that changed a checklist (open, save, reopen),
/// optionally listing what changed.
///
/// # Examples
///
/// ```rust
/// use jiff::Timestamp;
/// use pitstop_core::{
///     display::UpdateResult,
///     models::{Checklist, ChecklistStatus, FuelGaugePhotos},
/// };
///
/// let now: Timestamp = "2024-01-01T00:00:00Z".parse().unwrap();
/// let checklist = Checklist {
///     id: 1,
///     sequence_label: None,
///     vehicle_plate: "ABC1D23".to_string(),
///     supplier_id: None,
///     service: None,
///     status: ChecklistStatus::InProgress,
///     started_at: Some(now),
///     finished_at: None,
///     maintenance_seconds: 0,
///     is_locked: false,
///     notes: Some("replace wipers".to_string()),
///     defect_items: vec![],
///     media: vec![],
///     budget_attachments: vec![],
///     fuel_gauge_photos: FuelGaugePhotos::default(),
///     created_at: now,
/// };
///
/// let result = UpdateResult::with_changes(checklist, now, vec!["Updated notes".to_string()]);
/// let output = result.to_string();
/// assert!(output.contains("Updated checklist with ID: 1"));
/// assert!(output.contains("- Updated notes"));
/// ```
pub struct UpdateResult<T> {
    pub resource: T,
    pub now: Timestamp,
    pub changes: Vec<String>,
}

impl<T> UpdateResult<T> {
    pub fn new(resource: T, now: Timestamp) -> Self {
        Self {
            resource,
            now,
            changes: Vec::new(),
        }
    }

    pub fn with_changes(resource: T, now: Timestamp, changes: Vec<String>) -> Self {
        Self {
            resource,
            now,
            changes,
        }
    }
}

impl fmt::Display for UpdateResult<Checklist> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Updated checklist with ID: {}", self.resource.id)?;

        if !self.changes.is_empty() {
            writeln!(f)?;
            writeln!(f, "Changes made:")?;
            for change in &self.changes {
                writeln!(f, "- {change}")?;
            }
        }

        writeln!(f)?;
        write!(f, "{}", ChecklistDetail::new(&self.resource, self.now))
    }
}

/// Result of finalizing a checklist.
pub struct FinalizeResult {
    pub id: u64,
    pub outcome: FinalizeOutcome,
}

impl FinalizeResult {
    pub fn new(id: u64, outcome: FinalizeOutcome) -> Self {
        Self { id, outcome }
    }
}

impl fmt::Display for FinalizeResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Finalized checklist with ID: {}", self.id)?;
        writeln!(f)?;
        writeln!(
            f,
            "- Maintenance time: {}",
            Hms(self.outcome.maintenance_seconds)
        )?;
        let locked = if self.outcome.locked { "yes" } else { "no" };
        writeln!(f, "- Locked: {locked}")
    }
}

/// Result of deleting a checklist.
pub struct DeleteResult<T> {
    pub resource: T,
}

impl<T> DeleteResult<T> {
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for DeleteResult<Checklist> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Deleted checklist {} for {} (ID: {})",
            self.resource.display_code(),
            self.resource.vehicle_plate,
            self.resource.id
        )
    }
}
