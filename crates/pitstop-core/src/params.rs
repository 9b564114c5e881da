//! Parameter structures for checklist operations
//!
//! This module contains shared parameter structures that can be used across
//! different interfaces (CLI, background jobs, etc.) without framework-specific
//! derives. Interface layers define their own argument types and convert into
//! these.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   CLI Args      │    │  Core Params    │    │   Lifecycle     │
//! │  (clap derives) │───▶│ (minimal deps)  │───▶│    Manager      │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::{
    error::{ChecklistError, Result},
    models::{ChecklistStatus, DefectItem},
};

/// Generic parameters for operations requiring just an ID.
///
/// Used for open, show and history.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Id {
    /// The ID of the checklist to operate on
    pub id: u64,
}

/// Parameters for creating a new checklist.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateChecklist {
    /// Vehicle plate; normalized to trimmed uppercase
    pub vehicle_plate: String,
    /// Supplier performing the maintenance
    pub supplier_id: Option<String>,
    /// Free-form service description
    pub service: Option<String>,
    /// Initial notes
    pub notes: Option<String>,
    /// Defects noted when the vehicle arrived
    #[serde(default)]
    pub defect_items: Vec<DefectItem>,
}

impl CreateChecklist {
    /// Normalized plate, rejecting blank input.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pitstop_core::params::CreateChecklist;
    ///
    /// let params = CreateChecklist {
    ///     vehicle_plate: "  abc1d23 ".to_string(),
    ///     ..Default::default()
    /// };
    /// assert_eq!(params.normalized_plate()?, "ABC1D23");
    ///
    /// let blank = CreateChecklist::default();
    /// assert!(blank.normalized_plate().is_err());
    /// # pitstop_core::Result::<()>::Ok(())
    /// ```
    pub fn normalized_plate(&self) -> Result<String> {
        let plate = normalize_plate(&self.vehicle_plate);
        if plate.is_empty() {
            return Err(ChecklistError::invalid_input("vehicle_plate")
                .with_reason("Vehicle plate is required"));
        }
        Ok(plate)
    }
}

/// Trim and uppercase a vehicle plate.
pub fn normalize_plate(plate: &str) -> String {
    plate.trim().to_uppercase()
}

/// Parameters for editing the payload of an open checklist.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SaveChecklist {
    pub id: u64,
    /// Replacement notes; sanitized before storing, empty clears them
    pub notes: Option<String>,
    /// Defects to append to the existing list
    #[serde(default)]
    pub add_defects: Vec<DefectItem>,
    /// Storage paths of photos to append
    #[serde(default)]
    pub add_photos: Vec<String>,
    /// Storage paths of budget documents to append
    #[serde(default)]
    pub add_budgets: Vec<String>,
    /// Fuel gauge photo taken on arrival
    pub fuel_entry: Option<String>,
    /// Fuel gauge photo taken on departure
    pub fuel_exit: Option<String>,
}

impl SaveChecklist {
    pub fn is_empty(&self) -> bool {
        self.notes.is_none()
            && self.add_defects.is_empty()
            && self.add_photos.is_empty()
            && self.add_budgets.is_empty()
            && self.fuel_entry.is_none()
            && self.fuel_exit.is_none()
    }
}

/// Parameters for finalize and reopen.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Transition {
    pub id: u64,
    /// Identity recorded in the audit trail
    pub actor: Option<String>,
}

/// Parameters for deleting a checklist.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeleteChecklist {
    pub id: u64,
    /// Deletion is refused unless explicitly confirmed
    pub confirmed: bool,
}

/// Parameters for listing in-progress checklists.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListInProgress {
    /// Case-insensitive plate substring
    pub plate: Option<String>,
    /// Case-insensitive supplier substring
    pub supplier: Option<String>,
    /// Only checklists open for at least this many hours
    pub min_hours: Option<f64>,
}

impl ListInProgress {
    /// Minimum age in seconds, validated.
    pub fn min_seconds(&self) -> Result<Option<u64>> {
        match self.min_hours {
            None => Ok(None),
            Some(hours) if hours.is_finite() && hours >= 0.0 => {
                Ok(Some((hours * 3600.0).ceil() as u64))
            }
            Some(hours) => Err(ChecklistError::invalid_input("min_hours")
                .with_reason(format!("Must be a non-negative number, got {hours}"))),
        }
    }
}

/// Parameters for listing finalized checklists.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListFinished {
    pub plate: Option<String>,
    /// Inclusive lower bound on the finish time
    pub from: Option<Timestamp>,
    /// Inclusive upper bound on the finish time
    pub to: Option<Timestamp>,
}

/// Parameters for the maintenance time report.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportParams {
    pub status: Option<ChecklistStatus>,
    /// Case-insensitive plate substring
    pub vehicle: Option<String>,
    /// Case-insensitive supplier substring
    pub supplier: Option<String>,
    /// Inclusive lower bound on the creation time
    pub from: Option<Timestamp>,
    /// Inclusive upper bound on the creation time
    pub to: Option<Timestamp>,
}
