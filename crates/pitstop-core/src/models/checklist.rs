//! Checklist model definition and related functionality.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{
    timing::{seconds_between, AgeBand},
    BudgetAttachment, ChecklistStatus, DefectItem, FuelGaugePhotos, MediaItem,
};

/// A maintenance checklist tied to a vehicle and a supplier.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Checklist {
    /// Unique identifier assigned by the store
    pub id: u64,

    /// Human readable sequence code (e.g. `CHK-000123`)
    pub sequence_label: Option<String>,

    /// Normalized (trimmed, uppercased) vehicle plate
    pub vehicle_plate: String,

    /// Supplier performing the maintenance
    pub supplier_id: Option<String>,

    /// Service description given at creation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,

    /// Lifecycle state
    pub status: ChecklistStatus,

    /// Set when the checklist first leaves `Draft`
    pub started_at: Option<Timestamp>,

    /// Set when the checklist is finalized
    pub finished_at: Option<Timestamp>,

    /// `finished_at - started_at` in whole seconds, 0 until finalized
    #[serde(default)]
    pub maintenance_seconds: u64,

    /// Advisory edit lock, set on finalize
    #[serde(default)]
    pub is_locked: bool,

    pub notes: Option<String>,

    #[serde(default)]
    pub defect_items: Vec<DefectItem>,

    #[serde(default)]
    pub media: Vec<MediaItem>,

    #[serde(default)]
    pub budget_attachments: Vec<BudgetAttachment>,

    #[serde(default)]
    pub fuel_gauge_photos: FuelGaugePhotos,

    /// Timestamp when the checklist was created (UTC)
    pub created_at: Timestamp,
}

impl Checklist {
    /// Payload fields may only change while this returns true.
    pub fn is_editable(&self) -> bool {
        self.status != ChecklistStatus::Finalized && !self.is_locked
    }

    /// Seconds to display as the checklist's duration at `now`.
    ///
    /// In-progress checklists show live elapsed time since `started_at`,
    /// finalized ones show the persisted `maintenance_seconds`, drafts show 0.
    /// Nothing here is written back to the store.
    pub fn elapsed_seconds(&self, now: Timestamp) -> u64 {
        match self.status {
            ChecklistStatus::Draft => 0,
            ChecklistStatus::InProgress => self
                .started_at
                .map(|started| seconds_between(started, now))
                .unwrap_or(0),
            ChecklistStatus::Finalized => self.maintenance_seconds,
        }
    }

    /// Age band of an in-progress checklist, `None` for other states.
    pub fn age_band(&self, now: Timestamp) -> Option<AgeBand> {
        match self.status {
            ChecklistStatus::InProgress if self.started_at.is_some() => {
                Some(AgeBand::from_seconds(self.elapsed_seconds(now)))
            }
            _ => None,
        }
    }

    /// Sequence label when assigned, otherwise the numeric id.
    pub fn display_code(&self) -> String {
        self.sequence_label
            .clone()
            .unwrap_or_else(|| self.id.to_string())
    }
}
