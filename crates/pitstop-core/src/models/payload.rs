//! Free-form payload carried by a checklist.
//!
//! These fields are only mutable while the checklist is not finalized. The
//! store serializes them as JSON.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// A defect noted during inspection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DefectItem {
    /// Inspected item (e.g. "brakes", "left headlight")
    pub item: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
}

impl DefectItem {
    pub fn new(item: impl Into<String>) -> Self {
        Self {
            item: item.into(),
            description: None,
            severity: None,
        }
    }
}

/// A photo or video uploaded to file storage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MediaItem {
    /// Media kind, `photo` for uploads from the checklist screen
    pub kind: String,

    /// Storage path of the uploaded file
    pub path: String,

    pub created_at: Timestamp,
}

/// A supplier budget document attached to the checklist.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BudgetAttachment {
    pub name: String,
    pub path: String,
    pub created_at: Timestamp,
}

/// Fuel gauge photos taken when the vehicle enters and leaves the workshop.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FuelGaugePhotos {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exit: Option<String>,
}

impl FuelGaugePhotos {
    pub fn is_empty(&self) -> bool {
        self.entry.is_none() && self.exit.is_none()
    }
}
