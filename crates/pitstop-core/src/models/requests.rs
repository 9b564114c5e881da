//! Request types for creating and updating checklists.

use jiff::Timestamp;

use super::{BudgetAttachment, Checklist, ChecklistStatus, DefectItem, FuelGaugePhotos, MediaItem};

/// Record handed to the store when inserting a new `Draft` checklist.
///
/// The lifecycle manager fills this in after normalizing the plate and
/// reserving a sequence label.
#[derive(Debug, Clone)]
pub struct NewChecklistRecord {
    pub sequence_label: Option<String>,
    pub vehicle_plate: String,
    pub supplier_id: Option<String>,
    pub service: Option<String>,
    pub notes: Option<String>,
    pub defect_items: Vec<DefectItem>,
    pub created_at: Timestamp,
}

impl NewChecklistRecord {
    /// Materialize the record as a freshly created draft with the given id.
    pub fn into_checklist(self, id: u64) -> Checklist {
        Checklist {
            id,
            sequence_label: self.sequence_label,
            vehicle_plate: self.vehicle_plate,
            supplier_id: self.supplier_id,
            service: self.service,
            status: ChecklistStatus::Draft,
            started_at: None,
            finished_at: None,
            maintenance_seconds: 0,
            is_locked: false,
            notes: self.notes,
            defect_items: self.defect_items,
            media: Vec::new(),
            budget_attachments: Vec::new(),
            fuel_gauge_photos: FuelGaugePhotos::default(),
            created_at: self.created_at,
        }
    }
}

/// Payload edit requested by a user while the checklist is open.
///
/// Only payload fields can be edited; lifecycle fields go through the
/// lifecycle operations.
#[derive(Debug, Clone, Default)]
pub struct ChecklistEdit {
    pub notes: Option<String>,
    pub defect_items: Option<Vec<DefectItem>>,
    pub media: Option<Vec<MediaItem>>,
    pub budget_attachments: Option<Vec<BudgetAttachment>>,
    pub fuel_gauge_photos: Option<FuelGaugePhotos>,
}

impl ChecklistEdit {
    pub fn is_empty(&self) -> bool {
        self.notes.is_none()
            && self.defect_items.is_none()
            && self.media.is_none()
            && self.budget_attachments.is_none()
            && self.fuel_gauge_photos.is_none()
    }
}

/// Partial update applied by [`crate::store::ChecklistStore::update`].
///
/// Only fields set to `Some` change. Nullable columns use a nested `Option`
/// so a patch can clear them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChecklistPatch {
    pub status: Option<ChecklistStatus>,
    pub started_at: Option<Option<Timestamp>>,
    pub finished_at: Option<Option<Timestamp>>,
    pub maintenance_seconds: Option<u64>,
    pub is_locked: Option<bool>,
    pub notes: Option<Option<String>>,
    pub defect_items: Option<Vec<DefectItem>>,
    pub media: Option<Vec<MediaItem>>,
    pub budget_attachments: Option<Vec<BudgetAttachment>>,
    pub fuel_gauge_photos: Option<FuelGaugePhotos>,
}

impl ChecklistPatch {
    /// Patch moving a draft into progress.
    pub fn start(at: Timestamp) -> Self {
        Self {
            status: Some(ChecklistStatus::InProgress),
            started_at: Some(Some(at)),
            is_locked: Some(false),
            ..Default::default()
        }
    }

    /// First write of the fallback finalize: status and timing, lock untouched.
    pub fn finish(at: Timestamp, maintenance_seconds: u64) -> Self {
        Self {
            status: Some(ChecklistStatus::Finalized),
            finished_at: Some(Some(at)),
            maintenance_seconds: Some(maintenance_seconds),
            ..Default::default()
        }
    }

    /// Patch touching only the lock flag.
    pub fn lock(locked: bool) -> Self {
        Self {
            is_locked: Some(locked),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Whether the patch sets the lock in the same write that changes status.
    pub fn locks_with_status_change(&self) -> bool {
        self.status.is_some() && self.is_locked == Some(true)
    }

    /// Apply the patch to an in-memory record.
    pub fn apply_to(&self, checklist: &mut Checklist) {
        if let Some(status) = self.status {
            checklist.status = status;
        }
        if let Some(started_at) = self.started_at {
            checklist.started_at = started_at;
        }
        if let Some(finished_at) = self.finished_at {
            checklist.finished_at = finished_at;
        }
        if let Some(seconds) = self.maintenance_seconds {
            checklist.maintenance_seconds = seconds;
        }
        if let Some(locked) = self.is_locked {
            checklist.is_locked = locked;
        }
        if let Some(notes) = &self.notes {
            checklist.notes = notes.clone();
        }
        if let Some(items) = &self.defect_items {
            checklist.defect_items = items.clone();
        }
        if let Some(media) = &self.media {
            checklist.media = media.clone();
        }
        if let Some(attachments) = &self.budget_attachments {
            checklist.budget_attachments = attachments.clone();
        }
        if let Some(photos) = &self.fuel_gauge_photos {
            checklist.fuel_gauge_photos = photos.clone();
        }
    }
}

impl From<ChecklistEdit> for ChecklistPatch {
    fn from(edit: ChecklistEdit) -> Self {
        Self {
            notes: edit
                .notes
                .map(|notes| if notes.is_empty() { None } else { Some(notes) }),
            defect_items: edit.defect_items,
            media: edit.media,
            budget_attachments: edit.budget_attachments,
            fuel_gauge_photos: edit.fuel_gauge_photos,
            ..Default::default()
        }
    }
}
