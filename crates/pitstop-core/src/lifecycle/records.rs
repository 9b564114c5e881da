//! Creation, payload edits, deletion and the audit trail.

use std::path::Path;

use log::debug;

use super::{sanitize::sanitize_notes, LifecycleManager};
use crate::{
    clock::Clock,
    error::{ChecklistError, Result, StoreErrorKind},
    models::{
        AuditEntry, BudgetAttachment, Checklist, ChecklistEdit, ChecklistPatch, MediaItem,
        NewChecklistRecord,
    },
    params::{CreateChecklist, DeleteChecklist, SaveChecklist},
    store::{ChecklistStore, PrivilegedOps},
};

/// Media kind recorded for photos attached through [`SaveChecklist`].
pub const PHOTO_MEDIA_KIND: &str = "photo";

fn non_blank(value: Option<&String>) -> Option<String> {
    value
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

impl<S, P, C> LifecycleManager<S, P, C>
where
    S: ChecklistStore,
    P: PrivilegedOps,
    C: Clock,
{
    /// Creates a `Draft` checklist for a vehicle.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a blank plate and `Conflict` when another
    /// checklist for the plate is still `Draft` or `InProgress`.
    pub fn create(&self, params: &CreateChecklist) -> Result<Checklist> {
        let plate = params.normalized_plate()?;
        if !self.store.find_open_by_plate(&plate)?.is_empty() {
            debug!("Refusing to create checklist: {plate} already has an open one");
            return Err(ChecklistError::Conflict { plate });
        }

        let notes = match non_blank(params.notes.as_ref()) {
            Some(notes) => Some(sanitize_notes(&notes)?).filter(|n| !n.is_empty()),
            None => None,
        };
        let record = NewChecklistRecord {
            sequence_label: Some(self.store.next_sequence_label()?),
            vehicle_plate: plate.clone(),
            supplier_id: non_blank(params.supplier_id.as_ref()),
            service: non_blank(params.service.as_ref()),
            notes,
            defect_items: params.defect_items.clone(),
            created_at: self.clock.now(),
        };

        let checklist = self.store.insert(record).map_err(|e| match e.kind() {
            StoreErrorKind::Conflict => ChecklistError::Conflict {
                plate: plate.clone(),
            },
            _ => ChecklistError::Store(e),
        })?;
        debug!(
            "Created checklist {} ({}) for {plate}",
            checklist.id,
            checklist.display_code()
        );
        Ok(checklist)
    }

    /// Replaces payload fields of an open checklist.
    ///
    /// Empty notes clear the stored notes. Returns `Locked` for finalized or
    /// locked checklists without writing.
    pub fn save(&self, id: u64, mut edit: ChecklistEdit) -> Result<Checklist> {
        let current = self.get(id)?;
        if !current.is_editable() {
            return Err(ChecklistError::Locked { id });
        }
        if edit.is_empty() {
            return Ok(current);
        }

        if let Some(notes) = edit.notes.take() {
            edit.notes = Some(sanitize_notes(&notes)?);
        }
        let patch = ChecklistPatch::from(edit);
        self.store.update(id, &patch).map_err(|e| match e.kind() {
            StoreErrorKind::PermissionDenied => ChecklistError::Locked { id },
            _ => ChecklistError::from_store(id, e),
        })?;
        debug!("Saved payload of checklist {id}");

        self.get(id)
    }

    /// Appends defects, photos and budget documents and sets fuel gauge
    /// photos, then saves through [`Self::save`].
    pub fn save_changes(&self, params: &SaveChecklist) -> Result<Checklist> {
        let current = self.get(params.id)?;
        let now = self.clock.now();
        let mut edit = ChecklistEdit {
            notes: params.notes.clone(),
            ..Default::default()
        };

        if !params.add_defects.is_empty() {
            let mut items = current.defect_items.clone();
            items.extend(params.add_defects.iter().cloned());
            edit.defect_items = Some(items);
        }
        if !params.add_photos.is_empty() {
            let mut media = current.media.clone();
            media.extend(params.add_photos.iter().map(|path| MediaItem {
                kind: PHOTO_MEDIA_KIND.to_string(),
                path: path.clone(),
                created_at: now,
            }));
            edit.media = Some(media);
        }
        if !params.add_budgets.is_empty() {
            let mut attachments = current.budget_attachments.clone();
            attachments.extend(params.add_budgets.iter().map(|path| BudgetAttachment {
                name: Path::new(path)
                    .file_name()
                    .and_then(|name| name.to_str())
                    .unwrap_or(path)
                    .to_string(),
                path: path.clone(),
                created_at: now,
            }));
            edit.budget_attachments = Some(attachments);
        }
        if params.fuel_entry.is_some() || params.fuel_exit.is_some() {
            let mut photos = current.fuel_gauge_photos.clone();
            if let Some(entry) = &params.fuel_entry {
                photos.entry = Some(entry.clone());
            }
            if let Some(exit) = &params.fuel_exit {
                photos.exit = Some(exit.clone());
            }
            edit.fuel_gauge_photos = Some(photos);
        }

        self.save(params.id, edit)
    }

    /// Removes a checklist and its audit trail. Requires confirmation.
    pub fn delete(&self, params: &DeleteChecklist) -> Result<()> {
        if !params.confirmed {
            return Err(ChecklistError::invalid_input("confirmed")
                .with_reason("Deleting a checklist must be confirmed"));
        }
        self.store
            .delete(params.id)
            .map_err(|e| ChecklistError::from_store(params.id, e))?;
        debug!("Deleted checklist {}", params.id);
        Ok(())
    }

    /// Audit trail of privileged transitions, oldest first.
    pub fn history(&self, id: u64) -> Result<Vec<AuditEntry>> {
        self.get(id)?;
        Ok(self.store.audit_trail(id)?)
    }
}
