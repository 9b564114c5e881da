//! Display implementations for domain models.
//!
//! All output is markdown, rendered by the CLI's terminal renderer.

use std::fmt;

use jiff::Timestamp;

use super::datetime::{Hms, LocalDateTime, OptionalDateTime};
use crate::models::{AuditEntry, Checklist, ChecklistStatus, Report};

/// A checklist shown with live elapsed time as of `now`.
pub struct ChecklistDetail<'a> {
    pub checklist: &'a Checklist,
    pub now: Timestamp,
}

impl<'a> ChecklistDetail<'a> {
    pub fn new(checklist: &'a Checklist, now: Timestamp) -> Self {
        Self { checklist, now }
    }
}

impl Checklist {
    /// Shared formatter; `now` adds the live elapsed time of an in-progress
    /// checklist.
    fn fmt_checklist(&self, f: &mut fmt::Formatter<'_>, now: Option<Timestamp>) -> fmt::Result {
        writeln!(
            f,
            "# {} · {} ({})",
            self.display_code(),
            self.vehicle_plate,
            self.status.with_icon()
        )?;
        writeln!(f)?;

        writeln!(f, "- ID: {}", self.id)?;
        if let Some(supplier) = &self.supplier_id {
            writeln!(f, "- Supplier: {supplier}")?;
        }
        if let Some(service) = &self.service {
            writeln!(f, "- Service: {service}")?;
        }
        writeln!(f, "- Created: {}", LocalDateTime(&self.created_at))?;
        if self.status != ChecklistStatus::Draft {
            writeln!(f, "- Started: {}", OptionalDateTime(self.started_at.as_ref()))?;
        }
        match self.status {
            ChecklistStatus::Finalized => {
                writeln!(f, "- Finished: {}", OptionalDateTime(self.finished_at.as_ref()))?;
                writeln!(f, "- Duration: {}", Hms(self.maintenance_seconds))?;
            }
            ChecklistStatus::InProgress => {
                if let Some(now) = now {
                    let band = self
                        .age_band(now)
                        .map(|band| format!(" ({band})"))
                        .unwrap_or_default();
                    writeln!(f, "- Elapsed: {}{band}", Hms(self.elapsed_seconds(now)))?;
                }
            }
            ChecklistStatus::Draft => {}
        }
        if self.is_locked {
            writeln!(f, "- Locked: yes")?;
        }

        if let Some(notes) = &self.notes {
            writeln!(f, "\n## Notes")?;
            writeln!(f)?;
            writeln!(f, "{notes}")?;
        }

        if !self.defect_items.is_empty() {
            writeln!(f, "\n## Defects")?;
            writeln!(f)?;
            for defect in &self.defect_items {
                write!(f, "- {}", defect.item)?;
                if let Some(description) = &defect.description {
                    write!(f, ": {description}")?;
                }
                if let Some(severity) = &defect.severity {
                    write!(f, " [{severity}]")?;
                }
                writeln!(f)?;
            }
        }

        if !self.media.is_empty() {
            writeln!(f, "\n## Media")?;
            writeln!(f)?;
            for media in &self.media {
                writeln!(f, "- {}: {}", media.kind, media.path)?;
            }
        }

        if !self.budget_attachments.is_empty() {
            writeln!(f, "\n## Budgets")?;
            writeln!(f)?;
            for budget in &self.budget_attachments {
                writeln!(f, "- {} ({})", budget.name, budget.path)?;
            }
        }

        if !self.fuel_gauge_photos.is_empty() {
            writeln!(f, "\n## Fuel gauge")?;
            writeln!(f)?;
            if let Some(entry) = &self.fuel_gauge_photos.entry {
                writeln!(f, "- Entry: {entry}")?;
            }
            if let Some(exit) = &self.fuel_gauge_photos.exit {
                writeln!(f, "- Exit: {exit}")?;
            }
        }

        Ok(())
    }

    /// Compact entry used in lists.
    pub(crate) fn fmt_summary(&self, f: &mut fmt::Formatter<'_>, now: Timestamp) -> fmt::Result {
        writeln!(
            f,
            "## {} · {} ({})",
            self.display_code(),
            self.vehicle_plate,
            self.status.with_icon()
        )?;
        writeln!(f)?;
        writeln!(f, "- **ID**: {}", self.id)?;
        if let Some(supplier) = &self.supplier_id {
            writeln!(f, "- **Supplier**: {supplier}")?;
        }
        match self.status {
            ChecklistStatus::Draft => {
                writeln!(f, "- **Created**: {}", LocalDateTime(&self.created_at))?;
            }
            ChecklistStatus::InProgress => {
                writeln!(
                    f,
                    "- **Started**: {}",
                    OptionalDateTime(self.started_at.as_ref())
                )?;
                let band = self
                    .age_band(now)
                    .map(|band| format!(" ({band})"))
                    .unwrap_or_default();
                writeln!(f, "- **Elapsed**: {}{band}", Hms(self.elapsed_seconds(now)))?;
            }
            ChecklistStatus::Finalized => {
                writeln!(
                    f,
                    "- **Finished**: {}",
                    OptionalDateTime(self.finished_at.as_ref())
                )?;
                writeln!(f, "- **Duration**: {}", Hms(self.maintenance_seconds))?;
            }
        }
        writeln!(f)
    }
}

impl fmt::Display for Checklist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_checklist(f, None)
    }
}

impl<'a> fmt::Display for ChecklistDetail<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.checklist.fmt_checklist(f, Some(self.now))
    }
}

impl fmt::Display for AuditEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "- {} **{}**", LocalDateTime(&self.at), self.action)?;
        if let Some(actor) = &self.actor {
            write!(f, " by {actor}")?;
        }
        if let Some(seconds) = self.maintenance_seconds {
            write!(f, " ({})", Hms(seconds))?;
        }
        writeln!(f)
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Maintenance time report")?;
        writeln!(f)?;
        if self.rows.is_empty() {
            return writeln!(f, "No checklists match the filters.");
        }

        writeln!(f, "| Sequence | Plate | Supplier | Started | Finished | Hours |")?;
        writeln!(f, "|---|---|---|---|---|---:|")?;
        for row in &self.rows {
            writeln!(
                f,
                "| {} | {} | {} | {} | {} | {:.2} |",
                row.sequence, row.plate, row.supplier, row.started, row.finished, row.hours
            )?;
        }
        writeln!(f)?;
        writeln!(f, "- **Total hours**: {:.2}", self.total_hours)?;
        writeln!(f, "- **Average hours**: {:.2}", self.average_hours)?;

        for (title, groups) in [("By vehicle", &self.by_vehicle), ("By supplier", &self.by_supplier)] {
            writeln!(f, "\n## {title}")?;
            writeln!(f)?;
            for group in groups {
                writeln!(f, "- {}: {:.2} h", group.key, group.average_hours)?;
            }
        }
        Ok(())
    }
}
