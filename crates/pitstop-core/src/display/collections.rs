//! Collection wrapper types for displaying groups of domain objects.

use std::{fmt, ops::Index};

use jiff::Timestamp;

use crate::models::{AuditEntry, Checklist};

/// Checklists listed with elapsed time measured at a single instant.
///
/// # Examples
///
/// ```rust
/// use jiff::Timestamp;
/// use pitstop_core::display::Checklists;
///
/// let now: Timestamp = "2024-01-01T00:00:00Z".parse().unwrap();
/// let empty = Checklists::new(vec![], now);
/// assert_eq!(empty.to_string(), "No checklists found.\n");
/// ```
pub struct Checklists {
    items: Vec<Checklist>,
    now: Timestamp,
}

impl Checklists {
    pub fn new(items: Vec<Checklist>, now: Timestamp) -> Self {
        Self { items, now }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Checklist> {
        self.items.iter()
    }
}

impl Index<usize> for Checklists {
    type Output = Checklist;

    fn index(&self, index: usize) -> &Self::Output {
        &self.items[index]
    }
}

impl<'a> IntoIterator for &'a Checklists {
    type Item = &'a Checklist;
    type IntoIter = std::slice::Iter<'a, Checklist>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl fmt::Display for Checklists {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.items.is_empty() {
            writeln!(f, "No checklists found.")
        } else {
            for checklist in &self.items {
                checklist.fmt_summary(f, self.now)?;
            }
            Ok(())
        }
    }
}

/// Audit trail of one checklist, oldest first.
pub struct AuditTrail(pub Vec<AuditEntry>);

impl fmt::Display for AuditTrail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No audited transitions.")
        } else {
            for entry in &self.0 {
                write!(f, "{entry}")?;
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ChecklistStatus, FuelGaugePhotos};

    fn ts(s: &str) -> Timestamp {
        s.parse().expect("valid timestamp")
    }

    fn in_progress(id: u64, plate: &str, started: &str) -> Checklist {
        Checklist {
            id,
            sequence_label: None,
            vehicle_plate: plate.to_string(),
            supplier_id: None,
            service: None,
            status: ChecklistStatus::InProgress,
            started_at: Some(ts(started)),
            finished_at: None,
            maintenance_seconds: 0,
            is_locked: false,
            notes: None,
            defect_items: vec![],
            media: vec![],
            budget_attachments: vec![],
            fuel_gauge_photos: FuelGaugePhotos::default(),
            created_at: ts(started),
        }
    }

    #[test]
    fn test_checklists_show_age_band() {
        let list = Checklists::new(
            vec![
                in_progress(1, "AAA0001", "2024-01-01T00:00:00Z"),
                in_progress(2, "BBB0002", "2024-01-04T06:00:00Z"),
            ],
            ts("2024-01-04T12:00:00Z"),
        );
        let output = list.to_string();
        assert!(output.contains("## 1 · AAA0001"));
        assert!(output.contains("- **Elapsed**: 84:00:00 (overdue)"));
        assert!(output.contains("- **Elapsed**: 06:00:00 (fresh)"));
        assert_eq!(list.len(), 2);
        assert_eq!(list[1].id, 2);
    }

    #[test]
    fn test_empty_audit_trail() {
        assert_eq!(AuditTrail(vec![]).to_string(), "No audited transitions.\n");
    }
}
