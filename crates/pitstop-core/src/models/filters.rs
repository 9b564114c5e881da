//! Filter types for querying checklists.

use jiff::Timestamp;

use super::{Checklist, ChecklistStatus};
use crate::params::{ListFinished, ListInProgress, ReportParams};

/// Ordering of query results, newest first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ChecklistOrder {
    #[default]
    CreatedDesc,
    StartedDesc,
    FinishedDesc,
}

/// Conditional query understood by every store adapter.
///
/// Bounds are inclusive. Text filters are case-insensitive substring matches.
#[derive(Debug, Clone, Default)]
pub struct ChecklistQuery {
    /// Accepted statuses; empty accepts any status
    pub statuses: Vec<ChecklistStatus>,
    pub plate_contains: Option<String>,
    pub supplier_contains: Option<String>,
    pub created_from: Option<Timestamp>,
    pub created_to: Option<Timestamp>,
    pub finished_from: Option<Timestamp>,
    pub finished_to: Option<Timestamp>,
    pub order: ChecklistOrder,
}

impl ChecklistQuery {
    /// Query for checklists still open for a vehicle (`Draft` or
    /// `InProgress`), matched on the exact normalized plate by the store.
    pub fn open_statuses() -> Vec<ChecklistStatus> {
        vec![ChecklistStatus::Draft, ChecklistStatus::InProgress]
    }

    /// Evaluate the query against a record.
    pub fn matches(&self, checklist: &Checklist) -> bool {
        if !self.statuses.is_empty() && !self.statuses.contains(&checklist.status) {
            return false;
        }
        if let Some(needle) = &self.plate_contains {
            if !contains_ignore_case(&checklist.vehicle_plate, needle) {
                return false;
            }
        }
        if let Some(needle) = &self.supplier_contains {
            match &checklist.supplier_id {
                Some(supplier) if contains_ignore_case(supplier, needle) => {}
                _ => return false,
            }
        }
        if !within(Some(checklist.created_at), self.created_from, self.created_to) {
            return false;
        }
        if (self.finished_from.is_some() || self.finished_to.is_some())
            && !within(checklist.finished_at, self.finished_from, self.finished_to)
        {
            return false;
        }
        true
    }

    /// Sort records in the query's order, newest first, ties by id.
    pub fn sort(&self, checklists: &mut [Checklist]) {
        checklists.sort_by(|a, b| {
            let primary = match self.order {
                ChecklistOrder::CreatedDesc => b.created_at.cmp(&a.created_at),
                ChecklistOrder::StartedDesc => b.started_at.cmp(&a.started_at),
                ChecklistOrder::FinishedDesc => b.finished_at.cmp(&a.finished_at),
            };
            primary.then_with(|| b.id.cmp(&a.id))
        });
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn within(value: Option<Timestamp>, from: Option<Timestamp>, to: Option<Timestamp>) -> bool {
    let Some(value) = value else {
        return from.is_none() && to.is_none();
    };
    from.map_or(true, |from| value >= from) && to.map_or(true, |to| value <= to)
}

impl From<&ListInProgress> for ChecklistQuery {
    /// The minimum age filter depends on the clock and is applied by the
    /// lifecycle manager after the query runs.
    fn from(params: &ListInProgress) -> Self {
        Self {
            statuses: vec![ChecklistStatus::InProgress],
            plate_contains: params.plate.clone(),
            supplier_contains: params.supplier.clone(),
            order: ChecklistOrder::StartedDesc,
            ..Default::default()
        }
    }
}

impl From<&ListFinished> for ChecklistQuery {
    fn from(params: &ListFinished) -> Self {
        Self {
            statuses: vec![ChecklistStatus::Finalized],
            plate_contains: params.plate.clone(),
            finished_from: params.from,
            finished_to: params.to,
            order: ChecklistOrder::FinishedDesc,
            ..Default::default()
        }
    }
}

impl From<&ReportParams> for ChecklistQuery {
    fn from(params: &ReportParams) -> Self {
        Self {
            statuses: params.status.into_iter().collect(),
            plate_contains: params.vehicle.clone(),
            supplier_contains: params.supplier.clone(),
            created_from: params.from,
            created_to: params.to,
            order: ChecklistOrder::CreatedDesc,
            ..Default::default()
        }
    }
}
