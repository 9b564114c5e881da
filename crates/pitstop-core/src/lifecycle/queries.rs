//! Read models over stored checklists.

use jiff::Timestamp;

use crate::{
    clock::Clock,
    error::{ChecklistError, Result},
    models::{Checklist, ChecklistQuery, Report},
    params::{ListFinished, ListInProgress, ReportParams},
    store::{ChecklistStore, PrivilegedOps},
};

use super::LifecycleManager;

fn check_range<T: PartialOrd>(from: Option<T>, to: Option<T>) -> Result<()> {
    match (from, to) {
        (Some(from), Some(to)) if from > to => Err(ChecklistError::invalid_input("from")
            .with_reason("Start of range must not be after its end")),
        _ => Ok(()),
    }
}

impl<S, P, C> LifecycleManager<S, P, C>
where
    S: ChecklistStore,
    P: PrivilegedOps,
    C: Clock,
{
    /// In-progress checklists, most recently started first.
    ///
    /// With `min_hours` set, only checklists whose live elapsed time reaches
    /// the threshold are kept; records without a start time are dropped.
    pub fn list_in_progress(&self, params: &ListInProgress) -> Result<Vec<Checklist>> {
        self.list_in_progress_at(params, self.clock.now())
    }

    /// Like [`list_in_progress`](Self::list_in_progress), measuring elapsed
    /// time against `now` instead of reading the clock.
    pub fn list_in_progress_at(
        &self,
        params: &ListInProgress,
        now: Timestamp,
    ) -> Result<Vec<Checklist>> {
        let min_seconds = params.min_seconds()?;
        let mut checklists = self.store.list(&ChecklistQuery::from(params))?;

        if let Some(min_seconds) = min_seconds {
            checklists.retain(|c| c.started_at.is_some() && c.elapsed_seconds(now) >= min_seconds);
        }
        Ok(checklists)
    }

    /// Finalized checklists, most recently finished first.
    pub fn list_finished(&self, params: &ListFinished) -> Result<Vec<Checklist>> {
        check_range(params.from, params.to)?;
        Ok(self.store.list(&ChecklistQuery::from(params))?)
    }

    /// Maintenance time report over checklists created in the given range.
    pub fn report(&self, params: &ReportParams) -> Result<Report> {
        check_range(params.from, params.to)?;
        let checklists = self.store.list(&ChecklistQuery::from(params))?;
        Ok(Report::from_checklists(&checklists))
    }
}
