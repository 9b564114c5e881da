//! Maintenance time report built from a set of checklists.

use std::io::Write;

use serde::Serialize;

use super::{timing::hours_rounded, Checklist};
use crate::error::{ChecklistError, Result};

const MISSING: &str = "-";
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";
const CSV_HEADER: [&str; 6] = ["sequence", "plate", "supplier", "started", "finished", "hours"];

/// One report line per checklist.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    pub sequence: String,
    pub plate: String,
    pub supplier: String,
    pub started: String,
    pub finished: String,
    pub hours: f64,
}

/// Average maintenance hours for one vehicle or supplier.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupAverage {
    pub key: String,
    pub average_hours: f64,
}

/// Aggregated maintenance time report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub rows: Vec<ReportRow>,
    pub total_hours: f64,
    pub average_hours: f64,
    pub by_vehicle: Vec<GroupAverage>,
    pub by_supplier: Vec<GroupAverage>,
}

impl Report {
    /// Build the report from checklists in the order they are given.
    pub fn from_checklists(checklists: &[Checklist]) -> Self {
        let rows = checklists
            .iter()
            .map(|c| ReportRow {
                sequence: c.display_code(),
                plate: non_empty_or_missing(Some(c.vehicle_plate.as_str())),
                supplier: non_empty_or_missing(c.supplier_id.as_deref()),
                started: c
                    .started_at
                    .map_or_else(|| MISSING.to_string(), |t| t.to_string()),
                finished: c
                    .finished_at
                    .map_or_else(|| MISSING.to_string(), |t| t.to_string()),
                hours: hours_rounded(c.maintenance_seconds as f64),
            })
            .collect();

        let total: u64 = checklists.iter().map(|c| c.maintenance_seconds).sum();
        let average = if checklists.is_empty() {
            0.0
        } else {
            total as f64 / checklists.len() as f64
        };

        Self {
            rows,
            total_hours: hours_rounded(total as f64),
            average_hours: hours_rounded(average),
            by_vehicle: group_average(checklists, |c| {
                non_empty_or_missing(Some(c.vehicle_plate.as_str()))
            }),
            by_supplier: group_average(checklists, |c| {
                non_empty_or_missing(c.supplier_id.as_deref())
            }),
        }
    }

    /// Write the rows as CSV for spreadsheet tools: UTF-8 BOM, CRLF line
    /// endings, one header line.
    pub fn write_csv<W: Write>(&self, mut writer: W) -> Result<()> {
        writer
            .write_all(UTF8_BOM)
            .map_err(|e| ChecklistError::Export { source: e.into() })?;
        let mut csv = csv::WriterBuilder::new()
            .has_headers(false)
            .terminator(csv::Terminator::CRLF)
            .from_writer(writer);
        csv.write_record(CSV_HEADER)?;
        for row in &self.rows {
            csv.serialize(row)?;
        }
        csv.flush()
            .map_err(|e| ChecklistError::Export { source: e.into() })?;
        Ok(())
    }
}

fn non_empty_or_missing(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.to_string(),
        _ => MISSING.to_string(),
    }
}

fn group_average<F>(checklists: &[Checklist], key: F) -> Vec<GroupAverage>
where
    F: Fn(&Checklist) -> String,
{
    let mut groups: Vec<(String, u64, u64)> = Vec::new();
    for checklist in checklists {
        let k = key(checklist);
        match groups.iter_mut().find(|(existing, _, _)| *existing == k) {
            Some((_, total, count)) => {
                *total += checklist.maintenance_seconds;
                *count += 1;
            }
            None => groups.push((k, checklist.maintenance_seconds, 1)),
        }
    }
    groups
        .into_iter()
        .map(|(key, total, count)| GroupAverage {
            key,
            average_hours: hours_rounded(total as f64 / count as f64),
        })
        .collect()
}
