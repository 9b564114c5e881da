//! Checklist CRUD operations and queries.

use jiff::Timestamp;
use rusqlite::{params, params_from_iter, types::Type, Connection, OptionalExtension, ToSql};
use serde::{de::DeserializeOwned, Serialize};

use crate::{
    error::{DatabaseResultExt, StoreError, StoreResult},
    models::{
        Checklist, ChecklistOrder, ChecklistPatch, ChecklistQuery, ChecklistStatus,
        NewChecklistRecord,
    },
};

const CHECKLIST_COLUMNS: &str = "id, sequence_label, vehicle_plate, supplier_id, service, status, started_at, finished_at, maintenance_seconds, is_locked, notes, defect_items, media, budget_attachments, fuel_gauge_photos, created_at";
const INSERT_CHECKLIST_SQL: &str = "INSERT INTO checklists (sequence_label, vehicle_plate, supplier_id, service, status, notes, defect_items, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)";
const SELECT_LOCK_SQL: &str = "SELECT is_locked FROM checklists WHERE id = ?1";
const DELETE_AUDIT_SQL: &str = "DELETE FROM checklist_audit WHERE checklist_id = ?1";
const DELETE_CHECKLIST_SQL: &str = "DELETE FROM checklists WHERE id = ?1";

/// Convert a timestamp to its stored representation.
pub(super) fn to_micros(at: Timestamp) -> i64 {
    at.as_microsecond()
}

fn timestamp_column(row: &rusqlite::Row, index: usize) -> rusqlite::Result<Option<Timestamp>> {
    row.get::<_, Option<i64>>(index)?
        .map(|micros| {
            Timestamp::from_microsecond(micros).map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(index, Type::Integer, Box::new(e))
            })
        })
        .transpose()
}

fn json_column<T: DeserializeOwned>(row: &rusqlite::Row, index: usize) -> rusqlite::Result<T> {
    let raw: String = row.get(index)?;
    serde_json::from_str(&raw)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(index, Type::Text, Box::new(e)))
}

fn to_json<T: Serialize>(value: &T, field: &str) -> StoreResult<String> {
    serde_json::to_string(value)
        .map_err(|e| StoreError::backend(format!("Failed to serialize {field}")).with_source(e))
}

/// Construct a Checklist from a row selected with `CHECKLIST_COLUMNS`.
fn build_checklist_from_row(row: &rusqlite::Row) -> rusqlite::Result<Checklist> {
    let status_str: String = row.get(5)?;
    let status = status_str.parse::<ChecklistStatus>().map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            5,
            Type::Text,
            format!("Invalid status: {status_str}").into(),
        )
    })?;

    Ok(Checklist {
        id: row.get::<_, i64>(0)? as u64,
        sequence_label: row.get(1)?,
        vehicle_plate: row.get(2)?,
        supplier_id: row.get(3)?,
        service: row.get(4)?,
        status,
        started_at: timestamp_column(row, 6)?,
        finished_at: timestamp_column(row, 7)?,
        maintenance_seconds: row.get::<_, i64>(8)?.max(0) as u64,
        is_locked: row.get(9)?,
        notes: row.get(10)?,
        defect_items: json_column(row, 11)?,
        media: json_column(row, 12)?,
        budget_attachments: json_column(row, 13)?,
        fuel_gauge_photos: json_column(row, 14)?,
        created_at: timestamp_column(row, 15)?.ok_or_else(|| {
            rusqlite::Error::FromSqlConversionFailure(
                15,
                Type::Null,
                "created_at is missing".into(),
            )
        })?,
    })
}

pub(super) fn get(connection: &Connection, id: u64) -> StoreResult<Option<Checklist>> {
    connection
        .query_row(
            &format!("SELECT {CHECKLIST_COLUMNS} FROM checklists WHERE id = ?1"),
            params![id as i64],
            build_checklist_from_row,
        )
        .optional()
        .db_context("Failed to fetch checklist")
}

pub(super) fn insert(connection: &Connection, record: NewChecklistRecord) -> StoreResult<Checklist> {
    let defect_items = to_json(&record.defect_items, "defect_items")?;
    connection
        .execute(
            INSERT_CHECKLIST_SQL,
            params![
                record.sequence_label,
                record.vehicle_plate,
                record.supplier_id,
                record.service,
                "draft",
                record.notes,
                defect_items,
                to_micros(record.created_at),
            ],
        )
        .db_context("Failed to insert checklist")?;

    let id = connection.last_insert_rowid() as u64;
    Ok(record.into_checklist(id))
}

/// Apply a patch in one transaction. Locked rows refuse every write; the
/// schema trigger enforces the same rule for writers bypassing this path.
pub(super) fn update(connection: &mut Connection, id: u64, patch: &ChecklistPatch) -> StoreResult<()> {
    let tx = connection
        .transaction()
        .db_context("Failed to begin transaction")?;

    let locked: Option<bool> = tx
        .query_row(SELECT_LOCK_SQL, params![id as i64], |row| row.get(0))
        .optional()
        .db_context("Failed to read checklist lock")?;
    match locked {
        None => return Err(StoreError::not_found(format!("checklist {id} does not exist"))),
        Some(true) => {
            return Err(StoreError::permission_denied(format!(
                "checklist {id} is locked"
            )))
        }
        Some(false) => {}
    }

    let mut assignments: Vec<&str> = Vec::new();
    let mut values: Vec<Box<dyn ToSql>> = Vec::new();

    if let Some(status) = patch.status {
        assignments.push("status = ?");
        values.push(Box::new(status.as_str()));
    }
    if let Some(started_at) = patch.started_at {
        assignments.push("started_at = ?");
        values.push(Box::new(started_at.map(to_micros)));
    }
    if let Some(finished_at) = patch.finished_at {
        assignments.push("finished_at = ?");
        values.push(Box::new(finished_at.map(to_micros)));
    }
    if let Some(seconds) = patch.maintenance_seconds {
        assignments.push("maintenance_seconds = ?");
        values.push(Box::new(seconds as i64));
    }
    if let Some(locked) = patch.is_locked {
        assignments.push("is_locked = ?");
        values.push(Box::new(locked));
    }
    if let Some(notes) = &patch.notes {
        assignments.push("notes = ?");
        values.push(Box::new(notes.clone()));
    }
    if let Some(items) = &patch.defect_items {
        assignments.push("defect_items = ?");
        values.push(Box::new(to_json(items, "defect_items")?));
    }
    if let Some(media) = &patch.media {
        assignments.push("media = ?");
        values.push(Box::new(to_json(media, "media")?));
    }
    if let Some(attachments) = &patch.budget_attachments {
        assignments.push("budget_attachments = ?");
        values.push(Box::new(to_json(attachments, "budget_attachments")?));
    }
    if let Some(photos) = &patch.fuel_gauge_photos {
        assignments.push("fuel_gauge_photos = ?");
        values.push(Box::new(to_json(photos, "fuel_gauge_photos")?));
    }

    if !assignments.is_empty() {
        values.push(Box::new(id as i64));
        let sql = format!(
            "UPDATE checklists SET {} WHERE id = ?",
            assignments.join(", ")
        );
        tx.execute(&sql, params_from_iter(values.iter()))
            .db_context("Failed to update checklist")?;
    }

    tx.commit().db_context("Failed to commit transaction")?;
    Ok(())
}

pub(super) fn delete(connection: &mut Connection, id: u64) -> StoreResult<()> {
    let tx = connection
        .transaction()
        .db_context("Failed to begin transaction")?;

    tx.execute(DELETE_AUDIT_SQL, params![id as i64])
        .db_context("Failed to delete checklist audit trail")?;
    let rows = tx
        .execute(DELETE_CHECKLIST_SQL, params![id as i64])
        .db_context("Failed to delete checklist")?;
    if rows == 0 {
        return Err(StoreError::not_found(format!("checklist {id} does not exist")));
    }

    tx.commit().db_context("Failed to commit transaction")?;
    Ok(())
}

pub(super) fn find_open_by_plate(connection: &Connection, plate: &str) -> StoreResult<Vec<Checklist>> {
    let mut stmt = connection
        .prepare(&format!(
            "SELECT {CHECKLIST_COLUMNS} FROM checklists WHERE vehicle_plate = ?1 AND status IN ('draft', 'in_progress') ORDER BY id"
        ))
        .db_context("Failed to prepare open checklist query")?;
    let rows = stmt
        .query_map(params![plate], build_checklist_from_row)
        .db_context("Failed to query open checklists")?;
    rows.collect::<rusqlite::Result<Vec<_>>>()
        .db_context("Failed to read open checklists")
}

pub(super) fn list(connection: &Connection, query: &ChecklistQuery) -> StoreResult<Vec<Checklist>> {
    let mut conditions: Vec<String> = Vec::new();
    let mut values: Vec<Box<dyn ToSql>> = Vec::new();

    if !query.statuses.is_empty() {
        let placeholders = vec!["?"; query.statuses.len()].join(", ");
        conditions.push(format!("status IN ({placeholders})"));
        for status in &query.statuses {
            values.push(Box::new(status.as_str()));
        }
    }
    if let Some(plate) = &query.plate_contains {
        conditions.push("instr(upper(vehicle_plate), upper(?)) > 0".to_string());
        values.push(Box::new(plate.clone()));
    }
    if let Some(supplier) = &query.supplier_contains {
        conditions
            .push("supplier_id IS NOT NULL AND instr(upper(supplier_id), upper(?)) > 0".to_string());
        values.push(Box::new(supplier.clone()));
    }
    let bounds = [
        ("created_at >= ?", query.created_from),
        ("created_at <= ?", query.created_to),
        ("finished_at >= ?", query.finished_from),
        ("finished_at <= ?", query.finished_to),
    ];
    for (condition, bound) in bounds {
        if let Some(at) = bound {
            conditions.push(condition.to_string());
            values.push(Box::new(to_micros(at)));
        }
    }

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", conditions.join(" AND "))
    };
    let order_clause = match query.order {
        ChecklistOrder::CreatedDesc => "created_at DESC, id DESC",
        ChecklistOrder::StartedDesc => "started_at DESC, id DESC",
        ChecklistOrder::FinishedDesc => "finished_at DESC, id DESC",
    };
    let sql = format!(
        "SELECT {CHECKLIST_COLUMNS} FROM checklists{where_clause} ORDER BY {order_clause}"
    );

    let mut stmt = connection
        .prepare(&sql)
        .db_context("Failed to prepare checklist query")?;
    let rows = stmt
        .query_map(params_from_iter(values.iter()), build_checklist_from_row)
        .db_context("Failed to query checklists")?;
    rows.collect::<rusqlite::Result<Vec<_>>>()
        .db_context("Failed to read checklists")
}
