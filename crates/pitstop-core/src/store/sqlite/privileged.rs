//! Atomic lifecycle transactions, the audit trail and the sequence counter.

use jiff::Timestamp;
use rusqlite::{params, types::Type, Connection, OptionalExtension};

use super::checklist_queries::to_micros;
use crate::{
    error::{DatabaseResultExt, StoreError, StoreResult},
    models::{
        seconds_between, AuditAction, AuditEntry, ChecklistStatus, FinalizeReceipt,
        FinalizeRequest, ReopenRequest,
    },
    store::format_sequence_label,
};

const SELECT_LIFECYCLE_SQL: &str =
    "SELECT status, started_at, maintenance_seconds FROM checklists WHERE id = ?1";
const FINALIZE_SQL: &str = "UPDATE checklists SET status = 'finalized', started_at = ?1, finished_at = ?2, maintenance_seconds = ?3, is_locked = 1 WHERE id = ?4";
const REOPEN_SQL: &str = "UPDATE checklists SET is_locked = 0, status = 'in_progress', finished_at = NULL, maintenance_seconds = 0 WHERE id = ?1";
const INSERT_AUDIT_SQL: &str = "INSERT INTO checklist_audit (checklist_id, action, actor, at, maintenance_seconds) VALUES (?1, ?2, ?3, ?4, ?5)";
const SELECT_AUDIT_SQL: &str = "SELECT checklist_id, action, actor, at, maintenance_seconds FROM checklist_audit WHERE checklist_id = ?1 ORDER BY at, id";
const NEXT_SEQUENCE_SQL: &str = "INSERT INTO sequences (name, value) VALUES ('checklist', 1) ON CONFLICT(name) DO UPDATE SET value = value + 1 RETURNING value";

struct LifecycleRow {
    status: ChecklistStatus,
    started_at: Option<Timestamp>,
    maintenance_seconds: u64,
}

fn read_lifecycle(connection: &Connection, id: u64) -> StoreResult<LifecycleRow> {
    let row = connection
        .query_row(SELECT_LIFECYCLE_SQL, params![id as i64], |row| {
            let status: String = row.get(0)?;
            let started: Option<i64> = row.get(1)?;
            let seconds: i64 = row.get(2)?;
            Ok((status, started, seconds))
        })
        .optional()
        .db_context("Failed to read checklist")?;
    let Some((status, started, seconds)) = row else {
        return Err(StoreError::not_found(format!("checklist {id} does not exist")));
    };

    let status = status
        .parse::<ChecklistStatus>()
        .map_err(|e| StoreError::backend(format!("checklist {id}: {e}")))?;
    let started_at = started
        .map(Timestamp::from_microsecond)
        .transpose()
        .map_err(|e| StoreError::backend(format!("checklist {id}: invalid started_at")).with_source(e))?;

    Ok(LifecycleRow {
        status,
        started_at,
        maintenance_seconds: seconds.max(0) as u64,
    })
}

fn record_audit(
    connection: &Connection,
    checklist_id: u64,
    action: AuditAction,
    actor: Option<&str>,
    at: Timestamp,
    maintenance_seconds: u64,
) -> StoreResult<()> {
    connection
        .execute(
            INSERT_AUDIT_SQL,
            params![
                checklist_id as i64,
                action.as_str(),
                actor,
                to_micros(at),
                maintenance_seconds as i64,
            ],
        )
        .db_context("Failed to record audit entry")?;
    Ok(())
}

/// Finalize in one transaction: duration, lock and audit entry commit together.
pub(super) fn finalize(
    connection: &mut Connection,
    request: &FinalizeRequest,
) -> StoreResult<FinalizeReceipt> {
    let tx = connection
        .transaction()
        .db_context("Failed to begin transaction")?;

    let current = read_lifecycle(&tx, request.id)?;
    if current.status == ChecklistStatus::Finalized {
        return Err(StoreError::conflict(format!(
            "checklist {} is already finalized",
            request.id
        )));
    }

    let started = current.started_at.unwrap_or(request.at);
    let seconds = seconds_between(started, request.at);
    tx.execute(
        FINALIZE_SQL,
        params![
            to_micros(started),
            to_micros(request.at),
            seconds as i64,
            request.id as i64
        ],
    )
    .db_context("Failed to finalize checklist")?;
    record_audit(
        &tx,
        request.id,
        AuditAction::Finalized,
        request.actor.as_deref(),
        request.at,
        seconds,
    )?;

    tx.commit().db_context("Failed to commit transaction")?;
    Ok(FinalizeReceipt {
        success: true,
        maintenance_seconds: seconds,
    })
}

/// Reopen in one transaction. Fails with `Conflict` when the checklist is not
/// finalized or another checklist is already open for the vehicle.
pub(super) fn reopen(connection: &mut Connection, request: &ReopenRequest) -> StoreResult<()> {
    let tx = connection
        .transaction()
        .db_context("Failed to begin transaction")?;

    let current = read_lifecycle(&tx, request.id)?;
    if current.status != ChecklistStatus::Finalized {
        return Err(StoreError::conflict(format!(
            "checklist {} is not finalized",
            request.id
        )));
    }

    tx.execute(REOPEN_SQL, params![request.id as i64])
        .db_context("Failed to reopen checklist")?;
    record_audit(
        &tx,
        request.id,
        AuditAction::Reopened,
        request.actor.as_deref(),
        request.at,
        current.maintenance_seconds,
    )?;

    tx.commit().db_context("Failed to commit transaction")?;
    Ok(())
}

pub(super) fn audit_trail(connection: &Connection, id: u64) -> StoreResult<Vec<AuditEntry>> {
    let mut stmt = connection
        .prepare(SELECT_AUDIT_SQL)
        .db_context("Failed to prepare audit query")?;
    let rows = stmt
        .query_map(params![id as i64], |row| {
            let action: String = row.get(1)?;
            let action = action.parse::<AuditAction>().map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(1, Type::Text, e.into())
            })?;
            let at = Timestamp::from_microsecond(row.get(3)?).map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(3, Type::Integer, Box::new(e))
            })?;
            Ok(AuditEntry {
                checklist_id: row.get::<_, i64>(0)? as u64,
                action,
                actor: row.get(2)?,
                at,
                maintenance_seconds: row
                    .get::<_, Option<i64>>(4)?
                    .map(|seconds| seconds.max(0) as u64),
            })
        })
        .db_context("Failed to query audit trail")?;
    rows.collect::<rusqlite::Result<Vec<_>>>()
        .db_context("Failed to read audit trail")
}

/// Reserve the next value of the checklist counter in a single statement.
pub(super) fn next_sequence_label(connection: &Connection) -> StoreResult<String> {
    let value: i64 = connection
        .query_row(NEXT_SEQUENCE_SQL, [], |row| row.get(0))
        .db_context("Failed to advance checklist sequence")?;
    Ok(format_sequence_label(value.max(0) as u64))
}
