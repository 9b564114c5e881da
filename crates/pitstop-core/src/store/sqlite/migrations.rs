//! Database schema initialization and migrations.

use rusqlite::Connection;

use crate::error::{DatabaseResultExt, StoreResult};

/// Initializes the database schema using the embedded SQL file.
pub(super) fn initialize_schema(connection: &Connection) -> StoreResult<()> {
    connection
        .execute("PRAGMA foreign_keys = ON", [])
        .db_context("Failed to enable foreign keys")?;

    let schema_sql = include_str!("../../../assets/schema.sql");
    connection
        .execute_batch(schema_sql)
        .db_context("Failed to initialize database schema")?;

    apply_migrations(connection)
}

/// Apply database migrations for existing databases
fn apply_migrations(connection: &Connection) -> StoreResult<()> {
    // Databases created before fuel gauge photos were tracked
    let has_fuel_column: bool = connection
        .query_row(
            "SELECT COUNT(*) FROM pragma_table_info('checklists') WHERE name = 'fuel_gauge_photos'",
            [],
            |row| row.get(0),
        )
        .map(|count: i64| count > 0)
        .db_context("Failed to inspect checklists table")?;

    if !has_fuel_column {
        connection
            .execute(
                "ALTER TABLE checklists ADD COLUMN fuel_gauge_photos TEXT NOT NULL DEFAULT '{}'",
                [],
            )
            .db_context("Failed to add fuel_gauge_photos column to checklists table")?;
    }

    Ok(())
}
