//! Baseline schema application.
//!
//! # Responsibility
//! - Create the `students` table when a database is opened for the first
//!   time, atomically, and mirror the applied version to `user_version`.
//!
//! # Invariants
//! - `SCHEMA_VERSION` only ever grows; 0 means "never initialized".
//! - A database carrying a newer version than this build is rejected rather
//!   than partially understood.

use crate::db::{DbError, DbResult};
use rusqlite::Connection;

/// Schema version this build reads and writes.
pub const SCHEMA_VERSION: u32 = 1;

const BASELINE_SQL: &str = include_str!("students.sql");

/// Creates the baseline schema if the database has none yet.
///
/// # Errors
/// Returns `UnsupportedSchemaVersion` when the database reports a version
/// newer than [`SCHEMA_VERSION`].
pub fn ensure_schema(conn: &mut Connection) -> DbResult<()> {
    let db_version = current_user_version(conn)?;

    if db_version > SCHEMA_VERSION {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version,
            supported: SCHEMA_VERSION,
        });
    }

    if db_version == SCHEMA_VERSION {
        return Ok(());
    }

    let tx = conn.transaction()?;
    tx.execute_batch(BASELINE_SQL)?;
    tx.execute_batch(&format!("PRAGMA user_version = {SCHEMA_VERSION};"))?;
    tx.commit()?;

    Ok(())
}

fn current_user_version(conn: &Connection) -> DbResult<u32> {
    let version = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    Ok(version)
}
