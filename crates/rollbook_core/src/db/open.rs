//! Connection bootstrap for file and in-memory databases.
//!
//! # Responsibility
//! - Open SQLite connections and configure them for single-user console use.
//! - Apply the baseline schema before returning a usable connection.
//!
//! # Invariants
//! - Returned connections have the `students` table ready.
//! - Every open attempt emits one `db_open` event with its outcome.

use super::schema::ensure_schema;
use super::DbResult;
use log::{error, info};
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Opens (and creates if needed) a database file and prepares it for use.
///
/// # Side effects
/// - Creates the file and applies the baseline schema when absent.
/// - Emits `db_open` logging events with duration and status.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    let started_at = Instant::now();
    info!("event=db_open module=db status=start mode=file");

    let conn = Connection::open(path).map_err(|err| {
        log_open_failure("file", started_at, "db_open_failed", &err);
        err
    })?;
    finish_open("file", started_at, conn)
}

/// Opens a fresh in-memory database and prepares it for use.
///
/// The schema exists only for this connection's lifetime, which makes this
/// the natural fixture for repository tests.
pub fn open_db_in_memory() -> DbResult<Connection> {
    let started_at = Instant::now();
    info!("event=db_open module=db status=start mode=memory");

    let conn = Connection::open_in_memory().map_err(|err| {
        log_open_failure("memory", started_at, "db_open_failed", &err);
        err
    })?;
    finish_open("memory", started_at, conn)
}

fn finish_open(mode: &str, started_at: Instant, mut conn: Connection) -> DbResult<Connection> {
    match bootstrap_connection(&mut conn) {
        Ok(()) => {
            info!(
                "event=db_open module=db status=ok mode={mode} duration_ms={}",
                started_at.elapsed().as_millis()
            );
            Ok(conn)
        }
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={mode} duration_ms={} error_code=db_bootstrap_failed error={err}",
                started_at.elapsed().as_millis()
            );
            Err(err)
        }
    }
}

fn bootstrap_connection(conn: &mut Connection) -> DbResult<()> {
    conn.busy_timeout(BUSY_TIMEOUT)?;
    ensure_schema(conn)?;
    Ok(())
}

fn log_open_failure(mode: &str, started_at: Instant, code: &str, err: &rusqlite::Error) {
    error!(
        "event=db_open module=db status=error mode={mode} duration_ms={} error_code={code} error={err}",
        started_at.elapsed().as_millis()
    );
}
