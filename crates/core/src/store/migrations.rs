//! Favicon store schema versions.
//!
//! `_migrations` holds one row per applied version. On open, every version
//! above the recorded maximum is applied in its own transaction, so a failing
//! script leaves neither its tables nor its version row behind.

use super::Error;
use tokio_rusqlite::{Connection, params, rusqlite};

/// Schema scripts keyed by version, ascending.
const MIGRATIONS: &[(i64, &str)] = &[(1, include_str!("../../migrations/001_favicons.sql"))];

/// Newest schema version this build knows about.
pub const LATEST_VERSION: i64 = MIGRATIONS[MIGRATIONS.len() - 1].0;

fn applied_version(conn: &rusqlite::Connection) -> Result<i64, Error> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS _migrations (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL
        )",
        [],
    )?;
    Ok(conn.query_row("SELECT COALESCE(MAX(version), 0) FROM _migrations", [], |row| row.get(0))?)
}

/// Bring the schema up to [`LATEST_VERSION`].
///
/// # Errors
///
/// `Error::MigrationFailed` names the version whose script did not apply.
pub async fn run(conn: &Connection) -> Result<(), Error> {
    conn.call(|conn| -> Result<(), Error> {
        let current = applied_version(conn)?;

        for &(version, sql) in MIGRATIONS.iter().filter(|(version, _)| *version > current) {
            let tx = conn.transaction()?;
            tx.execute_batch(sql)
                .map_err(|e| Error::MigrationFailed(format!("version {version}: {e}")))?;
            tx.execute(
                "INSERT INTO _migrations (version, applied_at) VALUES (?1, ?2)",
                params![version, chrono::Utc::now().to_rfc3339()],
            )?;
            tx.commit()?;
            tracing::debug!(version, "applied favicon schema version");
        }

        Ok(())
    })
    .await
    .map_err(Error::from)
}

/// Highest schema version recorded in `_migrations` (0 for a fresh file).
pub async fn schema_version(conn: &Connection) -> Result<i64, Error> {
    conn.call(|conn| -> Result<i64, Error> { applied_version(conn) })
        .await
        .map_err(Error::from)
}
