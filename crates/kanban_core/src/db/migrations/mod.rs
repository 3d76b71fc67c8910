//! SQLite migration registry and executor.
//!
//! # Responsibility
//! - Register board-store schema migrations in strictly increasing order.
//! - Apply pending migrations in one transaction.
//!
//! # Invariants
//! - `version` values must remain monotonic.
//! - Applied migration version is mirrored to `PRAGMA user_version`.
//!
//! # See also
//! - `crate::repo::board_store` for the tables these migrations create.

use crate::db::{DbError, DbResult};
use log::info;
use rusqlite::Connection;

#[derive(Debug, Clone, Copy)]
struct Migration {
    version: u32,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    sql: include_str!("0001_init.sql"),
}];

/// Returns the latest migration version known by this binary.
pub fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |migration| migration.version)
}

/// Brings the connection's schema up to [`latest_version`].
///
/// # Errors
/// - `DbError::UnsupportedSchemaVersion` when the file is newer than this
///   binary; nothing is modified in that case.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let from = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    let latest = latest_version();

    if from > latest {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: from,
            latest_supported: latest,
        });
    }
    if from == latest {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for migration in MIGRATIONS.iter().filter(|m| m.version > from) {
        tx.execute_batch(migration.sql)?;
        tx.pragma_update(None, "user_version", migration.version)?;
    }
    tx.commit()?;

    info!("event=db_migrate module=db status=ok from={from} to={latest}");
    Ok(())
}
