//! Local board store contract and SQLite implementation.
//!
//! # Responsibility
//! - Hold the entire serialized board document under one key.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - The stored value is always a complete export-shaped document; partial
//!   writes are never made.
//! - The store does not interpret documents; decoding belongs to the codec.

use crate::db::DbError;
use log::debug;
use rusqlite::{params, Connection, OptionalExtension};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::rc::Rc;

/// Key under which the board document is stored.
pub const BOARD_STORAGE_KEY: &str = "kanban-board";

pub type StoreResult<T> = Result<T, StoreError>;

/// Local store read/write failure.
#[derive(Debug)]
pub enum StoreError {
    Db(DbError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "board store failure: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Durable single-document storage.
pub trait BoardStore {
    /// Returns the stored document, or `None` when nothing was saved yet.
    fn load_document(&self) -> StoreResult<Option<String>>;
    /// Replaces the stored document.
    fn save_document(&self, document: &str) -> StoreResult<()>;
    /// Removes the stored document. Clearing an empty store succeeds.
    fn clear(&self) -> StoreResult<()>;
}

impl<S: BoardStore + ?Sized> BoardStore for &S {
    fn load_document(&self) -> StoreResult<Option<String>> {
        (**self).load_document()
    }

    fn save_document(&self, document: &str) -> StoreResult<()> {
        (**self).save_document(document)
    }

    fn clear(&self) -> StoreResult<()> {
        (**self).clear()
    }
}

impl<S: BoardStore + ?Sized> BoardStore for Rc<S> {
    fn load_document(&self) -> StoreResult<Option<String>> {
        (**self).load_document()
    }

    fn save_document(&self, document: &str) -> StoreResult<()> {
        (**self).save_document(document)
    }

    fn clear(&self) -> StoreResult<()> {
        (**self).clear()
    }
}

/// SQLite-backed store over the `kv_store` table.
///
/// The connection must come from [`crate::db::open_db`] or
/// [`crate::db::open_db_in_memory`] so migrations are applied.
pub struct SqliteBoardStore {
    conn: Connection,
    key: String,
}

impl SqliteBoardStore {
    pub fn new(conn: Connection) -> Self {
        Self::with_key(conn, BOARD_STORAGE_KEY)
    }

    /// Uses a custom storage key, e.g. to keep several boards in one file.
    pub fn with_key(conn: Connection, key: impl Into<String>) -> Self {
        Self {
            conn,
            key: key.into(),
        }
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl BoardStore for SqliteBoardStore {
    fn load_document(&self) -> StoreResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1;",
                [self.key.as_str()],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn save_document(&self, document: &str) -> StoreResult<()> {
        self.conn.execute(
            "INSERT INTO kv_store (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value;",
            params![self.key.as_str(), document],
        )?;
        debug!(
            "event=store_save module=repo status=ok bytes={}",
            document.len()
        );
        Ok(())
    }

    fn clear(&self) -> StoreResult<()> {
        self.conn
            .execute("DELETE FROM kv_store WHERE key = ?1;", [self.key.as_str()])?;
        Ok(())
    }
}
