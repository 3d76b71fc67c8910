//! Core board engine for a single-user Kanban board.
//! This crate is the single source of truth for board invariants.

pub mod codec;
pub mod db;
pub mod engine;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod seed;
pub mod service;

pub use codec::document::{export_document, import_document, CodecError, EXPORT_FILE_NAME};
pub use engine::mutation::{
    add_card, add_column, delete_card, delete_column, rename_column, update_card,
};
pub use engine::reorder::{move_card, resolve_drop_target, DropTarget};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::board::{
    Board, Card, ChecklistItem, Column, ValidationError, DEFAULT_COLUMN_TITLE,
};
pub use model::ids::{
    CardId, ChecklistItemId, ColumnId, IdGenerator, SequentialIdGenerator, UuidIdGenerator,
};
pub use repo::board_store::{
    BoardStore, SqliteBoardStore, StoreError, StoreResult, BOARD_STORAGE_KEY,
};
pub use search::projector::{card_matches, project};
pub use seed::{FileSeedSource, NoSeedSource, SeedError, SeedSource, DEFAULT_SEED_PATH};
pub use service::board_session::{
    BoardObserver, BoardOrigin, BoardSession, PersistOnChange, SessionError, SessionResult,
    SessionState, StartupStep,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
