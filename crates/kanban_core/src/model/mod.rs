//! Board domain model.
//!
//! # Responsibility
//! - Define canonical data structures used by the board engine.
//! - Keep one typed identifier per entity kind.
//!
//! # Invariants
//! - A card's content is owned by `Board::cards`; columns only reference it.
//! - Deletion is a hard delete; no tombstones or timestamps are kept.

pub mod board;
pub mod ids;
