//! Search entry points.
//!
//! # Responsibility
//! - Expose read-only filtered projections of the board.
//! - Keep search result shaping inside core.

pub mod projector;
