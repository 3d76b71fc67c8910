//! Board state engine.
//!
//! # Responsibility
//! - Pure, deterministic transformations from one board snapshot to the next.
//!
//! # Invariants
//! - No function here performs I/O or touches persistence.

pub mod mutation;
pub mod reorder;
