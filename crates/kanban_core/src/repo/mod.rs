//! Repository layer: durable local storage for the board document.
//!
//! # Responsibility
//! - Define the storage contract the session persists through.
//! - Isolate SQLite query details from session orchestration.
//!
//! # Invariants
//! - Storage failures are reported as `StoreError`, never panics.

pub mod board_store;
