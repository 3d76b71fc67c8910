//! Application-level services.
//!
//! # Responsibility
//! - Own the canonical board for one session and gate access to it.
//! - Keep UI/CLI layers decoupled from storage and engine details.

pub mod board_session;
