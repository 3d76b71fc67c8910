//! Portable board document format.
//!
//! # See also
//! - `crate::repo::board_store` which persists the same document shape.

pub mod document;
