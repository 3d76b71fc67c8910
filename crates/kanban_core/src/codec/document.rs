//! Board document export/import.
//!
//! # Responsibility
//! - Serialize the full board into the portable JSON document.
//! - Parse and validate documents coming from import files, the local store
//!   and the seed fetch.
//!
//! # Invariants
//! - Exported documents have exactly two top-level keys: `columns` and `cards`.
//! - No timestamp or history field is ever written.
//! - A document that fails validation never yields a partial board.
//! - Error messages name the failing record by index or key, never by value.

use crate::model::board::{Board, Card, Column, ValidationError};
use crate::model::ids::CardId;
use serde_json::error::Category;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Fixed filename offered for exported documents.
pub const EXPORT_FILE_NAME: &str = "kanban-board.json";

/// Export-side failure.
#[derive(Debug)]
pub enum CodecError {
    Serialize(serde_json::Error),
}

impl Display for CodecError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Serialize(err) => write!(f, "failed to serialize board document: {err}"),
        }
    }
}

impl Error for CodecError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Serialize(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for CodecError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value)
    }
}

/// Serializes `board` as a pretty-printed document.
pub fn export_document(board: &Board) -> Result<String, CodecError> {
    Ok(serde_json::to_string_pretty(board)?)
}

/// Parses and validates a board document.
///
/// # Errors
/// - `MalformedDocument` when `text` is not JSON.
/// - `InvalidShape` when `columns` is not an array or `cards` not an object.
/// - `InvalidRecord` when a column or card cannot be decoded.
/// - `BrokenReference`, `DuplicateId`, `EmptyId`, `KeyMismatch` on integrity
///   violations.
pub fn import_document(text: &str) -> Result<Board, ValidationError> {
    let value: Value = serde_json::from_str(text)
        .map_err(|err| ValidationError::MalformedDocument(err.to_string()))?;
    decode_board(value)
}

/// Validates an already parsed document value.
pub fn decode_board(value: Value) -> Result<Board, ValidationError> {
    let Value::Object(mut root) = value else {
        return Err(ValidationError::InvalidShape(
            "document root must be an object".to_string(),
        ));
    };

    let columns = match root.remove("columns") {
        Some(Value::Array(items)) => items,
        Some(other) => {
            return Err(ValidationError::InvalidShape(format!(
                "`columns` must be an array, got {}",
                json_kind(&other)
            )))
        }
        None => {
            return Err(ValidationError::InvalidShape(
                "missing `columns`".to_string(),
            ))
        }
    };

    let cards = match root.remove("cards") {
        Some(Value::Object(entries)) => entries,
        Some(other) => {
            return Err(ValidationError::InvalidShape(format!(
                "`cards` must be an object, got {}",
                json_kind(&other)
            )))
        }
        None => return Err(ValidationError::InvalidShape("missing `cards`".to_string())),
    };

    let board = Board {
        columns: decode_columns(columns)?,
        cards: decode_cards(cards)?,
    };
    board.check_integrity()?;
    Ok(board)
}

fn decode_columns(items: Vec<Value>) -> Result<Vec<Column>, ValidationError> {
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value::<Column>(item)
                .map_err(|err| record_error(format!("columns[{index}]"), &err))
        })
        .collect()
}

fn decode_cards(entries: Map<String, Value>) -> Result<BTreeMap<CardId, Card>, ValidationError> {
    entries
        .into_iter()
        .map(|(key, item)| match serde_json::from_value::<Card>(item) {
            Ok(card) => Ok((CardId::new(key), card)),
            Err(err) => Err(record_error(format!("cards[{key}]"), &err)),
        })
        .collect()
}

// serde_json messages quote the offending value, so only the category is kept.
fn record_error(location: String, err: &serde_json::Error) -> ValidationError {
    let reason = match err.classify() {
        Category::Data => "missing field or wrong value type",
        Category::Syntax | Category::Eof => "malformed record",
        Category::Io => "unreadable record",
    };
    ValidationError::InvalidRecord(format!("{location}: {reason}"))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
