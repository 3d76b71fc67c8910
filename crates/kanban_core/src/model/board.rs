//! Board aggregate and its records.
//!
//! # Responsibility
//! - Define the canonical board shape: ordered columns of card references
//!   plus a flat card map that owns card content.
//! - Provide read helpers and integrity checks over that shape.
//!
//! # Invariants
//! - Every ID in any `Column::card_ids` has an entry in `Board::cards`.
//! - A card ID appears in at most one column, at most once.
//! - Column IDs are unique within a board.
//! - Checklist item IDs are unique within their card.
//! - No column, card or checklist item has an empty ID.
//!
//! # See also
//! - `crate::engine` for the operations that preserve these invariants.

use crate::model::ids::{CardId, ChecklistItemId, ColumnId, IdGenerator};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Title used by `add_column` when the caller does not supply one.
pub const DEFAULT_COLUMN_TITLE: &str = "New Column";

/// Validation failures for user-initiated board input.
///
/// Raised for card creation with a blank title and for import/seed documents
/// that do not describe a well-formed board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Card title is empty after trimming whitespace.
    EmptyCardTitle,
    /// Document text is not valid JSON.
    MalformedDocument(String),
    /// Top-level document shape is wrong (`columns` array + `cards` object).
    InvalidShape(String),
    /// A column or card record cannot be decoded.
    InvalidRecord(String),
    /// A column references a card missing from `cards`.
    BrokenReference { column: ColumnId, card: CardId },
    /// The same ID is used twice where it must be unique.
    DuplicateId(String),
    /// A record of the named kind has an empty ID.
    EmptyId(&'static str),
    /// A `cards` map key differs from the `id` of the record it holds.
    KeyMismatch { key: CardId, id: CardId },
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyCardTitle => write!(f, "card title must not be empty"),
            Self::MalformedDocument(message) => write!(f, "malformed board document: {message}"),
            Self::InvalidShape(message) => write!(f, "invalid board document shape: {message}"),
            Self::InvalidRecord(message) => write!(f, "invalid board record: {message}"),
            Self::BrokenReference { column, card } => {
                write!(f, "column `{column}` references unknown card `{card}`")
            }
            Self::DuplicateId(id) => write!(f, "duplicate id `{id}`"),
            Self::EmptyId(kind) => write!(f, "{kind} id must not be empty"),
            Self::KeyMismatch { key, id } => {
                write!(f, "card stored under key `{key}` has id `{id}`")
            }
        }
    }
}

impl Error for ValidationError {}

/// One sub-task on a card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub id: ChecklistItemId,
    pub text: String,
    #[serde(default)]
    pub done: bool,
}

impl ChecklistItem {
    /// Creates an unchecked item with a fresh ID.
    pub fn new(text: impl Into<String>, ids: &mut impl IdGenerator) -> Self {
        Self {
            id: ids.checklist_item_id(),
            text: text.into(),
            done: false,
        }
    }
}

/// Titled work item. Content lives only here; columns hold references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Display order is kept; duplicates are tolerated.
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub checklist: Vec<ChecklistItem>,
}

impl Card {
    /// Creates a card with no description, labels or checklist.
    pub fn new(id: CardId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            description: None,
            labels: Vec::new(),
            checklist: Vec::new(),
        }
    }

    /// Returns `(done, total)` checklist counts.
    pub fn checklist_progress(&self) -> (usize, usize) {
        let done = self.checklist.iter().filter(|item| item.done).count();
        (done, self.checklist.len())
    }
}

/// Named, ordered bucket of card references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub id: ColumnId,
    pub title: String,
    #[serde(rename = "cardIds", default)]
    pub card_ids: Vec<CardId>,
}

impl Column {
    pub fn new(id: ColumnId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            card_ids: Vec::new(),
        }
    }

    pub fn position_of(&self, card_id: &CardId) -> Option<usize> {
        self.card_ids.iter().position(|id| id == card_id)
    }
}

/// Root aggregate: the full document of columns and cards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub columns: Vec<Column>,
    pub cards: BTreeMap<CardId, Card>,
}

impl Board {
    pub fn find_column(&self, column_id: &ColumnId) -> Option<&Column> {
        self.columns.iter().find(|column| &column.id == column_id)
    }

    pub fn card(&self, card_id: &CardId) -> Option<&Card> {
        self.cards.get(card_id)
    }

    /// Returns the column that currently references `card_id`.
    pub fn column_of(&self, card_id: &CardId) -> Option<&Column> {
        self.columns
            .iter()
            .find(|column| column.card_ids.contains(card_id))
    }

    /// Cards of one column in display order.
    ///
    /// References without a record are skipped.
    pub fn cards_in(&self, column_id: &ColumnId) -> Vec<&Card> {
        self.find_column(column_id)
            .map(|column| {
                column
                    .card_ids
                    .iter()
                    .filter_map(|id| self.cards.get(id))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Verifies the reference invariants of this board.
    ///
    /// Cards present in `cards` but referenced by no column are tolerated.
    pub fn check_integrity(&self) -> Result<(), ValidationError> {
        let mut column_ids = HashSet::new();
        let mut referenced = HashSet::new();

        for column in &self.columns {
            if column.id.as_str().is_empty() {
                return Err(ValidationError::EmptyId("column"));
            }
            if !column_ids.insert(&column.id) {
                return Err(ValidationError::DuplicateId(column.id.to_string()));
            }
            for card_id in &column.card_ids {
                if !self.cards.contains_key(card_id) {
                    return Err(ValidationError::BrokenReference {
                        column: column.id.clone(),
                        card: card_id.clone(),
                    });
                }
                if !referenced.insert(card_id) {
                    return Err(ValidationError::DuplicateId(card_id.to_string()));
                }
            }
        }

        for (key, card) in &self.cards {
            if key.as_str().is_empty() || card.id.as_str().is_empty() {
                return Err(ValidationError::EmptyId("card"));
            }
            if key != &card.id {
                return Err(ValidationError::KeyMismatch {
                    key: key.clone(),
                    id: card.id.clone(),
                });
            }

            let mut item_ids = HashSet::new();
            for item in &card.checklist {
                if item.id.as_str().is_empty() {
                    return Err(ValidationError::EmptyId("checklist item"));
                }
                if !item_ids.insert(&item.id) {
                    return Err(ValidationError::DuplicateId(item.id.to_string()));
                }
            }
        }

        Ok(())
    }

    /// Hard-coded board used when neither a stored board nor a seed exists.
    pub fn default_board() -> Self {
        let samples = [
            (
                "todo",
                "To Do",
                "card-1",
                "Plan the week",
                "Write down the few things that matter most.",
                "planning",
            ),
            (
                "doing",
                "Doing",
                "card-2",
                "Try dragging a card",
                "Move cards between columns to track progress.",
                "tutorial",
            ),
            (
                "done",
                "Done",
                "card-3",
                "Create your board",
                "The board is saved locally after every change.",
                "setup",
            ),
        ];

        let mut board = Board::default();
        for (column_id, column_title, card_id, title, description, label) in samples {
            let card_id = CardId::new(card_id);
            let mut card = Card::new(card_id.clone(), title);
            card.description = Some(description.to_string());
            card.labels = vec![label.to_string()];

            let mut column = Column::new(ColumnId::new(column_id), column_title);
            column.card_ids.push(card_id.clone());

            board.columns.push(column);
            board.cards.insert(card_id, card);
        }
        board
    }
}
