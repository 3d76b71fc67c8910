//! Board mutation operations.
//!
//! # Responsibility
//! - Add, remove, rename and update columns and cards.
//!
//! # Invariants
//! - Every operation takes `&Board` and returns a new `Board`; the input is
//!   never modified.
//! - Unknown IDs are silent no-ops that return an unchanged copy.
//! - Deleting a column deletes the cards it references.

use crate::model::board::{Board, Card, Column, ValidationError, DEFAULT_COLUMN_TITLE};
use crate::model::ids::{CardId, ColumnId, IdGenerator};
use log::debug;

/// Appends an empty column. A `None` title falls back to the default title.
pub fn add_column(
    board: &Board,
    title: Option<&str>,
    ids: &mut impl IdGenerator,
) -> (Board, ColumnId) {
    let column_id = ids.column_id();
    let mut next = board.clone();
    next.columns.push(Column::new(
        column_id.clone(),
        title.unwrap_or(DEFAULT_COLUMN_TITLE),
    ));
    (next, column_id)
}

/// Removes a column together with the cards it references.
pub fn delete_column(board: &Board, column_id: &ColumnId) -> Board {
    let mut next = board.clone();
    let Some(index) = next.columns.iter().position(|c| &c.id == column_id) else {
        debug!("event=delete_column module=engine status=skip reason=column_not_found");
        return next;
    };

    let removed = next.columns.remove(index);
    for card_id in &removed.card_ids {
        next.cards.remove(card_id);
    }
    next
}

/// Replaces a column title. Empty titles are accepted as-is.
pub fn rename_column(board: &Board, column_id: &ColumnId, title: impl Into<String>) -> Board {
    let mut next = board.clone();
    match next.columns.iter_mut().find(|c| &c.id == column_id) {
        Some(column) => column.title = title.into(),
        None => debug!("event=rename_column module=engine status=skip reason=column_not_found"),
    }
    next
}

/// Creates a card at the end of a column.
///
/// Returns the new card ID, or `None` when the column does not exist.
///
/// # Errors
/// - `ValidationError::EmptyCardTitle` when `title` is blank after trimming.
pub fn add_card(
    board: &Board,
    column_id: &ColumnId,
    title: &str,
    ids: &mut impl IdGenerator,
) -> Result<(Board, Option<CardId>), ValidationError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(ValidationError::EmptyCardTitle);
    }

    let mut next = board.clone();
    let Some(column) = next.columns.iter_mut().find(|c| &c.id == column_id) else {
        debug!("event=add_card module=engine status=skip reason=column_not_found");
        return Ok((next, None));
    };

    let card_id = ids.card_id();
    column.card_ids.push(card_id.clone());
    next.cards.insert(card_id.clone(), Card::new(card_id.clone(), title));
    Ok((next, Some(card_id)))
}

/// Replaces an existing card record wholesale.
///
/// Labels and checklist edits go through here too. Cards that do not already
/// exist are not inserted.
pub fn update_card(board: &Board, card: Card) -> Board {
    let mut next = board.clone();
    match next.cards.get_mut(&card.id) {
        Some(slot) => *slot = card,
        None => debug!("event=update_card module=engine status=skip reason=card_not_found"),
    }
    next
}

/// Removes a card record and every reference to it.
pub fn delete_card(board: &Board, card_id: &CardId) -> Board {
    let mut next = board.clone();
    next.cards.remove(card_id);
    for column in &mut next.columns {
        column.card_ids.retain(|id| id != card_id);
    }
    next
}
