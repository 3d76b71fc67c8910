//! Drag-and-drop reorder resolution.
//!
//! # Responsibility
//! - Turn one completed drag gesture (active card + drop target) into a new
//!   card ordering.
//!
//! # Invariants
//! - At most one card changes position; titles, records and other columns'
//!   orderings are untouched.
//! - Same-column moves use array-move semantics (remove then reinsert), not
//!   swaps.
//! - Resolution runs once per completed gesture, never per pointer move.

use crate::model::board::Board;
use crate::model::ids::{CardId, ColumnId};
use log::debug;

/// What the pointer was over when the card was released.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropTarget {
    /// Hovering a card: insert before it (cross-column) or move to its index.
    Card(CardId),
    /// Hovering a column body with no specific card: append.
    Column(ColumnId),
}

/// Maps a raw droppable identifier to a typed target.
///
/// Card IDs take precedence over column IDs. Unknown IDs resolve to `None`.
pub fn resolve_drop_target(board: &Board, raw_id: &str) -> Option<DropTarget> {
    let card_id = CardId::new(raw_id);
    if board.column_of(&card_id).is_some() {
        return Some(DropTarget::Card(card_id));
    }

    let column_id = ColumnId::new(raw_id);
    board
        .find_column(&column_id)
        .map(|_| DropTarget::Column(column_id))
}

/// Applies one completed drag gesture.
///
/// `over == None` means the card was dropped outside any droppable area and
/// the board is returned unchanged.
pub fn move_card(board: &Board, active: &CardId, over: Option<&DropTarget>) -> Board {
    let mut next = board.clone();
    let Some(over) = over else {
        debug!("event=move_card module=reorder status=skip reason=no_drop_target");
        return next;
    };

    let Some(source) = next
        .columns
        .iter()
        .position(|column| column.card_ids.contains(active))
    else {
        debug!("event=move_card module=reorder status=skip reason=unknown_active_card");
        return next;
    };

    let target = match over {
        DropTarget::Card(card_id) => next
            .columns
            .iter()
            .position(|column| column.card_ids.contains(card_id)),
        DropTarget::Column(column_id) => next
            .columns
            .iter()
            .position(|column| &column.id == column_id),
    }
    .unwrap_or(source);

    if source != target {
        next.columns[source].card_ids.retain(|id| id != active);
        let column = &mut next.columns[target];
        let insert_at = match over {
            DropTarget::Card(card_id) => column
                .position_of(card_id)
                .unwrap_or(column.card_ids.len()),
            DropTarget::Column(_) => column.card_ids.len(),
        };
        column.card_ids.insert(insert_at, active.clone());
        return next;
    }

    let column = &mut next.columns[source];
    let DropTarget::Card(over_id) = over else {
        return next;
    };
    let (Some(old_index), Some(new_index)) =
        (column.position_of(active), column.position_of(over_id))
    else {
        return next;
    };
    if old_index != new_index {
        let moved = column.card_ids.remove(old_index);
        column.card_ids.insert(new_index, moved);
    }
    next
}
