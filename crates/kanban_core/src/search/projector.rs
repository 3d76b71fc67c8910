//! Free-text board filtering.
//!
//! # Responsibility
//! - Derive a board-shaped view containing only cards that match a query.
//!
//! # Invariants
//! - The canonical board is never modified.
//! - Blank queries return the canonical board itself (`Cow::Borrowed`).
//! - Columns are always kept, even when no card in them matches.

use crate::model::board::{Board, Card};
use std::borrow::Cow;

/// Projects `board` through `query`.
///
/// Matching is a case-insensitive substring test against the card title,
/// description and space-joined labels.
pub fn project<'a>(board: &'a Board, query: &str) -> Cow<'a, Board> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Cow::Borrowed(board);
    }

    let cards = board
        .cards
        .iter()
        .filter(|(_, card)| card_matches(card, &needle))
        .map(|(id, card)| (id.clone(), card.clone()))
        .collect::<std::collections::BTreeMap<_, _>>();

    let columns = board
        .columns
        .iter()
        .map(|column| {
            let mut column = column.clone();
            column.card_ids.retain(|id| cards.contains_key(id));
            column
        })
        .collect();

    Cow::Owned(Board { columns, cards })
}

/// Returns whether `card` matches an already lowercased, trimmed needle.
pub fn card_matches(card: &Card, needle: &str) -> bool {
    searchable_text(card).to_lowercase().contains(needle)
}

fn searchable_text(card: &Card) -> String {
    format!(
        "{} {} {}",
        card.title,
        card.description.as_deref().unwrap_or(""),
        card.labels.join(" ")
    )
}

#[cfg(test)]
mod tests {
    use super::{card_matches, project};
    use crate::model::board::{Board, Card};
    use crate::model::ids::CardId;
    use std::borrow::Cow;

    #[test]
    fn whitespace_query_is_pass_through() {
        let board = Board::default_board();
        assert!(matches!(project(&board, "   "), Cow::Borrowed(_)));
    }

    #[test]
    fn matches_labels_and_description() {
        let mut card = Card::new(CardId::new("c"), "Title");
        card.description = Some("Deploy Notes".to_string());
        card.labels = vec!["Urgent".to_string()];
        assert!(card_matches(&card, "urgent"));
        assert!(card_matches(&card, "deploy"));
        assert!(!card_matches(&card, "missing"));
    }
}
