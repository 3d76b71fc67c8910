use kanban_core::{add_card, project, update_card, Board, ColumnId, SequentialIdGenerator};
use std::borrow::Cow;

fn searchable_board() -> Board {
    let mut ids = SequentialIdGenerator::new("s");
    let mut board = Board::default_board();
    let todo = ColumnId::new("todo");
    let (next, card_id) = add_card(&board, &todo, "Fix login bug", &mut ids).unwrap();
    board = next;

    let mut card = board.card(&card_id.unwrap()).unwrap().clone();
    card.labels = vec!["Backend".to_string(), "P1".to_string()];
    board = update_card(&board, card);
    board
}

#[test]
fn empty_query_returns_canonical_board() {
    let board = searchable_board();
    let view = project(&board, "");
    assert!(matches!(view, Cow::Borrowed(_)));
    assert_eq!(*view, board);
}

#[test]
fn query_matches_title_description_and_labels_case_insensitively() {
    let board = searchable_board();

    let by_label = project(&board, "  backend ");
    assert_eq!(by_label.cards.len(), 1);
    assert_eq!(by_label.find_column(&ColumnId::new("todo")).unwrap().card_ids.len(), 1);

    let by_description = project(&board, "SAVED LOCALLY");
    let titles: Vec<&str> = by_description
        .cards
        .values()
        .map(|card| card.title.as_str())
        .collect();
    assert_eq!(titles, vec!["Create your board"]);
}

#[test]
fn query_matching_nothing_keeps_every_column_empty() {
    let board = searchable_board();
    let view = project(&board, "no card has this text");

    assert_eq!(view.columns.len(), board.columns.len());
    assert!(view.columns.iter().all(|column| column.card_ids.is_empty()));
    assert!(view.cards.is_empty());
}

#[test]
fn projection_does_not_touch_canonical_board() {
    let board = searchable_board();
    let snapshot = board.clone();
    let _ = project(&board, "bug");
    assert_eq!(board, snapshot);
}

#[test]
fn filtered_columns_keep_relative_card_order() {
    let mut ids = SequentialIdGenerator::new("o");
    let todo = ColumnId::new("todo");
    let mut board = Board::default_board();
    for title in ["alpha match", "beta", "gamma match"] {
        board = add_card(&board, &todo, title, &mut ids).unwrap().0;
    }

    let view = project(&board, "match");
    let titles: Vec<&str> = view
        .cards_in(&todo)
        .into_iter()
        .map(|card| card.title.as_str())
        .collect();
    assert_eq!(titles, vec!["alpha match", "gamma match"]);
}
