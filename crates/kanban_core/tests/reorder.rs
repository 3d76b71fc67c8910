use kanban_core::{
    move_card, resolve_drop_target, Board, Card, CardId, Column, ColumnId, DropTarget,
};

fn board_with(columns: &[(&str, &[&str])]) -> Board {
    let mut board = Board::default();
    for (column_id, card_ids) in columns {
        let mut column = Column::new(ColumnId::new(*column_id), *column_id);
        for card_id in *card_ids {
            let id = CardId::new(*card_id);
            board
                .cards
                .insert(id.clone(), Card::new(id.clone(), format!("card {card_id}")));
            column.card_ids.push(id);
        }
        board.columns.push(column);
    }
    board
}

fn order(board: &Board, column_id: &str) -> Vec<String> {
    board
        .find_column(&ColumnId::new(column_id))
        .unwrap()
        .card_ids
        .iter()
        .map(|id| id.to_string())
        .collect()
}

fn card(id: &str) -> DropTarget {
    DropTarget::Card(CardId::new(id))
}

#[test]
fn cross_column_drop_on_card_inserts_before_it() {
    let board = board_with(&[("x", &["c1", "c2"]), ("y", &["c3"])]);

    let next = move_card(&board, &CardId::new("c1"), Some(&card("c3")));
    assert_eq!(order(&next, "x"), vec!["c2"]);
    assert_eq!(order(&next, "y"), vec!["c1", "c3"]);
    assert_eq!(next.cards, board.cards);
}

#[test]
fn drop_on_empty_column_appends() {
    let board = board_with(&[("x", &["c1"]), ("y", &[])]);

    let target = resolve_drop_target(&board, "y").unwrap();
    let next = move_card(&board, &CardId::new("c1"), Some(&target));
    assert!(order(&next, "x").is_empty());
    assert_eq!(order(&next, "y"), vec!["c1"]);
}

#[test]
fn drop_on_non_empty_column_body_appends_at_end() {
    let board = board_with(&[("x", &["c1"]), ("y", &["c2", "c3"])]);

    let target = DropTarget::Column(ColumnId::new("y"));
    let next = move_card(&board, &CardId::new("c1"), Some(&target));
    assert_eq!(order(&next, "y"), vec!["c2", "c3", "c1"]);
}

#[test]
fn same_column_move_uses_array_move_semantics() {
    let board = board_with(&[("x", &["a", "b", "c", "d"])]);

    let down = move_card(&board, &CardId::new("a"), Some(&card("c")));
    assert_eq!(order(&down, "x"), vec!["b", "c", "a", "d"]);

    let up = move_card(&board, &CardId::new("d"), Some(&card("b")));
    assert_eq!(order(&up, "x"), vec!["a", "d", "b", "c"]);
}

#[test]
fn moving_down_and_back_before_original_successor_restores_order() {
    let board = board_with(&[("x", &["a", "b", "c", "d"])]);

    let moved = move_card(&board, &CardId::new("a"), Some(&card("c")));
    let restored = move_card(&moved, &CardId::new("a"), Some(&card("b")));
    assert_eq!(order(&restored, "x"), order(&board, "x"));
}

#[test]
fn dropping_card_on_itself_is_noop() {
    let board = board_with(&[("x", &["a", "b"])]);
    assert_eq!(move_card(&board, &CardId::new("a"), Some(&card("a"))), board);
}

#[test]
fn unknown_active_card_or_target_is_noop() {
    let board = board_with(&[("x", &["a", "b"]), ("y", &[])]);

    assert_eq!(
        move_card(&board, &CardId::new("ghost"), Some(&card("a"))),
        board
    );
    assert_eq!(
        move_card(&board, &CardId::new("a"), Some(&card("ghost"))),
        board
    );
    let unknown_column = DropTarget::Column(ColumnId::new("nowhere"));
    assert_eq!(
        move_card(&board, &CardId::new("a"), Some(&unknown_column)),
        board
    );
}

#[test]
fn drop_outside_any_area_is_noop() {
    let board = board_with(&[("x", &["a"]), ("y", &[])]);
    assert_eq!(move_card(&board, &CardId::new("a"), None), board);
}
