use kanban_core::{
    export_document, import_document, move_card, Board, CardId, ChecklistItem, DropTarget,
    SequentialIdGenerator, ValidationError,
};
use serde_json::json;

fn rich_board() -> Board {
    let mut ids = SequentialIdGenerator::new("d");
    let mut board = Board::default_board();
    let card = board.cards.get_mut(&CardId::new("card-1")).unwrap();
    card.description = None;
    card.labels.push("extra".to_string());
    card.checklist = vec![
        ChecklistItem::new("one", &mut ids),
        ChecklistItem::new("two", &mut ids),
    ];
    card.checklist[1].done = true;
    move_card(
        &board,
        &CardId::new("card-1"),
        Some(&DropTarget::Card(CardId::new("card-3"))),
    )
}

#[test]
fn export_then_import_reproduces_the_board() {
    let board = rich_board();
    let text = export_document(&board).unwrap();
    assert_eq!(import_document(&text).unwrap(), board);
}

#[test]
fn export_uses_documented_wire_fields() {
    let text = export_document(&rich_board()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();

    assert_eq!(value["columns"][2]["cardIds"], json!(["card-1", "card-3"]));
    let card = &value["cards"]["card-1"];
    assert_eq!(card["id"], "card-1");
    assert!(card.get("description").is_none());
    assert_eq!(card["checklist"][1]["done"], true);
    assert!(!text.contains("updated"));
    assert!(!text.contains("created"));
}

#[test]
fn columns_must_be_an_array() {
    let err = import_document(r#"{"columns": "not-an-array", "cards": {}}"#).unwrap_err();
    assert!(matches!(err, ValidationError::InvalidShape(_)), "{err}");
}

#[test]
fn cards_must_be_an_object() {
    let err = import_document(r#"{"columns": [], "cards": []}"#).unwrap_err();
    assert!(matches!(err, ValidationError::InvalidShape(_)), "{err}");

    let err = import_document(r#"{"columns": []}"#).unwrap_err();
    assert!(matches!(err, ValidationError::InvalidShape(_)), "{err}");
}

#[test]
fn records_with_wrong_types_are_rejected() {
    let doc = json!({
        "columns": [{"id": "x", "title": 7, "cardIds": []}],
        "cards": {}
    });
    let err = import_document(&doc.to_string()).unwrap_err();
    assert!(matches!(err, ValidationError::InvalidRecord(_)), "{err}");
}

#[test]
fn dangling_card_reference_is_rejected() {
    let doc = json!({
        "columns": [{"id": "x", "title": "X", "cardIds": ["ghost"]}],
        "cards": {}
    });
    let err = import_document(&doc.to_string()).unwrap_err();
    assert!(matches!(err, ValidationError::BrokenReference { .. }), "{err}");
}

#[test]
fn card_key_must_match_record_id() {
    let doc = json!({
        "columns": [{"id": "x", "title": "X", "cardIds": ["a"]}],
        "cards": {"a": {"id": "b", "title": "wrong key"}}
    });
    let err = import_document(&doc.to_string()).unwrap_err();
    assert!(matches!(err, ValidationError::KeyMismatch { .. }), "{err}");
}

#[test]
fn empty_board_round_trips() {
    let text = export_document(&Board::default()).unwrap();
    assert_eq!(import_document(&text).unwrap(), Board::default());
}

#[test]
fn empty_ids_are_rejected() {
    let empty_column = json!({
        "columns": [{"id": "", "title": "X", "cardIds": []}],
        "cards": {}
    });
    let err = import_document(&empty_column.to_string()).unwrap_err();
    assert_eq!(err, ValidationError::EmptyId("column"));

    let empty_card = json!({
        "columns": [{"id": "x", "title": "X", "cardIds": [""]}],
        "cards": {"": {"id": "", "title": "nameless"}}
    });
    let err = import_document(&empty_card.to_string()).unwrap_err();
    assert_eq!(err, ValidationError::EmptyId("card"));

    let empty_item = json!({
        "columns": [{"id": "x", "title": "X", "cardIds": ["a"]}],
        "cards": {"a": {"id": "a", "title": "A", "checklist": [{"id": "", "text": "t"}]}}
    });
    let err = import_document(&empty_item.to_string()).unwrap_err();
    assert_eq!(err, ValidationError::EmptyId("checklist item"));
}

#[test]
fn checklist_item_ids_must_be_unique_within_a_card() {
    let doc = json!({
        "columns": [{"id": "x", "title": "X", "cardIds": ["a"]}],
        "cards": {"a": {"id": "a", "title": "A", "checklist": [
            {"id": "i", "text": "first"},
            {"id": "i", "text": "second", "done": true}
        ]}}
    });
    let err = import_document(&doc.to_string()).unwrap_err();
    assert_eq!(err, ValidationError::DuplicateId("i".to_string()));
}

#[test]
fn checklist_item_ids_may_repeat_across_cards() {
    let doc = json!({
        "columns": [{"id": "x", "title": "X", "cardIds": ["a", "b"]}],
        "cards": {
            "a": {"id": "a", "title": "A", "checklist": [{"id": "i", "text": "one"}]},
            "b": {"id": "b", "title": "B", "checklist": [{"id": "i", "text": "two"}]}
        }
    });
    assert_eq!(import_document(&doc.to_string()).unwrap().cards.len(), 2);
}

#[test]
fn record_errors_do_not_echo_document_content() {
    let doc = json!({
        "columns": [{"id": "x", "title": "X", "cardIds": ["a"]}],
        "cards": {"a": {"id": "a", "title": "A", "labels": "secret-label-text"}}
    });
    let err = import_document(&doc.to_string()).unwrap_err();
    assert!(matches!(err, ValidationError::InvalidRecord(_)), "{err}");
    assert!(err.to_string().contains("cards[a]"), "{err}");
    assert!(!err.to_string().contains("secret-label-text"), "{err}");
}
