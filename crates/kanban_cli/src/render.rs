//! Plain-text board rendering.

use kanban_core::Board;
use std::fmt::Write;

pub fn board(board: &Board) -> String {
    let mut out = String::new();
    for column in &board.columns {
        let _ = writeln!(out, "== {} [{}]", column.title, column.id);
        for card in board.cards_in(&column.id) {
            let _ = write!(out, "  - {} [{}]", card.title, card.id);
            if !card.labels.is_empty() {
                let _ = write!(out, " #{}", card.labels.join(" #"));
            }
            let (done, total) = card.checklist_progress();
            if total > 0 {
                let _ = write!(out, " ({done}/{total})");
            }
            out.push('\n');
        }
    }
    out
}
