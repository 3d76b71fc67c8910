//! Command-line front end for the board engine.
//!
//! # Responsibility
//! - Drive one board session per invocation against the local store.
//! - Provide export/import/reset file actions.

use clap::{Args, Parser, Subcommand};
use kanban_core::db::open_db;
use kanban_core::{
    default_log_level, init_logging, resolve_drop_target, BoardSession, Card, CardId,
    ChecklistItemId, ColumnId, FileSeedSource, PersistOnChange, SqliteBoardStore,
    DEFAULT_SEED_PATH, EXPORT_FILE_NAME,
};
use log::info;
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;
use std::rc::Rc;

mod render;

#[derive(Debug, Parser)]
#[command(name = "kanban")]
#[command(version)]
#[command(about = "A local single-user Kanban board")]
struct Cli {
    #[arg(
        short = 'd',
        long,
        env = "KANBAN_DB_PATH",
        default_value = ".kanban/board.sqlite3",
        help = "Path to the local board database."
    )]
    db: PathBuf,

    #[arg(
        long,
        env = "KANBAN_SEED_PATH",
        default_value = DEFAULT_SEED_PATH,
        help = "Seed document used when no board is stored yet."
    )]
    seed: PathBuf,

    #[arg(
        long,
        env = "KANBAN_LOG_LEVEL",
        requires = "log_dir",
        help = "trace|debug|info|warn|error. Needs --log-dir."
    )]
    log_level: Option<String>,

    #[arg(
        long,
        env = "KANBAN_LOG_DIR",
        help = "Absolute directory for rolling log files. Logging is off when unset."
    )]
    log_dir: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Args)]
struct EditCardArgs {
    id: String,
    #[arg(long)]
    title: Option<String>,
    #[arg(long, conflicts_with = "clear_description")]
    description: Option<String>,
    #[arg(long)]
    clear_description: bool,
    #[arg(
        long = "label",
        conflicts_with = "clear_labels",
        help = "Replaces all labels; repeat for several."
    )]
    labels: Vec<String>,
    #[arg(long)]
    clear_labels: bool,
}

impl EditCardArgs {
    fn apply(self, card: &mut Card) {
        if let Some(title) = self.title {
            card.title = title;
        }
        if self.clear_description {
            card.description = None;
        } else if self.description.is_some() {
            card.description = self.description;
        }
        if self.clear_labels {
            card.labels.clear();
        } else if !self.labels.is_empty() {
            card.labels = self.labels;
        }
    }
}

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Print the board, optionally filtered by a search query.")]
    Show {
        #[arg(short, long)]
        query: Option<String>,
    },
    #[command(about = "Append a column.")]
    AddColumn { title: Option<String> },
    #[command(about = "Rename a column.")]
    RenameColumn { id: String, title: String },
    #[command(about = "Delete a column and its cards.")]
    DeleteColumn { id: String },
    #[command(about = "Append a card to a column.")]
    AddCard { column: String, title: String },
    #[command(about = "Edit a card in place. Omitted fields are kept.")]
    EditCard(EditCardArgs),
    #[command(about = "Delete a card.")]
    DeleteCard { id: String },
    #[command(about = "Append a checklist item to a card.")]
    CheckAdd { card: String, text: String },
    #[command(about = "Flip the done flag of a checklist item.")]
    CheckToggle { card: String, item: String },
    #[command(about = "Remove a checklist item from a card.")]
    CheckRemove { card: String, item: String },
    #[command(about = "Drop a card onto another card or a column.")]
    Move { card: String, target: String },
    #[command(about = "Write the board document to a file.")]
    Export {
        #[arg(short, long, default_value = EXPORT_FILE_NAME)]
        out: PathBuf,
    },
    #[command(about = "Replace the board with a document file.")]
    Import { file: PathBuf },
    #[command(about = "Discard the stored board and start over from seed or default.")]
    Reset,
    #[command(about = "Print the core version.")]
    Version,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(level, log_dir)?;
    }

    if let Commands::Version = cli.command {
        println!("kanban_core version={}", kanban_core::core_version());
        return Ok(());
    }

    let store = Rc::new(SqliteBoardStore::new(open_db(&cli.db)?));
    let seed = FileSeedSource::new(&cli.seed);
    let mut session = BoardSession::new();
    session.subscribe(Box::new(PersistOnChange::new(Rc::clone(&store))));
    let origin = session.start(&*store, &seed);
    info!("event=cli_start module=cli status=ok origin={origin:?}");

    match cli.command {
        Commands::Show { query } => {
            let view = session.search(query.as_deref().unwrap_or(""))?;
            print!("{}", render::board(&view));
        }
        Commands::AddColumn { title } => {
            let id = session.add_column(title.as_deref())?;
            println!("{id}");
        }
        Commands::RenameColumn { id, title } => {
            session.rename_column(&ColumnId::new(id), &title)?;
        }
        Commands::DeleteColumn { id } => session.delete_column(&ColumnId::new(id))?,
        Commands::AddCard { column, title } => {
            match session.add_card(&ColumnId::new(column.as_str()), &title)? {
                Some(id) => println!("{id}"),
                None => return Err(format!("unknown column `{column}`").into()),
            }
        }
        Commands::EditCard(args) => {
            let mut card = editable_card(&session, &args.id)?;
            args.apply(&mut card);
            session.update_card(card)?;
        }
        Commands::DeleteCard { id } => session.delete_card(&CardId::new(id))?,
        Commands::CheckAdd { card, text } => {
            let mut card = editable_card(&session, &card)?;
            let item = session.new_checklist_item(text);
            println!("{}", item.id);
            card.checklist.push(item);
            session.update_card(card)?;
        }
        Commands::CheckToggle { card, item } => {
            let mut card = editable_card(&session, &card)?;
            toggle_item(&mut card, &ChecklistItemId::new(item))?;
            session.update_card(card)?;
        }
        Commands::CheckRemove { card, item } => {
            let mut card = editable_card(&session, &card)?;
            remove_item(&mut card, &ChecklistItemId::new(item))?;
            session.update_card(card)?;
        }
        Commands::Export { out } => {
            std::fs::write(&out, session.export_document()?)?;
            println!("exported to {}", out.display());
        }
        Commands::Import { file } => {
            let text = std::fs::read_to_string(&file)?;
            session.import_document(&text)?;
            println!("imported {}", file.display());
        }
        Commands::Reset => {
            let origin = session.reset(&*store, &seed);
            println!("board reset from {origin:?}");
        }
        Commands::Version => {}
    }

    Ok(())
}

/// Copy of a stored card, ready to be edited and passed to `update_card`.
fn editable_card(session: &BoardSession, id: &str) -> Result<Card, Box<dyn Error>> {
    session
        .board()
        .and_then(|board| board.card(&CardId::new(id)))
        .cloned()
        .ok_or_else(|| format!("unknown card `{id}`").into())
}

fn toggle_item(card: &mut Card, item_id: &ChecklistItemId) -> Result<(), String> {
    let entry = card
        .checklist
        .iter_mut()
        .find(|entry| &entry.id == item_id)
        .ok_or_else(|| format!("unknown checklist item `{item_id}`"))?;
    entry.done = !entry.done;
    Ok(())
}

fn remove_item(card: &mut Card, item_id: &ChecklistItemId) -> Result<(), String> {
    let before = card.checklist.len();
    card.checklist.retain(|entry| &entry.id != item_id);
    if card.checklist.len() == before {
        return Err(format!("unknown checklist item `{item_id}`"));
    }
    Ok(())
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
