//! Board session: the single owner of the canonical board.
//!
//! # Responsibility
//! - Drive startup through `Uninitialized -> LoadingSeed -> Ready`.
//! - Expose the mutation, reorder, search and document entry points.
//! - Notify observers (persistence among them) after each committed change.
//!
//! # Invariants
//! - No mutation is accepted before the session is `Ready`.
//! - A failed operation leaves the board exactly as it was.
//! - Storage and seed failures are logged and never surfaced as errors.

use crate::codec::document::{export_document, import_document, CodecError};
use crate::engine::mutation;
use crate::engine::reorder::{self, DropTarget};
use crate::model::board::{Board, Card, ChecklistItem, ValidationError};
use crate::model::ids::{CardId, ColumnId, IdGenerator, UuidIdGenerator};
use crate::repo::board_store::BoardStore;
use crate::search::projector;
use crate::seed::{SeedError, SeedSource};
use log::{info, warn};
use std::borrow::Cow;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type SessionResult<T> = Result<T, SessionError>;

/// Errors surfaced to session callers.
#[derive(Debug)]
pub enum SessionError {
    /// Startup has not produced a board yet.
    NotReady,
    /// User input or document rejected; board unchanged.
    Validation(ValidationError),
    /// Export failed.
    Codec(CodecError),
}

impl Display for SessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotReady => write!(f, "board is not loaded yet"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::Codec(err) => write!(f, "{err}"),
        }
    }
}

impl Error for SessionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NotReady => None,
            Self::Validation(err) => Some(err),
            Self::Codec(err) => Some(err),
        }
    }
}

impl From<ValidationError> for SessionError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<CodecError> for SessionError {
    fn from(value: CodecError) -> Self {
        Self::Codec(value)
    }
}

/// Externally visible lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Uninitialized,
    /// No stored board; waiting for the seed fetch result.
    LoadingSeed,
    Ready,
}

/// Where the current board came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardOrigin {
    Stored,
    Seed,
    Default,
    Import,
}

/// Outcome of [`BoardSession::load_persisted`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartupStep {
    /// A valid stored board was loaded; the session is ready.
    Loaded,
    /// Caller must fetch the seed and pass the result to `finish_seed`.
    NeedsSeed,
    /// Startup already ran; nothing was read.
    AlreadyStarted,
}

/// Receives every committed board snapshot.
pub trait BoardObserver {
    fn board_changed(&mut self, board: &Board);
}

impl<F: FnMut(&Board)> BoardObserver for F {
    fn board_changed(&mut self, board: &Board) {
        self(board)
    }
}

/// Observer that writes each snapshot to a [`BoardStore`].
///
/// Write failures are logged and dropped; the in-memory board stays
/// authoritative for the rest of the session.
pub struct PersistOnChange<S: BoardStore> {
    store: S,
}

impl<S: BoardStore> PersistOnChange<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

impl<S: BoardStore> BoardObserver for PersistOnChange<S> {
    fn board_changed(&mut self, board: &Board) {
        let document = match export_document(board) {
            Ok(document) => document,
            Err(err) => {
                warn!("event=board_persist module=session status=error stage=encode error={err}");
                return;
            }
        };
        if let Err(err) = self.store.save_document(&document) {
            warn!("event=board_persist module=session status=error stage=write error={err}");
        }
    }
}

enum Lifecycle {
    Uninitialized,
    LoadingSeed,
    Ready { board: Board, origin: BoardOrigin },
}

/// State container owning the canonical board for one session.
pub struct BoardSession<G: IdGenerator = UuidIdGenerator> {
    lifecycle: Lifecycle,
    ids: G,
    observers: Vec<Box<dyn BoardObserver>>,
}

impl BoardSession<UuidIdGenerator> {
    pub fn new() -> Self {
        Self::with_id_generator(UuidIdGenerator)
    }
}

impl Default for BoardSession<UuidIdGenerator> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: IdGenerator> BoardSession<G> {
    pub fn with_id_generator(ids: G) -> Self {
        Self {
            lifecycle: Lifecycle::Uninitialized,
            ids,
            observers: Vec::new(),
        }
    }

    /// Registers an observer for committed snapshots.
    pub fn subscribe(&mut self, observer: Box<dyn BoardObserver>) {
        self.observers.push(observer);
    }

    pub fn state(&self) -> SessionState {
        match self.lifecycle {
            Lifecycle::Uninitialized => SessionState::Uninitialized,
            Lifecycle::LoadingSeed => SessionState::LoadingSeed,
            Lifecycle::Ready { .. } => SessionState::Ready,
        }
    }

    /// Current board, or `None` while startup is still in progress.
    pub fn board(&self) -> Option<&Board> {
        match &self.lifecycle {
            Lifecycle::Ready { board, .. } => Some(board),
            _ => None,
        }
    }

    pub fn origin(&self) -> Option<BoardOrigin> {
        match &self.lifecycle {
            Lifecycle::Ready { origin, .. } => Some(*origin),
            _ => None,
        }
    }

    /// First startup phase: read the locally stored board.
    ///
    /// A missing, unreadable or invalid stored value moves the session to
    /// `LoadingSeed`.
    pub fn load_persisted(&mut self, store: &impl BoardStore) -> StartupStep {
        if !matches!(self.lifecycle, Lifecycle::Uninitialized) {
            return StartupStep::AlreadyStarted;
        }

        let stored = match store.load_document() {
            Ok(stored) => stored,
            Err(err) => {
                warn!("event=board_load module=session status=error source=store error={err}");
                None
            }
        };

        if let Some(text) = stored {
            match import_document(&text) {
                Ok(board) => {
                    info!(
                        "event=board_load module=session status=ok source=store columns={} cards={}",
                        board.columns.len(),
                        board.cards.len()
                    );
                    self.lifecycle = Lifecycle::Ready {
                        board,
                        origin: BoardOrigin::Stored,
                    };
                    return StartupStep::Loaded;
                }
                Err(err) => {
                    warn!("event=board_load module=session status=error source=store reason=corrupt error={err}");
                }
            }
        }

        self.lifecycle = Lifecycle::LoadingSeed;
        StartupStep::NeedsSeed
    }

    /// Second startup phase: deliver the seed fetch result.
    ///
    /// Falls back to [`Board::default_board`] when the fetch failed or the
    /// document is invalid. Results arriving outside `LoadingSeed` are
    /// ignored and return `None`.
    pub fn finish_seed(&mut self, fetched: Result<String, SeedError>) -> Option<BoardOrigin> {
        if !matches!(self.lifecycle, Lifecycle::LoadingSeed) {
            warn!("event=board_seed module=session status=skip reason=not_loading_seed");
            return None;
        }

        let (board, origin) = match fetched {
            Ok(text) => match import_document(&text) {
                Ok(board) => (board, BoardOrigin::Seed),
                Err(err) => {
                    warn!("event=board_seed module=session status=error reason=invalid error={err}");
                    (Board::default_board(), BoardOrigin::Default)
                }
            },
            Err(err) => {
                info!("event=board_seed module=session status=skip reason=unavailable error={err}");
                (Board::default_board(), BoardOrigin::Default)
            }
        };

        info!("event=board_seed module=session status=ok origin={origin:?}");
        self.lifecycle = Lifecycle::Ready { board, origin };
        self.notify();
        Some(origin)
    }

    /// Runs both startup phases synchronously.
    pub fn start(&mut self, store: &impl BoardStore, seed: &impl SeedSource) -> BoardOrigin {
        match self.load_persisted(store) {
            StartupStep::Loaded => BoardOrigin::Stored,
            StartupStep::NeedsSeed => self
                .finish_seed(seed.fetch())
                .unwrap_or(BoardOrigin::Default),
            StartupStep::AlreadyStarted => self.origin().unwrap_or(BoardOrigin::Default),
        }
    }

    /// Clears the stored board and rebuilds it from seed/default.
    ///
    /// The store is not read again, so a failed clear cannot bring the old
    /// board back.
    pub fn reset(&mut self, store: &impl BoardStore, seed: &impl SeedSource) -> BoardOrigin {
        if let Err(err) = store.clear() {
            warn!("event=board_reset module=session status=error stage=clear error={err}");
        }
        self.lifecycle = Lifecycle::LoadingSeed;
        self.finish_seed(seed.fetch())
            .unwrap_or(BoardOrigin::Default)
    }

    pub fn add_column(&mut self, title: Option<&str>) -> SessionResult<ColumnId> {
        let (next, column_id) = mutation::add_column(ready(&self.lifecycle)?, title, &mut self.ids);
        self.commit(next);
        Ok(column_id)
    }

    pub fn delete_column(&mut self, column_id: &ColumnId) -> SessionResult<()> {
        let next = mutation::delete_column(ready(&self.lifecycle)?, column_id);
        self.commit(next);
        Ok(())
    }

    pub fn rename_column(&mut self, column_id: &ColumnId, title: &str) -> SessionResult<()> {
        let next = mutation::rename_column(ready(&self.lifecycle)?, column_id, title);
        self.commit(next);
        Ok(())
    }

    /// Adds a card; `Ok(None)` means the column was not found.
    pub fn add_card(&mut self, column_id: &ColumnId, title: &str) -> SessionResult<Option<CardId>> {
        let (next, card_id) =
            mutation::add_card(ready(&self.lifecycle)?, column_id, title, &mut self.ids)?;
        self.commit(next);
        Ok(card_id)
    }

    pub fn update_card(&mut self, card: Card) -> SessionResult<()> {
        let next = mutation::update_card(ready(&self.lifecycle)?, card);
        self.commit(next);
        Ok(())
    }

    pub fn delete_card(&mut self, card_id: &CardId) -> SessionResult<()> {
        let next = mutation::delete_card(ready(&self.lifecycle)?, card_id);
        self.commit(next);
        Ok(())
    }

    /// Applies one completed drag gesture.
    pub fn move_card(&mut self, active: &CardId, over: Option<&DropTarget>) -> SessionResult<()> {
        let next = reorder::move_card(ready(&self.lifecycle)?, active, over);
        self.commit(next);
        Ok(())
    }

    /// Builds an unchecked checklist item with a fresh ID, for use with
    /// `update_card`.
    pub fn new_checklist_item(&mut self, text: impl Into<String>) -> ChecklistItem {
        ChecklistItem::new(text, &mut self.ids)
    }

    /// Filtered view of the current board.
    pub fn search(&self, query: &str) -> SessionResult<Cow<'_, Board>> {
        Ok(projector::project(ready(&self.lifecycle)?, query))
    }

    pub fn export_document(&self) -> SessionResult<String> {
        Ok(export_document(ready(&self.lifecycle)?)?)
    }

    /// Replaces the whole board with an imported document.
    ///
    /// # Errors
    /// - `SessionError::Validation` for any invalid document; the current
    ///   board is left untouched.
    pub fn import_document(&mut self, text: &str) -> SessionResult<()> {
        ready(&self.lifecycle)?;
        let board = import_document(text).inspect_err(|err| {
            warn!("event=board_import module=session status=error error={err}");
        })?;

        info!(
            "event=board_import module=session status=ok columns={} cards={}",
            board.columns.len(),
            board.cards.len()
        );
        self.lifecycle = Lifecycle::Ready {
            board,
            origin: BoardOrigin::Import,
        };
        self.notify();
        Ok(())
    }

    fn commit(&mut self, next: Board) {
        if let Lifecycle::Ready { board, .. } = &mut self.lifecycle {
            if *board == next {
                return;
            }
            *board = next;
        }
        self.notify();
    }

    fn notify(&mut self) {
        let Lifecycle::Ready { board, .. } = &self.lifecycle else {
            return;
        };
        for observer in &mut self.observers {
            observer.board_changed(board);
        }
    }
}

fn ready(lifecycle: &Lifecycle) -> SessionResult<&Board> {
    match lifecycle {
        Lifecycle::Ready { board, .. } => Ok(board),
        _ => Err(SessionError::NotReady),
    }
}
