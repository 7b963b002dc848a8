//! Engine error types.
//!
//! Three rule errors cover everything a command can get wrong:
//! - `InvalidCell`: a topology query outside the player's path
//! - `UnknownPiece`: a piece id the addressed player does not own
//! - `IllegalMove`: a request the current turn state does not allow
//!
//! None of them is fatal. The store is left in its last consistent state
//! and the caller may simply issue the next valid command.

use derive_more::{Display, Error, From};
use tracing::instrument;

use super::piece::PieceId;
use super::player::PlayerId;
use crate::board::Cell;

/// Why a roll or move request was turned away.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display)]
pub enum IllegalMoveReason {
    #[display("the game already has a winner")]
    GameOver,
    #[display("a roll or move is still being resolved")]
    SequenceInFlight,
    #[display("it is not this player's turn")]
    NotYourTurn,
    #[display("dice input is locked")]
    DiceLocked,
    #[display("the dice have already been rolled")]
    AlreadyRolled,
    #[display("dice value {_0} is outside 1..=6")]
    DiceOutOfRange(u8),
    #[display("the piece cannot be chosen right now")]
    NotSelectable,
    #[display("travel count would exceed 57")]
    TravelOverflow,
    #[display("the turn is not in a phase that allows this")]
    OutOfPhase,
}

/// Crate-wide error.
#[derive(Debug, Clone, PartialEq, Display, Error, From)]
pub enum EngineError {
    #[display("cell {cell} is not on the path of {player}")]
    InvalidCell { player: PlayerId, cell: Cell },

    #[display("{player} has no piece {piece}")]
    UnknownPiece { player: PlayerId, piece: String },

    #[display("illegal move: {reason}")]
    IllegalMove { reason: IllegalMoveReason },

    #[display("{_0}")]
    #[from]
    Persistence(StoreError),

    #[display("configuration error: {message}")]
    Config { message: String },
}

impl EngineError {
    /// Shorthand for an `IllegalMove` with the given reason.
    #[must_use]
    pub fn illegal(reason: IllegalMoveReason) -> Self {
        Self::IllegalMove { reason }
    }

    /// `UnknownPiece` for a typed id.
    #[must_use]
    pub fn unknown_piece(player: PlayerId, piece: PieceId) -> Self {
        Self::UnknownPiece {
            player,
            piece: piece.to_string(),
        }
    }
}

/// Persistence error with location tracking.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("storage error: {} at {}:{}", message, file, line)]
pub struct StoreError {
    pub message: String,
    pub line: u32,
    pub file: &'static str,
}

impl StoreError {
    /// Creates a new storage error at the caller's location.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<std::io::Error> for StoreError {
    #[track_caller]
    fn from(err: std::io::Error) -> Self {
        Self::new(format!("I/O error: {err}"))
    }
}

impl From<serde_json::Error> for StoreError {
    #[track_caller]
    fn from(err: serde_json::Error) -> Self {
        Self::new(format!("snapshot encoding error: {err}"))
    }
}
