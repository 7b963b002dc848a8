//! Core engine types: players, pieces, state, commands, RNG, configuration.
//!
//! This module holds the data every other layer reads. The game state is
//! only ever written through [`Transition`]s, via [`GameStore::dispatch`].

pub mod action;
pub mod config;
pub mod error;
pub mod piece;
pub mod player;
pub mod rng;
pub mod state;

pub use action::Command;
pub use config::{EngineConfig, PacingConfig, StorageConfig};
pub use error::{EngineError, IllegalMoveReason, StoreError};
pub use piece::{Piece, PieceId, PlacedPiece, PIECES_PER_PLAYER};
pub use player::{PlayerId, PlayerMap, PLAYER_COUNT};
pub use rng::{GameRng, GameRngState, DIE_FACES};
pub use state::{GameState, GameStore, Occupants, Transition};
