//! # ludo-engine
//!
//! Rules engine for a four-player Ludo variant.
//!
//! ## Design Principles
//!
//! 1. **One Store**: All game data lives in a single [`GameState`]. Every
//!    write is a named [`Transition`] dispatched through the [`GameStore`];
//!    a rejected transition leaves the state untouched.
//!
//! 2. **Explicit Turn Phases**: Who may act, and how, is tracked by a
//!    [`TurnController`] whose illegal edges are errors, not silent no-ops.
//!
//! 3. **Stepwise Sequences**: Rolls and moves are animated, so they run as
//!    small step machines driven by a cooperative scheduler, one step per
//!    tick, with a pacing delay between steps.
//!
//! ## Architecture
//!
//! - **Presentation-agnostic**: The engine never draws or plays sound. It
//!   emits [`Signal`]s and exposes selectors; the host renders them.
//!
//! - **Persistent Data Structures**: The occupancy index is an `im`
//!   vector so each transition clones the state cheaply.
//!
//! - **Deterministic Dice**: A seeded ChaCha RNG whose position is saved
//!   alongside the game, so a restored game rolls the same dice.
//!
//! ## Modules
//!
//! - `board`: Cells and the static board topology
//! - `core`: Players, pieces, state and transitions, RNG, config, errors
//! - `rules`: Eligibility, roll resolution, turn phases, movement
//! - `signals`: Sound-signal contract and sinks
//! - `persistence`: Storage backends and the snapshot document
//! - `session`: Command boundary and scheduler

pub mod board;
pub mod core;
pub mod persistence;
pub mod rules;
pub mod session;
pub mod signals;

// Re-export commonly used types
pub use crate::board::{Cell, HOME_TRAVEL};

pub use crate::core::{
    Command, EngineConfig, EngineError, GameRng, GameState, GameStore, IllegalMoveReason,
    PacingConfig, Piece, PieceId, PlacedPiece, PlayerId, PlayerMap, StorageConfig, StoreError,
    Transition,
};

pub use crate::rules::{MoveOutcome, RollOutcome, TurnController, TurnPhase};

pub use crate::signals::{Signal, SignalLog, SignalSink, TracingSink};

pub use crate::persistence::{FileStore, MemoryStore, Snapshot, SnapshotStore, Storage};

pub use crate::session::{Pacer, Session, ThreadPacer, VirtualPacer};
