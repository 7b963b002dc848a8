//! Game rules: who may act, what a roll means, and how pieces move.
//!
//! - [`eligibility`]: which pieces can be chosen right now (pure)
//! - [`dice`]: roll outcome resolution and the [`RollSequence`]
//! - [`movement`]: the [`MoveSequence`], including capture and win detection
//! - [`turn`]: turn phases and the [`TurnController`]
//!
//! Sequences never touch state except through `GameStore::dispatch`.

pub mod dice;
pub mod eligibility;
pub mod movement;
pub mod sequence;
pub mod turn;

pub use dice::{resolve_roll, RollOutcome, RollSequence};
pub use eligibility::{check_selectable, is_selectable, selectable_pieces};
pub use movement::{MoveOutcome, MoveSequence};
pub use sequence::{Step, StepContext};
pub use turn::{TurnController, TurnPhase};
