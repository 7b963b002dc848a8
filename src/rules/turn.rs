//! Turn phases.
//!
//! ```text
//! Idle -> Rolling -> ResolvingOutcome -> AwaitingSelection
//!                          |      ^              |
//!                          v      +--------------+
//!                    TurnComplete -> Idle
//! ```
//!
//! A roll moves `Idle` to `Rolling`, then to `ResolvingOutcome` once the
//! dice value is known. From there the turn either waits for a piece
//! choice or completes (forfeit). Choosing a piece resolves the move, and
//! a resolved move completes the turn. A won game stays in `TurnComplete`.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::{EngineError, GameState, IllegalMoveReason, PlayerId};

/// Where the current turn stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnPhase {
    Idle,
    Rolling,
    ResolvingOutcome,
    AwaitingSelection,
    TurnComplete,
}

impl TurnPhase {
    /// Is `self -> to` a legal edge?
    #[must_use]
    pub fn can_transition_to(self, to: TurnPhase) -> bool {
        use TurnPhase::*;
        matches!(
            (self, to),
            (Idle, Rolling)
                | (Rolling, ResolvingOutcome)
                | (ResolvingOutcome, AwaitingSelection)
                | (ResolvingOutcome, TurnComplete)
                | (AwaitingSelection, ResolvingOutcome)
                | (TurnComplete, Idle)
        )
    }
}

/// Tracks the phase of the current turn and whose turn it is.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnController {
    phase: TurnPhase,
    player: PlayerId,
}

impl Default for TurnController {
    fn default() -> Self {
        Self::new(PlayerId::ONE)
    }
}

impl TurnController {
    #[must_use]
    pub fn new(player: PlayerId) -> Self {
        Self {
            phase: TurnPhase::Idle,
            player,
        }
    }

    /// Controller matching a state that was not produced by this
    /// controller, e.g. a restored snapshot.
    #[must_use]
    pub fn resume(state: &GameState) -> Self {
        let phase = if state.winner().is_some() {
            TurnPhase::TurnComplete
        } else if state.pile_selection_player().is_some() || state.cell_selection_player().is_some()
        {
            TurnPhase::AwaitingSelection
        } else {
            TurnPhase::Idle
        };
        Self {
            phase,
            player: state.chance_player(),
        }
    }

    #[must_use]
    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    /// The player whose turn the controller is tracking.
    #[must_use]
    pub fn player(&self) -> PlayerId {
        self.player
    }

    /// Move to `to`, rejecting edges the turn structure does not have.
    pub fn advance(&mut self, to: TurnPhase) -> Result<(), EngineError> {
        if !self.phase.can_transition_to(to) {
            warn!(from = ?self.phase, ?to, "rejected turn phase change");
            return Err(EngineError::illegal(IllegalMoveReason::OutOfPhase));
        }
        debug!(from = ?self.phase, ?to, player = %self.player, "turn phase");
        self.phase = to;
        Ok(())
    }

    /// Complete the turn and hand it to `next` (possibly the same player).
    pub fn hand_over(&mut self, next: PlayerId) -> Result<(), EngineError> {
        if self.phase != TurnPhase::TurnComplete {
            self.advance(TurnPhase::TurnComplete)?;
        }
        self.advance(TurnPhase::Idle)?;
        self.player = next;
        Ok(())
    }
}
