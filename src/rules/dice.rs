//! Dice outcome resolution and the roll sequence.
//!
//! ## Outcome rules
//!
//! With no piece of the roller out on the board, only a 6 does anything:
//! it opens pile selection. Once a piece is out, the roll is playable only
//! if some board piece can advance by it without overshooting home. A 6
//! then opens pile and cell selection together, anything else opens cell
//! selection. An unplayable roll forfeits the turn after a cooldown.

use tracing::{info, instrument};

use crate::core::{EngineError, GameState, PlayerId, Transition};
use crate::signals::Signal;

use super::sequence::{Step, StepContext};
use super::turn::TurnPhase;

/// What a rolled value lets the roller do.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RollOutcome {
    /// Choose a pocket piece to bring out.
    PileSelection,
    /// Choose a pocket piece or a board piece.
    PileAndCellSelection,
    /// Choose a board piece to advance.
    CellSelection,
    /// Nothing can move; the turn passes.
    Forfeit,
}

impl RollOutcome {
    #[must_use]
    pub fn passes_turn(self) -> bool {
        self == RollOutcome::Forfeit
    }
}

/// Decide what rolling `dice` means for `player` in `state`.
#[must_use]
pub fn resolve_roll(state: &GameState, player: PlayerId, dice: u8) -> RollOutcome {
    let pieces = state.pieces(player);
    let any_out = pieces.iter().any(|p| p.is_travelling());

    if !any_out {
        return if dice == 6 {
            RollOutcome::PileSelection
        } else {
            RollOutcome::Forfeit
        };
    }

    let can_move = pieces.iter().any(|p| p.can_advance(dice));
    match (can_move, dice) {
        (false, _) => RollOutcome::Forfeit,
        (true, 6) => RollOutcome::PileAndCellSelection,
        (true, _) => RollOutcome::CellSelection,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum RollStage {
    Animate,
    Resolve,
    Pass,
    Finished,
}

/// One dice roll, from the start of the animation to the selection mode
/// (or the forfeit) it leads to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RollSequence {
    player: PlayerId,
    forced: Option<u8>,
    stage: RollStage,
    outcome: Option<(u8, RollOutcome)>,
}

impl RollSequence {
    /// A roll by `player`. `forced` bypasses the RNG; it must already be a
    /// valid die value.
    #[must_use]
    pub fn new(player: PlayerId, forced: Option<u8>) -> Self {
        Self {
            player,
            forced,
            stage: RollStage::Animate,
            outcome: None,
        }
    }

    #[must_use]
    pub fn player(&self) -> PlayerId {
        self.player
    }

    /// The value rolled and what it led to, once known.
    #[must_use]
    pub fn outcome(&self) -> Option<(u8, RollOutcome)> {
        self.outcome
    }

    /// Run the next step.
    pub fn step(&mut self, ctx: &mut StepContext<'_>) -> Result<Step, EngineError> {
        match self.stage {
            RollStage::Animate => {
                ctx.store.dispatch(Transition::BeginRoll)?;
                ctx.signals.emit(Signal::DiceRoll {
                    player: self.player,
                });
                self.stage = RollStage::Resolve;
                Ok(Step::Yield(ctx.pacing.roll_animation()))
            }
            RollStage::Resolve => self.resolve(ctx),
            RollStage::Pass => {
                let next = self.player.next();
                ctx.store.dispatch(Transition::ReleaseTouch(next))?;
                ctx.turn.hand_over(next)?;
                info!(from = %self.player, to = %next, "turn forfeited");
                self.stage = RollStage::Finished;
                Ok(Step::Done)
            }
            RollStage::Finished => Ok(Step::Done),
        }
    }

    #[instrument(level = "debug", skip(self, ctx), fields(player = %self.player))]
    fn resolve(&mut self, ctx: &mut StepContext<'_>) -> Result<Step, EngineError> {
        let dice = match self.forced {
            Some(value) => value,
            None => ctx.rng.roll_die(),
        };
        ctx.store.dispatch(Transition::SetDice(dice))?;
        ctx.turn.advance(TurnPhase::ResolvingOutcome)?;

        let outcome = resolve_roll(ctx.store.state(), self.player, dice);
        self.outcome = Some((dice, outcome));
        info!(dice, ?outcome, "dice resolved");

        let selection = match outcome {
            RollOutcome::PileSelection => {
                vec![Transition::EnterPileSelection(self.player)]
            }
            RollOutcome::PileAndCellSelection => vec![
                Transition::EnterPileSelection(self.player),
                Transition::EnterCellSelection(self.player),
            ],
            RollOutcome::CellSelection => {
                vec![Transition::EnterCellSelection(self.player)]
            }
            RollOutcome::Forfeit => {
                ctx.turn.advance(TurnPhase::TurnComplete)?;
                self.stage = RollStage::Pass;
                return Ok(Step::Yield(ctx.pacing.forfeit_cooldown()));
            }
        };

        for transition in selection {
            ctx.store.dispatch(transition)?;
        }
        ctx.turn.advance(TurnPhase::AwaitingSelection)?;
        self.stage = RollStage::Finished;
        Ok(Step::Done)
    }
}
