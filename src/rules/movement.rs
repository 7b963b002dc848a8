//! The movement engine.
//!
//! A [`MoveSequence`] carries out one chosen piece's move, one cell per
//! step:
//!
//! 1. **Lock**: both selection modes cleared, input stays locked.
//! 2. **Enter** (pocket piece): placed on its starting point, same player
//!    rolls again.
//! 3. **Advance** (board piece): `dice` single-cell steps along the
//!    owner's path.
//! 4. **Resolve**: on a capture-free destination nothing is captured.
//!    Otherwise every other player's piece on the destination is captured.
//! 5. **Capture**: each captured piece walks backward to its starting point,
//!    one cell per step, then drops into its pocket.
//! 6. **Finish**: turn hand-off, home arrival and the win check.
//!
//! The moving piece is re-read from the store on every step.

use smallvec::SmallVec;
use std::time::Duration;
use tracing::{debug, info, instrument};

use crate::board::{is_capture_free, next_cell, starting_point, Cell, HOME_TRAVEL};
use crate::core::{EngineError, GameState, PieceId, PlayerId, Transition};
use crate::signals::Signal;

use super::eligibility::check_selectable;
use super::sequence::{Step, StepContext};
use super::turn::TurnPhase;

/// How a finished move ended the turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MoveOutcome {
    /// A pocket piece came out; the same player rolls again.
    Entered,
    /// At least one piece was captured; the mover rolls again.
    Captured,
    /// The piece reached home; the mover rolls again.
    ReachedHome,
    /// The mover's fourth piece reached home.
    Won,
    /// An ordinary move; `next` holds the turn now.
    Moved { next: PlayerId },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum MoveStage {
    Lock,
    Enter,
    Advance,
    Resolve,
    Capture,
    Finished,
}

/// One move of one piece.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveSequence {
    player: PlayerId,
    piece: PieceId,
    dice: u8,
    stage: MoveStage,
    remaining: u8,
    victims: SmallVec<[PieceId; 4]>,
    victim_started: bool,
    captured: bool,
    outcome: Option<MoveOutcome>,
}

impl MoveSequence {
    /// Validate a move request against `state` and build its sequence.
    ///
    /// Fails with `UnknownPiece` when `player` does not own `piece`, and
    /// with `IllegalMove` when the piece is not selectable right now.
    pub fn new(state: &GameState, player: PlayerId, piece: PieceId) -> Result<Self, EngineError> {
        check_selectable(state, player, piece)?;
        let dice = state.dice_no();
        Ok(Self {
            player,
            piece,
            dice,
            stage: MoveStage::Lock,
            remaining: dice,
            victims: SmallVec::new(),
            victim_started: false,
            captured: false,
            outcome: None,
        })
    }

    #[must_use]
    pub fn player(&self) -> PlayerId {
        self.player
    }

    #[must_use]
    pub fn piece(&self) -> PieceId {
        self.piece
    }

    /// How the move ended, once it has.
    #[must_use]
    pub fn outcome(&self) -> Option<MoveOutcome> {
        self.outcome
    }

    /// Run the next step.
    pub fn step(&mut self, ctx: &mut StepContext<'_>) -> Result<Step, EngineError> {
        match self.stage {
            MoveStage::Lock => self.lock(ctx),
            MoveStage::Enter => self.enter(ctx),
            MoveStage::Advance => self.advance(ctx),
            MoveStage::Resolve => self.resolve(ctx),
            MoveStage::Capture => self.capture_step(ctx),
            MoveStage::Finished => Ok(Step::Done),
        }
    }

    fn lock(&mut self, ctx: &mut StepContext<'_>) -> Result<Step, EngineError> {
        ctx.turn.advance(TurnPhase::ResolvingOutcome)?;
        ctx.store.dispatch(Transition::ClearSelection)?;
        self.stage = if ctx.store.state().piece(self.piece).is_in_pocket() {
            MoveStage::Enter
        } else {
            MoveStage::Advance
        };
        Ok(Step::Yield(Duration::ZERO))
    }

    fn enter(&mut self, ctx: &mut StepContext<'_>) -> Result<Step, EngineError> {
        let start = starting_point(self.player);
        ctx.store.dispatch(Transition::SetPiece {
            player: self.player,
            piece: self.piece,
            pos: start,
            travel_count: 1,
        })?;
        ctx.signals.emit(Signal::PileMove {
            piece: self.piece,
            pos: start,
        });
        info!(piece = %self.piece, cell = %start, "piece entered the board");
        self.complete(ctx, MoveOutcome::Entered, self.player)
    }

    fn advance(&mut self, ctx: &mut StepContext<'_>) -> Result<Step, EngineError> {
        let current = *ctx.store.state().piece(self.piece);
        let next = next_cell(self.player, current.pos)?;
        let travel_count = current.travel_count + 1;
        ctx.store.dispatch(Transition::SetPiece {
            player: self.player,
            piece: self.piece,
            pos: next,
            travel_count,
        })?;
        ctx.signals.emit(Signal::PileMove {
            piece: self.piece,
            pos: next,
        });
        debug!(piece = %self.piece, cell = %next, travel_count, "step");

        self.remaining -= 1;
        if self.remaining == 0 {
            self.stage = MoveStage::Resolve;
        }
        Ok(Step::Yield(ctx.pacing.move_step()))
    }

    #[instrument(level = "debug", skip(self, ctx), fields(piece = %self.piece))]
    fn resolve(&mut self, ctx: &mut StepContext<'_>) -> Result<Step, EngineError> {
        let state = ctx.store.state();
        let destination = state.piece(self.piece).pos;

        if is_capture_free(destination) {
            ctx.signals.emit(Signal::SafeSpot { cell: destination });
            return self.finish(ctx);
        }

        self.victims = state
            .occupants_at(destination)
            .into_iter()
            .filter(|id| id.owner() != self.player)
            .collect();

        if self.victims.is_empty() {
            return self.finish(ctx);
        }

        info!(cell = %destination, victims = self.victims.len(), "capture");
        self.captured = true;
        self.stage = MoveStage::Capture;
        self.capture_step(ctx)
    }

    /// Walk the front victim one cell back towards its starting point.
    fn capture_step(&mut self, ctx: &mut StepContext<'_>) -> Result<Step, EngineError> {
        let Some(&victim) = self.victims.first() else {
            return self.finish(ctx);
        };
        let owner = victim.owner();
        let current = *ctx.store.state().piece(victim);

        if !self.victim_started {
            self.victim_started = true;
            ctx.signals.emit(Signal::Collide {
                victim,
                cell: current.pos,
            });
        }

        if current.pos == starting_point(owner) || !current.pos.is_ring() {
            ctx.store.dispatch(Transition::SetPiece {
                player: owner,
                piece: victim,
                pos: Cell::POCKET,
                travel_count: 0,
            })?;
            debug!(piece = %victim, "sent back to pocket");
            self.victims.remove(0);
            self.victim_started = false;
            if self.victims.is_empty() {
                return self.finish(ctx);
            }
        } else {
            ctx.store.dispatch(Transition::SetPiece {
                player: owner,
                piece: victim,
                pos: current.pos.ring_pred(),
                travel_count: current.travel_count.saturating_sub(1),
            })?;
        }
        Ok(Step::Yield(ctx.pacing.capture_step()))
    }

    fn finish(&mut self, ctx: &mut StepContext<'_>) -> Result<Step, EngineError> {
        if self.captured {
            return self.complete(ctx, MoveOutcome::Captured, self.player);
        }

        let mover = *ctx.store.state().piece(self.piece);
        if mover.travel_count == HOME_TRAVEL {
            ctx.signals.emit(Signal::HomeWin { piece: self.piece });
            info!(piece = %self.piece, "piece reached home");

            if ctx.store.state().has_finished(self.player) {
                ctx.store.dispatch(Transition::SetWinner(Some(self.player)))?;
                ctx.signals.emit(Signal::Cheer {
                    winner: self.player,
                });
                ctx.turn.advance(TurnPhase::TurnComplete)?;
                info!(winner = %self.player, "game won");
                self.outcome = Some(MoveOutcome::Won);
                self.stage = MoveStage::Finished;
                return Ok(Step::Done);
            }

            ctx.store.dispatch(Transition::SetFireworks(true))?;
            return self.complete(ctx, MoveOutcome::ReachedHome, self.player);
        }

        let next = if self.dice == 6 {
            self.player
        } else {
            self.player.next()
        };
        self.complete(ctx, MoveOutcome::Moved { next }, next)
    }

    fn complete(
        &mut self,
        ctx: &mut StepContext<'_>,
        outcome: MoveOutcome,
        next: PlayerId,
    ) -> Result<Step, EngineError> {
        ctx.store.dispatch(Transition::ReleaseTouch(next))?;
        ctx.turn.hand_over(next)?;
        if next == self.player {
            info!(player = %next, ?outcome, "bonus turn");
        } else {
            info!(from = %self.player, to = %next, "turn passed");
        }
        self.outcome = Some(outcome);
        self.stage = MoveStage::Finished;
        Ok(Step::Done)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GameRng, GameStore, PacingConfig};
    use crate::rules::TurnController;
    use crate::signals::SignalLog;

    fn id(s: &str) -> PieceId {
        s.parse().unwrap()
    }

    fn store_with(pieces: &[(&str, u16, u8)], dice: u8, player: PlayerId) -> GameStore {
        let mut store = GameStore::new();
        store.dispatch(Transition::ReleaseTouch(player)).unwrap();
        for &(piece, pos, travel_count) in pieces {
            let piece = id(piece);
            store
                .dispatch(Transition::SetPiece {
                    player: piece.owner(),
                    piece,
                    pos: Cell(pos),
                    travel_count,
                })
                .unwrap();
        }
        store.dispatch(Transition::SetDice(dice)).unwrap();
        if dice == 6 {
            store.dispatch(Transition::EnterPileSelection(player)).unwrap();
        }
        store.dispatch(Transition::EnterCellSelection(player)).unwrap();
        store
    }

    fn run(store: &mut GameStore, player: PlayerId, piece: &str) -> (MoveSequence, SignalLog) {
        let mut turn = TurnController::resume(store.state());
        let mut rng = GameRng::new(0);
        let mut log = SignalLog::new();
        let pacing = PacingConfig::instant();
        let mut mv = MoveSequence::new(store.state(), player, id(piece)).unwrap();
        let mut ctx = StepContext {
            store,
            turn: &mut turn,
            rng: &mut rng,
            signals: &mut log,
            pacing: &pacing,
        };
        while !mv.step(&mut ctx).unwrap().is_done() {}
        (mv, log)
    }

    #[test]
    fn test_plain_move_passes_turn() {
        let mut store = store_with(&[("A1", 10, 10)], 3, PlayerId::ONE);
        let (mv, log) = run(&mut store, PlayerId::ONE, "A1");

        let state = store.state();
        assert_eq!(state.piece(id("A1")).pos, Cell(13));
        assert_eq!(state.piece(id("A1")).travel_count, 13);
        assert_eq!(state.chance_player(), PlayerId::TWO);
        assert!(!state.dice_touch_block());
        assert_eq!(state.cell_selection_player(), None);
        assert_eq!(mv.outcome(), Some(MoveOutcome::Moved { next: PlayerId::TWO }));
        assert_eq!(log.count("pile_move"), 3);
    }

    #[test]
    fn test_six_keeps_turn() {
        let mut store = store_with(&[("B1", 14, 1)], 6, PlayerId::TWO);
        let (mv, _) = run(&mut store, PlayerId::TWO, "B1");

        assert_eq!(store.state().chance_player(), PlayerId::TWO);
        assert_eq!(store.state().piece(id("B1")).pos, Cell(20));
        assert_eq!(mv.outcome(), Some(MoveOutcome::Moved { next: PlayerId::TWO }));
    }

    #[test]
    fn test_pocket_exit() {
        let mut store = store_with(&[], 6, PlayerId::THREE);
        let (mv, log) = run(&mut store, PlayerId::THREE, "C2");

        let state = store.state();
        assert_eq!(state.piece(id("C2")).pos, Cell(27));
        assert_eq!(state.piece(id("C2")).travel_count, 1);
        assert_eq!(state.chance_player(), PlayerId::THREE);
        assert_eq!(state.pile_selection_player(), None);
        assert_eq!(state.cell_selection_player(), None);
        assert!(!state.dice_touch_block());
        assert_eq!(mv.outcome(), Some(MoveOutcome::Entered));
        assert_eq!(log.names(), vec!["pile_move"]);
    }

    #[test]
    fn test_capture_walks_victim_home() {
        let mut store = store_with(&[("A1", 17, 17), ("B1", 20, 7)], 3, PlayerId::ONE);
        let (mv, log) = run(&mut store, PlayerId::ONE, "A1");

        let state = store.state();
        assert_eq!(state.piece(id("A1")).pos, Cell(20));
        assert!(state.piece(id("B1")).is_in_pocket());
        assert_eq!(state.piece(id("B1")).travel_count, 0);
        assert_eq!(state.occupants_at(Cell(20)).as_slice(), &[id("A1")]);
        assert_eq!(state.chance_player(), PlayerId::ONE);
        assert!(!state.dice_touch_block());
        assert_eq!(mv.outcome(), Some(MoveOutcome::Captured));
        assert_eq!(log.count("collide"), 1);
        assert!(!log.contains("safe_spot"));
    }

    #[test]
    fn test_safe_spot_blocks_capture() {
        let mut store = store_with(&[("A1", 6, 6), ("C1", 9, 35)], 3, PlayerId::ONE);
        let (_, log) = run(&mut store, PlayerId::ONE, "A1");

        let state = store.state();
        assert_eq!(state.piece(id("C1")).pos, Cell(9));
        assert_eq!(state.occupants_at(Cell(9)).len(), 2);
        assert_eq!(log.count("safe_spot"), 1);
        assert_eq!(log.count("collide"), 0);
        assert_eq!(state.chance_player(), PlayerId::TWO);
    }

    #[test]
    fn test_turning_point_branch() {
        let mut store = store_with(&[("A1", 50, 50)], 3, PlayerId::ONE);
        run(&mut store, PlayerId::ONE, "A1");

        let piece = *store.state().piece(id("A1"));
        assert_eq!(piece.pos, Cell(112));
        assert_eq!(piece.travel_count, 53);
    }

    #[test]
    fn test_home_arrival_sets_fireworks() {
        let mut store = store_with(&[("A1", 114, 55)], 2, PlayerId::ONE);
        let (mv, log) = run(&mut store, PlayerId::ONE, "A1");

        let state = store.state();
        assert!(state.piece(id("A1")).is_home());
        assert!(state.fireworks());
        assert_eq!(state.winner(), None);
        assert_eq!(state.chance_player(), PlayerId::ONE);
        assert_eq!(mv.outcome(), Some(MoveOutcome::ReachedHome));
        assert!(log.contains("home_win"));
        assert!(!log.contains("cheer"));
    }

    #[test]
    fn test_last_piece_home_wins() {
        let mut store = store_with(
            &[("D1", 446, 57), ("D2", 446, 57), ("D3", 446, 57), ("D4", 445, 56)],
            1,
            PlayerId::FOUR,
        );
        let (mv, log) = run(&mut store, PlayerId::FOUR, "D4");

        let state = store.state();
        assert_eq!(state.winner(), Some(PlayerId::FOUR));
        assert!(state.dice_touch_block());
        assert_eq!(mv.outcome(), Some(MoveOutcome::Won));
        assert_eq!(log.names().last(), Some(&"cheer"));
    }
}
