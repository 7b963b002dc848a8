//! The command boundary and the cooperative scheduler.
//!
//! A [`Session`] owns one game: the store, the turn controller, the dice
//! RNG, the signal sink, the pacer and, optionally, persistence. Commands
//! from presentation are validated on entry and rejected with
//! `IllegalMove` when the turn state does not allow them; accepted rolls
//! and moves become a sequence that runs one step per [`Session::tick`].
//!
//! Only one sequence is ever in flight and it always runs to completion.
//! Any command submitted meanwhile is rejected.
//!
//! ## Example
//!
//! ```
//! use ludo_engine::core::PlayerId;
//! use ludo_engine::session::Session;
//!
//! let mut session = Session::headless(7);
//! session.request_roll(PlayerId::ONE, Some(6)).unwrap();
//!
//! let choices = session.selectable_pieces(PlayerId::ONE);
//! assert_eq!(choices.len(), 4);
//! session.request_move(PlayerId::ONE, choices[0]).unwrap();
//!
//! assert_eq!(session.state().current_positions().len(), 1);
//! assert_eq!(session.state().chance_player(), PlayerId::ONE);
//! ```

mod pacing;

pub use pacing::{Pacer, ThreadPacer, VirtualPacer};

use smallvec::SmallVec;
use std::time::Duration;
use tracing::{info, instrument, warn};

use crate::core::{
    Command, EngineConfig, EngineError, GameRng, GameState, GameStore, IllegalMoveReason, PieceId,
    PlayerId, Transition, DIE_FACES,
};
use crate::persistence::{SnapshotStore, Storage};
use crate::rules::{
    self, MoveOutcome, MoveSequence, RollOutcome, RollSequence, Step, StepContext,
    TurnController, TurnPhase,
};
use crate::signals::{Signal, SignalLog, SignalSink};

/// The sequence currently in flight.
#[derive(Clone, Debug, PartialEq, Eq)]
enum Task {
    Roll(RollSequence),
    Move(MoveSequence),
}

impl Task {
    fn step(&mut self, ctx: &mut StepContext<'_>) -> Result<Step, EngineError> {
        match self {
            Task::Roll(roll) => roll.step(ctx),
            Task::Move(mv) => mv.step(ctx),
        }
    }
}

/// One game, driven by commands.
pub struct Session<S: SignalSink = SignalLog, P: Pacer = VirtualPacer> {
    config: EngineConfig,
    store: GameStore,
    turn: TurnController,
    rng: GameRng,
    signals: S,
    pacer: P,
    saves: Option<SnapshotStore<Box<dyn Storage>>>,
    task: Option<Task>,
    last_roll: Option<(u8, RollOutcome)>,
    last_move: Option<MoveOutcome>,
}

impl Session<SignalLog, VirtualPacer> {
    /// In-memory session with a seeded RNG, a recording signal log and
    /// virtual time. For tests and headless simulation.
    #[must_use]
    pub fn headless(seed: u64) -> Self {
        Self::new(
            EngineConfig::default().with_seed(seed),
            SignalLog::new(),
            VirtualPacer::new(),
        )
    }
}

impl<S: SignalSink, P: Pacer> Session<S, P> {
    /// A fresh game. Dice are seeded from `config.seed` or OS entropy.
    pub fn new(config: EngineConfig, signals: S, pacer: P) -> Self {
        let rng = config.seed.map_or_else(GameRng::from_entropy, GameRng::new);
        info!(seed = rng.seed(), "session created");
        Self {
            config,
            store: GameStore::new(),
            turn: TurnController::default(),
            rng,
            signals,
            pacer,
            saves: None,
            task: None,
            last_roll: None,
            last_move: None,
        }
    }

    /// Attach persistence, restoring the saved game if there is one and
    /// saving the current game otherwise.
    pub fn with_storage(mut self, storage: impl Storage + 'static) -> Result<Self, EngineError> {
        let boxed: Box<dyn Storage> = Box::new(storage);
        let saves = SnapshotStore::new(boxed, self.config.storage.clone());

        match saves.load()? {
            Some((restored, rng)) => {
                self.turn = TurnController::resume(&restored.state);
                self.store = GameStore::from_state(restored.state);
                if let Some(rng) = rng {
                    self.rng = rng;
                }
                self.saves = Some(saves);
                if !restored.repairs.is_empty() {
                    self.save()?;
                }
            }
            None => {
                self.saves = Some(saves);
                self.save()?;
            }
        }
        Ok(self)
    }

    // === Queries ===

    #[must_use]
    pub fn state(&self) -> &GameState {
        self.store.state()
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn phase(&self) -> TurnPhase {
        self.turn.phase()
    }

    /// Is a roll or move still in flight?
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.task.is_some()
    }

    #[must_use]
    pub fn signals(&self) -> &S {
        &self.signals
    }

    pub fn signals_mut(&mut self) -> &mut S {
        &mut self.signals
    }

    #[must_use]
    pub fn pacer(&self) -> &P {
        &self.pacer
    }

    #[must_use]
    pub fn rng(&self) -> &GameRng {
        &self.rng
    }

    /// Pieces of `player` that can be chosen right now.
    #[must_use]
    pub fn selectable_pieces(&self, player: PlayerId) -> SmallVec<[PieceId; 4]> {
        rules::selectable_pieces(self.state(), player)
    }

    #[must_use]
    pub fn is_selectable(&self, piece: PieceId) -> bool {
        rules::is_selectable(self.state(), piece)
    }

    /// Value and outcome of the most recently completed roll.
    #[must_use]
    pub fn last_roll(&self) -> Option<(u8, RollOutcome)> {
        self.last_roll
    }

    /// Outcome of the most recently completed move.
    #[must_use]
    pub fn last_move(&self) -> Option<MoveOutcome> {
        self.last_move
    }

    // === Commands ===

    /// Roll and run the roll to completion.
    pub fn request_roll(&mut self, player: PlayerId, forced: Option<u8>) -> Result<(), EngineError> {
        self.submit(Command::RequestRoll { player, forced })?;
        self.run_until_idle()
    }

    /// Move `piece` and run the move to completion.
    pub fn request_move(&mut self, player: PlayerId, piece: PieceId) -> Result<(), EngineError> {
        self.submit(Command::RequestMove { player, piece })?;
        self.run_until_idle()
    }

    pub fn request_new_game(&mut self) -> Result<(), EngineError> {
        self.submit(Command::RequestNewGame)
    }

    pub fn acknowledge_fireworks(&mut self) -> Result<(), EngineError> {
        self.submit(Command::AcknowledgeFireworks)
    }

    /// Validate `command` and start whatever it asks for.
    ///
    /// Rolls and moves only install their sequence; drive it with
    /// [`Session::tick`] or [`Session::run_until_idle`]. New-game and
    /// fireworks acknowledgements take effect immediately.
    #[instrument(skip(self))]
    pub fn submit(&mut self, command: Command) -> Result<(), EngineError> {
        let result = self.accept(command);
        if let Err(err) = &result {
            warn!(%err, "command rejected");
        }
        result
    }

    fn accept(&mut self, command: Command) -> Result<(), EngineError> {
        if self.task.is_some() {
            return Err(EngineError::illegal(IllegalMoveReason::SequenceInFlight));
        }

        match command {
            Command::RequestRoll { player, forced } => {
                self.check_roll(player, forced)?;
                self.turn.advance(TurnPhase::Rolling)?;
                self.task = Some(Task::Roll(RollSequence::new(player, forced)));
            }
            Command::RequestMove { player, piece } => {
                if self.state().winner().is_some() {
                    return Err(EngineError::illegal(IllegalMoveReason::GameOver));
                }
                let sequence = MoveSequence::new(self.state(), player, piece)?;
                self.task = Some(Task::Move(sequence));
            }
            Command::RequestNewGame => self.new_game()?,
            Command::AcknowledgeFireworks => {
                self.store.dispatch(Transition::SetFireworks(false))?;
                self.save()?;
            }
        }
        Ok(())
    }

    fn check_roll(&self, player: PlayerId, forced: Option<u8>) -> Result<(), EngineError> {
        let state = self.state();
        let reason = if state.winner().is_some() {
            IllegalMoveReason::GameOver
        } else if state.chance_player() != player {
            IllegalMoveReason::NotYourTurn
        } else if state.dice_touch_block() {
            IllegalMoveReason::DiceLocked
        } else if state.is_dice_rolled() {
            IllegalMoveReason::AlreadyRolled
        } else {
            match forced {
                Some(n) if !(1..=DIE_FACES).contains(&n) => IllegalMoveReason::DiceOutOfRange(n),
                _ => return Ok(()),
            }
        };
        Err(EngineError::illegal(reason))
    }

    fn new_game(&mut self) -> Result<(), EngineError> {
        self.store.dispatch(Transition::ResetGame)?;
        self.turn = TurnController::default();
        self.last_roll = None;
        self.last_move = None;
        self.signals.emit(Signal::GameStart);
        if let Some(saves) = self.saves.as_mut() {
            saves.clear()?;
        }
        self.save()?;
        info!("new game");
        Ok(())
    }

    // === Scheduling ===

    /// Run one step of the sequence in flight.
    ///
    /// Returns the pause to wait before the next step, or `None` once
    /// nothing is in flight. A failing step aborts its sequence.
    pub fn tick(&mut self) -> Result<Option<Duration>, EngineError> {
        let Some(task) = self.task.as_mut() else {
            return Ok(None);
        };
        let mut ctx = StepContext {
            store: &mut self.store,
            turn: &mut self.turn,
            rng: &mut self.rng,
            signals: &mut self.signals,
            pacing: &self.config.pacing,
        };

        match task.step(&mut ctx) {
            Ok(Step::Yield(delay)) => Ok(Some(delay)),
            Ok(Step::Done) => {
                match self.task.take() {
                    Some(Task::Roll(roll)) => self.last_roll = roll.outcome(),
                    Some(Task::Move(mv)) => self.last_move = mv.outcome(),
                    None => {}
                }
                self.save()?;
                Ok(None)
            }
            Err(err) => {
                warn!(%err, "sequence aborted");
                self.task = None;
                self.recover()?;
                Err(err)
            }
        }
    }

    /// Tick until nothing is in flight, pausing through the pacer.
    pub fn run_until_idle(&mut self) -> Result<(), EngineError> {
        while let Some(delay) = self.tick()? {
            self.pacer.pause(delay);
        }
        Ok(())
    }

    /// Unlock input left locked by an aborted sequence.
    fn recover(&mut self) -> Result<(), EngineError> {
        let state = self.store.state();
        let stuck = state.dice_touch_block()
            && state.pile_selection_player().is_none()
            && state.cell_selection_player().is_none()
            && state.winner().is_none();
        if stuck {
            let player = state.chance_player();
            self.store.dispatch(Transition::ReleaseTouch(player))?;
        }
        self.turn = TurnController::resume(self.store.state());
        Ok(())
    }

    /// Save the current game, if persistence is attached.
    pub fn save(&mut self) -> Result<(), EngineError> {
        if let Some(saves) = self.saves.as_mut() {
            saves.save(self.store.state(), &self.rng)?;
        }
        Ok(())
    }
}
