//! The game state store.
//!
//! ## GameState
//!
//! The authoritative record of a game:
//! - Four players' pieces (`PlayerMap<[Piece; 4]>`)
//! - Dice value and whether a roll is in progress
//! - Selection modes (pile = pocket piece, cell = board piece)
//! - Dice input lock, celebratory flag, winner
//! - `current_positions`, a denormalized index of on-board pieces
//!
//! ## Transitions
//!
//! State only changes through [`Transition`]s applied by
//! [`GameState::reduce`], a pure `(state, transition) -> state'` function.
//! A rejected transition leaves the previous state untouched, so readers
//! never observe half-applied writes. `current_positions` is backed by an
//! `im::Vector`, which keeps the copy-on-reduce cheap.

use im::Vector;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, instrument};

use super::error::{EngineError, IllegalMoveReason};
use super::piece::{Piece, PieceId, PlacedPiece, PIECES_PER_PLAYER};
use super::player::{PlayerId, PlayerMap};
use super::rng::DIE_FACES;
use crate::board::{travel_for_cell, Cell, HOME_TRAVEL};

/// Pieces sharing one cell. Four covers every reachable case inline.
pub type Occupants = SmallVec<[PieceId; 4]>;

/// A single atomic state change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Transition {
    /// Replace everything with the initial snapshot.
    ResetGame,
    /// A roll has started: dice marked rolled, input locked.
    BeginRoll,
    /// Record the roll outcome.
    SetDice(u8),
    EnterPileSelection(PlayerId),
    EnterCellSelection(PlayerId),
    /// Both selection modes off, input stays locked.
    ClearSelection,
    /// Unlock input and hand the turn to the given player.
    ReleaseTouch(PlayerId),
    SetPiece {
        player: PlayerId,
        piece: PieceId,
        pos: Cell,
        travel_count: u8,
    },
    SetFireworks(bool),
    SetWinner(Option<PlayerId>),
}

/// The complete state of one game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    pub(crate) players: PlayerMap<[Piece; PIECES_PER_PLAYER]>,
    pub(crate) chance_player: PlayerId,
    pub(crate) dice_no: u8,
    pub(crate) is_dice_rolled: bool,
    pub(crate) pile_selection_player: Option<PlayerId>,
    pub(crate) cell_selection_player: Option<PlayerId>,
    pub(crate) dice_touch_block: bool,
    pub(crate) current_positions: Vector<PlacedPiece>,
    pub(crate) fireworks: bool,
    pub(crate) winner: Option<PlayerId>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// The initial snapshot: every piece in its pocket, player 1 to roll.
    #[must_use]
    pub fn new() -> Self {
        Self {
            players: PlayerMap::new(|player| {
                std::array::from_fn(|slot| Piece::in_pocket(PieceId::at_slot(player, slot)))
            }),
            chance_player: PlayerId::ONE,
            dice_no: 1,
            is_dice_rolled: false,
            pile_selection_player: None,
            cell_selection_player: None,
            dice_touch_block: false,
            current_positions: Vector::new(),
            fireworks: false,
            winner: None,
        }
    }

    // === Selectors ===

    #[must_use]
    pub fn pieces(&self, player: PlayerId) -> &[Piece; PIECES_PER_PLAYER] {
        &self.players[player]
    }

    #[must_use]
    pub fn piece(&self, id: PieceId) -> &Piece {
        &self.players[id.owner()][id.slot()]
    }

    /// Every piece on the table, player by player.
    pub fn all_pieces(&self) -> impl Iterator<Item = &Piece> {
        self.players.iter().flat_map(|(_, pieces)| pieces.iter())
    }

    /// Whose turn it is.
    #[must_use]
    pub fn chance_player(&self) -> PlayerId {
        self.chance_player
    }

    #[must_use]
    pub fn dice_no(&self) -> u8 {
        self.dice_no
    }

    #[must_use]
    pub fn is_dice_rolled(&self) -> bool {
        self.is_dice_rolled
    }

    #[must_use]
    pub fn pile_selection_player(&self) -> Option<PlayerId> {
        self.pile_selection_player
    }

    #[must_use]
    pub fn cell_selection_player(&self) -> Option<PlayerId> {
        self.cell_selection_player
    }

    #[must_use]
    pub fn dice_touch_block(&self) -> bool {
        self.dice_touch_block
    }

    /// On-board pieces in placement order.
    #[must_use]
    pub fn current_positions(&self) -> &Vector<PlacedPiece> {
        &self.current_positions
    }

    #[must_use]
    pub fn fireworks(&self) -> bool {
        self.fireworks
    }

    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        self.winner
    }

    /// Pieces on `cell`, in `current_positions` order.
    #[must_use]
    pub fn occupants_at(&self, cell: Cell) -> Occupants {
        self.current_positions
            .iter()
            .filter(|placed| placed.pos == cell)
            .map(|placed| placed.id)
            .collect()
    }

    /// Has every piece of `player` reached home?
    #[must_use]
    pub fn has_finished(&self, player: PlayerId) -> bool {
        self.players[player].iter().all(Piece::is_home)
    }

    /// `current_positions` as it should be given the pieces alone.
    ///
    /// Entries already present keep their relative order; pieces missing
    /// from the index are appended in player order.
    #[must_use]
    pub fn derived_positions(&self) -> Vector<PlacedPiece> {
        let mut rebuilt: Vector<PlacedPiece> = Vector::new();
        let listed = self.current_positions.iter().map(|placed| placed.id);
        let unlisted = self.all_pieces().map(|piece| piece.id);
        for id in listed.chain(unlisted) {
            let piece = self.piece(id);
            if !piece.is_in_pocket() && !rebuilt.iter().any(|placed| placed.id == id) {
                rebuilt.push_back(PlacedPiece { id, pos: piece.pos });
            }
        }
        rebuilt
    }

    // === Transitions ===

    /// Apply `transition`, producing the next state.
    ///
    /// On error `self` is unchanged and no partial state escapes.
    pub fn reduce(&self, transition: &Transition) -> Result<GameState, EngineError> {
        let mut next = self.clone();
        match *transition {
            Transition::ResetGame => return Ok(GameState::new()),
            Transition::BeginRoll => {
                next.is_dice_rolled = true;
                next.dice_touch_block = true;
            }
            Transition::SetDice(n) => {
                if !(1..=DIE_FACES).contains(&n) {
                    return Err(EngineError::illegal(IllegalMoveReason::DiceOutOfRange(n)));
                }
                next.dice_no = n;
                next.is_dice_rolled = false;
            }
            Transition::EnterPileSelection(player) => {
                next.pile_selection_player = Some(player);
                next.dice_touch_block = true;
            }
            Transition::EnterCellSelection(player) => {
                next.cell_selection_player = Some(player);
                next.dice_touch_block = true;
            }
            Transition::ClearSelection => {
                next.pile_selection_player = None;
                next.cell_selection_player = None;
                next.dice_touch_block = true;
            }
            Transition::ReleaseTouch(player) => {
                next.dice_touch_block = false;
                next.is_dice_rolled = false;
                next.chance_player = player;
            }
            Transition::SetPiece {
                player,
                piece,
                pos,
                travel_count,
            } => next.place(player, piece, pos, travel_count)?,
            Transition::SetFireworks(on) => next.fireworks = on,
            Transition::SetWinner(winner) => next.winner = winner,
        }
        Ok(next)
    }

    fn place(
        &mut self,
        player: PlayerId,
        id: PieceId,
        pos: Cell,
        travel_count: u8,
    ) -> Result<(), EngineError> {
        if id.owner() != player {
            return Err(EngineError::unknown_piece(player, id));
        }
        if travel_count > HOME_TRAVEL {
            return Err(EngineError::illegal(IllegalMoveReason::TravelOverflow));
        }
        if travel_for_cell(player, pos)? != travel_count {
            return Err(EngineError::InvalidCell { player, cell: pos });
        }

        self.players[player][id.slot()] = Piece {
            id,
            pos,
            travel_count,
        };

        let existing = self.current_positions.iter().position(|placed| placed.id == id);
        match (existing, pos.is_pocket()) {
            (Some(index), true) => {
                self.current_positions.remove(index);
            }
            (Some(index), false) => {
                self.current_positions.set(index, PlacedPiece { id, pos });
            }
            (None, false) => self.current_positions.push_back(PlacedPiece { id, pos }),
            (None, true) => {}
        }

        self.pile_selection_player = None;
        Ok(())
    }
}

/// Owner of the current [`GameState`].
///
/// All writes go through [`GameStore::dispatch`]; reads borrow the state.
#[derive(Clone, Debug, Default)]
pub struct GameStore {
    state: GameState,
    revision: u64,
}

impl GameStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing state, e.g. a restored snapshot.
    #[must_use]
    pub fn from_state(state: GameState) -> Self {
        Self { state, revision: 0 }
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Number of transitions applied so far. Presentation can compare
    /// revisions instead of diffing states.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Apply one transition atomically.
    #[instrument(level = "trace", skip(self))]
    pub fn dispatch(&mut self, transition: Transition) -> Result<(), EngineError> {
        self.state = self.state.reduce(&transition)?;
        self.revision += 1;
        debug!(?transition, revision = self.revision, "state transition");
        Ok(())
    }

    /// Replace the whole state, e.g. after a restore.
    pub fn replace(&mut self, state: GameState) {
        self.state = state;
        self.revision += 1;
    }
}
