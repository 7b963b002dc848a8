//! The serialized game document.
//!
//! The document is flat and keyed by player and turn fields:
//!
//! ```json
//! {
//!   "player1": [{"id": "A1", "pos": 0, "travelCount": 0}, ...],
//!   "player2": [...], "player3": [...], "player4": [...],
//!   "chancePlayer": 1, "diceNo": 1, "isDiceRolled": false,
//!   "pileSelectionPlayer": -1, "cellSelectionPlayer": -1,
//!   "diceTouchBlock": false, "currentPositions": [],
//!   "fireworks": false, "winner": null
//! }
//! ```
//!
//! `-1` stands for "no player" in the selection fields. Restoring checks
//! every piece against the board topology before accepting a document.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::board::travel_for_cell;
use crate::core::{
    GameState, Piece, PieceId, PlacedPiece, PlayerId, StoreError, DIE_FACES, PIECES_PER_PLAYER,
};

/// Wire form of a [`GameState`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub player1: Vec<Piece>,
    pub player2: Vec<Piece>,
    pub player3: Vec<Piece>,
    pub player4: Vec<Piece>,
    pub chance_player: PlayerId,
    pub dice_no: u8,
    pub is_dice_rolled: bool,
    pub pile_selection_player: i8,
    pub cell_selection_player: i8,
    pub dice_touch_block: bool,
    pub current_positions: Vec<PlacedPiece>,
    pub fireworks: bool,
    pub winner: Option<PlayerId>,
}

/// A fix applied while restoring a snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Repair {
    /// `currentPositions` disagreed with the pieces and was rebuilt.
    RebuiltPositions,
    /// Input was locked with nothing pending; it was released to the
    /// chance player.
    ReleasedTouch,
}

/// A validated state plus whatever had to be fixed to get it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Restored {
    pub state: GameState,
    pub repairs: Vec<Repair>,
}

fn selection_to_wire(player: Option<PlayerId>) -> i8 {
    player.map_or(-1, |p| p.number() as i8)
}

fn selection_from_wire(field: &str, value: i8) -> Result<Option<PlayerId>, StoreError> {
    match value {
        -1 => Ok(None),
        n => u8::try_from(n)
            .ok()
            .and_then(PlayerId::from_number)
            .map(Some)
            .ok_or_else(|| StoreError::new(format!("{field} must be -1 or 1..=4, got {n}"))),
    }
}

impl From<&GameState> for Snapshot {
    fn from(state: &GameState) -> Self {
        let pieces = |player: PlayerId| state.pieces(player).to_vec();
        Self {
            player1: pieces(PlayerId::ONE),
            player2: pieces(PlayerId::TWO),
            player3: pieces(PlayerId::THREE),
            player4: pieces(PlayerId::FOUR),
            chance_player: state.chance_player(),
            dice_no: state.dice_no(),
            is_dice_rolled: state.is_dice_rolled(),
            pile_selection_player: selection_to_wire(state.pile_selection_player()),
            cell_selection_player: selection_to_wire(state.cell_selection_player()),
            dice_touch_block: state.dice_touch_block(),
            current_positions: state.current_positions().iter().copied().collect(),
            fireworks: state.fireworks(),
            winner: state.winner(),
        }
    }
}

impl Snapshot {
    /// Parse a JSON document.
    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, StoreError> {
        Ok(serde_json::to_string(self)?)
    }

    fn player_pieces(&self, player: PlayerId) -> &[Piece] {
        match player.index() {
            0 => &self.player1,
            1 => &self.player2,
            2 => &self.player3,
            _ => &self.player4,
        }
    }

    /// Validate the document and turn it back into a [`GameState`],
    /// repairing recoverable inconsistencies.
    pub fn restore(&self) -> Result<Restored, StoreError> {
        let mut state = GameState::new();

        for player in PlayerId::all() {
            let pieces = self.player_pieces(player);
            if pieces.len() != PIECES_PER_PLAYER {
                return Err(StoreError::new(format!(
                    "player{} has {} pieces, expected {PIECES_PER_PLAYER}",
                    player.number(),
                    pieces.len()
                )));
            }
            let mut seen = [false; PIECES_PER_PLAYER];
            for piece in pieces {
                check_piece(player, piece)?;
                let slot = piece.id.slot();
                if std::mem::replace(&mut seen[slot], true) {
                    return Err(StoreError::new(format!("piece {} appears twice", piece.id)));
                }
                state.players[player][slot] = *piece;
            }
        }

        if !(1..=DIE_FACES).contains(&self.dice_no) {
            return Err(StoreError::new(format!("diceNo {} is not a die face", self.dice_no)));
        }

        state.chance_player = self.chance_player;
        state.dice_no = self.dice_no;
        state.is_dice_rolled = self.is_dice_rolled;
        state.pile_selection_player =
            selection_from_wire("pileSelectionPlayer", self.pile_selection_player)?;
        state.cell_selection_player =
            selection_from_wire("cellSelectionPlayer", self.cell_selection_player)?;
        state.dice_touch_block = self.dice_touch_block;
        state.current_positions = self.current_positions.iter().copied().collect();
        state.fireworks = self.fireworks;
        state.winner = self.winner;

        let mut repairs = Vec::new();

        let derived = state.derived_positions();
        if derived != state.current_positions {
            warn!(
                stored = state.current_positions.len(),
                derived = derived.len(),
                "rebuilding currentPositions from pieces"
            );
            state.current_positions = derived;
            repairs.push(Repair::RebuiltPositions);
        }

        let nothing_pending = state.pile_selection_player.is_none()
            && state.cell_selection_player.is_none()
            && state.winner.is_none();
        if nothing_pending && (state.dice_touch_block || state.is_dice_rolled) {
            warn!(player = %state.chance_player, "releasing input lock left by an interrupted sequence");
            state.dice_touch_block = false;
            state.is_dice_rolled = false;
            repairs.push(Repair::ReleasedTouch);
        }

        Ok(Restored { state, repairs })
    }
}

fn check_piece(player: PlayerId, piece: &Piece) -> Result<(), StoreError> {
    let id: PieceId = piece.id;
    if id.owner() != player {
        return Err(StoreError::new(format!(
            "piece {id} listed under player{}",
            player.number()
        )));
    }
    match travel_for_cell(player, piece.pos) {
        Ok(travel) if travel == piece.travel_count => Ok(()),
        _ => Err(StoreError::new(format!(
            "piece {id} at cell {} cannot have travelCount {}",
            piece.pos, piece.travel_count
        ))),
    }
}
