//! Piece eligibility gate.
//!
//! Answers "can this piece be chosen right now". Pure and recomputed on
//! every query: nothing here is stored in the game state.
//!
//! - A pocket piece is selectable iff its owner is in pile selection.
//! - A board piece is selectable iff its owner is in cell selection and
//!   it can advance by the current dice value without overshooting home.

use smallvec::SmallVec;

use crate::core::{EngineError, GameState, IllegalMoveReason, PieceId, PlayerId};

/// Is `piece` selectable in `state`?
#[must_use]
pub fn is_selectable(state: &GameState, piece: PieceId) -> bool {
    let owner = piece.owner();
    let current = state.piece(piece);
    if current.is_in_pocket() {
        state.pile_selection_player() == Some(owner)
    } else {
        state.cell_selection_player() == Some(owner) && current.can_advance(state.dice_no())
    }
}

/// The pieces of `player` that may be chosen right now, in ordinal order.
#[must_use]
pub fn selectable_pieces(state: &GameState, player: PlayerId) -> SmallVec<[PieceId; 4]> {
    PieceId::all_of(player)
        .filter(|&piece| is_selectable(state, piece))
        .collect()
}

/// Boundary check for a move request by `player` for `piece`.
pub fn check_selectable(
    state: &GameState,
    player: PlayerId,
    piece: PieceId,
) -> Result<(), EngineError> {
    if piece.owner() != player {
        return Err(EngineError::unknown_piece(player, piece));
    }
    if !is_selectable(state, piece) {
        return Err(EngineError::illegal(IllegalMoveReason::NotSelectable));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Cell;
    use crate::core::Transition;

    fn id(s: &str) -> PieceId {
        s.parse().unwrap()
    }

    fn with(state: GameState, transitions: &[Transition]) -> GameState {
        transitions
            .iter()
            .fold(state, |s, t| s.reduce(t).unwrap())
    }

    fn place(piece: &str, pos: u16, travel_count: u8) -> Transition {
        let piece = id(piece);
        Transition::SetPiece {
            player: piece.owner(),
            piece,
            pos: Cell(pos),
            travel_count,
        }
    }

    #[test]
    fn test_nothing_selectable_without_selection_mode() {
        let state = GameState::new();
        assert!(selectable_pieces(&state, PlayerId::ONE).is_empty());
    }

    #[test]
    fn test_pocket_pieces_need_pile_selection() {
        let state = with(
            GameState::new(),
            &[Transition::SetDice(6), Transition::EnterPileSelection(PlayerId::ONE)],
        );

        assert_eq!(selectable_pieces(&state, PlayerId::ONE).len(), 4);
        assert!(selectable_pieces(&state, PlayerId::TWO).is_empty());
    }

    #[test]
    fn test_board_piece_respects_home_limit() {
        let state = with(
            GameState::new(),
            &[
                place("A1", 10, 10),
                place("A2", 114, 55),
                Transition::SetDice(3),
                Transition::EnterCellSelection(PlayerId::ONE),
            ],
        );

        assert!(is_selectable(&state, id("A1")));
        assert!(!is_selectable(&state, id("A2")));
        // Pocket pieces stay locked in cell selection alone.
        assert!(!is_selectable(&state, id("A3")));
        assert_eq!(selectable_pieces(&state, PlayerId::ONE).as_slice(), &[id("A1")]);
    }

    #[test]
    fn test_exact_roll_home_is_selectable() {
        let state = with(
            GameState::new(),
            &[
                place("A2", 114, 55),
                Transition::SetDice(2),
                Transition::EnterCellSelection(PlayerId::ONE),
            ],
        );
        assert!(is_selectable(&state, id("A2")));
    }

    #[test]
    fn test_check_selectable_errors() {
        let state = with(
            GameState::new(),
            &[Transition::SetDice(6), Transition::EnterPileSelection(PlayerId::TWO)],
        );

        assert!(check_selectable(&state, PlayerId::TWO, id("B1")).is_ok());
        assert!(matches!(
            check_selectable(&state, PlayerId::ONE, id("B1")),
            Err(EngineError::UnknownPiece { .. })
        ));
        assert_eq!(
            check_selectable(&state, PlayerId::ONE, id("A1")),
            Err(EngineError::illegal(IllegalMoveReason::NotSelectable))
        );
    }
}
