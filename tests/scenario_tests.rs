//! End-to-end turn scenarios driven through the session.

mod common;

use common::{id, rolled, session_from};
use ludo_engine::board::Cell;
use ludo_engine::{EngineError, IllegalMoveReason, MoveOutcome, PlayerId, Session, TurnPhase};

/// A plain move of three passes the turn.
#[test]
fn test_scenario_plain_move() {
    let mut session = session_from(&rolled(PlayerId::ONE, 3, &[("A1", 10)]));
    assert_eq!(session.phase(), TurnPhase::AwaitingSelection);

    session.request_move(PlayerId::ONE, id("A1")).unwrap();

    let state = session.state();
    let a1 = state.piece(id("A1"));
    assert_eq!(a1.pos, Cell(13));
    assert_eq!(a1.travel_count, 13);
    assert_eq!(state.chance_player(), PlayerId::TWO);
    assert!(!state.dice_touch_block());
    assert_eq!(session.phase(), TurnPhase::Idle);
    assert_eq!(session.signals().names(), vec!["pile_move"; 3]);
}

/// Landing alone on an opponent sends it back and keeps the turn.
#[test]
fn test_scenario_capture() {
    let mut session = session_from(&rolled(PlayerId::ONE, 3, &[("A1", 15), ("B1", 5)]));
    assert_eq!(session.state().piece(id("B1")).pos, Cell(18));

    session.request_move(PlayerId::ONE, id("A1")).unwrap();

    let state = session.state();
    let b1 = state.piece(id("B1"));
    assert_eq!((b1.pos, b1.travel_count), (Cell::POCKET, 0));
    assert_eq!(state.piece(id("A1")).pos, Cell(18));
    assert_eq!(state.chance_player(), PlayerId::ONE);
    assert!(!state.dice_touch_block());
    assert_eq!(session.signals().count("collide"), 1);
    assert_eq!(session.last_move(), Some(MoveOutcome::Captured));

    // Captured pieces leave the occupancy index.
    assert!(state.current_positions().iter().all(|p| p.id != id("B1")));
}

/// The last piece reaching home wins; one short of home does not.
#[test]
fn test_scenario_win_detection() {
    let finished = [("A1", 57), ("A2", 57), ("A3", 57)];

    let mut pieces = finished.to_vec();
    pieces.push(("A4", 56));
    let mut session = session_from(&rolled(PlayerId::ONE, 1, &pieces));
    session.request_move(PlayerId::ONE, id("A4")).unwrap();

    assert_eq!(session.state().winner(), Some(PlayerId::ONE));
    assert!(session.signals().contains("cheer"));
    assert_eq!(session.phase(), TurnPhase::TurnComplete);

    let mut pieces = finished.to_vec();
    pieces.push(("A4", 55));
    let mut session = session_from(&rolled(PlayerId::ONE, 1, &pieces));
    session.request_move(PlayerId::ONE, id("A4")).unwrap();

    assert_eq!(session.state().winner(), None);
    assert!(!session.signals().contains("cheer"));
    assert_eq!(session.state().chance_player(), PlayerId::TWO);
}

/// A six opens the pocket, and the board too once a piece is out.
#[test]
fn test_scenario_six_selection_modes() {
    let mut session = Session::headless(3);
    session.request_roll(PlayerId::ONE, Some(6)).unwrap();

    let state = session.state();
    assert_eq!(state.pile_selection_player(), Some(PlayerId::ONE));
    assert_eq!(state.cell_selection_player(), None);
    assert_eq!(session.selectable_pieces(PlayerId::ONE).len(), 4);

    session.request_move(PlayerId::ONE, id("A2")).unwrap();
    assert_eq!(session.state().piece(id("A2")).pos, Cell(1));
    assert_eq!(session.state().chance_player(), PlayerId::ONE);

    session.request_roll(PlayerId::ONE, Some(6)).unwrap();
    let state = session.state();
    assert_eq!(state.pile_selection_player(), Some(PlayerId::ONE));
    assert_eq!(state.cell_selection_player(), Some(PlayerId::ONE));
    assert!(session.is_selectable(id("A2")));
    assert!(session.is_selectable(id("A1")));
}

#[test]
fn test_every_opponent_on_the_cell_is_captured() {
    let mut session = session_from(&rolled(
        PlayerId::ONE,
        3,
        &[("A1", 15), ("B1", 5), ("C1", 44)],
    ));
    assert_eq!(session.state().occupants_at(Cell(18)).len(), 2);

    session.request_move(PlayerId::ONE, id("A1")).unwrap();

    let state = session.state();
    assert!(state.piece(id("B1")).is_in_pocket());
    assert!(state.piece(id("C1")).is_in_pocket());
    assert_eq!(state.occupants_at(Cell(18)).as_slice(), &[id("A1")]);
    assert_eq!(session.signals().count("collide"), 2);
}

#[test]
fn test_own_pieces_stack_without_capture() {
    let mut session = session_from(&rolled(PlayerId::ONE, 2, &[("A1", 16), ("A2", 18)]));
    session.request_move(PlayerId::ONE, id("A1")).unwrap();

    let state = session.state();
    assert_eq!(state.occupants_at(Cell(18)).len(), 2);
    assert_eq!(session.signals().count("collide"), 0);
    assert_eq!(state.chance_player(), PlayerId::TWO);
}

#[test]
fn test_won_game_rejects_play_until_new_game() {
    let mut session = session_from(&rolled(
        PlayerId::TWO,
        2,
        &[("B1", 57), ("B2", 57), ("B3", 57), ("B4", 55)],
    ));
    session.request_move(PlayerId::TWO, id("B4")).unwrap();
    assert_eq!(session.state().winner(), Some(PlayerId::TWO));

    assert_eq!(
        session.request_roll(PlayerId::TWO, Some(4)),
        Err(EngineError::illegal(IllegalMoveReason::GameOver))
    );
    assert_eq!(
        session.request_move(PlayerId::TWO, id("B1")),
        Err(EngineError::illegal(IllegalMoveReason::GameOver))
    );

    session.request_new_game().unwrap();
    assert_eq!(session.state().winner(), None);
    assert_eq!(session.state().chance_player(), PlayerId::ONE);
    session.request_roll(PlayerId::ONE, Some(6)).unwrap();
}
