//! Command gating, signals and pacing at the session boundary.

mod common;

use std::time::Duration;

use common::{id, rolled, session_from};
use ludo_engine::{
    Command, EngineConfig, EngineError, IllegalMoveReason, PacingConfig, PlayerId, Session,
    SignalLog, ThreadPacer, TracingSink, TurnPhase, VirtualPacer,
};

fn illegal(reason: IllegalMoveReason) -> Result<(), EngineError> {
    Err(EngineError::illegal(reason))
}

#[test]
fn test_move_before_roll_is_not_selectable() {
    let mut session = Session::headless(1);
    assert_eq!(
        session.request_move(PlayerId::ONE, id("A1")),
        illegal(IllegalMoveReason::NotSelectable)
    );
}

#[test]
fn test_only_the_chance_player_rolls() {
    let mut session = Session::headless(1);
    for player in [PlayerId::TWO, PlayerId::THREE, PlayerId::FOUR] {
        assert_eq!(
            session.request_roll(player, None),
            illegal(IllegalMoveReason::NotYourTurn)
        );
    }
    assert!(session.signals().signals().is_empty());
}

#[test]
fn test_pending_selection_blocks_dice() {
    let mut session = session_from(&rolled(PlayerId::ONE, 4, &[("A1", 20)]));
    assert_eq!(
        session.request_roll(PlayerId::ONE, Some(2)),
        illegal(IllegalMoveReason::DiceLocked)
    );
    assert_eq!(
        session.request_move(PlayerId::TWO, id("A1")),
        Err(EngineError::unknown_piece(PlayerId::TWO, id("A1")))
    );
    assert_eq!(
        session.request_move(PlayerId::ONE, id("A2")),
        illegal(IllegalMoveReason::NotSelectable)
    );

    session.request_move(PlayerId::ONE, id("A1")).unwrap();
    assert_eq!(session.state().chance_player(), PlayerId::TWO);
}

#[test]
fn test_commands_rejected_mid_sequence() {
    let mut session = session_from(&rolled(PlayerId::ONE, 5, &[("A1", 20)]));
    session.submit(Command::move_piece(PlayerId::ONE, id("A1"))).unwrap();
    session.tick().unwrap();
    session.tick().unwrap();
    assert!(session.is_busy());
    assert_eq!(session.phase(), TurnPhase::ResolvingOutcome);

    let before = session.state().clone();
    for command in [
        Command::roll(PlayerId::ONE),
        Command::move_piece(PlayerId::ONE, id("A1")),
        Command::RequestNewGame,
        Command::AcknowledgeFireworks,
    ] {
        assert_eq!(
            session.submit(command),
            illegal(IllegalMoveReason::SequenceInFlight)
        );
    }
    assert_eq!(session.state(), &before);

    session.run_until_idle().unwrap();
    assert_eq!(session.state().piece(id("A1")).travel_count, 25);
}

#[test]
fn test_signal_order_for_a_turn() {
    let mut session = Session::headless(1);
    session.request_roll(PlayerId::ONE, Some(6)).unwrap();
    session.request_move(PlayerId::ONE, id("A1")).unwrap();
    session.request_roll(PlayerId::ONE, Some(3)).unwrap();
    session.request_move(PlayerId::ONE, id("A1")).unwrap();

    assert_eq!(
        session.signals().names(),
        vec!["dice_roll", "pile_move", "dice_roll", "pile_move", "pile_move", "pile_move"]
    );
}

#[test]
fn test_virtual_time_follows_pacing() {
    let mut session = Session::headless(1);
    session.request_roll(PlayerId::ONE, Some(6)).unwrap();
    assert_eq!(session.pacer().elapsed(), Duration::from_millis(1300));

    session.request_move(PlayerId::ONE, id("A1")).unwrap();
    session.request_roll(PlayerId::ONE, Some(3)).unwrap();
    session.request_move(PlayerId::ONE, id("A1")).unwrap();

    assert_eq!(session.pacer().elapsed(), Duration::from_millis(2 * 1300 + 3 * 100));
    assert_eq!(session.pacer().pauses(), 7);
}

#[test]
fn test_forfeit_waits_out_cooldown() {
    let mut session = Session::headless(1);
    session.request_roll(PlayerId::ONE, Some(4)).unwrap();

    assert_eq!(session.pacer().elapsed(), Duration::from_millis(1300 + 600));
    assert_eq!(session.state().chance_player(), PlayerId::TWO);
    assert_eq!(session.phase(), TurnPhase::Idle);
}

#[test]
fn test_real_time_session_with_tracing_sink() {
    let config = EngineConfig::default()
        .with_seed(8)
        .with_pacing(PacingConfig::instant());
    let mut session = Session::new(config, TracingSink, ThreadPacer);

    session.request_roll(PlayerId::ONE, Some(6)).unwrap();
    session.request_move(PlayerId::ONE, id("A4")).unwrap();
    assert_eq!(session.state().current_positions().len(), 1);
}

#[test]
fn test_same_seed_same_game() {
    let play = |seed: u64| {
        let mut session = Session::new(
            EngineConfig::default().with_seed(seed),
            SignalLog::new(),
            VirtualPacer::new(),
        );
        for _ in 0..30 {
            let player = session.state().chance_player();
            session.request_roll(player, None).unwrap();
            if session.phase() == TurnPhase::AwaitingSelection {
                let choice = *session.selectable_pieces(player).last().unwrap();
                session.request_move(player, choice).unwrap();
            }
        }
        session.state().clone()
    };
    assert_eq!(play(21), play(21));
}
