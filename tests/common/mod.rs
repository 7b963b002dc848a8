//! Shared fixtures for the integration tests.
//!
//! Positions are built with plain transitions, saved into a memory store
//! and restored into a [`Session`], the same path a host takes when it
//! resumes a game.

#![allow(dead_code)]

use ludo_engine::board::cell_for_travel;
use ludo_engine::persistence::{MemoryStore, SnapshotStore};
use ludo_engine::rules::{resolve_roll, RollOutcome};
use ludo_engine::{GameRng, GameState, PieceId, PlayerId, Session, StorageConfig, Transition};

pub fn id(s: &str) -> PieceId {
    s.parse().unwrap()
}

/// Put `piece` wherever `travel` takes it on its owner's path.
pub fn place(state: GameState, piece: &str, travel: u8) -> GameState {
    let piece = id(piece);
    let player = piece.owner();
    state
        .reduce(&Transition::SetPiece {
            player,
            piece,
            pos: cell_for_travel(player, travel).unwrap(),
            travel_count: travel,
        })
        .unwrap()
}

/// `pieces` placed by travel count, then `player` to act having rolled
/// `dice`, with the selection mode that roll leads to.
pub fn rolled(player: PlayerId, dice: u8, pieces: &[(&str, u8)]) -> GameState {
    let mut state = GameState::new()
        .reduce(&Transition::ReleaseTouch(player))
        .unwrap();
    for &(piece, travel) in pieces {
        state = place(state, piece, travel);
    }
    state = state.reduce(&Transition::SetDice(dice)).unwrap();

    let selection: &[Transition] = match resolve_roll(&state, player, dice) {
        RollOutcome::PileSelection => &[Transition::EnterPileSelection(player)],
        RollOutcome::PileAndCellSelection => &[
            Transition::EnterPileSelection(player),
            Transition::EnterCellSelection(player),
        ],
        RollOutcome::CellSelection => &[Transition::EnterCellSelection(player)],
        RollOutcome::Forfeit => &[],
    };
    for transition in selection {
        state = state.reduce(transition).unwrap();
    }
    state
}

/// A headless session resumed from `state`.
pub fn session_from(state: &GameState) -> Session {
    let mut saves = SnapshotStore::new(MemoryStore::new(), StorageConfig::default());
    saves.save(state, &GameRng::new(0)).unwrap();
    Session::headless(0)
        .with_storage(saves.storage().clone())
        .unwrap()
}
