//! Signal types.
//!
//! Signals are fire-and-forget notifications for the presentation layer,
//! mostly sounds. Each carries the context a listener needs to pick an
//! asset or animate something, and maps to a stable name that the audio
//! side keys its assets by.

use serde::{Deserialize, Serialize};

use crate::board::Cell;
use crate::core::{PieceId, PlayerId};

/// Something presentation may want to react to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Signal {
    /// A roll animation started.
    DiceRoll { player: PlayerId },
    /// A piece stepped onto a cell (also used for leaving the pocket).
    PileMove { piece: PieceId, pos: Cell },
    /// `victim` is about to be sent back to its pocket.
    Collide { victim: PieceId, cell: Cell },
    /// A move ended on a capture-free cell.
    SafeSpot { cell: Cell },
    /// A piece reached its home cell.
    HomeWin { piece: PieceId },
    /// The game has been won.
    Cheer { winner: PlayerId },
    /// A fresh game started.
    GameStart,
    /// Generic control feedback. The engine never emits this itself;
    /// presentation may route button presses through the same sink.
    Ui,
}

/// Every signal name, in declaration order.
pub const SIGNAL_NAMES: [&str; 8] = [
    "dice_roll",
    "pile_move",
    "collide",
    "safe_spot",
    "home_win",
    "cheer",
    "game_start",
    "ui",
];

impl Signal {
    /// Stable name, as used to look up the sound asset.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Signal::DiceRoll { .. } => "dice_roll",
            Signal::PileMove { .. } => "pile_move",
            Signal::Collide { .. } => "collide",
            Signal::SafeSpot { .. } => "safe_spot",
            Signal::HomeWin { .. } => "home_win",
            Signal::Cheer { .. } => "cheer",
            Signal::GameStart => "game_start",
            Signal::Ui => "ui",
        }
    }

    /// The player this signal concerns, if any.
    #[must_use]
    pub fn player(&self) -> Option<PlayerId> {
        match *self {
            Signal::DiceRoll { player } => Some(player),
            Signal::PileMove { piece, .. } | Signal::HomeWin { piece } => Some(piece.owner()),
            Signal::Collide { victim, .. } => Some(victim.owner()),
            Signal::Cheer { winner } => Some(winner),
            Signal::SafeSpot { .. } | Signal::GameStart | Signal::Ui => None,
        }
    }
}

impl std::fmt::Display for Signal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
