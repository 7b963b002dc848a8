//! Commands accepted from the presentation layer.
//!
//! A command is a request, not a transition: the session validates it
//! against the current state and either rejects it or starts the roll or
//! move sequence that will produce the resulting transitions.

use serde::{Deserialize, Serialize};

use super::piece::PieceId;
use super::player::PlayerId;

/// A request from presentation.
///
/// ```
/// use ludo_engine::core::{Command, PlayerId};
///
/// let roll = Command::roll(PlayerId::ONE);
/// assert_eq!(roll.player(), Some(PlayerId::ONE));
///
/// let forced = Command::forced_roll(PlayerId::TWO, 6);
/// assert_eq!(forced.to_string(), "Player 2 rolls 6");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    /// Roll the die. `forced` skips randomness and uses the given value.
    RequestRoll { player: PlayerId, forced: Option<u8> },
    /// Move a piece by the current dice value (or bring it out of the pocket).
    RequestMove { player: PlayerId, piece: PieceId },
    /// Throw the current game away and start over.
    RequestNewGame,
    /// The celebratory effect has finished playing.
    AcknowledgeFireworks,
}

impl Command {
    #[must_use]
    pub fn roll(player: PlayerId) -> Self {
        Self::RequestRoll {
            player,
            forced: None,
        }
    }

    #[must_use]
    pub fn forced_roll(player: PlayerId, value: u8) -> Self {
        Self::RequestRoll {
            player,
            forced: Some(value),
        }
    }

    #[must_use]
    pub fn move_piece(player: PlayerId, piece: PieceId) -> Self {
        Self::RequestMove { player, piece }
    }

    /// The requesting player, for commands that have one.
    #[must_use]
    pub fn player(&self) -> Option<PlayerId> {
        match *self {
            Self::RequestRoll { player, .. } | Self::RequestMove { player, .. } => Some(player),
            Self::RequestNewGame | Self::AcknowledgeFireworks => None,
        }
    }
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RequestRoll {
                player,
                forced: None,
            } => write!(f, "{player} rolls"),
            Self::RequestRoll {
                player,
                forced: Some(value),
            } => write!(f, "{player} rolls {value}"),
            Self::RequestMove { player, piece } => write!(f, "{player} moves {piece}"),
            Self::RequestNewGame => write!(f, "new game"),
            Self::AcknowledgeFireworks => write!(f, "fireworks done"),
        }
    }
}
