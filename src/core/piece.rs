//! Pieces and piece identifiers.
//!
//! Each player owns four pieces, sixteen in total. A piece id encodes its
//! owner, written as the owner's letter followed by the 1-based ordinal:
//! `A1`..`A4` for player 1 up to `D1`..`D4` for player 4.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::player::PlayerId;
use crate::board::{Cell, HOME_TRAVEL};

/// Pieces per player.
pub const PIECES_PER_PLAYER: usize = 4;

/// Identifier of one piece.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PieceId {
    owner: PlayerId,
    ordinal: u8,
}

impl PieceId {
    /// Create a piece id from its owner and 1-based ordinal.
    #[must_use]
    pub const fn new(owner: PlayerId, ordinal: u8) -> Option<Self> {
        if ordinal >= 1 && ordinal as usize <= PIECES_PER_PLAYER {
            Some(Self { owner, ordinal })
        } else {
            None
        }
    }

    /// Id for a 0-based slot. Out-of-range slots wrap.
    #[must_use]
    pub(crate) const fn at_slot(owner: PlayerId, slot: usize) -> Self {
        Self {
            owner,
            ordinal: (slot % PIECES_PER_PLAYER) as u8 + 1,
        }
    }

    #[must_use]
    pub const fn owner(self) -> PlayerId {
        self.owner
    }

    /// 1-based ordinal within the owner's pieces.
    #[must_use]
    pub const fn ordinal(self) -> u8 {
        self.ordinal
    }

    /// Position of this piece in its owner's collection.
    #[must_use]
    pub const fn slot(self) -> usize {
        self.ordinal as usize - 1
    }

    /// All four piece ids of `owner`, in order.
    pub fn all_of(owner: PlayerId) -> impl Iterator<Item = PieceId> {
        (1..=PIECES_PER_PLAYER as u8).map(move |ordinal| PieceId { owner, ordinal })
    }
}

impl std::fmt::Display for PieceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.owner.letter(), self.ordinal)
    }
}

impl FromStr for PieceId {
    type Err = String;

    /// Parse `"C3"`-style ids.
    ///
    /// ```
    /// use ludo_engine::core::{PieceId, PlayerId};
    ///
    /// let id: PieceId = "C3".parse().unwrap();
    /// assert_eq!(id.owner(), PlayerId::THREE);
    /// assert_eq!(id.ordinal(), 3);
    /// assert!("E1".parse::<PieceId>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let (Some(letter), Some(digit), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(format!("malformed piece id {s:?}"));
        };
        let owner = PlayerId::from_letter(letter).ok_or_else(|| format!("no player owns {s:?}"))?;
        digit
            .to_digit(10)
            .and_then(|d| PieceId::new(owner, d as u8))
            .ok_or_else(|| format!("no piece ordinal in {s:?}"))
    }
}

impl TryFrom<String> for PieceId {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<PieceId> for String {
    fn from(id: PieceId) -> Self {
        id.to_string()
    }
}

/// A piece and its progress.
///
/// `pos == Cell::POCKET` means the piece has not entered the board.
/// `travel_count` runs from 0 (pocket) to 57 (home).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub id: PieceId,
    pub pos: Cell,
    #[serde(rename = "travelCount")]
    pub travel_count: u8,
}

impl Piece {
    /// A piece sitting in its owner's pocket.
    #[must_use]
    pub const fn in_pocket(id: PieceId) -> Self {
        Self {
            id,
            pos: Cell::POCKET,
            travel_count: 0,
        }
    }

    #[must_use]
    pub const fn is_in_pocket(&self) -> bool {
        self.pos.is_pocket()
    }

    #[must_use]
    pub const fn is_home(&self) -> bool {
        self.travel_count >= HOME_TRAVEL
    }

    /// On the board and still travelling.
    #[must_use]
    pub const fn is_travelling(&self) -> bool {
        !self.is_in_pocket() && !self.is_home()
    }

    /// Can this piece advance `dice` cells without overshooting home?
    #[must_use]
    pub const fn can_advance(&self, dice: u8) -> bool {
        !self.is_in_pocket() && self.travel_count.saturating_add(dice) <= HOME_TRAVEL
    }
}

/// Entry of the on-board occupancy index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlacedPiece {
    pub id: PieceId,
    pub pos: Cell,
}
