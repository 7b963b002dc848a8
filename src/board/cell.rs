//! Cell identifiers.
//!
//! Cell numbering follows the physical board:
//! - `0`: the pocket (piece not on the board)
//! - `1..=52`: the shared ring
//! - `X11..=X16`: player X's private home stretch (`111..=116` for player 1,
//!   `221..=226` for player 2, and so on); `X16` is the home cell itself

use serde::{Deserialize, Serialize};

/// Number of cells on the shared ring.
pub const RING_LEN: u16 = 52;

/// A board cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cell(pub u16);

impl Cell {
    /// The pocket: a piece here is not on the board.
    pub const POCKET: Cell = Cell(0);

    #[must_use]
    pub const fn new(raw: u16) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }

    #[must_use]
    pub const fn is_pocket(self) -> bool {
        self.0 == 0
    }

    /// Is this one of the 52 shared ring cells?
    #[must_use]
    pub const fn is_ring(self) -> bool {
        self.0 >= 1 && self.0 <= RING_LEN
    }

    /// The ring cell after this one, wrapping 52 to 1.
    ///
    /// Only meaningful for ring cells.
    #[must_use]
    pub const fn ring_succ(self) -> Cell {
        Cell(self.0 % RING_LEN + 1)
    }

    /// The ring cell before this one, wrapping 1 to 52.
    ///
    /// Only meaningful for ring cells.
    #[must_use]
    pub const fn ring_pred(self) -> Cell {
        if self.0 <= 1 {
            Cell(RING_LEN)
        } else {
            Cell(self.0 - 1)
        }
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u16> for Cell {
    fn from(raw: u16) -> Self {
        Self(raw)
    }
}
