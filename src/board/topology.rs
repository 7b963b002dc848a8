//! Static board topology and lookup predicates.
//!
//! Every piece follows the same shape of path: it enters the ring on its
//! owner's starting cell, travels 51 ring cells, branches off just before
//! its owner's turning point into the private home stretch, and finishes
//! on the home cell after 57 cells of travel in total.
//!
//! ```text
//! travel  1 ........ 51 | 52 ........ 57
//!         ring cells    | home stretch (last = home)
//! ```

use crate::core::{EngineError, IllegalMoveReason, PlayerId};

use super::cell::{Cell, RING_LEN};

/// Travel count of a piece that has reached its home cell.
pub const HOME_TRAVEL: u8 = 57;

/// Travel count on the last ring cell before the home stretch.
pub const RING_TRAVEL: u8 = 51;

/// Number of home-stretch cells, including the home cell.
pub const STRETCH_LEN: u16 = 6;

/// Entry cell per player.
pub const STARTING_POINTS: [Cell; 4] = [Cell(1), Cell(14), Cell(27), Cell(40)];

/// Ring cell at which each player branches into their home stretch
/// instead of stepping onto it.
pub const TURNING_POINTS: [Cell; 4] = [Cell(52), Cell(13), Cell(26), Cell(39)];

/// First home-stretch cell per player.
pub const VICTORY_START: [Cell; 4] = [Cell(111), Cell(221), Cell(331), Cell(441)];

/// Cells marked with a star. Functionally safe.
pub const STAR_SPOTS: [Cell; 4] = [Cell(9), Cell(22), Cell(35), Cell(48)];

/// Capture-free cells: the starting points and the home stretches.
pub const SAFE_SPOTS: [Cell; 24] = [
    Cell(221), Cell(222), Cell(223), Cell(224), Cell(225), Cell(14),
    Cell(27), Cell(331), Cell(332), Cell(333), Cell(334), Cell(335),
    Cell(40), Cell(441), Cell(442), Cell(443), Cell(444), Cell(445),
    Cell(1), Cell(111), Cell(112), Cell(113), Cell(114), Cell(115),
];

/// Cells rendered with a direction arrow (entrances to home stretches).
pub const ARROW_SPOTS: [Cell; 4] = [Cell(12), Cell(51), Cell(38), Cell(25)];

/// The four 18-cell path segments as laid out on screen, row-major.
///
/// Presentation data only: the rules never consult the layout.
pub const PATH_SEGMENTS: [[u16; 18]; 4] = [
    [13, 14, 15, 16, 17, 18, 12, 221, 222, 223, 224, 225, 11, 10, 9, 8, 7, 6],
    [24, 25, 26, 23, 331, 27, 22, 332, 28, 21, 333, 29, 20, 334, 30, 19, 335, 31],
    [32, 33, 34, 35, 36, 37, 445, 444, 443, 442, 441, 38, 44, 43, 42, 41, 40, 39],
    [5, 115, 45, 4, 114, 46, 3, 113, 47, 2, 112, 48, 1, 111, 49, 52, 51, 50],
];

/// Player colours as `#rrggbb`, for presentation.
pub const PLAYER_COLORS: [&str; 4] = ["#d5151d", "#00a049", "#ffde17", "#28aeff"];

/// Is `cell` a safe spot (no capture ever happens there)?
#[must_use]
pub fn is_safe(cell: Cell) -> bool {
    SAFE_SPOTS.contains(&cell)
}

/// Is `cell` a star spot? Star spots are also capture-free.
#[must_use]
pub fn is_star(cell: Cell) -> bool {
    STAR_SPOTS.contains(&cell)
}

/// Capture exemption keyed off the destination cell only.
#[must_use]
pub fn is_capture_free(cell: Cell) -> bool {
    is_safe(cell) || is_star(cell)
}

/// Is `cell` the ring cell where `player` branches off into their stretch?
#[must_use]
pub fn is_turning_point(player: PlayerId, cell: Cell) -> bool {
    TURNING_POINTS[player.index()] == cell
}

#[must_use]
pub fn starting_point(player: PlayerId) -> Cell {
    STARTING_POINTS[player.index()]
}

#[must_use]
pub fn victory_start(player: PlayerId) -> Cell {
    VICTORY_START[player.index()]
}

/// The cell a piece occupies once it has fully travelled home.
#[must_use]
pub fn home_cell(player: PlayerId) -> Cell {
    Cell(victory_start(player).raw() + STRETCH_LEN - 1)
}

/// Is `cell` one of `player`'s home-stretch cells (home cell included)?
#[must_use]
pub fn is_in_stretch(player: PlayerId, cell: Cell) -> bool {
    let first = victory_start(player).raw();
    (first..first + STRETCH_LEN).contains(&cell.raw())
}

/// Is `cell` a cell a piece of `player` can ever occupy?
#[must_use]
pub fn is_valid_for(player: PlayerId, cell: Cell) -> bool {
    cell.is_pocket() || cell.is_ring() || is_in_stretch(player, cell)
}

/// The cell a piece of `player` steps onto from `current`.
///
/// From the pocket the next cell is the player's starting point. On the
/// ring the next cell wraps 52 to 1, except that the player's own turning
/// point is replaced by the first cell of their home stretch. There is no
/// cell past home.
pub fn next_cell(player: PlayerId, current: Cell) -> Result<Cell, EngineError> {
    if current.is_pocket() {
        return Ok(starting_point(player));
    }
    if current.is_ring() {
        let next = current.ring_succ();
        return Ok(if is_turning_point(player, next) {
            victory_start(player)
        } else {
            next
        });
    }
    if is_in_stretch(player, current) && current != home_cell(player) {
        return Ok(Cell(current.raw() + 1));
    }
    Err(EngineError::InvalidCell {
        player,
        cell: current,
    })
}

/// The cell a piece of `player` occupies after `travel` cells of travel.
pub fn cell_for_travel(player: PlayerId, travel: u8) -> Result<Cell, EngineError> {
    match travel {
        0 => Ok(Cell::POCKET),
        1..=RING_TRAVEL => {
            let offset = starting_point(player).raw() - 1 + u16::from(travel) - 1;
            Ok(Cell(offset % RING_LEN + 1))
        }
        t if t <= HOME_TRAVEL => Ok(Cell(
            victory_start(player).raw() + u16::from(t - RING_TRAVEL - 1),
        )),
        _ => Err(EngineError::IllegalMove {
            reason: IllegalMoveReason::TravelOverflow,
        }),
    }
}

/// The travel count that puts a piece of `player` on `cell`.
pub fn travel_for_cell(player: PlayerId, cell: Cell) -> Result<u8, EngineError> {
    if cell.is_pocket() {
        return Ok(0);
    }
    if cell.is_ring() && !is_turning_point(player, cell) {
        let start = starting_point(player).raw();
        let distance = (cell.raw() + RING_LEN - start) % RING_LEN;
        return Ok(distance as u8 + 1);
    }
    if is_in_stretch(player, cell) {
        let step = cell.raw() - victory_start(player).raw();
        return Ok(RING_TRAVEL + 1 + step as u8);
    }
    Err(EngineError::InvalidCell { player, cell })
}
