//! Board topology: cells, the shared ring, home stretches and the
//! capture-free spots.
//!
//! Everything here is static and pure. The rules ask the board where a
//! piece goes next and whether a cell protects its occupants; nothing here
//! knows about turns or dice.

pub mod cell;
pub mod topology;

pub use cell::{Cell, RING_LEN};
pub use topology::{
    cell_for_travel, home_cell, is_capture_free, is_in_stretch, is_safe, is_star,
    is_turning_point, is_valid_for, next_cell, starting_point, travel_for_cell, victory_start,
    ARROW_SPOTS, HOME_TRAVEL, PATH_SEGMENTS, PLAYER_COLORS, RING_TRAVEL, SAFE_SPOTS,
    STARTING_POINTS, STAR_SPOTS, STRETCH_LEN, TURNING_POINTS, VICTORY_START,
};
