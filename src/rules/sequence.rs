//! Stepwise sequences.
//!
//! Rolls and moves are animated, so each runs as a small step machine
//! instead of one call. The session drives one step at a time and waits
//! out the returned delay before the next. Each step re-reads the store,
//! never a cached copy, so every step observes the latest write.

use std::time::Duration;

use crate::core::{GameRng, GameStore, PacingConfig};
use crate::signals::SignalSink;

use super::turn::TurnController;

/// Result of running one step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    /// More steps follow, after this pause.
    Yield(Duration),
    /// The sequence has finished.
    Done,
}

impl Step {
    #[must_use]
    pub fn is_done(self) -> bool {
        matches!(self, Step::Done)
    }
}

/// Everything a step may touch.
pub struct StepContext<'a> {
    pub store: &'a mut GameStore,
    pub turn: &'a mut TurnController,
    pub rng: &'a mut GameRng,
    pub signals: &'a mut dyn SignalSink,
    pub pacing: &'a PacingConfig,
}
