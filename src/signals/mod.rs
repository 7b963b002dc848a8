//! Side-effect signals for the presentation layer.
//!
//! Rules code never plays sounds or animates anything. It emits
//! [`Signal`]s into a [`SignalSink`] alongside the state transitions it
//! dispatches; the host decides what each one means on screen or speaker.
//!
//! ## Example
//!
//! ```
//! use ludo_engine::core::PlayerId;
//! use ludo_engine::signals::{Signal, SignalLog, SignalSink};
//!
//! let mut log = SignalLog::new();
//! log.emit(Signal::DiceRoll { player: PlayerId::ONE });
//! assert_eq!(log.names(), vec!["dice_roll"]);
//! ```

mod signal;
mod sink;

pub use signal::{Signal, SIGNAL_NAMES};
pub use sink::{SignalLog, SignalSink, TracingSink};
