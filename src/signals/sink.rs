//! Signal sinks.
//!
//! The engine hands every signal to a [`SignalSink`] and never waits on
//! it. Presentation plugs in whatever relays signals to its audio player;
//! the crate ships an in-memory log and a `tracing` sink.

use tracing::info;

use super::signal::Signal;

/// Receiver of engine signals.
pub trait SignalSink {
    fn emit(&mut self, signal: Signal);
}

impl<S: SignalSink + ?Sized> SignalSink for Box<S> {
    fn emit(&mut self, signal: Signal) {
        (**self).emit(signal);
    }
}

/// Records every signal in order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SignalLog {
    signals: Vec<Signal>,
}

impl SignalLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn signals(&self) -> &[Signal] {
        &self.signals
    }

    /// Signal names in emission order.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.signals.iter().map(Signal::name).collect()
    }

    /// How many signals named `name` were emitted.
    #[must_use]
    pub fn count(&self, name: &str) -> usize {
        self.signals.iter().filter(|s| s.name() == name).count()
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.signals.iter().any(|s| s.name() == name)
    }

    /// Take everything recorded so far.
    pub fn drain(&mut self) -> Vec<Signal> {
        std::mem::take(&mut self.signals)
    }

    pub fn clear(&mut self) {
        self.signals.clear();
    }
}

impl SignalSink for SignalLog {
    fn emit(&mut self, signal: Signal) {
        self.signals.push(signal);
    }
}

/// Logs each signal at info level under the `ludo::signal` target.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl SignalSink for TracingSink {
    fn emit(&mut self, signal: Signal) {
        info!(target: "ludo::signal", name = signal.name(), ?signal, "signal");
    }
}
