//! Pacing: how the session waits between sequence steps.

use std::time::Duration;

/// Waits out the pause a step asked for.
pub trait Pacer {
    fn pause(&mut self, delay: Duration);
}

/// Real time: blocks the calling thread.
#[derive(Clone, Copy, Debug, Default)]
pub struct ThreadPacer;

impl Pacer for ThreadPacer {
    fn pause(&mut self, delay: Duration) {
        if !delay.is_zero() {
            std::thread::sleep(delay);
        }
    }
}

/// Virtual time: records pauses without waiting.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VirtualPacer {
    elapsed: Duration,
    pauses: usize,
}

impl VirtualPacer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Total virtual time spent pausing.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Number of pauses requested, zero-length ones included.
    #[must_use]
    pub fn pauses(&self) -> usize {
        self.pauses
    }
}

impl Pacer for VirtualPacer {
    fn pause(&mut self, delay: Duration) {
        self.elapsed += delay;
        self.pauses += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_virtual_pacer_accumulates() {
        let mut pacer = VirtualPacer::new();
        pacer.pause(Duration::from_millis(100));
        pacer.pause(Duration::ZERO);
        pacer.pause(Duration::from_millis(1300));

        assert_eq!(pacer.elapsed(), Duration::from_millis(1400));
        assert_eq!(pacer.pauses(), 3);
    }

    #[test]
    fn test_thread_pacer_zero_is_immediate() {
        ThreadPacer.pause(Duration::ZERO);
    }
}
