//! Cosmetic pacing between run stages, and run cancellation.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// Waits between run stages.
pub trait Pacer {
    fn pause(&mut self, delay: Duration);
}

/// Blocks the calling thread for the requested delay.
#[derive(Debug, Default, Clone, Copy)]
pub struct SleepPacer;

impl Pacer for SleepPacer {
    fn pause(&mut self, delay: Duration) {
        if !delay.is_zero() {
            std::thread::sleep(delay);
        }
    }
}

/// Returns immediately, recording the delays it was asked for.
#[derive(Debug, Default, Clone)]
pub struct InstantPacer {
    pub requested: Vec<Duration>,
}

impl Pacer for InstantPacer {
    fn pause(&mut self, delay: Duration) {
        self.requested.push(delay);
    }
}

/// Shared stop request, checked by the run service before every stage.
#[derive(Debug, Default, Clone)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_flag() {
        let token = CancelToken::new();
        let other = token.clone();
        assert!(!other.is_cancelled());
        token.cancel();
        assert!(other.is_cancelled());
    }

    #[test]
    fn instant_pacer_records_delays() {
        let mut pacer = InstantPacer::default();
        pacer.pause(Duration::from_millis(5));
        pacer.pause(Duration::ZERO);
        assert_eq!(pacer.requested, [Duration::from_millis(5), Duration::ZERO]);
    }
}
