//! Advisory availability circuit breaker.

use std::sync::atomic::{AtomicBool, Ordering};

/// Process-wide advisory availability flag.
///
/// Starts available, flips to unavailable on the first failed advisory
/// call, and stays there until [`reset`](Self::reset) or process restart.
/// There is no automatic half-open retry. Within an outage window the flag
/// only ever moves available -> unavailable, so concurrent readers racing a
/// writer cost at most one extra wasted advisory attempt, never an
/// incorrect score. Owned by whoever constructs the assessor, never an
/// ambient global, so tests can hold independent instances.
#[derive(Debug)]
pub struct AdvisoryStatus {
    available: AtomicBool,
}

impl AdvisoryStatus {
    /// New circuit, initially available.
    pub fn new() -> Self {
        Self {
            available: AtomicBool::new(true),
        }
    }

    /// Whether advisory calls should be attempted.
    pub fn is_available(&self) -> bool {
        self.available.load(Ordering::Relaxed)
    }

    /// Record an observed outage; suppresses further attempts.
    pub fn mark_unavailable(&self) {
        self.available.store(false, Ordering::Relaxed);
    }

    /// Operator action: attempt reconnection on the next assessment.
    pub fn reset(&self) {
        self.available.store(true, Ordering::Relaxed);
    }
}

impl Default for AdvisoryStatus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initially_available() {
        assert!(AdvisoryStatus::new().is_available());
    }

    #[test]
    fn test_flip_and_reset() {
        let status = AdvisoryStatus::new();
        status.mark_unavailable();
        assert!(!status.is_available());
        // Idempotent.
        status.mark_unavailable();
        assert!(!status.is_available());

        status.reset();
        assert!(status.is_available());
    }
}
