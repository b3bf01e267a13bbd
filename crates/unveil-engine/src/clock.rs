/// Tracks story time: a monotonic millisecond counter.
///
/// The clock is only ever advanced by whatever drives the engine — a
/// frame loop passing elapsed wall time, or a test passing fixed steps —
/// which is what makes every run of the same script reproducible.
#[derive(Debug, Clone, Default)]
pub struct StoryClock {
    now_ms: u64,
}

impl StoryClock {
    /// Create a clock starting at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the clock. Returns the new time.
    pub fn advance(&mut self, delta_ms: u64) -> u64 {
        self.now_ms += delta_ms;
        self.now_ms
    }

    /// Current story time in milliseconds.
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_zero() {
        assert_eq!(StoryClock::new().now_ms(), 0);
    }

    #[test]
    fn advance_accumulates() {
        let mut clock = StoryClock::new();
        clock.advance(16);
        clock.advance(16);
        assert_eq!(clock.advance(8), 40);
        assert_eq!(clock.now_ms(), 40);
    }

    #[test]
    fn zero_delta_is_allowed() {
        let mut clock = StoryClock::new();
        clock.advance(0);
        assert_eq!(clock.now_ms(), 0);
    }
}
