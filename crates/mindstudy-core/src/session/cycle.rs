//! Cycle numbering for a session.
//!
//! The count names the Work+Break cycle currently in progress, so it
//! starts at 1 and `reset` returns it to 1, not 0. It advances exactly
//! once per break→work expiry.

use serde::{Deserialize, Serialize};

/// Counter for the in-progress cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleCounter {
    count: u32,
}

impl Default for CycleCounter {
    fn default() -> Self {
        Self { count: 1 }
    }
}

impl CycleCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance to the next cycle. Called only when a break expires into
    /// a new work phase.
    pub fn increment(&mut self) {
        self.count = self.count.saturating_add(1);
    }

    /// Back to the first cycle.
    pub fn reset(&mut self) {
        self.count = 1;
    }

    pub fn value(&self) -> u32 {
        self.count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_one() {
        assert_eq!(CycleCounter::new().value(), 1);
    }

    #[test]
    fn increments_by_one() {
        let mut counter = CycleCounter::new();
        counter.increment();
        counter.increment();
        assert_eq!(counter.value(), 3);
    }

    #[test]
    fn reset_returns_to_one_not_zero() {
        let mut counter = CycleCounter::new();
        counter.increment();
        counter.reset();
        assert_eq!(counter.value(), 1);
    }
}
