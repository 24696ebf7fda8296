//! Remaining-time bookkeeping for the current phase.
//!
//! The clock stores the instant the phase was anchored at, not a
//! countdown, so remaining time is recomputed from absolute timestamps
//! on every query. Missed, late, or duplicated ticks therefore never
//! accumulate drift.
//!
//! At most one of `started_at` (running) and `paused_remaining`
//! (paused) is set; both clear means idle with the full phase ahead.

use chrono::{DateTime, Duration, Utc};

/// Timestamp-based countdown for one phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseClock {
    total: Duration,
    started_at: Option<DateTime<Utc>>,
    paused_remaining: Option<Duration>,
}

impl PhaseClock {
    /// An idle clock with `total` ahead of it.
    pub fn idle(total: Duration) -> Self {
        Self {
            total,
            started_at: None,
            paused_remaining: None,
        }
    }

    /// Anchor the phase at `now` and begin counting down.
    pub fn start(&mut self, now: DateTime<Utc>) {
        self.started_at = Some(now);
        self.paused_remaining = None;
    }

    /// Freeze the countdown, capturing the remaining time.
    ///
    /// No-op unless running.
    pub fn pause(&mut self, now: DateTime<Utc>) {
        if self.started_at.is_some() {
            self.paused_remaining = Some(self.remaining(now));
            self.started_at = None;
        }
    }

    /// Continue from the frozen remaining time.
    ///
    /// Re-anchors so that `remaining(now)` equals the value captured at
    /// pause: a pause/resume pair with no elapsed real time changes
    /// nothing. No-op unless paused.
    pub fn resume(&mut self, now: DateTime<Utc>) {
        if let Some(remaining) = self.paused_remaining.take() {
            self.started_at = Some(now - (self.total - remaining));
        }
    }

    /// Swap in a new phase duration and anchor it at `now`, running.
    ///
    /// Used on phase expiry: the next phase starts counting from the
    /// tick that observed the boundary.
    pub fn restart(&mut self, total: Duration, now: DateTime<Utc>) {
        self.total = total;
        self.start(now);
    }

    /// Back to idle with a (possibly new) full duration ahead.
    pub fn reset(&mut self, total: Duration) {
        self.total = total;
        self.started_at = None;
        self.paused_remaining = None;
    }

    /// Time left in the current phase, clamped to `[0, total]`.
    pub fn remaining(&self, now: DateTime<Utc>) -> Duration {
        let remaining = match (self.started_at, self.paused_remaining) {
            (Some(started_at), _) => self.total - (now - started_at),
            (None, Some(frozen)) => frozen,
            (None, None) => self.total,
        };
        remaining.clamp(Duration::zero(), self.total)
    }

    pub fn total(&self) -> Duration {
        self.total
    }

    pub fn is_running(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn is_paused(&self) -> bool {
        self.paused_remaining.is_some()
    }

    pub fn is_idle(&self) -> bool {
        self.started_at.is_none() && self.paused_remaining.is_none()
    }
}
