//! Session durations with clamping.
//!
//! Out-of-range minute values are clamped to the nearest bound, never
//! rejected: a host passing 0 or 500 still gets a usable session.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use super::Mode;

/// Work phase bounds, in minutes.
pub const WORK_MINUTES_MIN: u32 = 1;
pub const WORK_MINUTES_MAX: u32 = 90;

/// Break phase bounds, in minutes.
pub const BREAK_MINUTES_MIN: u32 = 1;
pub const BREAK_MINUTES_MAX: u32 = 60;

/// Clamp a requested work duration into `[1, 90]` minutes.
pub fn clamp_work_minutes(minutes: u32) -> u32 {
    minutes.clamp(WORK_MINUTES_MIN, WORK_MINUTES_MAX)
}

/// Clamp a requested break duration into `[1, 60]` minutes.
pub fn clamp_break_minutes(minutes: u32) -> u32 {
    minutes.clamp(BREAK_MINUTES_MIN, BREAK_MINUTES_MAX)
}

/// Configured phase lengths for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_work_minutes")]
    pub work_minutes: u32,
    #[serde(default = "default_break_minutes")]
    pub break_minutes: u32,
}

fn default_work_minutes() -> u32 {
    25
}
fn default_break_minutes() -> u32 {
    5
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            work_minutes: default_work_minutes(),
            break_minutes: default_break_minutes(),
        }
    }
}

impl SessionConfig {
    /// Create a config, clamping both values.
    pub fn new(work_minutes: u32, break_minutes: u32) -> Self {
        Self {
            work_minutes: clamp_work_minutes(work_minutes),
            break_minutes: clamp_break_minutes(break_minutes),
        }
    }

    /// Store a new work duration, clamped.
    pub fn set_work_minutes(&mut self, minutes: u32) {
        self.work_minutes = clamp_work_minutes(minutes);
    }

    /// Store a new break duration, clamped.
    pub fn set_break_minutes(&mut self, minutes: u32) {
        self.break_minutes = clamp_break_minutes(minutes);
    }

    /// Configured length of one `mode` phase.
    pub fn phase_duration(&self, mode: Mode) -> Duration {
        let minutes = match mode {
            Mode::Work => self.work_minutes,
            Mode::Break => self.break_minutes,
        };
        Duration::seconds(i64::from(minutes) * 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_25_and_5() {
        let cfg = SessionConfig::default();
        assert_eq!(cfg.work_minutes, 25);
        assert_eq!(cfg.break_minutes, 5);
    }

    #[test]
    fn new_clamps_both_bounds() {
        let cfg = SessionConfig::new(0, 500);
        assert_eq!(cfg.work_minutes, 1);
        assert_eq!(cfg.break_minutes, 60);

        let cfg = SessionConfig::new(200, 0);
        assert_eq!(cfg.work_minutes, 90);
        assert_eq!(cfg.break_minutes, 1);
    }

    #[test]
    fn in_range_values_pass_through() {
        let mut cfg = SessionConfig::default();
        cfg.set_work_minutes(45);
        cfg.set_break_minutes(10);
        assert_eq!(cfg.work_minutes, 45);
        assert_eq!(cfg.break_minutes, 10);
    }

    #[test]
    fn phase_duration_converts_minutes() {
        let cfg = SessionConfig::new(25, 5);
        assert_eq!(cfg.phase_duration(Mode::Work), Duration::seconds(1500));
        assert_eq!(cfg.phase_duration(Mode::Break), Duration::seconds(300));
    }

    #[test]
    fn toml_roundtrip_keeps_values() {
        let cfg = SessionConfig::new(40, 8);
        let text = toml::to_string(&cfg).unwrap();
        let parsed: SessionConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, cfg);
    }
}
