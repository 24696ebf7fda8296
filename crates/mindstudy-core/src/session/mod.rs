//! The focus-session subsystem: a Work/Break state machine driven by an
//! external once-per-second tick.
//!
//! ## Structure
//!
//! - [`PhaseClock`] turns timestamps into remaining phase time
//! - [`SessionConfig`] holds the clamped work/break durations
//! - [`CycleCounter`] numbers the cycle currently in progress
//! - [`TaskBinding`] pins the session to a planner task or free label
//! - [`FocusEngine`] owns all of the above and processes controls

mod config;
mod cycle;
mod engine;
mod phase_clock;
mod task;

pub use config::SessionConfig;
pub use cycle::CycleCounter;
pub use engine::{FocusEngine, SessionSnapshot, SessionStatus};
pub use phase_clock::PhaseClock;
pub use task::{TaskBinding, TaskRef, NO_TASK_LABEL};

use serde::{Deserialize, Serialize};

/// Which half of the cycle the session is in.
///
/// Modes alternate strictly; a phase expiry flips to the other mode and
/// never skips or repeats one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Work,
    Break,
}

impl Mode {
    /// The mode the next phase runs in.
    pub fn flip(self) -> Self {
        match self {
            Mode::Work => Mode::Break,
            Mode::Break => Mode::Work,
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::Work => write!(f, "work"),
            Mode::Break => write!(f, "break"),
        }
    }
}
