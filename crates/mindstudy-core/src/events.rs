use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::session::Mode;

/// Every accepted session mutation produces a SessionEvent.
/// The CLI prints them; listeners registered on the engine receive them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SessionEvent {
    SessionStarted {
        mode: Mode,
        duration_secs: u64,
        at: DateTime<Utc>,
    },
    SessionPaused {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    SessionResumed {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    /// A phase ran out and the session rolled into the next one.
    /// `cycle` is the number already bumped for the new phase.
    PhaseCompleted {
        completed: Mode,
        next: Mode,
        cycle: u32,
        at: DateTime<Utc>,
    },
    SessionReset {
        at: DateTime<Utc>,
    },
    ConfigUpdated {
        work_minutes: u32,
        break_minutes: u32,
        at: DateTime<Utc>,
    },
    TaskSelected {
        task_id: Option<i64>,
        label: String,
        at: DateTime<Utc>,
    },
}

impl SessionEvent {
    /// Timestamp the event was stamped with.
    pub fn at(&self) -> DateTime<Utc> {
        match self {
            SessionEvent::SessionStarted { at, .. }
            | SessionEvent::SessionPaused { at, .. }
            | SessionEvent::SessionResumed { at, .. }
            | SessionEvent::PhaseCompleted { at, .. }
            | SessionEvent::SessionReset { at }
            | SessionEvent::ConfigUpdated { at, .. }
            | SessionEvent::TaskSelected { at, .. } => *at,
        }
    }
}
