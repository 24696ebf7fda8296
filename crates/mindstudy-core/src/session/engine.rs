//! Focus session engine.
//!
//! A wall-clock state machine over alternating work and break phases.
//! It owns no threads and schedules nothing - the host calls `tick()`
//! at whatever cadence it likes, and remaining time is recomputed from
//! timestamps, so sparse, bursty, or duplicated ticks cannot drift.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running <-> Paused
//!   ^       |
//!   +-------+-- reset() from any state
//! ```
//!
//! Phase expiry happens inside `tick()`: the tick that observes zero
//! remaining flips work <-> break, bumps the cycle on break -> work,
//! and anchors the next phase at its own `now`.
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = FocusEngine::new(SessionConfig::default());
//! engine.start();
//! // In a loop:
//! engine.tick(); // Returns Some(PhaseCompleted) at a boundary.
//! ```

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::clock::{Clock, SystemClock};
use crate::events::SessionEvent;
use crate::session::config::SessionConfig;
use crate::session::cycle::CycleCounter;
use crate::session::phase_clock::PhaseClock;
use crate::session::task::{Selection, TaskBinding};
use crate::session::Mode;
use crate::tasks::{InMemoryTaskList, TaskList};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Idle,
    Running,
    Paused,
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SessionStatus::Idle => "idle",
            SessionStatus::Running => "running",
            SessionStatus::Paused => "paused",
        };
        f.write_str(s)
    }
}

/// Read-only projection of the engine at one instant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub status: SessionStatus,
    pub mode: Mode,
    pub remaining_seconds: u64,
    pub total_seconds: u64,
    /// 0.0 .. 1.0 through the current phase, in whole seconds.
    pub progress: f64,
    pub cycle: u32,
    pub task_label: String,
    pub task_id: Option<i64>,
    pub at: DateTime<Utc>,
}

type Listener = Box<dyn FnMut(&SessionEvent) + Send>;

/// Core session engine.
///
/// Reads time only through the injected [`Clock`], never the ambient
/// system clock, so hosts and tests control the timeline completely.
pub struct FocusEngine {
    clock: Box<dyn Clock>,
    config: SessionConfig,
    mode: Mode,
    phase: PhaseClock,
    cycles: CycleCounter,
    task: TaskBinding,
    tasks: Box<dyn TaskList>,
    listeners: Vec<Listener>,
}

impl FocusEngine {
    /// Engine on the system clock, idle at the start of a work phase.
    pub fn new(config: SessionConfig) -> Self {
        Self::with_clock(config, Box::new(SystemClock))
    }

    /// Engine on a caller-supplied clock.
    pub fn with_clock(config: SessionConfig, clock: Box<dyn Clock>) -> Self {
        let phase = PhaseClock::idle(config.phase_duration(Mode::Work));
        Self {
            clock,
            config,
            mode: Mode::Work,
            phase,
            cycles: CycleCounter::default(),
            task: TaskBinding::default(),
            tasks: Box::new(InMemoryTaskList::default()),
            listeners: Vec::new(),
        }
    }

    /// Swap in the planner task directory used by `select_task`.
    pub fn set_task_list(&mut self, tasks: Box<dyn TaskList>) {
        self.tasks = tasks;
    }

    /// Register a callback invoked with every produced event.
    pub fn on_event(&mut self, listener: impl FnMut(&SessionEvent) + Send + 'static) {
        self.listeners.push(Box::new(listener));
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn status(&self) -> SessionStatus {
        if self.phase.is_running() {
            SessionStatus::Running
        } else if self.phase.is_paused() {
            SessionStatus::Paused
        } else {
            SessionStatus::Idle
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_running(&self) -> bool {
        self.phase.is_running()
    }

    pub fn remaining_seconds(&self) -> u64 {
        let now = self.clock.now();
        self.phase.remaining(now).num_seconds().max(0) as u64
    }

    pub fn total_seconds(&self) -> u64 {
        self.phase.total().num_seconds().max(0) as u64
    }

    /// 0.0 .. 1.0 progress through the current phase.
    pub fn progress_fraction(&self) -> f64 {
        let total = self.total_seconds();
        if total == 0 {
            return 0.0;
        }
        let elapsed = total - self.remaining_seconds().min(total);
        (elapsed as f64 / total as f64).clamp(0.0, 1.0)
    }

    pub fn cycle_count(&self) -> u32 {
        self.cycles.value()
    }

    pub fn active_task_label(&self) -> &str {
        self.task.label()
    }

    pub fn active_task_id(&self) -> Option<i64> {
        self.task.task_id()
    }

    pub fn work_minutes(&self) -> u32 {
        self.config.work_minutes
    }

    pub fn break_minutes(&self) -> u32 {
        self.config.break_minutes
    }

    /// Build a full state snapshot.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            status: self.status(),
            mode: self.mode,
            remaining_seconds: self.remaining_seconds(),
            total_seconds: self.total_seconds(),
            progress: self.progress_fraction(),
            cycle: self.cycles.value(),
            task_label: self.task.label().to_string(),
            task_id: self.task.task_id(),
            at: self.clock.now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin the current phase. Only valid from Idle; resuming a paused
    /// session is `resume()`.
    pub fn start(&mut self) -> Option<SessionEvent> {
        if !self.phase.is_idle() {
            return None;
        }
        let now = self.clock.now();
        self.phase.start(now);
        Some(self.emit(SessionEvent::SessionStarted {
            mode: self.mode,
            duration_secs: self.total_seconds(),
            at: now,
        }))
    }

    pub fn pause(&mut self) -> Option<SessionEvent> {
        if !self.phase.is_running() {
            return None;
        }
        let now = self.clock.now();
        self.phase.pause(now);
        Some(self.emit(SessionEvent::SessionPaused {
            remaining_secs: self.remaining_seconds(),
            at: now,
        }))
    }

    pub fn resume(&mut self) -> Option<SessionEvent> {
        if !self.phase.is_paused() {
            return None;
        }
        let now = self.clock.now();
        self.phase.resume(now);
        Some(self.emit(SessionEvent::SessionResumed {
            remaining_secs: self.remaining_seconds(),
            at: now,
        }))
    }

    /// Abandon the session: back to an idle work phase at cycle 1.
    /// The task binding is left alone. Always succeeds.
    pub fn reset(&mut self) -> SessionEvent {
        let now = self.clock.now();
        self.mode = Mode::Work;
        self.cycles.reset();
        self.phase.reset(self.config.phase_duration(Mode::Work));
        self.emit(SessionEvent::SessionReset { at: now })
    }

    /// Call periodically while a session runs.
    ///
    /// Returns `Some(PhaseCompleted)` on the tick that observes the
    /// phase boundary; the next phase starts counting from that tick's
    /// `now`. At most one transition per call, however late the tick.
    pub fn tick(&mut self) -> Option<SessionEvent> {
        if !self.phase.is_running() {
            return None;
        }
        let now = self.clock.now();
        if self.phase.remaining(now) > chrono::Duration::zero() {
            return None;
        }
        let completed = self.mode;
        self.mode = completed.flip();
        if completed == Mode::Break {
            self.cycles.increment();
        }
        self.phase.restart(self.config.phase_duration(self.mode), now);
        Some(self.emit(SessionEvent::PhaseCompleted {
            completed,
            next: self.mode,
            cycle: self.cycles.value(),
            at: now,
        }))
    }

    /// Change the work phase length, clamped to its bounds.
    ///
    /// Ignored while running. While paused the new length applies from
    /// the next work phase; the frozen remaining time is untouched.
    pub fn set_work_minutes(&mut self, minutes: u32) -> Option<SessionEvent> {
        if self.phase.is_running() {
            debug!(minutes, "work length change ignored while running");
            return None;
        }
        self.config.set_work_minutes(minutes);
        self.refresh_idle_phase();
        Some(self.config_updated())
    }

    /// Change the break phase length, clamped to its bounds.
    ///
    /// Same acceptance rules as [`Self::set_work_minutes`].
    pub fn set_break_minutes(&mut self, minutes: u32) -> Option<SessionEvent> {
        if self.phase.is_running() {
            debug!(minutes, "break length change ignored while running");
            return None;
        }
        self.config.set_break_minutes(minutes);
        self.refresh_idle_phase();
        Some(self.config_updated())
    }

    /// Attribute the session to a task.
    ///
    /// A non-blank `custom` label wins; otherwise `task_id` is looked
    /// up in the planner task directory and binds by title. With
    /// neither, the previous binding is retained and no event is
    /// produced.
    pub fn select_task(&mut self, task_id: Option<i64>, custom: &str) -> Option<SessionEvent> {
        match self.task.select(task_id, custom, self.tasks.as_ref()) {
            Selection::Applied => {
                let now = self.clock.now();
                Some(self.emit(SessionEvent::TaskSelected {
                    task_id: self.task.task_id(),
                    label: self.task.label().to_string(),
                    at: now,
                }))
            }
            Selection::Retained => {
                debug!(?task_id, "task selection retained previous binding");
                None
            }
        }
    }

    // ── Internal ─────────────────────────────────────────────────────

    /// While idle the visible remaining is the configured total, so a
    /// config change re-derives the phase in place. Running is ruled
    /// out by the callers; a paused phase keeps its frozen remaining.
    fn refresh_idle_phase(&mut self) {
        if self.phase.is_idle() {
            self.phase = PhaseClock::idle(self.config.phase_duration(self.mode));
        }
    }

    fn config_updated(&mut self) -> SessionEvent {
        let now = self.clock.now();
        self.emit(SessionEvent::ConfigUpdated {
            work_minutes: self.config.work_minutes,
            break_minutes: self.config.break_minutes,
            at: now,
        })
    }

    fn emit(&mut self, event: SessionEvent) -> SessionEvent {
        for listener in &mut self.listeners {
            listener(&event);
        }
        event
    }
}

impl fmt::Debug for FocusEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FocusEngine")
            .field("status", &self.status())
            .field("mode", &self.mode)
            .field("cycle", &self.cycles.value())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
