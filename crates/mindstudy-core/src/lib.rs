//! # MindStudy Core Library
//!
//! Core business logic for the MindStudy focus-session timer. The
//! engine is a pure state machine over injected time: it owns no
//! threads and does no IO, so any host (the bundled CLI, a GUI shell,
//! a service) can drive it by calling `tick()` on its own schedule.
//!
//! ## Architecture
//!
//! - **Session Engine**: alternating work/break phases computed from
//!   wall-clock timestamps, immune to missed or duplicated ticks
//! - **Clock**: injected time source; tests substitute a fake to walk
//!   sessions through hours in microseconds
//! - **Tasks**: read-only view of the study planner's task export, used
//!   to attribute a session to the task being worked on
//! - **Settings**: TOML-based preferences for phase lengths and the
//!   planner export location
//!
//! ## Key Components
//!
//! - [`FocusEngine`]: session state machine
//! - [`Clock`]: time capability, with [`SystemClock`] and [`FakeClock`]
//! - [`Settings`]: host configuration management
//! - [`TaskList`]: planner lookup boundary

pub mod clock;
pub mod error;
pub mod events;
pub mod session;
pub mod settings;
pub mod tasks;

pub use clock::{Clock, FakeClock, SystemClock};
pub use error::{CoreError, Result, SettingsError, TaskListError};
pub use events::SessionEvent;
pub use session::{
    FocusEngine, Mode, SessionConfig, SessionSnapshot, SessionStatus, NO_TASK_LABEL,
};
pub use settings::{data_dir, Settings};
pub use tasks::{InMemoryTaskList, PlannerTask, TaskList};
