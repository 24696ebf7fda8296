//! Binding a focus session to the task being worked on.
//!
//! A session always has a display label. Before anything is chosen it
//! reads [`NO_TASK_LABEL`]; afterwards it is either a free-form custom
//! label or a planner task's title, with the planner id kept alongside
//! in the latter case.

use serde::{Deserialize, Serialize};

use crate::tasks::TaskList;

/// Label shown before any task has been selected.
pub const NO_TASK_LABEL: &str = "No task selected yet";

/// The task a session is attributed to. Custom labels carry no id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRef {
    pub id: Option<i64>,
    pub label: String,
}

/// Outcome of a selection attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// The binding changed to the requested task or label.
    Applied,
    /// Nothing usable was offered; the previous binding stands.
    Retained,
}

/// Current task attribution of a session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskBinding {
    active: Option<TaskRef>,
}

impl TaskBinding {
    pub fn label(&self) -> &str {
        self.active
            .as_ref()
            .map(|task| task.label.as_str())
            .unwrap_or(NO_TASK_LABEL)
    }

    pub fn task_id(&self) -> Option<i64> {
        self.active.as_ref().and_then(|task| task.id)
    }

    /// Apply a selection.
    ///
    /// A non-blank custom label always wins and detaches any planner
    /// id. Otherwise `task_id` is resolved through `directory` and the
    /// matching task binds by title. An id that does not resolve, or no
    /// input at all, retains the current binding untouched.
    pub fn select(
        &mut self,
        task_id: Option<i64>,
        custom: &str,
        directory: &dyn TaskList,
    ) -> Selection {
        let custom = custom.trim();
        if !custom.is_empty() {
            self.active = Some(TaskRef {
                id: None,
                label: custom.to_string(),
            });
            return Selection::Applied;
        }
        if let Some(task) = task_id.and_then(|id| directory.find(id)) {
            self.active = Some(TaskRef {
                id: Some(task.id),
                label: task.title.clone(),
            });
            return Selection::Applied;
        }
        Selection::Retained
    }
}
