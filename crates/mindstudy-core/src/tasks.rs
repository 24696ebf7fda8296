//! Read-only view of the study planner's tasks.
//!
//! The session engine never creates or edits tasks; it only resolves an
//! id to a title when a session is attributed to one. [`TaskList`] is
//! the lookup boundary, and [`InMemoryTaskList`] backs it with the JSON
//! array the planner exports.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::TaskListError;

/// One planner task.
///
/// Extra planner fields (subject, due date, completion flags) are
/// ignored on parse; only what the selection flow needs is kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannerTask {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Lookup boundary between the session engine and the planner.
pub trait TaskList: Send + Sync {
    /// All tasks in planner order.
    fn tasks(&self) -> &[PlannerTask];

    fn find(&self, id: i64) -> Option<&PlannerTask> {
        self.tasks().iter().find(|task| task.id == id)
    }
}

/// Task list held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskList {
    tasks: Vec<PlannerTask>,
}

impl InMemoryTaskList {
    pub fn new(tasks: Vec<PlannerTask>) -> Self {
        Self { tasks }
    }

    /// Read a planner JSON export.
    ///
    /// A missing file is an empty list; the planner may simply have no
    /// tasks yet.
    pub fn load(path: &Path) -> Result<Self, TaskListError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(err) => {
                return Err(TaskListError::ReadFailed {
                    path: path.to_path_buf(),
                    source: err,
                });
            }
        };
        let tasks: Vec<PlannerTask> =
            serde_json::from_str(&content).map_err(|err| TaskListError::ParseFailed {
                path: path.to_path_buf(),
                message: err.to_string(),
            })?;
        Ok(Self::new(tasks))
    }
}

impl TaskList for InMemoryTaskList {
    fn tasks(&self) -> &[PlannerTask] {
        &self.tasks
    }
}
