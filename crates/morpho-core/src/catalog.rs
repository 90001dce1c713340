//! Task catalog: lookup of authored tasks by id.
//!
//! This is the only place in the core where a hard failure exists
//! ([`CoreError::TaskNotFound`]). The catalog is built once and read-only
//! afterwards, so it can be shared between learner sessions without locking.

use std::collections::HashMap;

use tracing::debug;

use crate::errors::{CoreError, Result};
use crate::ids::TaskId;
use crate::task::Task;

/// Read-only collection of tasks, keyed by id, preserving authored order.
#[derive(Clone, Debug, Default)]
pub struct TaskCatalog {
    tasks: HashMap<TaskId, Task>,
    order: Vec<TaskId>,
}

impl TaskCatalog {
    /// Build a catalog, rejecting duplicate ids.
    pub fn from_tasks(tasks: impl IntoIterator<Item = Task>) -> Result<Self> {
        let mut catalog = Self::default();
        for task in tasks {
            if catalog.tasks.contains_key(&task.id) {
                return Err(CoreError::DuplicateTask {
                    task_id: task.id.into_inner(),
                });
            }
            catalog.order.push(task.id.clone());
            let _ = catalog.tasks.insert(task.id.clone(), task);
        }
        debug!(task_count = catalog.order.len(), "task catalog built");
        Ok(catalog)
    }

    /// Parse a JSON array of task records.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let tasks: Vec<Task> = serde_json::from_str(json)?;
        Self::from_tasks(tasks)
    }

    /// Look up a task by id.
    pub fn get(&self, id: &str) -> Result<&Task> {
        self.tasks
            .get(id)
            .ok_or_else(|| CoreError::TaskNotFound {
                task_id: id.to_owned(),
            })
    }

    /// Whether a task with this id exists.
    pub fn contains(&self, id: &str) -> bool {
        self.tasks.contains_key(id)
    }

    /// Task ids in authored order.
    pub fn ids(&self) -> &[TaskId] {
        &self.order
    }

    /// Tasks in authored order.
    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.order.iter().filter_map(|id| self.tasks.get(id))
    }

    /// Number of tasks.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the catalog has no tasks.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
