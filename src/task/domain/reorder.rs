//! Reorder batches submitted by drag-and-drop on the board.

use super::{Position, Task, TaskDomainError, TaskId, TaskStatus, WorkspaceScopeError};
use crate::member::domain::WorkspaceId;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

/// Target status and rank for one task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskReorder {
    /// Task to move.
    pub task_id: TaskId,
    /// New status.
    pub status: TaskStatus,
    /// New rank within the target bucket.
    pub position: Position,
}

impl TaskReorder {
    /// Creates a reorder entry.
    #[must_use]
    pub const fn new(task_id: TaskId, status: TaskStatus, position: Position) -> Self {
        Self {
            task_id,
            status,
            position,
        }
    }
}

/// Non-empty, duplicate-free sequence of reorder entries in caller order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReorderBatch(Vec<TaskReorder>);

impl ReorderBatch {
    /// Validates a batch.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyReorderBatch`] for an empty batch and
    /// [`TaskDomainError::DuplicateReorderEntry`] when a task is named twice.
    pub fn new(entries: impl IntoIterator<Item = TaskReorder>) -> Result<Self, TaskDomainError> {
        let entries: Vec<TaskReorder> = entries.into_iter().collect();
        if entries.is_empty() {
            return Err(TaskDomainError::EmptyReorderBatch);
        }
        let mut seen = HashSet::with_capacity(entries.len());
        if let Some(duplicate) = entries.iter().find(|entry| !seen.insert(entry.task_id)) {
            return Err(TaskDomainError::DuplicateReorderEntry(duplicate.task_id));
        }
        Ok(Self(entries))
    }

    /// Returns the entries in caller order.
    #[must_use]
    pub fn entries(&self) -> &[TaskReorder] {
        &self.0
    }

    /// Returns the task identifiers in caller order.
    #[must_use]
    pub fn task_ids(&self) -> Vec<TaskId> {
        self.0.iter().map(|entry| entry.task_id).collect()
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when the batch holds no entries, which validation rules
    /// out.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl IntoIterator for ReorderBatch {
    type Item = TaskReorder;
    type IntoIter = std::vec::IntoIter<TaskReorder>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Returns the single workspace owning every task.
///
/// # Errors
///
/// Returns [`WorkspaceScopeError::Empty`] when `tasks` is empty and
/// [`WorkspaceScopeError::CrossWorkspace`] listing the distinct workspaces
/// when there is more than one.
pub fn require_single_workspace<'a>(
    tasks: impl IntoIterator<Item = &'a Task>,
) -> Result<WorkspaceId, WorkspaceScopeError> {
    let workspaces: BTreeSet<WorkspaceId> = tasks.into_iter().map(Task::workspace_id).collect();
    let mut iter = workspaces.iter().copied();
    match (iter.next(), iter.next()) {
        (None, _) => Err(WorkspaceScopeError::Empty),
        (Some(workspace_id), None) => Ok(workspace_id),
        (Some(_), Some(_)) => Err(WorkspaceScopeError::CrossWorkspace(
            workspaces.into_iter().collect(),
        )),
    }
}
