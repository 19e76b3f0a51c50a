//! Repository port for task persistence and bucket queries.

use crate::member::domain::{MemberId, WorkspaceId};
use crate::task::domain::{Bucket, Position, ProjectId, Task, TaskId, TaskStatus};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Criteria for listing tasks of one workspace.
///
/// Unset criteria do not filter. `search` matches a case-insensitive
/// substring of the name or description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskFilter {
    /// Workspace to list.
    pub workspace_id: WorkspaceId,
    /// Restrict to one project.
    pub project_id: Option<ProjectId>,
    /// Restrict to one assignee.
    pub assignee_id: Option<MemberId>,
    /// Restrict to one status.
    pub status: Option<TaskStatus>,
    /// Restrict to an exact due date.
    pub due_date: Option<DateTime<Utc>>,
    /// Free-text search.
    pub search: Option<String>,
}

impl TaskFilter {
    /// Creates a filter matching every task of a workspace.
    #[must_use]
    pub const fn for_workspace(workspace_id: WorkspaceId) -> Self {
        Self {
            workspace_id,
            project_id: None,
            assignee_id: None,
            status: None,
            due_date: None,
            search: None,
        }
    }

    /// Restricts to one project.
    #[must_use]
    pub const fn with_project(mut self, project_id: ProjectId) -> Self {
        self.project_id = Some(project_id);
        self
    }

    /// Restricts to one assignee.
    #[must_use]
    pub const fn with_assignee(mut self, assignee_id: MemberId) -> Self {
        self.assignee_id = Some(assignee_id);
        self
    }

    /// Restricts to one status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Restricts to an exact due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Adds a free-text search term. Blank terms are ignored.
    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        let term = search.into();
        let trimmed = term.trim();
        self.search = (!trimmed.is_empty()).then(|| trimmed.to_owned());
        self
    }

    /// Returns `true` when `task` satisfies every criterion.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        task.workspace_id() == self.workspace_id
            && self.project_id.is_none_or(|id| task.project_id() == id)
            && self.assignee_id.is_none_or(|id| task.assignee_id() == id)
            && self.status.is_none_or(|status| task.status() == status)
            && self.due_date.is_none_or(|due| task.due_date() == due)
            && self.search.as_deref().is_none_or(|term| matches_search(task, term))
    }
}

fn matches_search(task: &Task, term: &str) -> bool {
    let needle = term.to_lowercase();
    task.name().as_str().to_lowercase().contains(&needle)
        || task
            .description()
            .is_some_and(|text| text.to_lowercase().contains(&needle))
}

/// Task persistence contract.
///
/// Writes are independent per task: implementations give no atomicity across
/// calls and resolve concurrent writers last-writer-wins.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateTask`] when the task ID already
    /// exists.
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Persists changes to an existing task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist.
    async fn update(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Moves an existing task to `status` at `position`.
    ///
    /// Only the status, rank and `updated_at` are written, so a concurrent
    /// edit of any other field survives.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist.
    async fn reposition(
        &self,
        id: TaskId,
        status: TaskStatus,
        position: Position,
        updated_at: DateTime<Utc>,
    ) -> TaskRepositoryResult<()>;

    /// Deletes a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist.
    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Finds every existing task among `ids`, in no particular order.
    ///
    /// Unknown identifiers are skipped.
    async fn find_by_ids(&self, ids: &[TaskId]) -> TaskRepositoryResult<Vec<Task>>;

    /// Returns the task with the lowest rank in `bucket`, if any.
    async fn lowest_in_bucket(&self, bucket: &Bucket) -> TaskRepositoryResult<Option<Task>>;

    /// Returns every task of `bucket` in ascending rank order.
    async fn list_bucket(&self, bucket: &Bucket) -> TaskRepositoryResult<Vec<Task>>;

    /// Returns the tasks matching `filter`, newest first.
    async fn list(&self, filter: &TaskFilter) -> TaskRepositoryResult<Vec<Task>>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }

    /// Returns `true` for failures worth retrying with the same write.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::Persistence(_))
    }
}
