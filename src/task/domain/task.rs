//! Task aggregate root and bucket key.

use super::{Position, ProjectId, TaskDomainError, TaskId, TaskStatus};
use crate::member::domain::{MemberId, WorkspaceId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Validated, trimmed task name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskName(String);

impl TaskName {
    /// Creates a validated task name.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTaskName`] when the name is blank.
    pub fn new(value: impl Into<String>) -> Result<Self, TaskDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TaskDomainError::EmptyTaskName);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the name as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TaskName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TaskName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The unit of position ordering: one status column of one workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Bucket {
    /// Owning workspace.
    pub workspace_id: WorkspaceId,
    /// Status column.
    pub status: TaskStatus,
}

impl Bucket {
    /// Creates a bucket key.
    #[must_use]
    pub const fn new(workspace_id: WorkspaceId, status: TaskStatus) -> Self {
        Self {
            workspace_id,
            status,
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.workspace_id, self.status.as_str())
    }
}

/// Validated fields for a task that has not been ranked yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    /// Task name.
    pub name: TaskName,
    /// Optional free-form description.
    pub description: Option<String>,
    /// Initial status.
    pub status: TaskStatus,
    /// Due date.
    pub due_date: DateTime<Utc>,
    /// Owning workspace.
    pub workspace_id: WorkspaceId,
    /// Owning project.
    pub project_id: ProjectId,
    /// Assigned member.
    pub assignee_id: MemberId,
}

impl NewTask {
    /// Returns the bucket the task will be ranked in.
    #[must_use]
    pub const fn bucket(&self) -> Bucket {
        Bucket::new(self.workspace_id, self.status)
    }
}

/// Descriptive fields changed by an edit. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskChanges {
    /// Replacement name.
    pub name: Option<TaskName>,
    /// Replacement description; a blank value clears it.
    pub description: Option<String>,
    /// Replacement project.
    pub project_id: Option<ProjectId>,
    /// Replacement assignee.
    pub assignee_id: Option<MemberId>,
    /// Replacement due date.
    pub due_date: Option<DateTime<Utc>>,
}

impl TaskChanges {
    /// Returns `true` when no field would change.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.project_id.is_none()
            && self.assignee_id.is_none()
            && self.due_date.is_none()
    }
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    name: TaskName,
    description: Option<String>,
    status: TaskStatus,
    due_date: DateTime<Utc>,
    position: Position,
    workspace_id: WorkspaceId,
    project_id: ProjectId,
    assignee_id: MemberId,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted name.
    pub name: TaskName,
    /// Persisted description.
    pub description: Option<String>,
    /// Persisted status.
    pub status: TaskStatus,
    /// Persisted due date.
    pub due_date: DateTime<Utc>,
    /// Persisted rank.
    pub position: Position,
    /// Owning workspace.
    pub workspace_id: WorkspaceId,
    /// Owning project.
    pub project_id: ProjectId,
    /// Assigned member.
    pub assignee_id: MemberId,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a task at an already allocated position.
    #[must_use]
    pub fn create(new_task: NewTask, position: Position, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: TaskId::new(),
            name: new_task.name,
            description: normalize_description(new_task.description),
            status: new_task.status,
            due_date: new_task.due_date,
            position,
            workspace_id: new_task.workspace_id,
            project_id: new_task.project_id,
            assignee_id: new_task.assignee_id,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            description: data.description,
            status: data.status,
            due_date: data.due_date,
            position: data.position,
            workspace_id: data.workspace_id,
            project_id: data.project_id,
            assignee_id: data.assignee_id,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the task name.
    #[must_use]
    pub const fn name(&self) -> &TaskName {
        &self.name
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the due date.
    #[must_use]
    pub const fn due_date(&self) -> DateTime<Utc> {
        self.due_date
    }

    /// Returns the rank within the task's bucket.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Returns the owning workspace.
    #[must_use]
    pub const fn workspace_id(&self) -> WorkspaceId {
        self.workspace_id
    }

    /// Returns the owning project.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the assigned member.
    #[must_use]
    pub const fn assignee_id(&self) -> MemberId {
        self.assignee_id
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns the bucket the task is ranked in.
    #[must_use]
    pub const fn bucket(&self) -> Bucket {
        Bucket::new(self.workspace_id, self.status)
    }

    /// Moves the task to `status` at `position`.
    ///
    /// Every status transition is allowed and the rank may change without a
    /// status change.
    pub fn reposition(&mut self, status: TaskStatus, position: Position, clock: &impl Clock) {
        self.place(status, position, clock.utc());
    }

    /// Sets the placement with an explicit update timestamp.
    ///
    /// Repositories use this to apply a placement-only write without
    /// touching the descriptive fields.
    pub const fn place(
        &mut self,
        status: TaskStatus,
        position: Position,
        updated_at: DateTime<Utc>,
    ) {
        self.status = status;
        self.position = position;
        self.updated_at = updated_at;
    }

    /// Applies descriptive edits. Does nothing when `changes` is empty.
    pub fn apply_changes(&mut self, changes: TaskChanges, clock: &impl Clock) {
        if changes.is_empty() {
            return;
        }
        let TaskChanges {
            name,
            description,
            project_id,
            assignee_id,
            due_date,
        } = changes;
        if let Some(value) = name {
            self.name = value;
        }
        if let Some(value) = description {
            self.description = normalize_description(Some(value));
        }
        if let Some(value) = project_id {
            self.project_id = value;
        }
        if let Some(value) = assignee_id {
            self.assignee_id = value;
        }
        if let Some(value) = due_date {
            self.due_date = value;
        }
        self.touch(clock);
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}

fn normalize_description(description: Option<String>) -> Option<String> {
    description.filter(|text| !text.trim().is_empty())
}
