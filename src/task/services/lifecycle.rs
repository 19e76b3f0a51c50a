//! Task creation, lookup, editing, deletion and dashboard counters.

use super::{
    PositionAllocator, TaskServiceError, TaskServiceResult,
    access::{require_assignee, require_member},
};
use crate::config::TaskBoardConfig;
use crate::member::{
    domain::{MemberId, UserId, WorkspaceId},
    ports::MembershipRepository,
};
use crate::task::{
    domain::{
        NewTask, ProjectId, Task, TaskAnalytics, TaskChanges, TaskId, TaskName, TaskStatus,
    },
    ports::{TaskFilter, TaskRepository},
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::sync::Arc;

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    name: String,
    status: TaskStatus,
    workspace_id: WorkspaceId,
    project_id: ProjectId,
    assignee_id: MemberId,
    due_date: DateTime<Utc>,
    description: Option<String>,
}

impl CreateTaskRequest {
    /// Creates a request with the required task fields.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        status: TaskStatus,
        workspace_id: WorkspaceId,
        project_id: ProjectId,
        assignee_id: MemberId,
        due_date: DateTime<Utc>,
    ) -> Self {
        Self {
            name: name.into(),
            status,
            workspace_id,
            project_id,
            assignee_id,
            due_date,
            description: None,
        }
    }

    /// Sets the task description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Request payload for a partial task edit. Unset fields stay unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateTaskRequest {
    name: Option<String>,
    description: Option<String>,
    status: Option<TaskStatus>,
    project_id: Option<ProjectId>,
    assignee_id: Option<MemberId>,
    due_date: Option<DateTime<Utc>>,
}

impl UpdateTaskRequest {
    /// Creates an empty edit.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Renames the task.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Replaces the description; a blank value clears it.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Moves the task to another status column.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Moves the task to another project.
    #[must_use]
    pub const fn with_project(mut self, project_id: ProjectId) -> Self {
        self.project_id = Some(project_id);
        self
    }

    /// Reassigns the task.
    #[must_use]
    pub const fn with_assignee(mut self, assignee_id: MemberId) -> Self {
        self.assignee_id = Some(assignee_id);
        self
    }

    /// Reschedules the task.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }
}

/// Task lifecycle orchestration service.
///
/// Every operation first resolves the caller's membership in the task's
/// workspace.
#[derive(Clone)]
pub struct TaskLifecycleService<R, M, C>
where
    R: TaskRepository,
    M: MembershipRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    members: Arc<M>,
    clock: Arc<C>,
    allocator: PositionAllocator<R>,
}

impl<R, M, C> TaskLifecycleService<R, M, C>
where
    R: TaskRepository,
    M: MembershipRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task lifecycle service.
    #[must_use]
    pub fn new(
        repository: Arc<R>,
        members: Arc<M>,
        clock: Arc<C>,
        config: &TaskBoardConfig,
    ) -> Self {
        let allocator = PositionAllocator::new(Arc::clone(&repository), config.rank_gap);
        Self {
            repository,
            members,
            clock,
            allocator,
        }
    }

    async fn find_task_or_error(&self, task_id: TaskId) -> TaskServiceResult<Task> {
        self.repository
            .find_by_id(task_id)
            .await?
            .ok_or(TaskServiceError::NotFound(task_id))
    }

    /// Creates a task ranked into its (workspace, status) bucket.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Unauthorized`] when `caller` is not a
    /// member, [`TaskServiceError::AssigneeOutsideWorkspace`] for a foreign
    /// assignee, [`TaskServiceError::Domain`] for a blank name, and
    /// repository errors.
    pub async fn create_task(
        &self,
        caller: UserId,
        request: CreateTaskRequest,
    ) -> TaskServiceResult<Task> {
        let name = TaskName::new(request.name)?;
        require_member(&*self.members, request.workspace_id, caller).await?;
        require_assignee(&*self.members, request.workspace_id, request.assignee_id).await?;

        let new_task = NewTask {
            name,
            description: request.description,
            status: request.status,
            due_date: request.due_date,
            workspace_id: request.workspace_id,
            project_id: request.project_id,
            assignee_id: request.assignee_id,
        };
        let position = self
            .allocator
            .allocate(new_task.workspace_id, new_task.status)
            .await?;
        let task = Task::create(new_task, position, &*self.clock);
        self.repository.store(&task).await?;

        tracing::info!(
            task_id = %task.id(),
            bucket = %task.bucket(),
            position = %task.position(),
            "created task"
        );
        Ok(task)
    }

    /// Returns a task visible to `caller`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] or
    /// [`TaskServiceError::Unauthorized`].
    pub async fn get_task(&self, caller: UserId, task_id: TaskId) -> TaskServiceResult<Task> {
        let task = self.find_task_or_error(task_id).await?;
        require_member(&*self.members, task.workspace_id(), caller).await?;
        Ok(task)
    }

    /// Lists tasks matching `filter`, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Unauthorized`] when `caller` is not a
    /// member of the filtered workspace, and repository errors.
    pub async fn list_tasks(
        &self,
        caller: UserId,
        filter: &TaskFilter,
    ) -> TaskServiceResult<Vec<Task>> {
        require_member(&*self.members, filter.workspace_id, caller).await?;
        Ok(self.repository.list(filter).await?)
    }

    /// Applies a partial edit.
    ///
    /// A status change ranks the task into the target bucket as if it were
    /// newly created there.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`],
    /// [`TaskServiceError::Unauthorized`],
    /// [`TaskServiceError::AssigneeOutsideWorkspace`], domain validation
    /// errors, and repository errors.
    pub async fn update_task(
        &self,
        caller: UserId,
        task_id: TaskId,
        request: UpdateTaskRequest,
    ) -> TaskServiceResult<Task> {
        let mut task = self.find_task_or_error(task_id).await?;
        let workspace_id = task.workspace_id();
        require_member(&*self.members, workspace_id, caller).await?;

        let UpdateTaskRequest {
            name,
            description,
            status,
            project_id,
            assignee_id,
            due_date,
        } = request;
        if let Some(assignee) = assignee_id {
            require_assignee(&*self.members, workspace_id, assignee).await?;
        }
        let changes = TaskChanges {
            name: name.map(TaskName::new).transpose()?,
            description,
            project_id,
            assignee_id,
            due_date,
        };
        task.apply_changes(changes, &*self.clock);

        if let Some(target) = status.filter(|target| *target != task.status()) {
            let position = self.allocator.allocate(workspace_id, target).await?;
            task.reposition(target, position, &*self.clock);
        }

        self.repository.update(&task).await?;
        tracing::info!(task_id = %task.id(), bucket = %task.bucket(), "updated task");
        Ok(task)
    }

    /// Deletes a task. Nothing else is removed.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`],
    /// [`TaskServiceError::Unauthorized`], and repository errors.
    pub async fn delete_task(&self, caller: UserId, task_id: TaskId) -> TaskServiceResult<TaskId> {
        let task = self.find_task_or_error(task_id).await?;
        require_member(&*self.members, task.workspace_id(), caller).await?;
        self.repository.delete(task_id).await?;
        tracing::info!(task_id = %task_id, "deleted task");
        Ok(task_id)
    }

    /// Computes month-over-month counters over the tasks in `scope`, from
    /// the caller's point of view.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Unauthorized`] when `caller` is not a
    /// member of the scoped workspace, and repository errors.
    pub async fn analytics(
        &self,
        caller: UserId,
        scope: &TaskFilter,
    ) -> TaskServiceResult<TaskAnalytics> {
        let viewer = require_member(&*self.members, scope.workspace_id, caller).await?;
        let tasks = self.repository.list(scope).await?;
        Ok(TaskAnalytics::compute(&tasks, viewer.id(), self.clock.utc())?)
    }
}
