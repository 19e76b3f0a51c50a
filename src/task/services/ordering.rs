//! Board reads, bulk drag-and-drop reordering and bucket rebalancing.

use super::{PositionAllocator, TaskServiceError, TaskServiceResult, access::require_member};
use crate::config::TaskBoardConfig;
use crate::member::{
    domain::{UserId, WorkspaceId},
    ports::MembershipRepository,
};
use crate::task::{
    domain::{
        Board, Bucket, Position, RankGap, ReorderBatch, Task, TaskId, TaskStatus, bucket_order,
        require_single_workspace,
    },
    ports::{TaskFilter, TaskRepository, TaskRepositoryResult},
};
use mockable::Clock;
use std::collections::HashMap;
use std::sync::Arc;

/// Task ordering orchestration service.
#[derive(Clone)]
pub struct TaskOrderingService<R, M, C>
where
    R: TaskRepository,
    M: MembershipRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    members: Arc<M>,
    clock: Arc<C>,
    allocator: PositionAllocator<R>,
    rank_gap: RankGap,
    max_attempts: u32,
    max_batch_size: usize,
}

impl<R, M, C> TaskOrderingService<R, M, C>
where
    R: TaskRepository,
    M: MembershipRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task ordering service.
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
            rank_gap: config.rank_gap,
            max_attempts: config.bulk_update_max_attempts.max(1),
            max_batch_size: config.max_batch_size,
        }
    }

    /// Allocates the rank a new task would receive in `(workspace_id, status)`.
    ///
    /// # Errors
    ///
    /// Returns repository errors and rank overflow.
    pub async fn allocate(
        &self,
        workspace_id: WorkspaceId,
        status: TaskStatus,
    ) -> TaskServiceResult<Position> {
        self.allocator.allocate(workspace_id, status).await
    }

    /// Projects the tasks matching `filter` onto board columns.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Unauthorized`] when `caller` is not a
    /// member of the filtered workspace, and repository errors.
    pub async fn board(&self, caller: UserId, filter: &TaskFilter) -> TaskServiceResult<Board> {
        require_member(&*self.members, filter.workspace_id, caller).await?;
        let tasks = self.repository.list(filter).await?;
        Ok(Board::project(tasks))
    }

    /// Applies a batch of status and rank changes.
    ///
    /// Validation runs before any write: every task must exist, all tasks
    /// must share one workspace, and `caller` must be a member of it. Writes
    /// then run in batch order, one per task, each retried on transient
    /// failures. Returns the updated tasks in batch order.
    ///
    /// # Errors
    ///
    /// - [`TaskServiceError::BatchTooLarge`] above the configured size.
    /// - [`TaskServiceError::NotFound`] for the first unknown task.
    /// - [`TaskServiceError::Scope`] when tasks span workspaces.
    /// - [`TaskServiceError::Unauthorized`] for a non-member caller.
    /// - [`TaskServiceError::PartiallyApplied`] when a write still fails
    ///   after retries; earlier writes stay committed.
    pub async fn apply_bulk_update(
        &self,
        caller: UserId,
        batch: ReorderBatch,
    ) -> TaskServiceResult<Vec<Task>> {
        if batch.len() > self.max_batch_size {
            return Err(TaskServiceError::BatchTooLarge {
                size: batch.len(),
                limit: self.max_batch_size,
            });
        }

        let task_ids = batch.task_ids();
        let mut found: HashMap<TaskId, Task> = self
            .repository
            .find_by_ids(&task_ids)
            .await?
            .into_iter()
            .map(|task| (task.id(), task))
            .collect();
        if let Some(missing) = task_ids.iter().find(|id| !found.contains_key(id)) {
            return Err(TaskServiceError::NotFound(*missing));
        }

        let workspace_id = require_single_workspace(found.values()).inspect_err(|err| {
            tracing::warn!(error = %err, "rejected reorder batch spanning workspaces");
        })?;
        require_member(&*self.members, workspace_id, caller).await?;

        let moved: Vec<Task> = batch
            .into_iter()
            .filter_map(|entry| {
                let mut task = found.remove(&entry.task_id)?;
                task.reposition(entry.status, entry.position, &*self.clock);
                Some(task)
            })
            .collect();
        let applied = self.write_in_order(moved).await?;

        tracing::info!(
            workspace_id = %workspace_id,
            tasks = applied.len(),
            "applied bulk reorder"
        );
        Ok(applied)
    }

    /// Renumbers a bucket to `gap, 2·gap, …` in its current board order.
    ///
    /// Only tasks whose rank changes are written. Returns the whole column in
    /// order.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Unauthorized`] for a non-member caller,
    /// [`TaskServiceError::PartiallyApplied`] when a write fails after
    /// retries, and repository errors.
    pub async fn rebalance_bucket(
        &self,
        caller: UserId,
        workspace_id: WorkspaceId,
        status: TaskStatus,
    ) -> TaskServiceResult<Vec<Task>> {
        require_member(&*self.members, workspace_id, caller).await?;
        let bucket = Bucket::new(workspace_id, status);
        let mut column = self.repository.list_bucket(&bucket).await?;
        column.sort_by(bucket_order);

        let mut changed = Vec::new();
        for (index, task) in column.iter_mut().enumerate() {
            let target = Position::nth(index, self.rank_gap)?;
            if task.position() != target {
                task.reposition(status, target, &*self.clock);
                changed.push(task.clone());
            }
        }
        let rewritten = self.write_in_order(changed).await?.len();

        tracing::info!(
            bucket = %bucket,
            tasks = column.len(),
            rewritten,
            "rebalanced bucket"
        );
        Ok(column)
    }

    /// Writes task placements one at a time in order, stopping at the first
    /// failure.
    async fn write_in_order(&self, tasks: Vec<Task>) -> TaskServiceResult<Vec<Task>> {
        let total = tasks.len();
        let mut applied = Vec::with_capacity(total);
        for task in tasks {
            if let Err(source) = self.write_with_retry(&task).await {
                tracing::warn!(
                    task_id = %task.id(),
                    applied = applied.len(),
                    total,
                    error = %source,
                    "multi-task write stopped part way"
                );
                return Err(TaskServiceError::PartiallyApplied {
                    applied,
                    failed: task.id(),
                    total,
                    source,
                });
            }
            applied.push(task);
        }
        Ok(applied)
    }

    /// Retries an idempotent placement write on transient failures.
    async fn write_with_retry(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut attempt = 1;
        loop {
            let written = self
                .repository
                .reposition(task.id(), task.status(), task.position(), task.updated_at())
                .await;
            match written {
                Ok(()) => return Ok(()),
                Err(err) if err.is_transient() && attempt < self.max_attempts => {
                    tracing::warn!(
                        task_id = %task.id(),
                        attempt,
                        error = %err,
                        "retrying task write"
                    );
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }
}
