//! Position allocation for tasks entering a bucket.

use super::TaskServiceResult;
use crate::member::domain::WorkspaceId;
use crate::task::{
    domain::{Bucket, Position, RankGap, TaskStatus},
    ports::TaskRepository,
};
use std::sync::Arc;

/// Assigns ranks to tasks entering a (workspace, status) bucket.
///
/// The rank is `gap` for an empty bucket and `lowest + gap` otherwise.
#[derive(Debug)]
pub struct PositionAllocator<R>
where
    R: TaskRepository,
{
    repository: Arc<R>,
    gap: RankGap,
}

impl<R> Clone for PositionAllocator<R>
where
    R: TaskRepository,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            gap: self.gap,
        }
    }
}

impl<R> PositionAllocator<R>
where
    R: TaskRepository,
{
    /// Creates an allocator over `repository` using `gap`.
    #[must_use]
    pub const fn new(repository: Arc<R>, gap: RankGap) -> Self {
        Self { repository, gap }
    }

    /// Allocates the rank for a new task in `(workspace_id, status)`.
    ///
    /// # Errors
    ///
    /// Returns [`super::TaskServiceError::Repository`] when the bucket query
    /// fails and [`super::TaskServiceError::Domain`] when the rank overflows.
    pub async fn allocate(
        &self,
        workspace_id: WorkspaceId,
        status: TaskStatus,
    ) -> TaskServiceResult<Position> {
        let bucket = Bucket::new(workspace_id, status);
        let lowest = self
            .repository
            .lowest_in_bucket(&bucket)
            .await?
            .map(|task| task.position());
        let position = Position::after_lowest(lowest, self.gap)?;
        tracing::debug!(bucket = %bucket, position = %position, "allocated task position");
        Ok(position)
    }
}
