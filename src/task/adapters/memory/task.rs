//! In-memory repository for task ordering tests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::task::{
    domain::{Bucket, Position, Task, TaskId, TaskStatus, bucket_order},
    ports::{TaskFilter, TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Thread-safe in-memory task repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<HashMap<TaskId, Task>>>,
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl std::fmt::Display) -> TaskRepositoryError {
    TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

/// Collects the tasks of one bucket in ascending rank order.
fn bucket_tasks(tasks: &HashMap<TaskId, Task>, bucket: &Bucket) -> Vec<Task> {
    let mut selected: Vec<Task> = tasks
        .values()
        .filter(|task| task.bucket() == *bucket)
        .cloned()
        .collect();
    selected.sort_by(bucket_order);
    selected
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut tasks = self.state.write().map_err(lock_error)?;
        if tasks.contains_key(&task.id()) {
            return Err(TaskRepositoryError::DuplicateTask(task.id()));
        }
        tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut tasks = self.state.write().map_err(lock_error)?;
        let slot = tasks
            .get_mut(&task.id())
            .ok_or(TaskRepositoryError::NotFound(task.id()))?;
        *slot = task.clone();
        Ok(())
    }

    async fn reposition(
        &self,
        id: TaskId,
        status: TaskStatus,
        position: Position,
        updated_at: DateTime<Utc>,
    ) -> TaskRepositoryResult<()> {
        let mut tasks = self.state.write().map_err(lock_error)?;
        let slot = tasks
            .get_mut(&id)
            .ok_or(TaskRepositoryError::NotFound(id))?;
        slot.place(status, position, updated_at);
        Ok(())
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        let mut tasks = self.state.write().map_err(lock_error)?;
        tasks
            .remove(&id)
            .map(|_| ())
            .ok_or(TaskRepositoryError::NotFound(id))
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let tasks = self.state.read().map_err(lock_error)?;
        Ok(tasks.get(&id).cloned())
    }

    async fn find_by_ids(&self, ids: &[TaskId]) -> TaskRepositoryResult<Vec<Task>> {
        let tasks = self.state.read().map_err(lock_error)?;
        Ok(ids.iter().filter_map(|id| tasks.get(id).cloned()).collect())
    }

    async fn lowest_in_bucket(&self, bucket: &Bucket) -> TaskRepositoryResult<Option<Task>> {
        let tasks = self.state.read().map_err(lock_error)?;
        Ok(tasks
            .values()
            .filter(|task| task.bucket() == *bucket)
            .min_by(|left, right| bucket_order(left, right))
            .cloned())
    }

    async fn list_bucket(&self, bucket: &Bucket) -> TaskRepositoryResult<Vec<Task>> {
        let tasks = self.state.read().map_err(lock_error)?;
        Ok(bucket_tasks(&tasks, bucket))
    }

    async fn list(&self, filter: &TaskFilter) -> TaskRepositoryResult<Vec<Task>> {
        let tasks = self.state.read().map_err(lock_error)?;
        let mut selected: Vec<Task> = tasks
            .values()
            .filter(|task| filter.matches(task))
            .cloned()
            .collect();
        selected.sort_by(|left, right| {
            right
                .created_at()
                .cmp(&left.created_at())
                .then_with(|| right.id().cmp(&left.id()))
        });
        Ok(selected)
    }
}
