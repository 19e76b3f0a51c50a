//! Board projection: tasks grouped into status columns in rank order.

use super::{Position, Task, TaskId, TaskStatus};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Total order of tasks within a bucket.
///
/// Ranks decide; equal ranks fall back to creation time and then to the task
/// identifier so the order is stable across reads.
#[must_use]
pub fn bucket_order(left: &Task, right: &Task) -> Ordering {
    left.position()
        .cmp(&right.position())
        .then_with(|| left.created_at().cmp(&right.created_at()))
        .then_with(|| left.id().cmp(&right.id()))
}

/// Several tasks in one column sharing a rank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankCollision {
    /// Column holding the tasks.
    pub status: TaskStatus,
    /// Shared rank.
    pub position: Position,
    /// Colliding tasks in board order.
    pub task_ids: Vec<TaskId>,
}

/// Read-only projection of tasks into status columns.
///
/// Every status has a column, possibly empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    columns: BTreeMap<TaskStatus, Vec<Task>>,
}

impl Board {
    /// Groups `tasks` by status, ordering each column by [`bucket_order`].
    #[must_use]
    pub fn project(tasks: impl IntoIterator<Item = Task>) -> Self {
        let mut columns: BTreeMap<TaskStatus, Vec<Task>> = TaskStatus::ALL
            .into_iter()
            .map(|status| (status, Vec::new()))
            .collect();
        for task in tasks {
            columns.entry(task.status()).or_default().push(task);
        }
        for column in columns.values_mut() {
            column.sort_by(bucket_order);
        }
        Self { columns }
    }

    /// Returns the ordered tasks of one column.
    #[must_use]
    pub fn column(&self, status: TaskStatus) -> &[Task] {
        self.columns.get(&status).map_or(&[], Vec::as_slice)
    }

    /// Iterates columns in board order.
    pub fn columns(&self) -> impl Iterator<Item = (TaskStatus, &[Task])> {
        self.columns
            .iter()
            .map(|(status, tasks)| (*status, tasks.as_slice()))
    }

    /// Consumes the board, returning the columns.
    #[must_use]
    pub fn into_columns(self) -> BTreeMap<TaskStatus, Vec<Task>> {
        self.columns
    }

    /// Total number of tasks on the board.
    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.values().map(Vec::len).sum()
    }

    /// Returns `true` when no column holds a task.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.values().all(Vec::is_empty)
    }

    /// Lists ranks shared by more than one task of the same column.
    #[must_use]
    pub fn rank_collisions(&self) -> Vec<RankCollision> {
        let mut collisions = Vec::new();
        for (status, tasks) in self.columns() {
            for group in tasks.chunk_by(|left, right| left.position() == right.position()) {
                let [first, _, ..] = group else {
                    continue;
                };
                collisions.push(RankCollision {
                    status,
                    position: first.position(),
                    task_ids: group.iter().map(Task::id).collect(),
                });
            }
        }
        collisions
    }
}
