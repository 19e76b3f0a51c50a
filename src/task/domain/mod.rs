//! Domain model for task ordering and status.
//!
//! Tasks live in buckets keyed by workspace and status. Within a bucket they
//! are ordered by a sparse numeric [`Position`], with creation time and task
//! identifier as tie-breakers. Everything here is pure: persistence and
//! authorization live behind the ports.

mod analytics;
mod board;
mod error;
mod ids;
mod position;
mod reorder;
mod status;
mod task;

pub use analytics::{MetricCount, TaskAnalytics};
pub use board::{Board, RankCollision, bucket_order};
pub use error::{ParseTaskStatusError, TaskDomainError, WorkspaceScopeError};
pub use ids::{ProjectId, TaskId};
pub use position::{Position, RankGap};
pub use reorder::{ReorderBatch, TaskReorder, require_single_workspace};
pub use status::TaskStatus;
pub use task::{Bucket, NewTask, PersistedTaskData, Task, TaskChanges, TaskName};
