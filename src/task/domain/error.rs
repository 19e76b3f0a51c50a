//! Error types for task domain validation and parsing.

use super::TaskId;
use crate::member::domain::WorkspaceId;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors returned while constructing or mutating domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task name is empty after trimming.
    #[error("task name must not be empty")]
    EmptyTaskName,

    /// The rank gap is too small to leave room between neighbours.
    #[error("invalid rank gap {0}, expected at least 2")]
    InvalidRankGap(i64),

    /// Advancing a rank would leave the representable range.
    #[error("position {position} cannot advance by {gap}")]
    PositionOverflow {
        /// Rank being advanced.
        position: i64,
        /// Gap that was added.
        gap: i64,
    },

    /// A reorder batch contained no entries.
    #[error("reorder batch must contain at least one task")]
    EmptyReorderBatch,

    /// A reorder batch named the same task more than once.
    #[error("task {0} appears more than once in the reorder batch")]
    DuplicateReorderEntry(TaskId),

    /// Calendar arithmetic left chrono's supported range.
    #[error("cannot derive reporting months from {0}")]
    CalendarOutOfRange(DateTime<Utc>),
}

/// Error returned while parsing task statuses from persistence or input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Failure of the single-workspace precondition for batch operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WorkspaceScopeError {
    /// No tasks were supplied, so no workspace can be inferred.
    #[error("no tasks supplied")]
    Empty,

    /// The tasks belong to more than one workspace.
    #[error("all tasks must be in the same workspace, found {}", .0.len())]
    CrossWorkspace(Vec<WorkspaceId>),
}
