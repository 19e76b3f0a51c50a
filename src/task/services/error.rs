//! Service-level errors for task operations.

use crate::member::domain::{MemberId, UserId, WorkspaceId};
use crate::member::ports::MembershipRepositoryError;
use crate::task::domain::{Task, TaskDomainError, TaskId, WorkspaceScopeError};
use crate::task::ports::TaskRepositoryError;
use thiserror::Error;

/// Coarse classification of service failures reported to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskErrorKind {
    /// A referenced task or workspace does not exist.
    NotFound,
    /// The caller is not a member of the workspace.
    Unauthorized,
    /// The request is malformed or violates a precondition.
    Invalid,
    /// Storage failed.
    Internal,
}

/// Service-level errors for task operations.
#[derive(Debug, Error)]
pub enum TaskServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),

    /// The batch does not resolve to exactly one workspace.
    #[error(transparent)]
    Scope(#[from] WorkspaceScopeError),

    /// No task exists with the given identifier.
    #[error("task {0} not found")]
    NotFound(TaskId),

    /// The caller has no membership in the workspace.
    #[error("user {user_id} is not a member of workspace {workspace_id}")]
    Unauthorized {
        /// Workspace the caller tried to access.
        workspace_id: WorkspaceId,
        /// Calling user.
        user_id: UserId,
    },

    /// The assignee does not belong to the task's workspace.
    #[error("assignee {assignee_id} is not a member of workspace {workspace_id}")]
    AssigneeOutsideWorkspace {
        /// Task workspace.
        workspace_id: WorkspaceId,
        /// Rejected assignee.
        assignee_id: MemberId,
    },

    /// The reorder batch exceeds the configured limit.
    #[error("reorder batch of {size} tasks exceeds the limit of {limit}")]
    BatchTooLarge {
        /// Submitted batch size.
        size: usize,
        /// Configured limit.
        limit: usize,
    },

    /// A multi-task write stopped part way. Earlier writes stay committed.
    #[error(
        "write of task {failed} failed after {} of {total} tasks were saved",
        .applied.len()
    )]
    PartiallyApplied {
        /// Tasks already persisted, in request order.
        applied: Vec<Task>,
        /// Task whose write failed.
        failed: TaskId,
        /// Number of writes requested.
        total: usize,
        /// Final write error.
        #[source]
        source: TaskRepositoryError,
    },

    /// Task repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),

    /// Membership lookup failed.
    #[error(transparent)]
    Membership(#[from] MembershipRepositoryError),
}

impl TaskServiceError {
    /// Returns the caller-facing classification of this error.
    #[must_use]
    pub const fn kind(&self) -> TaskErrorKind {
        match self {
            Self::NotFound(_)
            | Self::Repository(TaskRepositoryError::NotFound(_))
            | Self::PartiallyApplied {
                source: TaskRepositoryError::NotFound(_),
                ..
            } => TaskErrorKind::NotFound,
            Self::Unauthorized { .. } => TaskErrorKind::Unauthorized,
            Self::Domain(_)
            | Self::Scope(_)
            | Self::AssigneeOutsideWorkspace { .. }
            | Self::BatchTooLarge { .. }
            | Self::Repository(TaskRepositoryError::DuplicateTask(_)) => TaskErrorKind::Invalid,
            Self::PartiallyApplied { .. } | Self::Repository(_) | Self::Membership(_) => {
                TaskErrorKind::Internal
            }
        }
    }
}

/// Result type for task service operations.
pub type TaskServiceResult<T> = Result<T, TaskServiceError>;
