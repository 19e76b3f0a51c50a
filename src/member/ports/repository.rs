//! Repository port for membership persistence and lookup.

use crate::member::domain::{Member, MemberId, UserId, WorkspaceId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for membership repository operations.
pub type MembershipRepositoryResult<T> = Result<T, MembershipRepositoryError>;

/// Membership persistence contract.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MembershipRepository: Send + Sync {
    /// Stores a new membership.
    ///
    /// # Errors
    ///
    /// Returns [`MembershipRepositoryError::DuplicateMember`] when the member
    /// ID exists or [`MembershipRepositoryError::AlreadyMember`] when the user
    /// already belongs to the workspace.
    async fn store(&self, member: &Member) -> MembershipRepositoryResult<()>;

    /// Finds a membership by identifier.
    async fn find_by_id(&self, id: MemberId) -> MembershipRepositoryResult<Option<Member>>;

    /// Resolves the membership of `user_id` in `workspace_id`.
    ///
    /// Returns `None` when the user does not belong to the workspace.
    async fn find_membership(
        &self,
        workspace_id: WorkspaceId,
        user_id: UserId,
    ) -> MembershipRepositoryResult<Option<Member>>;
}

/// Errors returned by membership repository implementations.
#[derive(Debug, Clone, Error)]
pub enum MembershipRepositoryError {
    /// A member with the same identifier already exists.
    #[error("duplicate member identifier: {0}")]
    DuplicateMember(MemberId),

    /// The user already holds a membership in the workspace.
    #[error("user {user_id} is already a member of workspace {workspace_id}")]
    AlreadyMember {
        /// Workspace holding the existing membership.
        workspace_id: WorkspaceId,
        /// User that already belongs to the workspace.
        user_id: UserId,
    },

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl MembershipRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
