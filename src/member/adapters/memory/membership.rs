//! In-memory membership repository for tests and embedding.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::member::{
    domain::{Member, MemberId, UserId, WorkspaceId},
    ports::{MembershipRepository, MembershipRepositoryError, MembershipRepositoryResult},
};

/// Thread-safe in-memory membership repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMembershipRepository {
    state: Arc<RwLock<InMemoryMembershipState>>,
}

#[derive(Debug, Default)]
struct InMemoryMembershipState {
    members: HashMap<MemberId, Member>,
    workspace_index: HashMap<(WorkspaceId, UserId), MemberId>,
}

impl InMemoryMembershipRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl std::fmt::Display) -> MembershipRepositoryError {
    MembershipRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl MembershipRepository for InMemoryMembershipRepository {
    async fn store(&self, member: &Member) -> MembershipRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        if state.members.contains_key(&member.id()) {
            return Err(MembershipRepositoryError::DuplicateMember(member.id()));
        }

        let key = (member.workspace_id(), member.user_id());
        if state.workspace_index.contains_key(&key) {
            return Err(MembershipRepositoryError::AlreadyMember {
                workspace_id: member.workspace_id(),
                user_id: member.user_id(),
            });
        }

        state.workspace_index.insert(key, member.id());
        state.members.insert(member.id(), member.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: MemberId) -> MembershipRepositoryResult<Option<Member>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.members.get(&id).cloned())
    }

    async fn find_membership(
        &self,
        workspace_id: WorkspaceId,
        user_id: UserId,
    ) -> MembershipRepositoryResult<Option<Member>> {
        let state = self.state.read().map_err(lock_error)?;
        let member = state
            .workspace_index
            .get(&(workspace_id, user_id))
            .and_then(|member_id| state.members.get(member_id))
            .cloned();
        Ok(member)
    }
}
