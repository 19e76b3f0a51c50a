//! Workspace membership guard shared by task services.

use super::{TaskServiceError, TaskServiceResult};
use crate::member::{
    domain::{Member, MemberId, UserId, WorkspaceId},
    ports::MembershipRepository,
};

/// Resolves the caller's membership in `workspace_id`.
pub(super) async fn require_member<M>(
    members: &M,
    workspace_id: WorkspaceId,
    user_id: UserId,
) -> TaskServiceResult<Member>
where
    M: MembershipRepository + ?Sized,
{
    let Some(member) = members.find_membership(workspace_id, user_id).await? else {
        tracing::warn!(
            workspace_id = %workspace_id,
            user_id = %user_id,
            "rejected caller without workspace membership"
        );
        return Err(TaskServiceError::Unauthorized {
            workspace_id,
            user_id,
        });
    };
    Ok(member)
}

/// Checks that `assignee_id` is a member of `workspace_id`.
pub(super) async fn require_assignee<M>(
    members: &M,
    workspace_id: WorkspaceId,
    assignee_id: MemberId,
) -> TaskServiceResult<()>
where
    M: MembershipRepository + ?Sized,
{
    let assignee = members.find_by_id(assignee_id).await?;
    if assignee.is_some_and(|member| member.workspace_id() == workspace_id) {
        return Ok(());
    }
    Err(TaskServiceError::AssigneeOutsideWorkspace {
        workspace_id,
        assignee_id,
    })
}
