//! Identifier types for workspaces, users and memberships.

use crate::ids::uuid_identifier;

uuid_identifier! {
    /// Unique identifier for a workspace, the top-level tenant.
    WorkspaceId
}

uuid_identifier! {
    /// Unique identifier for an authenticated user account.
    UserId
}

uuid_identifier! {
    /// Unique identifier for a user's membership within one workspace.
    ///
    /// Task assignees reference members, not users.
    MemberId
}
