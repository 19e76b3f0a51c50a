//! Member record and role types.

use super::{MemberId, ParseMemberRoleError, UserId, WorkspaceId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Role granted to a member within a workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MemberRole {
    /// May administer the workspace.
    Admin,
    /// Regular workspace member.
    Member,
}

impl MemberRole {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::Member => "MEMBER",
        }
    }
}

impl TryFrom<&str> for MemberRole {
    type Error = ParseMemberRoleError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_uppercase().as_str() {
            "ADMIN" => Ok(Self::Admin),
            "MEMBER" => Ok(Self::Member),
            _ => Err(ParseMemberRoleError(value.to_owned())),
        }
    }
}

/// A user's membership in one workspace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    id: MemberId,
    workspace_id: WorkspaceId,
    user_id: UserId,
    role: MemberRole,
    joined_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedMemberData {
    /// Persisted member identifier.
    pub id: MemberId,
    /// Workspace the membership belongs to.
    pub workspace_id: WorkspaceId,
    /// User holding the membership.
    pub user_id: UserId,
    /// Persisted role.
    pub role: MemberRole,
    /// Persisted join timestamp.
    pub joined_at: DateTime<Utc>,
}

impl Member {
    /// Creates a new membership joined at the current clock time.
    #[must_use]
    pub fn new(
        workspace_id: WorkspaceId,
        user_id: UserId,
        role: MemberRole,
        clock: &impl Clock,
    ) -> Self {
        Self {
            id: MemberId::new(),
            workspace_id,
            user_id,
            role,
            joined_at: clock.utc(),
        }
    }

    /// Reconstructs a member from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedMemberData) -> Self {
        Self {
            id: data.id,
            workspace_id: data.workspace_id,
            user_id: data.user_id,
            role: data.role,
            joined_at: data.joined_at,
        }
    }

    /// Returns the member identifier.
    #[must_use]
    pub const fn id(&self) -> MemberId {
        self.id
    }

    /// Returns the workspace identifier.
    #[must_use]
    pub const fn workspace_id(&self) -> WorkspaceId {
        self.workspace_id
    }

    /// Returns the user identifier.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the member role.
    #[must_use]
    pub const fn role(&self) -> MemberRole {
        self.role
    }

    /// Returns when the member joined the workspace.
    #[must_use]
    pub const fn joined_at(&self) -> DateTime<Utc> {
        self.joined_at
    }

    /// Returns `true` when the member administers the workspace.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self.role, MemberRole::Admin)
    }
}
