//! Domain model for workspace membership.

mod error;
mod ids;
mod member;

pub use error::ParseMemberRoleError;
pub use ids::{MemberId, UserId, WorkspaceId};
pub use member::{Member, MemberRole, PersistedMemberData};
