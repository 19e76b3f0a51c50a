//! Diesel row models for membership persistence.

use super::schema::members;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query and insert row for membership records.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = members)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct MemberRow {
    /// Member identifier.
    pub id: uuid::Uuid,
    /// Owning workspace.
    pub workspace_id: uuid::Uuid,
    /// Account holding the membership.
    pub user_id: uuid::Uuid,
    /// Member role.
    pub role: String,
    /// Join timestamp.
    pub joined_at: DateTime<Utc>,
}
