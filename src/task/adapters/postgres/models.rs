//! Diesel row models for task persistence.

use super::schema::tasks;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query and insert row for task records.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Task name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Task status.
    pub status: String,
    /// Due date.
    pub due_date: DateTime<Utc>,
    /// Sparse rank inside the bucket.
    pub position: i64,
    /// Owning workspace.
    pub workspace_id: uuid::Uuid,
    /// Owning project.
    pub project_id: uuid::Uuid,
    /// Assigned member.
    pub assignee_id: uuid::Uuid,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Mutable columns written on update.
///
/// `treat_none_as_null` lets an edit clear the description.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = tasks)]
#[diesel(treat_none_as_null = true)]
pub struct TaskChangeset {
    /// Task name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Task status.
    pub status: String,
    /// Due date.
    pub due_date: DateTime<Utc>,
    /// Sparse rank inside the bucket.
    pub position: i64,
    /// Owning project.
    pub project_id: uuid::Uuid,
    /// Assigned member.
    pub assignee_id: uuid::Uuid,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Placement columns written by a reorder.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = tasks)]
pub struct TaskPlacementChangeset {
    /// Task status.
    pub status: String,
    /// Sparse rank inside the bucket.
    pub position: i64,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}
