//! Identifier types for the task domain.

use crate::ids::uuid_identifier;

uuid_identifier! {
    /// Unique identifier for a task record.
    TaskId
}

uuid_identifier! {
    /// Unique identifier for the project a task belongs to.
    ProjectId
}
