//! Diesel schema for task persistence.

diesel::table! {
    /// Task records ranked within (workspace, status) buckets.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Task name.
        name -> Text,
        /// Optional description.
        description -> Nullable<Text>,
        /// Task status.
        #[max_length = 20]
        status -> Varchar,
        /// Due date.
        due_date -> Timestamptz,
        /// Sparse rank inside the bucket.
        position -> Int8,
        /// Owning workspace.
        workspace_id -> Uuid,
        /// Owning project.
        project_id -> Uuid,
        /// Assigned member.
        assignee_id -> Uuid,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
