//! Diesel schema for membership persistence.

diesel::table! {
    /// Workspace membership records.
    members (id) {
        /// Member identifier.
        id -> Uuid,
        /// Owning workspace.
        workspace_id -> Uuid,
        /// Account holding the membership.
        user_id -> Uuid,
        /// Member role.
        #[max_length = 20]
        role -> Varchar,
        /// Join timestamp.
        joined_at -> Timestamptz,
    }
}
