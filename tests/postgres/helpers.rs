//! Shared fixtures for `PostgreSQL` integration tests.

pub use super::cluster::{BoxError, PostgresCluster, postgres_cluster};
use chrono::{DateTime, Duration, TimeZone, Utc};
use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use rstest::fixture;
use taskboard::member::{
    adapters::postgres::{MemberPgPool, PostgresMembershipRepository},
    domain::{Member, MemberId, MemberRole, PersistedMemberData, UserId, WorkspaceId},
};
use taskboard::task::{
    adapters::postgres::{PostgresTaskRepository, TaskPgPool},
    domain::{PersistedTaskData, Position, ProjectId, Task, TaskId, TaskName, TaskStatus},
};
use tokio::runtime::Runtime;
use uuid::Uuid;

/// Migrations in the order they are applied.
pub const MIGRATIONS: [(&str, &str, &str); 2] = [
    (
        "create_members",
        include_str!("../../migrations/2026-10-01-000000_create_members/up.sql"),
        include_str!("../../migrations/2026-10-01-000000_create_members/down.sql"),
    ),
    (
        "create_tasks",
        include_str!("../../migrations/2026-10-01-000001_create_tasks/up.sql"),
        include_str!("../../migrations/2026-10-01-000001_create_tasks/down.sql"),
    ),
];

/// Template database holding the migrated schema.
pub const TEMPLATE_DB: &str = "taskboard_test_template";

/// Builds a runtime for driving async repositories from sync tests.
pub fn test_runtime() -> Result<Runtime, BoxError> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|err| Box::new(err) as BoxError)
}

/// Runs every up migration against the database at `url`.
pub fn apply_migrations(url: &str) -> Result<(), BoxError> {
    let mut conn = PgConnection::establish(url)?;
    for (_, up, _) in MIGRATIONS {
        conn.batch_execute(up)?;
    }
    Ok(())
}

/// Scratch database cloned from the migrated template and dropped with the
/// value.
pub struct TestDatabase {
    cluster: PostgresCluster,
    name: String,
    url: String,
}

impl TestDatabase {
    fn create(cluster: PostgresCluster) -> Result<Self, BoxError> {
        cluster.ensure_template_exists(TEMPLATE_DB, apply_migrations)?;
        let name = format!("taskboard_{}", Uuid::new_v4().simple());
        cluster.create_database_from_template(&name, TEMPLATE_DB)?;
        let url = cluster.database_url(&name);
        Ok(Self { cluster, name, url })
    }

    /// Opens a direct connection for raw SQL checks.
    pub fn connect(&self) -> Result<PgConnection, BoxError> {
        Ok(PgConnection::establish(&self.url)?)
    }

    fn pool(&self) -> Result<Pool<ConnectionManager<PgConnection>>, BoxError> {
        let manager = ConnectionManager::<PgConnection>::new(self.url.clone());
        Ok(Pool::builder().max_size(1).build(manager)?)
    }

    /// Task repository over this database.
    pub fn tasks(&self) -> Result<PostgresTaskRepository, BoxError> {
        let pool: TaskPgPool = self.pool()?;
        Ok(PostgresTaskRepository::new(pool))
    }

    /// Membership repository over this database.
    pub fn members(&self) -> Result<PostgresMembershipRepository, BoxError> {
        let pool: MemberPgPool = self.pool()?;
        Ok(PostgresMembershipRepository::new(pool))
    }
}

impl Drop for TestDatabase {
    #[expect(
        clippy::print_stderr,
        reason = "a leaked scratch database is worth a warning, not a failure"
    )]
    fn drop(&mut self) {
        if let Err(err) = self.cluster.drop_database(&self.name) {
            eprintln!("warning: failed to drop test database {}: {err}", self.name);
        }
    }
}

/// Fresh migrated database, or `None` when no cluster is available.
#[fixture]
pub fn database(postgres_cluster: Option<PostgresCluster>) -> Option<TestDatabase> {
    let cluster = postgres_cluster?;
    Some(TestDatabase::create(cluster).expect("test database from template"))
}

/// Fixed instant with whole seconds, so values survive the microsecond
/// precision of `TIMESTAMPTZ` unchanged.
pub fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 1, 9, 0, 0)
        .single()
        .expect("valid fixed timestamp")
}

/// Builds a task with explicit ordering fields and a fixed timeline.
pub fn task_at(
    workspace_id: WorkspaceId,
    status: TaskStatus,
    position: i64,
    created_offset_secs: i64,
) -> Task {
    let created_at = epoch() + Duration::seconds(created_offset_secs);
    Task::from_persisted(PersistedTaskData {
        id: TaskId::new(),
        name: TaskName::new(format!("task {position}")).expect("valid name"),
        description: None,
        status,
        due_date: epoch() + Duration::days(7),
        position: Position::new(position),
        workspace_id,
        project_id: ProjectId::new(),
        assignee_id: MemberId::new(),
        created_at,
        updated_at: created_at,
    })
}

/// Builds a membership joined at [`epoch`].
pub fn member_of(workspace_id: WorkspaceId, user_id: UserId, role: MemberRole) -> Member {
    Member::from_persisted(PersistedMemberData {
        id: MemberId::new(),
        workspace_id,
        user_id,
        role,
        joined_at: epoch(),
    })
}
