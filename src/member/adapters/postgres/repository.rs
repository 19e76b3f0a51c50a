//! `PostgreSQL` repository implementation for membership storage.

use super::{models::MemberRow, schema::members};
use crate::member::{
    domain::{Member, MemberId, MemberRole, PersistedMemberData, UserId, WorkspaceId},
    ports::{MembershipRepository, MembershipRepositoryError, MembershipRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by membership adapters.
pub type MemberPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed membership repository.
#[derive(Debug, Clone)]
pub struct PostgresMembershipRepository {
    pool: MemberPgPool,
}

impl PostgresMembershipRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: MemberPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> MembershipRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> MembershipRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool
                .get()
                .map_err(MembershipRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(MembershipRepositoryError::persistence)?
    }
}

#[async_trait]
impl MembershipRepository for PostgresMembershipRepository {
    async fn store(&self, member: &Member) -> MembershipRepositoryResult<()> {
        let row = to_row(member);
        let member_id = member.id();
        let workspace_id = member.workspace_id();
        let user_id = member.user_id();

        self.run_blocking(move |connection| {
            diesel::insert_into(members::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info)
                        if is_workspace_user_unique_violation(info.as_ref()) =>
                    {
                        MembershipRepositoryError::AlreadyMember {
                            workspace_id,
                            user_id,
                        }
                    }
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        MembershipRepositoryError::DuplicateMember(member_id)
                    }
                    _ => MembershipRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: MemberId) -> MembershipRepositoryResult<Option<Member>> {
        self.run_blocking(move |connection| {
            let row = members::table
                .filter(members::id.eq(id.into_inner()))
                .select(MemberRow::as_select())
                .first::<MemberRow>(connection)
                .optional()
                .map_err(MembershipRepositoryError::persistence)?;
            row.map(row_to_member).transpose()
        })
        .await
    }

    async fn find_membership(
        &self,
        workspace_id: WorkspaceId,
        user_id: UserId,
    ) -> MembershipRepositoryResult<Option<Member>> {
        self.run_blocking(move |connection| {
            let row = members::table
                .filter(members::workspace_id.eq(workspace_id.into_inner()))
                .filter(members::user_id.eq(user_id.into_inner()))
                .select(MemberRow::as_select())
                .first::<MemberRow>(connection)
                .optional()
                .map_err(MembershipRepositoryError::persistence)?;
            row.map(row_to_member).transpose()
        })
        .await
    }
}

fn to_row(member: &Member) -> MemberRow {
    MemberRow {
        id: member.id().into_inner(),
        workspace_id: member.workspace_id().into_inner(),
        user_id: member.user_id().into_inner(),
        role: member.role().as_str().to_owned(),
        joined_at: member.joined_at(),
    }
}

fn row_to_member(row: MemberRow) -> MembershipRepositoryResult<Member> {
    let role =
        MemberRole::try_from(row.role.as_str()).map_err(MembershipRepositoryError::persistence)?;
    Ok(Member::from_persisted(PersistedMemberData {
        id: MemberId::from_uuid(row.id),
        workspace_id: WorkspaceId::from_uuid(row.workspace_id),
        user_id: UserId::from_uuid(row.user_id),
        role,
        joined_at: row.joined_at,
    }))
}

fn is_workspace_user_unique_violation(info: &dyn DatabaseErrorInformation) -> bool {
    info.constraint_name()
        .is_some_and(|name| name == "idx_members_workspace_user_unique")
}
