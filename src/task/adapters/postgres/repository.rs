//! `PostgreSQL` repository implementation for task storage.

use super::{
    models::{TaskChangeset, TaskPlacementChangeset, TaskRow},
    schema::tasks,
};
use crate::member::domain::{MemberId, WorkspaceId};
use crate::task::{
    domain::{
        Bucket, PersistedTaskData, Position, ProjectId, Task, TaskId, TaskName, TaskStatus,
    },
    ports::{TaskFilter, TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::pg::{Pg, PgConnection};
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by task adapters.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: TaskPgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let row = to_row(task);
        self.run_blocking(move |connection| {
            diesel::insert_into(tasks::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TaskRepositoryError::DuplicateTask(task_id)
                    }
                    _ => TaskRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let changeset = to_changeset(task);
        self.run_blocking(move |connection| {
            let updated = diesel::update(tasks::table.find(task_id.into_inner()))
                .set(&changeset)
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            if updated == 0 {
                return Err(TaskRepositoryError::NotFound(task_id));
            }
            Ok(())
        })
        .await
    }

    async fn reposition(
        &self,
        id: TaskId,
        status: TaskStatus,
        position: Position,
        updated_at: DateTime<Utc>,
    ) -> TaskRepositoryResult<()> {
        let changeset = TaskPlacementChangeset {
            status: status.as_str().to_owned(),
            position: position.value(),
            updated_at,
        };
        self.run_blocking(move |connection| {
            let updated = diesel::update(tasks::table.find(id.into_inner()))
                .set(&changeset)
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            if updated == 0 {
                return Err(TaskRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let deleted = diesel::delete(tasks::table.find(id.into_inner()))
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            if deleted == 0 {
                return Err(TaskRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .find(id.into_inner())
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn find_by_ids(&self, ids: &[TaskId]) -> TaskRepositoryResult<Vec<Task>> {
        let uuids: Vec<uuid::Uuid> = ids.iter().map(|id| id.into_inner()).collect();
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .filter(tasks::id.eq_any(uuids))
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn lowest_in_bucket(&self, bucket: &Bucket) -> TaskRepositoryResult<Option<Task>> {
        let lookup = *bucket;
        self.run_blocking(move |connection| {
            let row = bucket_query(&lookup)
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn list_bucket(&self, bucket: &Bucket) -> TaskRepositoryResult<Vec<Task>> {
        let lookup = *bucket;
        self.run_blocking(move |connection| {
            let rows = bucket_query(&lookup)
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn list(&self, filter: &TaskFilter) -> TaskRepositoryResult<Vec<Task>> {
        let criteria = filter.clone();
        self.run_blocking(move |connection| {
            let rows = filtered_query(&criteria)
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }
}

type BoxedTaskQuery<'a> =
    tasks::BoxedQuery<'a, Pg, diesel::dsl::SqlTypeOf<diesel::dsl::AsSelect<TaskRow, Pg>>>;

/// Bucket tasks in ascending rank, creation time and identifier order.
fn bucket_query(bucket: &Bucket) -> BoxedTaskQuery<'static> {
    tasks::table
        .filter(tasks::workspace_id.eq(bucket.workspace_id.into_inner()))
        .filter(tasks::status.eq(bucket.status.as_str()))
        .order((
            tasks::position.asc(),
            tasks::created_at.asc(),
            tasks::id.asc(),
        ))
        .select(TaskRow::as_select())
        .into_boxed()
}

fn filtered_query(filter: &TaskFilter) -> BoxedTaskQuery<'static> {
    let mut query = tasks::table
        .filter(tasks::workspace_id.eq(filter.workspace_id.into_inner()))
        .order((tasks::created_at.desc(), tasks::id.desc()))
        .select(TaskRow::as_select())
        .into_boxed();

    if let Some(project_id) = filter.project_id {
        query = query.filter(tasks::project_id.eq(project_id.into_inner()));
    }
    if let Some(assignee_id) = filter.assignee_id {
        query = query.filter(tasks::assignee_id.eq(assignee_id.into_inner()));
    }
    if let Some(status) = filter.status {
        query = query.filter(tasks::status.eq(status.as_str()));
    }
    if let Some(due_date) = filter.due_date {
        query = query.filter(tasks::due_date.eq(due_date));
    }
    if let Some(term) = filter.search.as_deref() {
        let pattern = like_pattern(term);
        query = query.filter(
            tasks::name
                .ilike(pattern.clone())
                .or(tasks::description.ilike(pattern)),
        );
    }
    query
}

/// Wraps `term` for a substring `ILIKE`, escaping wildcard characters.
fn like_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped.push('%');
    escaped
}

fn to_row(task: &Task) -> TaskRow {
    TaskRow {
        id: task.id().into_inner(),
        name: task.name().as_str().to_owned(),
        description: task.description().map(str::to_owned),
        status: task.status().as_str().to_owned(),
        due_date: task.due_date(),
        position: task.position().value(),
        workspace_id: task.workspace_id().into_inner(),
        project_id: task.project_id().into_inner(),
        assignee_id: task.assignee_id().into_inner(),
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    }
}

fn to_changeset(task: &Task) -> TaskChangeset {
    TaskChangeset {
        name: task.name().as_str().to_owned(),
        description: task.description().map(str::to_owned),
        status: task.status().as_str().to_owned(),
        due_date: task.due_date(),
        position: task.position().value(),
        project_id: task.project_id().into_inner(),
        assignee_id: task.assignee_id().into_inner(),
        updated_at: task.updated_at(),
    }
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let TaskRow {
        id,
        name: persisted_name,
        description,
        status: persisted_status,
        due_date,
        position,
        workspace_id,
        project_id,
        assignee_id,
        created_at,
        updated_at,
    } = row;

    let name = TaskName::new(persisted_name).map_err(TaskRepositoryError::persistence)?;
    let status = TaskStatus::try_from(persisted_status.as_str())
        .map_err(TaskRepositoryError::persistence)?;

    Ok(Task::from_persisted(PersistedTaskData {
        id: TaskId::from_uuid(id),
        name,
        description,
        status,
        due_date,
        position: Position::new(position),
        workspace_id: WorkspaceId::from_uuid(workspace_id),
        project_id: ProjectId::from_uuid(project_id),
        assignee_id: MemberId::from_uuid(assignee_id),
        created_at,
        updated_at,
    }))
}
