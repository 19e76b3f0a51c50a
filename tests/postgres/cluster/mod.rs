//! Embedded `PostgreSQL` cluster shared by every test in the binary.


use self::env_utils::{bootstrap_env_changes, to_os_pairs};
use self::fs_utils::{sync_password_from_file, sync_port_from_pid};
use super::helpers::test_runtime;
use crate::test_helpers::EnvVarGuard;
use diesel::prelude::*;
use pg_embedded_setup_unpriv::worker_process_test_api::{
    WorkerOperation, WorkerRequest, WorkerRequestArgs, run as run_worker,
};
use pg_embedded_setup_unpriv::{ExecutionPrivileges, TestBootstrapSettings, bootstrap_for_tests};
use postgresql_embedded::{PostgreSQL, Status};
use rstest::fixture;
use std::sync::{Mutex, OnceLock, PoisonError};
use std::time::Duration;
use tokio::runtime::Runtime;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Handle to the shared cluster.
pub type PostgresCluster = &'static EmbeddedCluster;

static SHARED_CLUSTER: OnceLock<Result<EmbeddedCluster, String>> = OnceLock::new();
static TEMPLATE_LOCK: Mutex<()> = Mutex::new(());

/// Embedded cluster started in-process, or through a worker when running as
/// root.
pub struct EmbeddedCluster {
    bootstrap: TestBootstrapSettings,
    env_vars: Vec<(String, Option<String>)>,
    runtime: Option<Runtime>,
    postgres: Option<PostgreSQL>,
}

impl EmbeddedCluster {
    fn start() -> Result<Self, BoxError> {
        let bootstrap_guard = EnvVarGuard::set_many(&bootstrap_env_changes()?);
        let mut bootstrap = bootstrap_for_tests().map_err(|err| Box::new(err) as BoxError)?;
        drop(bootstrap_guard);
        sync_password_from_file(&mut bootstrap.settings)?;

        let env_vars = bootstrap.environment.to_env();
        let mut cluster = Self {
            bootstrap,
            env_vars,
            runtime: None,
            postgres: None,
        };
        match cluster.bootstrap.privileges {
            ExecutionPrivileges::Root => cluster.start_via_worker()?,
            ExecutionPrivileges::Unprivileged => cluster.start_in_process()?,
        }
        Ok(cluster)
    }

    /// Connection URL for `database` on this cluster.
    #[must_use]
    pub fn database_url(&self, database: &str) -> String {
        self.bootstrap.settings.url(database)
    }

    /// Creates `name` as a copy of `template`.
    pub fn create_database_from_template(&self, name: &str, template: &str) -> Result<(), BoxError> {
        self.execute_admin_sql(&format!(
            "CREATE DATABASE {} TEMPLATE {}",
            quote_identifier(name),
            quote_identifier(template),
        ))
    }

    /// Drops `name`, closing any connection still open on it.
    pub fn drop_database(&self, name: &str) -> Result<(), BoxError> {
        self.execute_admin_sql(&format!(
            "DROP DATABASE IF EXISTS {} WITH (FORCE)",
            quote_identifier(name)
        ))
    }

    /// Creates `template` and runs `migrate` against it unless it already
    /// exists. A failed migration drops the half-built template.
    pub fn ensure_template_exists<F>(&self, template: &str, migrate: F) -> Result<(), BoxError>
    where
        F: FnOnce(&str) -> Result<(), BoxError>,
    {
        let _guard = TEMPLATE_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
        if self.database_exists(template)? {
            return Ok(());
        }
        self.execute_admin_sql(&format!("CREATE DATABASE {}", quote_identifier(template)))?;
        migrate(&self.database_url(template)).or_else(|err| {
            self.drop_database(template)?;
            Err(err)
        })
    }

    fn start_in_process(&mut self) -> Result<(), BoxError> {
        let runtime = test_runtime()?;
        let env_guard = EnvVarGuard::set_many(&to_os_pairs(&self.env_vars));
        let mut postgres = PostgreSQL::new(self.bootstrap.settings.clone());
        runtime.block_on(async {
            postgres.setup().await?;
            if !matches!(postgres.status(), Status::Started) {
                postgres.start().await?;
            }
            Ok::<(), postgresql_embedded::Error>(())
        })?;
        drop(env_guard);

        self.bootstrap.settings = postgres.settings().clone();
        sync_port_from_pid(&mut self.bootstrap.settings)?;
        self.runtime = Some(runtime);
        self.postgres = Some(postgres);
        Ok(())
    }

    fn start_via_worker(&mut self) -> Result<(), BoxError> {
        self.run_worker_operation(WorkerOperation::Setup, self.bootstrap.setup_timeout)?;
        self.run_worker_operation(WorkerOperation::Start, self.bootstrap.start_timeout)?;
        sync_port_from_pid(&mut self.bootstrap.settings)
    }

    fn stop(&mut self) -> Result<(), BoxError> {
        if let Some(postgres) = self.postgres.take() {
            if let Some(runtime) = &self.runtime {
                runtime.block_on(postgres.stop())?;
            }
            return Ok(());
        }
        if matches!(self.bootstrap.privileges, ExecutionPrivileges::Root) {
            self.run_worker_operation(WorkerOperation::Stop, self.bootstrap.shutdown_timeout)?;
        }
        Ok(())
    }

    fn run_worker_operation(
        &self,
        operation: WorkerOperation,
        timeout: Duration,
    ) -> Result<(), BoxError> {
        let worker = self.bootstrap.worker_binary.as_ref().ok_or_else(|| {
            Box::new(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "PG_EMBEDDED_WORKER is not set for worker operation",
            )) as BoxError
        })?;
        let args = WorkerRequestArgs {
            worker: worker.as_path(),
            settings: &self.bootstrap.settings,
            env_vars: &self.env_vars,
            operation,
            timeout,
        };
        run_worker(&WorkerRequest::new(args)).map_err(|err| Box::new(err) as BoxError)
    }

    fn execute_admin_sql(&self, sql: &str) -> Result<(), BoxError> {
        let mut conn = PgConnection::establish(&self.database_url("postgres"))?;
        diesel::sql_query(sql).execute(&mut conn)?;
        Ok(())
    }

    fn database_exists(&self, name: &str) -> Result<bool, BoxError> {
        #[derive(diesel::QueryableByName)]
        struct Exists {
            #[diesel(sql_type = diesel::sql_types::Bool)]
            exists: bool,
        }

        let mut conn = PgConnection::establish(&self.database_url("postgres"))?;
        let row = diesel::sql_query(
            "SELECT EXISTS (SELECT 1 FROM pg_database WHERE datname = $1) AS exists",
        )
        .bind::<diesel::sql_types::Text, _>(name)
        .get_result::<Exists>(&mut conn)?;
        Ok(row.exists)
    }
}

impl Drop for EmbeddedCluster {
    fn drop(&mut self) {
        drop(self.stop());
    }
}

/// Shared cluster, or `None` when `PostgreSQL` cannot start on this host.
///
/// Tests receiving `None` return early after the skip notice is printed.
#[fixture]
pub fn postgres_cluster() -> Option<PostgresCluster> {
    let started =
        SHARED_CLUSTER.get_or_init(|| EmbeddedCluster::start().map_err(|err| err.to_string()));
    match started {
        Ok(cluster) => Some(cluster),
        Err(reason) => {
            report_skip(reason);
            None
        }
    }
}

#[expect(
    clippy::print_stderr,
    reason = "skipped database tests are reported to the test runner"
)]
fn report_skip(reason: &str) {
    eprintln!("SKIP-TEST-CLUSTER: failed to start PostgreSQL: {reason}");
}

fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
