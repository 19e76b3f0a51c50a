//! Shared fixtures for in-memory integration tests.

use std::sync::Arc;

use chrono::{Duration, Utc};
use mockable::DefaultClock;
use rstest::fixture;
use taskboard::config::TaskBoardConfig;
use taskboard::member::{
    adapters::memory::InMemoryMembershipRepository,
    domain::{Member, MemberRole, UserId, WorkspaceId},
    ports::MembershipRepository,
};
use taskboard::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::{ProjectId, Task, TaskStatus},
    services::{CreateTaskRequest, TaskLifecycleService, TaskOrderingService},
};

/// Lifecycle service wired to in-memory adapters.
pub type LifecycleService =
    TaskLifecycleService<InMemoryTaskRepository, InMemoryMembershipRepository, DefaultClock>;

/// Ordering service wired to in-memory adapters.
pub type OrderingService =
    TaskOrderingService<InMemoryTaskRepository, InMemoryMembershipRepository, DefaultClock>;

/// Both task services sharing one task store and one membership directory.
pub struct Board {
    pub lifecycle: LifecycleService,
    pub ordering: OrderingService,
    pub members: Arc<InMemoryMembershipRepository>,
    pub tasks: Arc<InMemoryTaskRepository>,
}

impl Board {
    /// Wires both services with `config`.
    pub fn with_config(config: &TaskBoardConfig) -> Self {
        let tasks = Arc::new(InMemoryTaskRepository::new());
        let members = Arc::new(InMemoryMembershipRepository::new());
        let clock = Arc::new(DefaultClock);
        Self {
            lifecycle: TaskLifecycleService::new(
                Arc::clone(&tasks),
                Arc::clone(&members),
                Arc::clone(&clock),
                config,
            ),
            ordering: TaskOrderingService::new(
                Arc::clone(&tasks),
                Arc::clone(&members),
                clock,
                config,
            ),
            members,
            tasks,
        }
    }

    /// Adds a new user to `workspace_id`.
    ///
    /// # Errors
    ///
    /// Returns an error when the membership cannot be stored.
    pub async fn join(&self, workspace_id: WorkspaceId) -> Result<Member, eyre::Report> {
        let member = Member::new(workspace_id, UserId::new(), MemberRole::Member, &DefaultClock);
        self.members.store(&member).await?;
        Ok(member)
    }

    /// Creates a task assigned to `member` in the member's workspace.
    ///
    /// # Errors
    ///
    /// Returns an error when the lifecycle service rejects the request.
    pub async fn create(
        &self,
        member: &Member,
        name: &str,
        status: TaskStatus,
    ) -> Result<Task, eyre::Report> {
        let request = CreateTaskRequest::new(
            name,
            status,
            member.workspace_id(),
            ProjectId::new(),
            member.id(),
            Utc::now() + Duration::days(7),
        );
        Ok(self.lifecycle.create_task(member.user_id(), request).await?)
    }
}

/// Provides services over empty in-memory stores with default settings.
#[fixture]
pub fn board() -> Board {
    Board::with_config(&TaskBoardConfig::default())
}
