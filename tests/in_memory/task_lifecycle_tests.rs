//! In-memory integration tests for task lifecycle operations.

use super::helpers::{Board, board};
use chrono::{Duration, Utc};
use rstest::rstest;
use taskboard::member::domain::WorkspaceId;
use taskboard::task::{
    domain::{Position, ProjectId, TaskStatus},
    ports::TaskFilter,
    services::{CreateTaskRequest, TaskErrorKind, UpdateTaskRequest},
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn project_filter_and_search_narrow_the_listing(board: Board) -> Result<(), eyre::Report> {
    let workspace = WorkspaceId::new();
    let member = board.join(workspace).await?;
    let project = ProjectId::new();
    let in_project = CreateTaskRequest::new(
        "Migrate billing",
        TaskStatus::Todo,
        workspace,
        project,
        member.id(),
        Utc::now() + Duration::days(1),
    )
    .with_description("Move invoices to the new ledger");
    let tracked = board
        .lifecycle
        .create_task(member.user_id(), in_project)
        .await?;
    board.create(&member, "Unrelated chore", TaskStatus::Todo).await?;

    let by_project = board
        .lifecycle
        .list_tasks(
            member.user_id(),
            &TaskFilter::for_workspace(workspace).with_project(project),
        )
        .await?;
    eyre::ensure!(by_project == vec![tracked.clone()], "project filter mismatch");

    let by_description = board
        .lifecycle
        .list_tasks(
            member.user_id(),
            &TaskFilter::for_workspace(workspace).with_search("LEDGER"),
        )
        .await?;
    eyre::ensure!(by_description == vec![tracked], "search mismatch");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn moving_a_task_by_edit_places_it_after_the_column_head(
    board: Board,
) -> Result<(), eyre::Report> {
    let workspace = WorkspaceId::new();
    let member = board.join(workspace).await?;
    board.create(&member, "Already done", TaskStatus::Done).await?;
    let task = board.create(&member, "Finishing", TaskStatus::InReview).await?;

    let moved = board
        .lifecycle
        .update_task(
            member.user_id(),
            task.id(),
            UpdateTaskRequest::new().with_status(TaskStatus::Done),
        )
        .await?;

    eyre::ensure!(moved.status() == TaskStatus::Done, "status not changed");
    eyre::ensure!(
        moved.position() == Position::new(2000),
        "moved to {}",
        moved.position()
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_a_task_removes_it_from_the_board(board: Board) -> Result<(), eyre::Report> {
    let workspace = WorkspaceId::new();
    let member = board.join(workspace).await?;
    let keep = board.create(&member, "keep", TaskStatus::Todo).await?;
    let dropped = board.create(&member, "drop", TaskStatus::Todo).await?;

    board.lifecycle.delete_task(member.user_id(), dropped.id()).await?;

    let projected = board
        .ordering
        .board(member.user_id(), &TaskFilter::for_workspace(workspace))
        .await?;
    eyre::ensure!(projected.len() == 1, "expected one task left");
    eyre::ensure!(
        projected
            .column(TaskStatus::Todo)
            .iter()
            .all(|task| task.id() == keep.id()),
        "wrong task survived"
    );

    let err = board
        .lifecycle
        .get_task(member.user_id(), dropped.id())
        .await
        .err()
        .ok_or_else(|| eyre::eyre!("deleted task is still readable"))?;
    eyre::ensure!(err.kind() == TaskErrorKind::NotFound, "got {err:?}");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn analytics_are_scoped_to_the_workspace(board: Board) -> Result<(), eyre::Report> {
    let workspace = WorkspaceId::new();
    let member = board.join(workspace).await?;
    let outsider = board.join(WorkspaceId::new()).await?;
    board.create(&member, "counted", TaskStatus::Todo).await?;
    board.create(&outsider, "ignored", TaskStatus::Todo).await?;

    let analytics = board
        .lifecycle
        .analytics(member.user_id(), &TaskFilter::for_workspace(workspace))
        .await?;

    eyre::ensure!(analytics.task_count.count == 1, "got {analytics:?}");
    eyre::ensure!(analytics.assigned_task_count.count == 1, "got {analytics:?}");
    eyre::ensure!(analytics.overdue_task_count.count == 0, "got {analytics:?}");
    Ok(())
}
