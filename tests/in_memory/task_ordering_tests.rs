//! In-memory integration tests for board ordering.

use super::helpers::{Board, board};
use rstest::rstest;
use taskboard::config::TaskBoardConfig;
use taskboard::member::domain::{UserId, WorkspaceId};
use taskboard::task::{
    domain::{Position, RankGap, ReorderBatch, TaskReorder, TaskStatus},
    ports::{TaskFilter, TaskRepository},
    services::{TaskErrorKind, TaskServiceError},
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn dragging_a_card_between_columns_updates_the_board(
    board: Board,
) -> Result<(), eyre::Report> {
    let workspace = WorkspaceId::new();
    let member = board.join(workspace).await?;
    let design = board.create(&member, "Design", TaskStatus::Todo).await?;
    let build = board.create(&member, "Build", TaskStatus::Todo).await?;
    let ship = board.create(&member, "Ship", TaskStatus::InProgress).await?;

    let batch = ReorderBatch::new([
        TaskReorder::new(build.id(), TaskStatus::InProgress, Position::new(500)),
        TaskReorder::new(ship.id(), TaskStatus::InProgress, Position::new(1500)),
    ])?;
    board
        .ordering
        .apply_bulk_update(member.user_id(), batch)
        .await?;

    let projected = board
        .ordering
        .board(member.user_id(), &TaskFilter::for_workspace(workspace))
        .await?;
    let todo: Vec<_> = projected
        .column(TaskStatus::Todo)
        .iter()
        .map(|task| task.id())
        .collect();
    let in_progress: Vec<_> = projected
        .column(TaskStatus::InProgress)
        .iter()
        .map(|task| task.id())
        .collect();
    eyre::ensure!(todo == vec![design.id()], "unexpected todo column {todo:?}");
    eyre::ensure!(
        in_progress == vec![build.id(), ship.id()],
        "unexpected in-progress column {in_progress:?}"
    );
    eyre::ensure!(projected.rank_collisions().is_empty(), "unexpected rank collision");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn repeated_allocation_collides_until_rebalanced(
    board: Board,
) -> Result<(), eyre::Report> {
    let workspace = WorkspaceId::new();
    let member = board.join(workspace).await?;
    board.create(&member, "first", TaskStatus::Backlog).await?;
    board.create(&member, "second", TaskStatus::Backlog).await?;
    board.create(&member, "third", TaskStatus::Backlog).await?;

    let filter = TaskFilter::for_workspace(workspace);
    let before = board.ordering.board(member.user_id(), &filter).await?;
    let collisions = before.rank_collisions();
    eyre::ensure!(collisions.len() == 1, "expected one collision, got {collisions:?}");

    let column = board
        .ordering
        .rebalance_bucket(member.user_id(), workspace, TaskStatus::Backlog)
        .await?;
    let ranks: Vec<i64> = column.iter().map(|task| task.position().value()).collect();
    eyre::ensure!(ranks == vec![1000, 2000, 3000], "unexpected ranks {ranks:?}");

    let after = board.ordering.board(member.user_id(), &filter).await?;
    eyre::ensure!(after.rank_collisions().is_empty(), "collision survived rebalance");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rejected_batches_leave_the_store_untouched(board: Board) -> Result<(), eyre::Report> {
    let home = WorkspaceId::new();
    let away = WorkspaceId::new();
    let member = board.join(home).await?;
    let visitor = board.join(away).await?;
    let own = board.create(&member, "own", TaskStatus::Todo).await?;
    let foreign = board.create(&visitor, "foreign", TaskStatus::Todo).await?;

    let spanning = ReorderBatch::new([
        TaskReorder::new(own.id(), TaskStatus::Done, Position::new(1)),
        TaskReorder::new(foreign.id(), TaskStatus::Done, Position::new(2)),
    ])?;
    let scope_err = board
        .ordering
        .apply_bulk_update(member.user_id(), spanning)
        .await
        .err()
        .ok_or_else(|| eyre::eyre!("spanning batch was accepted"))?;
    eyre::ensure!(scope_err.kind() == TaskErrorKind::Invalid, "got {scope_err:?}");

    let trespass = ReorderBatch::new([TaskReorder::new(
        foreign.id(),
        TaskStatus::Done,
        Position::new(1),
    )])?;
    let auth_err = board
        .ordering
        .apply_bulk_update(UserId::new(), trespass)
        .await
        .err()
        .ok_or_else(|| eyre::eyre!("non-member batch was accepted"))?;
    eyre::ensure!(
        matches!(auth_err, TaskServiceError::Unauthorized { .. }),
        "got {auth_err:?}"
    );

    for task in [&own, &foreign] {
        let stored = board
            .tasks
            .find_by_id(task.id())
            .await?
            .ok_or_else(|| eyre::eyre!("task {} disappeared", task.id()))?;
        eyre::ensure!(&stored == task, "task {} was modified", task.id());
    }
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn configured_gap_drives_allocation() -> Result<(), eyre::Report> {
    let config = TaskBoardConfig {
        rank_gap: RankGap::new(10)?,
        ..TaskBoardConfig::default()
    };
    let board = Board::with_config(&config);
    let workspace = WorkspaceId::new();
    let member = board.join(workspace).await?;

    let first = board.create(&member, "first", TaskStatus::Todo).await?;
    let second = board.create(&member, "second", TaskStatus::Todo).await?;
    eyre::ensure!(first.position() == Position::new(10), "first at {}", first.position());
    eyre::ensure!(second.position() == Position::new(20), "second at {}", second.position());

    let next = board.ordering.allocate(workspace, TaskStatus::Todo).await?;
    eyre::ensure!(next == Position::new(20), "next allocation at {next}");
    Ok(())
}
