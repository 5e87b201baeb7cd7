//! Integration scenarios for the task status lifecycle.

use super::helpers::{Backend, backend};
use chrono::NaiveDate;
use rstest::rstest;
use taskboard::task::domain::{NewTask, TaskStatus};
use taskboard::workspace::ErrorKind;

#[rstest]
#[tokio::test]
async fn completion_is_recorded_and_cleared(backend: Backend) -> eyre::Result<()> {
    backend.register("olive@example.com")?;
    let member_id = backend.register("milo@example.com")?;
    let mut owner = backend.client("olive@example.com").await?;
    let mut member = backend.client("milo@example.com").await?;
    owner.sync();

    let due = NaiveDate::from_ymd_opt(2026, 12, 1).ok_or_else(|| eyre::eyre!("bad date"))?;
    let task = owner
        .create_task(NewTask::new("Write notes", [member_id.clone()], due)?)
        .await?;
    member.sync();

    member.change_task_status(&task, TaskStatus::Done).await?;
    owner.sync();
    let done = owner
        .task(&task)
        .ok_or_else(|| eyre::eyre!("task missing"))?;
    eyre::ensure!(
        done.completion().map(|c| &c.completed_by) == Some(&member_id),
        "completion should name the assignee"
    );

    owner.change_task_status(&task, TaskStatus::Blocked).await?;
    owner.sync();
    let blocked = owner
        .task(&task)
        .ok_or_else(|| eyre::eyre!("task missing"))?;
    eyre::ensure!(blocked.completion().is_none(), "leaving Done clears completion");
    eyre::ensure!(
        owner.completed_tasks().is_empty(),
        "no task should remain completed"
    );
    Ok(())
}

#[rstest]
#[tokio::test]
async fn unassigned_members_cannot_move_tasks(backend: Backend) -> eyre::Result<()> {
    backend.register("olive@example.com")?;
    let member_id = backend.register("milo@example.com")?;
    backend.register("vic@example.com")?;
    let mut owner = backend.client("olive@example.com").await?;
    let mut outsider = backend.client("vic@example.com").await?;
    backend.client("milo@example.com").await?;
    owner.sync();

    let due = NaiveDate::from_ymd_opt(2026, 12, 1).ok_or_else(|| eyre::eyre!("bad date"))?;
    let task = owner
        .create_task(NewTask::new("Review", [member_id], due)?)
        .await?;
    outsider.sync();

    let attempt = outsider.change_task_status(&task, TaskStatus::Done).await;
    eyre::ensure!(
        attempt.as_ref().err().map(|e| e.kind()) == Some(ErrorKind::NotAuthorized),
        "outsider should be refused, got {attempt:?}"
    );
    outsider.sync();
    eyre::ensure!(
        outsider.task(&task).map(|t| t.status()) == Some(TaskStatus::ToDo),
        "task should be unchanged"
    );
    Ok(())
}
