//! Integration scenarios for comment reactions.

use super::helpers::{Backend, backend};
use chrono::NaiveDate;
use rstest::rstest;
use taskboard::comment::domain::Emoji;
use taskboard::task::domain::NewTask;

#[rstest]
#[tokio::test]
async fn each_member_holds_one_reaction(backend: Backend) -> eyre::Result<()> {
    backend.register("olive@example.com")?;
    let member_id = backend.register("milo@example.com")?;
    let mut owner = backend.client("olive@example.com").await?;
    let mut member = backend.client("milo@example.com").await?;
    owner.sync();

    let due = NaiveDate::from_ymd_opt(2026, 12, 1).ok_or_else(|| eyre::eyre!("bad date"))?;
    let task = owner
        .create_task(NewTask::new("Celebrate", [member_id.clone()], due)?)
        .await?;
    member.sync();
    let comment = member.add_comment(&task, "We shipped!").await?;
    owner.open_task(&task).await?;

    owner.toggle_reaction(&comment, "👍").await?;
    member.toggle_reaction(&comment, "👍").await?;
    member.toggle_reaction(&comment, "❤️").await?;
    owner.sync();

    let thumbs = Emoji::new("👍")?;
    let heart = Emoji::new("❤️")?;
    let reactions = owner
        .comments()
        .first()
        .map(|c| c.reactions().clone())
        .ok_or_else(|| eyre::eyre!("comment not mirrored"))?;
    eyre::ensure!(reactions.count(&thumbs) == 1, "owner keeps the thumbs up");
    eyre::ensure!(
        reactions.reaction_of(&member_id) == Some(&heart),
        "member switched to a heart"
    );
    Ok(())
}
