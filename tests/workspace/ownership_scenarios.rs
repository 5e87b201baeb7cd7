//! Integration scenarios for workspace ownership.

use super::helpers::{Backend, backend};
use rstest::rstest;
use taskboard::member::domain::Role;
use taskboard::store::domain::{Collection, Fields};
use taskboard::store::ports::DocumentStore;
use taskboard::workspace::ErrorKind;

#[rstest]
#[tokio::test]
async fn first_member_owns_the_workspace_and_later_ones_join(
    backend: Backend,
) -> eyre::Result<()> {
    backend.register("olive@example.com")?;
    backend.register("milo@example.com")?;

    let owner = backend.client("olive@example.com").await?;
    let member = backend.client("milo@example.com").await?;

    eyre::ensure!(
        owner.current_member().map(|m| m.role()) == Some(Role::Owner),
        "first sign-in should create an owner"
    );
    eyre::ensure!(
        member.current_member().map(|m| m.role()) == Some(Role::Member),
        "later sign-ins should create members"
    );
    Ok(())
}

#[rstest]
#[tokio::test]
async fn last_owner_is_protected_from_demotion_and_removal(
    backend: Backend,
) -> eyre::Result<()> {
    let owner_id = backend.register("olive@example.com")?;
    backend.register("milo@example.com")?;
    let mut owner = backend.client("olive@example.com").await?;
    backend.client("milo@example.com").await?;
    owner.sync();

    let demotion = owner.change_role(&owner_id, Role::Member).await;
    eyre::ensure!(
        demotion.as_ref().err().map(|e| e.kind()) == Some(ErrorKind::LastOwnerViolation),
        "demoting the last owner should fail, got {demotion:?}"
    );

    owner.sync();
    let owners = owner
        .active_members()
        .into_iter()
        .filter(|m| m.role() == Role::Owner)
        .count();
    eyre::ensure!(owners == 1, "expected one active owner, found {owners}");
    Ok(())
}

#[rstest]
#[tokio::test]
async fn sign_in_heals_a_workspace_without_owners(backend: Backend) -> eyre::Result<()> {
    let member_id = backend.register("milo@example.com")?;
    let profile = Fields::new()
        .set("name", "Milo")
        .set("email", "milo@example.com")
        .set("role", "Member");
    backend
        .store
        .set(Collection::Members, &member_id.document_id(), profile)
        .await?;

    let member = backend.client("milo@example.com").await?;

    eyre::ensure!(
        member.current_member().map(|m| m.role()) == Some(Role::Owner),
        "the only active member should be promoted to owner"
    );
    Ok(())
}
