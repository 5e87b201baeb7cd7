//! Tests for provisioning, role changes, removal, and profile edits.

use super::{Harness, OwnerAndMember, harness, owner_and_member};
use crate::member::domain::{ProfileUpdate, Role};
use crate::member::ports::Credential;
use crate::store::domain::Collection;
use crate::store::ports::DocumentStore;
use crate::workspace::{ErrorKind, WorkspaceError};
use rstest::rstest;

#[rstest]
#[tokio::test]
async fn sole_owner_cannot_be_demoted(harness: Harness) {
    let OwnerAndMember {
        mut owner,
        owner_id,
        ..
    } = owner_and_member(&harness).await;

    let err = owner
        .change_role(&owner_id, Role::Member)
        .await
        .expect_err("last owner");

    assert_eq!(err.kind(), ErrorKind::LastOwnerViolation);
    owner.sync();
    assert_eq!(owner.member(&owner_id).map(|m| m.role()), Some(Role::Owner));
}

#[rstest]
#[tokio::test]
async fn demoted_owner_loses_admin_rights(harness: Harness) {
    let OwnerAndMember {
        mut owner,
        mut member,
        owner_id,
        member_id,
    } = owner_and_member(&harness).await;
    owner
        .change_role(&member_id, Role::Owner)
        .await
        .expect("promotion succeeds");
    member.sync();
    member
        .change_role(&member_id, Role::Viewer)
        .await
        .expect("one owner remains");
    owner.sync();
    member.sync();

    let err = member
        .remove_member(&owner_id)
        .await
        .expect_err("viewer is not an owner");
    assert_eq!(err.kind(), ErrorKind::NotAuthorized);
    assert_eq!(owner.member(&owner_id).map(|m| m.is_deleted()), Some(false));
}

#[rstest]
#[tokio::test]
async fn second_owner_allows_demotion(harness: Harness) {
    let OwnerAndMember {
        mut owner,
        owner_id,
        member_id,
        ..
    } = owner_and_member(&harness).await;
    owner
        .change_role(&member_id, Role::Owner)
        .await
        .expect("promotion succeeds");
    owner.sync();

    owner
        .change_role(&owner_id, Role::Member)
        .await
        .expect("another owner remains");
    owner.sync();

    assert_eq!(owner.member(&owner_id).map(|m| m.role()), Some(Role::Member));
    assert_eq!(owner.member(&member_id).map(|m| m.role()), Some(Role::Owner));
}

#[rstest]
#[tokio::test]
async fn stale_owner_view_rejects_demotion(harness: Harness) {
    let OwnerAndMember {
        mut owner,
        mut member,
        owner_id,
        member_id,
    } = owner_and_member(&harness).await;
    owner
        .change_role(&member_id, Role::Owner)
        .await
        .expect("promotion succeeds");
    owner.sync();
    member.sync();

    // Both owners demote the other from the same mirrored state.
    owner
        .change_role(&member_id, Role::Member)
        .await
        .expect("first demotion succeeds");
    let err = member
        .change_role(&owner_id, Role::Member)
        .await
        .expect_err("owners changed underneath");

    assert_eq!(err.kind(), ErrorKind::Store);
    owner.sync();
    assert_eq!(owner.member(&owner_id).map(|m| m.role()), Some(Role::Owner));
}

#[rstest]
#[tokio::test]
async fn members_cannot_change_roles(harness: Harness) {
    let OwnerAndMember {
        member, owner_id, ..
    } = owner_and_member(&harness).await;

    let err = member
        .change_role(&owner_id, Role::Viewer)
        .await
        .expect_err("member is not an owner");

    assert!(matches!(err, WorkspaceError::NotAuthorized { .. }));
}

#[rstest]
#[tokio::test]
async fn owner_cannot_remove_themselves(harness: Harness) {
    let OwnerAndMember {
        owner, owner_id, ..
    } = owner_and_member(&harness).await;

    let err = owner.remove_member(&owner_id).await.expect_err("self removal");

    assert!(matches!(err, WorkspaceError::SelfRemoval(_)));
    assert_eq!(err.kind(), ErrorKind::NotAuthorized);
}

#[rstest]
#[tokio::test]
async fn removed_members_leave_listings_and_can_be_restored(harness: Harness) {
    let OwnerAndMember {
        mut owner,
        member_id,
        ..
    } = owner_and_member(&harness).await;

    owner.remove_member(&member_id).await.expect("removed");
    owner.sync();
    assert_eq!(owner.active_members().len(), 1);
    assert!(owner.member(&member_id).is_some_and(|m| m.is_deleted()));

    owner.remove_member(&member_id).await.expect("second removal is a no-op");

    owner.restore_member(&member_id).await.expect("restored");
    owner.sync();
    assert_eq!(owner.active_members().len(), 2);
}

#[rstest]
#[tokio::test]
async fn removed_member_loses_access_on_next_action(harness: Harness) {
    let OwnerAndMember {
        owner,
        mut member,
        member_id,
        ..
    } = owner_and_member(&harness).await;
    owner.remove_member(&member_id).await.expect("removed");
    member.sync();

    let err = member
        .update_profile(&member_id, ProfileUpdate::new().with_name("Milo"))
        .await
        .expect_err("deactivated");

    assert_eq!(err.kind(), ErrorKind::AccountDeactivated);
}

#[rstest]
#[tokio::test]
async fn provisioning_creates_a_member_without_switching_session(harness: Harness) {
    harness.register("olive@example.com");
    let mut owner = harness.sign_in("olive@example.com").await;
    let owner_id = owner.current_member_id().cloned().expect("signed in");

    let id = owner
        .provision_member("Nia Park", "nia@example.com", "secret-2")
        .await
        .expect("provisioned");
    owner.sync();

    assert_eq!(owner.current_member_id(), Some(&owner_id));
    let nia = owner.member(&id).expect("profile mirrored");
    assert_eq!(nia.role(), Role::Member);
    assert_eq!(nia.name(), "Nia Park");

    let mut nia_session = harness.workspace();
    let me = nia_session
        .sign_in(&Credential::new("nia@example.com", "secret-2"))
        .await
        .expect("provisioned login works");
    assert_eq!(me.id(), &id);
    assert_eq!(me.role(), Role::Member);
}

#[rstest]
#[tokio::test]
async fn provisioning_rejects_an_email_in_use(harness: Harness) {
    let OwnerAndMember { owner, .. } = owner_and_member(&harness).await;

    let err = owner
        .provision_member("Milo Two", "MILO@example.com", "secret-2")
        .await
        .expect_err("duplicate email");

    assert_eq!(err.kind(), ErrorKind::Validation);
}

#[rstest]
#[tokio::test]
async fn provisioning_is_owner_only(harness: Harness) {
    let OwnerAndMember { member, .. } = owner_and_member(&harness).await;

    let err = member
        .provision_member("Nia Park", "nia@example.com", "secret-2")
        .await
        .expect_err("member is not an owner");

    assert_eq!(err.kind(), ErrorKind::NotAuthorized);
}

#[rstest]
#[tokio::test]
async fn members_edit_their_own_profile_only(harness: Harness) {
    let OwnerAndMember {
        mut owner,
        member,
        owner_id,
        member_id,
    } = owner_and_member(&harness).await;

    member
        .update_profile(
            &member_id,
            ProfileUpdate::new()
                .with_name("Milo Diaz")
                .with_email("milo.diaz@example.com"),
        )
        .await
        .expect("own profile");
    let err = member
        .update_profile(&owner_id, ProfileUpdate::new().with_name("Nope"))
        .await
        .expect_err("someone else's profile");
    owner.sync();

    assert_eq!(err.kind(), ErrorKind::NotAuthorized);
    let milo = owner.member(&member_id).expect("mirrored");
    assert_eq!(milo.name(), "Milo Diaz");
    assert_eq!(milo.email().as_str(), "milo.diaz@example.com");
    assert_eq!(milo.role(), Role::Member);
}

#[rstest]
#[tokio::test]
async fn profile_edit_rejects_another_members_email(harness: Harness) {
    let OwnerAndMember {
        owner, member_id, ..
    } = owner_and_member(&harness).await;

    let err = owner
        .update_profile(&member_id, ProfileUpdate::new().with_email("olive@example.com"))
        .await
        .expect_err("email taken");

    assert_eq!(err.kind(), ErrorKind::Validation);
}

#[rstest]
#[tokio::test]
async fn store_outage_leaves_store_and_mirror_unchanged(harness: Harness) {
    let OwnerAndMember {
        mut owner,
        member_id,
        ..
    } = owner_and_member(&harness).await;
    harness.store.set_available(false);

    let err = owner
        .change_role(&member_id, Role::Viewer)
        .await
        .expect_err("store offline");
    harness.store.set_available(true);
    owner.sync();

    assert_eq!(err.kind(), ErrorKind::Store);
    assert_eq!(owner.member(&member_id).map(|m| m.role()), Some(Role::Member));
    let stored = harness
        .store
        .get(Collection::Members, &member_id.document_id())
        .await
        .expect("store reachable")
        .expect("profile exists");
    assert_eq!(stored.field("role"), Some(&serde_json::json!("Member")));
}
