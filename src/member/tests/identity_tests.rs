//! Tests for the in-memory identity provider.

use crate::member::{
    adapters::memory::InMemoryIdentityProvider,
    domain::Email,
    ports::{Credential, IdentityError, IdentityProvider},
};
use rstest::{fixture, rstest};

#[fixture]
fn provider() -> InMemoryIdentityProvider {
    InMemoryIdentityProvider::new()
}

fn email(value: &str) -> Email {
    Email::new(value).expect("valid email")
}

#[rstest]
#[tokio::test]
async fn sign_in_matches_email_case_insensitively(provider: InMemoryIdentityProvider) {
    let id = provider
        .register(&email("ada@example.com"), "secret-1")
        .expect("registration succeeds");

    let identity = provider
        .sign_in(&Credential::new("ADA@example.com", "secret-1"))
        .await
        .expect("sign in succeeds");

    assert_eq!(identity.member_id, id);
    assert_eq!(provider.current(), Some(id));
}

#[rstest]
#[tokio::test]
async fn sign_in_rejects_wrong_password(provider: InMemoryIdentityProvider) {
    provider
        .register(&email("ada@example.com"), "secret-1")
        .expect("registration succeeds");

    let result = provider
        .sign_in(&Credential::new("ada@example.com", "wrong-password"))
        .await;
    assert!(matches!(result, Err(IdentityError::InvalidCredentials)));
    assert!(provider.current().is_none());
}

#[rstest]
#[tokio::test]
async fn provisioning_does_not_disturb_current_identity(provider: InMemoryIdentityProvider) {
    let owner = provider
        .register(&email("owner@example.com"), "secret-1")
        .expect("registration succeeds");
    provider
        .sign_in(&Credential::new("owner@example.com", "secret-1"))
        .await
        .expect("sign in succeeds");
    let mut changes = provider.identity_changes();
    changes.mark_unchanged();

    let mut session = provider
        .open_provisioning_session()
        .await
        .expect("session opens");
    let created = session
        .create_identity(&email("new@example.com"), "secret-2")
        .await
        .expect("identity created");
    session.close().await.expect("session closes");

    assert_ne!(created, owner);
    assert_eq!(provider.current(), Some(owner));
    assert!(!changes.has_changed().expect("provider alive"));
    assert!(matches!(
        session
            .create_identity(&email("late@example.com"), "secret-3")
            .await,
        Err(IdentityError::SessionClosed)
    ));
}

#[rstest]
#[case("short", true)]
#[case("long-enough", false)]
fn register_enforces_password_policy(
    provider: InMemoryIdentityProvider,
    #[case] password: &str,
    #[case] rejected: bool,
) {
    let result = provider.register(&email("ada@example.com"), password);
    assert_eq!(matches!(result, Err(IdentityError::WeakPassword)), rejected);
}

#[rstest]
fn register_rejects_duplicate_email(provider: InMemoryIdentityProvider) {
    provider
        .register(&email("ada@example.com"), "secret-1")
        .expect("registration succeeds");
    let result = provider.register(&email("Ada@Example.com"), "secret-2");
    assert!(matches!(result, Err(IdentityError::EmailInUse(_))));
}

#[rstest]
#[tokio::test]
async fn sign_out_publishes_identity_change(provider: InMemoryIdentityProvider) {
    provider
        .register(&email("ada@example.com"), "secret-1")
        .expect("registration succeeds");
    provider
        .sign_in(&Credential::new("ada@example.com", "secret-1"))
        .await
        .expect("sign in succeeds");
    let mut changes = provider.identity_changes();
    changes.mark_unchanged();

    provider.sign_out().await.expect("sign out succeeds");

    assert!(changes.has_changed().expect("provider alive"));
    assert!(changes.borrow_and_update().is_none());
}

#[rstest]
#[tokio::test]
async fn new_session_shares_accounts_but_not_sign_in(provider: InMemoryIdentityProvider) {
    let id = provider
        .register(&email("ada@example.com"), "secret-1")
        .expect("registration succeeds");
    let other = provider.new_session();

    other
        .sign_in(&Credential::new("ada@example.com", "secret-1"))
        .await
        .expect("sign in succeeds");

    assert_eq!(other.current(), Some(id));
    assert!(provider.current().is_none());
}
