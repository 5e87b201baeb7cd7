//! Unit tests for the workspace coordinator.

mod member_admin_tests;

use crate::member::adapters::memory::InMemoryIdentityProvider;
use crate::member::domain::{Email, MemberId, Role};
use crate::member::ports::Credential;
use crate::store::adapters::memory::InMemoryDocumentStore;
use crate::store::domain::{Collection, Fields};
use crate::store::ports::DocumentStore;
use crate::task::domain::{NewTask, TaskId};
use crate::workspace::{Workspace, WorkspaceConfig};
use chrono::NaiveDate;
use mockable::DefaultClock;
use rstest::fixture;
use std::sync::Arc;

pub(super) const PASSWORD: &str = "secret-1";

pub(super) type TestWorkspace =
    Workspace<InMemoryDocumentStore, InMemoryIdentityProvider, DefaultClock>;

/// Shared store and account table; every workspace gets its own session.
pub(super) struct Harness {
    pub(super) store: Arc<InMemoryDocumentStore>,
    accounts: InMemoryIdentityProvider,
    config: WorkspaceConfig,
}

impl Harness {
    pub(super) fn with_config(config: WorkspaceConfig) -> Self {
        Self {
            store: Arc::new(InMemoryDocumentStore::new()),
            accounts: InMemoryIdentityProvider::new(),
            config,
        }
    }

    pub(super) fn register(&self, email: &str) -> MemberId {
        self.accounts
            .register(&Email::new(email).expect("valid email"), PASSWORD)
            .expect("registration succeeds")
    }

    pub(super) fn workspace_with_provider(
        &self,
    ) -> (TestWorkspace, Arc<InMemoryIdentityProvider>) {
        let provider = Arc::new(self.accounts.new_session());
        let workspace = Workspace::new(
            Arc::clone(&self.store),
            Arc::clone(&provider),
            Arc::new(DefaultClock),
            self.config.clone(),
        );
        (workspace, provider)
    }

    pub(super) fn workspace(&self) -> TestWorkspace {
        self.workspace_with_provider().0
    }

    pub(super) async fn sign_in(&self, email: &str) -> TestWorkspace {
        let mut workspace = self.workspace();
        workspace
            .sign_in(&Credential::new(email, PASSWORD))
            .await
            .expect("sign in succeeds");
        workspace
    }

    /// Writes a member profile straight into the store.
    pub(super) async fn seed_profile(&self, id: &MemberId, email: &str, role: Role, deleted: bool) {
        let fields = Fields::new()
            .set("name", email.split('@').next().unwrap_or(email))
            .set("email", email)
            .set("role", role.as_str())
            .set("isDeleted", deleted)
            .set("avatarUrl", "");
        self.store
            .set(Collection::Members, &id.document_id(), fields)
            .await
            .expect("seed profile");
    }
}

#[fixture]
pub(super) fn harness() -> Harness {
    Harness::with_config(WorkspaceConfig::default())
}

/// Owner `O` and member `M` of a fresh workspace, both signed in.
pub(super) struct OwnerAndMember {
    pub(super) owner: TestWorkspace,
    pub(super) member: TestWorkspace,
    pub(super) owner_id: MemberId,
    pub(super) member_id: MemberId,
}

pub(super) async fn owner_and_member(harness: &Harness) -> OwnerAndMember {
    let owner_id = harness.register("olive@example.com");
    let member_id = harness.register("milo@example.com");
    let mut owner = harness.sign_in("olive@example.com").await;
    let member = harness.sign_in("milo@example.com").await;
    owner.sync();
    OwnerAndMember {
        owner,
        member,
        owner_id,
        member_id,
    }
}

pub(super) fn due() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 11, 30).expect("valid date")
}

pub(super) async fn create_task(
    owner: &mut TestWorkspace,
    title: &str,
    assignees: &[MemberId],
) -> TaskId {
    let request = NewTask::new(title, assignees.iter().cloned(), due()).expect("valid task");
    let id = owner.create_task(request).await.expect("task created");
    owner.sync();
    id
}
