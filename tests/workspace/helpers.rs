//! Shared helpers for workspace integration tests.

use mockable::DefaultClock;
use rstest::fixture;
use std::sync::Arc;
use taskboard::member::{
    adapters::memory::InMemoryIdentityProvider, domain::Email, domain::MemberId,
    ports::Credential,
};
use taskboard::store::adapters::memory::InMemoryDocumentStore;
use taskboard::workspace::{Workspace, WorkspaceConfig};

/// Password used for every registered account.
pub const PASSWORD: &str = "correct-horse";

/// Workspace wired to the in-memory adapters.
pub type MemoryWorkspace = Workspace<InMemoryDocumentStore, InMemoryIdentityProvider, DefaultClock>;

/// One shared store and account table; each client has its own session.
pub struct Backend {
    /// Shared document store.
    pub store: Arc<InMemoryDocumentStore>,
    accounts: InMemoryIdentityProvider,
}

impl Backend {
    /// Registers a login and returns its member id.
    ///
    /// # Errors
    ///
    /// Returns an error for an invalid email or a refused registration.
    pub fn register(&self, email: &str) -> eyre::Result<MemberId> {
        Ok(self.accounts.register(&Email::new(email)?, PASSWORD)?)
    }

    /// Opens a new client and signs it in.
    ///
    /// # Errors
    ///
    /// Returns an error when sign-in fails.
    pub async fn client(&self, email: &str) -> eyre::Result<MemoryWorkspace> {
        let mut workspace = Workspace::new(
            Arc::clone(&self.store),
            Arc::new(self.accounts.new_session()),
            Arc::new(DefaultClock),
            WorkspaceConfig::default(),
        );
        workspace.sign_in(&Credential::new(email, PASSWORD)).await?;
        Ok(workspace)
    }
}

/// Provides an empty backend for each test.
#[fixture]
pub fn backend() -> Backend {
    Backend {
        store: Arc::new(InMemoryDocumentStore::new()),
        accounts: InMemoryIdentityProvider::new(),
    }
}
