//! In-memory identity provider for tests and embedders.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tokio::sync::watch;
use uuid::Uuid;

use crate::member::{
    domain::{Email, MemberId},
    ports::{
        AuthenticatedIdentity, Credential, IdentityError, IdentityProvider, IdentityResult,
        ProvisioningSession,
    },
};

/// Shortest password the in-memory provider accepts.
const MIN_PASSWORD_LENGTH: usize = 6;

/// Thread-safe in-memory identity provider.
#[derive(Debug, Clone)]
pub struct InMemoryIdentityProvider {
    accounts: Arc<RwLock<HashMap<String, Account>>>,
    current: Arc<watch::Sender<Option<MemberId>>>,
}

#[derive(Debug, Clone)]
struct Account {
    id: MemberId,
    email: String,
    password: String,
}

impl Default for InMemoryIdentityProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryIdentityProvider {
    /// Creates a provider with no accounts and nobody signed in.
    #[must_use]
    pub fn new() -> Self {
        let (sender, _) = watch::channel(None);
        Self {
            accounts: Arc::new(RwLock::new(HashMap::new())),
            current: Arc::new(sender),
        }
    }

    /// Registers a credential directly, as an administrator console would.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError`] under the same rules as
    /// [`ProvisioningSession::create_identity`].
    pub fn register(&self, email: &Email, password: &str) -> IdentityResult<MemberId> {
        insert_account(&self.accounts, email, password)
    }

    /// Returns a provider sharing this one's accounts with its own,
    /// signed-out session, as a second device would have.
    #[must_use]
    pub fn new_session(&self) -> Self {
        let (sender, _) = watch::channel(None);
        Self {
            accounts: Arc::clone(&self.accounts),
            current: Arc::new(sender),
        }
    }

    /// Returns the identifier currently signed in.
    #[must_use]
    pub fn current(&self) -> Option<MemberId> {
        self.current.borrow().clone()
    }
}

fn account_key(email: &str) -> String {
    email.trim().to_lowercase()
}

fn insert_account(
    accounts: &RwLock<HashMap<String, Account>>,
    email: &Email,
    password: &str,
) -> IdentityResult<MemberId> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(IdentityError::WeakPassword);
    }
    let mut guard = accounts
        .write()
        .map_err(|err| IdentityError::unavailable(std::io::Error::other(err.to_string())))?;
    let key = account_key(email.as_str());
    if guard.contains_key(&key) {
        return Err(IdentityError::EmailInUse(email.to_string()));
    }
    let id = MemberId::new(Uuid::new_v4().simple().to_string());
    guard.insert(
        key,
        Account {
            id: id.clone(),
            email: email.to_string(),
            password: password.to_owned(),
        },
    );
    Ok(id)
}

#[async_trait]
impl IdentityProvider for InMemoryIdentityProvider {
    async fn sign_in(&self, credential: &Credential) -> IdentityResult<AuthenticatedIdentity> {
        let account = {
            let guard = self
                .accounts
                .read()
                .map_err(|err| IdentityError::unavailable(std::io::Error::other(err.to_string())))?;
            guard
                .get(&account_key(credential.email()))
                .filter(|account| account.password == credential.password())
                .cloned()
                .ok_or(IdentityError::InvalidCredentials)?
        };
        self.current.send_replace(Some(account.id.clone()));
        Ok(AuthenticatedIdentity {
            member_id: account.id,
            email: account.email,
            display_name: None,
        })
    }

    async fn sign_out(&self) -> IdentityResult<()> {
        self.current.send_replace(None);
        Ok(())
    }

    fn identity_changes(&self) -> watch::Receiver<Option<MemberId>> {
        self.current.subscribe()
    }

    async fn open_provisioning_session(&self) -> IdentityResult<Box<dyn ProvisioningSession>> {
        Ok(Box::new(InMemoryProvisioningSession {
            accounts: Some(Arc::clone(&self.accounts)),
        }))
    }
}

/// Provisioning session backed by the same account table.
#[derive(Debug)]
struct InMemoryProvisioningSession {
    accounts: Option<Arc<RwLock<HashMap<String, Account>>>>,
}

#[async_trait]
impl ProvisioningSession for InMemoryProvisioningSession {
    async fn create_identity(
        &mut self,
        email: &Email,
        password: &str,
    ) -> IdentityResult<MemberId> {
        let accounts = self.accounts.as_ref().ok_or(IdentityError::SessionClosed)?;
        insert_account(accounts, email, password)
    }

    async fn close(&mut self) -> IdentityResult<()> {
        self.accounts = None;
        Ok(())
    }
}
