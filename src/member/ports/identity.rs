//! Authentication provider port.
//!
//! The provider owns login credentials. The workspace only learns the
//! identifier of whoever signed in and, when an owner provisions a new
//! member, asks for a credential to be created in a separate session so the
//! owner's own session is left untouched.

use crate::member::domain::{Email, MemberId};
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::watch;

/// Result type for identity provider operations.
pub type IdentityResult<T> = Result<T, IdentityError>;

/// Email and password pair presented at sign-in.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    email: String,
    password: String,
}

impl Credential {
    /// Creates a credential.
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Returns the email address.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns the password.
    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Identity established by a successful sign-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedIdentity {
    /// Provider-issued identifier, used as the member profile key.
    pub member_id: MemberId,
    /// Email address the identity signed in with.
    pub email: String,
    /// Display name known to the provider, if any.
    pub display_name: Option<String>,
}

/// External authentication provider.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Signs in with a credential, replacing the current identity.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::InvalidCredentials`] when the credential is
    /// rejected.
    async fn sign_in(&self, credential: &Credential) -> IdentityResult<AuthenticatedIdentity>;

    /// Signs the current identity out.
    async fn sign_out(&self) -> IdentityResult<()>;

    /// Returns a receiver that observes every change of the signed-in
    /// identity, `None` meaning signed out.
    fn identity_changes(&self) -> watch::Receiver<Option<MemberId>>;

    /// Opens a disposable session for creating another person's credential
    /// without disturbing the current identity.
    async fn open_provisioning_session(&self) -> IdentityResult<Box<dyn ProvisioningSession>>;
}

/// Disposable session used to create credentials for new members.
#[async_trait]
pub trait ProvisioningSession: Send {
    /// Creates a login credential and returns the new identifier.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::EmailInUse`] when the address already has a
    /// credential or [`IdentityError::WeakPassword`] when the password is
    /// rejected.
    async fn create_identity(&mut self, email: &Email, password: &str)
    -> IdentityResult<MemberId>;

    /// Disposes of the session. Further calls fail with
    /// [`IdentityError::SessionClosed`].
    async fn close(&mut self) -> IdentityResult<()>;
}

/// Errors returned by identity provider implementations.
#[derive(Debug, Clone, Error)]
pub enum IdentityError {
    /// The email and password do not match a known credential.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// A credential already exists for the email address.
    #[error("email address '{0}' already has a login")]
    EmailInUse(String),

    /// The password does not satisfy the provider's policy.
    #[error("password does not meet the provider's requirements")]
    WeakPassword,

    /// The provisioning session has already been closed.
    #[error("provisioning session is closed")]
    SessionClosed,

    /// The provider could not be reached or failed internally.
    #[error("identity provider unavailable: {0}")]
    Unavailable(Arc<dyn std::error::Error + Send + Sync>),
}

impl IdentityError {
    /// Wraps a transport or provider failure.
    pub fn unavailable(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Unavailable(Arc::new(err))
    }
}
