//! Port contracts for the external authentication provider.

pub mod identity;

pub use identity::{
    AuthenticatedIdentity, Credential, IdentityError, IdentityProvider, IdentityResult,
    ProvisioningSession,
};
