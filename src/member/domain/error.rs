//! Error types for member domain validation and rules.

use super::MemberId;
use thiserror::Error;

/// Errors returned by member validation and roster rules.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MemberDomainError {
    /// The member name is empty after trimming.
    #[error("member name must not be empty")]
    EmptyName,

    /// The email address is malformed.
    #[error("invalid email address '{0}'")]
    InvalidEmail(String),

    /// Another active member already uses the email address.
    #[error("email address '{0}' is already in use")]
    DuplicateEmail(String),

    /// The change would leave the workspace without an active owner.
    #[error("member {0} is the last active owner")]
    LastOwnerViolation(MemberId),

    /// The member profile has been soft-deleted.
    #[error("account {0} has been deactivated")]
    AccountDeactivated(MemberId),
}

/// Error returned while parsing roles from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown role: {0}")]
pub struct ParseRoleError(pub String);
