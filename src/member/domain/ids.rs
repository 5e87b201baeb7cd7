//! Identifier and validated scalar types for the member domain.

use super::MemberDomainError;
use crate::store::domain::DocumentId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Member identifier, issued by the external authentication provider.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberId(String);

impl MemberId {
    /// Wraps an externally issued identifier.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the identifier as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the store key of the member profile.
    #[must_use]
    pub fn document_id(&self) -> DocumentId {
        DocumentId::new(self.0.clone())
    }
}

impl AsRef<str> for MemberId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Validated email address.
///
/// The address keeps the casing it was entered with; equality between
/// members is decided by [`Email::matches`], which ignores case.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// Creates a validated email address.
    ///
    /// # Errors
    ///
    /// Returns [`MemberDomainError::InvalidEmail`] unless the trimmed value
    /// has exactly one `@` with non-empty text on both sides and no
    /// whitespace.
    pub fn new(value: impl Into<String>) -> Result<Self, MemberDomainError> {
        let raw = value.into();
        let normalized = raw.trim();
        let is_valid = normalized
            .split_once('@')
            .is_some_and(|(local, domain)| {
                !local.is_empty() && !domain.is_empty() && !domain.contains('@')
            })
            && !normalized.chars().any(char::is_whitespace);

        if !is_valid {
            return Err(MemberDomainError::InvalidEmail(raw));
        }
        Ok(Self(normalized.to_owned()))
    }

    /// Returns the address as entered.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Compares two addresses case-insensitively.
    #[must_use]
    pub fn matches(&self, other: &Self) -> bool {
        self.0.to_lowercase() == other.0.to_lowercase()
    }

    /// Returns the part before the `@`.
    #[must_use]
    pub fn local_part(&self) -> &str {
        self.0.split_once('@').map_or(self.as_str(), |(local, _)| local)
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
