//! Identifier and validated scalar types for the comment domain.

use super::CommentDomainError;
use crate::store::domain::DocumentId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Store-assigned comment identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommentId(String);

impl CommentId {
    /// Wraps a store-assigned identifier.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the identifier as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the store key of the comment document.
    #[must_use]
    pub fn document_id(&self) -> DocumentId {
        DocumentId::new(self.0.clone())
    }
}

impl From<DocumentId> for CommentId {
    fn from(id: DocumentId) -> Self {
        Self(id.as_str().to_owned())
    }
}

impl fmt::Display for CommentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Reaction key; any non-blank string, typically a single emoji.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Emoji(String);

impl Emoji {
    /// Creates a validated reaction key.
    ///
    /// # Errors
    ///
    /// Returns [`CommentDomainError::EmptyEmoji`] for a blank value.
    pub fn new(value: impl Into<String>) -> Result<Self, CommentDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(CommentDomainError::EmptyEmoji);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the emoji as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Emoji {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
