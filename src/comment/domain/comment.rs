//! Comment record.

use super::{CommentDomainError, CommentId, Reactions};
use crate::member::domain::MemberId;
use crate::task::domain::TaskId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Comment on a task as persisted in the `comments` collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    id: CommentId,
    task_id: TaskId,
    author_id: MemberId,
    text: String,
    timestamp: DateTime<Utc>,
    #[serde(default)]
    reactions: Reactions,
}

impl Comment {
    /// Returns the comment identifier.
    #[must_use]
    pub const fn id(&self) -> &CommentId {
        &self.id
    }

    /// Returns the owning task.
    #[must_use]
    pub const fn task_id(&self) -> &TaskId {
        &self.task_id
    }

    /// Returns the author.
    #[must_use]
    pub const fn author_id(&self) -> &MemberId {
        &self.author_id
    }

    /// Returns the rich-text body.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the server-assigned creation time.
    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Returns the current reactions.
    #[must_use]
    pub const fn reactions(&self) -> &Reactions {
        &self.reactions
    }
}

/// Validated request to add a comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    task_id: TaskId,
    text: String,
}

impl NewComment {
    /// Creates a comment request with trimmed text.
    ///
    /// # Errors
    ///
    /// Returns [`CommentDomainError::EmptyText`] for blank text or
    /// [`CommentDomainError::TextTooLong`] beyond `max_length` characters.
    pub fn new(
        task_id: TaskId,
        text: impl Into<String>,
        max_length: usize,
    ) -> Result<Self, CommentDomainError> {
        let raw = text.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(CommentDomainError::EmptyText);
        }
        if trimmed.chars().count() > max_length {
            return Err(CommentDomainError::TextTooLong { max: max_length });
        }
        Ok(Self {
            task_id,
            text: trimmed.to_owned(),
        })
    }

    /// Returns the owning task.
    #[must_use]
    pub const fn task_id(&self) -> &TaskId {
        &self.task_id
    }

    /// Returns the trimmed text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}
