//! Error types for comment validation.

use thiserror::Error;

/// Errors returned while constructing comment values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CommentDomainError {
    /// The comment text is empty after trimming.
    #[error("comment text must not be empty")]
    EmptyText,

    /// The comment text exceeds the configured limit.
    #[error("comment text exceeds {max} characters")]
    TextTooLong {
        /// Configured maximum length in characters.
        max: usize,
    },

    /// The reaction emoji is empty after trimming.
    #[error("reaction emoji must not be empty")]
    EmptyEmoji,
}
