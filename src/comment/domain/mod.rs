//! Domain model for comments and reactions.

mod comment;
mod error;
mod ids;
mod reactions;

pub use comment::{Comment, NewComment};
pub use error::CommentDomainError;
pub use ids::{CommentId, Emoji};
pub use reactions::{ReactionChange, Reactions};
