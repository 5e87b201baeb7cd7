//! Error types for task domain validation and authorization.

use super::TaskAction;
use crate::member::domain::MemberId;
use thiserror::Error;

/// Errors returned while validating or authorizing task changes.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The task title exceeds the configured limit.
    #[error("task title exceeds {max} characters")]
    TitleTooLong {
        /// Configured maximum length in characters.
        max: usize,
    },

    /// The task would have no assignees.
    #[error("a task must be assigned to at least one member")]
    NoAssignees,

    /// An assignee is unknown or has been soft-deleted.
    #[error("member {0} cannot be assigned")]
    UnassignableMember(MemberId),

    /// The member's role and assignment do not permit the action.
    #[error("member {member} may not {action} this task")]
    NotAuthorized {
        /// Acting member.
        member: MemberId,
        /// Attempted action.
        action: TaskAction,
    },
}

/// Error returned while parsing task statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);
