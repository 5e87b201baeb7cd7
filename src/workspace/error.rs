//! Workspace error taxonomy.

use crate::comment::domain::CommentDomainError;
use crate::member::domain::{MemberDomainError, MemberId};
use crate::member::ports::IdentityError;
use crate::store::ports::StoreError;
use crate::task::domain::TaskDomainError;
use std::fmt;
use thiserror::Error;

/// Membership administration action a member attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberAction {
    /// Create a login and profile for someone else.
    Provision,
    /// Change a member's role.
    ChangeRole,
    /// Soft-delete a member.
    Remove,
    /// Reactivate a soft-deleted member.
    Restore,
    /// Edit a member's name, email, or avatar.
    EditProfile,
}

impl fmt::Display for MemberAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Provision => "provision",
            Self::ChangeRole => "change the role of",
            Self::Remove => "remove",
            Self::Restore => "restore",
            Self::EditProfile => "edit the profile of",
        })
    }
}

/// Kind of entity a lookup failed to find.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// A member profile.
    Member,
    /// A task.
    Task,
    /// A comment.
    Comment,
    /// A team.
    Team,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Member => "member",
            Self::Task => "task",
            Self::Comment => "comment",
            Self::Team => "team",
        })
    }
}

/// Coarse classification of a [`WorkspaceError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed input.
    Validation,
    /// Role or assignment check failed.
    NotAuthorized,
    /// The change would leave no active owner.
    LastOwnerViolation,
    /// A soft-deleted identity attempted to act.
    AccountDeactivated,
    /// A referenced entity is missing.
    NotFound,
    /// An external collaborator failed.
    Store,
    /// No member is signed in.
    NotSignedIn,
}

/// Errors returned by [`super::Workspace`] operations.
///
/// Rule violations are raised before any store write is issued.
#[derive(Debug, Error)]
pub enum WorkspaceError {
    /// Member rule violation.
    #[error(transparent)]
    Member(#[from] MemberDomainError),

    /// Task rule violation.
    #[error(transparent)]
    Task(#[from] TaskDomainError),

    /// Comment rule violation.
    #[error(transparent)]
    Comment(#[from] CommentDomainError),

    /// The acting member may not administer the target member.
    #[error("member {member} may not {action} members")]
    NotAuthorized {
        /// Acting member.
        member: MemberId,
        /// Attempted action.
        action: MemberAction,
    },

    /// The acting member may not remove themselves.
    #[error("member {0} cannot remove themselves")]
    SelfRemoval(MemberId),

    /// A referenced entity does not exist.
    #[error("{entity} {id} not found")]
    NotFound {
        /// Kind of entity looked up.
        entity: EntityKind,
        /// Identifier looked up.
        id: String,
    },

    /// The operation requires a signed-in member.
    #[error("no member is signed in")]
    NotSignedIn,

    /// The document store failed or rejected a write.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The identity provider failed or rejected a request.
    #[error(transparent)]
    Identity(#[from] IdentityError),

    /// A record could not be converted to or from its stored form.
    #[error("record encoding failed: {0}")]
    Codec(#[from] serde_json::Error),
}

impl WorkspaceError {
    pub(crate) fn not_found(entity: EntityKind, id: impl fmt::Display) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// Classifies the error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Member(err) => match err {
                MemberDomainError::EmptyName
                | MemberDomainError::InvalidEmail(_)
                | MemberDomainError::DuplicateEmail(_) => ErrorKind::Validation,
                MemberDomainError::LastOwnerViolation(_) => ErrorKind::LastOwnerViolation,
                MemberDomainError::AccountDeactivated(_) => ErrorKind::AccountDeactivated,
            },
            Self::Task(err) => match err {
                TaskDomainError::NotAuthorized { .. } => ErrorKind::NotAuthorized,
                TaskDomainError::EmptyTitle
                | TaskDomainError::TitleTooLong { .. }
                | TaskDomainError::NoAssignees
                | TaskDomainError::UnassignableMember(_) => ErrorKind::Validation,
            },
            Self::Comment(_) => ErrorKind::Validation,
            Self::NotAuthorized { .. } | Self::SelfRemoval(_) => ErrorKind::NotAuthorized,
            Self::NotFound { .. } | Self::Store(StoreError::NotFound { .. }) => {
                ErrorKind::NotFound
            }
            Self::NotSignedIn => ErrorKind::NotSignedIn,
            Self::Identity(err) => match err {
                IdentityError::InvalidCredentials => ErrorKind::NotAuthorized,
                IdentityError::EmailInUse(_) | IdentityError::WeakPassword => {
                    ErrorKind::Validation
                }
                IdentityError::SessionClosed | IdentityError::Unavailable(_) => ErrorKind::Store,
            },
            Self::Store(_) | Self::Codec(_) => ErrorKind::Store,
        }
    }
}

/// Result type for workspace operations.
pub type WorkspaceResult<T> = Result<T, WorkspaceError>;
