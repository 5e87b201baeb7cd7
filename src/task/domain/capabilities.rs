//! Centralized authorization for task actions.
//!
//! Every role and assignment check for tasks and their comments goes through
//! [`capabilities_for`], evaluated once per action.

use super::{Task, TaskDomainError};
use crate::member::domain::{Member, MemberId};
use std::fmt;

/// Action a member attempts on a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskAction {
    /// Create a new task.
    Create,
    /// Edit title, description, assignees, due date, colour, or team.
    Edit,
    /// Change the status.
    ChangeStatus,
    /// Add a comment.
    Comment,
    /// Delete the task.
    Delete,
}

impl fmt::Display for TaskAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Create => "create",
            Self::Edit => "edit",
            Self::ChangeStatus => "change the status of",
            Self::Comment => "comment on",
            Self::Delete => "delete",
        })
    }
}

/// What one member may do to one task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Capabilities {
    /// May edit the non-status fields.
    pub can_edit_task: bool,
    /// May change the status.
    pub can_change_status: bool,
    /// May add comments.
    pub can_comment: bool,
    /// May delete the task.
    pub can_delete: bool,
}

impl Capabilities {
    /// Returns whether `action` is permitted.
    #[must_use]
    pub const fn allows(self, action: TaskAction) -> bool {
        match action {
            TaskAction::Create | TaskAction::Edit => self.can_edit_task,
            TaskAction::ChangeStatus => self.can_change_status,
            TaskAction::Comment => self.can_comment,
            TaskAction::Delete => self.can_delete,
        }
    }

    /// Fails unless `action` is permitted.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::NotAuthorized`] naming `member` and
    /// `action`.
    pub fn require(self, member: &MemberId, action: TaskAction) -> Result<(), TaskDomainError> {
        if self.allows(action) {
            return Ok(());
        }
        Err(TaskDomainError::NotAuthorized {
            member: member.clone(),
            action,
        })
    }
}

/// Resolves what `member` may do to `task`.
///
/// Owners may do everything. Assignees may change the status and comment.
/// Everyone else, and every soft-deleted member, may do nothing.
#[must_use]
pub fn capabilities_for(member: &Member, task: &Task) -> Capabilities {
    if member.is_deleted() {
        return Capabilities::default();
    }
    let is_owner = member.role().is_owner();
    let is_assignee = task.is_assigned(member.id());
    Capabilities {
        can_edit_task: is_owner,
        can_change_status: is_owner || is_assignee,
        can_comment: is_owner || is_assignee,
        can_delete: is_owner,
    }
}

/// Fails unless `member` may create tasks, which only active owners may.
///
/// # Errors
///
/// Returns [`TaskDomainError::NotAuthorized`] for any other member.
pub fn ensure_can_create_tasks(member: &Member) -> Result<(), TaskDomainError> {
    if member.is_active_owner() {
        return Ok(());
    }
    Err(TaskDomainError::NotAuthorized {
        member: member.id().clone(),
        action: TaskAction::Create,
    })
}
