//! Task aggregate root and related lifecycle types.

use super::{StatusTransition, TaskDomainError, TaskId, TaskStatus, TeamId};
use crate::member::domain::MemberId;
use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Cosmetic colour tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TaskColor {
    /// Neutral default.
    #[default]
    Gray,
    /// Red.
    Red,
    /// Orange.
    Orange,
    /// Amber.
    Amber,
    /// Green.
    Green,
    /// Blue.
    Blue,
    /// Purple.
    Purple,
}

impl TaskColor {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Gray => "Gray",
            Self::Red => "Red",
            Self::Orange => "Orange",
            Self::Amber => "Amber",
            Self::Green => "Green",
            Self::Blue => "Blue",
            Self::Purple => "Purple",
        }
    }
}

/// Who moved a task into `Done`, and when.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    /// Member who completed the task.
    pub completed_by: MemberId,
    /// Completion time.
    pub completed_at: DateTime<Utc>,
}

/// Task aggregate root.
///
/// Completion attribution is present exactly when the status is `Done`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "TaskRecord", into = "TaskRecord")]
pub struct Task {
    id: TaskId,
    team_id: Option<TeamId>,
    title: String,
    description: String,
    assigned_to_ids: Vec<MemberId>,
    status: TaskStatus,
    due_date: NaiveDate,
    color: TaskColor,
    completion: Option<Completion>,
}

/// Stored shape of a task document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TaskRecord {
    id: TaskId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    team_id: Option<String>,
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    assigned_to_ids: Vec<MemberId>,
    status: TaskStatus,
    due_date: NaiveDate,
    #[serde(default)]
    color: TaskColor,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    completed_by_id: Option<MemberId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    completed_at: Option<DateTime<Utc>>,
}

impl From<TaskRecord> for Task {
    fn from(record: TaskRecord) -> Self {
        let completion = match (record.status, record.completed_by_id, record.completed_at) {
            (TaskStatus::Done, Some(completed_by), Some(completed_at)) => Some(Completion {
                completed_by,
                completed_at,
            }),
            _ => None,
        };
        Self {
            id: record.id,
            team_id: record.team_id.filter(|id| !id.is_empty()).map(TeamId::new),
            title: record.title,
            description: record.description,
            assigned_to_ids: dedup_preserving_order(record.assigned_to_ids),
            status: record.status,
            due_date: record.due_date,
            color: record.color,
            completion,
        }
    }
}

impl From<Task> for TaskRecord {
    fn from(task: Task) -> Self {
        let (completed_by_id, completed_at) = task
            .completion
            .map(|completion| (completion.completed_by, completion.completed_at))
            .unzip();
        Self {
            id: task.id,
            team_id: task.team_id.map(|id| id.as_str().to_owned()),
            title: task.title,
            description: task.description,
            assigned_to_ids: task.assigned_to_ids,
            status: task.status,
            due_date: task.due_date,
            color: task.color,
            completed_by_id,
            completed_at,
        }
    }
}

impl Task {
    /// Creates a `ToDo` task from a validated request.
    #[must_use]
    pub fn new(id: TaskId, request: NewTask) -> Self {
        Self {
            id,
            team_id: request.team_id,
            title: request.title,
            description: request.description,
            assigned_to_ids: request.assigned_to_ids,
            status: TaskStatus::ToDo,
            due_date: request.due_date,
            color: request.color,
            completion: None,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> &TaskId {
        &self.id
    }

    /// Returns the owning team, if any.
    #[must_use]
    pub const fn team_id(&self) -> Option<&TeamId> {
        self.team_id.as_ref()
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the rich-text description blob.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the assignees in insertion order.
    #[must_use]
    pub fn assigned_to_ids(&self) -> &[MemberId] {
        &self.assigned_to_ids
    }

    /// Returns whether `member` is among the assignees.
    #[must_use]
    pub fn is_assigned(&self, member: &MemberId) -> bool {
        self.assigned_to_ids.contains(member)
    }

    /// Returns the current status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the due date.
    #[must_use]
    pub const fn due_date(&self) -> NaiveDate {
        self.due_date
    }

    /// Returns the colour tag.
    #[must_use]
    pub const fn color(&self) -> TaskColor {
        self.color
    }

    /// Returns the completion record while the task is `Done`.
    #[must_use]
    pub const fn completion(&self) -> Option<&Completion> {
        self.completion.as_ref()
    }

    /// Moves the task to `new_status`, maintaining completion attribution.
    ///
    /// Authorization is the caller's concern; see
    /// [`super::capabilities_for`].
    pub fn change_status(
        &mut self,
        actor: &MemberId,
        new_status: TaskStatus,
        clock: &impl Clock,
    ) -> StatusTransition {
        let transition = StatusTransition::between(self.status, new_status);
        match transition {
            StatusTransition::EnterDone => {
                self.completion = Some(Completion {
                    completed_by: actor.clone(),
                    completed_at: clock.utc(),
                });
            }
            StatusTransition::LeaveDone => self.completion = None,
            StatusTransition::Unchanged => {}
        }
        self.status = new_status;
        transition
    }

    /// Applies a validated edit of the non-status fields.
    pub fn apply_edit(&mut self, edit: &TaskEdit) {
        if let Some(title) = &edit.title {
            self.title.clone_from(title);
        }
        if let Some(description) = &edit.description {
            self.description.clone_from(description);
        }
        if let Some(assignees) = &edit.assigned_to_ids {
            self.assigned_to_ids.clone_from(assignees);
        }
        if let Some(due_date) = edit.due_date {
            self.due_date = due_date;
        }
        if let Some(color) = edit.color {
            self.color = color;
        }
        if let Some(team_id) = &edit.team_id {
            self.team_id.clone_from(team_id);
        }
    }
}

/// Request to create a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    title: String,
    description: String,
    assigned_to_ids: Vec<MemberId>,
    due_date: NaiveDate,
    color: TaskColor,
    team_id: Option<TeamId>,
}

impl NewTask {
    /// Creates a validated task request.
    ///
    /// Duplicate assignees are collapsed, keeping first insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] for a blank title or
    /// [`TaskDomainError::NoAssignees`] when no assignee is given.
    pub fn new(
        title: impl Into<String>,
        assigned_to_ids: impl IntoIterator<Item = MemberId>,
        due_date: NaiveDate,
    ) -> Result<Self, TaskDomainError> {
        Ok(Self {
            title: validate_title(title.into())?,
            description: String::new(),
            assigned_to_ids: validate_assignees(assigned_to_ids)?,
            due_date,
            color: TaskColor::default(),
            team_id: None,
        })
    }

    /// Sets the rich-text description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the colour tag.
    #[must_use]
    pub const fn with_color(mut self, color: TaskColor) -> Self {
        self.color = color;
        self
    }

    /// Places the task in a team.
    #[must_use]
    pub fn with_team(mut self, team_id: TeamId) -> Self {
        self.team_id = Some(team_id);
        self
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the assignees.
    #[must_use]
    pub fn assigned_to_ids(&self) -> &[MemberId] {
        &self.assigned_to_ids
    }

    /// Returns the owning team, if any.
    #[must_use]
    pub const fn team_id(&self) -> Option<&TeamId> {
        self.team_id.as_ref()
    }

    /// Checks the title against a length limit.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::TitleTooLong`] when the limit is exceeded.
    pub fn ensure_title_within(&self, max: usize) -> Result<(), TaskDomainError> {
        ensure_length(&self.title, max)
    }
}

/// Edit of a task's non-status fields. Unset fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskEdit {
    title: Option<String>,
    description: Option<String>,
    assigned_to_ids: Option<Vec<MemberId>>,
    due_date: Option<NaiveDate>,
    color: Option<TaskColor>,
    team_id: Option<Option<TeamId>>,
}

impl TaskEdit {
    /// Creates an empty edit.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Changes the title.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] for a blank title.
    pub fn with_title(mut self, title: impl Into<String>) -> Result<Self, TaskDomainError> {
        self.title = Some(validate_title(title.into())?);
        Ok(self)
    }

    /// Changes the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Replaces the assignees.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::NoAssignees`] for an empty list.
    pub fn with_assignees(
        mut self,
        assigned_to_ids: impl IntoIterator<Item = MemberId>,
    ) -> Result<Self, TaskDomainError> {
        self.assigned_to_ids = Some(validate_assignees(assigned_to_ids)?);
        Ok(self)
    }

    /// Changes the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Changes the colour tag.
    #[must_use]
    pub const fn with_color(mut self, color: TaskColor) -> Self {
        self.color = Some(color);
        self
    }

    /// Moves the task into a team, or out of any team with `None`.
    #[must_use]
    pub fn with_team(mut self, team_id: Option<TeamId>) -> Self {
        self.team_id = Some(team_id);
        self
    }

    /// Returns the new title, if changed.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Returns the new description, if changed.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the new assignees, if changed.
    #[must_use]
    pub fn assigned_to_ids(&self) -> Option<&[MemberId]> {
        self.assigned_to_ids.as_deref()
    }

    /// Returns the new due date, if changed.
    #[must_use]
    pub const fn due_date(&self) -> Option<NaiveDate> {
        self.due_date
    }

    /// Returns the new colour, if changed.
    #[must_use]
    pub const fn color(&self) -> Option<TaskColor> {
        self.color
    }

    /// Returns the new team placement, if changed.
    #[must_use]
    pub const fn team_id(&self) -> Option<&Option<TeamId>> {
        self.team_id.as_ref()
    }

    /// Returns `true` when nothing would change.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.assigned_to_ids.is_none()
            && self.due_date.is_none()
            && self.color.is_none()
            && self.team_id.is_none()
    }

    /// Checks a changed title against a length limit.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::TitleTooLong`] when the limit is exceeded.
    pub fn ensure_title_within(&self, max: usize) -> Result<(), TaskDomainError> {
        self.title
            .as_deref()
            .map_or(Ok(()), |title| ensure_length(title, max))
    }
}

fn validate_title(title: String) -> Result<String, TaskDomainError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(TaskDomainError::EmptyTitle);
    }
    Ok(trimmed.to_owned())
}

fn validate_assignees(
    assigned_to_ids: impl IntoIterator<Item = MemberId>,
) -> Result<Vec<MemberId>, TaskDomainError> {
    let assignees = dedup_preserving_order(assigned_to_ids);
    if assignees.is_empty() {
        return Err(TaskDomainError::NoAssignees);
    }
    Ok(assignees)
}

fn dedup_preserving_order(ids: impl IntoIterator<Item = MemberId>) -> Vec<MemberId> {
    let mut unique: Vec<MemberId> = Vec::new();
    for id in ids {
        if !unique.contains(&id) {
            unique.push(id);
        }
    }
    unique
}

fn ensure_length(title: &str, max: usize) -> Result<(), TaskDomainError> {
    if title.chars().count() > max {
        return Err(TaskDomainError::TitleTooLong { max });
    }
    Ok(())
}
