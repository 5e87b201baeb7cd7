//! Conversions between domain records and store field writes.

use crate::comment::domain::{NewComment, Reactions};
use crate::member::domain::{Member, MemberId, Role};
use crate::store::domain::Fields;
use crate::task::domain::{NewTask, Task, TaskEdit, TaskId, TeamId};
use chrono::SecondsFormat;
use serde_json::{Map, Value};

/// Full member profile for a `set` write.
pub(crate) fn member_fields(member: &Member) -> Result<Fields, serde_json::Error> {
    Fields::from_record(member)
}

pub(crate) fn role_fields(role: Role) -> Result<Fields, serde_json::Error> {
    Ok(Fields::new().set("role", serde_json::to_value(role)?))
}

pub(crate) fn deleted_fields(is_deleted: bool) -> Fields {
    Fields::new().set("isDeleted", is_deleted)
}

/// Editable profile fields of `member`; role and deletion are untouched.
pub(crate) fn profile_fields(member: &Member) -> Fields {
    Fields::new()
        .set("name", member.name())
        .set("email", member.email().as_str())
        .set("avatarUrl", member.avatar_url())
}

/// Fields of a freshly created `ToDo` task.
pub(crate) fn new_task_fields(request: &NewTask) -> Result<Fields, serde_json::Error> {
    let draft = Task::new(TaskId::new(String::new()), request.clone());
    Fields::from_record(&draft)
}

/// Status write for an already transitioned `task`.
///
/// Completion fields are written when the task is `Done` and deleted
/// otherwise, so the stored document never keeps a stale completion.
pub(crate) fn status_fields(task: &Task) -> Result<Fields, serde_json::Error> {
    let fields = Fields::new().set("status", serde_json::to_value(task.status())?);
    Ok(match task.completion() {
        Some(completion) => fields
            .set("completedById", completion.completed_by.as_str())
            .set(
                "completedAt",
                completion
                    .completed_at
                    .to_rfc3339_opts(SecondsFormat::Nanos, true),
            ),
        None => fields.delete("completedById").delete("completedAt"),
    })
}

/// Partial write containing only the fields `edit` changes.
pub(crate) fn edit_fields(edit: &TaskEdit) -> Result<Fields, serde_json::Error> {
    let mut fields = Fields::new();
    if let Some(title) = edit.title() {
        fields = fields.set("title", title);
    }
    if let Some(description) = edit.description() {
        fields = fields.set("description", description);
    }
    if let Some(assignees) = edit.assigned_to_ids() {
        fields = fields.set("assignedToIds", serde_json::to_value(assignees)?);
    }
    if let Some(due_date) = edit.due_date() {
        fields = fields.set("dueDate", serde_json::to_value(due_date)?);
    }
    if let Some(color) = edit.color() {
        fields = fields.set("color", serde_json::to_value(color)?);
    }
    if let Some(team_id) = edit.team_id() {
        fields = fields.set_or_delete("teamId", team_id.as_ref().map(TeamId::as_str));
    }
    Ok(fields)
}

/// Fields of a new comment; the timestamp is assigned by the store.
pub(crate) fn new_comment_fields(author: &MemberId, request: &NewComment) -> Fields {
    Fields::new()
        .set("taskId", request.task_id().as_str())
        .set("authorId", author.as_str())
        .set("text", request.text())
        .server_timestamp("timestamp")
        .set("reactions", Value::Object(Map::new()))
}

/// Whole-map overwrite of a comment's reactions.
pub(crate) fn reaction_fields(reactions: &Reactions) -> Result<Fields, serde_json::Error> {
    Ok(Fields::new().set("reactions", serde_json::to_value(reactions)?))
}
