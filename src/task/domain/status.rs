//! Task status and completion transitions.

use super::ParseTaskStatusError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task status. Any status may follow any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskStatus {
    /// Not started.
    #[serde(rename = "To Do")]
    ToDo,
    /// Being worked on.
    #[serde(rename = "In Progress")]
    InProgress,
    /// Waiting on something outside the assignees' control.
    Blocked,
    /// Finished.
    Done,
}

impl TaskStatus {
    /// Every status, in display order.
    pub const ALL: [Self; 4] = [Self::ToDo, Self::InProgress, Self::Blocked, Self::Done];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ToDo => "To Do",
            Self::InProgress => "In Progress",
            Self::Blocked => "Blocked",
            Self::Done => "Done",
        }
    }

    /// Returns `true` for [`TaskStatus::Done`].
    #[must_use]
    pub const fn is_done(self) -> bool {
        matches!(self, Self::Done)
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized: String = value
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match normalized.as_str() {
            "todo" => Ok(Self::ToDo),
            "inprogress" => Ok(Self::InProgress),
            "blocked" => Ok(Self::Blocked),
            "done" => Ok(Self::Done),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Effect of a status change on completion attribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTransition {
    /// The task became `Done`; completion must be recorded.
    EnterDone,
    /// The task left `Done`; completion must be cleared.
    LeaveDone,
    /// Completion fields stay as they are, including `Done` to `Done`.
    Unchanged,
}

impl StatusTransition {
    /// Classifies a change from `old` to `new`.
    #[must_use]
    pub const fn between(old: TaskStatus, new: TaskStatus) -> Self {
        match (old.is_done(), new.is_done()) {
            (false, true) => Self::EnterDone,
            (true, false) => Self::LeaveDone,
            _ => Self::Unchanged,
        }
    }
}
