//! Read-only projections over the mirrored collections.

use super::service::Workspace;
use crate::comment::domain::Comment;
use crate::member::domain::{Member, MemberId};
use crate::member::ports::IdentityProvider;
use crate::store::ports::DocumentStore;
use crate::task::domain::{Capabilities, Task, TaskId, TaskStatus, Team, capabilities_for};
use mockable::Clock;
use std::cmp::Reverse;

/// Task counts for the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DashboardSummary {
    /// All mirrored tasks.
    pub total: usize,
    /// Tasks in `To Do`.
    pub to_do: usize,
    /// Tasks in `In Progress`.
    pub in_progress: usize,
    /// Tasks in `Blocked`.
    pub blocked: usize,
    /// Tasks in `Done`.
    pub done: usize,
}

impl DashboardSummary {
    fn tally<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> Self {
        tasks.into_iter().fold(Self::default(), |mut summary, task| {
            summary.total += 1;
            match task.status() {
                TaskStatus::ToDo => summary.to_do += 1,
                TaskStatus::InProgress => summary.in_progress += 1,
                TaskStatus::Blocked => summary.blocked += 1,
                TaskStatus::Done => summary.done += 1,
            }
            summary
        })
    }

    /// Returns the count for one status.
    #[must_use]
    pub const fn count(&self, status: TaskStatus) -> usize {
        match status {
            TaskStatus::ToDo => self.to_do,
            TaskStatus::InProgress => self.in_progress,
            TaskStatus::Blocked => self.blocked,
            TaskStatus::Done => self.done,
        }
    }
}

impl<S, I, C> Workspace<S, I, C>
where
    S: DocumentStore,
    I: IdentityProvider,
    C: Clock + Send + Sync,
{
    /// Returns the signed-in member's profile.
    #[must_use]
    pub fn current_member(&self) -> Option<&Member> {
        self.current_member_id().and_then(|id| self.member(id))
    }

    /// Returns a member by id, including soft-deleted members.
    #[must_use]
    pub fn member(&self, id: &MemberId) -> Option<&Member> {
        self.mirror.member(id).map(|member| &member.value)
    }

    /// Returns active members sorted by name.
    #[must_use]
    pub fn active_members(&self) -> Vec<&Member> {
        let mut members: Vec<&Member> = self.mirror.roster().active_members().collect();
        members.sort_by_cached_key(|member| (member.name().to_lowercase(), member.id().clone()));
        members
    }

    /// Returns every mirrored task, earliest due date first.
    #[must_use]
    pub fn tasks(&self) -> Vec<&Task> {
        self.mirror.tasks().collect()
    }

    /// Returns a task by id.
    #[must_use]
    pub fn task(&self, id: &TaskId) -> Option<&Task> {
        self.mirror.task(id).map(|task| &task.value)
    }

    /// Returns every mirrored team.
    #[must_use]
    pub fn teams(&self) -> &[Team] {
        self.mirror.teams()
    }

    /// Returns the open task's comments, oldest first.
    #[must_use]
    pub fn comments(&self) -> Vec<&Comment> {
        self.mirror.comments().collect()
    }

    /// Returns open tasks assigned to the signed-in member.
    #[must_use]
    pub fn my_tasks(&self) -> Vec<&Task> {
        let Some(me) = self.current_member_id() else {
            return Vec::new();
        };
        self.mirror
            .tasks()
            .filter(|task| task.is_assigned(me) && !task.status().is_done())
            .collect()
    }

    /// Returns completed tasks, most recently completed first.
    #[must_use]
    pub fn completed_tasks(&self) -> Vec<&Task> {
        let mut done: Vec<&Task> = self
            .mirror
            .tasks()
            .filter(|task| task.status().is_done())
            .collect();
        done.sort_by_key(|task| Reverse(task.completion().map(|c| c.completed_at)));
        done
    }

    /// Returns per-status task counts.
    #[must_use]
    pub fn dashboard(&self) -> DashboardSummary {
        DashboardSummary::tally(self.mirror.tasks())
    }

    /// Returns what the signed-in member may do with a task.
    #[must_use]
    pub fn capabilities(&self, task_id: &TaskId) -> Option<Capabilities> {
        let member = self.current_member()?;
        let task = self.task(task_id)?;
        Some(capabilities_for(member, task))
    }
}
