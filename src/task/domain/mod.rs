//! Domain model for tasks and teams.
//!
//! The task domain keeps status transitions, completion attribution, and
//! authorization free of any storage concern.

mod capabilities;
mod error;
mod ids;
mod status;
mod task;
mod team;

pub use capabilities::{Capabilities, TaskAction, capabilities_for, ensure_can_create_tasks};
pub use error::{ParseTaskStatusError, TaskDomainError};
pub use ids::{TaskId, TeamId};
pub use status::{StatusTransition, TaskStatus};
pub use task::{Completion, NewTask, Task, TaskColor, TaskEdit};
pub use team::{Team, TeamMembership};
