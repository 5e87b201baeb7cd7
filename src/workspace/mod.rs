//! Workspace coordinator.
//!
//! Bridges the member, task, and comment rules to the document store's
//! change feeds:
//!
//! - [`Workspace`] owns the session, the subscriptions, and every
//!   state-changing operation
//! - [`WorkspaceConfig`] carries limits and defaults
//! - [`WorkspaceError`] and [`ErrorKind`] classify failures
//! - [`DashboardSummary`] and the read views project the mirrored state

mod codec;
mod config;
mod error;
mod mirror;
mod service;
mod views;

pub use config::WorkspaceConfig;
pub use error::{EntityKind, ErrorKind, MemberAction, WorkspaceError, WorkspaceResult};
pub use service::Workspace;
pub use views::DashboardSummary;

#[cfg(test)]
mod tests;
