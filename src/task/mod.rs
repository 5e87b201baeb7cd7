//! Task lifecycle management.
//!
//! Tasks move freely between four statuses; entering `Done` records who
//! completed the task and when, and leaving `Done` clears that record. Who
//! may edit, progress, discuss, or delete a task is decided in one place,
//! [`domain::capabilities_for`].
//!
//! Persistence and orchestration live in the workspace coordinator; this
//! module holds the pure domain model in [`domain`].

pub mod domain;

#[cfg(test)]
mod tests;
