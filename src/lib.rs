//! Taskboard: collaborative task tracking core.
//!
//! This crate holds the rules of a small team workspace: member roles and
//! the owner invariant, the task status lifecycle, and comment reactions,
//! plus a coordinator that mirrors a live document store.
//!
//! # Architecture
//!
//! Taskboard follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business rules with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for the document store and the
//!   identity provider
//! - **Adapters**: In-memory implementations of the ports
//!
//! # Modules
//!
//! - [`store`]: Document store contract, queries, and atomic write batches
//! - [`member`]: Member profiles, roles, and authentication
//! - [`task`]: Tasks, status transitions, teams, and capabilities
//! - [`comment`]: Comments and single-choice emoji reactions
//! - [`workspace`]: The coordinator, its configuration, and error taxonomy

pub mod comment;
pub mod member;
pub mod store;
pub mod task;
pub mod workspace;
