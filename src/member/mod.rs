//! Workspace membership: profiles, roles, and the owner invariant.
//!
//! Identity creation is delegated to an external authentication provider;
//! this module manages the member *profile* keyed by the provider's
//! identifier and enforces that an active owner always exists once the
//! workspace has members.
//!
//! - Domain types and rules in [`domain`]
//! - Authentication port in [`ports`]
//! - Adapter implementations in [`adapters`]

pub mod adapters;
pub mod domain;
pub mod ports;

#[cfg(test)]
mod tests;
