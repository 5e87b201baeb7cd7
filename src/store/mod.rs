//! Document store collaborator for the workspace core.
//!
//! The workspace never talks to a concrete database. It consumes a
//! collection-oriented document store that supports point reads, filtered
//! listings, partial updates with a delete-field sentinel, a server-assigned
//! timestamp sentinel, atomic conditional write batches, and per-collection
//! change feeds. The module follows hexagonal architecture:
//!
//! - Value types in [`domain`]
//! - Port contract in [`ports`]
//! - Adapter implementations in [`adapters`]

pub mod adapters;
pub mod domain;
pub mod ports;

#[cfg(test)]
mod tests;
