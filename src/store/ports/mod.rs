//! Port contract for the document store.
//!
//! The workspace coordinator depends only on this interface.

pub mod document_store;

pub use document_store::{DocumentStore, Snapshot, StoreError, StoreResult, Subscription};
