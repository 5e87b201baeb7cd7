//! Document store port with change-feed subscriptions.

use crate::store::domain::{Collection, Document, DocumentId, Fields, Query, WriteBatch};
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc;

/// Result type for document store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Collection-oriented document store.
///
/// Every successful write is delivered, in commit order, to each live
/// [`Subscription`] on the touched collection whose query matches.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Reads one document.
    ///
    /// Returns `None` when the document does not exist.
    async fn get(&self, collection: Collection, id: &DocumentId)
    -> StoreResult<Option<Document>>;

    /// Lists documents matching `query`.
    async fn list(&self, collection: Collection, query: &Query) -> StoreResult<Vec<Document>>;

    /// Creates a document under a store-assigned identifier.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidField`] when `fields` carries a delete
    /// sentinel.
    async fn create(&self, collection: Collection, fields: Fields) -> StoreResult<DocumentId>;

    /// Creates or replaces a document under a caller-supplied identifier.
    async fn set(&self, collection: Collection, id: &DocumentId, fields: Fields)
    -> StoreResult<()>;

    /// Applies a partial update to an existing document.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] when the document does not exist.
    async fn update(
        &self,
        collection: Collection,
        id: &DocumentId,
        fields: Fields,
    ) -> StoreResult<()>;

    /// Deletes a document. Deleting a missing document is not an error.
    async fn delete(&self, collection: Collection, id: &DocumentId) -> StoreResult<()>;

    /// Applies a batch atomically.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::PreconditionFailed`] when any precondition does
    /// not hold; nothing is written in that case.
    async fn commit(&self, batch: WriteBatch) -> StoreResult<()>;

    /// Subscribes to full snapshots of the documents matching `query`.
    ///
    /// The current snapshot is delivered immediately.
    async fn subscribe(&self, collection: Collection, query: Query) -> StoreResult<Subscription>;
}

/// Errors returned by document store implementations.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// The document does not exist.
    #[error("{collection}/{id} not found")]
    NotFound {
        /// Collection searched.
        collection: Collection,
        /// Missing document identifier.
        id: DocumentId,
    },

    /// A batch precondition no longer holds.
    #[error("precondition failed for {collection}/{id}")]
    PreconditionFailed {
        /// Collection of the conflicting document.
        collection: Collection,
        /// Conflicting document identifier.
        id: DocumentId,
    },

    /// A field write is not valid for the requested operation.
    #[error("invalid field write '{0}'")]
    InvalidField(String),

    /// The store could not be reached or failed internally.
    #[error("document store unavailable: {0}")]
    Unavailable(Arc<dyn std::error::Error + Send + Sync>),
}

impl StoreError {
    /// Wraps a transport or persistence failure.
    pub fn unavailable(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Unavailable(Arc::new(err))
    }
}

/// Full result set of a subscription at one commit.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    /// Collection the snapshot describes.
    pub collection: Collection,
    /// Every matching document, in query order.
    pub documents: Vec<Document>,
}

/// Live change feed for one collection query.
///
/// Teardown runs exactly once, either through [`Subscription::unsubscribe`]
/// or when the subscription is dropped.
pub struct Subscription {
    collection: Collection,
    receiver: mpsc::UnboundedReceiver<Snapshot>,
    teardown: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    /// Creates a subscription from a snapshot channel and its teardown hook.
    #[must_use]
    pub fn new(
        collection: Collection,
        receiver: mpsc::UnboundedReceiver<Snapshot>,
        teardown: impl FnOnce() + Send + 'static,
    ) -> Self {
        Self {
            collection,
            receiver,
            teardown: Some(Box::new(teardown)),
        }
    }

    /// Returns the subscribed collection.
    #[must_use]
    pub const fn collection(&self) -> Collection {
        self.collection
    }

    /// Returns the next queued snapshot without waiting.
    pub fn try_next(&mut self) -> Option<Snapshot> {
        self.receiver.try_recv().ok()
    }

    /// Waits for the next snapshot.
    ///
    /// Returns `None` once the store has closed the feed.
    pub async fn next(&mut self) -> Option<Snapshot> {
        self.receiver.recv().await
    }

    /// Cancels the subscription.
    pub fn unsubscribe(mut self) {
        self.run_teardown();
    }

    fn run_teardown(&mut self) {
        self.receiver.close();
        if let Some(teardown) = self.teardown.take() {
            teardown();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.run_teardown();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("collection", &self.collection)
            .field("active", &self.teardown.is_some())
            .finish_non_exhaustive()
    }
}
