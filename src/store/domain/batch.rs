//! Atomic, conditional write batches.

use super::{Collection, DocumentId, Fields, Revision};

/// Condition that must hold at commit time for a batch to apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Precondition {
    /// The document must not exist.
    Absent {
        /// Collection holding the document.
        collection: Collection,
        /// Document identifier.
        id: DocumentId,
    },
    /// The document must exist and still be at the given revision.
    AtRevision {
        /// Collection holding the document.
        collection: Collection,
        /// Document identifier.
        id: DocumentId,
        /// Revision observed by the caller.
        revision: Revision,
    },
}

/// A single write inside a batch.
#[derive(Debug, Clone, PartialEq)]
pub enum Write {
    /// Creates or replaces a document.
    Set {
        /// Target collection.
        collection: Collection,
        /// Document identifier.
        id: DocumentId,
        /// Full field contents.
        fields: Fields,
    },
    /// Applies a partial update to an existing document.
    Update {
        /// Target collection.
        collection: Collection,
        /// Document identifier.
        id: DocumentId,
        /// Field writes.
        fields: Fields,
    },
    /// Deletes a document if present.
    Delete {
        /// Target collection.
        collection: Collection,
        /// Document identifier.
        id: DocumentId,
    },
}

impl Write {
    /// Returns the collection this write touches.
    #[must_use]
    pub const fn collection(&self) -> Collection {
        match self {
            Self::Set { collection, .. }
            | Self::Update { collection, .. }
            | Self::Delete { collection, .. } => *collection,
        }
    }
}

/// Writes applied atomically, all or nothing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WriteBatch {
    preconditions: Vec<Precondition>,
    writes: Vec<Write>,
}

impl WriteBatch {
    /// Creates an empty batch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requires the document to be absent at commit time.
    #[must_use]
    pub fn require_absent(mut self, collection: Collection, id: DocumentId) -> Self {
        self.preconditions
            .push(Precondition::Absent { collection, id });
        self
    }

    /// Requires the document to still be at `revision` at commit time.
    #[must_use]
    pub fn require_revision(
        mut self,
        collection: Collection,
        id: DocumentId,
        revision: Revision,
    ) -> Self {
        self.preconditions.push(Precondition::AtRevision {
            collection,
            id,
            revision,
        });
        self
    }

    /// Adds a full-document write.
    #[must_use]
    pub fn set(mut self, collection: Collection, id: DocumentId, fields: Fields) -> Self {
        self.writes.push(Write::Set {
            collection,
            id,
            fields,
        });
        self
    }

    /// Adds a partial update.
    #[must_use]
    pub fn update(mut self, collection: Collection, id: DocumentId, fields: Fields) -> Self {
        self.writes.push(Write::Update {
            collection,
            id,
            fields,
        });
        self
    }

    /// Adds a delete.
    #[must_use]
    pub fn delete(mut self, collection: Collection, id: DocumentId) -> Self {
        self.writes.push(Write::Delete { collection, id });
        self
    }

    /// Returns the preconditions.
    #[must_use]
    pub fn preconditions(&self) -> &[Precondition] {
        &self.preconditions
    }

    /// Returns the writes in application order.
    #[must_use]
    pub fn writes(&self) -> &[Write] {
        &self.writes
    }

    /// Returns `true` if the batch carries no writes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.writes.is_empty()
    }
}
