//! Documents, collections, and revision markers.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Opaque, store-scoped document identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    /// Wraps an identifier issued by the store or an external collaborator.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the identifier as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for DocumentId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Named collections the workspace persists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    /// Member profiles keyed by external identity.
    Members,
    /// Tasks.
    Tasks,
    /// Comments; each carries the owning `taskId`.
    Comments,
    /// Teams.
    Teams,
}

impl Collection {
    /// Returns the canonical collection name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Members => "members",
            Self::Tasks => "tasks",
            Self::Comments => "comments",
            Self::Teams => "teams",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Monotonic revision stamped on a document by the commit that last wrote it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Revision(u64);

impl Revision {
    /// Creates a revision marker.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw revision number.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{}", self.0)
    }
}

/// A committed document as read from the store.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    id: DocumentId,
    revision: Revision,
    fields: Map<String, Value>,
}

impl Document {
    /// Creates a document value.
    #[must_use]
    pub const fn new(id: DocumentId, revision: Revision, fields: Map<String, Value>) -> Self {
        Self {
            id,
            revision,
            fields,
        }
    }

    /// Returns the document identifier.
    #[must_use]
    pub const fn id(&self) -> &DocumentId {
        &self.id
    }

    /// Returns the revision of the commit that last wrote this document.
    #[must_use]
    pub const fn revision(&self) -> Revision {
        self.revision
    }

    /// Returns the stored fields.
    #[must_use]
    pub const fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Returns a single field, if present.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Deserializes the document into `T`.
    ///
    /// The document identifier is exposed to `T` as an `id` field, so record
    /// types may declare it alongside their stored fields.
    ///
    /// # Errors
    ///
    /// Returns the underlying [`serde_json::Error`] when the stored fields do
    /// not match the shape of `T`.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        let mut fields = self.fields.clone();
        fields.insert("id".to_owned(), Value::String(self.id.as_str().to_owned()));
        serde_json::from_value(Value::Object(fields))
    }
}
