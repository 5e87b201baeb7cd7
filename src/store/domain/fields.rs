//! Field-level write instructions.

use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// A single field write.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Stores the given JSON value.
    Set(Value),
    /// Removes the field from the document.
    Delete,
    /// Stores the store's own commit time as an RFC 3339 string.
    ServerTimestamp,
}

/// Ordered set of field writes used by create, set, and update operations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fields(BTreeMap<String, FieldValue>);

impl Fields {
    /// Creates an empty field set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a plain value write.
    #[must_use]
    pub fn set(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(name.into(), FieldValue::Set(value.into()));
        self
    }

    /// Adds a value write when `value` is present, or a delete otherwise.
    #[must_use]
    pub fn set_or_delete(self, name: impl Into<String>, value: Option<impl Into<Value>>) -> Self {
        match value {
            Some(present) => self.set(name, present),
            None => self.delete(name),
        }
    }

    /// Adds a delete-field sentinel.
    #[must_use]
    pub fn delete(mut self, name: impl Into<String>) -> Self {
        self.0.insert(name.into(), FieldValue::Delete);
        self
    }

    /// Adds a server-timestamp sentinel.
    #[must_use]
    pub fn server_timestamp(mut self, name: impl Into<String>) -> Self {
        self.0.insert(name.into(), FieldValue::ServerTimestamp);
        self
    }

    /// Builds field writes from every top-level field of a serializable
    /// record. `id` is skipped because identifiers live outside the fields.
    ///
    /// # Errors
    ///
    /// Returns [`serde_json::Error`] when `record` does not serialize to a
    /// JSON object.
    pub fn from_record(record: &impl Serialize) -> Result<Self, serde_json::Error> {
        let Value::Object(map) = serde_json::to_value(record)? else {
            return Err(serde::ser::Error::custom("record must serialize to an object"));
        };
        Ok(Self(
            map.into_iter()
                .filter(|(name, _)| name != "id")
                .map(|(name, value)| (name, FieldValue::Set(value)))
                .collect(),
        ))
    }

    /// Merges another set of writes into this one; later writes win.
    #[must_use]
    pub fn merge(mut self, other: Self) -> Self {
        self.0.extend(other.0);
        self
    }

    /// Returns `true` if no writes are recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the write recorded for `name`, if any.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.0.get(name)
    }

    /// Iterates over the recorded writes in field-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.0.iter().map(|(name, value)| (name.as_str(), value))
    }
}
