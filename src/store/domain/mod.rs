//! Value types shared by every document store implementation.

mod batch;
mod document;
mod fields;
mod query;

pub use batch::{Precondition, Write, WriteBatch};
pub use document::{Collection, Document, DocumentId, Revision};
pub use fields::{FieldValue, Fields};
pub use query::{Direction, Filter, OrderBy, Query};
