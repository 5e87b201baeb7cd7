//! Listing and subscription filters.

use super::Document;
use serde_json::Value;
use std::cmp::Ordering;

/// A single filter clause.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// The field equals the given value.
    Eq(String, Value),
    /// The field is an array containing the given value.
    ArrayContains(String, Value),
}

impl Filter {
    /// Creates an equality filter.
    #[must_use]
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Eq(field.into(), value.into())
    }

    /// Creates an array-membership filter.
    #[must_use]
    pub fn array_contains(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::ArrayContains(field.into(), value.into())
    }

    /// Returns whether the document satisfies this clause.
    #[must_use]
    pub fn matches(&self, document: &Document) -> bool {
        match self {
            Self::Eq(field, expected) => document.field(field) == Some(expected),
            Self::ArrayContains(field, expected) => document
                .field(field)
                .and_then(Value::as_array)
                .is_some_and(|items| items.contains(expected)),
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Smallest first.
    #[default]
    Ascending,
    /// Largest first.
    Descending,
}

/// Sort clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    /// Field to sort on.
    pub field: String,
    /// Sort direction.
    pub direction: Direction,
}

/// Conjunctive filter with optional ordering.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    filters: Vec<Filter>,
    order_by: Option<OrderBy>,
}

impl Query {
    /// Creates a query matching every document.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Adds a filter clause.
    #[must_use]
    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Sets the ordering.
    #[must_use]
    pub fn order_by(mut self, field: impl Into<String>, direction: Direction) -> Self {
        self.order_by = Some(OrderBy {
            field: field.into(),
            direction,
        });
        self
    }

    /// Returns whether the document satisfies every clause.
    #[must_use]
    pub fn matches(&self, document: &Document) -> bool {
        self.filters.iter().all(|filter| filter.matches(document))
    }

    /// Filters and orders documents according to this query.
    ///
    /// Documents lacking the ordering field sort first; ties keep their input
    /// order.
    #[must_use]
    pub fn apply<'a>(&self, documents: impl IntoIterator<Item = &'a Document>) -> Vec<Document> {
        let mut selected: Vec<Document> = documents
            .into_iter()
            .filter(|document| self.matches(document))
            .cloned()
            .collect();
        if let Some(order) = &self.order_by {
            selected.sort_by(|left, right| {
                let ordering = compare_values(left.field(&order.field), right.field(&order.field));
                match order.direction {
                    Direction::Ascending => ordering,
                    Direction::Descending => ordering.reverse(),
                }
            });
        }
        selected
    }
}

fn compare_values(left: Option<&Value>, right: Option<&Value>) -> Ordering {
    match (left, right) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(Value::Number(a)), Some(Value::Number(b))) => a
            .as_f64()
            .partial_cmp(&b.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(Value::String(a)), Some(Value::String(b))) => a.cmp(b),
        (Some(Value::Bool(a)), Some(Value::Bool(b))) => a.cmp(b),
        (Some(a), Some(b)) => a.to_string().cmp(&b.to_string()),
    }
}
