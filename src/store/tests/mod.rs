//! Unit tests for the document store module.
