//! Unit tests for the member module.

mod domain_tests;
mod identity_tests;
