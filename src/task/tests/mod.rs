//! Unit tests for the task module.

mod capabilities_tests;
