//! Adapter implementations for member ports.

pub mod memory;
