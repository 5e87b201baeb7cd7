//! Threaded task comments with emoji reactions.
//!
//! Each member holds at most one reaction per comment; toggling the same
//! emoji twice restores the original reactions.

pub mod domain;

#[cfg(test)]
mod tests;
