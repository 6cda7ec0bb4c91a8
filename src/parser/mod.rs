//! Parser module - Convert report text into a queryable tree
//!
//! The pipeline per line: classify (section header, divider, key/value,
//! heading, text), compute nesting depth from indentation, then feed the
//! section state machine and node stack in `builder`.

pub mod api;
pub mod builder;
pub mod classify;
pub mod depth;
