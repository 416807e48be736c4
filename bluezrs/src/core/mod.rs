//! Core directory logic.
//!
//! Property access for a single object, object tree snapshots and the pure
//! queries run over them.

pub mod directory;
pub mod object_tree;
pub mod properties;
