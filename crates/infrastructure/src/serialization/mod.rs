//! Deterministic JSON serialization for the Trufos file format.
//!
//! Ensures clean Git diffs by:
//! - Keeping object keys in a stable order (via `BTreeMap` and struct field order)
//! - Using 2-space indentation
//! - Adding a trailing newline

mod json;

pub use json::*;
