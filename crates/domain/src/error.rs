//! Domain error types

use thiserror::Error;

/// Domain-level errors that can occur during validation or tree manipulation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// An identifier is invalid or empty.
    #[error("invalid identifier: {0}")]
    InvalidIdentifier(String),

    /// A schema version string could not be parsed.
    #[error("invalid schema version: {0}")]
    InvalidVersion(String),

    /// No item with the given id exists in the collection tree.
    #[error("item not found in collection: {0}")]
    ItemNotFound(String),

    /// The item exists but cannot hold children.
    #[error("item cannot contain children: {0}")]
    NotAParent(String),

    /// A record failed validation against the current schema.
    #[error("invalid record: {0}")]
    InvalidRecord(String),

    /// A move would place an item inside itself or one of its descendants.
    #[error("cannot move {item} into {target}")]
    InvalidMove {
        /// The item being moved.
        item: String,
        /// The requested new parent.
        target: String,
    },
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
