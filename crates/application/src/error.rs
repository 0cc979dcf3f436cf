//! Store error types

use std::path::PathBuf;
use thiserror::Error;
use trufos_domain::persistence::Id;
use trufos_domain::persistence::migration::MigrationError;
use trufos_domain::{DomainError, ObjectType};

use crate::ports::{FileSystemError, SecretCodecError};

/// Errors raised while reading or writing a single info file.
#[derive(Debug, Error)]
pub enum InfoFileError {
    /// The migration chain could not bring the record to the current schema.
    #[error(transparent)]
    Migration(#[from] MigrationError),

    /// The migrated record does not match the current schema.
    #[error("invalid {object_type} record at {}: {reason}", path.display())]
    Validation {
        /// Object type, from the info file name.
        object_type: ObjectType,
        /// Info file path.
        path: PathBuf,
        /// What is wrong with the record.
        reason: String,
    },

    /// A secrets file could not be encrypted or decrypted.
    #[error("secrets file {}: {source}", path.display())]
    Secrets {
        /// Secrets file path.
        path: PathBuf,
        /// Codec error.
        #[source]
        source: SecretCodecError,
    },

    /// A file does not contain valid JSON.
    #[error("{} is not valid JSON: {reason}", path.display())]
    Parse {
        /// File path.
        path: PathBuf,
        /// Parser message.
        reason: String,
    },

    /// A record could not be serialized.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// The underlying filesystem operation failed.
    #[error(transparent)]
    FileSystem(#[from] FileSystemError),
}

/// Errors returned by object store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The object has no known directory.
    #[error("object {0} is not indexed")]
    NotIndexed(Id),

    /// A non-collection object was saved before its parent.
    #[error("parent {parent_id} of object {id} is not indexed")]
    ParentNotIndexed {
        /// Object being resolved.
        id: Id,
        /// Its parent.
        parent_id: Id,
    },

    /// A required file or directory is missing.
    #[error("not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The index and the filesystem disagree.
    #[error("integrity error: {0}")]
    Integrity(String),

    /// An info file could not be read or written.
    #[error(transparent)]
    InfoFile(#[from] InfoFileError),

    /// A filesystem operation failed.
    #[error(transparent)]
    FileSystem(#[from] FileSystemError),

    /// A tree operation was rejected.
    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
