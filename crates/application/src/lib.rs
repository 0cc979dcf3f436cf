//! Trufos Application - Ports and store services
//!
//! This crate defines the application layer with:
//! - Port traits (interfaces for the filesystem, secret encryption and the object store)
//! - The id-to-directory path index
//! - Store-level error handling

pub mod error;
pub mod path_index;
pub mod ports;

pub use error::{InfoFileError, StoreError, StoreResult};
pub use path_index::PathIndex;
pub use ports::{
    CopyOptions, FileSystem, FileSystemError, ObjectStore, ReadStream, SecretCodec,
    SecretCodecError,
};
