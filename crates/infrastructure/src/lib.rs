//! Trufos Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer: the tokio file system, the AES-GCM
//! secret codec, the info-file codec and the file system object store.

pub mod bootstrap;
pub mod persistence;
pub mod secrets;
pub mod serialization;

pub use bootstrap::{DEFAULT_COLLECTION_TITLE, default_collection};
pub use persistence::{
    FileSystemObjectStore, InfoFileCodec, SettingsError, SettingsRepository, TokioFileSystem,
};
pub use secrets::{AesGcmSecretCodec, SECRET_KEY_LEN};
pub use serialization::{SerializationError, from_json_bytes, to_json_stable, to_json_stable_bytes};
