//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the application core and external systems.
//! Each port is a trait that can be implemented by adapters in the infrastructure layer.

mod file_system;
mod object_store;
mod secret_codec;

pub use file_system::{FileSystem, FileSystemError, ReadStream};
pub use object_store::{COPY_SUFFIX, CopyOptions, ObjectStore};
pub use secret_codec::{SecretCodec, SecretCodecError};
