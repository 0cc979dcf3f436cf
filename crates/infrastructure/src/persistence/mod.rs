//! Persistence implementations for file-based storage.

mod file_system;
mod info_file_codec;
mod object_store;
mod settings_repository;

pub use file_system::*;
pub use info_file_codec::*;
pub use object_store::*;
pub use settings_repository::*;
