//! Trufos Domain - Core collection types
//!
//! This crate defines the in-memory object tree (collections, folders and
//! requests), the on-disk info-file records for every schema generation,
//! and the pure migration chain between them.
//! All types here are pure Rust with no I/O dependencies.

pub mod error;
pub mod id;
pub mod naming;
pub mod object;
pub mod persistence;
pub mod settings;

pub use error::{DomainError, DomainResult};
pub use id::generate_id;
pub use naming::directory_name;
pub use object::{
    Collection, CollectionChild, Folder, ObjectMut, ObjectRef, ObjectType, TrufosObject,
    TrufosRequest, sort_children,
};
pub use settings::EngineSettings;
