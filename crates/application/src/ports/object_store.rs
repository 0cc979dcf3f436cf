//! Object store port.
//!
//! The store maps an in-memory collection tree onto a directory tree, one
//! directory per object. Operations are expected to be called sequentially by
//! a single owner; nothing here locks.

use std::path::Path;

use trufos_domain::persistence::Id;
use trufos_domain::{Collection, Folder, ObjectMut, ObjectRef, TrufosRequest};

use super::ReadStream;
use crate::error::StoreResult;

/// Suffix appended to the title of a copy when no title is given.
pub const COPY_SUFFIX: &str = " (Copy)";

/// Options for [`ObjectStore::copy_folder`] and [`ObjectStore::copy_request`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CopyOptions {
    /// Title of the copy. Defaults to the original title plus [`COPY_SUFFIX`].
    pub title: Option<String>,
    /// Parent of the copy. Defaults to the original's parent.
    pub parent_id: Option<Id>,
}

impl CopyOptions {
    /// Sets an explicit title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Places the copy under another parent.
    #[must_use]
    pub fn with_parent(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    /// Resolves the title of the copy.
    #[must_use]
    pub fn title_for(&self, original: &str) -> String {
        self.title
            .clone()
            .unwrap_or_else(|| format!("{original}{COPY_SUFFIX}"))
    }
}

/// Persistence of collection trees.
pub trait ObjectStore: Send {
    /// Loads a collection and, if `recursive`, its whole subtree.
    ///
    /// Stale records are migrated and written back. Every loaded id is indexed.
    ///
    /// # Errors
    ///
    /// Returns an error if an info file is missing, cannot be migrated or fails
    /// validation, or if a secrets file cannot be decrypted.
    fn load_collection(
        &mut self,
        dir_path: &Path,
        recursive: bool,
    ) -> impl std::future::Future<Output = StoreResult<Collection>> + Send;

    /// Writes the collection's info file; if `recursive`, also creates the
    /// directory and `.gitignore` when missing and saves every descendant.
    ///
    /// # Errors
    ///
    /// Returns an error if any write fails.
    fn save_collection(
        &mut self,
        collection: &Collection,
        recursive: bool,
    ) -> impl std::future::Future<Output = StoreResult<()>> + Send;

    /// Writes a request to its draft location if `request.draft`, else to
    /// its primary files.
    ///
    /// `text_body` replaces the body file when given; `None` leaves an
    /// existing body file untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent is not indexed or a write fails.
    fn save_request(
        &mut self,
        request: &TrufosRequest,
        text_body: Option<&str>,
    ) -> impl std::future::Future<Output = StoreResult<()>> + Send;

    /// Writes a folder's info file (not its children).
    ///
    /// # Errors
    ///
    /// Returns an error if the parent is not indexed or a write fails.
    fn save_folder(
        &mut self,
        folder: &Folder,
    ) -> impl std::future::Future<Output = StoreResult<()>> + Send;

    /// Promotes a request's draft files to its primary files.
    ///
    /// A no-op if there is no draft directory.
    ///
    /// # Errors
    ///
    /// Returns an error if a move fails.
    fn save_changes(
        &mut self,
        request: &mut TrufosRequest,
    ) -> impl std::future::Future<Output = StoreResult<()>> + Send;

    /// Deletes a request's draft and reloads it from the primary files.
    ///
    /// A no-op if `request.draft` is false.
    ///
    /// # Errors
    ///
    /// Returns an error if the draft cannot be removed or the primary files
    /// cannot be read.
    fn discard_changes(
        &mut self,
        request: &mut TrufosRequest,
    ) -> impl std::future::Future<Output = StoreResult<()>> + Send;

    /// Retitles an object, renaming its directory unless it is a collection.
    ///
    /// # Errors
    ///
    /// Returns an error if the object is not indexed or the rename fails.
    fn rename(
        &mut self,
        object: ObjectMut<'_>,
        title: &str,
    ) -> impl std::future::Future<Output = StoreResult<()>> + Send;

    /// Moves a folder or request under another parent of the same collection.
    ///
    /// # Errors
    ///
    /// Returns an error if either id is unknown, if the move would create a
    /// cycle, or if the directory rename fails.
    fn move_child(
        &mut self,
        collection: &mut Collection,
        child_id: &str,
        new_parent_id: &str,
    ) -> impl std::future::Future<Output = StoreResult<()>> + Send;

    /// Places an item at `new_index` under `new_parent_id` and persists the
    /// `index` of every sibling of the old and new parent.
    ///
    /// # Errors
    ///
    /// Same as [`Self::move_child`], plus write errors.
    fn reorder_item(
        &mut self,
        collection: &mut Collection,
        item_id: &str,
        new_parent_id: &str,
        new_index: usize,
    ) -> impl std::future::Future<Output = StoreResult<()>> + Send;

    /// Persists a deep copy of a folder with fresh ids and returns it.
    ///
    /// # Errors
    ///
    /// Returns an error if the original is not indexed or a write fails.
    fn copy_folder(
        &mut self,
        folder: &Folder,
        options: CopyOptions,
    ) -> impl std::future::Future<Output = StoreResult<Folder>> + Send;

    /// Persists a copy of a request with a fresh id and returns it.
    ///
    /// # Errors
    ///
    /// Returns an error if the original is not indexed or a write fails.
    fn copy_request(
        &mut self,
        request: &TrufosRequest,
        options: CopyOptions,
    ) -> impl std::future::Future<Output = StoreResult<TrufosRequest>> + Send;

    /// Deletes an object's directory, children first, and forgets its path.
    ///
    /// # Errors
    ///
    /// Returns an error if the object is not indexed or removal fails.
    fn delete(
        &mut self,
        object: ObjectRef<'_>,
    ) -> impl std::future::Future<Output = StoreResult<()>> + Send;

    /// Opens the request's text body: the draft body if the request is a
    /// draft and one exists, else the primary body, else `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request is not indexed or the file cannot be opened.
    fn load_text_body(
        &mut self,
        request: &TrufosRequest,
    ) -> impl std::future::Future<Output = StoreResult<Option<ReadStream>>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_copy_title_defaults_to_suffix() {
        assert_eq!(CopyOptions::default().title_for("Users"), "Users (Copy)");
        assert_eq!(
            CopyOptions::default().with_title("Admins").title_for("Users"),
            "Admins"
        );
    }
}
