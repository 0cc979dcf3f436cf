//! Fixed file and directory names of the on-disk collection layout.

/// Info file of a collection directory.
pub const COLLECTION_FILE: &str = "collection.json";
/// Info file of a folder directory.
pub const FOLDER_FILE: &str = "folder.json";
/// Info file of a request directory.
pub const REQUEST_FILE: &str = "request.json";
/// Text body of a request, next to its info file.
pub const BODY_FILE: &str = "request-body.txt";
/// Encrypted secrets partition of an info file.
pub const SECRETS_FILE: &str = ".secrets.bin";
/// Hidden directory holding a request's unsaved changes.
pub const DRAFT_DIR: &str = ".draft";
/// Git ignore file created at the collection root.
pub const GITIGNORE_FILE: &str = ".gitignore";

/// Secrets file name used before schema 2.0.0.
pub const LEGACY_SECRETS_FILE: &str = "~secrets.bin";
/// Draft request info file used before schema 2.0.0.
pub const LEGACY_DRAFT_REQUEST_FILE: &str = "~request.json";
/// Draft request body used before schema 2.0.0.
pub const LEGACY_DRAFT_BODY_FILE: &str = "~request-body.txt";

/// Contents written to a fresh collection `.gitignore`.
#[must_use]
pub fn gitignore_contents() -> String {
    format!("{DRAFT_DIR}\n")
}
