//! The id-to-directory index.
//!
//! The index is the only place the store looks up where an object lives.
//! Entries are set when an object is first loaded or written, rebased when a
//! directory is renamed, and purged when a directory is deleted.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use trufos_domain::persistence::Id;

/// Maps object ids to absolute directory paths.
#[derive(Debug, Clone, Default)]
pub struct PathIndex {
    paths: HashMap<Id, PathBuf>,
}

impl PathIndex {
    /// Creates an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the directory of `id`.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Path> {
        self.paths.get(id).map(PathBuf::as_path)
    }

    /// Records the directory of `id`, replacing any previous entry.
    pub fn insert(&mut self, id: impl Into<Id>, path: impl Into<PathBuf>) {
        self.paths.insert(id.into(), path.into());
    }

    /// Forgets `id` and returns its former directory.
    pub fn remove(&mut self, id: &str) -> Option<PathBuf> {
        self.paths.remove(id)
    }

    /// Returns true if some object other than `except` occupies `path`.
    #[must_use]
    pub fn is_claimed(&self, path: &Path, except: Option<&str>) -> bool {
        self.paths
            .iter()
            .any(|(id, claimed)| claimed == path && Some(id.as_str()) != except)
    }

    /// Re-points every entry at or below `from` to the same place below `to`.
    ///
    /// Returns the number of entries changed.
    pub fn rebase(&mut self, from: &Path, to: &Path) -> usize {
        let mut changed = 0;
        for path in self.paths.values_mut() {
            if let Ok(rest) = path.strip_prefix(from) {
                *path = if rest.as_os_str().is_empty() {
                    to.to_path_buf()
                } else {
                    to.join(rest)
                };
                changed += 1;
            }
        }
        changed
    }

    /// Forgets every entry at or below `path`.
    ///
    /// Returns the number of entries removed.
    pub fn purge(&mut self, path: &Path) -> usize {
        let before = self.paths.len();
        self.paths.retain(|_, claimed| !claimed.starts_with(path));
        before - self.paths.len()
    }

    /// Number of indexed objects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Returns true if nothing is indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}
