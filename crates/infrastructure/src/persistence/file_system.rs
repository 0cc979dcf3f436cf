//! Real file system implementation.

use std::path::{Path, PathBuf};

use tokio::fs;
use trufos_application::ports::{FileSystem, FileSystemError, ReadStream};

/// Real file system implementation using `tokio::fs`.
#[derive(Debug, Clone, Default)]
pub struct TokioFileSystem;

impl TokioFileSystem {
    /// Creates a new `TokioFileSystem`.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl FileSystem for TokioFileSystem {
    async fn read_file(&self, path: &Path) -> Result<Vec<u8>, FileSystemError> {
        fs::read(path)
            .await
            .map_err(|e| FileSystemError::from_io(e, path))
    }

    async fn read_file_string(&self, path: &Path) -> Result<String, FileSystemError> {
        fs::read_to_string(path)
            .await
            .map_err(|e| FileSystemError::from_io(e, path))
    }

    async fn open_read(&self, path: &Path) -> Result<ReadStream, FileSystemError> {
        let file = fs::File::open(path)
            .await
            .map_err(|e| FileSystemError::from_io(e, path))?;
        Ok(Box::new(file))
    }

    async fn write_file(&self, path: &Path, contents: &[u8]) -> Result<(), FileSystemError> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| FileSystemError::from_io(e, parent))?;
        }
        fs::write(path, contents)
            .await
            .map_err(|e| FileSystemError::from_io(e, path))
    }

    async fn create_dir_all(&self, path: &Path) -> Result<(), FileSystemError> {
        fs::create_dir_all(path)
            .await
            .map_err(|e| FileSystemError::from_io(e, path))
    }

    async fn exists(&self, path: &Path) -> bool {
        fs::metadata(path).await.is_ok()
    }

    async fn is_dir(&self, path: &Path) -> bool {
        fs::metadata(path).await.is_ok_and(|m| m.is_dir())
    }

    async fn is_file(&self, path: &Path) -> bool {
        fs::metadata(path).await.is_ok_and(|m| m.is_file())
    }

    async fn read_dir(&self, path: &Path) -> Result<Vec<PathBuf>, FileSystemError> {
        let mut entries = Vec::new();
        let mut dir = fs::read_dir(path)
            .await
            .map_err(|e| FileSystemError::from_io(e, path))?;

        while let Some(entry) = dir
            .next_entry()
            .await
            .map_err(|e| FileSystemError::from_io(e, path))?
        {
            entries.push(entry.path());
        }

        entries.sort(); // Deterministic ordering
        Ok(entries)
    }

    async fn remove_file(&self, path: &Path) -> Result<(), FileSystemError> {
        fs::remove_file(path)
            .await
            .map_err(|e| FileSystemError::from_io(e, path))
    }

    async fn remove_dir_all(&self, path: &Path) -> Result<(), FileSystemError> {
        fs::remove_dir_all(path)
            .await
            .map_err(|e| FileSystemError::from_io(e, path))
    }

    async fn copy_file(&self, from: &Path, to: &Path) -> Result<(), FileSystemError> {
        if let Some(parent) = to.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| FileSystemError::from_io(e, parent))?;
        }
        fs::copy(from, to)
            .await
            .map_err(|e| FileSystemError::from_io(e, from))?;
        Ok(())
    }

    async fn rename(&self, from: &Path, to: &Path) -> Result<(), FileSystemError> {
        fs::rename(from, to)
            .await
            .map_err(|e| FileSystemError::from_io(e, from))
    }
}
