//! Reading and writing single info files.
//!
//! A read merges the decrypted secrets file into the raw record, walks the
//! migration chain, validates the result against the current schema and, if
//! any migrator ran, applies the collected side effects and writes the
//! record back. A write splits secrets out again and encrypts them into
//! `.secrets.bin`, or removes that file when nothing is secret.

use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, info};
use trufos_application::InfoFileError;
use trufos_application::ports::{FileSystem, SecretCodec};
use trufos_domain::ObjectType;
use trufos_domain::persistence::migration::{MigrationEffect, migrate_to_current};
use trufos_domain::persistence::{
    CollectionInfoFile, FolderInfoFile, InfoFile, LEGACY_SECRETS_FILE, RequestInfoFile,
    SECRETS_FILE, SchemaVersion, merge_secrets, split_secrets,
};

use crate::serialization::{from_json_bytes, to_json_stable_bytes};

/// Reads and writes info files and their secrets partition.
pub struct InfoFileCodec<F: FileSystem, C: SecretCodec> {
    fs: F,
    codec: C,
}

impl<F: FileSystem, C: SecretCodec> InfoFileCodec<F, C> {
    /// Creates a codec over the given file system and secret codec.
    #[must_use]
    pub const fn new(fs: F, codec: C) -> Self {
        Self { fs, codec }
    }

    /// Reads the info file of `object_type` in `dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing or not JSON, if secrets cannot
    /// be decrypted, if migration fails, or if the migrated record is invalid.
    pub async fn read(&self, dir: &Path, object_type: ObjectType) -> Result<InfoFile, InfoFileError> {
        self.read_file(&dir.join(object_type.info_file_name()), object_type)
            .await
    }

    /// Reads an info file at an explicit path (used for draft and legacy files).
    ///
    /// # Errors
    ///
    /// Same as [`Self::read`].
    pub async fn read_file(
        &self,
        path: &Path,
        object_type: ObjectType,
    ) -> Result<InfoFile, InfoFileError> {
        let bytes = self.fs.read_file(path).await?;
        let mut record: Value = from_json_bytes(&bytes).map_err(|e| InfoFileError::Parse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let dir = parent_dir(path);
        if let Some(secrets) = self.read_secrets(&dir).await? {
            merge_secrets(&mut record, secrets);
        }

        let outcome = migrate_to_current(record, object_type, path)?;
        let migrated = outcome.migrated();
        let info = InfoFile::from_value(outcome.record, object_type).map_err(|e| {
            InfoFileError::Validation {
                object_type,
                path: path.to_path_buf(),
                reason: e.to_string(),
            }
        })?;

        if migrated {
            let from = outcome
                .steps
                .first()
                .map_or_else(String::new, ToString::to_string);
            info!(
                path = %path.display(),
                %object_type,
                from = %from,
                to = %SchemaVersion::CURRENT,
                "migrated info file"
            );
            self.apply_effects(&outcome.effects).await?;

            let target = outcome
                .effects
                .iter()
                .find_map(|effect| effect.relocated(path))
                .unwrap_or(path);
            self.write_file(target, &info).await?;
        }

        Ok(info)
    }

    /// Reads a collection info file.
    ///
    /// # Errors
    ///
    /// Same as [`Self::read`].
    pub async fn read_collection(&self, dir: &Path) -> Result<CollectionInfoFile, InfoFileError> {
        match self.read(dir, ObjectType::Collection).await? {
            InfoFile::Collection(info) => Ok(info),
            other => Err(mismatch(&other, dir, ObjectType::Collection)),
        }
    }

    /// Reads a folder info file.
    ///
    /// # Errors
    ///
    /// Same as [`Self::read`].
    pub async fn read_folder(&self, dir: &Path) -> Result<FolderInfoFile, InfoFileError> {
        match self.read(dir, ObjectType::Folder).await? {
            InfoFile::Folder(info) => Ok(info),
            other => Err(mismatch(&other, dir, ObjectType::Folder)),
        }
    }

    /// Reads a request info file at an explicit path.
    ///
    /// # Errors
    ///
    /// Same as [`Self::read`].
    pub async fn read_request(&self, path: &Path) -> Result<RequestInfoFile, InfoFileError> {
        match self.read_file(path, ObjectType::Request).await? {
            InfoFile::Request(info) => Ok(info),
            other => Err(mismatch(&other, path, ObjectType::Request)),
        }
    }

    /// Writes `info` into `dir` under its type's file name.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization, encryption or a write fails.
    pub async fn write(&self, dir: &Path, info: &InfoFile) -> Result<(), InfoFileError> {
        self.write_file(&dir.join(info.object_type().info_file_name()), info)
            .await
    }

    /// Writes `info` to an explicit path, with its secrets next to it.
    ///
    /// # Errors
    ///
    /// Same as [`Self::write`].
    pub async fn write_file(&self, path: &Path, info: &InfoFile) -> Result<(), InfoFileError> {
        let mut plain = info.clone();
        let secrets = split_secrets(&mut plain);

        let value = plain
            .to_value()
            .map_err(|e| InfoFileError::Serialization(e.to_string()))?;
        let bytes =
            to_json_stable_bytes(&value).map_err(|e| InfoFileError::Serialization(e.to_string()))?;
        self.fs.write_file(path, &bytes).await?;

        let secrets_path = parent_dir(path).join(SECRETS_FILE);
        if secrets.is_empty() {
            if self.fs.exists(&secrets_path).await {
                self.fs.remove_file(&secrets_path).await?;
            }
            return Ok(());
        }

        let plaintext = to_json_stable_bytes(&secrets)
            .map_err(|e| InfoFileError::Serialization(e.to_string()))?;
        let encrypted = self
            .codec
            .encrypt(&plaintext)
            .map_err(|source| InfoFileError::Secrets {
                path: secrets_path.clone(),
                source,
            })?;
        self.fs.write_file(&secrets_path, &encrypted).await?;
        Ok(())
    }

    /// Decrypts the secrets file in `dir`, falling back to the legacy name.
    async fn read_secrets(&self, dir: &Path) -> Result<Option<Value>, InfoFileError> {
        for name in [SECRETS_FILE, LEGACY_SECRETS_FILE] {
            let path = dir.join(name);
            if !self.fs.is_file(&path).await {
                continue;
            }

            let encrypted = self.fs.read_file(&path).await?;
            let plaintext =
                self.codec
                    .decrypt(&encrypted)
                    .map_err(|source| InfoFileError::Secrets {
                        path: path.clone(),
                        source,
                    })?;
            let value = from_json_bytes(&plaintext).map_err(|e| InfoFileError::Parse {
                path: path.clone(),
                reason: e.to_string(),
            })?;
            return Ok(Some(value));
        }
        Ok(None)
    }

    async fn apply_effects(&self, effects: &[MigrationEffect]) -> Result<(), InfoFileError> {
        for effect in effects {
            match effect {
                MigrationEffect::CreateFileIfMissing { path, contents } => {
                    if !self.fs.exists(path).await {
                        debug!(path = %path.display(), "creating file");
                        self.fs.write_file(path, contents.as_bytes()).await?;
                    }
                }
                MigrationEffect::MoveIfExists { from, to } => {
                    if self.fs.exists(from).await {
                        debug!(from = %from.display(), to = %to.display(), "moving legacy file");
                        self.fs.create_dir_all(&parent_dir(to)).await?;
                        self.fs.rename(from, to).await?;
                    }
                }
                MigrationEffect::CopyIfExists { from, to, guard } => {
                    if self.fs.exists(from).await
                        && self.fs.exists(guard).await
                        && !self.fs.exists(to).await
                    {
                        debug!(from = %from.display(), to = %to.display(), "copying legacy file");
                        self.fs.copy_file(from, to).await?;
                    }
                }
            }
        }
        Ok(())
    }
}

fn parent_dir(path: &Path) -> PathBuf {
    path.parent().map_or_else(PathBuf::new, Path::to_path_buf)
}

fn mismatch(info: &InfoFile, path: &Path, expected: ObjectType) -> InfoFileError {
    InfoFileError::Validation {
        object_type: expected,
        path: path.to_path_buf(),
        reason: format!("expected a {expected} record, read a {}", info.object_type()),
    }
}
