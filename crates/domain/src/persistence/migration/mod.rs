//! The schema migration chain.
//!
//! Every historical schema version has a module holding its record shapes
//! and a `migrate` function producing the next version's record. Steps are
//! pure: a step returns a new record plus the filesystem effects the caller
//! must apply once the whole chain has succeeded.
//!
//! | From  | To    | Change                                              |
//! |-------|-------|-----------------------------------------------------|
//! | 1.0.0 | 1.1.0 | records gain `id`                                   |
//! | 1.1.0 | 1.2.0 | collections gain `environments`                     |
//! | 1.2.0 | 1.3.0 | request URL becomes `{ base, query }`               |
//! | 1.3.0 | 1.4.0 | folders and requests gain `index`                   |
//! | 1.4.0 | 2.0.0 | `.gitignore`, `.secrets.bin` and `.draft/` layout   |
//! | 2.0.0 | 2.1.0 | legacy `index` values are dropped                   |
//! | 2.1.0 | 2.2.0 | form-data body variant                              |

pub mod v1_0_0;
pub mod v1_1_0;
pub mod v1_2_0;
pub mod v1_3_0;
pub mod v1_4_0;
pub mod v2_0_0;
pub mod v2_1_0;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::SchemaVersion;
use crate::object::ObjectType;

/// Errors raised while walking the migration chain.
///
/// All of them are integrity errors: the data on disk cannot be brought to
/// the current schema and nothing is repaired automatically.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MigrationError {
    /// The record is stamped with a version newer than this build knows.
    #[error("{} has schema version {found}, but this app only supports up to {latest}; update the app", path.display())]
    NewerThanSupported {
        /// Info file path.
        path: PathBuf,
        /// Version found on disk.
        found: SchemaVersion,
        /// Latest version known to the chain.
        latest: SchemaVersion,
    },

    /// No migrator is registered for an older version.
    #[error("no migrator registered for schema version {version} ({})", path.display())]
    MissingMigrator {
        /// Unsupported version.
        version: SchemaVersion,
        /// Info file path.
        path: PathBuf,
    },

    /// A migrator returned a record whose version did not increase.
    #[error("migrator for {from} produced version {to}, which does not advance")]
    NotAdvancing {
        /// Input version.
        from: SchemaVersion,
        /// Output version.
        to: SchemaVersion,
    },

    /// The record has no parseable `version` field.
    #[error("{} has no valid version field", path.display())]
    MissingVersion {
        /// Info file path.
        path: PathBuf,
    },

    /// The record does not match the shape of its declared version.
    #[error("{object_type} record {} does not match schema {version}: {reason}", path.display())]
    Malformed {
        /// Object type of the record.
        object_type: ObjectType,
        /// Declared version.
        version: SchemaVersion,
        /// Info file path.
        path: PathBuf,
        /// Deserializer message.
        reason: String,
    },
}

/// What a migrator knows about the record it transforms.
#[derive(Debug, Clone, Copy)]
pub struct MigrationContext<'a> {
    /// Type of the object, taken from the info file name.
    pub object_type: ObjectType,
    /// Path of the info file being migrated.
    pub path: &'a Path,
    /// Version the record is stamped with.
    pub version: SchemaVersion,
}

impl MigrationContext<'_> {
    /// Directory holding the info file.
    #[must_use]
    pub fn dir(&self) -> &Path {
        self.path.parent().unwrap_or(self.path)
    }

    fn malformed(&self, reason: impl ToString) -> MigrationError {
        MigrationError::Malformed {
            object_type: self.object_type,
            version: self.version,
            path: self.path.to_path_buf(),
            reason: reason.to_string(),
        }
    }
}

/// A filesystem change requested by a migrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MigrationEffect {
    /// Writes `contents` to `path` unless the file already exists.
    CreateFileIfMissing {
        /// Target file.
        path: PathBuf,
        /// File contents.
        contents: String,
    },

    /// Renames `from` to `to` if `from` exists, creating the parent of `to`.
    MoveIfExists {
        /// Source path.
        from: PathBuf,
        /// Destination path.
        to: PathBuf,
    },

    /// Copies `from` to `to` if both `from` and `guard` exist and `to` does not.
    CopyIfExists {
        /// Source path.
        from: PathBuf,
        /// Destination path.
        to: PathBuf,
        /// Path that must exist for the copy to happen.
        guard: PathBuf,
    },
}

impl MigrationEffect {
    /// Returns the new location of `path` if this effect moves it.
    #[must_use]
    pub fn relocated(&self, path: &Path) -> Option<&Path> {
        match self {
            Self::MoveIfExists { from, to } if from == path => Some(to),
            _ => None,
        }
    }
}

/// Output of a single migrator.
#[derive(Debug, Clone, PartialEq)]
pub struct MigrationStep {
    /// The record at the next version.
    pub record: Value,
    /// Side effects to apply after the chain succeeds.
    pub effects: Vec<MigrationEffect>,
}

impl MigrationStep {
    /// A step without side effects.
    #[must_use]
    pub const fn pure(record: Value) -> Self {
        Self {
            record,
            effects: Vec::new(),
        }
    }
}

/// Signature of a migrator.
pub type MigrateFn = fn(Value, &MigrationContext<'_>) -> Result<MigrationStep, MigrationError>;

/// A registered migrator.
#[derive(Debug, Clone, Copy)]
pub struct Migrator {
    /// Version this migrator accepts.
    pub from: SchemaVersion,
    /// The transform.
    pub migrate: MigrateFn,
}

/// The registered chain, ordered by `from`.
pub static MIGRATORS: &[Migrator] = &[
    Migrator {
        from: SchemaVersion::V1_0_0,
        migrate: v1_0_0::migrate,
    },
    Migrator {
        from: SchemaVersion::V1_1_0,
        migrate: v1_1_0::migrate,
    },
    Migrator {
        from: SchemaVersion::V1_2_0,
        migrate: v1_2_0::migrate,
    },
    Migrator {
        from: SchemaVersion::V1_3_0,
        migrate: v1_3_0::migrate,
    },
    Migrator {
        from: SchemaVersion::V1_4_0,
        migrate: v1_4_0::migrate,
    },
    Migrator {
        from: SchemaVersion::V2_0_0,
        migrate: v2_0_0::migrate,
    },
    Migrator {
        from: SchemaVersion::V2_1_0,
        migrate: v2_1_0::migrate,
    },
];

/// Result of walking the chain.
#[derive(Debug, Clone, PartialEq)]
pub struct MigrationOutcome {
    /// The record at the latest version.
    pub record: Value,
    /// Side effects collected from every step, in order.
    pub effects: Vec<MigrationEffect>,
    /// Versions the record passed through, excluding the final one.
    pub steps: Vec<SchemaVersion>,
}

impl MigrationOutcome {
    /// Returns true if at least one migrator ran.
    #[must_use]
    pub fn migrated(&self) -> bool {
        !self.steps.is_empty()
    }
}

/// Reads the `version` field of a raw record.
///
/// # Errors
///
/// Returns [`MigrationError::MissingVersion`] if the field is absent or unparseable.
pub fn record_version(record: &Value, path: &Path) -> Result<SchemaVersion, MigrationError> {
    record
        .get("version")
        .and_then(Value::as_str)
        .and_then(|raw| raw.parse().ok())
        .ok_or_else(|| MigrationError::MissingVersion {
            path: path.to_path_buf(),
        })
}

/// Walks `table` from the record's version up to `latest`.
///
/// # Errors
///
/// Fails if the record is newer than `latest`, if no migrator matches a
/// version on the way, if a migrator does not advance the version, or if a
/// migrator rejects the record.
pub fn run_chain(
    table: &[Migrator],
    latest: SchemaVersion,
    record: Value,
    object_type: ObjectType,
    path: &Path,
) -> Result<MigrationOutcome, MigrationError> {
    let mut record = record;
    let mut effects = Vec::new();
    let mut steps = Vec::new();
    let mut version = record_version(&record, path)?;

    if version > latest {
        return Err(MigrationError::NewerThanSupported {
            path: path.to_path_buf(),
            found: version,
            latest,
        });
    }

    while version != latest {
        let migrator = table
            .iter()
            .find(|migrator| migrator.from == version)
            .ok_or_else(|| MigrationError::MissingMigrator {
                version,
                path: path.to_path_buf(),
            })?;

        let ctx = MigrationContext {
            object_type,
            path,
            version,
        };
        let step = (migrator.migrate)(record, &ctx)?;
        let next = record_version(&step.record, path)?;
        if next <= version {
            return Err(MigrationError::NotAdvancing {
                from: version,
                to: next,
            });
        }
        if next > latest {
            return Err(MigrationError::NewerThanSupported {
                path: path.to_path_buf(),
                found: next,
                latest,
            });
        }

        steps.push(version);
        effects.extend(step.effects);
        record = step.record;
        version = next;
    }

    Ok(MigrationOutcome {
        record,
        effects,
        steps,
    })
}

/// Brings a raw record to [`SchemaVersion::CURRENT`] using [`MIGRATORS`].
///
/// # Errors
///
/// See [`run_chain`].
pub fn migrate_to_current(
    record: Value,
    object_type: ObjectType,
    path: &Path,
) -> Result<MigrationOutcome, MigrationError> {
    run_chain(MIGRATORS, SchemaVersion::CURRENT, record, object_type, path)
}

/// Deserializes `record` as `Old`, maps it and serializes the result.
pub(crate) fn convert<Old, New>(
    record: Value,
    ctx: &MigrationContext<'_>,
    map: impl FnOnce(Old) -> New,
) -> Result<Value, MigrationError>
where
    Old: DeserializeOwned,
    New: Serialize,
{
    let old: Old = serde_json::from_value(record).map_err(|e| ctx.malformed(e))?;
    serde_json::to_value(map(old)).map_err(|e| ctx.malformed(e))
}

/// Dispatches on the object type to one of three typed conversions.
pub(crate) fn convert_by_type<C0, C1, F0, F1, R0, R1>(
    record: Value,
    ctx: &MigrationContext<'_>,
    collection: impl FnOnce(C0) -> C1,
    folder: impl FnOnce(F0) -> F1,
    request: impl FnOnce(R0) -> R1,
) -> Result<Value, MigrationError>
where
    C0: DeserializeOwned,
    C1: Serialize,
    F0: DeserializeOwned,
    F1: Serialize,
    R0: DeserializeOwned,
    R1: Serialize,
{
    match ctx.object_type {
        ObjectType::Collection => convert(record, ctx, collection),
        ObjectType::Folder => convert(record, ctx, folder),
        ObjectType::Request => convert(record, ctx, request),
    }
}
