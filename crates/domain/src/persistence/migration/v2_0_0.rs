//! Schema 2.0.0: `.gitignore`, `.secrets.bin` and the `.draft/` directory.

use serde_json::Value;

use super::{MigrationContext, MigrationError, MigrationStep, convert_by_type, v2_1_0};
use crate::persistence::SchemaVersion;

pub use super::v1_4_0::{CollectionInfo, FolderInfo, RequestInfo};

/// Discards the `index` values written under 1.4.0.
///
/// # Errors
///
/// Returns [`MigrationError::Malformed`] if the record is not a 2.0.0 record.
pub fn migrate(record: Value, ctx: &MigrationContext<'_>) -> Result<MigrationStep, MigrationError> {
    const NEXT: SchemaVersion = SchemaVersion::V2_1_0;

    let record = convert_by_type(
        record,
        ctx,
        |c: CollectionInfo| CollectionInfo {
            version: NEXT,
            ..c
        },
        |f: FolderInfo| v2_1_0::FolderInfo {
            version: NEXT,
            id: f.id,
            title: f.title,
        },
        |r: RequestInfo| v2_1_0::RequestInfo {
            version: NEXT,
            id: r.id,
            title: r.title,
            url: r.url,
            method: r.method,
            headers: r.headers,
            body: r.body,
            auth: r.auth,
        },
    )?;
    Ok(MigrationStep::pure(record))
}
