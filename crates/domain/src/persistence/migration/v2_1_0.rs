//! Schema 2.1.0: folders and requests have no `index`.

use serde_json::Value;

use super::{MigrationContext, MigrationError, MigrationStep, convert_by_type};
use crate::persistence::{CollectionInfoFile, FolderInfoFile, RequestInfoFile, SchemaVersion};

pub use super::v1_2_0::CollectionInfo;
pub use super::v1_3_0::RequestInfo;
pub use super::v1_1_0::FolderInfo;

/// Re-stamps records for the form-data body variant, which needs no
/// structural change.
///
/// # Errors
///
/// Returns [`MigrationError::Malformed`] if the record is not a 2.1.0 record.
pub fn migrate(record: Value, ctx: &MigrationContext<'_>) -> Result<MigrationStep, MigrationError> {
    const NEXT: SchemaVersion = SchemaVersion::V2_2_0;

    let record = convert_by_type(
        record,
        ctx,
        |c: CollectionInfo| CollectionInfoFile {
            version: NEXT,
            id: c.id,
            title: c.title,
            variables: c.variables,
            environments: c.environments,
            auth: c.auth,
        },
        |f: FolderInfo| FolderInfoFile {
            version: NEXT,
            id: f.id,
            title: f.title,
            index: None,
        },
        |r: RequestInfo| RequestInfoFile {
            version: NEXT,
            id: r.id,
            title: r.title,
            index: None,
            url: r.url,
            method: r.method,
            headers: r.headers,
            body: r.body,
            auth: r.auth,
        },
    )?;
    Ok(MigrationStep::pure(record))
}
