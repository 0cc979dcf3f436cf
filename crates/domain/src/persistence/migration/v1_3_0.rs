//! Schema 1.3.0: request URLs are structured.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{MigrationContext, MigrationError, MigrationStep, convert_by_type, v1_4_0};
use crate::persistence::{
    AuthorizationInformation, Id, RequestBody, RequestMethod, SchemaVersion, TrufosHeader,
    TrufosUrl,
};

pub use super::v1_2_0::{CollectionInfo, FolderInfo};

/// Request record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestInfo {
    /// Schema version.
    pub version: SchemaVersion,
    /// Stable identifier.
    pub id: Id,
    /// Request title.
    pub title: String,
    /// Structured URL.
    pub url: TrufosUrl,
    /// HTTP method.
    pub method: RequestMethod,
    /// Request headers.
    #[serde(default)]
    pub headers: Vec<TrufosHeader>,
    /// Body descriptor.
    pub body: RequestBody,
    /// Authentication, merged from the secrets file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth: Option<AuthorizationInformation>,
}

/// Introduces the optional `index` on folders and requests.
///
/// No value is assigned; existing records stay unordered.
///
/// # Errors
///
/// Returns [`MigrationError::Malformed`] if the record is not a 1.3.0 record.
pub fn migrate(record: Value, ctx: &MigrationContext<'_>) -> Result<MigrationStep, MigrationError> {
    const NEXT: SchemaVersion = SchemaVersion::V1_4_0;

    let record = convert_by_type(
        record,
        ctx,
        |c: CollectionInfo| CollectionInfo {
            version: NEXT,
            ..c
        },
        |f: FolderInfo| v1_4_0::FolderInfo {
            version: NEXT,
            id: f.id,
            title: f.title,
            index: None,
        },
        |r: RequestInfo| v1_4_0::RequestInfo {
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
