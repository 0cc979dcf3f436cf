//! Schema 1.0.0: the first released layout. Records carry no id.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{MigrationContext, MigrationError, MigrationStep, convert_by_type, v1_1_0};
use crate::id::generate_id;
use crate::persistence::{
    AuthorizationInformation, RequestBody, RequestMethod, SchemaVersion, TrufosHeader, VariableMap,
};

/// Collection record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionInfo {
    /// Always 1.0.0.
    pub version: SchemaVersion,
    /// Collection title.
    pub title: String,
    /// Collection variables.
    #[serde(default)]
    pub variables: VariableMap,
    /// Authentication, merged from the secrets file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth: Option<AuthorizationInformation>,
}

/// Folder record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderInfo {
    /// Always 1.0.0.
    pub version: SchemaVersion,
    /// Folder title.
    pub title: String,
}

/// Request record. The URL is a plain string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestInfo {
    /// Always 1.0.0.
    pub version: SchemaVersion,
    /// Request title.
    pub title: String,
    /// Full URL including the query string.
    pub url: String,
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

/// Assigns a fresh id to every record.
///
/// # Errors
///
/// Returns [`MigrationError::Malformed`] if the record is not a 1.0.0 record.
pub fn migrate(record: Value, ctx: &MigrationContext<'_>) -> Result<MigrationStep, MigrationError> {
    const NEXT: SchemaVersion = SchemaVersion::V1_1_0;

    let record = convert_by_type(
        record,
        ctx,
        |c: CollectionInfo| v1_1_0::CollectionInfo {
            version: NEXT,
            id: generate_id(),
            title: c.title,
            variables: c.variables,
            auth: c.auth,
        },
        |f: FolderInfo| v1_1_0::FolderInfo {
            version: NEXT,
            id: generate_id(),
            title: f.title,
        },
        |r: RequestInfo| v1_1_0::RequestInfo {
            version: NEXT,
            id: generate_id(),
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
