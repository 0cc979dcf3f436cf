//! Schema 1.1.0: every record has an `id`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{MigrationContext, MigrationError, MigrationStep, convert_by_type, v1_2_0};
use crate::persistence::{
    AuthorizationInformation, EnvironmentMap, Id, RequestBody, RequestMethod, SchemaVersion,
    TrufosHeader, VariableMap,
};

/// Collection record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionInfo {
    /// Schema version.
    pub version: SchemaVersion,
    /// Stable identifier.
    pub id: Id,
    /// Collection title.
    pub title: String,
    /// Collection variables.
    #[serde(default)]
    pub variables: VariableMap,
    /// Authentication, merged from the secrets file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth: Option<AuthorizationInformation>,
}

/// Folder record. Unchanged until 1.4.0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderInfo {
    /// Schema version.
    pub version: SchemaVersion,
    /// Stable identifier.
    pub id: Id,
    /// Folder title.
    pub title: String,
}

/// Request record. Unchanged until 1.3.0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestInfo {
    /// Schema version.
    pub version: SchemaVersion,
    /// Stable identifier.
    pub id: Id,
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

/// Adds an empty `environments` map to collections.
///
/// # Errors
///
/// Returns [`MigrationError::Malformed`] if the record is not a 1.1.0 record.
pub fn migrate(record: Value, ctx: &MigrationContext<'_>) -> Result<MigrationStep, MigrationError> {
    const NEXT: SchemaVersion = SchemaVersion::V1_2_0;

    let record = convert_by_type(
        record,
        ctx,
        |c: CollectionInfo| v1_2_0::CollectionInfo {
            version: NEXT,
            id: c.id,
            title: c.title,
            variables: c.variables,
            environments: EnvironmentMap::new(),
            auth: c.auth,
        },
        |f: FolderInfo| v1_2_0::FolderInfo {
            version: NEXT,
            ..f
        },
        |r: RequestInfo| v1_2_0::RequestInfo {
            version: NEXT,
            ..r
        },
    )?;
    Ok(MigrationStep::pure(record))
}
