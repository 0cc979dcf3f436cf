//! Schema 1.2.0: collections carry named environments.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{MigrationContext, MigrationError, MigrationStep, convert_by_type, v1_3_0};
use crate::persistence::{
    AuthorizationInformation, EnvironmentMap, Id, SchemaVersion, TrufosUrl, VariableMap,
};

pub use super::v1_1_0::{FolderInfo, RequestInfo};

/// Collection record. Unchanged from here on.
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
    /// Named environments.
    #[serde(default)]
    pub environments: EnvironmentMap,
    /// Authentication, merged from the secrets file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth: Option<AuthorizationInformation>,
}

/// Splits request URLs into base and query parameters.
///
/// # Errors
///
/// Returns [`MigrationError::Malformed`] if the record is not a 1.2.0 record.
pub fn migrate(record: Value, ctx: &MigrationContext<'_>) -> Result<MigrationStep, MigrationError> {
    const NEXT: SchemaVersion = SchemaVersion::V1_3_0;

    let record = convert_by_type(
        record,
        ctx,
        |c: CollectionInfo| CollectionInfo {
            version: NEXT,
            ..c
        },
        |f: FolderInfo| FolderInfo {
            version: NEXT,
            ..f
        },
        |r: RequestInfo| v1_3_0::RequestInfo {
            version: NEXT,
            id: r.id,
            title: r.title,
            url: TrufosUrl::parse_lenient(&r.url),
            method: r.method,
            headers: r.headers,
            body: r.body,
            auth: r.auth,
        },
    )?;
    Ok(MigrationStep::pure(record))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::object::ObjectType;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::path::Path;

    #[test]
    fn test_request_url_becomes_structured() {
        let ctx = MigrationContext {
            object_type: ObjectType::Request,
            path: Path::new("/c/r/request.json"),
            version: SchemaVersion::V1_2_0,
        };
        let record = json!({
            "version": "1.2.0", "id": "r1", "title": "Search",
            "url": "{{host}}/search?q=rust&page=2&flag", "method": "GET",
            "headers": [], "body": {"type": "text"}
        });

        let migrated = migrate(record, &ctx).unwrap().record;

        assert_eq!(migrated["version"], "1.3.0");
        assert_eq!(
            migrated["url"],
            json!({
                "base": "{{host}}/search",
                "query": [
                    {"key": "q", "value": "rust", "isActive": true},
                    {"key": "page", "value": "2", "isActive": true},
                    {"key": "flag", "value": "", "isActive": true}
                ]
            })
        );
    }
}
