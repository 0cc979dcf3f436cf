//! Current-schema info file records.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{
    AuthorizationInformation, EnvironmentMap, Id, RequestBody, RequestMethod, SchemaVersion,
    TrufosHeader, TrufosUrl, VariableMap,
};
use crate::error::{DomainError, DomainResult};
use crate::object::{ObjectRef, ObjectType};

/// Persisted form of a collection (`collection.json`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionInfoFile {
    /// Schema version of this record.
    pub version: SchemaVersion,
    /// Stable identifier.
    pub id: Id,
    /// Collection title.
    pub title: String,
    /// Collection variables. Secret values are blanked here.
    pub variables: VariableMap,
    /// Named environments. Secret values are blanked here.
    pub environments: EnvironmentMap,
    /// Collection authentication; only ever present after a secrets merge.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth: Option<AuthorizationInformation>,
}

/// Persisted form of a folder (`folder.json`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderInfoFile {
    /// Schema version of this record.
    pub version: SchemaVersion,
    /// Stable identifier.
    pub id: Id,
    /// Folder title.
    pub title: String,
    /// Explicit sibling position.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<u32>,
}

/// Persisted form of a request (`request.json`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestInfoFile {
    /// Schema version of this record.
    pub version: SchemaVersion,
    /// Stable identifier.
    pub id: Id,
    /// Request title.
    pub title: String,
    /// Explicit sibling position.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<u32>,
    /// Structured URL.
    pub url: TrufosUrl,
    /// HTTP method.
    pub method: RequestMethod,
    /// Request headers.
    #[serde(default)]
    pub headers: Vec<TrufosHeader>,
    /// Body descriptor. Text content lives in the body file.
    pub body: RequestBody,
    /// Request authentication; only ever present after a secrets merge.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth: Option<AuthorizationInformation>,
}

/// A current-schema info file of any object type.
///
/// Info files are not tagged with their type; the type follows from the
/// file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InfoFile {
    /// `collection.json`
    Collection(CollectionInfoFile),
    /// `folder.json`
    Folder(FolderInfoFile),
    /// `request.json`
    Request(RequestInfoFile),
}

impl InfoFile {
    /// Builds the record persisted for an in-memory object.
    ///
    /// Parent ids, children, the draft flag and inline body text are not
    /// part of the record. The current version is stamped.
    #[must_use]
    pub fn from_object(object: ObjectRef<'_>) -> Self {
        match object {
            ObjectRef::Collection(c) => Self::Collection(CollectionInfoFile {
                version: SchemaVersion::CURRENT,
                id: c.id.clone(),
                title: c.title.clone(),
                variables: c.variables.clone(),
                environments: c.environments.clone(),
                auth: c.auth.clone(),
            }),
            ObjectRef::Folder(f) => Self::Folder(FolderInfoFile {
                version: SchemaVersion::CURRENT,
                id: f.id.clone(),
                title: f.title.clone(),
                index: f.index,
            }),
            ObjectRef::Request(r) => Self::Request(RequestInfoFile {
                version: SchemaVersion::CURRENT,
                id: r.id.clone(),
                title: r.title.clone(),
                index: r.index,
                url: r.url.clone(),
                method: r.method,
                headers: r.headers.clone(),
                body: r.body.without_inline_text(),
                auth: r.auth.clone(),
            }),
        }
    }

    /// Parses a migrated JSON record as the current shape of `object_type`
    /// and validates it.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidRecord`] when a required field is
    /// missing, a value has the wrong type or enum tag, or validation fails.
    pub fn from_value(value: Value, object_type: ObjectType) -> DomainResult<Self> {
        let invalid = |e: serde_json::Error| DomainError::InvalidRecord(e.to_string());
        let info = match object_type {
            ObjectType::Collection => Self::Collection(serde_json::from_value(value).map_err(invalid)?),
            ObjectType::Folder => Self::Folder(serde_json::from_value(value).map_err(invalid)?),
            ObjectType::Request => Self::Request(serde_json::from_value(value).map_err(invalid)?),
        };
        info.validate()?;
        Ok(info)
    }

    /// Serializes the record to a JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidRecord`] if serialization fails.
    pub fn to_value(&self) -> DomainResult<Value> {
        let result = match self {
            Self::Collection(info) => serde_json::to_value(info),
            Self::Folder(info) => serde_json::to_value(info),
            Self::Request(info) => serde_json::to_value(info),
        };
        result.map_err(|e| DomainError::InvalidRecord(e.to_string()))
    }

    /// Checks the invariants serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidRecord`] for an empty id or a version
    /// other than the current one.
    pub fn validate(&self) -> DomainResult<()> {
        if self.id().trim().is_empty() {
            return Err(DomainError::InvalidRecord("id must not be empty".to_string()));
        }
        if !self.version().is_current() {
            return Err(DomainError::InvalidRecord(format!(
                "expected version {}, found {}",
                SchemaVersion::CURRENT,
                self.version()
            )));
        }
        Ok(())
    }

    /// Returns the object type this record belongs to.
    #[must_use]
    pub const fn object_type(&self) -> ObjectType {
        match self {
            Self::Collection(_) => ObjectType::Collection,
            Self::Folder(_) => ObjectType::Folder,
            Self::Request(_) => ObjectType::Request,
        }
    }

    /// Returns the record id.
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Collection(info) => &info.id,
            Self::Folder(info) => &info.id,
            Self::Request(info) => &info.id,
        }
    }

    /// Returns the stamped schema version.
    #[must_use]
    pub const fn version(&self) -> SchemaVersion {
        match self {
            Self::Collection(info) => info.version,
            Self::Folder(info) => info.version,
            Self::Request(info) => info.version,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::object::{Collection, TrufosRequest};
    use crate::persistence::VariableObject;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_request_record_strips_volatile_fields() {
        let mut request = TrufosRequest::new("parent", "Get users")
            .with_body(RequestBody::text("{}", Some("application/json".to_string())));
        request.draft = true;

        let value = InfoFile::from_object(ObjectRef::Request(&request))
            .to_value()
            .unwrap();

        assert!(value.get("parentId").is_none());
        assert!(value.get("draft").is_none());
        assert!(value.get("type").is_none());
        assert_eq!(value["version"], "2.2.0");
        assert_eq!(value["body"], json!({"type": "text", "mimeType": "application/json"}));
    }

    #[test]
    fn test_collection_record_has_no_children() {
        let collection = Collection::new("/tmp/c", "API")
            .with_variable("host", VariableObject::new("localhost"));
        let value = InfoFile::from_object(ObjectRef::Collection(&collection))
            .to_value()
            .unwrap();

        assert!(value.get("children").is_none());
        assert!(value.get("dirPath").is_none());
        assert_eq!(value["variables"]["host"]["value"], "localhost");
    }

    #[test]
    fn test_from_value_rejects_missing_required_field() {
        let value = json!({"version": "2.2.0", "id": "x", "title": "t", "variables": {}});
        let err = InfoFile::from_value(value, ObjectType::Collection).unwrap_err();
        assert!(err.to_string().contains("environments"));
    }

    #[test]
    fn test_from_value_rejects_wrong_enum_tag() {
        let value = json!({
            "version": "2.2.0", "id": "x", "title": "t",
            "url": {"base": "", "query": []}, "method": "FETCH",
            "body": {"type": "text"}
        });
        assert!(InfoFile::from_value(value, ObjectType::Request).is_err());
    }

    #[test]
    fn test_from_value_rejects_stale_version_and_empty_id() {
        let stale = json!({"version": "2.1.0", "id": "x", "title": "t"});
        assert!(InfoFile::from_value(stale, ObjectType::Folder).is_err());

        let empty_id = json!({"version": "2.2.0", "id": " ", "title": "t"});
        assert!(InfoFile::from_value(empty_id, ObjectType::Folder).is_err());
    }

    #[test]
    fn test_from_value_accepts_current_folder() {
        let value = json!({"version": "2.2.0", "id": "f1", "title": "Users", "index": 4});
        let info = InfoFile::from_value(value, ObjectType::Folder).unwrap();
        assert_eq!(info.object_type(), ObjectType::Folder);
        assert_eq!(info.id(), "f1");
        match info {
            InfoFile::Folder(folder) => assert_eq!(folder.index, Some(4)),
            _ => panic!("Expected folder record"),
        }
    }
}
