//! Schema 1.4.0: folders and requests carry an optional `index`.
//!
//! Secrets still live in `~secrets.bin` and drafts in `~request.json` /
//! `~request-body.txt` next to the primary files.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{MigrationContext, MigrationEffect, MigrationError, MigrationStep, convert_by_type};
use crate::object::ObjectType;
use crate::persistence::{
    AuthorizationInformation, BODY_FILE, DRAFT_DIR, GITIGNORE_FILE, Id, LEGACY_DRAFT_BODY_FILE,
    LEGACY_DRAFT_REQUEST_FILE, LEGACY_SECRETS_FILE, REQUEST_FILE, RequestBody, RequestMethod,
    SECRETS_FILE, SchemaVersion, TrufosHeader, TrufosUrl, gitignore_contents,
};

pub use super::v1_2_0::CollectionInfo;

/// Folder record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderInfo {
    /// Schema version.
    pub version: SchemaVersion,
    /// Stable identifier.
    pub id: Id,
    /// Folder title.
    pub title: String,
    /// Sibling position.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<u32>,
}

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
    /// Sibling position.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<u32>,
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

fn layout_effects(ctx: &MigrationContext<'_>) -> Vec<MigrationEffect> {
    let dir = ctx.dir();
    let mut effects = Vec::new();

    if ctx.object_type == ObjectType::Collection {
        effects.push(MigrationEffect::CreateFileIfMissing {
            path: dir.join(GITIGNORE_FILE),
            contents: gitignore_contents(),
        });
    }

    effects.push(MigrationEffect::MoveIfExists {
        from: dir.join(LEGACY_SECRETS_FILE),
        to: dir.join(SECRETS_FILE),
    });

    if ctx.object_type == ObjectType::Request {
        let draft = dir.join(DRAFT_DIR);
        effects.push(MigrationEffect::MoveIfExists {
            from: dir.join(LEGACY_DRAFT_REQUEST_FILE),
            to: draft.join(REQUEST_FILE),
        });
        effects.push(MigrationEffect::MoveIfExists {
            from: dir.join(LEGACY_DRAFT_BODY_FILE),
            to: draft.join(BODY_FILE),
        });
        // legacy drafts shared the primary secrets file
        effects.push(MigrationEffect::CopyIfExists {
            from: dir.join(SECRETS_FILE),
            to: draft.join(SECRETS_FILE),
            guard: draft.join(REQUEST_FILE),
        });
    }

    effects
}

/// Moves to the 2.0.0 directory layout. Record shapes are unchanged.
///
/// # Errors
///
/// Returns [`MigrationError::Malformed`] if the record is not a 1.4.0 record.
pub fn migrate(record: Value, ctx: &MigrationContext<'_>) -> Result<MigrationStep, MigrationError> {
    const NEXT: SchemaVersion = SchemaVersion::V2_0_0;

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
        |r: RequestInfo| RequestInfo {
            version: NEXT,
            ..r
        },
    )?;
    Ok(MigrationStep {
        record,
        effects: layout_effects(ctx),
    })
}
