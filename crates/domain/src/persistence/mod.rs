//! On-disk record types.
//!
//! The `*InfoFile` structs are the canonical current-schema records written
//! to `collection.json`, `folder.json` and `request.json`. Historical record
//! shapes live in [`migration`] and exist only as migration inputs.

mod auth;
mod body;
mod common;
mod info_file;
mod layout;
pub mod migration;
mod secrets;
mod url;
mod variable;

pub use auth::{ApiKeyLocation, AuthorizationInformation};
pub use body::{FormDataField, RequestBody};
pub use common::{Id, RequestMethod, SchemaVersion};
pub use info_file::{CollectionInfoFile, FolderInfoFile, InfoFile, RequestInfoFile};
pub use layout::{
    BODY_FILE, COLLECTION_FILE, DRAFT_DIR, FOLDER_FILE, GITIGNORE_FILE, LEGACY_DRAFT_BODY_FILE,
    LEGACY_DRAFT_REQUEST_FILE, LEGACY_SECRETS_FILE, REQUEST_FILE, SECRETS_FILE,
    gitignore_contents,
};
pub use secrets::{SecretEnvironment, SecretValue, SecretsRecord, merge_secrets, split_secrets};
pub use url::{TrufosHeader, TrufosQueryParam, TrufosUrl};
pub use variable::{EnvironmentMap, EnvironmentObject, VariableMap, VariableObject};
