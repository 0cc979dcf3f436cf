//! Collection: the root of an object tree.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::CollectionChild;
use crate::id::generate_id;
use crate::persistence::{
    AuthorizationInformation, CollectionInfoFile, EnvironmentMap, EnvironmentObject, Id,
    VariableMap, VariableObject,
};

/// Root of an object tree.
///
/// A collection's directory is chosen by the caller and never derived from
/// its title; renaming a collection does not move it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collection {
    /// Stable identifier.
    pub id: Id,

    /// Human-readable name.
    pub title: String,

    /// Directory holding `collection.json`.
    pub dir_path: PathBuf,

    /// Collection-scoped variables.
    #[serde(default)]
    pub variables: VariableMap,

    /// Named variable sets.
    #[serde(default)]
    pub environments: EnvironmentMap,

    /// Authentication inherited by requests.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth: Option<AuthorizationInformation>,

    /// Top-level folders and requests, in sibling order.
    #[serde(default)]
    pub children: Vec<CollectionChild>,
}

impl Collection {
    /// Creates an empty collection with a fresh id.
    #[must_use]
    pub fn new(dir_path: impl Into<PathBuf>, title: impl Into<String>) -> Self {
        Self {
            id: generate_id(),
            title: title.into(),
            dir_path: dir_path.into(),
            variables: VariableMap::new(),
            environments: EnvironmentMap::new(),
            auth: None,
            children: Vec::new(),
        }
    }

    /// Rebuilds a collection (without children) from its info file.
    #[must_use]
    pub fn from_info(info: CollectionInfoFile, dir_path: &Path) -> Self {
        Self {
            id: info.id,
            title: info.title,
            dir_path: dir_path.to_path_buf(),
            variables: info.variables,
            environments: info.environments,
            auth: info.auth,
            children: Vec::new(),
        }
    }

    /// Adds a collection variable.
    #[must_use]
    pub fn with_variable(mut self, key: impl Into<String>, variable: VariableObject) -> Self {
        self.variables.insert(key.into(), variable);
        self
    }

    /// Adds an environment.
    #[must_use]
    pub fn with_environment(
        mut self,
        name: impl Into<String>,
        environment: EnvironmentObject,
    ) -> Self {
        self.environments.insert(name.into(), environment);
        self
    }

    /// Sets the collection-level authentication.
    #[must_use]
    pub fn with_auth(mut self, auth: AuthorizationInformation) -> Self {
        self.auth = Some(auth);
        self
    }

    /// Appends a child, re-parenting it to this collection.
    #[must_use]
    pub fn with_child(mut self, mut child: CollectionChild) -> Self {
        child.set_parent_id(self.id.clone());
        self.children.push(child);
        self
    }
}
