//! The secrets partition of an info file.
//!
//! Secret variables and every auth block are moved out of the plaintext
//! record into a [`SecretsRecord`], which the store encrypts into
//! `.secrets.bin`. The plaintext record keeps each secret variable's key
//! with an empty value.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use super::{AuthorizationInformation, InfoFile, VariableMap};

/// Value of a single secret variable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecretValue {
    /// The secret content.
    pub value: String,
}

/// Secret variables of one environment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecretEnvironment {
    /// Secret variables keyed by name.
    pub variables: BTreeMap<String, SecretValue>,
}

/// Fields removed from an info file before it is written in plaintext.
///
/// Its JSON shape mirrors the info file, so [`merge_secrets`] restores the
/// original record with a plain deep merge.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecretsRecord {
    /// Secret collection variables.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub variables: BTreeMap<String, SecretValue>,

    /// Secret environment variables keyed by environment name.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub environments: BTreeMap<String, SecretEnvironment>,

    /// Authentication block.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth: Option<AuthorizationInformation>,
}

impl SecretsRecord {
    /// Returns true if nothing secret was extracted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty() && self.environments.is_empty() && self.auth.is_none()
    }
}

fn take_secret_values(variables: &mut VariableMap) -> BTreeMap<String, SecretValue> {
    variables
        .iter_mut()
        .filter(|(_, variable)| variable.secret)
        .map(|(key, variable)| {
            let value = std::mem::take(&mut variable.value);
            (key.clone(), SecretValue { value })
        })
        .collect()
}

/// Moves every secret out of `info` and returns it.
///
/// Folders never carry secrets; for them the returned record is empty.
pub fn split_secrets(info: &mut InfoFile) -> SecretsRecord {
    match info {
        InfoFile::Collection(collection) => {
            let variables = take_secret_values(&mut collection.variables);
            let environments = collection
                .environments
                .iter_mut()
                .filter_map(|(name, environment)| {
                    let variables = take_secret_values(&mut environment.variables);
                    (!variables.is_empty()).then(|| (name.clone(), SecretEnvironment { variables }))
                })
                .collect();
            SecretsRecord {
                variables,
                environments,
                auth: collection.auth.take(),
            }
        }
        InfoFile::Request(request) => SecretsRecord {
            auth: request.auth.take(),
            ..SecretsRecord::default()
        },
        InfoFile::Folder(_) => SecretsRecord::default(),
    }
}

/// Deep-merges a decrypted secrets document into a raw info file record.
///
/// Objects merge key by key; any other value in `secrets` replaces the one
/// in `record`.
pub fn merge_secrets(record: &mut Value, secrets: Value) {
    match (record, secrets) {
        (Value::Object(target), Value::Object(source)) => {
            for (key, value) in source {
                match target.get_mut(&key) {
                    Some(existing) => merge_secrets(existing, value),
                    None => {
                        target.insert(key, value);
                    }
                }
            }
        }
        (target, value) => *target = value,
    }
}
