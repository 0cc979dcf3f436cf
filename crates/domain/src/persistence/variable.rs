//! Collection variables and environments.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::common::is_false;

/// Variables keyed by name. `BTreeMap` keeps serialized key order stable.
pub type VariableMap = BTreeMap<String, VariableObject>;

/// Named environments keyed by environment name.
pub type EnvironmentMap = BTreeMap<String, EnvironmentObject>;

/// A single variable value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableObject {
    /// The value substituted for `{{name}}`.
    #[serde(default)]
    pub value: String,

    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Secret values are stored only in the encrypted secrets file.
    #[serde(default, skip_serializing_if = "is_false")]
    pub secret: bool,
}

impl VariableObject {
    /// Creates a plain variable.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            description: None,
            secret: false,
        }
    }

    /// Creates a secret variable.
    #[must_use]
    pub fn secret(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            description: None,
            secret: true,
        }
    }
}

/// A named set of variables that can be switched as a unit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentObject {
    /// Variables of this environment.
    #[serde(default)]
    pub variables: VariableMap,
}
