//! Structured request URL and headers.

use serde::{Deserialize, Serialize};

use super::common::default_true;

/// A request URL split into its base and its query parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrufosUrl {
    /// Everything before the `?`. May contain `{{variables}}`.
    pub base: String,

    /// Query parameters in order of appearance.
    #[serde(default)]
    pub query: Vec<TrufosQueryParam>,
}

impl TrufosUrl {
    /// Creates a URL without query parameters.
    #[must_use]
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            query: Vec::new(),
        }
    }

    /// Splits a plain URL string into base and query parameters.
    ///
    /// Splits on the first `?`, then on `&`, then on the first `=` of each
    /// pair. Nothing is decoded or validated, so template placeholders such
    /// as `{{host}}` survive untouched.
    #[must_use]
    pub fn parse_lenient(raw: &str) -> Self {
        let Some((base, query)) = raw.split_once('?') else {
            return Self::new(raw);
        };

        let query = query
            .split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| {
                let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
                TrufosQueryParam::new(key, value)
            })
            .collect();

        Self {
            base: base.to_string(),
            query,
        }
    }
}

/// A single query parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrufosQueryParam {
    /// Parameter name.
    pub key: String,
    /// Parameter value.
    #[serde(default)]
    pub value: String,
    /// Inactive parameters are kept but not sent.
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl TrufosQueryParam {
    /// Creates an active query parameter.
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            is_active: true,
        }
    }
}

/// A single request header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrufosHeader {
    /// Header name.
    pub key: String,
    /// Header value. May contain `{{variables}}`.
    #[serde(default)]
    pub value: String,
    /// Inactive headers are kept but not sent.
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl TrufosHeader {
    /// Creates an active header.
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            is_active: true,
        }
    }
}
