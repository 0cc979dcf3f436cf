//! Request: a single stored HTTP request.

use serde::{Deserialize, Serialize};

use crate::id::generate_id;
use crate::persistence::{
    AuthorizationInformation, Id, RequestBody, RequestInfoFile, RequestMethod, TrufosHeader,
    TrufosUrl,
};

/// A stored HTTP request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrufosRequest {
    /// Stable identifier.
    pub id: Id,

    /// Id of the parent collection or folder. Not persisted.
    pub parent_id: Id,

    /// Human-readable name, also the basis of the directory name.
    pub title: String,

    /// Explicit sibling position. Unindexed items sort last.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<u32>,

    /// Request URL.
    pub url: TrufosUrl,

    /// HTTP method.
    pub method: RequestMethod,

    /// Request headers, in order.
    #[serde(default)]
    pub headers: Vec<TrufosHeader>,

    /// Request body.
    #[serde(default)]
    pub body: RequestBody,

    /// Request-specific authentication.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth: Option<AuthorizationInformation>,

    /// True while the in-memory request differs from its persisted primary
    /// files. Not persisted; derived from the presence of the draft directory.
    #[serde(default)]
    pub draft: bool,
}

impl TrufosRequest {
    /// Creates a GET request with a fresh id and an empty text body.
    #[must_use]
    pub fn new(parent_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: generate_id(),
            parent_id: parent_id.into(),
            title: title.into(),
            index: None,
            url: TrufosUrl::default(),
            method: RequestMethod::Get,
            headers: Vec::new(),
            body: RequestBody::default(),
            auth: None,
            draft: false,
        }
    }

    /// Rebuilds a request from its info file.
    #[must_use]
    pub fn from_info(info: RequestInfoFile, parent_id: impl Into<String>, draft: bool) -> Self {
        Self {
            id: info.id,
            parent_id: parent_id.into(),
            title: info.title,
            index: info.index,
            url: info.url,
            method: info.method,
            headers: info.headers,
            body: info.body,
            auth: info.auth,
            draft,
        }
    }

    /// Sets the URL.
    #[must_use]
    pub fn with_url(mut self, url: TrufosUrl) -> Self {
        self.url = url;
        self
    }

    /// Sets the HTTP method.
    #[must_use]
    pub const fn with_method(mut self, method: RequestMethod) -> Self {
        self.method = method;
        self
    }

    /// Adds a header.
    #[must_use]
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push(TrufosHeader::new(key, value));
        self
    }

    /// Sets the body.
    #[must_use]
    pub fn with_body(mut self, body: RequestBody) -> Self {
        self.body = body;
        self
    }

    /// Sets the request authentication.
    #[must_use]
    pub fn with_auth(mut self, auth: AuthorizationInformation) -> Self {
        self.auth = Some(auth);
        self
    }

    /// Deep-clones this request under a fresh id. The copy is never a draft.
    #[must_use]
    pub fn duplicate(&self) -> Self {
        Self {
            id: generate_id(),
            draft: false,
            ..self.clone()
        }
    }
}
