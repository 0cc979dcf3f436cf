//! Authentication blocks attached to collections and requests.
//!
//! The engine never interprets these; it only persists them. Every auth block
//! is routed to the encrypted secrets partition, never to the plaintext info file.

use serde::{Deserialize, Serialize};

/// Authentication configuration.
///
/// The `type` field is used as the discriminator for JSON serialization.
/// All string values may contain `{{variables}}` for dynamic resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum AuthorizationInformation {
    /// Bearer token authentication.
    Bearer {
        /// The bearer token value.
        token: String,
    },

    /// HTTP Basic authentication.
    Basic {
        /// Username for basic auth.
        username: String,
        /// Password for basic auth.
        password: String,
    },

    /// API Key authentication.
    ApiKey {
        /// Header or query parameter name.
        key: String,
        /// The API key value.
        value: String,
        /// Where to send the key.
        location: ApiKeyLocation,
    },

    /// `OAuth2` Client Credentials flow.
    #[serde(rename = "oauth2-client-credentials")]
    OAuth2ClientCredentials {
        /// Token endpoint URL.
        token_url: String,
        /// Client ID.
        client_id: String,
        /// Client secret.
        client_secret: String,
        /// OAuth scopes (space-separated).
        #[serde(default, skip_serializing_if = "Option::is_none")]
        scope: Option<String>,
    },
}

impl AuthorizationInformation {
    /// Creates a bearer token authentication.
    #[must_use]
    pub fn bearer(token: impl Into<String>) -> Self {
        Self::Bearer {
            token: token.into(),
        }
    }

    /// Creates a basic authentication.
    #[must_use]
    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::Basic {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Location for API key authentication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ApiKeyLocation {
    /// Send API key in HTTP header.
    Header,
    /// Send API key in query parameters.
    Query,
}
