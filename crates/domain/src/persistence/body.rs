//! Request body variants.

use serde::{Deserialize, Serialize};

/// Request body with multiple format support.
///
/// The `type` field is used as the discriminator for JSON serialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum RequestBody {
    /// Text body. The content itself lives in `request-body.txt`; `text` is only
    /// set in memory for content that has not been written out yet.
    Text {
        /// Inline content pending a write to the body file.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        text: Option<String>,
        /// MIME type sent as `Content-Type`.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        mime_type: Option<String>,
    },

    /// Body streamed from a file elsewhere on disk.
    File {
        /// Path of the referenced file.
        file_path: String,
        /// MIME type sent as `Content-Type`.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        mime_type: Option<String>,
    },

    /// Multipart form data (multipart/form-data).
    FormData {
        /// Form fields (text values or file references).
        fields: Vec<FormDataField>,
    },
}

impl RequestBody {
    /// Creates an empty text body.
    #[must_use]
    pub const fn empty_text() -> Self {
        Self::Text {
            text: None,
            mime_type: None,
        }
    }

    /// Creates a text body with inline content.
    #[must_use]
    pub fn text(content: impl Into<String>, mime_type: Option<String>) -> Self {
        Self::Text {
            text: Some(content.into()),
            mime_type,
        }
    }

    /// Creates a body referencing a file.
    #[must_use]
    pub fn file(path: impl Into<String>) -> Self {
        Self::File {
            file_path: path.into(),
            mime_type: None,
        }
    }

    /// Returns true for the text variant.
    #[must_use]
    pub const fn is_text(&self) -> bool {
        matches!(self, Self::Text { .. })
    }

    /// Returns the inline text content, if any.
    #[must_use]
    pub fn inline_text(&self) -> Option<&str> {
        match self {
            Self::Text { text, .. } => text.as_deref(),
            _ => None,
        }
    }

    /// Returns a copy without inline text, as written to the info file.
    #[must_use]
    pub fn without_inline_text(&self) -> Self {
        match self {
            Self::Text { mime_type, .. } => Self::Text {
                text: None,
                mime_type: mime_type.clone(),
            },
            other => other.clone(),
        }
    }
}

impl Default for RequestBody {
    fn default() -> Self {
        Self::empty_text()
    }
}

/// A field in a multipart form-data body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum FormDataField {
    /// Text field.
    Text {
        /// Field name.
        key: String,
        /// Field value. May contain `{{variables}}`.
        value: String,
    },
    /// File field.
    File {
        /// Field name.
        key: String,
        /// Path to the uploaded file.
        file_path: String,
    },
}
