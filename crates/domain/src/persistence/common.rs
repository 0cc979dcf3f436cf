//! Common types shared across persistence models.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;

/// An opaque, stable object identifier.
pub type Id = String;

/// Semantic version stamped into every info file.
///
/// Versions compare numerically component by component, so `2.10.0 > 2.9.0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SchemaVersion {
    major: u32,
    minor: u32,
    patch: u32,
}

impl SchemaVersion {
    /// First released layout; records carry no identity.
    pub const V1_0_0: Self = Self::new(1, 0, 0);
    /// Every record gains an `id`.
    pub const V1_1_0: Self = Self::new(1, 1, 0);
    /// Collections gain `environments`.
    pub const V1_2_0: Self = Self::new(1, 2, 0);
    /// Request URLs become structured (base + query parameters).
    pub const V1_3_0: Self = Self::new(1, 3, 0);
    /// Folders and requests gain an optional `index`.
    pub const V1_4_0: Self = Self::new(1, 4, 0);
    /// `.gitignore`, `.secrets.bin` and the `.draft` directory are introduced.
    pub const V2_0_0: Self = Self::new(2, 0, 0);
    /// Legacy `index` values on folders and requests are discarded.
    pub const V2_1_0: Self = Self::new(2, 1, 0);
    /// The multipart form-data body variant is added.
    pub const V2_2_0: Self = Self::new(2, 2, 0);

    /// The version every record is migrated to and written with.
    pub const CURRENT: Self = Self::V2_2_0;

    /// Creates a version from its components.
    #[must_use]
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Returns true if this is the version the app writes.
    #[must_use]
    pub fn is_current(self) -> bool {
        self == Self::CURRENT
    }
}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for SchemaVersion {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.trim().splitn(3, '.');
        let mut next = || -> Result<u32, DomainError> {
            parts
                .next()
                .and_then(|part| part.parse().ok())
                .ok_or_else(|| DomainError::InvalidVersion(s.to_string()))
        };
        let major = next()?;
        let minor = next()?;
        let patch = next()?;
        Ok(Self::new(major, minor, patch))
    }
}

impl Serialize for SchemaVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SchemaVersion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// HTTP methods a request can be stored with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum RequestMethod {
    /// HTTP GET method
    #[default]
    Get,
    /// HTTP POST method
    Post,
    /// HTTP PUT method
    Put,
    /// HTTP PATCH method
    Patch,
    /// HTTP DELETE method
    Delete,
    /// HTTP HEAD method
    Head,
    /// HTTP OPTIONS method
    Options,
    /// HTTP TRACE method
    Trace,
    /// HTTP CONNECT method
    Connect,
}

impl fmt::Display for RequestMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
            Self::Head => "HEAD",
            Self::Options => "OPTIONS",
            Self::Trace => "TRACE",
            Self::Connect => "CONNECT",
        };
        write!(f, "{s}")
    }
}

#[allow(clippy::trivially_copy_pass_by_ref)]
pub(crate) const fn is_false(value: &bool) -> bool {
    !*value
}

pub(crate) const fn default_true() -> bool {
    true
}
