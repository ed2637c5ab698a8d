//! Domain types for the project registry.
//!
//! All path fields use `PathBuf`; never `&str` or `String` for filesystem paths.
//! Record identity is derived from the name, never stored.

use std::fmt;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::NameError;

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// A validated project name: non-empty, word characters only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProjectName(String);

impl ProjectName {
    /// Validate `raw` the same way the project-creation form does.
    pub fn parse(raw: &str) -> Result<Self, NameError> {
        if raw.is_empty() {
            return Err(NameError::Empty);
        }
        if raw.trim().is_empty() {
            return Err(NameError::Whitespace);
        }
        if !raw.chars().all(|c| c.is_alphanumeric() || c == '_') {
            return Err(NameError::InvalidCharacters);
        }
        Ok(Self(raw.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl AsRef<str> for ProjectName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Lowercase hex SHA-256 of `name`; the storage slot of a record.
pub fn name_hash(name: &str) -> String {
    let mut h = Sha256::new();
    h.update(name.as_bytes());
    hex::encode(h.finalize())
}

// ---------------------------------------------------------------------------
// Domain structs
// ---------------------------------------------------------------------------

/// Persisted metadata for one project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRecord {
    #[serde(default)]
    pub name: String,
    /// Absolute path to the project root on disk. Not checked at write time.
    #[serde(default)]
    pub fullpath: PathBuf,
    pub creation_date: DateTime<Utc>,
    pub update_date: DateTime<Utc>,
}

impl ProjectRecord {
    pub fn new(
        name: impl Into<String>,
        fullpath: impl Into<PathBuf>,
        creation_date: DateTime<Utc>,
        update_date: DateTime<Utc>,
    ) -> Self {
        Self {
            name: name.into(),
            fullpath: fullpath.into(),
            creation_date,
            update_date,
        }
    }

    /// `hex(SHA-256(name))`. Two records with the same name share a slot.
    pub fn id(&self) -> String {
        name_hash(&self.name)
    }

    /// A record without a name cannot be addressed and is skipped on load.
    pub fn is_valid(&self) -> bool {
        !self.name.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
