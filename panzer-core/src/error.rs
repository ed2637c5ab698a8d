//! Error types for panzer-core.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from registry operations.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization error (write/save path).
    #[error("record JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The cache file is gone but the project directory could not be removed.
    #[error("removed registry entry but failed to delete {path}: {source}")]
    PartialDelete {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// No record with this name exists in the cache.
    #[error("no project named '{name}' in {cache_dir}")]
    NotFound { name: String, cache_dir: PathBuf },
}

/// Rejections from [`crate::types::ProjectName::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NameError {
    #[error("Name can't be empty")]
    Empty,

    #[error("Name can't contain only whitespaces")]
    Whitespace,

    #[error("Name can't contain special characters or whitespace.")]
    InvalidCharacters,
}

/// Stage-attributed scaffolding failures. The Display text is user-facing.
#[derive(Debug, Error)]
pub enum ScaffoldError {
    #[error("Location can't be empty")]
    EmptyLocation,

    #[error("This location isn't valid")]
    InvalidLocation { path: PathBuf },

    #[error("The directory already exists")]
    AlreadyExists { path: PathBuf },

    #[error("Failed to create the directory")]
    RootDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to create projectConfig.json")]
    ConfigFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to create directory: {dir}")]
    Subdirectory {
        dir: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to create project")]
    Register(#[source] RegistryError),
}

/// Settings file failures.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Includes file path and line context from serde_yaml.
    #[error("failed to parse settings at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Convenience constructor for [`RegistryError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> RegistryError {
    RegistryError::Io {
        path: path.into(),
        source,
    }
}
