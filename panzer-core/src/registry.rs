//! Content-addressed project registry.
//!
//! # Storage layout
//!
//! ```text
//! <cache_dir>/                  (default ./Cache, mode 0700 when created)
//!   <sha256(name)>.pzf          (one JSON record per project)
//! ```
//!
//! Two records with the same name share a slot; the last write wins. The
//! registry does not deduplicate by path and holds no locks: the filesystem
//! is the only synchronization boundary.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tempfile::NamedTempFile;
use thiserror::Error;

use crate::error::{io_err, RegistryError};
use crate::types::{name_hash, ProjectRecord};

/// Extension reserved for registry records (without the dot).
pub const RECORD_EXTENSION: &str = "pzf";

/// Cache directory used when none is configured.
pub const DEFAULT_CACHE_DIR: &str = "./Cache";

// ---------------------------------------------------------------------------
// Load report
// ---------------------------------------------------------------------------

/// Why a cache entry was left out of a [`LoadReport`].
#[derive(Debug, Error)]
pub enum SkipReason {
    #[error("unreadable: {0}")]
    Unreadable(#[source] std::io::Error),

    #[error("malformed record: {0}")]
    Malformed(#[source] serde_json::Error),

    #[error("record has an empty name")]
    Invalid,
}

/// A cache entry that was skipped during [`ProjectRegistry::load`].
#[derive(Debug)]
pub struct SkippedRecord {
    pub path: PathBuf,
    pub reason: SkipReason,
}

/// Result of a best-effort load: every valid record plus every skipped entry.
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Records in filesystem enumeration order (unsorted).
    pub projects: Vec<ProjectRecord>,
    pub skipped: Vec<SkippedRecord>,
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// Durable key-value store of [`ProjectRecord`]s, keyed by name hash.
#[derive(Debug, Clone)]
pub struct ProjectRegistry {
    cache_dir: PathBuf,
}

impl Default for ProjectRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_DIR)
    }
}

impl ProjectRegistry {
    pub fn new(cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            cache_dir: cache_dir.into(),
        }
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// `<cache_dir>/<sha256(name)>.pzf` — pure, no I/O.
    pub fn record_path(&self, name: &str) -> PathBuf {
        self.cache_dir.join(format!("{}.{RECORD_EXTENSION}", name_hash(name)))
    }

    /// Read every `.pzf` record in the cache directory.
    ///
    /// Creates the cache directory if absent. Entries that cannot be read or
    /// parsed, or that parse to a nameless record, are skipped and reported
    /// in [`LoadReport::skipped`] rather than failing the whole load.
    pub fn load(&self) -> Result<LoadReport, RegistryError> {
        self.ensure_cache_dir()?;

        let mut report = LoadReport::default();
        let entries = fs::read_dir(&self.cache_dir).map_err(|e| io_err(&self.cache_dir, e))?;
        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    tracing::warn!(error = %err, "failed to enumerate cache entry");
                    continue;
                }
            };
            let path = entry.path();
            if !is_record_file(&entry, &path) {
                continue;
            }

            match read_record(&path) {
                Ok(record) => report.projects.push(record),
                Err(reason) => {
                    tracing::warn!(path = %path.display(), %reason, "skipping project record");
                    report.skipped.push(SkippedRecord { path, reason });
                }
            }
        }

        tracing::debug!(
            loaded = report.projects.len(),
            skipped = report.skipped.len(),
            cache = %self.cache_dir.display(),
            "loaded project registry"
        );
        Ok(report)
    }

    /// Build a record and write it to its slot, overwriting any previous file.
    pub fn create(
        &self,
        name: &str,
        path: impl Into<PathBuf>,
        creation_date: DateTime<Utc>,
        update_date: DateTime<Utc>,
    ) -> Result<ProjectRecord, RegistryError> {
        let record = ProjectRecord::new(name, path, creation_date, update_date);
        self.save(&record)?;
        Ok(record)
    }

    /// Re-serialize `record` to its slot. No existence check.
    ///
    /// Write flow: serialize → temp file in the cache dir → rename over the slot.
    /// The temp file is created `0600`, so the record keeps that mode.
    pub fn save(&self, record: &ProjectRecord) -> Result<(), RegistryError> {
        self.ensure_cache_dir()?;
        let path = self.record_path(&record.name);

        let json = serde_json::to_vec(record)?;
        let mut tmp =
            NamedTempFile::new_in(&self.cache_dir).map_err(|e| io_err(&self.cache_dir, e))?;
        tmp.write_all(&json).map_err(|e| io_err(tmp.path(), e))?;
        tmp.persist(&path).map_err(|e| io_err(&path, e.error))?;

        tracing::debug!(name = %record.name, path = %path.display(), "saved project record");
        Ok(())
    }

    /// Delete the record's cache file, then the project directory tree.
    ///
    /// Not atomic: if the directory removal fails the registry entry is
    /// already gone and [`RegistryError::PartialDelete`] names the orphan.
    /// A cache file that is already missing is not an error.
    pub fn delete(&self, record: &ProjectRecord) -> Result<(), RegistryError> {
        let path = self.record_path(&record.name);
        match fs::remove_file(&path) {
            Ok(()) => {}
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => return Err(io_err(&path, err)),
        }

        fs::remove_dir_all(&record.fullpath).map_err(|source| RegistryError::PartialDelete {
            path: record.fullpath.clone(),
            source,
        })?;

        tracing::info!(name = %record.name, path = %record.fullpath.display(), "deleted project");
        Ok(())
    }

    /// Look up a loaded record by exact name.
    pub fn find(&self, name: &str) -> Result<ProjectRecord, RegistryError> {
        self.load()?
            .projects
            .into_iter()
            .find(|p| p.name == name)
            .ok_or_else(|| RegistryError::NotFound {
                name: name.to_owned(),
                cache_dir: self.cache_dir.clone(),
            })
    }

    fn ensure_cache_dir(&self) -> Result<(), RegistryError> {
        if !self.cache_dir.is_dir() {
            fs::create_dir_all(&self.cache_dir).map_err(|e| io_err(&self.cache_dir, e))?;
            set_dir_permissions(&self.cache_dir)?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

fn is_record_file(entry: &fs::DirEntry, path: &Path) -> bool {
    entry.file_type().map(|t| t.is_file()).unwrap_or(false)
        && path.extension().and_then(|e| e.to_str()) == Some(RECORD_EXTENSION)
}

fn read_record(path: &Path) -> Result<ProjectRecord, SkipReason> {
    let contents = fs::read_to_string(path).map_err(SkipReason::Unreadable)?;
    let record: ProjectRecord = serde_json::from_str(&contents).map_err(SkipReason::Malformed)?;
    if !record.is_valid() {
        return Err(SkipReason::Invalid);
    }
    Ok(record)
}

#[cfg(unix)]
fn set_dir_permissions(path: &Path) -> Result<(), RegistryError> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o700)).map_err(|e| io_err(path, e))
}
#[cfg(not(unix))]
fn set_dir_permissions(_path: &Path) -> Result<(), RegistryError> {
    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
