//! Filesystem primitives the scaffolder is written against.
//!
//! [`LocalStorage`] is the real implementation; tests substitute their own to
//! fail individual stages.

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Component, Path, PathBuf};

use chrono::{DateTime, Utc};

/// Creation and last-access timestamps reported by the filesystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirTimes {
    pub created: DateTime<Utc>,
    pub accessed: DateTime<Utc>,
}

pub trait StorageProvider {
    fn is_directory(&self, path: &Path) -> bool;

    fn is_file(&self, path: &Path) -> bool;

    /// Create `path` and any missing parents.
    fn create_directory(&self, path: &Path) -> io::Result<()>;

    /// Create exactly `path`; fails with `AlreadyExists` when it is present.
    fn create_new_directory(&self, path: &Path) -> io::Result<()>;

    /// Open `path` for writing. Returns `Ok(None)` when the file already
    /// exists and `overwrite` is false.
    fn create_file(&self, path: &Path, overwrite: bool) -> io::Result<Option<File>>;

    fn times(&self, path: &Path) -> io::Result<DirTimes>;
}

/// [`StorageProvider`] over `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorage;

impl StorageProvider for LocalStorage {
    fn is_directory(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn create_directory(&self, path: &Path) -> io::Result<()> {
        fs::create_dir_all(path)
    }

    fn create_new_directory(&self, path: &Path) -> io::Result<()> {
        fs::create_dir(path)
    }

    fn create_file(&self, path: &Path, overwrite: bool) -> io::Result<Option<File>> {
        if overwrite {
            return File::create(path).map(Some);
        }
        match OpenOptions::new().write(true).create_new(true).open(path) {
            Ok(file) => Ok(Some(file)),
            Err(err) if err.kind() == io::ErrorKind::AlreadyExists => Ok(None),
            Err(err) => Err(err),
        }
    }

    fn times(&self, path: &Path) -> io::Result<DirTimes> {
        let meta = fs::metadata(path)?;
        let modified = meta.modified()?;
        // Not every filesystem records birth or access time.
        let created = meta.created().unwrap_or(modified);
        let accessed = meta.accessed().unwrap_or(modified);
        Ok(DirTimes {
            created: created.into(),
            accessed: accessed.into(),
        })
    }
}

/// `path` made absolute against the current directory, with `.` and `..`
/// resolved lexically. Symlinks are not followed.
pub fn absolute(path: &Path) -> PathBuf {
    let joined = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    let mut out = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn create_file_refuses_existing_without_overwrite() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("a.json");
        let mut file = LocalStorage.create_file(&path, false).unwrap().expect("new file");
        file.write_all(b"first").unwrap();
        drop(file);

        assert!(LocalStorage.create_file(&path, false).unwrap().is_none());
        assert_eq!(fs::read_to_string(&path).unwrap(), "first");

        assert!(LocalStorage.create_file(&path, true).unwrap().is_some());
        assert_eq!(fs::read_to_string(&path).unwrap(), "");
    }

    #[test]
    fn create_new_directory_refuses_existing() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("root");
        LocalStorage.create_new_directory(&path).unwrap();
        let err = LocalStorage.create_new_directory(&path).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::AlreadyExists);
    }

    #[test]
    fn absolute_drops_dot_components() {
        let cwd = std::env::current_dir().unwrap();
        assert_eq!(absolute(Path::new(".")), cwd);
        assert_eq!(absolute(Path::new("./a/../b/./Demo")), cwd.join("b").join("Demo"));
        assert!(absolute(Path::new("..")).components().all(|c| c != Component::ParentDir));
    }

    #[cfg(unix)]
    #[test]
    fn absolute_keeps_root_on_excess_parents() {
        assert_eq!(absolute(Path::new("/a/../../b")), PathBuf::from("/b"));
        assert_eq!(absolute(Path::new("/tmp/./x")), PathBuf::from("/tmp/x"));
    }

    #[test]
    fn times_of_fresh_directory() {
        let tmp = TempDir::new().unwrap();
        let before: DateTime<Utc> =
            (std::time::SystemTime::now() - std::time::Duration::from_secs(5)).into();
        let times = LocalStorage.times(tmp.path()).unwrap();
        assert!(times.created >= before);
        assert!(times.accessed >= before);
    }
}
