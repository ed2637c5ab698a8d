//! Project scaffolding: directory tree, default config, registry entry.
//!
//! ## `scaffold` — stage order
//!
//! 1. Existence check on `<location>/<name>` (no side effects before it).
//! 2. Create the root directory (exact create; losing a race is `AlreadyExists`).
//! 3. Write `projectConfig.json` (never overwrites) and check it is a file.
//! 4. Create the four subdirectories named by the config.
//! 5. Register the project with the filesystem-reported timestamps.
//!
//! A failure at any stage aborts; earlier stages are not rolled back.

use std::io::{self, Write};
use std::path::Path;

use crate::config::{ProjectConfig, CONFIG_FILE_NAME};
use crate::error::{io_err, ScaffoldError};
use crate::registry::ProjectRegistry;
use crate::storage::{absolute, LocalStorage, StorageProvider};
use crate::types::{ProjectName, ProjectRecord};

/// User-facing message for a completed scaffold.
pub const SUCCESS_MESSAGE: &str = "Configuration completed!";

/// Turns a `(location, name)` pair into a project directory plus a registry entry.
pub struct ProjectScaffolder<'a, S: StorageProvider = LocalStorage> {
    registry: &'a ProjectRegistry,
    storage: &'a S,
}

impl<'a, S: StorageProvider> ProjectScaffolder<'a, S> {
    pub fn new(registry: &'a ProjectRegistry, storage: &'a S) -> Self {
        Self { registry, storage }
    }

    /// Reject an empty location or one that is not an existing directory.
    pub fn validate_location(&self, location: &Path) -> Result<(), ScaffoldError> {
        if location.as_os_str().is_empty() {
            return Err(ScaffoldError::EmptyLocation);
        }
        if !self.storage.is_directory(location) {
            return Err(ScaffoldError::InvalidLocation {
                path: location.to_path_buf(),
            });
        }
        Ok(())
    }

    pub fn scaffold(
        &self,
        location: &Path,
        name: &ProjectName,
    ) -> Result<ProjectRecord, ScaffoldError> {
        let fullpath = absolute(&location.join(name.as_str()));

        if self.storage.is_directory(&fullpath) {
            return Err(ScaffoldError::AlreadyExists { path: fullpath });
        }

        tracing::info!(path = %fullpath.display(), "Creating project directory...");
        self.create_root(&fullpath)?;

        let config = ProjectConfig::for_project(name.as_str());
        tracing::info!("Creating config json file...");
        self.write_config(&fullpath, &config)?;

        for dir in config.subdirectories() {
            tracing::info!("Creating {dir} directory...");
            self.create_verified(&fullpath.join(dir))
                .map_err(|source| ScaffoldError::Subdirectory {
                    dir: dir.to_owned(),
                    source,
                })?;
        }

        let times = self
            .storage
            .times(&fullpath)
            .map_err(|e| ScaffoldError::Register(io_err(&fullpath, e)))?;
        let record = self
            .registry
            .create(name.as_str(), fullpath, times.created, times.accessed)
            .map_err(ScaffoldError::Register)?;

        tracing::info!(name = %record.name, id = %record.id(), "{SUCCESS_MESSAGE}");
        Ok(record)
    }

    /// Exact create, so a directory that appeared after the existence check
    /// is still reported as already existing.
    fn create_root(&self, root: &Path) -> Result<(), ScaffoldError> {
        match self.storage.create_new_directory(root) {
            Ok(()) => {}
            Err(err) if err.kind() == io::ErrorKind::AlreadyExists => {
                return Err(ScaffoldError::AlreadyExists {
                    path: root.to_path_buf(),
                });
            }
            Err(source) => {
                return Err(ScaffoldError::RootDirectory {
                    path: root.to_path_buf(),
                    source,
                });
            }
        }
        if !self.storage.is_directory(root) {
            return Err(ScaffoldError::RootDirectory {
                path: root.to_path_buf(),
                source: missing_after_create(root),
            });
        }
        Ok(())
    }

    fn create_verified(&self, path: &Path) -> io::Result<()> {
        self.storage.create_directory(path)?;
        if !self.storage.is_directory(path) {
            return Err(missing_after_create(path));
        }
        Ok(())
    }

    fn write_config(&self, root: &Path, config: &ProjectConfig) -> Result<(), ScaffoldError> {
        let path = root.join(CONFIG_FILE_NAME);
        let config_err = |source: io::Error| ScaffoldError::ConfigFile {
            path: path.clone(),
            source,
        };

        let mut file = self
            .storage
            .create_file(&path, false)
            .map_err(config_err)?
            .ok_or_else(|| {
                config_err(io::Error::new(
                    io::ErrorKind::AlreadyExists,
                    "config file already exists",
                ))
            })?;
        let json = config.to_json().map_err(|e| config_err(e.into()))?;
        file.write_all(json.as_bytes()).map_err(config_err)?;
        file.flush().map_err(config_err)?;

        if !self.storage.is_file(&path) {
            return Err(config_err(missing_after_create(&path)));
        }
        Ok(())
    }
}

fn missing_after_create(path: &Path) -> io::Error {
    io::Error::new(
        io::ErrorKind::NotFound,
        format!("{} does not exist after creation", path.display()),
    )
}

impl ScaffoldError {
    /// True when the failing stage ran after the root directory was created,
    /// so the filesystem holds an unregistered partial project.
    pub fn leaves_partial_state(&self) -> bool {
        matches!(
            self,
            ScaffoldError::ConfigFile { .. }
                | ScaffoldError::Subdirectory { .. }
                | ScaffoldError::Register(_)
        )
    }
}

/// Success flag, optional record and message, for presentation layers that
/// branch on a flag instead of matching on a `Result`.
#[derive(Debug)]
pub struct ScaffoldOutcome {
    pub success: bool,
    pub project: Option<ProjectRecord>,
    pub message: String,
}

impl From<Result<ProjectRecord, ScaffoldError>> for ScaffoldOutcome {
    fn from(result: Result<ProjectRecord, ScaffoldError>) -> Self {
        match result {
            Ok(project) => Self {
                success: true,
                project: Some(project),
                message: SUCCESS_MESSAGE.to_owned(),
            },
            Err(err) => Self {
                success: false,
                project: None,
                message: err.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::TempDir;

    use crate::storage::DirTimes;

    /// Local storage with individually injectable faults.
    #[derive(Default)]
    struct Faulty {
        refuse_dir: Option<&'static str>,
        config_taken: bool,
        root_race: bool,
    }

    impl Faulty {
        fn refusing(dir: &'static str) -> Self {
            Self {
                refuse_dir: Some(dir),
                ..Self::default()
            }
        }

        fn refuses(&self, path: &Path) -> bool {
            self.refuse_dir.is_some_and(|dir| path.ends_with(dir))
        }
    }

    impl StorageProvider for Faulty {
        fn is_directory(&self, path: &Path) -> bool {
            LocalStorage.is_directory(path)
        }
        fn is_file(&self, path: &Path) -> bool {
            LocalStorage.is_file(path)
        }
        fn create_directory(&self, path: &Path) -> io::Result<()> {
            if self.refuses(path) {
                return Err(io::Error::new(io::ErrorKind::PermissionDenied, "refused"));
            }
            LocalStorage.create_directory(path)
        }
        fn create_new_directory(&self, path: &Path) -> io::Result<()> {
            if self.refuses(path) {
                return Err(io::Error::new(io::ErrorKind::PermissionDenied, "refused"));
            }
            if self.root_race {
                // someone else creates it between the check and our create
                std::fs::create_dir(path)?;
            }
            LocalStorage.create_new_directory(path)
        }
        fn create_file(&self, path: &Path, overwrite: bool) -> io::Result<Option<File>> {
            if self.config_taken {
                return Ok(None);
            }
            LocalStorage.create_file(path, overwrite)
        }
        fn times(&self, path: &Path) -> io::Result<DirTimes> {
            LocalStorage.times(path)
        }
    }

    #[test]
    fn subdirectory_failure_names_the_directory() {
        let tmp = TempDir::new().unwrap();
        let registry = ProjectRegistry::new(tmp.path().join("Cache"));
        let storage = Faulty::refusing("Imported/Sounds");
        let scaffolder = ProjectScaffolder::new(&registry, &storage);

        let name = ProjectName::parse("Demo").unwrap();
        let err = scaffolder.scaffold(tmp.path(), &name).unwrap_err();
        assert_eq!(err.to_string(), "Failed to create directory: Imported/Sounds");
        assert!(err.leaves_partial_state());

        // stages before the failure are kept, later ones never ran
        let root = tmp.path().join("Demo");
        assert!(root.join("projectConfig.json").is_file());
        assert!(root.join("SceneData").is_dir());
        assert!(root.join("Scenes").is_dir());
        assert!(!root.join("Imported/Textures").exists());
        assert!(registry.load().unwrap().projects.is_empty());
    }

    #[test]
    fn root_failure_is_not_partial() {
        let tmp = TempDir::new().unwrap();
        let registry = ProjectRegistry::new(tmp.path().join("Cache"));
        let storage = Faulty::refusing("Demo");
        let scaffolder = ProjectScaffolder::new(&registry, &storage);

        let name = ProjectName::parse("Demo").unwrap();
        let err = scaffolder.scaffold(tmp.path(), &name).unwrap_err();
        assert!(matches!(err, ScaffoldError::RootDirectory { .. }));
        assert_eq!(err.to_string(), "Failed to create the directory");
        assert!(!err.leaves_partial_state());
    }

    #[test]
    fn config_file_failure_stops_before_subdirectories() {
        let tmp = TempDir::new().unwrap();
        let registry = ProjectRegistry::new(tmp.path().join("Cache"));
        let storage = Faulty {
            config_taken: true,
            ..Faulty::default()
        };
        let scaffolder = ProjectScaffolder::new(&registry, &storage);

        let result = scaffolder.scaffold(tmp.path(), &ProjectName::parse("Demo").unwrap());
        let err = result.as_ref().unwrap_err();
        assert!(matches!(err, ScaffoldError::ConfigFile { .. }));
        assert!(err.leaves_partial_state());

        let outcome = ScaffoldOutcome::from(result);
        assert!(!outcome.success);
        assert_eq!(outcome.message, "Failed to create projectConfig.json");

        let root = tmp.path().join("Demo");
        assert!(root.is_dir());
        assert!(!root.join("SceneData").exists());
        assert!(registry.load().unwrap().projects.is_empty());
    }

    #[test]
    fn registry_failure_leaves_full_tree_unregistered() {
        let tmp = TempDir::new().unwrap();
        let cache = tmp.path().join("Cache");
        std::fs::write(&cache, "not a directory").unwrap();
        let registry = ProjectRegistry::new(&cache);
        let scaffolder = ProjectScaffolder::new(&registry, &LocalStorage);

        let err = scaffolder
            .scaffold(tmp.path(), &ProjectName::parse("Demo").unwrap())
            .unwrap_err();
        assert!(matches!(err, ScaffoldError::Register(_)));
        assert_eq!(err.to_string(), "Failed to create project");
        assert!(err.leaves_partial_state());

        let root = tmp.path().join("Demo");
        assert!(root.join("projectConfig.json").is_file());
        assert!(root.join("Imported/Textures").is_dir());
    }

    #[test]
    fn root_appearing_after_check_is_already_exists() {
        let tmp = TempDir::new().unwrap();
        let registry = ProjectRegistry::new(tmp.path().join("Cache"));
        let storage = Faulty {
            root_race: true,
            ..Faulty::default()
        };
        let scaffolder = ProjectScaffolder::new(&registry, &storage);

        let err = scaffolder
            .scaffold(tmp.path(), &ProjectName::parse("Demo").unwrap())
            .unwrap_err();
        assert!(matches!(err, ScaffoldError::AlreadyExists { .. }), "got: {err}");
        assert!(!err.leaves_partial_state());
        assert!(!tmp.path().join("Demo").join("projectConfig.json").exists());
    }

    #[test]
    fn outcome_from_result() {
        let outcome = ScaffoldOutcome::from(Err(ScaffoldError::EmptyLocation));
        assert!(!outcome.success);
        assert!(outcome.project.is_none());
        assert_eq!(outcome.message, "Location can't be empty");
    }

    #[test]
    fn validate_location_rules() {
        let tmp = TempDir::new().unwrap();
        let registry = ProjectRegistry::new(tmp.path().join("Cache"));
        let scaffolder = ProjectScaffolder::new(&registry, &LocalStorage);

        assert!(scaffolder.validate_location(tmp.path()).is_ok());
        assert!(matches!(
            scaffolder.validate_location(Path::new("")),
            Err(ScaffoldError::EmptyLocation)
        ));
        let err = scaffolder
            .validate_location(&tmp.path().join("missing"))
            .unwrap_err();
        assert_eq!(err.to_string(), "This location isn't valid");
    }
}
