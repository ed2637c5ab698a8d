//! Panzer core library — project registry, scaffolding, default config, errors.
//!
//! Public API surface:
//! - [`types`] — [`ProjectName`], [`ProjectRecord`] and the name hash
//! - [`config`] — the `projectConfig.json` document
//! - [`registry`] — load / create / save / delete of cached records
//! - [`scaffold`] — new project directory trees
//! - [`storage`] — filesystem seam used by the scaffolder
//! - [`settings`] — `panzer.yaml`

pub mod config;
pub mod error;
pub mod registry;
pub mod scaffold;
pub mod settings;
pub mod storage;
pub mod types;

pub use config::{ImportDirectory, ProjectConfig, SceneEntry};
pub use error::{NameError, RegistryError, ScaffoldError, SettingsError};
pub use registry::{LoadReport, ProjectRegistry, SkipReason, SkippedRecord};
pub use scaffold::{ProjectScaffolder, ScaffoldOutcome};
pub use settings::Settings;
pub use storage::{LocalStorage, StorageProvider};
pub use types::{name_hash, ProjectName, ProjectRecord};
