//! Launcher settings, read from an optional `panzer.yaml`.
//!
//! ```yaml
//! cache_dir: ./Cache
//! editor_dir: ./Editor
//! editor_name: zEngineEditor
//! ready_after_ms: 2000
//! launch_timeout_secs: 120   # omit for an unbounded wait
//! ```
//!
//! Every field is optional; a missing file means all defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::SettingsError;
use crate::registry::DEFAULT_CACHE_DIR;

pub const SETTINGS_FILE_NAME: &str = "panzer.yaml";
pub const DEFAULT_EDITOR_DIR: &str = "./Editor";
pub const DEFAULT_EDITOR_NAME: &str = "zEngineEditor";
pub const DEFAULT_READY_AFTER_MS: u64 = 2000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub cache_dir: PathBuf,
    /// Editor install directory; also the editor's working directory.
    pub editor_dir: PathBuf,
    /// Executable stem; `.exe` is appended on Windows.
    pub editor_name: String,
    /// How long a spawned editor must stay alive to count as ready.
    pub ready_after_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub launch_timeout_secs: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            cache_dir: PathBuf::from(DEFAULT_CACHE_DIR),
            editor_dir: PathBuf::from(DEFAULT_EDITOR_DIR),
            editor_name: DEFAULT_EDITOR_NAME.to_owned(),
            ready_after_ms: DEFAULT_READY_AFTER_MS,
            launch_timeout_secs: None,
        }
    }
}

impl Settings {
    /// Load `<dir>/panzer.yaml`, falling back to defaults when absent.
    pub fn load_at(dir: &Path) -> Result<Self, SettingsError> {
        Self::load_file(&dir.join(SETTINGS_FILE_NAME))
    }

    pub fn load_file(path: &Path) -> Result<Self, SettingsError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_yaml::from_str(&contents).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// `<editor_dir>/<editor_name>[.exe]`
    pub fn editor_executable(&self) -> PathBuf {
        self.editor_dir
            .join(format!("{}{}", self.editor_name, std::env::consts::EXE_SUFFIX))
    }

    pub fn ready_after(&self) -> Duration {
        Duration::from_millis(self.ready_after_ms)
    }

    pub fn launch_timeout(&self) -> Option<Duration> {
        self.launch_timeout_secs.map(Duration::from_secs)
    }
}
