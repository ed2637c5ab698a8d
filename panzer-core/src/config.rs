//! Default `projectConfig.json` document written into every new project root.
//!
//! Field names are wire-stable; the external editor reads them.

use serde::{Deserialize, Serialize};

/// File name of the configuration document inside a project root.
pub const CONFIG_FILE_NAME: &str = "projectConfig.json";

/// Fixed parent of every import directory.
pub const IMPORT_PREFIX: &str = "Imported";

pub const DEFAULT_VERSION: &str = "1.0.0";
pub const DEFAULT_WORKING_SPACE: &str = ".";
pub const DEFAULT_SCENE_DIR: &str = "Scenes";
pub const DEFAULT_SCENE_DATA_DIR: &str = "SceneData";
pub const DEFAULT_SCENE_NAME: &str = "Default";
pub const DEFAULT_TEXTURE_DIR: &str = "Textures";
pub const DEFAULT_SOUND_DIR: &str = "Sounds";

/// One entry of `sceneList`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneEntry {
    pub name: String,
    pub is_default: bool,
}

impl Default for SceneEntry {
    fn default() -> Self {
        Self {
            name: DEFAULT_SCENE_NAME.to_owned(),
            is_default: true,
        }
    }
}

/// Import directories, always rooted under [`IMPORT_PREFIX`].
///
/// Only [`ImportDirectory::new`] builds one; parsing rejects values outside the prefix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawImportDirectory")]
pub struct ImportDirectory {
    #[serde(rename = "textureDir")]
    texture_dir: String,
    #[serde(rename = "soundDir")]
    sound_dir: String,
}

impl ImportDirectory {
    /// `new("Textures", "Sounds")` yields `Imported/Textures` and `Imported/Sounds`.
    pub fn new(texture: &str, sound: &str) -> Self {
        Self {
            texture_dir: prefixed(texture),
            sound_dir: prefixed(sound),
        }
    }

    pub fn texture_dir(&self) -> &str {
        &self.texture_dir
    }

    pub fn sound_dir(&self) -> &str {
        &self.sound_dir
    }
}

fn prefixed(value: &str) -> String {
    format!("{IMPORT_PREFIX}/{value}")
}

#[derive(Deserialize)]
struct RawImportDirectory {
    #[serde(rename = "textureDir")]
    texture_dir: String,
    #[serde(rename = "soundDir")]
    sound_dir: String,
}

impl TryFrom<RawImportDirectory> for ImportDirectory {
    type Error = String;

    fn try_from(raw: RawImportDirectory) -> Result<Self, Self::Error> {
        for dir in [&raw.texture_dir, &raw.sound_dir] {
            let under_prefix = dir
                .strip_prefix(IMPORT_PREFIX)
                .and_then(|rest| rest.strip_prefix('/'))
                .is_some_and(|rest| !rest.is_empty());
            if !under_prefix {
                return Err(format!("import directory '{dir}' is not under {IMPORT_PREFIX}/"));
            }
        }
        Ok(Self {
            texture_dir: raw.texture_dir,
            sound_dir: raw.sound_dir,
        })
    }
}

/// The `projectConfig.json` schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectConfig {
    pub project_name: String,
    pub version: String,
    pub working_space: String,
    #[serde(rename = "sceneDir")]
    pub scene_directory: String,
    #[serde(rename = "sceneDataDir")]
    pub scene_data_directory: String,
    #[serde(rename = "defaultImportDir")]
    pub default_import_directory: ImportDirectory,
    pub scene_list: Vec<SceneEntry>,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            project_name: String::new(),
            version: DEFAULT_VERSION.to_owned(),
            working_space: DEFAULT_WORKING_SPACE.to_owned(),
            scene_directory: DEFAULT_SCENE_DIR.to_owned(),
            scene_data_directory: DEFAULT_SCENE_DATA_DIR.to_owned(),
            default_import_directory: ImportDirectory::new(
                DEFAULT_TEXTURE_DIR,
                DEFAULT_SOUND_DIR,
            ),
            scene_list: vec![SceneEntry::default()],
        }
    }
}

impl ProjectConfig {
    /// Defaults for a new project, with `Textures` / `Sounds` import directories.
    pub fn for_project(name: impl Into<String>) -> Self {
        Self {
            project_name: name.into(),
            ..Self::default()
        }
    }

    /// Indented JSON, as written to disk.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }

    /// Subdirectories to create under the project root, in creation order.
    pub fn subdirectories(&self) -> [&str; 4] {
        [
            &self.scene_data_directory,
            &self.scene_directory,
            self.default_import_directory.sound_dir(),
            self.default_import_directory.texture_dir(),
        ]
    }
}
