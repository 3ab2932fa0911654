// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The `Satchel.toml` project configuration.

use satchel_core::asset::AssetPath;
use satchel_core::lane::ShareMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the configuration file looked up at the project root.
pub const CONFIG_FILE_NAME: &str = "Satchel.toml";

/// An error raised while loading the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file exists but could not be read.
    #[error("Failed to read configuration file at '{path}'")]
    Read {
        /// The configuration file.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The file is not valid TOML for [`SatchelConfig`].
    #[error("Failed to parse TOML from '{path}'")]
    Parse {
        /// The configuration file.
        path: PathBuf,
        /// The underlying parse error.
        #[source]
        source: toml::de::Error,
    },
}

/// Represents the structure of the `Satchel.toml` file.
///
/// Every field is optional; missing fields take the defaults documented on
/// [`SatchelConfig::default`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SatchelConfig {
    /// The project-relative directory that holds every asset.
    pub assets_root: AssetPath,
    /// Areas whose tags are cleared before each run.
    pub reset_areas: Vec<AssetPath>,
    /// The directory partitioned with the independent strategy, if any.
    pub independent_directory: Option<AssetPath>,
    /// Directories partitioned with the shared strategy, in processing order.
    pub shared_directories: Vec<AssetPath>,
    /// Extensions of code modules, which are never bundled.
    pub excluded_extensions: Vec<String>,
    /// Directory name of externally-managed resources, which are never bundled.
    pub external_resource_dir: String,
    /// Extension appended to every bundle name.
    pub bundle_extension: String,
    /// Extensions of root assets (prefabs and scenes).
    pub root_extensions: Vec<String>,
    /// Extensions imported as images.
    pub image_extensions: Vec<String>,
    /// How the shared strategy escalates multi-owner dependencies.
    pub share_mode: ShareMode,
    /// Where manifests and build requests are written, relative to the project.
    pub output_directory: PathBuf,
}

impl Default for SatchelConfig {
    fn default() -> Self {
        Self {
            assets_root: AssetPath::new("Assets"),
            reset_areas: vec![
                AssetPath::new("Assets/Bundles"),
                AssetPath::new("Assets/Res"),
            ],
            independent_directory: Some(AssetPath::new("Assets/Bundles/Independent")),
            shared_directories: vec![
                AssetPath::new("Assets/Bundles/UI"),
                AssetPath::new("Assets/Bundles/Unit"),
            ],
            excluded_extensions: strings(&["cs", "dll"]),
            external_resource_dir: "Resources".to_string(),
            bundle_extension: "unity3d".to_string(),
            root_extensions: strings(&["prefab", "unity"]),
            image_extensions: strings(&[
                "png", "jpg", "jpeg", "tga", "psd", "bmp", "gif", "tif", "tiff", "exr",
            ]),
            share_mode: ShareMode::default(),
            output_directory: PathBuf::from(".dist/bundles"),
        }
    }
}

impl SatchelConfig {
    /// Loads `Satchel.toml` from `project_root`.
    /// If the file does not exist, it returns the default configuration.
    pub fn load(project_root: &Path) -> Result<Self, ConfigError> {
        let path = project_root.join(CONFIG_FILE_NAME);
        if !path.exists() {
            log::info!(
                "No '{}' found. Using default configuration.",
                path.display()
            );
            return Ok(Self::default());
        }
        Self::load_file(&path)
    }

    /// Loads the configuration from an explicit file.
    pub fn load_file(path: &Path) -> Result<Self, ConfigError> {
        log::info!("Loading configuration from '{}'.", path.display());
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parses the configuration from a TOML string.
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Returns `true` if `path` has one of the configured image extensions.
    pub fn is_image(&self, path: &AssetPath) -> bool {
        path.has_any_extension(&self.image_extensions)
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}
