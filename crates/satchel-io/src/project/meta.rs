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

//! The `.meta` sidecar stored next to every asset file.

use satchel_core::asset::{AssetPath, AssetTags, Tag};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;

/// Importer metadata of one asset, persisted as RON in `<asset>.meta`.
///
/// ```ron
/// (
///     name: Some("Hero"),
///     dependencies: ["Assets/Res/Hero/body.png"],
///     bundle: Some("Hero.unity3d"),
///     packing_group: Some("Hero"),
/// )
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetMeta {
    /// Name of the object loaded from the asset. Falls back to the file stem.
    pub name: Option<String>,
    /// Direct references to other assets, project-relative.
    pub dependencies: Vec<AssetPath>,
    /// The bundle identifier.
    pub bundle: Tag,
    /// The packing group (images only).
    pub packing_group: Tag,
}

/// Errors raised while loading or storing a sidecar.
#[derive(Debug, Error)]
pub enum MetaError {
    /// The sidecar could not be read or written.
    #[error("metadata file I/O failed")]
    Io(#[source] io::Error),
    /// The sidecar is not valid RON.
    #[error("metadata file is not valid RON")]
    Parse(#[source] ron::error::SpannedError),
    /// The metadata could not be serialized.
    #[error("metadata could not be serialized")]
    Serialize(#[source] ron::Error),
}

impl AssetMeta {
    /// Reads a sidecar file.
    pub(crate) fn read(path: &Path) -> Result<Self, MetaError> {
        let text = fs::read_to_string(path).map_err(MetaError::Io)?;
        ron::from_str(&text).map_err(MetaError::Parse)
    }

    /// Writes the sidecar file, replacing any previous content.
    pub(crate) fn write(&self, path: &Path) -> Result<(), MetaError> {
        let pretty = ron::ser::PrettyConfig::default().indentor("    ".to_string());
        let text = ron::ser::to_string_pretty(self, pretty).map_err(MetaError::Serialize)?;
        fs::write(path, text).map_err(MetaError::Io)
    }

    /// The tags as seen by the packaging passes.
    pub fn tags(&self) -> AssetTags {
        AssetTags {
            bundle: self.bundle.clone(),
            packing_group: self.packing_group.clone(),
        }
    }
}
