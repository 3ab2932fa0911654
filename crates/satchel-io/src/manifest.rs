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

//! The bundle manifest: a summary of the tagging decisions of a run.
//!
//! The manifest is what the external bundle compiler consumes. It is written
//! twice: `bundles.ron` for humans and `bundles.bin` (bincode) for tools.

use satchel_core::asset::AssetPath;
use satchel_core::index::{AssetIndex, IndexError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name of the human-readable manifest.
pub const MANIFEST_RON: &str = "bundles.ron";
/// File name of the binary manifest.
pub const MANIFEST_BIN: &str = "bundles.bin";

/// An error raised while writing or reading a manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// The manifest could not be encoded as RON.
    #[error("Failed to serialize the manifest as RON")]
    Ron(#[from] ron::Error),
    /// The manifest could not be encoded as bincode.
    #[error("Failed to serialize the manifest as bincode")]
    Encode(#[from] bincode::error::EncodeError),
    /// The binary manifest is corrupted.
    #[error("Failed to decode the binary manifest")]
    Decode(#[from] bincode::error::DecodeError),
    /// A manifest file could not be written.
    #[error("Failed to write '{path}'")]
    Write {
        /// The file being written.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Bundle identifiers and packing groups mapped to their member assets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundleManifest {
    /// Bundle identifier → assets, sorted by path.
    pub bundles: BTreeMap<String, Vec<AssetPath>>,
    /// Packing group → images, sorted by path.
    pub packing_groups: BTreeMap<String, Vec<AssetPath>>,
}

impl BundleManifest {
    /// Collects the tags of every asset beneath `scope`.
    pub fn collect<I: AssetIndex + ?Sized>(
        index: &I,
        scope: &AssetPath,
    ) -> Result<Self, IndexError> {
        let mut manifest = Self::default();
        for path in index.assets_under(scope) {
            let tags = index.tags(&path)?;
            if let Some(bundle) = tags.bundle.get() {
                manifest
                    .bundles
                    .entry(bundle.to_string())
                    .or_default()
                    .push(path.clone());
            }
            if let Some(group) = tags.packing_group.get() {
                manifest
                    .packing_groups
                    .entry(group.to_string())
                    .or_default()
                    .push(path);
            }
        }
        for members in manifest
            .bundles
            .values_mut()
            .chain(manifest.packing_groups.values_mut())
        {
            members.sort();
        }
        Ok(manifest)
    }

    /// Number of distinct bundles.
    pub fn bundle_count(&self) -> usize {
        self.bundles.len()
    }

    /// Number of tagged assets.
    pub fn asset_count(&self) -> usize {
        self.bundles.values().map(Vec::len).sum()
    }

    /// Returns the bundle an asset was assigned to.
    pub fn bundle_of(&self, path: &AssetPath) -> Option<&str> {
        self.bundles
            .iter()
            .find(|(_, members)| members.contains(path))
            .map(|(bundle, _)| bundle.as_str())
    }

    /// Renders the manifest as pretty RON.
    pub fn to_ron(&self) -> Result<String, ManifestError> {
        let pretty = ron::ser::PrettyConfig::default().indentor("  ".to_string());
        Ok(ron::ser::to_string_pretty(self, pretty)?)
    }

    /// Encodes the manifest with bincode.
    pub fn to_bincode(&self) -> Result<Vec<u8>, ManifestError> {
        let config = bincode::config::standard();
        Ok(bincode::serde::encode_to_vec(self, config)?)
    }

    /// Decodes a manifest previously produced by [`to_bincode`](Self::to_bincode).
    pub fn from_bincode(bytes: &[u8]) -> Result<Self, ManifestError> {
        let config = bincode::config::standard();
        let (manifest, _) = bincode::serde::decode_from_slice(bytes, config)?;
        Ok(manifest)
    }

    /// Writes `bundles.ron` and `bundles.bin` into `dir`, creating it if needed.
    pub fn write_to(&self, dir: &Path) -> Result<(), ManifestError> {
        fs::create_dir_all(dir).map_err(|source| ManifestError::Write {
            path: dir.to_path_buf(),
            source,
        })?;

        let ron_path = dir.join(MANIFEST_RON);
        fs::write(&ron_path, self.to_ron()?).map_err(|source| ManifestError::Write {
            path: ron_path.clone(),
            source,
        })?;

        let bin_path = dir.join(MANIFEST_BIN);
        let encoded = self.to_bincode()?;
        fs::write(&bin_path, &encoded).map_err(|source| ManifestError::Write {
            path: bin_path.clone(),
            source,
        })?;

        log::info!(
            "Wrote {} bundles ({} assets) to '{}' ({:.2} KB).",
            self.bundle_count(),
            self.asset_count(),
            dir.display(),
            encoded.len() as f64 / 1024.0
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{MemoryAssetIndex, MemoryEntry};

    fn tagged_index() -> MemoryAssetIndex {
        let mut index = MemoryAssetIndex::new();
        index
            .insert(
                "Assets/Bundles/UI/A.prefab",
                MemoryEntry::generic().tagged("A.unity3d", ""),
            )
            .insert("Assets/Res/y.png", MemoryEntry::image().tagged("UI-share.unity3d", "UI-share"))
            .insert("Assets/Res/x.png", MemoryEntry::image().tagged("A.unity3d", "A"))
            .insert("Assets/Res/loose.txt", MemoryEntry::generic());
        index
    }

    #[test]
    fn groups_assets_by_tag() {
        let index = tagged_index();
        let manifest = BundleManifest::collect(&index, &AssetPath::new("Assets")).unwrap();

        assert_eq!(manifest.bundle_count(), 2);
        assert_eq!(manifest.asset_count(), 3);
        assert_eq!(
            manifest.bundles["A.unity3d"],
            vec![
                AssetPath::new("Assets/Bundles/UI/A.prefab"),
                AssetPath::new("Assets/Res/x.png"),
            ]
        );
        assert_eq!(manifest.packing_groups["UI-share"], vec![AssetPath::new("Assets/Res/y.png")]);
        assert_eq!(manifest.bundle_of(&AssetPath::new("Assets/Res/loose.txt")), None);
    }

    #[test]
    fn binary_manifest_decodes() {
        let index = tagged_index();
        let manifest = BundleManifest::collect(&index, &AssetPath::new("Assets")).unwrap();
        let bytes = manifest.to_bincode().unwrap();
        assert_eq!(BundleManifest::from_bincode(&bytes).unwrap(), manifest);
    }

    #[test]
    fn writes_both_files() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out");
        BundleManifest::default().write_to(&out).unwrap();
        assert!(out.join(MANIFEST_RON).is_file());
        assert!(out.join(MANIFEST_BIN).is_file());
    }
}
