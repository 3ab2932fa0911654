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

//! The host-backed asset index.
//!
//! A project is a directory tree where every asset file `X` may carry an
//! `X.meta` sidecar holding its importer metadata (see [`AssetMeta`]). The
//! index is loaded once; tag writes stay in memory until the asset is
//! re-imported or the index is saved, at which point the sidecar is rewritten
//! synchronously.

mod meta;

pub use meta::{AssetMeta, MetaError};

use crate::config::SatchelConfig;
use satchel_core::asset::{AssetKind, AssetPath, AssetTags};
use satchel_core::graph::transitive_closure;
use satchel_core::index::{AssetIndex, DependencyResolver, IndexError, RootEnumerator};
use std::collections::{BTreeMap, BTreeSet};
use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

const META_EXTENSION: &str = "meta";

/// An error raised while loading a project.
#[derive(Debug, Error)]
pub enum ProjectError {
    /// The configured assets root does not exist.
    #[error("Assets root '{0}' does not exist")]
    MissingAssetsRoot(PathBuf),
    /// The project tree could not be traversed.
    #[error("Failed to walk the project tree")]
    Walk(#[from] walkdir::Error),
    /// A sidecar could not be loaded.
    #[error("Failed to load metadata file '{path}'")]
    Meta {
        /// The sidecar file.
        path: PathBuf,
        /// What went wrong.
        #[source]
        source: MetaError,
    },
}

#[derive(Debug)]
struct ProjectEntry {
    kind: AssetKind,
    meta: AssetMeta,
    meta_path: PathBuf,
}

/// An [`AssetIndex`] over a project directory with `.meta` sidecars.
#[derive(Debug)]
pub struct ProjectAssetIndex {
    root: PathBuf,
    entries: BTreeMap<AssetPath, ProjectEntry>,
    root_extensions: Vec<String>,
    dirty: BTreeSet<AssetPath>,
}

impl ProjectAssetIndex {
    /// Loads every asset under the configured assets root of `project_root`.
    pub fn open(
        project_root: impl AsRef<Path>,
        config: &SatchelConfig,
    ) -> Result<Self, ProjectError> {
        let root = project_root.as_ref().to_path_buf();
        let assets_dir = root.join(config.assets_root.as_str());
        if !assets_dir.is_dir() {
            return Err(ProjectError::MissingAssetsRoot(assets_dir));
        }

        let mut entries = BTreeMap::new();
        for entry in WalkDir::new(&assets_dir).sort_by_file_name() {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            let file = entry.path();
            if file.extension().is_some_and(|ext| ext == META_EXTENSION) {
                continue;
            }

            let path = relative_asset_path(&root, file);
            let meta_path = sidecar_path(file);
            let meta = if meta_path.is_file() {
                AssetMeta::read(&meta_path).map_err(|source| ProjectError::Meta {
                    path: meta_path.clone(),
                    source,
                })?
            } else {
                AssetMeta::default()
            };
            let kind = if config.is_image(&path) {
                AssetKind::Image
            } else {
                AssetKind::Generic
            };

            entries.insert(
                path,
                ProjectEntry {
                    kind,
                    meta,
                    meta_path,
                },
            );
        }

        log::info!(
            "Loaded {} assets from '{}'.",
            entries.len(),
            assets_dir.display()
        );

        Ok(Self {
            root,
            entries,
            root_extensions: config.root_extensions.clone(),
            dirty: BTreeSet::new(),
        })
    }

    /// The project directory this index was loaded from.
    pub fn project_root(&self) -> &Path {
        &self.root
    }

    /// Number of assets known to the index.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the project holds no assets.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of assets with unsaved tag changes.
    pub fn pending_changes(&self) -> usize {
        self.dirty.len()
    }

    fn entry(&self, path: &AssetPath) -> Result<&ProjectEntry, IndexError> {
        self.entries
            .get(path)
            .ok_or_else(|| IndexError::UnknownAsset(path.clone()))
    }

    fn update<F>(&mut self, path: &AssetPath, mutate: F) -> Result<bool, IndexError>
    where
        F: FnOnce(&mut AssetMeta) -> bool,
    {
        let entry = self
            .entries
            .get_mut(path)
            .ok_or_else(|| IndexError::UnknownAsset(path.clone()))?;
        let changed = mutate(&mut entry.meta);
        if changed {
            self.dirty.insert(path.clone());
        }
        Ok(changed)
    }

    fn flush(&mut self, path: &AssetPath) -> Result<(), IndexError> {
        if !self.dirty.contains(path) {
            return Ok(());
        }
        let entry = self.entry(path)?;
        entry
            .meta
            .write(&entry.meta_path)
            .map_err(|err| {
                let reason = match std::error::Error::source(&err) {
                    Some(cause) => format!("{err}: {cause}"),
                    None => err.to_string(),
                };
                IndexError::Synchronization {
                    path: Some(path.clone()),
                    reason,
                }
            })?;
        log::trace!("Wrote '{}'.", entry.meta_path.display());
        self.dirty.remove(path);
        Ok(())
    }
}

impl AssetIndex for ProjectAssetIndex {
    fn contains(&self, path: &AssetPath) -> bool {
        self.entries.contains_key(path)
    }

    fn kind(&self, path: &AssetPath) -> Result<AssetKind, IndexError> {
        Ok(self.entry(path)?.kind)
    }

    fn display_name(&self, path: &AssetPath) -> Result<Option<String>, IndexError> {
        let entry = self.entry(path)?;
        let name = match &entry.meta.name {
            Some(name) => name.clone(),
            None => path.file_stem().to_string(),
        };
        Ok(Some(name).filter(|n| !n.is_empty()))
    }

    fn tags(&self, path: &AssetPath) -> Result<AssetTags, IndexError> {
        Ok(self.entry(path)?.meta.tags())
    }

    fn set_bundle_if_unset(&mut self, path: &AssetPath, bundle: &str) -> Result<bool, IndexError> {
        self.update(path, |meta| meta.bundle.set_if_unset(bundle))
    }

    fn set_packing_group_if_unset(
        &mut self,
        path: &AssetPath,
        group: &str,
    ) -> Result<bool, IndexError> {
        self.update(path, |meta| meta.packing_group.set_if_unset(group))
    }

    fn clear_bundle(&mut self, path: &AssetPath) -> Result<bool, IndexError> {
        self.update(path, |meta| meta.bundle.clear())
    }

    fn clear_packing_group(&mut self, path: &AssetPath) -> Result<bool, IndexError> {
        self.update(path, |meta| meta.packing_group.clear())
    }

    fn reimport(&mut self, path: &AssetPath) -> Result<(), IndexError> {
        self.entry(path)?;
        self.flush(path)
    }

    fn assets_under(&self, dir: &AssetPath) -> Vec<AssetPath> {
        self.entries
            .keys()
            .filter(|path| path.is_within(dir))
            .cloned()
            .collect()
    }

    fn save(&mut self) -> Result<(), IndexError> {
        let pending: Vec<AssetPath> = self.dirty.iter().cloned().collect();
        for path in &pending {
            self.flush(path)?;
        }
        if !pending.is_empty() {
            log::info!("Saved metadata of {} assets.", pending.len());
        }
        Ok(())
    }
}

impl DependencyResolver for ProjectAssetIndex {
    fn resolve(&self, path: &AssetPath) -> Result<Vec<AssetPath>, IndexError> {
        self.entry(path)?;
        Ok(transitive_closure(path.clone(), |node| {
            match self.entries.get(node) {
                Some(entry) => entry.meta.dependencies.clone(),
                None => {
                    log::warn!("'{node}' is referenced but does not exist in the project.");
                    Vec::new()
                }
            }
        }))
    }
}

impl RootEnumerator for ProjectAssetIndex {
    fn roots(&self, dir: &AssetPath) -> Vec<AssetPath> {
        let roots: Vec<AssetPath> = self
            .entries
            .keys()
            .filter(|path| path.is_within(dir))
            .filter(|path| path.has_any_extension(&self.root_extensions))
            .cloned()
            .collect();
        if roots.is_empty() {
            log::warn!("No roots found under '{dir}'.");
        }
        roots
    }
}

/// Converts a file below `root` into a forward-slash asset path.
fn relative_asset_path(root: &Path, file: &Path) -> AssetPath {
    let relative = file.strip_prefix(root).unwrap_or(file);
    let segments: Vec<String> = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();
    AssetPath::new(segments.join("/"))
}

fn sidecar_path(file: &Path) -> PathBuf {
    let mut os: OsString = file.as_os_str().to_owned();
    os.push(".");
    os.push(META_EXTENSION);
    PathBuf::from(os)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sidecar_is_appended_to_full_file_name() {
        let path = sidecar_path(Path::new("/p/Assets/Res/a.png"));
        assert_eq!(path, PathBuf::from("/p/Assets/Res/a.png.meta"));
    }

    #[test]
    fn relative_paths_use_forward_slashes() {
        let root = Path::new("/p");
        let file = Path::new("/p").join("Assets").join("Res").join("a.png");
        assert_eq!(
            relative_asset_path(root, &file),
            AssetPath::new("Assets/Res/a.png")
        );
    }
}
