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

//! An in-memory asset index, used to run the packaging passes without a host.

use satchel_core::asset::{AssetKind, AssetPath, AssetTags};
use satchel_core::graph::transitive_closure;
use satchel_core::index::{AssetIndex, DependencyResolver, IndexError, RootEnumerator};
use std::collections::BTreeMap;

/// How an entry reports its display name.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
enum DisplayName {
    #[default]
    FileStem,
    Named(String),
    Anonymous,
}

/// One asset registered in a [`MemoryAssetIndex`].
#[derive(Debug, Clone, Default)]
pub struct MemoryEntry {
    kind: AssetKind,
    name: DisplayName,
    dependencies: Vec<AssetPath>,
    tags: AssetTags,
}

impl MemoryEntry {
    /// A generic asset named after its file stem.
    pub fn generic() -> Self {
        Self::default()
    }

    /// An image asset named after its file stem.
    pub fn image() -> Self {
        Self {
            kind: AssetKind::Image,
            ..Self::default()
        }
    }

    /// Overrides the display name.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = DisplayName::Named(name.into());
        self
    }

    /// Marks the asset as having no usable display name.
    pub fn anonymous(mut self) -> Self {
        self.name = DisplayName::Anonymous;
        self
    }

    /// Adds direct dependencies.
    pub fn depends_on<I, P>(mut self, dependencies: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<AssetPath>,
    {
        self.dependencies
            .extend(dependencies.into_iter().map(Into::into));
        self
    }

    /// Pre-populates the tags, as if left over from an earlier run.
    pub fn tagged(mut self, bundle: &str, packing_group: &str) -> Self {
        self.tags.bundle.set_if_unset(bundle);
        self.tags.packing_group.set_if_unset(packing_group);
        self
    }
}

/// A [`BTreeMap`]-backed asset index.
///
/// Enumeration orders are lexicographic by path. Re-imports are recorded so
/// tests can assert on them, and a synchronization failure can be injected to
/// exercise the fatal error path.
#[derive(Debug, Clone)]
pub struct MemoryAssetIndex {
    entries: BTreeMap<AssetPath, MemoryEntry>,
    root_extensions: Vec<String>,
    reimported: Vec<AssetPath>,
    saves: usize,
    sync_failure: Option<String>,
}

impl Default for MemoryAssetIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryAssetIndex {
    /// Creates an empty index treating `.prefab` and `.unity` files as roots.
    pub fn new() -> Self {
        Self::with_root_extensions(["prefab", "unity"])
    }

    /// Creates an empty index with custom root extensions.
    pub fn with_root_extensions<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            entries: BTreeMap::new(),
            root_extensions: extensions.into_iter().map(Into::into).collect(),
            reimported: Vec::new(),
            saves: 0,
            sync_failure: None,
        }
    }

    /// Registers or replaces an asset.
    pub fn insert(&mut self, path: impl Into<AssetPath>, entry: MemoryEntry) -> &mut Self {
        self.entries.insert(path.into(), entry);
        self
    }

    /// Removes an asset, leaving dangling references to it in place.
    pub fn remove(&mut self, path: &AssetPath) -> Option<MemoryEntry> {
        self.entries.remove(path)
    }

    /// Makes every following re-import and save fail with `reason`.
    pub fn fail_synchronization(&mut self, reason: impl Into<String>) {
        self.sync_failure = Some(reason.into());
    }

    /// Paths re-imported so far, in order.
    pub fn reimported(&self) -> &[AssetPath] {
        &self.reimported
    }

    /// Number of successful [`AssetIndex::save`] calls.
    pub fn save_count(&self) -> usize {
        self.saves
    }

    /// Returns the current bundle identifier of `path`, if any.
    pub fn bundle_of(&self, path: impl Into<AssetPath>) -> Option<String> {
        let path = path.into();
        self.entries
            .get(&path)
            .and_then(|e| e.tags.bundle.get().map(str::to_string))
    }

    /// Returns the current packing group of `path`, if any.
    pub fn packing_group_of(&self, path: impl Into<AssetPath>) -> Option<String> {
        let path = path.into();
        self.entries
            .get(&path)
            .and_then(|e| e.tags.packing_group.get().map(str::to_string))
    }

    /// Iterates over every asset and its tags.
    pub fn iter_tags(&self) -> impl Iterator<Item = (&AssetPath, &AssetTags)> {
        self.entries.iter().map(|(path, entry)| (path, &entry.tags))
    }

    fn entry_mut(&mut self, path: &AssetPath) -> Result<&mut MemoryEntry, IndexError> {
        self.entries
            .get_mut(path)
            .ok_or_else(|| IndexError::UnknownAsset(path.clone()))
    }

    fn entry(&self, path: &AssetPath) -> Result<&MemoryEntry, IndexError> {
        self.entries
            .get(path)
            .ok_or_else(|| IndexError::UnknownAsset(path.clone()))
    }

    fn check_sync(&self, path: Option<&AssetPath>) -> Result<(), IndexError> {
        match &self.sync_failure {
            Some(reason) => Err(IndexError::Synchronization {
                path: path.cloned(),
                reason: reason.clone(),
            }),
            None => Ok(()),
        }
    }
}

impl AssetIndex for MemoryAssetIndex {
    fn contains(&self, path: &AssetPath) -> bool {
        self.entries.contains_key(path)
    }

    fn kind(&self, path: &AssetPath) -> Result<AssetKind, IndexError> {
        Ok(self.entry(path)?.kind)
    }

    fn display_name(&self, path: &AssetPath) -> Result<Option<String>, IndexError> {
        let name = match &self.entry(path)?.name {
            DisplayName::FileStem => Some(path.file_stem().to_string()),
            DisplayName::Named(name) => Some(name.clone()),
            DisplayName::Anonymous => None,
        };
        Ok(name.filter(|n| !n.is_empty()))
    }

    fn tags(&self, path: &AssetPath) -> Result<AssetTags, IndexError> {
        Ok(self.entry(path)?.tags.clone())
    }

    fn set_bundle_if_unset(&mut self, path: &AssetPath, bundle: &str) -> Result<bool, IndexError> {
        Ok(self.entry_mut(path)?.tags.bundle.set_if_unset(bundle))
    }

    fn set_packing_group_if_unset(
        &mut self,
        path: &AssetPath,
        group: &str,
    ) -> Result<bool, IndexError> {
        Ok(self.entry_mut(path)?.tags.packing_group.set_if_unset(group))
    }

    fn clear_bundle(&mut self, path: &AssetPath) -> Result<bool, IndexError> {
        Ok(self.entry_mut(path)?.tags.bundle.clear())
    }

    fn clear_packing_group(&mut self, path: &AssetPath) -> Result<bool, IndexError> {
        Ok(self.entry_mut(path)?.tags.packing_group.clear())
    }

    fn reimport(&mut self, path: &AssetPath) -> Result<(), IndexError> {
        self.entry(path)?;
        self.check_sync(Some(path))?;
        self.reimported.push(path.clone());
        Ok(())
    }

    fn assets_under(&self, dir: &AssetPath) -> Vec<AssetPath> {
        self.entries
            .keys()
            .filter(|path| path.is_within(dir))
            .cloned()
            .collect()
    }

    fn save(&mut self) -> Result<(), IndexError> {
        self.check_sync(None)?;
        self.saves += 1;
        Ok(())
    }
}

impl DependencyResolver for MemoryAssetIndex {
    fn resolve(&self, path: &AssetPath) -> Result<Vec<AssetPath>, IndexError> {
        self.entry(path)?;
        Ok(transitive_closure(path.clone(), |node| {
            self.entries
                .get(node)
                .map(|entry| entry.dependencies.clone())
                .unwrap_or_default()
        }))
    }
}

impl RootEnumerator for MemoryAssetIndex {
    fn roots(&self, dir: &AssetPath) -> Vec<AssetPath> {
        self.entries
            .keys()
            .filter(|path| path.is_within(dir))
            .filter(|path| path.has_any_extension(&self.root_extensions))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> MemoryAssetIndex {
        let mut index = MemoryAssetIndex::new();
        index
            .insert(
                "Assets/Bundles/UI/A.prefab",
                MemoryEntry::generic().depends_on(["Assets/Res/x.png", "Assets/Res/m.mat"]),
            )
            .insert(
                "Assets/Res/m.mat",
                MemoryEntry::generic().depends_on(["Assets/Res/y.png"]),
            )
            .insert("Assets/Res/x.png", MemoryEntry::image())
            .insert("Assets/Res/y.png", MemoryEntry::image())
            .insert("Assets/Bundles/UI/B.prefab", MemoryEntry::generic().named("Boss"));
        index
    }

    #[test]
    fn resolve_returns_transitive_closure() {
        let index = sample();
        let deps = index.resolve(&"Assets/Bundles/UI/A.prefab".into()).unwrap();
        assert_eq!(deps[0], AssetPath::new("Assets/Bundles/UI/A.prefab"));
        assert_eq!(deps.len(), 4);
        assert!(deps.contains(&AssetPath::new("Assets/Res/y.png")));
    }

    #[test]
    fn resolve_unknown_asset_fails() {
        let index = sample();
        let err = index.resolve(&"Assets/missing.prefab".into()).unwrap_err();
        assert_eq!(err, IndexError::UnknownAsset("Assets/missing.prefab".into()));
    }

    #[test]
    fn dangling_references_stay_in_the_closure() {
        let mut index = sample();
        index.remove(&"Assets/Res/m.mat".into());
        let deps = index.resolve(&"Assets/Bundles/UI/A.prefab".into()).unwrap();
        assert!(deps.contains(&AssetPath::new("Assets/Res/m.mat")));
        assert!(!deps.contains(&AssetPath::new("Assets/Res/y.png")));
    }

    #[test]
    fn roots_are_enumerated_in_path_order() {
        let index = sample();
        let roots = index.roots(&"Assets/Bundles/UI".into());
        assert_eq!(
            roots,
            vec![
                AssetPath::new("Assets/Bundles/UI/A.prefab"),
                AssetPath::new("Assets/Bundles/UI/B.prefab"),
            ]
        );
        assert!(index.roots(&"Assets/Bundles/Unit".into()).is_empty());
    }

    #[test]
    fn roots_follow_configured_extensions() {
        let mut index = MemoryAssetIndex::with_root_extensions(["scene"]);
        index
            .insert("Assets/Levels/Intro.SCENE", MemoryEntry::generic())
            .insert("Assets/Levels/Intro.prefab", MemoryEntry::generic());
        assert_eq!(
            index.roots(&"Assets/Levels".into()),
            vec![AssetPath::new("Assets/Levels/Intro.SCENE")]
        );
    }

    #[test]
    fn display_names() {
        let mut index = sample();
        index.insert("Assets/Res/blank.png", MemoryEntry::image().anonymous());
        assert_eq!(
            index.display_name(&"Assets/Bundles/UI/A.prefab".into()).unwrap(),
            Some("A".to_string())
        );
        assert_eq!(
            index.display_name(&"Assets/Bundles/UI/B.prefab".into()).unwrap(),
            Some("Boss".to_string())
        );
        assert_eq!(index.display_name(&"Assets/Res/blank.png".into()).unwrap(), None);
    }

    #[test]
    fn tags_are_write_once() {
        let mut index = sample();
        let path = AssetPath::new("Assets/Res/x.png");
        assert!(index.set_bundle_if_unset(&path, "A.unity3d").unwrap());
        assert!(!index.set_bundle_if_unset(&path, "B.unity3d").unwrap());
        assert_eq!(index.bundle_of("Assets/Res/x.png").as_deref(), Some("A.unity3d"));
        assert!(index.clear_bundle(&path).unwrap());
        assert_eq!(index.bundle_of("Assets/Res/x.png"), None);
    }

    #[test]
    fn injected_sync_failure() {
        let mut index = sample();
        index.fail_synchronization("host crashed");
        let err = index.reimport(&"Assets/Res/x.png".into()).unwrap_err();
        assert!(!err.is_recoverable());
        assert!(index.save().is_err());
        assert!(index.reimported().is_empty());
    }
}
