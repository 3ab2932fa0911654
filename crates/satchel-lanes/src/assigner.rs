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

//! The write-once bundle and packing-group setters.

use satchel_core::asset::AssetPath;
use satchel_core::bundle::BundleName;
use satchel_core::index::{AssetIndex, IndexError};
use satchel_io::SatchelConfig;

/// What an assignment actually wrote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Assignment {
    /// The bundle identifier was written.
    pub bundle: bool,
    /// The packing group was written.
    pub group: bool,
}

impl Assignment {
    /// Returns `true` if nothing was written.
    pub fn is_noop(&self) -> bool {
        !self.bundle && !self.group
    }
}

/// Tags assets with bundle identifiers and packing groups.
///
/// Both setters are first-writer-wins: an asset that already carries a tag
/// keeps it, and an empty name never produces a tag.
#[derive(Debug, Clone)]
pub struct BundleAssigner {
    extension: String,
}

impl BundleAssigner {
    /// Creates an assigner appending `extension` to every bundle name.
    pub fn new(extension: impl Into<String>) -> Self {
        Self {
            extension: extension.into(),
        }
    }

    /// Builds the assigner described by the project configuration.
    pub fn from_config(config: &SatchelConfig) -> Self {
        Self::new(config.bundle_extension.clone())
    }

    /// The full identifier for a bundle named `name`, or `None` for an empty name.
    pub fn bundle_identifier(&self, name: &str) -> Option<String> {
        BundleName::new(name, &self.extension).map(|bundle| bundle.identifier())
    }

    /// Sets the bundle of `path` to `<name>.<ext>` if it has none yet.
    pub fn assign_bundle<I: AssetIndex + ?Sized>(
        &self,
        index: &mut I,
        path: &AssetPath,
        name: &str,
    ) -> Result<Assignment, IndexError> {
        let Some(identifier) = self.bundle_identifier(name) else {
            return Ok(Assignment::default());
        };
        let bundle = index.set_bundle_if_unset(path, &identifier)?;
        if bundle {
            log::trace!("{path} -> bundle '{identifier}'");
        }
        Ok(Assignment {
            bundle,
            group: false,
        })
    }

    /// Like [`assign_bundle`](Self::assign_bundle), and additionally sets the
    /// packing group of image assets to `name` if they have none yet.
    ///
    /// The group is only considered when the bundle was written by this call.
    ///
    /// A written packing group is followed by a synchronous re-import, so every
    /// dependency closure computed afterwards observes the new tag.
    pub fn assign_bundle_and_group<I: AssetIndex + ?Sized>(
        &self,
        index: &mut I,
        path: &AssetPath,
        name: &str,
    ) -> Result<Assignment, IndexError> {
        let mut assignment = self.assign_bundle(index, path, name)?;
        // The group follows the bundle: an asset bundled elsewhere keeps its group.
        if !assignment.bundle || !index.kind(path)?.is_image() {
            return Ok(assignment);
        }

        assignment.group = index.set_packing_group_if_unset(path, name)?;
        if assignment.group {
            log::trace!("{path} -> packing group '{name}'");
            index.reimport(path)?;
        }
        Ok(assignment)
    }
}

impl Default for BundleAssigner {
    fn default() -> Self {
        Self::from_config(&SatchelConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use satchel_io::{MemoryAssetIndex, MemoryEntry};

    fn index() -> MemoryAssetIndex {
        let mut index = MemoryAssetIndex::new();
        index
            .insert("Assets/Res/x.png", MemoryEntry::image())
            .insert("Assets/Res/m.mat", MemoryEntry::generic());
        index
    }

    #[test]
    fn assigns_bundle_with_extension() {
        let mut index = index();
        let assigner = BundleAssigner::new("unity3d");
        let result = assigner
            .assign_bundle(&mut index, &"Assets/Res/m.mat".into(), "Hero")
            .unwrap();
        assert_eq!(result, Assignment { bundle: true, group: false });
        assert_eq!(index.bundle_of("Assets/Res/m.mat").as_deref(), Some("Hero.unity3d"));
    }

    #[test]
    fn first_writer_wins() {
        let mut index = index();
        let assigner = BundleAssigner::default();
        let path = AssetPath::new("Assets/Res/x.png");
        assigner.assign_bundle_and_group(&mut index, &path, "A").unwrap();
        let second = assigner
            .assign_bundle_and_group(&mut index, &path, "UI-share")
            .unwrap();
        assert!(second.is_noop());
        assert_eq!(index.bundle_of(&path).as_deref(), Some("A.unity3d"));
        assert_eq!(index.packing_group_of(&path).as_deref(), Some("A"));
    }

    #[test]
    fn empty_name_is_a_noop() {
        let mut index = index();
        let assigner = BundleAssigner::default();
        let result = assigner
            .assign_bundle_and_group(&mut index, &"Assets/Res/x.png".into(), "")
            .unwrap();
        assert!(result.is_noop());
        assert!(index.reimported().is_empty());
    }

    #[test]
    fn only_images_get_a_group_and_a_reimport() {
        let mut index = index();
        let assigner = BundleAssigner::default();
        let mat = assigner
            .assign_bundle_and_group(&mut index, &"Assets/Res/m.mat".into(), "A")
            .unwrap();
        assert_eq!(mat, Assignment { bundle: true, group: false });
        assert_eq!(index.packing_group_of("Assets/Res/m.mat"), None);

        let png = assigner
            .assign_bundle_and_group(&mut index, &"Assets/Res/x.png".into(), "A")
            .unwrap();
        assert_eq!(png, Assignment { bundle: true, group: true });
        assert_eq!(index.reimported(), &[AssetPath::new("Assets/Res/x.png")]);
    }

    #[test]
    fn group_is_left_alone_when_bundle_was_already_set() {
        let mut index = index();
        index.insert("Assets/Res/x.png", MemoryEntry::image().tagged("Old.unity3d", ""));
        let assigner = BundleAssigner::default();
        let result = assigner
            .assign_bundle_and_group(&mut index, &"Assets/Res/x.png".into(), "A")
            .unwrap();
        assert!(result.is_noop());
        assert_eq!(index.bundle_of("Assets/Res/x.png").as_deref(), Some("Old.unity3d"));
        assert_eq!(index.packing_group_of("Assets/Res/x.png"), None);
        assert!(index.reimported().is_empty());
    }

    #[test]
    fn unknown_asset_is_reported() {
        let mut index = index();
        let assigner = BundleAssigner::default();
        let err = assigner
            .assign_bundle(&mut index, &"Assets/ghost.png".into(), "A")
            .unwrap_err();
        assert!(err.is_recoverable());
    }

    #[test]
    fn failed_reimport_is_fatal() {
        let mut index = index();
        index.fail_synchronization("importer crashed");
        let assigner = BundleAssigner::default();
        let err = assigner
            .assign_bundle_and_group(&mut index, &"Assets/Res/x.png".into(), "A")
            .unwrap_err();
        assert!(!err.is_recoverable());
    }
}
