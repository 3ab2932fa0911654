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

//! The lane wiping every tag in the managed areas before a partition run.

use crate::partition::{recover, PartitionError};
use satchel_core::asset::AssetPath;
use satchel_core::index::{AssetIndex, IndexError};
use satchel_core::lane::{Lane, LaneKind, LaneReport};
use satchel_io::SatchelConfig;

/// Clears bundle identifiers and packing groups under a set of areas, then
/// persists the index.
#[derive(Debug, Clone)]
pub struct TagResetLane {
    areas: Vec<AssetPath>,
}

impl TagResetLane {
    /// Creates a lane clearing everything under `areas`.
    pub fn new<I, P>(areas: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<AssetPath>,
    {
        Self {
            areas: areas.into_iter().map(Into::into).collect(),
        }
    }

    /// Builds the lane described by the project configuration.
    pub fn from_config(config: &SatchelConfig) -> Self {
        Self::new(config.reset_areas.iter().cloned())
    }

    /// The areas this lane clears.
    pub fn areas(&self) -> &[AssetPath] {
        &self.areas
    }

    /// Clears every tag under the configured areas and saves the index.
    ///
    /// Images whose packing group changed are re-imported. A failing re-import
    /// or save aborts the reset.
    pub fn reset<I: AssetIndex + ?Sized>(
        &self,
        index: &mut I,
    ) -> Result<LaneReport, PartitionError> {
        let mut report = LaneReport::new(self.strategy_name(), None);

        for area in &self.areas {
            for path in index.assets_under(area) {
                match clear_asset(index, &path) {
                    Ok(cleared) => report.tags_cleared += cleared,
                    Err(err) => {
                        recover(&report, err)?;
                        report.unresolved_skipped += 1;
                    }
                }
            }
        }

        if let Err(err) = index.save() {
            recover(&report, err)?;
        }

        log::info!("{report}");
        Ok(report)
    }
}

fn clear_asset<I: AssetIndex + ?Sized>(
    index: &mut I,
    path: &AssetPath,
) -> Result<usize, IndexError> {
    let mut cleared = usize::from(index.clear_bundle(path)?);
    if index.kind(path)?.is_image() && index.clear_packing_group(path)? {
        cleared += 1;
        index.reimport(path)?;
    }
    Ok(cleared)
}

impl Lane for TagResetLane {
    fn strategy_name(&self) -> &'static str {
        "TagReset"
    }

    fn lane_kind(&self) -> LaneKind {
        LaneKind::Reset
    }
}

impl Default for TagResetLane {
    fn default() -> Self {
        Self::from_config(&SatchelConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use satchel_io::{MemoryAssetIndex, MemoryEntry};

    fn tagged_project() -> MemoryAssetIndex {
        let mut index = MemoryAssetIndex::new();
        index
            .insert(
                "Assets/Bundles/UI/A.prefab",
                MemoryEntry::generic().tagged("A.unity3d", ""),
            )
            .insert("Assets/Res/x.png", MemoryEntry::image().tagged("A.unity3d", "A"))
            .insert("Assets/Res/m.mat", MemoryEntry::generic().tagged("A.unity3d", ""))
            .insert("Assets/Art/keep.png", MemoryEntry::image().tagged("Art.unity3d", "Art"));
        index
    }

    #[test]
    fn clears_tags_inside_areas_only() {
        let mut index = tagged_project();
        let report = TagResetLane::new(["Assets/Bundles", "Assets/Res"])
            .reset(&mut index)
            .unwrap();

        assert_eq!(index.bundle_of("Assets/Bundles/UI/A.prefab"), None);
        assert_eq!(index.bundle_of("Assets/Res/x.png"), None);
        assert_eq!(index.packing_group_of("Assets/Res/x.png"), None);
        assert_eq!(index.bundle_of("Assets/Res/m.mat"), None);
        assert_eq!(index.bundle_of("Assets/Art/keep.png").as_deref(), Some("Art.unity3d"));
        assert_eq!(report.tags_cleared, 4);
        assert_eq!(index.reimported(), &[AssetPath::new("Assets/Res/x.png")]);
        assert_eq!(index.save_count(), 1);
    }

    #[test]
    fn reset_of_clean_project_still_saves() {
        let mut index = MemoryAssetIndex::new();
        index.insert("Assets/Res/x.png", MemoryEntry::image());
        let report = TagResetLane::default().reset(&mut index).unwrap();
        assert_eq!(report.tags_cleared, 0);
        assert!(index.reimported().is_empty());
        assert_eq!(index.save_count(), 1);
    }

    #[test]
    fn failed_save_aborts() {
        let mut index = MemoryAssetIndex::new();
        index.insert("Assets/Res/m.mat", MemoryEntry::generic().tagged("A.unity3d", ""));
        index.fail_synchronization("read-only project");

        let err = TagResetLane::default().reset(&mut index).unwrap_err();
        assert!(err.to_string().contains("read-only project"));
    }

    #[test]
    fn reports_reset_kind() {
        let lane = TagResetLane::default();
        assert_eq!(lane.lane_kind(), LaneKind::Reset);
        assert_eq!(lane.areas()[0], AssetPath::new("Assets/Bundles"));
    }
}
