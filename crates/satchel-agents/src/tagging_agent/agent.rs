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

//! The TaggingAgent runs the reset and partition lanes in order.

use anyhow::{Context, Result};
use satchel_core::asset::AssetPath;
use satchel_core::build::BuildRequest;
use satchel_core::index::AssetDatabase;
use satchel_core::lane::{Lane, LaneReport};
use satchel_io::{BundleManifest, SatchelConfig};
use satchel_lanes::{IndependentPartitionLane, PartitionLane, SharedPartitionLane, TagResetLane};

use super::{BuildHandoff, RunSummary};

/// Drives a full packaging run against an [`AssetDatabase`].
///
/// A run is reset, then the independent directory, then each shared
/// directory in configuration order, then a save. A synchronization failure
/// in any lane aborts the run; a fresh run starts with a reset again.
#[derive(Debug, Clone)]
pub struct TaggingAgent {
    reset: TagResetLane,
    independent: IndependentPartitionLane,
    shared: SharedPartitionLane,
    independent_directory: Option<AssetPath>,
    shared_directories: Vec<AssetPath>,
    assets_root: AssetPath,
}

impl TaggingAgent {
    /// Creates an agent configured from `Satchel.toml`.
    pub fn from_config(config: &SatchelConfig) -> Self {
        Self {
            reset: TagResetLane::from_config(config),
            independent: IndependentPartitionLane::from_config(config),
            shared: SharedPartitionLane::from_config(config),
            independent_directory: config.independent_directory.clone(),
            shared_directories: config.shared_directories.clone(),
            assets_root: config.assets_root.clone(),
        }
    }

    /// Clears every tag in the managed areas and saves the index.
    pub fn reset(&self, db: &mut dyn AssetDatabase) -> Result<LaneReport> {
        self.reset
            .reset(db)
            .with_context(|| format!("{} lane failed", self.reset.strategy_name()))
    }

    /// Runs the full pipeline: reset, independent, shared, save.
    pub fn run(&self, db: &mut dyn AssetDatabase) -> Result<RunSummary> {
        log::info!(
            "Starting tagging run: {} reset areas, {} shared directories ({:?}).",
            self.reset.areas().len(),
            self.shared_directories.len(),
            self.shared.mode()
        );
        let mut summary = RunSummary::default();
        summary.reports.push(self.reset(db)?);

        if let Some(directory) = &self.independent_directory {
            summary
                .reports
                .push(self.partition(&self.independent, db, directory)?);
        }
        for directory in &self.shared_directories {
            summary
                .reports
                .push(self.partition(&self.shared, db, directory)?);
        }

        db.save().context("Failed to save the asset index")?;
        log::info!(
            "Tagging run complete: {} tags written, {} skipped.",
            summary.tags_written(),
            summary.skipped()
        );
        Ok(summary)
    }

    /// Collects the bundle manifest of the whole assets root.
    pub fn manifest(&self, db: &dyn AssetDatabase) -> Result<BundleManifest> {
        BundleManifest::collect(db, &self.assets_root)
            .with_context(|| format!("Failed to collect the manifest of '{}'", self.assets_root))
    }

    /// Runs the pipeline and passes its manifest to `handoff`.
    pub fn build(
        &self,
        db: &mut dyn AssetDatabase,
        request: &BuildRequest,
        handoff: &mut dyn BuildHandoff,
    ) -> Result<RunSummary> {
        let summary = self.run(db)?;
        let manifest = self.manifest(db)?;
        log::info!(
            "Handing off {} bundles for {} ({}).",
            manifest.bundle_count(),
            request.platform,
            request.build_options
        );
        handoff
            .hand_off(request, &manifest)
            .context("Build handoff failed")?;
        Ok(summary)
    }

    fn partition(
        &self,
        lane: &dyn PartitionLane,
        db: &mut dyn AssetDatabase,
        directory: &AssetPath,
    ) -> Result<LaneReport> {
        lane.partition(db, directory)
            .with_context(|| format!("{} lane failed over '{directory}'", lane.strategy_name()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use satchel_core::lane::ShareMode;
    use satchel_io::{MemoryAssetIndex, MemoryEntry};

    #[test]
    fn run_saves_after_reset_and_at_the_end() {
        let mut index = MemoryAssetIndex::new();
        index
            .insert(
                "Assets/Bundles/UI/A.prefab",
                MemoryEntry::generic().depends_on(["Assets/Res/x.png"]),
            )
            .insert("Assets/Res/x.png", MemoryEntry::image());

        let agent = TaggingAgent::from_config(&SatchelConfig::default());
        let summary = agent.run(&mut index).unwrap();

        // One save from the reset lane, one at the end of the run.
        assert_eq!(index.save_count(), 2);
        let strategies: Vec<_> = summary.reports.iter().map(|r| r.strategy).collect();
        assert_eq!(strategies, ["TagReset", "Independent", "Shared", "Shared"]);
    }

    #[test]
    fn lanes_follow_the_configuration() {
        let config = SatchelConfig {
            share_mode: ShareMode::Compatible,
            reset_areas: vec![AssetPath::new("Assets/Bundles")],
            ..SatchelConfig::default()
        };
        let agent = TaggingAgent::from_config(&config);
        assert_eq!(agent.shared.mode(), ShareMode::Compatible);
        assert_eq!(agent.reset.areas(), [AssetPath::new("Assets/Bundles")]);
    }

    #[test]
    fn independent_directory_is_optional() {
        let config = SatchelConfig {
            independent_directory: None,
            ..SatchelConfig::default()
        };
        let mut index = MemoryAssetIndex::new();
        let summary = TaggingAgent::from_config(&config).run(&mut index).unwrap();
        assert_eq!(summary.reports.len(), 3);
    }
}
