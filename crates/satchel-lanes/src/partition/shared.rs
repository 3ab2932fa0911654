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

//! Contains the strategy factoring common dependencies into one shared bundle.

use super::{escalate_dependency, scan_root, tag_dependency, PartitionError, PartitionLane};
use crate::assigner::BundleAssigner;
use crate::classifier::AssetClassifier;
use crate::ownership::OwnershipTracker;
use satchel_core::asset::AssetPath;
use satchel_core::bundle::shared_group_name;
use satchel_core::index::AssetDatabase;
use satchel_core::lane::{Lane, LaneKind, LaneReport, ShareMode};
use satchel_io::SatchelConfig;
use std::collections::{HashMap, HashSet};

/// Gives every root its own bundle and moves dependencies reached from two
/// or more roots of the same directory into `<dir>-share.<ext>`.
#[derive(Debug, Clone, Default)]
pub struct SharedPartitionLane {
    classifier: AssetClassifier,
    assigner: BundleAssigner,
    mode: ShareMode,
}

impl SharedPartitionLane {
    /// Creates the lane from its collaborators.
    pub fn new(classifier: AssetClassifier, assigner: BundleAssigner, mode: ShareMode) -> Self {
        Self {
            classifier,
            assigner,
            mode,
        }
    }

    /// Builds the lane described by the project configuration.
    pub fn from_config(config: &SatchelConfig) -> Self {
        Self::new(
            AssetClassifier::from_config(config),
            BundleAssigner::from_config(config),
            config.share_mode,
        )
    }

    /// The sharing mode used by this lane.
    pub fn mode(&self) -> ShareMode {
        self.mode
    }

    /// Records ownership over the whole directory first, then tags every
    /// dependency once its final owner count is known.
    fn partition_two_pass(
        &self,
        db: &mut dyn AssetDatabase,
        directory: &AssetPath,
        report: &mut LaneReport,
    ) -> Result<(), PartitionError> {
        let roots = db.roots(directory);
        let root_set: HashSet<&AssetPath> = roots.iter().collect();
        let mut tracker = OwnershipTracker::new();
        let mut root_names: HashMap<&AssetPath, String> = HashMap::new();

        for root in &roots {
            let Some(scan) = scan_root(db, root, &self.classifier, &self.assigner, report)? else {
                continue;
            };
            if let Some(name) = scan.name {
                root_names.insert(root, name);
            }
            for dependency in &scan.dependencies {
                if root_set.contains(dependency) {
                    log::debug!("'{dependency}' is a root of '{directory}', keeping its own bundle.");
                    continue;
                }
                if !tracker.record_first_sight(dependency, root) {
                    tracker.record_additional_owner(dependency, root);
                }
            }
            report.roots_processed += 1;
        }

        let share_name = shared_group_name(directory);
        for (dependency, record) in tracker.iter() {
            if record.is_shared() {
                escalate_dependency(db, &self.assigner, dependency, &share_name, report)?;
                continue;
            }
            match root_names.get(record.first_owner()) {
                Some(name) => {
                    tag_dependency(db, &self.assigner, dependency, name, report)?;
                }
                None => report.anonymous_skipped += 1,
            }
        }
        Ok(())
    }

    /// Tags each dependency on first sight and attempts an escalation when a
    /// second root reaches it. An escalation loses to the earlier tag.
    fn partition_compatible(
        &self,
        db: &mut dyn AssetDatabase,
        directory: &AssetPath,
        report: &mut LaneReport,
    ) -> Result<(), PartitionError> {
        let share_name = shared_group_name(directory);
        let mut tracker = OwnershipTracker::new();

        for root in db.roots(directory) {
            let Some(scan) = scan_root(db, &root, &self.classifier, &self.assigner, report)? else {
                continue;
            };
            for dependency in &scan.dependencies {
                if tracker.record_first_sight(dependency, &root) {
                    match &scan.name {
                        Some(name) => {
                            tag_dependency(db, &self.assigner, dependency, name, report)?;
                        }
                        None => report.anonymous_skipped += 1,
                    }
                } else if tracker.record_additional_owner(dependency, &root) {
                    escalate_dependency(db, &self.assigner, dependency, &share_name, report)?;
                }
            }
            report.roots_processed += 1;
        }
        Ok(())
    }
}

impl Lane for SharedPartitionLane {
    fn strategy_name(&self) -> &'static str {
        "Shared"
    }

    fn lane_kind(&self) -> LaneKind {
        LaneKind::Partition
    }
}

impl PartitionLane for SharedPartitionLane {
    fn partition(
        &self,
        db: &mut dyn AssetDatabase,
        directory: &AssetPath,
    ) -> Result<LaneReport, PartitionError> {
        let mut report = LaneReport::new(self.strategy_name(), Some(directory.clone()));
        match self.mode {
            ShareMode::TwoPass => self.partition_two_pass(db, directory, &mut report)?,
            ShareMode::Compatible => self.partition_compatible(db, directory, &mut report)?,
        }
        log::info!("{report}");
        Ok(report)
    }
}
