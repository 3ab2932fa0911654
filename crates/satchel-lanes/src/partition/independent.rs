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

//! Contains the strategy giving every root a bundle of its own.

use super::{scan_root, tag_dependency, PartitionError, PartitionLane};
use crate::assigner::BundleAssigner;
use crate::classifier::AssetClassifier;
use satchel_core::asset::AssetPath;
use satchel_core::index::AssetDatabase;
use satchel_core::lane::{Lane, LaneKind, LaneReport};
use satchel_io::SatchelConfig;

/// Packs each root with its whole packable closure into `<root name>.<ext>`.
///
/// When two roots share a dependency, the first root processed wins it.
#[derive(Debug, Clone, Default)]
pub struct IndependentPartitionLane {
    classifier: AssetClassifier,
    assigner: BundleAssigner,
}

impl IndependentPartitionLane {
    /// Creates the lane from its two collaborators.
    pub fn new(classifier: AssetClassifier, assigner: BundleAssigner) -> Self {
        Self {
            classifier,
            assigner,
        }
    }

    /// Builds the lane described by the project configuration.
    pub fn from_config(config: &SatchelConfig) -> Self {
        Self::new(
            AssetClassifier::from_config(config),
            BundleAssigner::from_config(config),
        )
    }
}

impl Lane for IndependentPartitionLane {
    fn strategy_name(&self) -> &'static str {
        "Independent"
    }

    fn lane_kind(&self) -> LaneKind {
        LaneKind::Partition
    }
}

impl PartitionLane for IndependentPartitionLane {
    fn partition(
        &self,
        db: &mut dyn AssetDatabase,
        directory: &AssetPath,
    ) -> Result<LaneReport, PartitionError> {
        let mut report = LaneReport::new(self.strategy_name(), Some(directory.clone()));

        for root in db.roots(directory) {
            let Some(scan) = scan_root(db, &root, &self.classifier, &self.assigner, &mut report)?
            else {
                continue;
            };
            // An anonymous root can't name a bundle for its dependencies.
            let Some(name) = scan.name else {
                continue;
            };
            for dependency in &scan.dependencies {
                tag_dependency(db, &self.assigner, dependency, &name, &mut report)?;
            }
            report.roots_processed += 1;
        }

        log::info!("{report}");
        Ok(report)
    }
}
