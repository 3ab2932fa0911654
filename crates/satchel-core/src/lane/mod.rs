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

//! # Lane Abstraction
//!
//! A **Lane** is a swappable processing strategy driven by an agent. The
//! packaging pipeline is made of two families of lanes:
//!
//! - **Reset** lanes, which clear the tags of the managed areas before a run.
//! - **Partition** lanes, which decide the bundle of every asset reachable
//!   from the roots of one managed directory.
//!
//! Every lane execution yields a [`LaneReport`] so the agent can summarize
//! the run.

use crate::asset::AssetPath;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Classification of lane types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LaneKind {
    /// Clears tags before partitioning.
    Reset,
    /// Assigns bundles and packing groups.
    Partition,
}

impl fmt::Display for LaneKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LaneKind::Reset => write!(f, "Reset"),
            LaneKind::Partition => write!(f, "Partition"),
        }
    }
}

/// The common interface shared by all lanes.
pub trait Lane {
    /// Human-readable name of the strategy, used in logs and reports.
    fn strategy_name(&self) -> &'static str;

    /// The family this lane belongs to.
    fn lane_kind(&self) -> LaneKind;
}

/// How the shared partition lane decides between a root bundle and the
/// directory's shared bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShareMode {
    /// Collect every owner set of the directory first, then tag each
    /// dependency once using the final owner count.
    #[default]
    TwoPass,
    /// Tag while scanning. A dependency tagged for its first owner keeps that
    /// tag even when a second owner shows up later, because the escalation to
    /// the shared bundle is swallowed by the write-once tags.
    Compatible,
}

/// Counters produced by a single lane execution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LaneReport {
    /// The strategy that produced this report.
    pub strategy: &'static str,
    /// The managed directory or reset area the lane ran over.
    pub scope: Option<AssetPath>,
    /// Roots whose dependencies were processed.
    pub roots_processed: usize,
    /// Roots skipped because they could not be resolved.
    pub roots_skipped: usize,
    /// Bundle identifiers written.
    pub bundles_assigned: usize,
    /// Packing groups written.
    pub groups_assigned: usize,
    /// Dependencies that ended up in (or were escalated to) the shared bundle.
    pub escalations: usize,
    /// Escalations that had no effect because the dependency was already tagged.
    pub escalations_suppressed: usize,
    /// Assets skipped because they had no usable display name.
    pub anonymous_skipped: usize,
    /// Assets skipped because no importer handle could be obtained.
    pub unresolved_skipped: usize,
    /// Tags removed by a reset lane.
    pub tags_cleared: usize,
}

impl LaneReport {
    /// Creates an empty report for `strategy` running over `scope`.
    pub fn new(strategy: &'static str, scope: Option<AssetPath>) -> Self {
        Self {
            strategy,
            scope,
            ..Default::default()
        }
    }

    /// Total number of tags written.
    pub fn tags_written(&self) -> usize {
        self.bundles_assigned + self.groups_assigned
    }

    /// Total number of assets or roots skipped.
    pub fn skipped(&self) -> usize {
        self.roots_skipped + self.anonymous_skipped + self.unresolved_skipped
    }
}

impl fmt::Display for LaneReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let scope = self
            .scope
            .as_ref()
            .map(|s| s.as_str())
            .unwrap_or("<all>");
        write!(
            f,
            "[{}] {}: roots={} bundles={} groups={} shared={} cleared={} skipped={}",
            self.strategy,
            scope,
            self.roots_processed,
            self.bundles_assigned,
            self.groups_assigned,
            self.escalations,
            self.tags_cleared,
            self.skipped()
        )
    }
}
