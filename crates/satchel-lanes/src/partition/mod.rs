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

//! Defines the contract for partition strategies and their shared plumbing.
//!
//! A partition lane walks the roots of one managed directory, resolves and
//! classifies their dependency closures and tags every packable dependency
//! through the [`BundleAssigner`]. Recoverable index errors (an asset without
//! importer handle) are logged and the asset skipped; synchronization
//! failures abort the lane with a [`PartitionError`].

mod independent;
mod shared;

pub use independent::IndependentPartitionLane;
pub use shared::SharedPartitionLane;

use crate::assigner::{Assignment, BundleAssigner};
use crate::classifier::AssetClassifier;
use satchel_core::asset::AssetPath;
use satchel_core::index::{AssetDatabase, DependencyResolver, IndexError};
use satchel_core::lane::{Lane, LaneReport};
use std::collections::HashSet;
use thiserror::Error;

/// An error that aborts a lane.
#[derive(Debug, Error)]
pub enum PartitionError {
    /// The host failed to persist or re-import an asset. The run has to be
    /// restarted from a fresh tag reset.
    #[error("{strategy} lane aborted: {source}")]
    Synchronization {
        /// The lane that was running.
        strategy: &'static str,
        /// The directory or area being processed, if any.
        scope: Option<AssetPath>,
        /// The failure reported by the index.
        #[source]
        source: IndexError,
    },
}

/// The abstract contract for a partition strategy `Lane`.
pub trait PartitionLane: Lane {
    /// Tags the roots of `directory` and their dependencies.
    ///
    /// # Returns
    /// The counters of this execution, or a [`PartitionError`] if the host
    /// could not be kept in sync.
    fn partition(
        &self,
        db: &mut dyn AssetDatabase,
        directory: &AssetPath,
    ) -> Result<LaneReport, PartitionError>;
}

/// Logs and swallows recoverable errors; turns the others into a
/// [`PartitionError`].
pub(crate) fn recover(report: &LaneReport, err: IndexError) -> Result<(), PartitionError> {
    if err.is_recoverable() {
        log::error!("[{}] {err}, skipping.", report.strategy);
        Ok(())
    } else {
        Err(PartitionError::Synchronization {
            strategy: report.strategy,
            scope: report.scope.clone(),
            source: err,
        })
    }
}

pub(crate) fn tally(report: &mut LaneReport, assignment: Assignment) {
    report.bundles_assigned += usize::from(assignment.bundle);
    report.groups_assigned += usize::from(assignment.group);
}

/// Resolves the dependency closure of `root` and keeps the packable entries,
/// each once, in resolution order.
pub fn collect_dependencies<D: DependencyResolver + ?Sized>(
    db: &D,
    root: &AssetPath,
    classifier: &AssetClassifier,
) -> Result<Vec<AssetPath>, IndexError> {
    let closure = db.resolve(root)?;
    log::debug!(
        "{root} dependencies: [{}]",
        closure
            .iter()
            .map(AssetPath::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    );

    let mut seen = HashSet::new();
    Ok(closure
        .into_iter()
        .filter(|path| classifier.is_packable(path, root))
        .filter(|path| seen.insert(path.clone()))
        .collect())
}

/// A root whose own bundle has been handled and whose dependencies are known.
pub(crate) struct RootScan {
    /// The root's display name, `None` if it is anonymous.
    pub name: Option<String>,
    /// The packable dependencies of the root.
    pub dependencies: Vec<AssetPath>,
}

/// Gives `root` its own bundle and collects its packable dependencies.
///
/// Returns `Ok(None)` if the root had to be skipped.
pub(crate) fn scan_root(
    db: &mut dyn AssetDatabase,
    root: &AssetPath,
    classifier: &AssetClassifier,
    assigner: &BundleAssigner,
    report: &mut LaneReport,
) -> Result<Option<RootScan>, PartitionError> {
    let name = match db.display_name(root) {
        Ok(name) => name,
        Err(err) => {
            recover(report, err)?;
            report.roots_skipped += 1;
            return Ok(None);
        }
    };

    match &name {
        Some(name) => match assigner.assign_bundle(db, root, name) {
            Ok(assignment) => tally(report, assignment),
            Err(err) => {
                recover(report, err)?;
                report.roots_skipped += 1;
                return Ok(None);
            }
        },
        None => {
            log::error!("Root '{root}' has no display name; it gets no bundle of its own.");
            report.anonymous_skipped += 1;
        }
    }

    match collect_dependencies(&*db, root, classifier) {
        Ok(dependencies) => Ok(Some(RootScan { name, dependencies })),
        Err(err) => {
            recover(report, err)?;
            report.roots_skipped += 1;
            Ok(None)
        }
    }
}

/// Tags one dependency, absorbing recoverable errors.
///
/// Returns `Ok(None)` if the dependency had to be skipped.
pub(crate) fn tag_dependency(
    db: &mut dyn AssetDatabase,
    assigner: &BundleAssigner,
    dependency: &AssetPath,
    name: &str,
    report: &mut LaneReport,
) -> Result<Option<Assignment>, PartitionError> {
    match assigner.assign_bundle_and_group(db, dependency, name) {
        Ok(assignment) => {
            tally(report, assignment);
            Ok(Some(assignment))
        }
        Err(err) => {
            recover(report, err)?;
            report.unresolved_skipped += 1;
            Ok(None)
        }
    }
}

/// Moves `dependency` into the shared bundle and counts the outcome.
///
/// An escalation only counts when it wrote a tag; one blocked by an earlier
/// tag is counted as suppressed. Skipped dependencies count as neither.
pub(crate) fn escalate_dependency(
    db: &mut dyn AssetDatabase,
    assigner: &BundleAssigner,
    dependency: &AssetPath,
    share_name: &str,
    report: &mut LaneReport,
) -> Result<(), PartitionError> {
    match tag_dependency(db, assigner, dependency, share_name, report)? {
        Some(assignment) if assignment.is_noop() => {
            report.escalations_suppressed += 1;
            log::warn!("'{dependency}' is shared but keeps its earlier tags.");
        }
        Some(_) => report.escalations += 1,
        None => {}
    }
    Ok(())
}
