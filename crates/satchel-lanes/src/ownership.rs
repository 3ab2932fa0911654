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

//! Tracks which roots reference which dependencies within one directory.

use satchel_core::asset::AssetPath;
use std::collections::HashMap;

/// The distinct roots referencing one dependency, in discovery order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnershipRecord {
    owners: Vec<AssetPath>,
}

impl OwnershipRecord {
    fn new(first_owner: AssetPath) -> Self {
        Self {
            owners: vec![first_owner],
        }
    }

    /// Every owner, first discoverer first.
    pub fn owners(&self) -> &[AssetPath] {
        &self.owners
    }

    /// The root that discovered the dependency.
    pub fn first_owner(&self) -> &AssetPath {
        &self.owners[0]
    }

    /// Returns `true` if more than one root references the dependency.
    pub fn is_shared(&self) -> bool {
        self.owners.len() > 1
    }
}

/// Maps dependency paths to the set of roots referencing them.
///
/// A tracker is scoped to a single pass over a single managed directory:
/// build a fresh one per directory. Owner sets only ever grow.
#[derive(Debug, Default)]
pub struct OwnershipTracker {
    records: HashMap<AssetPath, OwnershipRecord>,
    discovery_order: Vec<AssetPath>,
}

impl OwnershipTracker {
    /// Creates an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if `dependency` has been seen in this pass.
    pub fn is_tracked(&self, dependency: &AssetPath) -> bool {
        self.records.contains_key(dependency)
    }

    /// Records the first sighting of `dependency`, owned by `root`.
    ///
    /// Returns `false` and leaves the record untouched if the dependency was
    /// already tracked.
    pub fn record_first_sight(&mut self, dependency: &AssetPath, root: &AssetPath) -> bool {
        if self.is_tracked(dependency) {
            return false;
        }
        self.records
            .insert(dependency.clone(), OwnershipRecord::new(root.clone()));
        self.discovery_order.push(dependency.clone());
        true
    }

    /// Adds `root` to the owners of an already tracked `dependency`.
    ///
    /// Returns `true` only if `root` is a new owner, which means the
    /// dependency has to be escalated to the shared bundle. Untracked
    /// dependencies are ignored and yield `false`.
    pub fn record_additional_owner(&mut self, dependency: &AssetPath, root: &AssetPath) -> bool {
        match self.records.get_mut(dependency) {
            Some(record) if !record.owners.contains(root) => {
                record.owners.push(root.clone());
                true
            }
            _ => false,
        }
    }

    /// Returns the record of `dependency`.
    pub fn get(&self, dependency: &AssetPath) -> Option<&OwnershipRecord> {
        self.records.get(dependency)
    }

    /// Iterates over every tracked dependency in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = (&AssetPath, &OwnershipRecord)> {
        self.discovery_order
            .iter()
            .filter_map(|path| self.records.get(path).map(|record| (path, record)))
    }

    /// Number of tracked dependencies.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if nothing has been tracked.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(s: &str) -> AssetPath {
        AssetPath::new(s)
    }

    #[test]
    fn first_sight_creates_single_owner_record() {
        let mut tracker = OwnershipTracker::new();
        assert!(tracker.record_first_sight(&p("y.png"), &p("A.prefab")));
        let record = tracker.get(&p("y.png")).unwrap();
        assert_eq!(record.owners(), &[p("A.prefab")]);
        assert!(!record.is_shared());
        assert!(!tracker.record_first_sight(&p("y.png"), &p("B.prefab")));
    }

    #[test]
    fn additional_owner_is_reported_once() {
        let mut tracker = OwnershipTracker::new();
        tracker.record_first_sight(&p("y.png"), &p("A.prefab"));

        assert!(!tracker.record_additional_owner(&p("y.png"), &p("A.prefab")));
        assert!(tracker.record_additional_owner(&p("y.png"), &p("B.prefab")));
        assert!(!tracker.record_additional_owner(&p("y.png"), &p("B.prefab")));
        assert!(tracker.record_additional_owner(&p("y.png"), &p("C.prefab")));

        let record = tracker.get(&p("y.png")).unwrap();
        assert!(record.is_shared());
        assert_eq!(record.first_owner(), &p("A.prefab"));
        assert_eq!(record.owners().len(), 3);
    }

    #[test]
    fn untracked_dependency_is_not_escalated() {
        let mut tracker = OwnershipTracker::new();
        assert!(!tracker.record_additional_owner(&p("z.png"), &p("A.prefab")));
        assert!(tracker.is_empty());
    }

    #[test]
    fn iterates_in_discovery_order() {
        let mut tracker = OwnershipTracker::new();
        tracker.record_first_sight(&p("b.png"), &p("A.prefab"));
        tracker.record_first_sight(&p("a.png"), &p("A.prefab"));
        tracker.record_first_sight(&p("c.png"), &p("B.prefab"));
        let order: Vec<&str> = tracker.iter().map(|(path, _)| path.as_str()).collect();
        assert_eq!(order, vec!["b.png", "a.png", "c.png"]);
        assert_eq!(tracker.len(), 3);
    }
}
