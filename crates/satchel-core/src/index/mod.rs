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

//! The contracts an asset index backend has to fulfil.
//!
//! The packaging passes never touch the host directly. They talk to an
//! [`AssetDatabase`], which is the combination of three narrow roles:
//!
//! - [`AssetIndex`]: the key-value store of importer metadata, keyed by path.
//! - [`DependencyResolver`]: transitive dependency closures.
//! - [`RootEnumerator`]: the ordered entry points of a managed directory.
//!
//! Tags can only be written through `*_if_unset` operations; overwriting a tag
//! requires clearing it first.

use crate::asset::{AssetKind, AssetPath, AssetTags};
use std::fmt;

/// An error reported by an asset index backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexError {
    /// No importer handle could be obtained for the given path.
    UnknownAsset(AssetPath),
    /// The host failed to persist or re-import an asset. The tags seen by
    /// later queries can no longer be trusted.
    Synchronization {
        /// The asset being synchronized, if the failure is asset-specific.
        path: Option<AssetPath>,
        /// The underlying failure reported by the host.
        reason: String,
    },
}

impl IndexError {
    /// Returns `true` if the pass may skip the asset and continue.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, IndexError::UnknownAsset(_))
    }
}

impl fmt::Display for IndexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexError::UnknownAsset(path) => write!(f, "Unknown asset '{path}'"),
            IndexError::Synchronization {
                path: Some(path),
                reason,
            } => write!(f, "Failed to synchronize '{path}': {reason}"),
            IndexError::Synchronization { path: None, reason } => {
                write!(f, "Asset index synchronization failed: {reason}")
            }
        }
    }
}

impl std::error::Error for IndexError {}

/// The importer metadata store.
pub trait AssetIndex {
    /// Returns `true` if an importer handle exists for `path`.
    fn contains(&self, path: &AssetPath) -> bool;

    /// Returns the importer category of the asset.
    fn kind(&self, path: &AssetPath) -> Result<AssetKind, IndexError>;

    /// Returns the name of the object loaded at `path`.
    ///
    /// `Ok(None)` means the asset exists but is anonymous.
    fn display_name(&self, path: &AssetPath) -> Result<Option<String>, IndexError>;

    /// Returns a snapshot of the asset's current tags.
    fn tags(&self, path: &AssetPath) -> Result<AssetTags, IndexError>;

    /// Writes the bundle identifier if none is set. Returns whether it was written.
    fn set_bundle_if_unset(&mut self, path: &AssetPath, bundle: &str) -> Result<bool, IndexError>;

    /// Writes the packing group if none is set. Returns whether it was written.
    fn set_packing_group_if_unset(
        &mut self,
        path: &AssetPath,
        group: &str,
    ) -> Result<bool, IndexError>;

    /// Clears the bundle identifier. Returns whether a value was removed.
    fn clear_bundle(&mut self, path: &AssetPath) -> Result<bool, IndexError>;

    /// Clears the packing group. Returns whether a value was removed.
    fn clear_packing_group(&mut self, path: &AssetPath) -> Result<bool, IndexError>;

    /// Synchronously re-imports the asset so its current tags take effect
    /// before anything else is queried.
    fn reimport(&mut self, path: &AssetPath) -> Result<(), IndexError>;

    /// Lists every asset at or beneath `dir`, in a stable order.
    fn assets_under(&self, dir: &AssetPath) -> Vec<AssetPath>;

    /// Flushes every pending metadata change to the host.
    fn save(&mut self) -> Result<(), IndexError>;
}

/// Computes dependency closures.
pub trait DependencyResolver {
    /// Returns the transitive dependency closure of `path`, including `path`
    /// itself as the first element.
    ///
    /// Fails with [`IndexError::UnknownAsset`] if `path` is not a known asset.
    fn resolve(&self, path: &AssetPath) -> Result<Vec<AssetPath>, IndexError>;
}

/// Enumerates the roots (prefabs and scenes) of a managed directory.
pub trait RootEnumerator {
    /// Returns the roots beneath `dir`, in processing order.
    fn roots(&self, dir: &AssetPath) -> Vec<AssetPath>;
}

/// Everything the packaging passes need from the host.
pub trait AssetDatabase: AssetIndex + DependencyResolver + RootEnumerator {}

impl<T: AssetIndex + DependencyResolver + RootEnumerator> AssetDatabase for T {}
