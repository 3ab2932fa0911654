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

//! # Satchel Core
//!
//! Foundational crate containing the asset types, tag contracts and the
//! interfaces every asset index backend has to provide. It knows nothing about
//! how assets are stored on disk or how they are partitioned into bundles.

#![warn(missing_docs)]

pub mod asset;
pub mod build;
pub mod bundle;
pub mod graph;
pub mod index;
pub mod lane;

pub use asset::{AssetKind, AssetPath, AssetTags, Tag};
pub use bundle::{BundleName, SHARE_SUFFIX};
pub use index::{AssetDatabase, AssetIndex, DependencyResolver, IndexError, RootEnumerator};
