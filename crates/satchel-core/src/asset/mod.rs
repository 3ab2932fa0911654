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

//! Provides the primitive types describing a single asset of the project.
//!
//! An asset is identified by its normalized, forward-slash separated
//! [`AssetPath`]. The only mutable state the packaging pipeline cares about is
//! held in [`AssetTags`]: the bundle identifier and, for images, the packing
//! group consumed by the atlas compiler.

mod metadata;
mod path;
mod tag;

pub use metadata::*;
pub use path::*;
pub use tag::*;

use serde::{Deserialize, Serialize};

/// The importer category of an asset, as reported by the asset index.
///
/// Only image assets carry a packing group; every other asset only has a
/// bundle identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AssetKind {
    /// A texture/sprite that can be packed into an atlas.
    Image,
    /// Any other importable asset (prefabs, scenes, materials, audio...).
    #[default]
    Generic,
}

impl AssetKind {
    /// Returns `true` if assets of this kind carry a packing group.
    pub const fn is_image(self) -> bool {
        matches!(self, AssetKind::Image)
    }
}
