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

use super::tag::Tag;
use serde::{Deserialize, Serialize};

/// The packaging tags persisted on an asset's importer metadata.
///
/// Both tags outlive a packaging run; they are only reset by the tag reset
/// pass at the start of the next run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetTags {
    /// The full bundle identifier (`<name>.<ext>`) this asset is packed into.
    pub bundle: Tag,

    /// The sprite packing group. Only meaningful for image assets.
    pub packing_group: Tag,
}

impl AssetTags {
    /// Returns `true` if neither tag is set.
    pub fn is_empty(&self) -> bool {
        !self.bundle.is_set() && !self.packing_group.is_set()
    }
}
