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

//! Bundle identifiers.

use crate::asset::AssetPath;
use std::fmt;

/// Suffix appended to a managed directory's name to form its shared bundle.
pub const SHARE_SUFFIX: &str = "-share";

/// A logical bundle identifier of the form `<name>.<ext>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BundleName {
    name: String,
    extension: String,
}

impl BundleName {
    /// Creates a bundle name. Returns `None` if `name` is empty, since an
    /// unnamed bundle cannot be addressed.
    pub fn new(name: impl Into<String>, extension: impl AsRef<str>) -> Option<Self> {
        let name = name.into();
        if name.is_empty() {
            return None;
        }
        Some(Self {
            name,
            extension: extension.as_ref().trim_start_matches('.').to_string(),
        })
    }

    /// The base name, which is also used as the packing group.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The extension, without leading dot.
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// The full identifier stored on the asset.
    pub fn identifier(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for BundleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.extension.is_empty() {
            f.write_str(&self.name)
        } else {
            write!(f, "{}.{}", self.name, self.extension)
        }
    }
}

/// Returns `<directoryName>-share` for a managed directory.
pub fn shared_group_name(directory: &AssetPath) -> String {
    format!("{}{}", directory.file_name(), SHARE_SUFFIX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_identifier() {
        let bundle = BundleName::new("Hero", ".unity3d").unwrap();
        assert_eq!(bundle.identifier(), "Hero.unity3d");
        assert_eq!(bundle.name(), "Hero");
    }

    #[test]
    fn rejects_empty_names() {
        assert!(BundleName::new("", "unity3d").is_none());
    }

    #[test]
    fn shared_group_uses_directory_name() {
        let dir = AssetPath::new("Assets/Bundles/UI");
        assert_eq!(shared_group_name(&dir), "UI-share");
    }
}
