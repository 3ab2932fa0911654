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

use serde::{Deserialize, Serialize};
use std::fmt;

/// A normalized, project-relative asset path.
///
/// Backslashes are converted to forward slashes, repeated separators are
/// collapsed and leading `./` as well as trailing separators are dropped, so
/// two spellings of the same file always compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct AssetPath(String);

impl AssetPath {
    /// Creates a new `AssetPath`, normalizing the separators of `raw`.
    pub fn new(raw: impl AsRef<str>) -> Self {
        let unified = raw.as_ref().replace('\\', "/");
        let normalized = unified
            .split('/')
            .filter(|segment| !segment.is_empty() && *segment != ".")
            .collect::<Vec<_>>()
            .join("/");
        Self(normalized)
    }

    /// Returns the path as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` for the empty path, which denotes the project root.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the `/` separated segments of the path.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/').filter(|segment| !segment.is_empty())
    }

    /// Returns the last segment of the path (file or directory name).
    pub fn file_name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or("")
    }

    /// Returns the file name without its extension.
    pub fn file_stem(&self) -> &str {
        let name = self.file_name();
        match name.rsplit_once('.') {
            Some((stem, _)) if !stem.is_empty() => stem,
            _ => name,
        }
    }

    /// Returns the extension of the file name, without the leading dot.
    pub fn extension(&self) -> Option<&str> {
        match self.file_name().rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => Some(ext),
            _ => None,
        }
    }

    /// Case-insensitive extension check. `ext` may be given with or without
    /// its leading dot.
    pub fn has_extension(&self, ext: &str) -> bool {
        let ext = ext.trim_start_matches('.');
        self.extension()
            .is_some_and(|own| own.eq_ignore_ascii_case(ext))
    }

    /// Returns `true` if the path has any of `extensions`.
    pub fn has_any_extension<S: AsRef<str>>(&self, extensions: &[S]) -> bool {
        extensions.iter().any(|ext| self.has_extension(ext.as_ref()))
    }

    /// Returns `true` if `self` is `dir` itself or lies beneath it.
    ///
    /// The comparison is segment-wise: `Assets/UI2/a.png` is not inside
    /// `Assets/UI`.
    pub fn is_within(&self, dir: &AssetPath) -> bool {
        if dir.is_empty() {
            return true;
        }
        match self.0.strip_prefix(dir.as_str()) {
            Some(rest) => rest.is_empty() || rest.starts_with('/'),
            None => false,
        }
    }

    /// Returns `true` if any directory segment of the path equals `name`.
    ///
    /// The file name itself is not considered.
    pub fn has_directory(&self, name: &str) -> bool {
        let mut segments: Vec<&str> = self.segments().collect();
        segments.pop();
        segments.iter().any(|segment| *segment == name)
    }

    /// Appends `child` to this path.
    pub fn join(&self, child: impl AsRef<str>) -> AssetPath {
        AssetPath::new(format!("{}/{}", self.0, child.as_ref()))
    }
}

impl fmt::Display for AssetPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AssetPath {
    fn from(value: &str) -> Self {
        AssetPath::new(value)
    }
}

impl From<String> for AssetPath {
    fn from(value: String) -> Self {
        AssetPath::new(value)
    }
}

impl From<&AssetPath> for AssetPath {
    fn from(value: &AssetPath) -> Self {
        value.clone()
    }
}

impl From<AssetPath> for String {
    fn from(value: AssetPath) -> Self {
        value.0
    }
}

impl AsRef<str> for AssetPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_separators() {
        let path = AssetPath::new(r"Assets\Bundles//UI\Hero.prefab/");
        assert_eq!(path.as_str(), "Assets/Bundles/UI/Hero.prefab");
        assert_eq!(AssetPath::new("./Assets/a.png"), AssetPath::new("Assets/a.png"));
    }

    #[test]
    fn splits_name_stem_and_extension() {
        let path = AssetPath::new("Assets/Res/Icons/sword.icon.PNG");
        assert_eq!(path.file_name(), "sword.icon.PNG");
        assert_eq!(path.file_stem(), "sword.icon");
        assert_eq!(path.extension(), Some("PNG"));
        assert!(path.has_extension(".png"));
        assert!(!path.has_extension("jpg"));
        assert!(path.has_any_extension(&["jpg", "png"]));
        assert!(!path.has_any_extension::<&str>(&[]));

        let hidden = AssetPath::new("Assets/.keep");
        assert_eq!(hidden.extension(), None);
        assert_eq!(hidden.file_stem(), ".keep");
    }

    #[test]
    fn containment_is_segment_wise() {
        let ui = AssetPath::new("Assets/Bundles/UI");
        assert!(AssetPath::new("Assets/Bundles/UI/A.prefab").is_within(&ui));
        assert!(ui.is_within(&ui));
        assert!(!AssetPath::new("Assets/Bundles/UI2/A.prefab").is_within(&ui));
        assert!(AssetPath::new("anything").is_within(&AssetPath::new("")));
    }

    #[test]
    fn directory_lookup_ignores_file_name() {
        let path = AssetPath::new("Assets/Resources/Config/table.bytes");
        assert!(path.has_directory("Resources"));
        assert!(!AssetPath::new("Assets/Res/Resources").has_directory("Resources"));
        assert!(!AssetPath::new("Assets/MyResources/a.png").has_directory("Resources"));
    }

    #[test]
    fn serializes_as_plain_string() {
        let path = AssetPath::new(r"Assets\UI\a.png");
        let json = serde_json::to_string(&path).unwrap();
        assert_eq!(json, "\"Assets/UI/a.png\"");
        let back: AssetPath = serde_json::from_str("\"Assets\\\\UI\\\\a.png\"").unwrap();
        assert_eq!(back, path);
    }
}
