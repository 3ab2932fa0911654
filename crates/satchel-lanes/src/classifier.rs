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

//! Decides which entries of a dependency closure may be bundled.

use satchel_core::asset::AssetPath;
use satchel_io::SatchelConfig;

/// Why an asset was left out of a bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exclusion {
    /// The asset is a code module.
    CodeModule,
    /// The asset lives in an externally-managed resource directory and is
    /// loaded by path, never through a bundle.
    ExternalResource,
    /// The asset is the root currently being processed.
    SelfReference,
}

/// Filters dependency closures down to packable assets.
#[derive(Debug, Clone)]
pub struct AssetClassifier {
    excluded_extensions: Vec<String>,
    external_resource_dir: String,
}

impl AssetClassifier {
    /// Creates a classifier.
    pub fn new<I, S>(excluded_extensions: I, external_resource_dir: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            excluded_extensions: excluded_extensions.into_iter().map(Into::into).collect(),
            external_resource_dir: external_resource_dir.into(),
        }
    }

    /// Builds the classifier described by the project configuration.
    pub fn from_config(config: &SatchelConfig) -> Self {
        Self::new(
            config.excluded_extensions.iter().cloned(),
            config.external_resource_dir.clone(),
        )
    }

    /// Returns the reason `path` must not be bundled with `root`, if any.
    pub fn exclusion(&self, path: &AssetPath, root: &AssetPath) -> Option<Exclusion> {
        if path.has_any_extension(&self.excluded_extensions) {
            return Some(Exclusion::CodeModule);
        }
        if !self.external_resource_dir.is_empty() && path.has_directory(&self.external_resource_dir)
        {
            return Some(Exclusion::ExternalResource);
        }
        if path == root {
            return Some(Exclusion::SelfReference);
        }
        None
    }

    /// Returns `true` if `path` may be bundled as a dependency of `root`.
    pub fn is_packable(&self, path: &AssetPath, root: &AssetPath) -> bool {
        self.exclusion(path, root).is_none()
    }
}

impl Default for AssetClassifier {
    fn default() -> Self {
        Self::from_config(&SatchelConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn root() -> AssetPath {
        AssetPath::new("Assets/Bundles/UI/Login.prefab")
    }

    #[test]
    fn excludes_code_modules() {
        let classifier = AssetClassifier::default();
        assert_eq!(
            classifier.exclusion(&AssetPath::new("Assets/Scripts/Login.cs"), &root()),
            Some(Exclusion::CodeModule)
        );
        assert_eq!(
            classifier.exclusion(&AssetPath::new("Assets/Plugins/Proto.DLL"), &root()),
            Some(Exclusion::CodeModule)
        );
    }

    #[test]
    fn excludes_external_resources() {
        let classifier = AssetClassifier::default();
        assert_eq!(
            classifier.exclusion(&AssetPath::new("Assets/Resources/Config.txt"), &root()),
            Some(Exclusion::ExternalResource)
        );
        assert!(classifier.is_packable(&AssetPath::new("Assets/Res/UI/a.png"), &root()));
    }

    #[test]
    fn excludes_the_root_itself() {
        let classifier = AssetClassifier::default();
        assert_eq!(
            classifier.exclusion(&root(), &root()),
            Some(Exclusion::SelfReference)
        );
    }

    #[test]
    fn custom_rules() {
        let classifier = AssetClassifier::new(["lua"], "");
        assert!(!classifier.is_packable(&AssetPath::new("Assets/Lua/main.lua"), &root()));
        assert!(classifier.is_packable(&AssetPath::new("Assets/Resources/a.png"), &root()));
    }
}
