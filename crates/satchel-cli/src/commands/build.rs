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

use super::Workspace;
use crate::cli::BuildArgs;
use crate::helpers::{print_info, print_success, print_task_start, MAGENTA, PACKAGE};
use anyhow::{Context, Result};
use satchel_agents::{BuildHandoff, TaggingAgent};
use satchel_core::build::BuildRequest;
use satchel_io::BundleManifest;
use std::fs;
use std::path::PathBuf;

/// File name of the serialized build request.
pub const BUILD_REQUEST_FILE: &str = "build_request.ron";

/// Writes the manifest and the request into the output directory, where the
/// external bundle compiler picks them up.
pub struct DistHandoff {
    output_directory: PathBuf,
}

impl DistHandoff {
    pub fn new(output_directory: impl Into<PathBuf>) -> Self {
        Self {
            output_directory: output_directory.into(),
        }
    }
}

impl BuildHandoff for DistHandoff {
    fn hand_off(&mut self, request: &BuildRequest, manifest: &BundleManifest) -> Result<()> {
        manifest
            .write_to(&self.output_directory)
            .context("Failed to write the bundle manifest")?;

        let pretty = ron::ser::PrettyConfig::default();
        let text = ron::ser::to_string_pretty(request, pretty)
            .context("Failed to serialize the build request")?;
        let path = self.output_directory.join(BUILD_REQUEST_FILE);
        fs::write(&path, text).with_context(|| format!("Failed to write {}", path.display()))?;

        log::info!("Build request written to '{}'.", path.display());
        Ok(())
    }
}

pub fn run(workspace: &mut Workspace, args: &BuildArgs) -> Result<()> {
    print_task_start("Preparing Build", PACKAGE, MAGENTA);
    let request = args.to_request();
    print_info(&format!(
        "platform={} exe={} build={} bundles={}",
        request.platform, request.build_exe, request.build_options, request.bundle_options
    ));

    let output = workspace.output_directory();
    let mut handoff = DistHandoff::new(&output);
    let summary = TaggingAgent::from_config(&workspace.config).build(
        &mut workspace.index,
        &request,
        &mut handoff,
    )?;

    println!("{summary}");
    print_success(&format!("Handoff written to {}", output.display()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use satchel_core::asset::AssetPath;
    use satchel_core::build::Platform;
    use satchel_io::manifest::{MANIFEST_BIN, MANIFEST_RON};
    use tempfile::tempdir;

    #[test]
    fn handoff_writes_manifest_and_request() -> Result<()> {
        let dir = tempdir()?;
        let out = dir.path().join("dist");
        let mut manifest = BundleManifest::default();
        manifest.bundles.insert(
            "Login.unity3d".to_string(),
            vec![AssetPath::new("Assets/Bundles/UI/Login.prefab")],
        );
        let request = BuildRequest {
            platform: Platform::Ios,
            ..BuildRequest::default()
        };

        DistHandoff::new(&out).hand_off(&request, &manifest)?;

        assert!(out.join(MANIFEST_RON).is_file());
        let bytes = fs::read(out.join(MANIFEST_BIN))?;
        assert_eq!(BundleManifest::from_bincode(&bytes)?, manifest);
        let text = fs::read_to_string(out.join(BUILD_REQUEST_FILE))?;
        let decoded: BuildRequest = ron::from_str(&text)?;
        assert_eq!(decoded, request);
        Ok(())
    }
}
