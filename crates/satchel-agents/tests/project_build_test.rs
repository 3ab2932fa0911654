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

use anyhow::Result;
use satchel_agents::{BuildHandoff, TaggingAgent};
use satchel_core::asset::AssetPath;
use satchel_core::build::{BuildOptions, BuildRequest, Platform};
use satchel_io::{BundleManifest, ProjectAssetIndex, SatchelConfig};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

#[derive(Default)]
struct RecordingHandoff {
    received: Vec<(BuildRequest, BundleManifest)>,
}

impl BuildHandoff for RecordingHandoff {
    fn hand_off(&mut self, request: &BuildRequest, manifest: &BundleManifest) -> Result<()> {
        self.received.push((request.clone(), manifest.clone()));
        Ok(())
    }
}

fn write(root: &Path, rel: &str, contents: &str) -> Result<()> {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap())?;
    fs::write(path, contents)?;
    Ok(())
}

fn fixture(root: &Path) -> Result<()> {
    write(root, "Assets/Bundles/UI/Login.prefab", "prefab")?;
    write(
        root,
        "Assets/Bundles/UI/Login.prefab.meta",
        r#"(dependencies: ["Assets/Res/UI/button.png", "Assets/Res/UI/logo.png"])"#,
    )?;
    write(root, "Assets/Bundles/UI/Shop.prefab", "prefab")?;
    write(
        root,
        "Assets/Bundles/UI/Shop.prefab.meta",
        r#"(dependencies: ["Assets/Res/UI/button.png", "Assets/Scripts/Shop.cs"])"#,
    )?;
    write(root, "Assets/Res/UI/button.png", "png")?;
    write(root, "Assets/Res/UI/logo.png", "png")?;
    write(
        root,
        "Assets/Res/UI/logo.png.meta",
        r#"(bundle: Some("Stale.unity3d"), packing_group: Some("Stale"))"#,
    )?;
    write(root, "Assets/Scripts/Shop.cs", "class Shop {}")?;
    Ok(())
}

#[test]
fn tags_survive_reopening_the_project() -> Result<()> {
    let dir = tempdir()?;
    fixture(dir.path())?;
    let config = SatchelConfig::default();
    let agent = TaggingAgent::from_config(&config);

    let mut index = ProjectAssetIndex::open(dir.path(), &config)?;
    agent.run(&mut index)?;
    assert_eq!(index.pending_changes(), 0);

    let reopened = ProjectAssetIndex::open(dir.path(), &config)?;
    let manifest = agent.manifest(&reopened)?;
    assert_eq!(
        manifest.bundle_of(&AssetPath::new("Assets/Res/UI/button.png")),
        Some("UI-share.unity3d")
    );
    assert_eq!(
        manifest.bundle_of(&AssetPath::new("Assets/Res/UI/logo.png")),
        Some("Login.unity3d")
    );
    assert_eq!(manifest.bundle_of(&AssetPath::new("Assets/Scripts/Shop.cs")), None);
    assert_eq!(
        manifest.packing_groups.get("UI-share"),
        Some(&vec![AssetPath::new("Assets/Res/UI/button.png")])
    );
    Ok(())
}

#[test]
fn build_hands_off_request_and_manifest() -> Result<()> {
    let dir = tempdir()?;
    fixture(dir.path())?;
    let config = SatchelConfig::default();
    let mut index = ProjectAssetIndex::open(dir.path(), &config)?;

    let request = BuildRequest {
        platform: Platform::Pc,
        build_exe: true,
        build_options: BuildOptions::DEVELOPMENT,
        ..BuildRequest::default()
    };
    let mut handoff = RecordingHandoff::default();
    TaggingAgent::from_config(&config).build(&mut index, &request, &mut handoff)?;

    assert_eq!(handoff.received.len(), 1);
    let (received, manifest) = &handoff.received[0];
    assert_eq!(received, &request);
    assert_eq!(manifest.bundle_count(), 3);
    assert_eq!(manifest.asset_count(), 4);
    Ok(())
}
