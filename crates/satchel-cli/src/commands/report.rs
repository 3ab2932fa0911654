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
use crate::helpers::{print_info, print_task_start, BOLD, CYAN, MAGNIFIER, RESET};
use anyhow::Result;
use satchel_agents::TaggingAgent;

pub fn run(workspace: &Workspace) -> Result<()> {
    print_task_start("Current Bundles", MAGNIFIER, CYAN);
    let manifest = TaggingAgent::from_config(&workspace.config).manifest(&workspace.index)?;

    if manifest.bundles.is_empty() {
        print_info("No asset carries a bundle tag. Run `satchel mark` first.");
        return Ok(());
    }
    for (bundle, members) in &manifest.bundles {
        println!("{}{}{} ({} assets)", BOLD, bundle, RESET, members.len());
        for member in members {
            println!("  {member}");
        }
    }
    for (group, members) in &manifest.packing_groups {
        println!("{}group {}{}: {} images", BOLD, group, RESET, members.len());
    }
    print_info(&format!(
        "{} assets in {} bundles",
        manifest.asset_count(),
        manifest.bundle_count()
    ));
    Ok(())
}
