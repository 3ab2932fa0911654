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
use crate::helpers::{print_success, print_task_start, BROOM, YELLOW};
use anyhow::Result;
use satchel_agents::TaggingAgent;

pub fn run(workspace: &mut Workspace) -> Result<()> {
    print_task_start("Resetting Tags", BROOM, YELLOW);
    let report = TaggingAgent::from_config(&workspace.config).reset(&mut workspace.index)?;
    print_success(&format!("{} tags cleared", report.tags_cleared));
    Ok(())
}
