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

//! One module per subcommand.

pub mod build;
pub mod mark;
pub mod report;
pub mod reset;

use anyhow::{Context, Result};
use satchel_io::{ProjectAssetIndex, SatchelConfig};
use std::path::{Path, PathBuf};

/// A loaded project: its configuration and its asset index.
pub struct Workspace {
    pub root: PathBuf,
    pub config: SatchelConfig,
    pub index: ProjectAssetIndex,
}

impl Workspace {
    /// Loads the configuration (explicit file or `Satchel.toml`) and opens the index.
    pub fn open(project: &Path, config_file: Option<&Path>) -> Result<Self> {
        let config = match config_file {
            Some(path) => SatchelConfig::load_file(path),
            None => SatchelConfig::load(project),
        }
        .context("Failed to load the project configuration")?;

        let index = ProjectAssetIndex::open(project, &config)
            .with_context(|| format!("Failed to open project '{}'", project.display()))?;

        Ok(Self {
            root: project.to_path_buf(),
            config,
            index,
        })
    }

    /// Absolute location of the configured output directory.
    pub fn output_directory(&self) -> PathBuf {
        self.root.join(&self.config.output_directory)
    }
}
