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

use clap::{Args, Parser, Subcommand};
use satchel_core::build::{BuildOptions, BuildRequest, BundleOptions, Platform};
use std::path::PathBuf;

/// Tags every asset of a project with a bundle and, for images, a packing group.
#[derive(Parser, Debug)]
#[command(name = "satchel", version, about)]
pub struct Cli {
    /// The project directory.
    #[arg(long, short, global = true, default_value = ".")]
    pub project: PathBuf,

    /// Configuration file, `<project>/Satchel.toml` by default.
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// Increase logging verbosity (-v debug, -vv trace).
    #[arg(long, short, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Reset every tag, partition the managed directories and save.
    Mark,
    /// Clear every tag in the managed areas and save.
    Reset,
    /// Print the current tags grouped by bundle.
    Report,
    /// Mark the project, then hand the manifest to the bundle compiler.
    Build(BuildArgs),
}

#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Target platform (android, ios, pc).
    #[arg(long, default_value = "android")]
    pub platform: Platform,

    /// Also build the player executable.
    #[arg(long)]
    pub exe: bool,

    /// Player build option, repeatable. Defaults to development + allow-debugging.
    #[arg(long = "build-option", value_name = "NAME", value_parser = parse_build_option)]
    pub build_options: Vec<BuildOptions>,

    /// Bundle compilation option, repeatable.
    #[arg(long = "bundle-option", value_name = "NAME", value_parser = parse_bundle_option)]
    pub bundle_options: Vec<BundleOptions>,
}

impl BuildArgs {
    /// Folds the arguments into a request.
    pub fn to_request(&self) -> BuildRequest {
        let defaults = BuildRequest::default();
        let build_options = if self.build_options.is_empty() {
            defaults.build_options
        } else {
            self.build_options
                .iter()
                .fold(BuildOptions::NONE, |acc, flag| acc | *flag)
        };
        let bundle_options = self
            .bundle_options
            .iter()
            .fold(BundleOptions::NONE, |acc, flag| acc | *flag);

        BuildRequest {
            platform: self.platform,
            build_exe: self.exe,
            build_options,
            bundle_options,
        }
    }
}

fn parse_build_option(name: &str) -> Result<BuildOptions, String> {
    BuildOptions::from_name(name).ok_or_else(|| format!("unknown build option '{name}'"))
}

fn parse_bundle_option(name: &str) -> Result<BundleOptions, String> {
    BundleOptions::from_name(name).ok_or_else(|| format!("unknown bundle option '{name}'"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_defaults_to_debuggable_development() {
        let cli = Cli::parse_from(["satchel", "build"]);
        let Command::Build(args) = cli.command else {
            panic!("expected build");
        };
        assert_eq!(args.to_request(), BuildRequest::default());
    }

    #[test]
    fn build_options_are_combined() {
        let cli = Cli::parse_from([
            "satchel",
            "build",
            "--platform",
            "PC",
            "--exe",
            "--build-option",
            "development",
            "--bundle-option",
            "chunk-based-compression",
            "--bundle-option",
            "strict-mode",
        ]);
        let Command::Build(args) = cli.command else {
            panic!("expected build");
        };
        let request = args.to_request();
        assert_eq!(request.platform, Platform::Pc);
        assert!(request.build_exe);
        assert_eq!(request.build_options, BuildOptions::DEVELOPMENT);
        assert_eq!(
            request.bundle_options,
            BundleOptions::CHUNK_BASED_COMPRESSION | BundleOptions::STRICT_MODE
        );
    }

    #[test]
    fn unknown_option_is_rejected() {
        let result = Cli::try_parse_from(["satchel", "build", "--bundle-option", "zip"]);
        assert!(result.is_err());
    }

    #[test]
    fn global_flags_follow_subcommand() {
        let cli = Cli::parse_from(["satchel", "mark", "--project", "game", "-vv"]);
        assert_eq!(cli.project, PathBuf::from("game"));
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Command::Mark));
    }
}
