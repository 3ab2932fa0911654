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

// Asset bundle tagging for a project tree
// Run with: satchel <command>

mod cli;
mod commands;
mod helpers;

use clap::Parser;
use cli::{Cli, Command};
use commands::Workspace;
use helpers::{print_error, BANNER};

fn init_logging(verbose: u8) {
    use env_logger::{Builder, Env};

    let default_filter = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    Builder::from_env(Env::default().default_filter_or(default_filter)).init();
}

fn execute(cli: &Cli) -> anyhow::Result<()> {
    let mut workspace = Workspace::open(&cli.project, cli.config.as_deref())?;
    match &cli.command {
        Command::Mark => commands::mark::run(&mut workspace),
        Command::Reset => commands::reset::run(&mut workspace),
        Command::Report => commands::report::run(&workspace),
        Command::Build(args) => commands::build::run(&mut workspace, args),
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    println!("{}", BANNER);

    if let Err(err) = execute(&cli) {
        print_error(&format!("{err:#}"));
        std::process::exit(1);
    }
}
