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

// Command-line driver for the bundle build pipeline.
// Run with: pakt <command> [--config Pakt.toml]

mod commands;
mod helpers;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "pakt", version, about = "Bundle build pipeline driver")]
struct Cli {
    /// Path to the build configuration file.
    #[arg(long, default_value = "Pakt.toml", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the full bundle build pipeline for every configured platform.
    Build,
    /// Build only the raw-kind bundles into the sibling output directory.
    BuildRaw,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Build => commands::build::run(&cli.config, commands::build::Mode::Full),
        Command::BuildRaw => commands::build::run(&cli.config, commands::build::Mode::RawOnly),
    }
}
