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

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use serde::Deserialize;

use pakt_build::{BuildPipeline, BundleBuildConfig, FsAssetDatabase, StoreCompiler};

use crate::helpers::*;

/// Which pipeline variant to drive.
#[derive(Debug, Clone, Copy)]
pub enum Mode {
    /// Compiled and raw bundles, manifest, optional promotion.
    Full,
    /// Raw bundles only, into the sibling output directory.
    RawOnly,
}

/// The `Pakt.toml` file: the build configuration plus the CLI-level
/// settings the default host adapters need.
#[derive(Debug, Deserialize)]
struct CliConfig {
    /// Root directory asset names resolve under.
    #[serde(default = "default_asset_root")]
    asset_root: PathBuf,
    /// Extensions (without dots) recognized as scene assets.
    #[serde(default)]
    scene_extensions: Option<Vec<String>>,
    #[serde(flatten)]
    build: BundleBuildConfig,
}

fn default_asset_root() -> PathBuf {
    PathBuf::from("assets")
}

pub fn run(config_path: &Path, mode: Mode) -> Result<()> {
    print_task_start("Building Bundles", ROCKET, MAGENTA);

    let config = load_config(config_path)?;
    print_info(&format!(
        "{} bundle declaration(s), {} target platform(s)",
        config.build.bundles.len(),
        config.build.target_platforms.len()
    ));

    let mut database = FsAssetDatabase::new();
    if let Some(extensions) = config.scene_extensions.clone() {
        database = database.with_scene_extensions(extensions);
    }
    let pipeline = BuildPipeline::new(StoreCompiler::new(&config.asset_root), database);

    let start_time = Instant::now();
    for platform in &config.build.target_platforms {
        print_task_start(&format!("Platform {platform}"), GEAR, CYAN);
        let result = match mode {
            Mode::Full => pipeline.execute(&config.build, *platform),
            Mode::RawOnly => pipeline.execute_raw(&config.build, *platform),
        };
        match result {
            Ok(()) => print_success(&format!("{platform} build completed")),
            Err(e) => {
                print_error(&format!("{platform} build failed: {e}"));
                return Err(e).context(format!("Build failed for platform {platform}"));
            }
        }
    }

    print_success(&format!(
        "Pipeline finished in {:.2}s",
        start_time.elapsed().as_secs_f64()
    ));
    Ok(())
}

/// Loads and parses the `Pakt.toml` build configuration.
fn load_config(path: &Path) -> Result<CliConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file at '{}'", path.display()))?;
    let config: CliConfig = toml::from_str(&text)
        .with_context(|| format!("Failed to parse TOML from '{}'", path.display()))?;
    Ok(config)
}
