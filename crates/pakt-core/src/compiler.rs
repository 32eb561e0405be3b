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

//! Capability traits binding the build pipeline to a host engine.
//!
//! The pipeline itself is host-agnostic: everything engine-specific — how a
//! bundle is physically compiled, how a scene asset is recognized, how an
//! asset's dependencies are resolved — goes through these two seams. Any
//! concrete host substitutes its own implementations without altering the
//! `ManifestBuilder`/`BuildPipeline` logic.

use std::collections::HashMap;
use std::path::Path;

use crate::bundle::{BundleDeclaration, CompileOptions};
use crate::error::BuildError;
use crate::platform::Platform;

/// What the bundle compiler reports back to the pipeline.
///
/// The physical bundle files (and any intermediate side artifacts) are
/// written to the output directory by the compiler itself; only the
/// per-bundle content hashes travel back in-memory.
#[derive(Debug, Default)]
pub struct CompilerOutput {
    /// Content hash per compiled bundle, keyed by the declaration's
    /// relative path.
    pub hashes: HashMap<String, String>,
}

/// The host engine's bundle compiler.
///
/// Treated as a black box by the pipeline: given the compiled-kind
/// declarations it must write one physical bundle file per declaration at
/// `output_dir/<relative_path>` and report each file's content hash.
pub trait BundleCompiler {
    /// Compiles every declaration into the output directory.
    ///
    /// # Errors
    /// A reported compiler failure is fatal for the whole build; the
    /// pipeline does not retry.
    fn compile(
        &self,
        output_dir: &Path,
        declarations: &[BundleDeclaration],
        options: &CompileOptions,
        platform: Platform,
    ) -> Result<CompilerOutput, BuildError>;
}

/// The host engine's asset database.
///
/// Answers the two questions manifest assembly needs without loading any
/// asset data.
pub trait AssetDatabase {
    /// Returns the asset's direct dependencies only. Consumers resolve the
    /// transitive closure themselves at load time.
    fn direct_dependencies(&self, asset_name: &str) -> Vec<String>;

    /// Returns `true` if the named asset is a scene-type asset.
    fn is_scene_asset(&self, asset_name: &str) -> bool;
}
