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

//! The build orchestrator.
//!
//! [`BuildPipeline::execute`] runs one build invocation as a linear,
//! non-branching sequence: prepare the versioned output root, compile,
//! strip intermediate artifacts, copy raw bundles, assemble and persist
//! the manifest, optionally promote a group subset to read-only storage.
//! Every stage fails fast; a failed build leaves a partially populated
//! output tree, and rerunning is safe because the first stage recreates
//! the directory empty.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use pakt_core::{
    AssetDatabase, BuildError, BundleCompiler, BundleDeclaration, CompilerOutput, Manifest,
    Platform,
};

use crate::config::BundleBuildConfig;
use crate::fs_util::{copy_no_overwrite, create_empty_dir, strip_compiler_artifacts};
use crate::manifest_builder::{BuildRequest, ManifestBuilder};

/// Suffix of the raw-only variant's sibling output directory.
const RAW_BUNDLES_DIR_SUFFIX: &str = "_rawbundles";

/// Drives bundle builds through a host's compiler and asset database.
///
/// Caller-owned and reusable across invocations; one `execute` call builds
/// one platform.
pub struct BuildPipeline {
    compiler: Box<dyn BundleCompiler>,
    database: Box<dyn AssetDatabase>,
}

impl BuildPipeline {
    /// Creates a pipeline bound to the given host adapters.
    pub fn new(
        compiler: impl BundleCompiler + 'static,
        database: impl AssetDatabase + 'static,
    ) -> Self {
        Self {
            compiler: Box::new(compiler),
            database: Box::new(database),
        }
    }

    /// Runs the full bundle build pipeline for one platform.
    ///
    /// # Errors
    /// The first failing stage aborts the build and surfaces here; nothing
    /// is retried or rolled back.
    pub fn execute(
        &self,
        config: &BundleBuildConfig,
        platform: Platform,
    ) -> Result<(), BuildError> {
        config.validate()?;

        let output_dir = Self::full_output_path(config, platform);
        log::info!("Building bundles into '{}'", output_dir.display());
        create_empty_dir(&output_dir)?;

        let compiled = config.compiled_declarations();
        let raw = config.raw_declarations();

        let compiler_output = if compiled.is_empty() {
            CompilerOutput::default()
        } else {
            self.compiler
                .compile(&output_dir, &compiled, &config.options, platform)?
        };

        strip_compiler_artifacts(&output_dir)?;

        Self::copy_raw_bundles(&output_dir, &raw)?;

        let manifest = ManifestBuilder::build(&BuildRequest {
            compiled: &compiled,
            raw: &raw,
            output_dir: &output_dir,
            compiled_hashes: &compiler_output.hashes,
            database: self.database.as_ref(),
            game_version: &config.game_version,
            manifest_version: config.manifest_version,
        })?;

        Self::write_manifest(&output_dir, &manifest)?;

        if let Some(read_only_root) = &config.read_only_root {
            if config.target_platforms.len() == 1 {
                Self::promote(&output_dir, read_only_root, config, &manifest)?;
            } else {
                // The read-only root is platform-agnostic; a multi-platform
                // batch would overwrite it ambiguously.
                log::warn!(
                    "Skipping read-only promotion: {} target platforms configured",
                    config.target_platforms.len()
                );
            }
        }

        log::info!("Build finished: {} bundle(s)", manifest.bundles.len());
        Ok(())
    }

    /// Runs the raw-only variant: copies the raw-kind bundles into a
    /// sibling `_rawbundles` output directory with a raw-only manifest.
    /// Compiled declarations are ignored; no stripping, no promotion.
    ///
    /// # Errors
    /// Same fail-fast semantics as [`execute`](Self::execute).
    pub fn execute_raw(
        &self,
        config: &BundleBuildConfig,
        platform: Platform,
    ) -> Result<(), BuildError> {
        config.validate()?;

        let mut output_dir = Self::full_output_path(config, platform);
        output_dir.as_mut_os_string().push(RAW_BUNDLES_DIR_SUFFIX);
        log::info!("Building raw bundles into '{}'", output_dir.display());
        create_empty_dir(&output_dir)?;

        let raw = config.raw_declarations();
        Self::copy_raw_bundles(&output_dir, &raw)?;

        let manifest = ManifestBuilder::build(&BuildRequest {
            compiled: &[],
            raw: &raw,
            output_dir: &output_dir,
            compiled_hashes: &HashMap::new(),
            database: self.database.as_ref(),
            game_version: &config.game_version,
            manifest_version: config.manifest_version,
        })?;

        Self::write_manifest(&output_dir, &manifest)?;

        log::info!("Raw build finished: {} bundle(s)", manifest.bundles.len());
        Ok(())
    }

    /// The versioned per-platform output directory:
    /// `<outputRoot>/<platform>/<gameVersion>_<manifestVersion>`.
    fn full_output_path(config: &BundleBuildConfig, platform: Platform) -> PathBuf {
        let version_dir = format!("{}_{}", config.game_version, config.manifest_version);
        config
            .output_root
            .join(platform.to_string())
            .join(version_dir)
    }

    /// Copies each raw declaration's single source asset to its declared
    /// relative path, creating intermediate directories.
    fn copy_raw_bundles(
        output_dir: &Path,
        raw: &[BundleDeclaration],
    ) -> Result<(), BuildError> {
        for declaration in raw {
            // Validation guarantees exactly one asset per raw bundle.
            let source = Path::new(&declaration.assets[0].name);
            let destination = output_dir.join(&declaration.relative_path);
            copy_no_overwrite(source, &destination)?;
        }
        Ok(())
    }

    /// Serializes the manifest to its well-known file name under `dir`.
    fn write_manifest(dir: &Path, manifest: &Manifest) -> Result<(), BuildError> {
        let path = dir.join(Manifest::MANIFEST_FILE_NAME);
        let json = serde_json::to_string_pretty(manifest).map_err(|e| {
            BuildError::io(&path, std::io::Error::new(std::io::ErrorKind::InvalidData, e))
        })?;
        fs::write(&path, json).map_err(|e| BuildError::io(&path, e))?;
        Ok(())
    }

    /// Copies the configured group subset of built bundles into the
    /// read-only storage root, recreated empty first, and persists the
    /// matching sub-manifest there.
    fn promote(
        output_dir: &Path,
        read_only_root: &Path,
        config: &BundleBuildConfig,
        manifest: &Manifest,
    ) -> Result<(), BuildError> {
        let groups = config.copy_group_set();
        let promoted = manifest.subset(groups.as_ref());
        log::info!(
            "Promoting {} of {} bundle(s) to '{}'",
            promoted.bundles.len(),
            manifest.bundles.len(),
            read_only_root.display()
        );

        create_empty_dir(read_only_root)?;

        for entry in &promoted.bundles {
            let source = output_dir.join(&entry.relative_path);
            let destination = read_only_root.join(&entry.relative_path);
            copy_no_overwrite(&source, &destination)?;
        }

        Self::write_manifest(read_only_root, &promoted)?;
        Ok(())
    }
}
