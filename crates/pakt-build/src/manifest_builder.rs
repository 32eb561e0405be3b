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

//! Assembles the [`Manifest`] from build declarations and compiler output.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use pakt_core::{
    hash::content_hash, AssetDatabase, AssetManifestEntry, BuildError, BundleDeclaration,
    BundleManifestEntry, Manifest,
};

/// Everything one manifest assembly needs.
///
/// The compiled and raw slices are the partitioned declarations in
/// declaration order; `compiled_hashes` is the compiler's per-bundle hash
/// map (empty when nothing was compiled). All physical bundle files must
/// already exist in `output_dir` — the builder reads them, it never writes.
pub struct BuildRequest<'a> {
    /// Compiled-kind declarations.
    pub compiled: &'a [BundleDeclaration],
    /// Raw-kind declarations.
    pub raw: &'a [BundleDeclaration],
    /// The build's output directory, containing every bundle file.
    pub output_dir: &'a Path,
    /// Content hash per compiled bundle, keyed by relative path.
    pub compiled_hashes: &'a HashMap<String, String>,
    /// The host's asset database for scene detection and dependencies.
    pub database: &'a dyn AssetDatabase,
    /// The producer version string.
    pub game_version: &'a str,
    /// The manifest schema version.
    pub manifest_version: u32,
}

/// Builds the in-memory [`Manifest`] for a finished set of bundle files.
///
/// Entries are appended in declaration order, compiled entries before raw
/// entries, which is the persisted, reproducible order.
pub struct ManifestBuilder;

impl ManifestBuilder {
    /// Assembles the manifest.
    ///
    /// # Errors
    /// - [`BuildError::ManifestIntegrity`] when a compiled declaration has
    ///   no reported hash (compiler/declaration mismatch).
    /// - [`BuildError::Io`] when a bundle file cannot be read.
    pub fn build(request: &BuildRequest<'_>) -> Result<Manifest, BuildError> {
        let mut manifest = Manifest::new(request.game_version, request.manifest_version);

        for declaration in request.compiled {
            manifest
                .bundles
                .push(Self::compiled_entry(request, declaration)?);
        }
        for declaration in request.raw {
            manifest.bundles.push(Self::raw_entry(request, declaration)?);
        }

        Ok(manifest)
    }

    fn compiled_entry(
        request: &BuildRequest<'_>,
        declaration: &BundleDeclaration,
    ) -> Result<BundleManifestEntry, BuildError> {
        let hash = request
            .compiled_hashes
            .get(&declaration.relative_path)
            .ok_or_else(|| BuildError::ManifestIntegrity {
                relative_path: declaration.relative_path.clone(),
            })?
            .clone();

        // Length comes from the actual compiled bytes, never computed
        // speculatively.
        let full_path = request.output_dir.join(&declaration.relative_path);
        let length = fs::metadata(&full_path)
            .map_err(|e| BuildError::io(&full_path, e))?
            .len();

        let is_scene = declaration
            .assets
            .first()
            .is_some_and(|asset| request.database.is_scene_asset(&asset.name));

        let assets = declaration
            .assets
            .iter()
            .map(|asset| AssetManifestEntry {
                asset_name: asset.name.clone(),
                // Direct dependencies only; consumers resolve recursively at
                // load time.
                dependencies: request.database.direct_dependencies(&asset.name),
            })
            .collect();

        Ok(BundleManifestEntry {
            relative_path: declaration.relative_path.clone(),
            directory: declaration.directory.clone(),
            bundle_name: declaration.bundle_name.clone(),
            group: declaration.group.clone(),
            is_raw: false,
            is_scene,
            length,
            hash,
            assets,
        })
    }

    fn raw_entry(
        request: &BuildRequest<'_>,
        declaration: &BundleDeclaration,
    ) -> Result<BundleManifestEntry, BuildError> {
        // Raw bundles have no compiler round-trip: hash the copied file's
        // bytes directly.
        let full_path = request.output_dir.join(&declaration.relative_path);
        let bytes = fs::read(&full_path).map_err(|e| BuildError::io(&full_path, e))?;

        let assets = declaration
            .assets
            .iter()
            .map(|asset| AssetManifestEntry {
                asset_name: asset.name.clone(),
                dependencies: Vec::new(),
            })
            .collect();

        Ok(BundleManifestEntry {
            relative_path: declaration.relative_path.clone(),
            directory: declaration.directory.clone(),
            bundle_name: declaration.bundle_name.clone(),
            group: declaration.group.clone(),
            is_raw: true,
            is_scene: false,
            length: bytes.len() as u64,
            hash: content_hash(&bytes),
            assets,
        })
    }
}
