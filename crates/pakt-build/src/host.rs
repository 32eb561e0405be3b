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

//! Default host adapters: a store-format bundle compiler and a
//! filesystem-backed asset database.
//!
//! A real engine binds the pipeline to its native compiler and asset
//! database through the `pakt-core` traits; these adapters cover the CLI
//! and the integration tests without one.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use pakt_core::{
    hash::content_hash, AssetDatabase, BuildError, BundleCompiler, BundleDeclaration,
    CompileOptions, CompilerOutput, Compression, Platform,
};

/// A bundle compiler that archives each bundle's assets by concatenation.
///
/// Asset names are resolved as paths relative to `asset_root`. Each bundle
/// blob is the concatenation of its assets' bytes, LZ4-compressed when the
/// options ask for it, written at the declared relative path. Like an
/// engine compiler it also emits intermediate side artifacts — a
/// `<bundle>.manifest` text file per bundle and a top-level aggregate named
/// after the output directory — which the pipeline strips afterwards.
pub struct StoreCompiler {
    asset_root: PathBuf,
}

impl StoreCompiler {
    /// Creates a compiler resolving asset names under `asset_root`.
    pub fn new(asset_root: impl Into<PathBuf>) -> Self {
        Self {
            asset_root: asset_root.into(),
        }
    }

    fn bundle_payload(
        &self,
        declaration: &BundleDeclaration,
        options: &CompileOptions,
    ) -> Result<Vec<u8>, BuildError> {
        let mut payload = Vec::new();
        for asset in &declaration.assets {
            let source = self.asset_root.join(&asset.name);
            let bytes = fs::read(&source).map_err(|e| BuildError::io(&source, e))?;
            payload.extend_from_slice(&bytes);
        }

        match options.compression {
            Compression::None => Ok(payload),
            Compression::Lz4 => Ok(lz4_flex::compress_prepend_size(&payload)),
        }
    }
}

impl BundleCompiler for StoreCompiler {
    fn compile(
        &self,
        output_dir: &Path,
        declarations: &[BundleDeclaration],
        options: &CompileOptions,
        platform: Platform,
    ) -> Result<CompilerOutput, BuildError> {
        log::info!(
            "Store-compiling {} bundle(s) for {platform}",
            declarations.len()
        );

        let mut output = CompilerOutput::default();
        let mut aggregate_lines = Vec::new();

        for declaration in declarations {
            let payload = self.bundle_payload(declaration, options)?;
            let hash = content_hash(&payload);

            let destination = output_dir.join(&declaration.relative_path);
            if let Some(parent) = destination.parent() {
                fs::create_dir_all(parent).map_err(|e| BuildError::io(parent, e))?;
            }
            fs::write(&destination, &payload).map_err(|e| BuildError::io(&destination, e))?;

            // Engine-style side artifacts for external tooling; the
            // pipeline strips them before the build is final.
            let side_file = output_dir.join(format!("{}.manifest", declaration.relative_path));
            let side_body = format!(
                "bundle: {}\nhash: {}\nassets: {}\n",
                declaration.bundle_name,
                hash,
                declaration.assets.len()
            );
            fs::write(&side_file, side_body).map_err(|e| BuildError::io(&side_file, e))?;

            aggregate_lines.push(format!("{} {}", hash, declaration.relative_path));
            output.hashes.insert(declaration.relative_path.clone(), hash);
        }

        if let Some(dir_name) = output_dir.file_name() {
            let aggregate = output_dir.join(dir_name);
            fs::write(&aggregate, aggregate_lines.join("\n"))
                .map_err(|e| BuildError::io(&aggregate, e))?;
        }

        Ok(output)
    }
}

/// A filesystem-flavored asset database.
///
/// Scene assets are recognized by extension; direct dependencies come from
/// an in-memory map populated by the caller. Both default to the common
/// case (a single `.scene` extension, no dependencies).
pub struct FsAssetDatabase {
    scene_extensions: Vec<String>,
    dependencies: HashMap<String, Vec<String>>,
}

impl FsAssetDatabase {
    /// Creates a database recognizing `.scene` assets and no dependencies.
    pub fn new() -> Self {
        Self {
            scene_extensions: vec!["scene".to_string()],
            dependencies: HashMap::new(),
        }
    }

    /// Replaces the scene-detecting extensions (without leading dots).
    #[must_use]
    pub fn with_scene_extensions(mut self, extensions: Vec<String>) -> Self {
        self.scene_extensions = extensions;
        self
    }

    /// Registers the direct dependencies of one asset.
    #[must_use]
    pub fn with_dependencies(mut self, asset_name: &str, dependencies: Vec<String>) -> Self {
        self.dependencies.insert(asset_name.to_string(), dependencies);
        self
    }
}

impl Default for FsAssetDatabase {
    fn default() -> Self {
        Self::new()
    }
}

impl AssetDatabase for FsAssetDatabase {
    fn direct_dependencies(&self, asset_name: &str) -> Vec<String> {
        self.dependencies.get(asset_name).cloned().unwrap_or_default()
    }

    fn is_scene_asset(&self, asset_name: &str) -> bool {
        Path::new(asset_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.scene_extensions.iter().any(|s| s == ext))
    }
}
