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

//! The build configuration: what to build, for which platforms, into where.

use std::collections::HashSet;
use std::path::PathBuf;

use serde::Deserialize;

use pakt_core::{BundleDeclaration, BundleKind, CompileOptions, ConfigError, Platform};

/// Everything one build invocation needs to know.
///
/// Deserializable so the CLI can load it from a `Pakt.toml` file; library
/// callers construct it directly.
#[derive(Debug, Clone, Deserialize)]
pub struct BundleBuildConfig {
    /// The producer version string recorded in the manifest.
    pub game_version: String,
    /// The manifest schema version. Set exactly once per build.
    pub manifest_version: u32,
    /// Root under which per-platform output directories are created.
    pub output_root: PathBuf,
    /// Platforms this configuration targets. The pipeline builds one
    /// platform per call; promotion requires this list to have exactly one
    /// entry.
    pub target_platforms: Vec<Platform>,
    /// Options forwarded to the bundle compiler.
    #[serde(default)]
    pub options: CompileOptions,
    /// When set, the promotion step copies bundles into this read-only
    /// storage root after a successful build.
    #[serde(default)]
    pub read_only_root: Option<PathBuf>,
    /// Group tags selected by the promotion step. `None` promotes every
    /// bundle.
    #[serde(default)]
    pub copy_groups: Option<Vec<String>>,
    /// The bundles this build produces.
    pub bundles: Vec<BundleDeclaration>,
}

impl BundleBuildConfig {
    /// Checks the declaration invariants before any filesystem mutation.
    ///
    /// # Errors
    /// `ConfigError` on a duplicate relative output path, a compiled bundle
    /// with no assets, or a raw bundle whose asset count is not one.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen_paths = HashSet::new();
        for declaration in &self.bundles {
            if !seen_paths.insert(declaration.relative_path.as_str()) {
                return Err(ConfigError::DuplicateRelativePath {
                    relative_path: declaration.relative_path.clone(),
                });
            }

            match declaration.kind {
                BundleKind::Compiled => {
                    if declaration.assets.is_empty() {
                        return Err(ConfigError::EmptyBundle {
                            bundle_name: declaration.bundle_name.clone(),
                        });
                    }
                }
                BundleKind::Raw => {
                    if declaration.assets.len() != 1 {
                        return Err(ConfigError::RawBundleAssetCount {
                            bundle_name: declaration.bundle_name.clone(),
                            count: declaration.assets.len(),
                        });
                    }
                }
            }
        }
        Ok(())
    }

    /// The compiled-kind declarations, in declaration order.
    pub fn compiled_declarations(&self) -> Vec<BundleDeclaration> {
        self.bundles
            .iter()
            .filter(|d| d.kind == BundleKind::Compiled)
            .cloned()
            .collect()
    }

    /// The raw-kind declarations, in declaration order.
    pub fn raw_declarations(&self) -> Vec<BundleDeclaration> {
        self.bundles
            .iter()
            .filter(|d| d.kind == BundleKind::Raw)
            .cloned()
            .collect()
    }

    /// The promotion group filter as a set, `None` when every group is
    /// promoted.
    pub fn copy_group_set(&self) -> Option<HashSet<String>> {
        self.copy_groups
            .as_ref()
            .map(|groups| groups.iter().cloned().collect())
    }
}
