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

//! The persisted manifest model — the build's single source of truth.
//!
//! Every build invocation produces a fresh [`Manifest`] describing all the
//! bundles it wrote. The serialized form is a wire-level contract shared
//! with every manifest consumer: field names are fixed (PascalCase) and the
//! file name is the well-known [`Manifest::MANIFEST_FILE_NAME`] constant.
//! Do not introduce breaking changes to the field names.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Persisted per-asset record inside a bundle entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AssetManifestEntry {
    /// The source-addressable asset identifier.
    pub asset_name: String,
    /// Direct dependencies only. Consumers perform recursive resolution at
    /// load time; recording closures here would desynchronize if the
    /// compiler's resolution ever differed.
    pub dependencies: Vec<String>,
}

/// Persisted description of one built bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BundleManifestEntry {
    /// Location relative to the output root.
    pub relative_path: String,
    /// The logical directory this bundle belongs to.
    pub directory: String,
    /// The bundle's name.
    pub bundle_name: String,
    /// The resource group tag.
    pub group: String,
    /// True for raw (copied, uncompiled) bundles.
    pub is_raw: bool,
    /// True iff the bundle's first asset is a scene-type asset.
    pub is_scene: bool,
    /// Byte length of the physical bundle file.
    pub length: u64,
    /// Content hash of the physical bundle file.
    pub hash: String,
    /// Per-asset records, in declaration order.
    pub assets: Vec<AssetManifestEntry>,
}

/// The authoritative, versioned description of all bundles produced by a
/// build invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Manifest {
    /// The producer's version string.
    pub game_version: String,
    /// The manifest schema version. Set exactly once per build.
    pub manifest_version: u32,
    /// Bundle entries in processing order: compiled entries first, then raw
    /// entries, each in declaration order. The order is stable so that
    /// repeated builds diff cleanly.
    pub bundles: Vec<BundleManifestEntry>,
}

impl Manifest {
    /// The well-known manifest file name, shared by writer and reader.
    pub const MANIFEST_FILE_NAME: &'static str = "PaktManifest.json";

    /// Creates an empty manifest for the given producer and schema version.
    pub fn new(game_version: impl Into<String>, manifest_version: u32) -> Self {
        Self {
            game_version: game_version.into(),
            manifest_version,
            bundles: Vec::new(),
        }
    }

    /// Derives the filtered copy used by the promotion step.
    ///
    /// Keeps exactly the entries whose group is in `groups`, preserving
    /// relative order. `None` keeps every entry. The receiver is left
    /// untouched.
    pub fn subset(&self, groups: Option<&HashSet<String>>) -> Manifest {
        let bundles = self
            .bundles
            .iter()
            .filter(|entry| groups.is_none_or(|set| set.contains(&entry.group)))
            .cloned()
            .collect();

        Manifest {
            game_version: self.game_version.clone(),
            manifest_version: self.manifest_version,
            bundles,
        }
    }
}
