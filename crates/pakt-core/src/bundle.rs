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

//! Build-time declarations describing what a build invocation should produce.
//!
//! A [`BundleDeclaration`] is the input-side description of one compiled
//! output unit; the output-side record lives in
//! [`crate::manifest::BundleManifestEntry`]. Declarations carry no hashes or
//! byte lengths — those are only known once the compiler has run.

use serde::{Deserialize, Serialize};

/// How a declared bundle is turned into a physical file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BundleKind {
    /// Compiled by the host engine's bundle compiler.
    Compiled,
    /// A single source asset copied byte-for-byte with no compilation.
    Raw,
}

/// One source asset inside a declared bundle.
///
/// The declaration carries only the source-addressable identifier. Direct
/// dependencies are resolved at manifest-build time through
/// [`crate::compiler::AssetDatabase`] and recorded on the manifest entry,
/// never here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetDeclaration {
    /// The opaque, source-addressable asset identifier (typically a path).
    pub name: String,
}

impl AssetDeclaration {
    /// Creates a declaration for the named asset.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// The declaration of one compiled output unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BundleDeclaration {
    /// Output location relative to the build's output root. Unique across
    /// all declarations in a build.
    pub relative_path: String,
    /// The logical directory this bundle belongs to.
    pub directory: String,
    /// The bundle's name.
    pub bundle_name: String,
    /// The resource group tag used by the promotion step's filter.
    pub group: String,
    /// The assets packed into this bundle, in order. Raw bundles carry
    /// exactly one.
    pub assets: Vec<AssetDeclaration>,
    /// Whether this bundle is engine-compiled or raw-copied.
    pub kind: BundleKind,
}

/// Payload compression applied by the bundle compiler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Compression {
    /// Store the payload as-is.
    #[default]
    None,
    /// LZ4 block compression.
    Lz4,
}

/// Options forwarded to the bundle compiler for compiled-kind bundles.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct CompileOptions {
    /// Payload compression for compiled bundles.
    #[serde(default)]
    pub compression: Compression,
    /// Request bit-for-bit reproducible output for identical inputs.
    #[serde(default)]
    pub deterministic: bool,
}
