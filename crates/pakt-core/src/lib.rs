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

//! Foundational contracts and primitive types for the pakt bundle system.
//!
//! This crate defines the "common language" shared by the build pipeline and
//! the runtime: bundle and asset declarations, the persisted manifest model
//! and its wire contract, the capability traits a host engine implements
//! (`BundleCompiler`, `AssetDatabase`), the content-hash codec, and the
//! build-side error taxonomy. It knows nothing about how bundles are
//! physically compiled or how the pipeline is driven; those live in
//! higher-level crates.

pub mod bundle;
pub mod compiler;
pub mod error;
pub mod hash;
pub mod manifest;
pub mod platform;

pub use bundle::{AssetDeclaration, BundleDeclaration, BundleKind, CompileOptions, Compression};
pub use compiler::{AssetDatabase, BundleCompiler, CompilerOutput};
pub use error::{BuildError, ConfigError};
pub use manifest::{AssetManifestEntry, BundleManifestEntry, Manifest};
pub use platform::Platform;
