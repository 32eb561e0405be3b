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

//! The build-time half of the pakt system.
//!
//! [`pipeline::BuildPipeline`] drives a build invocation end to end:
//! prepare the versioned output root, run the bundle compiler, strip its
//! intermediate artifacts, copy raw bundles, assemble and persist the
//! manifest, and optionally promote a group subset to a read-only root.
//! [`manifest_builder::ManifestBuilder`] does the manifest assembly;
//! [`host`] provides the default `BundleCompiler`/`AssetDatabase` adapters
//! used by the CLI and the integration tests.

pub mod config;
pub mod fs_util;
pub mod host;
pub mod manifest_builder;
pub mod pipeline;

pub use config::BundleBuildConfig;
pub use host::{FsAssetDatabase, StoreCompiler};
pub use manifest_builder::{BuildRequest, ManifestBuilder};
pub use pipeline::BuildPipeline;
