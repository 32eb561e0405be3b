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

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use pakt_build::{BuildPipeline, BundleBuildConfig, FsAssetDatabase, StoreCompiler};
use pakt_core::{
    hash::content_hash, AssetDeclaration, BuildError, BundleCompiler, BundleDeclaration,
    BundleKind, CompileOptions, CompilerOutput, Manifest, Platform,
};
use tempfile::{tempdir, TempDir};

struct Fixture {
    /// Keeps the temp dirs alive for the test's duration.
    _dirs: Vec<TempDir>,
    asset_root: PathBuf,
    output_root: PathBuf,
    read_only_root: PathBuf,
    raw_source: PathBuf,
}

impl Fixture {
    fn new() -> Self {
        let assets = tempdir().unwrap();
        let output = tempdir().unwrap();
        let read_only = tempdir().unwrap();

        fs::write(assets.path().join("foo.txt"), b"foo contents").unwrap();
        fs::write(assets.path().join("bar.txt"), b"bar contents!").unwrap();
        fs::write(assets.path().join("one.scene"), b"scene payload").unwrap();
        let raw_source = assets.path().join("intro.mp4");
        fs::write(&raw_source, b"raw video bytes").unwrap();

        Self {
            asset_root: assets.path().to_path_buf(),
            output_root: output.path().join("bundles"),
            read_only_root: read_only.path().join("streaming"),
            raw_source,
            _dirs: vec![assets, output, read_only],
        }
    }

    fn config(&self) -> BundleBuildConfig {
        BundleBuildConfig {
            game_version: "1.2.0".to_string(),
            manifest_version: 4,
            output_root: self.output_root.clone(),
            target_platforms: vec![Platform::Linux],
            options: CompileOptions::default(),
            read_only_root: None,
            copy_groups: None,
            bundles: vec![
                BundleDeclaration {
                    relative_path: "base/common.bundle".to_string(),
                    directory: "base".to_string(),
                    bundle_name: "common".to_string(),
                    group: "base".to_string(),
                    assets: vec![
                        AssetDeclaration::new("foo.txt"),
                        AssetDeclaration::new("bar.txt"),
                    ],
                    kind: BundleKind::Compiled,
                },
                BundleDeclaration {
                    relative_path: "levels/one.bundle".to_string(),
                    directory: "levels".to_string(),
                    bundle_name: "one".to_string(),
                    group: "levels".to_string(),
                    assets: vec![AssetDeclaration::new("one.scene")],
                    kind: BundleKind::Compiled,
                },
                BundleDeclaration {
                    relative_path: "video/intro.mp4".to_string(),
                    directory: "video".to_string(),
                    bundle_name: "intro".to_string(),
                    group: "video".to_string(),
                    assets: vec![AssetDeclaration::new(self.raw_source.to_str().unwrap())],
                    kind: BundleKind::Raw,
                },
            ],
        }
    }

    fn pipeline(&self) -> BuildPipeline {
        BuildPipeline::new(
            StoreCompiler::new(&self.asset_root),
            FsAssetDatabase::new()
                .with_dependencies("foo.txt", vec!["bar.txt".to_string()]),
        )
    }

    fn output_dir(&self) -> PathBuf {
        self.output_root.join("Linux").join("1.2.0_4")
    }
}

fn read_manifest(dir: &Path) -> Manifest {
    let json = fs::read_to_string(dir.join(Manifest::MANIFEST_FILE_NAME)).unwrap();
    serde_json::from_str(&json).unwrap()
}

#[test]
fn full_pipeline_produces_manifest_and_strips_artifacts() {
    let fixture = Fixture::new();
    fixture.pipeline().execute(&fixture.config(), Platform::Linux).unwrap();

    let out = fixture.output_dir();
    assert!(out.join(Manifest::MANIFEST_FILE_NAME).exists());

    // Exactly one manifest file, zero compiler side-files.
    let mut manifest_files = 0;
    let mut side_files = 0;
    for entry in walk(&out) {
        if entry.file_name().and_then(|n| n.to_str()) == Some(Manifest::MANIFEST_FILE_NAME) {
            manifest_files += 1;
        }
        if entry.extension().is_some_and(|e| e == "manifest") {
            side_files += 1;
        }
    }
    assert_eq!(manifest_files, 1);
    assert_eq!(side_files, 0);
    // The top-level aggregate is gone too.
    assert!(!out.join("1.2.0_4").is_file());
}

#[test]
fn manifest_entries_match_physical_files() {
    let fixture = Fixture::new();
    fixture.pipeline().execute(&fixture.config(), Platform::Linux).unwrap();

    let out = fixture.output_dir();
    let manifest = read_manifest(&out);
    assert_eq!(manifest.game_version, "1.2.0");
    assert_eq!(manifest.manifest_version, 4);
    assert_eq!(manifest.bundles.len(), 3);

    for entry in &manifest.bundles {
        let bytes = fs::read(out.join(&entry.relative_path)).unwrap();
        assert_eq!(entry.length, bytes.len() as u64, "{}", entry.relative_path);
        // Store-compiled and raw hashes alike must match the bytes on disk.
        assert_eq!(entry.hash, content_hash(&bytes), "{}", entry.relative_path);
    }

    let common = &manifest.bundles[0];
    assert!(!common.is_raw);
    assert!(!common.is_scene);
    assert_eq!(common.assets[0].dependencies, ["bar.txt".to_string()]);

    let scene = &manifest.bundles[1];
    assert!(scene.is_scene);

    let raw = &manifest.bundles[2];
    assert!(raw.is_raw);
    assert!(!raw.is_scene);
    assert!(raw.assets[0].dependencies.is_empty());
    assert_eq!(raw.length, b"raw video bytes".len() as u64);
}

#[test]
fn rebuilding_is_idempotent() {
    let fixture = Fixture::new();
    let pipeline = fixture.pipeline();
    let config = fixture.config();

    pipeline.execute(&config, Platform::Linux).unwrap();
    let first = fs::read(fixture.output_dir().join(Manifest::MANIFEST_FILE_NAME)).unwrap();

    pipeline.execute(&config, Platform::Linux).unwrap();
    let second = fs::read(fixture.output_dir().join(Manifest::MANIFEST_FILE_NAME)).unwrap();

    assert_eq!(first, second);
}

#[test]
fn rebuild_clears_stale_artifacts() {
    let fixture = Fixture::new();
    let out = fixture.output_dir();
    fs::create_dir_all(&out).unwrap();
    fs::write(out.join("stale.bundle"), b"from a previous build").unwrap();

    fixture.pipeline().execute(&fixture.config(), Platform::Linux).unwrap();
    assert!(!out.join("stale.bundle").exists());
}

#[test]
fn promotion_copies_the_group_subset_with_sub_manifest() {
    let fixture = Fixture::new();
    let mut config = fixture.config();
    config.read_only_root = Some(fixture.read_only_root.clone());
    config.copy_groups = Some(vec!["base".to_string(), "video".to_string()]);

    fixture.pipeline().execute(&config, Platform::Linux).unwrap();

    let full = read_manifest(&fixture.output_dir());
    let promoted = read_manifest(&fixture.read_only_root);

    // Exactly the subset whose group is selected, preserving order.
    let expected: Vec<_> = full
        .bundles
        .iter()
        .filter(|e| e.group == "base" || e.group == "video")
        .cloned()
        .collect();
    assert_eq!(promoted.bundles, expected);
    assert_eq!(promoted.bundles.len(), 2);

    for entry in &promoted.bundles {
        assert!(fixture.read_only_root.join(&entry.relative_path).exists());
    }
    // The unselected group was not copied.
    assert!(!fixture.read_only_root.join("levels/one.bundle").exists());
}

#[test]
fn promotion_without_group_filter_copies_everything() {
    let fixture = Fixture::new();
    let mut config = fixture.config();
    config.read_only_root = Some(fixture.read_only_root.clone());

    fixture.pipeline().execute(&config, Platform::Linux).unwrap();

    let promoted = read_manifest(&fixture.read_only_root);
    assert_eq!(promoted.bundles.len(), 3);
}

#[test]
fn promotion_is_skipped_for_multi_platform_builds() {
    let fixture = Fixture::new();
    let mut config = fixture.config();
    config.read_only_root = Some(fixture.read_only_root.clone());
    config.target_platforms = vec![Platform::Linux, Platform::Windows];

    fixture.pipeline().execute(&config, Platform::Linux).unwrap();

    assert!(!fixture
        .read_only_root
        .join(Manifest::MANIFEST_FILE_NAME)
        .exists());
}

#[test]
fn raw_only_pipeline_builds_the_sibling_directory() {
    let fixture = Fixture::new();
    fixture
        .pipeline()
        .execute_raw(&fixture.config(), Platform::Linux)
        .unwrap();

    let out = fixture.output_root.join("Linux").join("1.2.0_4_rawbundles");
    assert!(out.join("video/intro.mp4").exists());
    // Compiled bundles are not part of the raw-only variant.
    assert!(!out.join("base/common.bundle").exists());

    let manifest = read_manifest(&out);
    assert_eq!(manifest.bundles.len(), 1);
    assert!(manifest.bundles.iter().all(|e| e.is_raw));
}

#[test]
fn missing_raw_source_aborts_the_build() {
    let fixture = Fixture::new();
    let mut config = fixture.config();
    config.bundles.push(BundleDeclaration {
        relative_path: "video/missing.mp4".to_string(),
        directory: "video".to_string(),
        bundle_name: "missing".to_string(),
        group: "video".to_string(),
        assets: vec![AssetDeclaration::new("/nonexistent/missing.mp4")],
        kind: BundleKind::Raw,
    });

    let err = fixture
        .pipeline()
        .execute(&config, Platform::Linux)
        .unwrap_err();
    assert!(matches!(err, BuildError::Io { .. }));
    // No manifest was written for the aborted build.
    assert!(!fixture
        .output_dir()
        .join(Manifest::MANIFEST_FILE_NAME)
        .exists());
}

#[test]
fn duplicate_relative_paths_fail_before_touching_the_filesystem() {
    let fixture = Fixture::new();
    let mut config = fixture.config();
    let mut duplicate = config.bundles[0].clone();
    duplicate.bundle_name = "copy".to_string();
    config.bundles.push(duplicate);

    let err = fixture
        .pipeline()
        .execute(&config, Platform::Linux)
        .unwrap_err();
    assert!(matches!(err, BuildError::Config(_)));
    assert!(!fixture.output_dir().exists());
}

/// A compiler that writes bundle files but forgets to report their hashes,
/// simulating a compiler/declaration mismatch.
struct ForgetfulCompiler {
    inner: StoreCompiler,
}

impl BundleCompiler for ForgetfulCompiler {
    fn compile(
        &self,
        output_dir: &Path,
        declarations: &[BundleDeclaration],
        options: &CompileOptions,
        platform: Platform,
    ) -> Result<CompilerOutput, BuildError> {
        self.inner.compile(output_dir, declarations, options, platform)?;
        Ok(CompilerOutput {
            hashes: HashMap::new(),
        })
    }
}

#[test]
fn compiler_hash_mismatch_is_an_integrity_error() {
    let fixture = Fixture::new();
    let pipeline = BuildPipeline::new(
        ForgetfulCompiler {
            inner: StoreCompiler::new(&fixture.asset_root),
        },
        FsAssetDatabase::new(),
    );

    let err = pipeline.execute(&fixture.config(), Platform::Linux).unwrap_err();
    assert!(matches!(err, BuildError::ManifestIntegrity { .. }));
}

/// Recursively lists the files under `dir`.
fn walk(dir: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    let mut stack = vec![dir.to_path_buf()];
    while let Some(current) = stack.pop() {
        for entry in fs::read_dir(&current).unwrap() {
            let path = entry.unwrap().path();
            if path.is_dir() {
                stack.push(path);
            } else {
                files.push(path);
            }
        }
    }
    files
}
