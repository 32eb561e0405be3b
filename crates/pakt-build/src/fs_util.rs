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

//! Filesystem primitives used by the build pipeline.

use std::fs;
use std::io;
use std::path::Path;

use walkdir::WalkDir;

use pakt_core::BuildError;

/// Recreates `dir` as an empty directory: deletes it if it exists, then
/// creates it (including missing parents). Guarantees no stale artifacts
/// leak between builds at the same version.
pub fn create_empty_dir(dir: &Path) -> Result<(), BuildError> {
    if dir.exists() {
        fs::remove_dir_all(dir).map_err(|e| BuildError::io(dir, e))?;
    }
    fs::create_dir_all(dir).map_err(|e| BuildError::io(dir, e))?;
    Ok(())
}

/// Copies `source` to `destination`, creating intermediate directories.
///
/// # Errors
/// Fails if the destination already exists (no overwrite) or the source is
/// missing.
pub fn copy_no_overwrite(source: &Path, destination: &Path) -> Result<(), BuildError> {
    if destination.exists() {
        return Err(BuildError::io(
            destination,
            io::Error::new(io::ErrorKind::AlreadyExists, "destination already exists"),
        ));
    }
    if let Some(parent) = destination.parent() {
        fs::create_dir_all(parent).map_err(|e| BuildError::io(parent, e))?;
    }
    fs::copy(source, destination).map_err(|e| BuildError::io(source, e))?;
    Ok(())
}

/// Deletes the compiler's intermediate side artifacts under `output_dir`:
/// every file with the `.manifest` extension plus the top-level aggregate
/// file named after the output directory itself. These have no further use
/// once the manifest is built.
pub fn strip_compiler_artifacts(output_dir: &Path) -> Result<(), BuildError> {
    let aggregate_name = output_dir.file_name().map(|n| n.to_os_string());

    for entry in WalkDir::new(output_dir) {
        let entry = entry.map_err(|e| {
            let path = e
                .path()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| output_dir.to_path_buf());
            BuildError::io(path, e.into())
        })?;
        if !entry.file_type().is_file() {
            continue;
        }

        let is_side_manifest = entry.path().extension().is_some_and(|ext| ext == "manifest");
        let is_aggregate = aggregate_name
            .as_deref()
            .is_some_and(|name| entry.file_name() == name);

        if is_side_manifest || is_aggregate {
            log::debug!("Stripping compiler artifact '{}'", entry.path().display());
            fs::remove_file(entry.path()).map_err(|e| BuildError::io(entry.path(), e))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn create_empty_dir_clears_previous_contents() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("out");
        fs::create_dir_all(target.join("stale")).unwrap();
        fs::write(target.join("stale/file.bin"), b"old").unwrap();

        create_empty_dir(&target).unwrap();
        assert!(target.exists());
        assert_eq!(fs::read_dir(&target).unwrap().count(), 0);
    }

    #[test]
    fn copy_no_overwrite_rejects_existing_destination() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("src.bin");
        let destination = dir.path().join("dst.bin");
        fs::write(&source, b"data").unwrap();
        fs::write(&destination, b"already here").unwrap();

        let err = copy_no_overwrite(&source, &destination).unwrap_err();
        assert!(matches!(err, BuildError::Io { .. }));
    }

    #[test]
    fn copy_no_overwrite_rejects_missing_source() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("missing.bin");
        let destination = dir.path().join("nested/dst.bin");

        assert!(copy_no_overwrite(&source, &destination).is_err());
    }

    #[test]
    fn strip_removes_side_manifests_and_aggregate() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("1.0.0_3");
        fs::create_dir_all(out.join("sub")).unwrap();
        fs::write(out.join("a.bundle"), b"keep").unwrap();
        fs::write(out.join("a.bundle.manifest"), b"strip").unwrap();
        fs::write(out.join("sub/b.bundle.manifest"), b"strip").unwrap();
        // The aggregate carries the output directory's own name.
        fs::write(out.join("1.0.0_3"), b"strip").unwrap();

        strip_compiler_artifacts(&out).unwrap();

        assert!(out.join("a.bundle").exists());
        assert!(!out.join("a.bundle.manifest").exists());
        assert!(!out.join("sub/b.bundle.manifest").exists());
        assert!(!out.join("1.0.0_3").is_file());
    }
}
