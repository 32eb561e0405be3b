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

//! Defines the hierarchy of error types for the build pipeline.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// A malformed or inconsistent set of build declarations.
#[derive(Debug)]
pub enum ConfigError {
    /// Two declarations share the same relative output path.
    DuplicateRelativePath {
        /// The offending relative path.
        relative_path: String,
    },
    /// A compiled-kind declaration lists no assets.
    EmptyBundle {
        /// The name of the empty bundle.
        bundle_name: String,
    },
    /// A raw-kind declaration must carry exactly one asset.
    RawBundleAssetCount {
        /// The name of the offending bundle.
        bundle_name: String,
        /// The number of assets it declared.
        count: usize,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::DuplicateRelativePath { relative_path } => {
                write!(f, "Duplicate relative output path '{relative_path}'")
            }
            ConfigError::EmptyBundle { bundle_name } => {
                write!(f, "Bundle '{bundle_name}' declares no assets")
            }
            ConfigError::RawBundleAssetCount { bundle_name, count } => {
                write!(
                    f,
                    "Raw bundle '{bundle_name}' must declare exactly one asset, found {count}"
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// A failure anywhere in the build pipeline. Every stage fails fast; the
/// first error aborts the whole build and surfaces here.
#[derive(Debug)]
pub enum BuildError {
    /// The build declarations are malformed or inconsistent.
    Config(ConfigError),
    /// The external bundle compiler reported a failure.
    Compiler {
        /// The compiler's failure report.
        message: String,
    },
    /// Compiler output and declarations disagree: a declared bundle has no
    /// reported content hash.
    ManifestIntegrity {
        /// The relative path missing from the compiler's hash map.
        relative_path: String,
    },
    /// A filesystem operation failed.
    Io {
        /// The path the operation was acting on.
        path: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },
}

impl BuildError {
    /// Wraps an I/O error with the path it occurred on.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        BuildError::Io {
            path: path.into(),
            source,
        }
    }
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildError::Config(err) => write!(f, "Invalid build configuration: {err}"),
            BuildError::Compiler { message } => {
                write!(f, "Bundle compiler failed: {message}")
            }
            BuildError::ManifestIntegrity { relative_path } => {
                write!(
                    f,
                    "Compiler reported no hash for declared bundle '{relative_path}'"
                )
            }
            BuildError::Io { path, source } => {
                write!(f, "I/O failure on '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for BuildError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BuildError::Config(err) => Some(err),
            BuildError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ConfigError> for BuildError {
    fn from(err: ConfigError) -> Self {
        BuildError::Config(err)
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use super::*;

    #[test]
    fn config_error_display() {
        let err = ConfigError::DuplicateRelativePath {
            relative_path: "a/x.bundle".to_string(),
        };
        assert_eq!(
            format!("{err}"),
            "Duplicate relative output path 'a/x.bundle'"
        );

        let err_raw = ConfigError::RawBundleAssetCount {
            bundle_name: "video".to_string(),
            count: 2,
        };
        assert_eq!(
            format!("{err_raw}"),
            "Raw bundle 'video' must declare exactly one asset, found 2"
        );
    }

    #[test]
    fn build_error_display_wrapping_config_error() {
        let err: BuildError = ConfigError::EmptyBundle {
            bundle_name: "ui".to_string(),
        }
        .into();
        assert_eq!(
            format!("{err}"),
            "Invalid build configuration: Bundle 'ui' declares no assets"
        );
        assert!(err.source().is_some());
    }

    #[test]
    fn build_error_display_integrity() {
        let err = BuildError::ManifestIntegrity {
            relative_path: "a/x.bundle".to_string(),
        };
        assert_eq!(
            format!("{err}"),
            "Compiler reported no hash for declared bundle 'a/x.bundle'"
        );
    }

    #[test]
    fn build_error_io_keeps_source() {
        let err = BuildError::io(
            "out/bundle.bin",
            io::Error::new(io::ErrorKind::AlreadyExists, "exists"),
        );
        assert!(format!("{err}").contains("out/bundle.bin"));
        assert!(err.source().is_some());
    }
}
