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

//! Build target platforms.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A target platform a build can be produced for.
///
/// The `Display` form is used verbatim as the per-platform path segment of
/// the output directory, so renaming a variant is a breaking change to the
/// output layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Platform {
    Windows,
    Linux,
    MacOS,
    Android,
    Ios,
    WebGL,
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Platform::Windows => "Windows",
            Platform::Linux => "Linux",
            Platform::MacOS => "MacOS",
            Platform::Android => "Android",
            Platform::Ios => "Ios",
            Platform::WebGL => "WebGL",
        };
        write!(f, "{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_path_segment() {
        assert_eq!(Platform::Windows.to_string(), "Windows");
        assert_eq!(Platform::WebGL.to_string(), "WebGL");
    }
}
