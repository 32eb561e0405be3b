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

//! Content hashing for bundle files.

/// Computes the content hash of raw bytes: BLAKE3, lowercase hex.
///
/// This is the hash recorded in the manifest for raw bundles and the one
/// the default compiler reports for compiled bundles.
pub fn content_hash(bytes: &[u8]) -> String {
    blake3::hash(bytes).to_hex().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_bytes_hash_identically() {
        assert_eq!(content_hash(b"bundle"), content_hash(b"bundle"));
    }

    #[test]
    fn different_bytes_hash_differently() {
        assert_ne!(content_hash(b"bundle-a"), content_hash(b"bundle-b"));
    }

    #[test]
    fn hash_is_lowercase_hex() {
        let hash = content_hash(b"bundle");
        assert_eq!(hash.len(), 64);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }
}
