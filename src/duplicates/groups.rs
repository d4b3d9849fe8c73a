//! Fingerprint grouping and duplicate group management.
//!
//! # Overview
//!
//! [`GroupMap`] is the accumulator a scan threads through every per-root
//! walk. Each fingerprinted path is appended to the entry for its hash, in
//! discovery order. At the end of the scan the map is consumed and only
//! entries with two or more members are kept as [`DuplicateGroup`]s.
//!
//! # Example
//!
//! ```
//! use dupfind::duplicates::GroupMap;
//! use std::path::PathBuf;
//!
//! let mut map = GroupMap::new();
//! map.insert([1u8; 32], 3, PathBuf::from("/r/a.txt"));
//! map.insert([1u8; 32], 3, PathBuf::from("/r/sub/b.txt"));
//! map.insert([2u8; 32], 3, PathBuf::from("/r/e.txt"));
//!
//! let groups = map.into_duplicates();
//! assert_eq!(groups.len(), 1);
//! assert_eq!(groups[0].files, vec![PathBuf::from("/r/a.txt"), PathBuf::from("/r/sub/b.txt")]);
//! ```

use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::scanner::{hash_to_hex, Hash};

/// Confirmed duplicate group of files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateGroup {
    /// SHA-256 hash of the file content, serialized as lowercase hex
    #[serde(with = "hex_hash")]
    pub hash: Hash,
    /// Size in bytes of the first member, as read while hashing
    pub size: u64,
    /// Member paths in discovery order
    pub files: Vec<PathBuf>,
}

impl DuplicateGroup {
    /// Create a new duplicate group.
    ///
    /// # Arguments
    ///
    /// * `hash` - SHA-256 content hash
    /// * `size` - File size in bytes
    /// * `files` - Member paths in discovery order
    #[must_use]
    pub fn new(hash: Hash, size: u64, files: Vec<PathBuf>) -> Self {
        Self { hash, size, files }
    }

    /// Number of files in this group.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Check if this group is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Number of duplicate copies (total - 1 original).
    #[must_use]
    pub fn duplicate_count(&self) -> usize {
        self.files.len().saturating_sub(1)
    }

    /// Space taken by every copy beyond the first.
    #[must_use]
    pub fn wasted_space(&self) -> u64 {
        self.size * self.duplicate_count() as u64
    }

    /// Hash as hexadecimal string.
    #[must_use]
    pub fn hash_hex(&self) -> String {
        hash_to_hex(&self.hash)
    }

    /// Borrow the member paths.
    #[must_use]
    pub fn paths(&self) -> &[PathBuf] {
        &self.files
    }
}

#[derive(Debug)]
struct GroupEntry {
    /// Position of this fingerprint's first discovery
    first_seen: usize,
    size: u64,
    paths: Vec<PathBuf>,
}

/// Accumulator from fingerprint to member paths.
///
/// Each file is recorded at most once, keyed by an identity path. The
/// finder uses the canonical path, so the same file reached through two
/// spellings (overlapping roots, `..`, a symlinked root) counts once.
#[derive(Debug, Default)]
pub struct GroupMap {
    entries: HashMap<Hash, GroupEntry>,
    /// Identity paths already recorded
    seen: HashSet<PathBuf>,
}

impl GroupMap {
    /// Create an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `path` to the group for `hash`, creating the group if absent.
    ///
    /// The path is its own identity. Returns `false` if it was already
    /// recorded.
    pub fn insert(&mut self, hash: Hash, size: u64, path: PathBuf) -> bool {
        let identity = path.clone();
        self.insert_identified(hash, size, path, identity)
    }

    /// Append `path` under `hash` unless a file with the same `identity` was
    /// already recorded.
    ///
    /// Returns `false` if the identity was already recorded.
    pub fn insert_identified(
        &mut self,
        hash: Hash,
        size: u64,
        path: PathBuf,
        identity: PathBuf,
    ) -> bool {
        if !self.seen.insert(identity) {
            return false;
        }

        let first_seen = self.entries.len();
        match self.entries.entry(hash) {
            Entry::Occupied(mut entry) => entry.get_mut().paths.push(path),
            Entry::Vacant(entry) => {
                entry.insert(GroupEntry {
                    first_seen,
                    size,
                    paths: vec![path],
                });
            }
        }
        true
    }

    /// Whether a file with this identity path has already been recorded.
    #[must_use]
    pub fn contains_path(&self, identity: &Path) -> bool {
        self.seen.contains(identity)
    }

    /// Paths recorded for `hash`, in discovery order.
    #[must_use]
    pub fn get(&self, hash: &Hash) -> Option<&[PathBuf]> {
        self.entries.get(hash).map(|e| e.paths.as_slice())
    }

    /// Number of distinct fingerprints.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of recorded paths across all fingerprints.
    #[must_use]
    pub fn total_paths(&self) -> usize {
        self.seen.len()
    }

    /// Iterate over every fingerprint and its paths, singletons included.
    pub fn iter(&self) -> impl Iterator<Item = (&Hash, &[PathBuf])> {
        self.entries
            .iter()
            .map(|(hash, entry)| (hash, entry.paths.as_slice()))
    }

    /// Consume the map, keeping only groups with two or more members.
    ///
    /// Groups come out in order of their first discovery.
    #[must_use]
    pub fn into_duplicates(self) -> Vec<DuplicateGroup> {
        let mut kept: Vec<(usize, DuplicateGroup)> = self
            .entries
            .into_iter()
            .filter(|(_, entry)| entry.paths.len() > 1)
            .map(|(hash, entry)| {
                (
                    entry.first_seen,
                    DuplicateGroup::new(hash, entry.size, entry.paths),
                )
            })
            .collect();

        kept.sort_unstable_by_key(|(first_seen, _)| *first_seen);
        kept.into_iter().map(|(_, group)| group).collect()
    }
}

mod hex_hash {
    use serde::{de, Deserialize, Deserializer, Serializer};

    use crate::scanner::{hash_to_hex, hex_to_hash, Hash};

    pub fn serialize<S: Serializer>(hash: &Hash, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hash_to_hex(hash))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Hash, D::Error> {
        let hex = String::deserialize(deserializer)?;
        hex_to_hash(&hex).ok_or_else(|| de::Error::custom(format!("invalid hash: {hex}")))
    }
}
