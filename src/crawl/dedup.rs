// src/crawl/dedup.rs
// =============================================================================
// Content-based duplicate detection.
//
// Many sites serve the same page under several URLs (trailing slashes,
// tracking parameters, #anchors). We hash the normalized text of each page
// and remember the digest; a page whose digest we have already seen is a
// duplicate no matter what its URL was.
// =============================================================================

use sha2::{Digest, Sha256};
use std::collections::HashSet;

/// SHA-256 digest of a page's normalized text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentHash([u8; 32]);

impl ContentHash {
    pub fn of(text: &str) -> Self {
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&Sha256::digest(text.as_bytes()));
        Self(bytes)
    }

    /// First 12 hex characters, enough to tell hashes apart in logs
    pub fn short(&self) -> String {
        hex::encode(&self.0[..6])
    }
}

#[derive(Debug, Default)]
pub struct ContentHashes {
    seen: HashSet<ContentHash>,
}

impl ContentHashes {
    /// Records `hash`. Returns false if it was already recorded.
    pub fn insert(&mut self, hash: ContentHash) -> bool {
        self.seen.insert(hash)
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }
}
