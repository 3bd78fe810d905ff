//! Copy cache for incremental builds.
//!
//! The process stage publishes every screenshot into the output directory.
//! Portfolios are rebuilt far more often than screenshots change, so the
//! stage records the SHA-256 of each source next to the copy it produced and
//! skips the copy when the source hash and the published file both match.
//!
//! Hashes are content-based rather than mtime-based so they survive
//! `git checkout`, which resets modification times.
//!
//! The manifest is a JSON file at `<output_dir>/.copy-manifest.json`, keyed by
//! the published path relative to the output directory. Pass `--no-cache` to
//! `process` or `build` to start from an empty manifest.

use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::fmt;
use std::io;
use std::path::Path;

/// Name of the cache manifest file within the output directory.
const MANIFEST_FILENAME: &str = ".copy-manifest.json";

/// Bump to invalidate existing manifests when the format changes.
const MANIFEST_VERSION: u32 = 1;

/// Hex digits of the source hash kept in cache-busting query strings.
const FINGERPRINT_LEN: usize = 10;

/// On-disk map from published path to the hash of the source it was copied from.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CopyManifest {
    pub version: u32,
    pub entries: BTreeMap<String, String>,
}

impl CopyManifest {
    /// Create an empty manifest (used for `--no-cache` or first build).
    pub fn empty() -> Self {
        Self {
            version: MANIFEST_VERSION,
            entries: BTreeMap::new(),
        }
    }

    /// Load from the output directory. Returns an empty manifest if the
    /// file doesn't exist or can't be parsed.
    pub fn load(output_dir: &Path) -> Self {
        let content = match std::fs::read_to_string(output_dir.join(MANIFEST_FILENAME)) {
            Ok(c) => c,
            Err(_) => return Self::empty(),
        };
        match serde_json::from_str::<Self>(&content) {
            Ok(m) if m.version == MANIFEST_VERSION => m,
            Ok(_) => {
                log::debug!("copy manifest version changed, starting fresh");
                Self::empty()
            }
            Err(e) => {
                log::warn!("ignoring unreadable copy manifest: {e}");
                Self::empty()
            }
        }
    }

    pub fn save(&self, output_dir: &Path) -> io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(output_dir.join(MANIFEST_FILENAME), json)
    }

    /// True when `published` was copied from a source with `source_hash`
    /// and is still on disk.
    pub fn is_fresh(&self, published: &str, source_hash: &str, output_dir: &Path) -> bool {
        self.entries.get(published).map(String::as_str) == Some(source_hash)
            && output_dir.join(published).exists()
    }

    pub fn record(&mut self, published: String, source_hash: String) {
        self.entries.insert(published, source_hash);
    }
}

/// SHA-256 hash of a file's contents, returned as a hex string.
pub fn hash_file(path: &Path) -> io::Result<String> {
    let bytes = std::fs::read(path)?;
    Ok(format!("{:x}", Sha256::digest(&bytes)))
}

/// Short content fingerprint for `?v=` cache busting.
pub fn fingerprint(path: &Path) -> io::Result<String> {
    let mut hash = hash_file(path)?;
    hash.truncate(FINGERPRINT_LEN);
    Ok(hash)
}

/// Summary of copy work for a build run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CopyStats {
    pub copied: u32,
    pub unchanged: u32,
}

impl CopyStats {
    pub fn total(&self) -> u32 {
        self.copied + self.unchanged
    }
}

impl fmt::Display for CopyStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.unchanged > 0 {
            write!(
                f,
                "{} copied, {} unchanged ({} total)",
                self.copied,
                self.unchanged,
                self.total()
            )
        } else {
            write!(f, "{} copied", self.copied)
        }
    }
}
