//! On-disk cache of rendered pages.
//!
//! Entries are keyed on the raw input bytes, the target language and the
//! backend selection. Changing how input is rendered does not invalidate old
//! entries; clear the cache directory after such a change.

use sha2::{Digest, Sha256};
use std::fs;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Command name used when the caller does not say which page this is
pub const UNKNOWN_COMMAND: &str = "unknown";

/// Hex characters of the digest kept in the file name
const DIGEST_LEN: usize = 12;

/// Identity of one rendered page
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub command: String,
    pub target: String,
    pub backend: String,
    pub digest: String,
}

impl CacheKey {
    /// `<command>_<target>_<backend>_<digest>.txt`
    pub fn file_name(&self) -> String {
        format!(
            "{}_{}_{}_{}.txt",
            self.command, self.target, self.backend, self.digest
        )
    }
}

fn sanitize(component: &str) -> String {
    component.replace('/', "_")
}

/// Derive the cache key for `raw`
///
/// Pure: the same inputs always give the same key. An empty command falls
/// back to [`UNKNOWN_COMMAND`].
pub fn compute_cache_key(command: &str, target: &str, backend: &str, raw: &[u8]) -> CacheKey {
    let command = if command.trim().is_empty() {
        UNKNOWN_COMMAND
    } else {
        command.trim()
    };

    let mut hasher = Sha256::new();
    hasher.update(raw);
    let digest = hex::encode(hasher.finalize());

    CacheKey {
        command: sanitize(command),
        target: sanitize(target),
        backend: sanitize(backend),
        digest: digest[..DIGEST_LEN].to_string(),
    }
}

/// Directory of rendered pages, one file per [`CacheKey`]
#[derive(Debug, Clone)]
pub struct ResultCache {
    dir: PathBuf,
}

impl ResultCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, key: &CacheKey) -> PathBuf {
        self.dir.join(key.file_name())
    }

    /// Stored page for `key`, if any
    ///
    /// Invalid UTF-8 is replaced rather than rejected. Read errors count as a
    /// miss.
    pub fn lookup(&self, key: &CacheKey) -> Option<String> {
        let path = self.path_for(key);
        match fs::read(&path) {
            Ok(bytes) => Some(String::from_utf8_lossy(&bytes).into_owned()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "cannot read cache entry");
                None
            }
        }
    }

    /// Write `text` under `key`, creating the directory if needed
    ///
    /// Failures are logged and otherwise ignored.
    pub fn store(&self, key: &CacheKey, text: &str) {
        let path = self.path_for(key);
        if let Err(e) = fs::create_dir_all(&self.dir) {
            warn!(dir = %self.dir.display(), error = %e, "cannot create cache directory");
            return;
        }
        match fs::write(&path, text) {
            Ok(()) => debug!(path = %path.display(), "cache entry written"),
            Err(e) => warn!(path = %path.display(), error = %e, "cannot write cache entry"),
        }
    }
}
