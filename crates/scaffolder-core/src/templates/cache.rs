//! Content-addressed archive cache
//!
//! Layout under the cache root:
//! - `objects/<sha256 of archive bytes>.zip`
//! - `refs/<sha256 of reference>` holding the digest last fetched for that reference
//! - `refs/<sha256 of reference>.etag` holding the server's validator, when it sent one

use crate::error::FetchError;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};

/// Whether a cached archive may be served without going to the network
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CachePolicy {
    #[default]
    PreferCache,
    Refresh,
}

#[derive(Debug, Clone)]
pub struct ArchiveCache {
    root: PathBuf,
}

impl ArchiveCache {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Cache in the platform cache directory, namespaced by product
    pub fn for_product(product: &str) -> Self {
        let base = dirs::cache_dir().unwrap_or_else(std::env::temp_dir);
        Self::new(base.join(product).join("archives"))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn digest(bytes: &[u8]) -> String {
        hex(&Sha256::digest(bytes))
    }

    fn object_path(&self, digest: &str) -> PathBuf {
        self.root.join("objects").join(format!("{digest}.zip"))
    }

    fn ref_path(&self, key: &str) -> PathBuf {
        self.root.join("refs").join(Self::digest(key.as_bytes()))
    }

    fn etag_path(&self, key: &str) -> PathBuf {
        self.ref_path(key).with_extension("etag")
    }

    /// Archive bytes last stored for `key`, if still present and intact
    pub fn lookup(&self, key: &str) -> Option<Vec<u8>> {
        let digest = std::fs::read_to_string(self.ref_path(key)).ok()?;
        let digest = digest.trim();
        let bytes = self.load(digest)?;
        if Self::digest(&bytes) != digest {
            tracing::warn!(key, "cached archive is corrupt, ignoring it");
            return None;
        }
        Some(bytes)
    }

    /// Archive bytes by content digest
    pub fn load(&self, digest: &str) -> Option<Vec<u8>> {
        std::fs::read(self.object_path(digest)).ok()
    }

    /// Validator the server sent with the archive last stored for `key`
    pub fn etag(&self, key: &str) -> Option<String> {
        let etag = std::fs::read_to_string(self.etag_path(key)).ok()?;
        let etag = etag.trim();
        (!etag.is_empty()).then(|| etag.to_string())
    }

    /// Store `bytes` and point `key` at them. Returns the content digest.
    ///
    /// A previous validator for `key` is replaced, or removed when `etag` is `None`.
    pub fn store(&self, key: &str, bytes: &[u8], etag: Option<&str>) -> Result<String, FetchError> {
        let digest = Self::digest(bytes);
        let object = self.object_path(&digest);
        if !object.exists() {
            write_atomic(&object, bytes)?;
        }
        write_atomic(&self.ref_path(key), digest.as_bytes())?;

        let etag_path = self.etag_path(key);
        match etag {
            Some(etag) => write_atomic(&etag_path, etag.as_bytes())?,
            None => match std::fs::remove_file(&etag_path) {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(FetchError::io(etag_path, e)),
            },
        }
        Ok(digest)
    }

    /// Remove every cached archive
    pub fn clear(&self) -> Result<(), FetchError> {
        match std::fs::remove_dir_all(&self.root) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(FetchError::io(&self.root, e)),
        }
    }
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), FetchError> {
    let parent = path.parent().unwrap_or(Path::new("."));
    std::fs::create_dir_all(parent).map_err(|e| FetchError::io(parent, e))?;

    let tmp = path.with_extension(format!("tmp{}", std::process::id()));
    std::fs::write(&tmp, bytes).map_err(|e| FetchError::io(&tmp, e))?;
    std::fs::rename(&tmp, path).map_err(|e| {
        let _ = std::fs::remove_file(&tmp);
        FetchError::io(path, e)
    })
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}
