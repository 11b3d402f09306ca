//! Archive fetching from remote URLs or local directories
//!
//! Both remote and local sources go through zip archives:
//! - Remote: downloads the archive, keeping a copy in the content-addressed cache.
//!   Cached copies of branch or `HEAD` references are revalidated with the
//!   server's ETag; only pinned commit archives are served without asking.
//! - Local: packs the directory into an in-memory zip, then uses it
//!
//! A top-level directory shared by every entry is stripped on extraction, so a
//! local checkout and its GitHub archive materialize the same. Flat archives
//! keep their paths. Symlinks in local directories are never packed.

use super::cache::{ArchiveCache, CachePolicy};
use super::source::ArchiveSource;
use crate::error::FetchError;
use crate::product::ProductConfig;
use reqwest::header::{ETAG, IF_NONE_MATCH};
use reqwest::StatusCode;
use std::collections::BTreeSet;
use std::io::{Cursor, Read, Write};
use std::path::{Component, Path, PathBuf};
use tokio::fs;
use zip::result::ZipError;
use zip::write::SimpleFileOptions;
use zip::{ZipArchive, ZipWriter};

/// Directory names never packed from local sources
const SKIPPED_DIRS: &[&str] = &[".git"];

/// Selects archive paths (relative to the archive root) for a filtered extraction
pub struct PathFilter {
    description: String,
    predicate: Box<dyn Fn(&Path) -> bool + Send + Sync>,
}

impl PathFilter {
    pub fn new(
        description: impl Into<String>,
        predicate: impl Fn(&Path) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            description: description.into(),
            predicate: Box::new(predicate),
        }
    }

    /// Everything at or below `prefix`, compared component by component
    pub fn subtree(prefix: impl Into<PathBuf>) -> Self {
        let prefix = prefix.into();
        let description = prefix.display().to_string();
        Self::new(description, move |path| path.starts_with(&prefix))
    }

    pub fn matches(&self, path: &Path) -> bool {
        (self.predicate)(path)
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

/// One archive entry, relative to the archive root
#[derive(Debug, Clone)]
struct ArchiveEntry {
    path: PathBuf,
    contents: Option<Vec<u8>>,
    mode: Option<u32>,
}

impl ArchiveEntry {
    fn is_dir(&self) -> bool {
        self.contents.is_none()
    }
}

/// Archive fetcher - retrieves archives and materializes them on disk
pub struct ArchiveFetcher {
    client: reqwest::Client,
    cache: ArchiveCache,
    policy: CachePolicy,
}

impl ArchiveFetcher {
    /// Create a new fetcher with a custom user agent
    pub fn new(user_agent: &str, cache: ArchiveCache) -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent(user_agent)
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
            cache,
            policy: CachePolicy::default(),
        }
    }

    /// Create a fetcher from a product config, caching under the user cache directory
    pub fn from_config<C: ProductConfig>(config: &C) -> Self {
        Self::new(config.user_agent(), ArchiveCache::for_product(config.name()))
    }

    pub fn with_policy(mut self, policy: CachePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn cache(&self) -> &ArchiveCache {
        &self.cache
    }

    /// Raw archive bytes for a source
    pub async fn fetch_archive(&self, source: &ArchiveSource) -> Result<Vec<u8>, FetchError> {
        match source {
            ArchiveSource::Local(path) => {
                if path.is_dir() {
                    Self::pack_directory(path)
                } else {
                    fs::read(path).await.map_err(|e| FetchError::io(path, e))
                }
            }
            ArchiveSource::Remote(url) => {
                let key = source.cache_key();
                let cached = match self.policy {
                    CachePolicy::PreferCache => self.cache.lookup(&key),
                    CachePolicy::Refresh => None,
                };
                if let Some(bytes) = &cached {
                    if source.is_immutable() {
                        tracing::debug!(%url, "using cached archive of pinned revision");
                        return Ok(bytes.clone());
                    }
                }

                let mut request = self.client.get(url.clone());
                if cached.is_some() {
                    if let Some(etag) = self.cache.etag(&key) {
                        request = request.header(IF_NONE_MATCH, etag);
                    }
                }

                tracing::info!(%url, revalidating = cached.is_some(), "downloading archive");
                let response = match request.send().await {
                    Ok(response) => response,
                    Err(source) => {
                        return match cached {
                            Some(bytes) => {
                                tracing::warn!(%url, error = %source, "could not revalidate, using cached archive");
                                Ok(bytes)
                            }
                            None => Err(FetchError::Network {
                                url: url.to_string(),
                                source,
                            }),
                        };
                    }
                };

                let status = response.status();
                if let Some(bytes) = cached {
                    if status == StatusCode::NOT_MODIFIED {
                        tracing::debug!(%url, "cached archive is current");
                        return Ok(bytes);
                    }
                    if status.is_server_error() {
                        tracing::warn!(%url, %status, "server error, using cached archive");
                        return Ok(bytes);
                    }
                }

                if !status.is_success() {
                    return Err(FetchError::Http {
                        url: url.to_string(),
                        status: status.as_u16(),
                    });
                }

                let etag = response
                    .headers()
                    .get(ETAG)
                    .and_then(|value| value.to_str().ok())
                    .map(str::to_string);

                let bytes = response
                    .bytes()
                    .await
                    .map_err(|source| FetchError::Network {
                        url: url.to_string(),
                        source,
                    })?
                    .to_vec();

                // Never cache something that is not a readable archive
                ZipArchive::new(Cursor::new(bytes.as_slice())).map_err(|source| {
                    FetchError::Archive {
                        reference: key.clone(),
                        source,
                    }
                })?;

                if let Err(e) = self.cache.store(&key, &bytes, etag.as_deref()) {
                    tracing::warn!(error = %e, "failed to cache archive");
                }
                Ok(bytes)
            }
        }
    }

    /// Build a zip of a local directory, rooted at the directory's own name
    pub fn pack_directory(dir: &Path) -> Result<Vec<u8>, FetchError> {
        let root = dir
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "archive".to_string());
        let zip_err = |source: ZipError| FetchError::Archive {
            reference: dir.display().to_string(),
            source,
        };

        let mut zip_buffer = Vec::new();
        {
            let mut zip = ZipWriter::new(Cursor::new(&mut zip_buffer));
            let options =
                SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

            let walker = walkdir::WalkDir::new(dir)
                .sort_by_file_name()
                .into_iter()
                .filter_entry(|e| {
                    !(e.file_type().is_dir()
                        && SKIPPED_DIRS
                            .iter()
                            .any(|skipped| e.file_name() == std::ffi::OsStr::new(skipped)))
                });

            for entry in walker {
                let entry = entry.map_err(|e| {
                    let path = e.path().map(Path::to_path_buf).unwrap_or_else(|| dir.to_path_buf());
                    FetchError::io(path, e.into())
                })?;
                let relative = match entry.path().strip_prefix(dir) {
                    Ok(rel) if !rel.as_os_str().is_empty() => rel,
                    _ => continue,
                };
                let name = format!("{}/{}", root, archive_name(relative));

                if entry.path_is_symlink() {
                    tracing::warn!(path = %entry.path().display(), "skipping symlink");
                    continue;
                }
                if entry.file_type().is_dir() {
                    zip.add_directory(name, options).map_err(zip_err)?;
                } else {
                    let content =
                        std::fs::read(entry.path()).map_err(|e| FetchError::io(entry.path(), e))?;
                    let file_options = match file_mode(entry.path()) {
                        Some(mode) => options.unix_permissions(mode),
                        None => options,
                    };
                    zip.start_file(name, file_options).map_err(zip_err)?;
                    zip.write_all(&content)
                        .map_err(|e| zip_err(ZipError::from(e)))?;
                }
            }

            zip.finish().map_err(zip_err)?;
        }

        Ok(zip_buffer)
    }

    /// Read an archive into memory
    ///
    /// When every entry sits under one shared top-level directory, that
    /// directory is stripped. Archives without such a root keep their paths.
    fn read_entries(bytes: &[u8], reference: &str) -> Result<Vec<ArchiveEntry>, FetchError> {
        let zip_err = |source: ZipError| FetchError::Archive {
            reference: reference.to_string(),
            source,
        };
        let mut archive = ZipArchive::new(Cursor::new(bytes)).map_err(zip_err)?;

        let mut entries = Vec::new();
        for i in 0..archive.len() {
            let mut file = archive.by_index(i).map_err(zip_err)?;

            let Some(enclosed) = file.enclosed_name() else {
                tracing::warn!(name = file.name(), "skipping archive entry outside its root");
                continue;
            };
            let path: PathBuf = enclosed
                .components()
                .filter(|c| matches!(c, Component::Normal(_)))
                .collect();
            if path.as_os_str().is_empty() {
                continue;
            }

            let contents = if file.is_dir() {
                None
            } else {
                let mut contents = Vec::new();
                file.read_to_end(&mut contents)
                    .map_err(|e| zip_err(ZipError::from(e)))?;
                Some(contents)
            };

            entries.push(ArchiveEntry {
                path,
                contents,
                mode: file.unix_mode(),
            });
        }

        if let Some(root) = shared_root(&entries) {
            tracing::debug!(root = %root.display(), "stripping archive root");
            entries = entries
                .into_iter()
                .filter_map(|mut entry| {
                    let stripped = entry.path.strip_prefix(&root).ok()?.to_path_buf();
                    if stripped.as_os_str().is_empty() {
                        return None;
                    }
                    entry.path = stripped;
                    Some(entry)
                })
                .collect();
        }

        Ok(entries)
    }

    async fn write_entries<'a>(
        dest: &Path,
        entries: impl IntoIterator<Item = &'a ArchiveEntry>,
    ) -> Result<Vec<PathBuf>, FetchError> {
        let mut written = Vec::new();
        for entry in entries {
            let target = dest.join(&entry.path);
            match &entry.contents {
                None => {
                    fs::create_dir_all(&target)
                        .await
                        .map_err(|e| FetchError::io(&target, e))?;
                }
                Some(contents) => {
                    if let Some(parent) = target.parent() {
                        fs::create_dir_all(parent)
                            .await
                            .map_err(|e| FetchError::io(parent, e))?;
                    }
                    fs::write(&target, contents)
                        .await
                        .map_err(|e| FetchError::io(&target, e))?;
                    apply_mode(&target, entry.mode).await?;
                    written.push(entry.path.clone());
                }
            }
        }
        Ok(written)
    }

    /// Materialize a whole archive into `dest`
    ///
    /// A non-empty `dest` is refused unless `force` is set. The archive is
    /// fetched completely before `dest` is created, so a failed fetch leaves
    /// nothing behind. Returns the relative paths of the files written.
    pub async fn clone_into(
        &self,
        source: &ArchiveSource,
        dest: &Path,
        force: bool,
    ) -> Result<Vec<PathBuf>, FetchError> {
        if !force && !is_empty_or_missing(dest) {
            return Err(FetchError::DestinationNotEmpty {
                path: dest.to_path_buf(),
            });
        }

        let bytes = self.fetch_archive(source).await?;
        let entries = Self::read_entries(&bytes, &source.to_string())?;

        fs::create_dir_all(dest)
            .await
            .map_err(|e| FetchError::io(dest, e))?;
        let written = Self::write_entries(dest, &entries).await?;

        tracing::debug!(dest = %dest.display(), files = written.len(), "cloned archive");
        Ok(written)
    }

    /// Materialize only the entries matching `filter` into `dest`
    ///
    /// Matched entries keep their archive-relative path under `dest`. When no
    /// file matches, nothing is written and `EmptyExtraction` is returned.
    pub async fn extract_filtered(
        &self,
        source: &ArchiveSource,
        dest: &Path,
        filter: &PathFilter,
    ) -> Result<Vec<PathBuf>, FetchError> {
        let bytes = self.fetch_archive(source).await?;
        let entries = Self::read_entries(&bytes, &source.to_string())?;

        let matched: Vec<&ArchiveEntry> = entries.iter().filter(|e| filter.matches(&e.path)).collect();
        if !matched.iter().any(|e| !e.is_dir()) {
            return Err(FetchError::EmptyExtraction {
                reference: source.to_string(),
                filter: filter.description().to_string(),
            });
        }

        fs::create_dir_all(dest)
            .await
            .map_err(|e| FetchError::io(dest, e))?;
        let written = Self::write_entries(dest, matched).await?;

        tracing::debug!(
            dest = %dest.display(),
            filter = filter.description(),
            files = written.len(),
            "extracted archive subtree"
        );
        Ok(written)
    }

    /// Names of examples with an `examples/<name>/<language>/src` subtree
    pub async fn list_examples(
        &self,
        source: &ArchiveSource,
        language: &str,
    ) -> Result<Vec<String>, FetchError> {
        let bytes = self.fetch_archive(source).await?;
        let entries = Self::read_entries(&bytes, &source.to_string())?;

        let names: BTreeSet<String> = entries
            .iter()
            .filter_map(|entry| {
                let parts: Vec<_> = entry
                    .path
                    .components()
                    .map(|c| c.as_os_str().to_string_lossy())
                    .collect();
                match parts.as_slice() {
                    [examples, name, lang, src, ..]
                        if examples == "examples" && lang == language && src == "src" =>
                    {
                        Some(name.to_string())
                    }
                    _ => None,
                }
            })
            .collect();

        Ok(names.into_iter().collect())
    }
}

/// Forward-slash archive name for a relative path
fn archive_name(relative: &Path) -> String {
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// The single top-level directory every entry lives under, if there is one
fn shared_root(entries: &[ArchiveEntry]) -> Option<PathBuf> {
    let mut root: Option<&std::ffi::OsStr> = None;
    for entry in entries {
        let mut components = entry.path.components();
        let first = components.next()?.as_os_str();
        // A file at the top level means there is no wrapping directory
        if !entry.is_dir() && components.next().is_none() {
            return None;
        }
        match root {
            None => root = Some(first),
            Some(seen) if seen == first => {}
            Some(_) => return None,
        }
    }
    root.map(PathBuf::from)
}

fn is_empty_or_missing(path: &Path) -> bool {
    match std::fs::read_dir(path) {
        Ok(mut entries) => entries.next().is_none(),
        Err(e) => e.kind() == std::io::ErrorKind::NotFound,
    }
}

#[cfg(unix)]
fn file_mode(path: &Path) -> Option<u32> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::metadata(path).ok().map(|m| m.permissions().mode() & 0o777)
}

#[cfg(not(unix))]
fn file_mode(_path: &Path) -> Option<u32> {
    None
}

#[cfg(unix)]
async fn apply_mode(path: &Path, mode: Option<u32>) -> Result<(), FetchError> {
    use std::os::unix::fs::PermissionsExt;
    if let Some(mode) = mode {
        let permissions = std::fs::Permissions::from_mode(mode & 0o777);
        fs::set_permissions(path, permissions)
            .await
            .map_err(|e| FetchError::io(path, e))?;
    }
    Ok(())
}

#[cfg(not(unix))]
async fn apply_mode(_path: &Path, _mode: Option<u32>) -> Result<(), FetchError> {
    Ok(())
}
