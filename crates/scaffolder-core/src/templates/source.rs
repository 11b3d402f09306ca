//! Archive references - remote zip URLs, GitHub shorthands, or local paths

use crate::error::FetchError;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use url::Url;

/// Revision used when a GitHub shorthand does not name one
pub const DEFAULT_REVISION: &str = "HEAD";

/// Where an archive comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArchiveSource {
    /// URL of a zip archive with a single top-level directory
    Remote(Url),
    /// Local directory (packed on the fly) or local zip file
    Local(PathBuf),
}

impl ArchiveSource {
    /// Create a local source from a path
    pub fn local(path: impl Into<PathBuf>) -> Self {
        Self::Local(path.into())
    }

    /// GitHub archive URL for `owner/repo` at `revision`
    pub fn github(owner: &str, repo: &str, revision: &str) -> Result<Self, FetchError> {
        let raw = format!("https://codeload.github.com/{owner}/{repo}/zip/{revision}");
        let url = Url::parse(&raw).map_err(|e| FetchError::InvalidReference {
            reference: format!("{owner}/{repo}#{revision}"),
            reason: e.to_string(),
        })?;
        Ok(Self::Remote(url))
    }

    /// Pick a reference from an explicit value, then `env_var`, then `default`
    pub fn resolve(explicit: Option<&str>, env_var: &str, default: &str) -> Result<Self, FetchError> {
        match explicit {
            Some(reference) => reference.parse(),
            None => std::env::var(env_var)
                .unwrap_or_else(|_| default.to_string())
                .parse(),
        }
    }

    /// True when the reference names content that can never change
    ///
    /// Local sources are read fresh every time. A remote archive counts as
    /// immutable only when its last path segment is a full commit hash.
    pub fn is_immutable(&self) -> bool {
        match self {
            Self::Local(_) => false,
            Self::Remote(url) => url
                .path_segments()
                .and_then(|mut segments| segments.next_back())
                .is_some_and(is_commit_hash),
        }
    }

    /// Stable string used as the cache key
    pub fn cache_key(&self) -> String {
        self.to_string()
    }
}

fn is_commit_hash(revision: &str) -> bool {
    revision.len() == 40 && revision.bytes().all(|b| b.is_ascii_hexdigit())
}

impl fmt::Display for ArchiveSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Remote(url) => write!(f, "{url}"),
            Self::Local(path) => write!(f, "{}", path.display()),
        }
    }
}

impl FromStr for ArchiveSource {
    type Err = FetchError;

    fn from_str(reference: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| FetchError::InvalidReference {
            reference: reference.to_string(),
            reason: reason.to_string(),
        };

        let reference = reference.trim();
        if reference.is_empty() {
            return Err(invalid("reference is empty"));
        }

        if reference.starts_with("https://") || reference.starts_with("http://") {
            let url = Url::parse(reference).map_err(|e| invalid(&e.to_string()))?;
            return Ok(Self::Remote(url));
        }

        if let Some(path) = reference.strip_prefix("file:") {
            return Ok(Self::local(path));
        }

        let path = PathBuf::from(reference);
        if path.exists() {
            return Ok(Self::Local(path));
        }

        let shorthand = reference.strip_prefix("github:").unwrap_or(reference);
        let (repo_path, revision) = match shorthand.split_once('#') {
            Some((repo_path, revision)) if !revision.is_empty() => (repo_path, revision),
            Some(_) => return Err(invalid("revision after '#' is empty")),
            None => (shorthand, DEFAULT_REVISION),
        };

        match repo_path.split('/').collect::<Vec<_>>().as_slice() {
            [owner, repo] if !owner.is_empty() && !repo.is_empty() => {
                Self::github(owner, repo, revision)
            }
            _ => Err(invalid(
                "expected a URL, a local path, or a GitHub reference like owner/repo#revision",
            )),
        }
    }
}
