//! Destination directory resolution
//!
//! The resolver only checks for existence. Creating the directory is left to the
//! caller, which does so right after resolution; the window between the check
//! and the creation is not guarded.

use crate::error::ScaffoldError;
use std::path::{Path, PathBuf};

/// Upper bound on numeric suffixes tried before giving up
pub const MAX_NAME_ATTEMPTS: usize = 10_000;

/// Reject names that would not stay a single directory under the parent
pub fn validate_project_name(name: &str) -> Result<(), ScaffoldError> {
    let reason = if name.trim().is_empty() {
        Some("name is empty")
    } else if name == "." || name == ".." {
        Some("name must not be a relative directory marker")
    } else if name.contains('/') || name.contains('\\') {
        Some("name must not contain path separators")
    } else if name.contains('\0') {
        Some("name must not contain NUL bytes")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(ScaffoldError::InvalidProjectName {
            name: name.to_string(),
            reason: reason.to_string(),
        }),
        None => Ok(()),
    }
}

/// Find the first unused directory for `desired` under `parent`
///
/// Tries `desired`, then `desired1`, `desired2`, ... and returns the first path
/// with no filesystem entry behind it (files and dangling symlinks count as taken).
pub fn resolve_target_dir(parent: &Path, desired: &str) -> Result<PathBuf, ScaffoldError> {
    let candidate = parent.join(desired);
    if !is_taken(&candidate) {
        return Ok(candidate);
    }

    for suffix in 1..=MAX_NAME_ATTEMPTS {
        let candidate = parent.join(format!("{desired}{suffix}"));
        if !is_taken(&candidate) {
            tracing::debug!(path = %candidate.display(), "resolved name with suffix {suffix}");
            return Ok(candidate);
        }
    }

    Err(ScaffoldError::NameResolutionExhausted {
        name: desired.to_string(),
        attempts: MAX_NAME_ATTEMPTS,
    })
}

fn is_taken(path: &Path) -> bool {
    std::fs::symlink_metadata(path).is_ok()
}
