//! Archive fetching, caching and placeholder templating
//!
//! This module provides:
//! - Archive references (remote URL, GitHub shorthand, local path)
//! - A content-addressed cache for downloaded archives
//! - Whole-archive clones and filtered subtree extraction
//! - First-occurrence placeholder substitution

pub mod cache;
pub mod fetcher;
pub mod source;
pub mod text;

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::{Path, PathBuf};

pub use cache::{ArchiveCache, CachePolicy};
pub use fetcher::{ArchiveFetcher, PathFilter};
pub use source::ArchiveSource;
pub use text::{kebab_case, replace_in_file, title_case};

/// Pack a local directory into a zip usable as an archive reference
///
/// Writes `<dir name>.zip` next to the directory when `output` is not given.
pub fn pack_archive(dir: &Path, output: Option<PathBuf>) -> Result<PathBuf> {
    if !dir.is_dir() {
        anyhow::bail!("Directory not found: {}", dir.display());
    }

    let output = match output {
        Some(path) => path,
        None => {
            let name = dir
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| "archive".to_string());
            dir.with_file_name(format!("{name}.zip"))
        }
    };

    print!("  {} {}...", "->".blue(), dir.display());

    match ArchiveFetcher::pack_directory(dir) {
        Ok(zip_bytes) => {
            std::fs::write(&output, &zip_bytes)
                .with_context(|| format!("Failed to write {}", output.display()))?;
            println!(" {} ({} bytes)", "done".green(), zip_bytes.len());
        }
        Err(e) => {
            println!(" {}", "failed".red());
            return Err(e).with_context(|| format!("Failed to pack {}", dir.display()));
        }
    }

    println!("{} {}", "Wrote".green().bold(), output.display());
    Ok(output)
}
