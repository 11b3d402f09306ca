//! Run configuration
//!
//! Product-level defaults come from [`crate::ProductConfig`]; these options
//! override them for a single run.

pub mod package_manager;

use crate::runtime::{Language, ToolConfig};
use std::path::PathBuf;

pub use package_manager::detect_package_manager;

pub const DEFAULT_COMMIT_MESSAGE: &str = "Initial commit";

/// Per-run overrides for a scaffolding run
#[derive(Debug, Clone)]
pub struct ScaffoldOptions {
    /// Directory the project directory is created in
    pub parent_dir: PathBuf,
    /// Example to splice in (product default when `None`)
    pub example: Option<String>,
    /// Example language (product default when `None`)
    pub language: Option<Language>,
    /// Template reference (env var, then product default when `None`)
    pub template_ref: Option<String>,
    /// Examples reference (env var, then product default when `None`)
    pub examples_ref: Option<String>,
    /// Package manager to install with (detected when `None`)
    pub package_manager: Option<ToolConfig>,
    pub skip_install: bool,
    pub commit_message: String,
}

impl Default for ScaffoldOptions {
    fn default() -> Self {
        Self {
            parent_dir: PathBuf::from("."),
            example: None,
            language: None,
            template_ref: None,
            examples_ref: None,
            package_manager: None,
            skip_install: false,
            commit_message: DEFAULT_COMMIT_MESSAGE.to_string(),
        }
    }
}
