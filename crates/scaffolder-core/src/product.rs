//! Product configuration trait for CLI binaries
//!
//! This trait defines the interface each product binary implements to
//! configure where templates and examples come from and how the scaffolded
//! project is customized.

use crate::runtime::tool::{self, ToolConfig};
use crate::runtime::Language;
use std::path::Path;

/// Files and tokens rewritten with the project name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placeholders {
    /// README path relative to the project root
    pub readme_file: &'static str,
    /// Token in the README replaced with the title-cased name
    pub readme_token: &'static str,
    /// Package manifest path relative to the project root
    pub manifest_file: &'static str,
    /// Token in the manifest replaced with the kebab-cased name
    pub manifest_token: &'static str,
}

impl Default for Placeholders {
    fn default() -> Self {
        Self {
            readme_file: "README.md",
            readme_token: "PROJECT_NAME",
            manifest_file: "package.json",
            manifest_token: "package-name",
        }
    }
}

/// Configuration trait for different CLI products
///
/// Each product implements this trait to define:
/// - Product identity (name, display name)
/// - Template and examples archive references
/// - Default example and language
/// - Tools used for version control and dependency installation
/// - Post-setup instructions
pub trait ProductConfig: Clone + Send + Sync + 'static {
    /// Internal product name (used for the cache directory and user agent)
    fn name(&self) -> &'static str;

    /// Human-readable display name
    fn display_name(&self) -> &'static str;

    /// Default reference for the project template
    fn default_template_ref(&self) -> &'static str;

    /// Environment variable name for overriding the template reference
    fn template_ref_env(&self) -> &'static str;

    /// Default reference for the examples archive
    fn default_examples_ref(&self) -> &'static str;

    /// Environment variable name for overriding the examples reference
    fn examples_ref_env(&self) -> &'static str;

    /// Example spliced in when none is requested
    fn default_example(&self) -> &'static str;

    /// Example language used when none is requested
    fn default_language(&self) -> Language;

    /// URL for product documentation
    fn docs_url(&self) -> &'static str;

    /// CLI description shown in help text
    fn cli_description(&self) -> &'static str;

    /// Placeholder tokens rewritten with the project name
    fn placeholders(&self) -> Placeholders {
        Placeholders::default()
    }

    /// Version-control tool; its absence aborts a run
    fn vcs(&self) -> ToolConfig {
        tool::GIT
    }

    /// Package managers in order of preference
    fn package_managers(&self) -> &'static [ToolConfig] {
        &[tool::NPM]
    }

    /// Generate the "next steps" instructions after project creation
    fn next_steps(&self, dir: &Path) -> Vec<String> {
        let mut steps = Vec::new();
        let current = std::env::current_dir().ok();

        if current.as_deref() != Some(dir) {
            steps.push(format!("cd {}", dir.display()));
        }
        steps.push("git remote add origin <your-repository-url>".to_string());
        steps.push("git push -u origin main".to_string());

        steps
    }

    /// User agent string for HTTP requests
    fn user_agent(&self) -> &'static str {
        self.name()
    }
}
