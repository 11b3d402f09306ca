//! Generic management for external CLI tools
//!
//! Covers the version-control tool the scaffolder requires and the package
//! managers it uses on a best-effort basis.

use super::check::RuntimeInfo;
use std::path::PathBuf;
use std::process::Command;

/// Configuration for a CLI tool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolConfig {
    /// Name of the tool binary (e.g., "git")
    pub name: &'static str,
    /// Display name for user-facing messages
    pub display_name: &'static str,
    /// URL to the installation documentation
    pub docs_url: &'static str,
}

/// Manager for checking CLI tools
pub struct ToolManager {
    config: ToolConfig,
}

impl ToolManager {
    /// Create a new tool manager with the given configuration
    pub fn new(config: ToolConfig) -> Self {
        Self { config }
    }

    /// Get the tool configuration
    pub fn config(&self) -> &ToolConfig {
        &self.config
    }

    /// Full path of the tool binary, if it is on PATH
    pub fn locate(&self) -> Option<PathBuf> {
        which::which(self.config.name).ok()
    }

    /// Check if the tool is installed and available in PATH
    pub fn is_installed(&self) -> bool {
        self.locate().is_some()
    }

    /// Get the installed tool version (if available)
    pub fn get_version(&self) -> Option<String> {
        Command::new(self.config.name)
            .arg("--version")
            .output()
            .ok()
            .and_then(|output| {
                if output.status.success() {
                    String::from_utf8(output.stdout)
                        .ok()
                        .map(|s| s.trim().to_string())
                } else {
                    None
                }
            })
    }

    /// Availability and version, for display
    pub fn info(&self) -> RuntimeInfo {
        let available = self.is_installed();
        RuntimeInfo {
            name: self.config.display_name,
            version: if available { self.get_version() } else { None },
            available,
        }
    }

    /// Open the tool's documentation in the default browser
    #[cfg(feature = "tui")]
    pub fn open_docs(&self) -> anyhow::Result<()> {
        open::that(self.config.docs_url)?;
        Ok(())
    }
}

/// Git, the version-control tool every scaffolded project is initialized with
pub const GIT: ToolConfig = ToolConfig {
    name: "git",
    display_name: "Git",
    docs_url: "https://git-scm.com/downloads",
};

pub const NPM: ToolConfig = ToolConfig {
    name: "npm",
    display_name: "npm",
    docs_url: "https://docs.npmjs.com/downloading-and-installing-node-js-and-npm",
};

pub const PNPM: ToolConfig = ToolConfig {
    name: "pnpm",
    display_name: "pnpm",
    docs_url: "https://pnpm.io/installation",
};

pub const YARN: ToolConfig = ToolConfig {
    name: "yarn",
    display_name: "Yarn",
    docs_url: "https://yarnpkg.com/getting-started/install",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_tool_reports_unavailable() {
        let tool = ToolManager::new(ToolConfig {
            name: "scaffolder-definitely-not-a-real-binary",
            display_name: "Nothing",
            docs_url: "https://example.com",
        });
        assert!(!tool.is_installed());
        assert!(tool.get_version().is_none());

        let info = tool.info();
        assert!(!info.available);
        assert_eq!(info.name, "Nothing");
    }
}
