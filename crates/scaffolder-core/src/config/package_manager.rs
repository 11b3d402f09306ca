//! Package manager selection

use crate::runtime::ToolConfig;
use std::path::PathBuf;

/// Pick the first installed package manager from `preferred`
///
/// Falls back to the first entry when none is installed; the install step then
/// fails softly with a clear "failed to start" outcome.
pub fn detect_package_manager(
    preferred: &[ToolConfig],
    locate: impl Fn(&str) -> Option<PathBuf>,
) -> Option<ToolConfig> {
    preferred
        .iter()
        .find(|tool| locate(tool.name).is_some())
        .or_else(|| preferred.first())
        .copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::tool::{NPM, PNPM, YARN};

    #[test]
    fn test_first_installed_wins() {
        let installed = |name: &str| (name == "yarn" || name == "npm").then(|| PathBuf::from(name));
        let picked = detect_package_manager(&[PNPM, YARN, NPM], installed);
        assert_eq!(picked, Some(YARN));
    }

    #[test]
    fn test_falls_back_to_first_preference() {
        let picked = detect_package_manager(&[PNPM, NPM], |_| None);
        assert_eq!(picked, Some(PNPM));
    }

    #[test]
    fn test_empty_preference_list() {
        assert_eq!(detect_package_manager(&[], |_| None), None);
    }
}
