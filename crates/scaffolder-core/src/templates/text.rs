//! Placeholder substitution and project name case variants

use crate::error::ScaffoldError;
use std::path::Path;
use tokio::fs;

/// `my-cool-app` -> `My Cool App`
pub fn title_case(name: &str) -> String {
    name.split('-')
        .map(|segment| {
            let mut chars = segment.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Lower-cases and turns only the first space into a hyphen.
///
/// `My Cool App` -> `my-cool app`. Not a slugifier.
pub fn kebab_case(name: &str) -> String {
    name.to_lowercase().replacen(' ', "-", 1)
}

/// Replace the first occurrence of `token` in the file at `path`
///
/// The file is always read and written back, even if the token is absent.
pub async fn replace_in_file(path: &Path, token: &str, replacement: &str) -> Result<(), ScaffoldError> {
    let content = fs::read_to_string(path)
        .await
        .map_err(|source| ScaffoldError::FileIo {
            path: path.to_path_buf(),
            source,
        })?;

    if !content.contains(token) {
        tracing::warn!(path = %path.display(), token, "placeholder not found");
    }
    let updated = content.replacen(token, replacement, 1);

    fs::write(path, updated)
        .await
        .map_err(|source| ScaffoldError::FileIo {
            path: path.to_path_buf(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("my-cool-app"), "My Cool App");
        assert_eq!(title_case("x"), "X");
        assert_eq!(title_case("DEMO"), "Demo");
        assert_eq!(title_case("demo1"), "Demo1");
    }

    #[test]
    fn test_kebab_case_only_replaces_first_space() {
        assert_eq!(kebab_case("My Cool App"), "my-cool app");
        assert_eq!(kebab_case("Demo"), "demo");
        assert_eq!(kebab_case("My App"), "my-app");
    }

    #[tokio::test]
    async fn test_replace_in_file_only_touches_first_token() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("README.md");
        let original = "# PROJECT_NAME\n\nWelcome to PROJECT_NAME.\n";
        std::fs::write(&path, original).unwrap();

        replace_in_file(&path, "PROJECT_NAME", "My Cool App").await.unwrap();

        let updated = std::fs::read_to_string(&path).unwrap();
        assert_eq!(updated, "# My Cool App\n\nWelcome to PROJECT_NAME.\n");
        assert_eq!(
            updated.len(),
            original.len() + "My Cool App".len() - "PROJECT_NAME".len()
        );
    }

    #[tokio::test]
    async fn test_replace_in_file_without_token_keeps_content() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("package.json");
        std::fs::write(&path, "{\"name\": \"fixed\"}").unwrap();

        replace_in_file(&path, "package-name", "demo").await.unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{\"name\": \"fixed\"}");
    }

    #[tokio::test]
    async fn test_replace_in_missing_file_is_file_io_error() {
        let tmp = tempfile::tempdir().unwrap();
        let err = replace_in_file(&tmp.path().join("missing"), "a", "b")
            .await
            .unwrap_err();
        assert!(matches!(err, ScaffoldError::FileIo { .. }));
    }
}
