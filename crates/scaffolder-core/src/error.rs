//! Error types for the scaffolding flow
//!
//! Fatal conditions abort a run and surface as [`ScaffoldError`]. Step failures
//! are soft and travel inside [`crate::runtime::StepOutcome`] as
//! [`StepError`] instead.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while fetching or materializing an archive
#[derive(Debug, Error)]
pub enum FetchError {
    /// Reference string could not be understood
    #[error("Invalid archive reference '{reference}': {reason}")]
    InvalidReference { reference: String, reason: String },

    /// Clone target already has content
    #[error("Destination {} is not empty", .path.display())]
    DestinationNotEmpty { path: PathBuf },

    /// Filtered extraction matched nothing in the archive
    #[error("Nothing in {reference} matched {filter}")]
    EmptyExtraction { reference: String, filter: String },

    /// Server answered with a non-success status
    #[error("Failed to fetch {url}: HTTP {status}")]
    Http { url: String, status: u16 },

    /// Transport level failure
    #[error("Failed to fetch {url}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Archive bytes are not a readable zip
    #[error("Failed to read archive {reference}")]
    Archive {
        reference: String,
        #[source]
        source: zip::result::ZipError,
    },

    /// Local filesystem failure while packing, caching or writing
    #[error("I/O error at {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl FetchError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Failure of a single process-level step. Always soft.
#[derive(Debug, Error)]
pub enum StepError {
    #[error("Failed to start '{program}'")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("'{program}' exited with {}{}", exit_description(*.code), stderr_suffix(.stderr))]
    Failed {
        program: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("'{program}' did not finish within {secs} seconds")]
    TimedOut { program: String, secs: u64 },
}

fn exit_description(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("code {code}"),
        None => "a signal".to_string(),
    }
}

fn stderr_suffix(stderr: &str) -> String {
    if stderr.is_empty() {
        String::new()
    } else {
        format!(": {stderr}")
    }
}

/// Errors that abort a scaffolding run
#[derive(Debug, Error)]
pub enum ScaffoldError {
    #[error("Invalid project name '{name}': {reason}")]
    InvalidProjectName { name: String, reason: String },

    #[error("No free directory name for '{name}' after {attempts} attempts")]
    NameResolutionExhausted { name: String, attempts: usize },

    #[error("Destination {} is not empty", .path.display())]
    DestinationNotEmpty { path: PathBuf },

    #[error("{tool} was not found on PATH. Install it ({docs_url}) and try again.")]
    MissingPrerequisiteTool {
        tool: &'static str,
        docs_url: &'static str,
    },

    #[error("Example '{example}' was not found for language '{language}'")]
    ExampleNotFound { example: String, language: String },

    #[error("Failed to update {}", .path.display())]
    FileIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to splice example sources into {}", .path.display())]
    Splice {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Fetch(FetchError),
}

impl From<FetchError> for ScaffoldError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::DestinationNotEmpty { path } => Self::DestinationNotEmpty { path },
            other => Self::Fetch(other),
        }
    }
}
