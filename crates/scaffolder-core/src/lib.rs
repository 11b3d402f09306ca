//! Scaffolder Core - Shared library for project scaffolding CLIs
//!
//! This library turns a project name into a committed, dependency-installed
//! project directory: it clones a template archive, rewrites the name
//! placeholders, splices an example's sources over the template's `src`, and
//! wraps the result in a git repository. Product binaries supply the template
//! and example references through [`ProductConfig`].
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Core Operations** - Name resolution, archive fetching, placeholder templating, process steps
//! - **Layer 2: Workflow Orchestration** - [`Scaffolder`] sequences the operations and owns the failure policy
//! - **Layer 3: CLI/TUI Interface** - Optional cliclack-based prompts (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based TUI prompts module
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use scaffolder_core::{ArchiveFetcher, ProjectRequest, ScaffoldOptions, Scaffolder, SilentReporter, SystemRunner};
//!
//! let scaffolder = Scaffolder::new(
//!     MyConfig,
//!     ArchiveFetcher::from_config(&MyConfig),
//!     SystemRunner::new(),
//!     ScaffoldOptions::default(),
//! );
//! let report = scaffolder.scaffold(&ProjectRequest::new("demo"), &SilentReporter).await?;
//! ```

pub mod config;
pub mod error;
pub mod naming;
pub mod product;
pub mod report;
pub mod runtime;
pub mod scaffold;
pub mod templates;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use config::ScaffoldOptions;
pub use error::{FetchError, ScaffoldError, StepError};
pub use naming::resolve_target_dir;
pub use product::{Placeholders, ProductConfig};
pub use report::{Reporter, SilentReporter};
pub use runtime::{CommandRunner, Language, StepOutcome, SystemRunner};
pub use scaffold::{ProjectRequest, ScaffoldReport, ScaffoldStage, Scaffolder};
pub use templates::{ArchiveCache, ArchiveFetcher, ArchiveSource, CachePolicy};

#[cfg(feature = "tui")]
pub use tui::run;
