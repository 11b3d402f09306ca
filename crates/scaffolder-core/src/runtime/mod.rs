//! Process execution and tool management
//!
//! This module provides:
//! - Structured command execution behind the [`CommandRunner`] seam
//! - Soft-fail steps that report outcomes instead of raising
//! - Tool detection for git and package managers

pub mod check;
pub mod command;
pub mod step;
pub mod tool;

pub use check::{Language, RuntimeInfo};
pub use command::{CommandRunner, StepCommand, SystemRunner};
pub use step::{Step, StepOutcome, StepRunner};
pub use tool::{ToolConfig, ToolManager};
