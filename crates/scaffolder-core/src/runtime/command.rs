//! Structured process execution
//!
//! Commands are argument vectors with an explicit working directory. Nothing is
//! ever passed through a shell, and the current process directory is never
//! changed.

use crate::error::StepError;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command as TokioCommand;
use tokio::time::timeout;

/// Lines of stderr kept when a command fails
const STDERR_TAIL_LINES: usize = 5;

/// A single program invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepCommand {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: PathBuf,
}

impl StepCommand {
    pub fn new(program: impl Into<String>, cwd: &Path) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: cwd.to_path_buf(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }
}

impl fmt::Display for StepCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                write!(f, " {arg:?}")?;
            } else {
                write!(f, " {arg}")?;
            }
        }
        Ok(())
    }
}

/// Executes commands and looks up programs
///
/// The scaffolder only needs run-to-completion semantics and an exit status.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run `command` to completion
    async fn run(&self, command: &StepCommand) -> Result<(), StepError>;

    /// Full path of `program` if it can be executed
    fn locate(&self, program: &str) -> Option<PathBuf>;
}

/// Runs commands as real child processes
#[derive(Debug, Clone, Default)]
pub struct SystemRunner {
    timeout: Option<Duration>,
}

impl SystemRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Kill commands that run longer than `limit`
    pub fn with_timeout(mut self, limit: Option<Duration>) -> Self {
        self.timeout = limit;
        self
    }
}

impl CommandRunner for SystemRunner {
    async fn run(&self, command: &StepCommand) -> Result<(), StepError> {
        tracing::debug!(cwd = %command.cwd.display(), "running {command}");

        let child = TokioCommand::new(&command.program)
            .args(&command.args)
            .current_dir(&command.cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| StepError::Spawn {
                program: command.program.clone(),
                source,
            })?;

        let waited = match self.timeout {
            Some(limit) => match timeout(limit, child.wait_with_output()).await {
                Ok(result) => result,
                Err(_) => {
                    return Err(StepError::TimedOut {
                        program: command.program.clone(),
                        secs: limit.as_secs(),
                    })
                }
            },
            None => child.wait_with_output().await,
        };
        let output = waited.map_err(|source| StepError::Spawn {
            program: command.program.clone(),
            source,
        })?;

        if output.status.success() {
            Ok(())
        } else {
            Err(StepError::Failed {
                program: command.program.clone(),
                code: output.status.code(),
                stderr: stderr_tail(&output.stderr),
            })
        }
    }

    fn locate(&self, program: &str) -> Option<PathBuf> {
        which::which(program).ok()
    }
}

fn stderr_tail(stderr: &[u8]) -> String {
    let text = String::from_utf8_lossy(stderr);
    let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
    let start = lines.len().saturating_sub(STDERR_TAIL_LINES);
    lines[start..].join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_quotes_arguments_with_spaces() {
        let cmd = StepCommand::new("git", Path::new("."))
            .arg("commit")
            .args(["-m", "Initial commit"]);
        assert_eq!(cmd.to_string(), "git commit -m \"Initial commit\"");
    }

    #[test]
    fn test_stderr_tail_keeps_last_lines() {
        let stderr = b"1\n2\n\n3\n4\n5\n6\n7\n";
        assert_eq!(stderr_tail(stderr), "3\n4\n5\n6\n7");
    }

    #[tokio::test]
    async fn test_missing_program_is_spawn_error() {
        let tmp = tempfile::tempdir().unwrap();
        let cmd = StepCommand::new("scaffolder-definitely-not-a-real-binary", tmp.path());

        let err = SystemRunner::new().run(&cmd).await.unwrap_err();
        assert!(matches!(err, StepError::Spawn { .. }));
    }

    #[test]
    fn test_locate_missing_program() {
        assert!(SystemRunner::new()
            .locate("scaffolder-definitely-not-a-real-binary")
            .is_none());
    }
}
