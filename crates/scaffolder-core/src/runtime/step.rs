//! Soft-fail step execution
//!
//! A step never returns `Err`. Its [`StepOutcome`] is reported and handed back
//! so the caller can decide whether the failure matters.

use super::command::{CommandRunner, StepCommand};
use crate::error::StepError;
use crate::report::Reporter;

/// Ordered commands run under one label; stops at the first failure
#[derive(Debug, Clone, Default)]
pub struct Step {
    commands: Vec<StepCommand>,
}

impl Step {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn then(mut self, command: StepCommand) -> Self {
        self.commands.push(command);
        self
    }

    pub fn commands(&self) -> &[StepCommand] {
        &self.commands
    }
}

impl From<StepCommand> for Step {
    fn from(command: StepCommand) -> Self {
        Self::new().then(command)
    }
}

/// Result of one labelled step
#[derive(Debug)]
pub struct StepOutcome {
    pub label: String,
    pub error: Option<StepError>,
    pub skipped: bool,
}

impl StepOutcome {
    pub fn succeeded(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            error: None,
            skipped: false,
        }
    }

    pub fn failed(label: impl Into<String>, error: StepError) -> Self {
        Self {
            label: label.into(),
            error: Some(error),
            skipped: false,
        }
    }

    pub fn skipped(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            error: None,
            skipped: true,
        }
    }

    /// True when the step ran and every command succeeded
    pub fn is_ok(&self) -> bool {
        self.error.is_none() && !self.skipped
    }
}

/// Runs steps through a [`CommandRunner`] and reports each outcome
pub struct StepRunner<'a, R: CommandRunner> {
    runner: &'a R,
    reporter: &'a dyn Reporter,
}

impl<'a, R: CommandRunner> StepRunner<'a, R> {
    pub fn new(runner: &'a R, reporter: &'a dyn Reporter) -> Self {
        Self { runner, reporter }
    }

    pub async fn run_step(&self, label: &str, step: impl Into<Step>) -> StepOutcome {
        let step = step.into();
        self.reporter.step_started(label);

        let mut outcome = StepOutcome::succeeded(label);
        for command in step.commands() {
            if let Err(error) = self.runner.run(command).await {
                outcome = StepOutcome::failed(label, error);
                break;
            }
        }

        match &outcome.error {
            None => tracing::debug!(step = label, "step succeeded"),
            Some(error) => tracing::warn!(step = label, %error, "step failed"),
        }
        self.reporter.step_finished(&outcome);
        outcome
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Recording command runner shared by the runtime and scaffold tests

    use super::*;
    use std::cell::RefCell;
    use std::collections::HashSet;
    use std::path::PathBuf;

    #[derive(Default)]
    pub struct FakeRunner {
        pub calls: RefCell<Vec<StepCommand>>,
        pub failing: HashSet<String>,
        pub missing: HashSet<String>,
    }

    impl FakeRunner {
        /// Fail any command whose program and first argument match, e.g. "npm install"
        pub fn fail(mut self, invocation: &str) -> Self {
            self.failing.insert(invocation.to_string());
            self
        }

        pub fn without(mut self, program: &str) -> Self {
            self.missing.insert(program.to_string());
            self
        }

        pub fn invocations(&self) -> Vec<String> {
            self.calls.borrow().iter().map(ToString::to_string).collect()
        }
    }

    impl CommandRunner for FakeRunner {
        async fn run(&self, command: &StepCommand) -> Result<(), StepError> {
            self.calls.borrow_mut().push(command.clone());
            let key = match command.args.first() {
                Some(first) => format!("{} {}", command.program, first),
                None => command.program.clone(),
            };
            if self.missing.contains(&command.program) {
                return Err(StepError::Spawn {
                    program: command.program.clone(),
                    source: std::io::Error::from(std::io::ErrorKind::NotFound),
                });
            }
            if self.failing.contains(&key) {
                return Err(StepError::Failed {
                    program: command.program.clone(),
                    code: Some(1),
                    stderr: "simulated failure".to_string(),
                });
            }
            Ok(())
        }

        fn locate(&self, program: &str) -> Option<PathBuf> {
            if self.missing.contains(program) {
                None
            } else {
                Some(PathBuf::from("/usr/bin").join(program))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::FakeRunner;
    use super::*;
    use crate::report::SilentReporter;
    use std::path::Path;

    #[tokio::test]
    async fn test_successful_step() {
        let runner = FakeRunner::default();
        let steps = StepRunner::new(&runner, &SilentReporter);

        let outcome = steps
            .run_step("Initializing git", StepCommand::new("git", Path::new("/tmp/demo")).arg("init"))
            .await;

        assert!(outcome.is_ok());
        assert_eq!(outcome.label, "Initializing git");
        assert_eq!(runner.invocations(), vec!["git init"]);
    }

    #[tokio::test]
    async fn test_failed_step_is_returned_not_raised() {
        let runner = FakeRunner::default().fail("npm install");
        let steps = StepRunner::new(&runner, &SilentReporter);

        let outcome = steps
            .run_step("Installing dependencies", StepCommand::new("npm", Path::new(".")).arg("install"))
            .await;

        assert!(!outcome.is_ok());
        assert!(matches!(outcome.error, Some(StepError::Failed { .. })));
    }

    #[tokio::test]
    async fn test_step_stops_at_first_failing_command() {
        let runner = FakeRunner::default().fail("git add");
        let steps = StepRunner::new(&runner, &SilentReporter);
        let dir = Path::new(".");

        let step = Step::new()
            .then(StepCommand::new("git", dir).args(["add", "-A"]))
            .then(StepCommand::new("git", dir).args(["commit", "-m", "Initial commit"]));
        let outcome = steps.run_step("Committing", step).await;

        assert!(!outcome.is_ok());
        assert_eq!(runner.invocations(), vec!["git add -A"]);
    }

    #[test]
    fn test_skipped_outcome_is_not_ok() {
        let outcome = StepOutcome::skipped("Installing dependencies");
        assert!(!outcome.is_ok());
        assert!(outcome.error.is_none());
    }
}
