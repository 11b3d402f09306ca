//! End-to-end scaffolding flow
//!
//! A run moves through [`ScaffoldStage`] strictly in order:
//!
//! ```text
//! Start -> NameResolved -> Cloned -> VcsChecked -> VcsInitialized
//!       -> DepsInstalled -> NameTemplated -> ExampleSpliced -> Committed -> Done
//! ```
//!
//! Git init, dependency installation and the final commit are soft-fail steps:
//! their outcomes land in the [`ScaffoldReport`]. Everything else is fatal. A
//! missing example is the only failure that removes what was already created.

use crate::config::{detect_package_manager, ScaffoldOptions};
use crate::error::{FetchError, ScaffoldError};
use crate::naming::{resolve_target_dir, validate_project_name};
use crate::product::ProductConfig;
use crate::report::Reporter;
use crate::runtime::{CommandRunner, Language, Step, StepCommand, StepOutcome, StepRunner, ToolConfig};
use crate::templates::{kebab_case, replace_in_file, title_case, ArchiveFetcher, ArchiveSource, PathFilter};
use std::fmt;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Directory inside the new project where the example is staged before the splice
pub const STAGING_DIR: &str = ".scaffold-staging";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ScaffoldStage {
    Start,
    NameResolved,
    Cloned,
    VcsChecked,
    VcsInitialized,
    DepsInstalled,
    NameTemplated,
    ExampleSpliced,
    Committed,
    Done,
}

impl ScaffoldStage {
    pub fn description(&self) -> &'static str {
        match self {
            ScaffoldStage::Start => "Starting",
            ScaffoldStage::NameResolved => "Project directory chosen",
            ScaffoldStage::Cloned => "Template cloned",
            ScaffoldStage::VcsChecked => "Version control available",
            ScaffoldStage::VcsInitialized => "Repository initialized",
            ScaffoldStage::DepsInstalled => "Dependencies handled",
            ScaffoldStage::NameTemplated => "Project name applied",
            ScaffoldStage::ExampleSpliced => "Example sources in place",
            ScaffoldStage::Committed => "Changes committed",
            ScaffoldStage::Done => "Done",
        }
    }
}

impl fmt::Display for ScaffoldStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// The name a user asked for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRequest {
    pub desired_name: String,
}

impl ProjectRequest {
    pub fn new(desired_name: impl Into<String>) -> Self {
        Self {
            desired_name: desired_name.into(),
        }
    }
}

/// What a completed run produced
#[derive(Debug)]
pub struct ScaffoldReport {
    pub target: PathBuf,
    pub project_title: String,
    pub package_name: String,
    pub example: String,
    pub language: Language,
    pub stage: ScaffoldStage,
    pub steps: Vec<StepOutcome>,
}

impl ScaffoldReport {
    /// Steps that ran and failed
    pub fn failed_steps(&self) -> impl Iterator<Item = &StepOutcome> {
        self.steps.iter().filter(|s| s.error.is_some())
    }

    pub fn step(&self, label: &str) -> Option<&StepOutcome> {
        self.steps.iter().find(|s| s.label == label)
    }
}

pub const STEP_GIT_INIT: &str = "Initializing git repository";
pub const STEP_INSTALL: &str = "Installing dependencies";
pub const STEP_COMMIT: &str = "Creating initial commit";

/// Removes the staging directory however the splice ends
struct StagingDir {
    path: PathBuf,
}

impl StagingDir {
    fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for StagingDir {
    fn drop(&mut self) {
        match std::fs::remove_dir_all(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!(path = %self.path.display(), error = %e, "failed to remove staging directory"),
        }
    }
}

/// Drives one product's scaffolding runs
pub struct Scaffolder<C: ProductConfig, R: CommandRunner> {
    config: C,
    fetcher: ArchiveFetcher,
    runner: R,
    options: ScaffoldOptions,
}

impl<C: ProductConfig, R: CommandRunner> Scaffolder<C, R> {
    pub fn new(config: C, fetcher: ArchiveFetcher, runner: R, options: ScaffoldOptions) -> Self {
        Self {
            config,
            fetcher,
            runner,
            options,
        }
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    pub fn fetcher(&self) -> &ArchiveFetcher {
        &self.fetcher
    }

    pub fn options(&self) -> &ScaffoldOptions {
        &self.options
    }

    pub fn template_source(&self) -> Result<ArchiveSource, FetchError> {
        ArchiveSource::resolve(
            self.options.template_ref.as_deref(),
            self.config.template_ref_env(),
            self.config.default_template_ref(),
        )
    }

    pub fn examples_source(&self) -> Result<ArchiveSource, FetchError> {
        ArchiveSource::resolve(
            self.options.examples_ref.as_deref(),
            self.config.examples_ref_env(),
            self.config.default_examples_ref(),
        )
    }

    pub fn example(&self) -> &str {
        self.options
            .example
            .as_deref()
            .unwrap_or_else(|| self.config.default_example())
    }

    pub fn language(&self) -> Language {
        self.options
            .language
            .unwrap_or_else(|| self.config.default_language())
    }

    fn package_manager(&self) -> Option<ToolConfig> {
        self.options.package_manager.or_else(|| {
            detect_package_manager(self.config.package_managers(), |name| {
                self.runner.locate(name)
            })
        })
    }

    /// Run the whole flow for `request`
    #[tracing::instrument(skip_all, fields(name = %request.desired_name))]
    pub async fn scaffold(
        &self,
        request: &ProjectRequest,
        reporter: &dyn Reporter,
    ) -> Result<ScaffoldReport, ScaffoldError> {
        let reached = |stage: ScaffoldStage| {
            tracing::info!(%stage, "stage reached");
            reporter.stage_reached(stage);
        };

        validate_project_name(&request.desired_name)?;
        let template = self.template_source()?;
        let examples = self.examples_source()?;
        let example = self.example().to_string();
        let language = self.language();

        let target = resolve_target_dir(&self.options.parent_dir, &request.desired_name)?;
        reached(ScaffoldStage::NameResolved);

        reporter.note(&format!("Cloning template into {}", target.display()));
        self.fetcher.clone_into(&template, &target, false).await?;
        reached(ScaffoldStage::Cloned);

        let vcs = self.config.vcs();
        if self.runner.locate(vcs.name).is_none() {
            return Err(ScaffoldError::MissingPrerequisiteTool {
                tool: vcs.display_name,
                docs_url: vcs.docs_url,
            });
        }
        reached(ScaffoldStage::VcsChecked);

        let steps = StepRunner::new(&self.runner, reporter);
        let mut outcomes = Vec::new();

        outcomes.push(
            steps
                .run_step(STEP_GIT_INIT, StepCommand::new(vcs.name, &target).arg("init"))
                .await,
        );
        reached(ScaffoldStage::VcsInitialized);

        let install = match self.package_manager() {
            Some(pm) if !self.options.skip_install => {
                steps
                    .run_step(STEP_INSTALL, StepCommand::new(pm.name, &target).arg("install"))
                    .await
            }
            _ => {
                let outcome = StepOutcome::skipped(STEP_INSTALL);
                reporter.step_finished(&outcome);
                outcome
            }
        };
        outcomes.push(install);
        reached(ScaffoldStage::DepsInstalled);

        let (project_title, package_name) = self.apply_name(&target).await?;
        reached(ScaffoldStage::NameTemplated);

        self.splice_example(&examples, &target, &example, language)
            .await?;
        reached(ScaffoldStage::ExampleSpliced);

        let commit = Step::new()
            .then(StepCommand::new(vcs.name, &target).args(["add", "-A"]))
            .then(StepCommand::new(vcs.name, &target).args([
                "commit",
                "-m",
                self.options.commit_message.as_str(),
                "--no-verify",
            ]));
        outcomes.push(steps.run_step(STEP_COMMIT, commit).await);
        reached(ScaffoldStage::Committed);

        reached(ScaffoldStage::Done);
        Ok(ScaffoldReport {
            target,
            project_title,
            package_name,
            example,
            language,
            stage: ScaffoldStage::Done,
            steps: outcomes,
        })
    }

    /// Rewrite the README and manifest placeholders from the directory's own name
    async fn apply_name(&self, target: &Path) -> Result<(String, String), ScaffoldError> {
        let base_name = target
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let project_title = title_case(&base_name);
        let package_name = kebab_case(&base_name);

        let placeholders = self.config.placeholders();
        replace_in_file(
            &target.join(placeholders.readme_file),
            placeholders.readme_token,
            &project_title,
        )
        .await?;
        replace_in_file(
            &target.join(placeholders.manifest_file),
            placeholders.manifest_token,
            &package_name,
        )
        .await?;

        Ok((project_title, package_name))
    }

    /// Replace `target/src` with the example's `src`, rolling the project back if
    /// the example does not exist
    async fn splice_example(
        &self,
        source: &ArchiveSource,
        target: &Path,
        example: &str,
        language: Language,
    ) -> Result<(), ScaffoldError> {
        let not_found = || ScaffoldError::ExampleNotFound {
            example: example.to_string(),
            language: language.slug().to_string(),
        };

        let subtree: PathBuf = if is_plain_segment(example) {
            ["examples", example, language.slug(), "src"].iter().collect()
        } else {
            self.rollback(target).await;
            return Err(not_found());
        };

        let staging = StagingDir::new(target.join(STAGING_DIR));
        let filter = PathFilter::subtree(&subtree);
        match self.fetcher.extract_filtered(source, staging.path(), &filter).await {
            Ok(files) => tracing::debug!(files = files.len(), "example extracted"),
            Err(FetchError::EmptyExtraction { .. }) => {
                drop(staging);
                self.rollback(target).await;
                return Err(not_found());
            }
            Err(other) => return Err(other.into()),
        }

        let src = target.join("src");
        let splice_err = |source| ScaffoldError::Splice {
            path: src.clone(),
            source,
        };
        match fs::symlink_metadata(&src).await {
            Ok(meta) if meta.is_dir() => fs::remove_dir_all(&src).await.map_err(splice_err)?,
            Ok(_) => fs::remove_file(&src).await.map_err(splice_err)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(splice_err(e)),
        }
        fs::rename(staging.path().join(&subtree), &src)
            .await
            .map_err(splice_err)?;

        Ok(())
    }

    async fn rollback(&self, target: &Path) {
        tracing::info!(path = %target.display(), "removing incomplete project");
        if let Err(e) = fs::remove_dir_all(target).await {
            tracing::warn!(path = %target.display(), error = %e, "rollback failed");
        }
    }
}

/// A single non-empty path component without separators or dot markers
fn is_plain_segment(value: &str) -> bool {
    !value.is_empty()
        && value != "."
        && value != ".."
        && !value.contains('/')
        && !value.contains('\\')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::step::testing::FakeRunner;
    use crate::runtime::tool::NPM;
    use crate::templates::ArchiveCache;
    use std::cell::RefCell;

    #[derive(Clone)]
    struct TestConfig;

    impl ProductConfig for TestConfig {
        fn name(&self) -> &'static str {
            "scaffolder-test"
        }
        fn display_name(&self) -> &'static str {
            "Scaffolder Test"
        }
        fn default_template_ref(&self) -> &'static str {
            "scaffolder-test/template"
        }
        fn template_ref_env(&self) -> &'static str {
            "SCAFFOLDER_TEST_TEMPLATE_REF"
        }
        fn default_examples_ref(&self) -> &'static str {
            "scaffolder-test/examples"
        }
        fn examples_ref_env(&self) -> &'static str {
            "SCAFFOLDER_TEST_EXAMPLES_REF"
        }
        fn default_example(&self) -> &'static str {
            "tic-tac-toe"
        }
        fn default_language(&self) -> Language {
            Language::TypeScript
        }
        fn docs_url(&self) -> &'static str {
            "https://example.com/docs"
        }
        fn cli_description(&self) -> &'static str {
            "test product"
        }
    }

    #[derive(Default)]
    struct RecordingReporter {
        stages: RefCell<Vec<ScaffoldStage>>,
        finished: RefCell<Vec<String>>,
    }

    impl Reporter for RecordingReporter {
        fn stage_reached(&self, stage: ScaffoldStage) {
            self.stages.borrow_mut().push(stage);
        }

        fn step_finished(&self, outcome: &StepOutcome) {
            self.finished.borrow_mut().push(outcome.label.clone());
        }
    }

    struct Fixture {
        _tmp: tempfile::TempDir,
        parent: PathBuf,
        template: PathBuf,
        examples: PathBuf,
        cache: PathBuf,
    }

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    fn fixture() -> Fixture {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().to_path_buf();

        let template = root.join("template");
        write(&template, "README.md", "# PROJECT_NAME\n\nPROJECT_NAME is ready.\n");
        write(&template, "package.json", "{\n  \"name\": \"package-name\"\n}\n");
        write(&template, "src/index.ts", "// template default\n");
        write(&template, "src/old/unused.ts", "// removed by splice\n");
        write(&template, ".gitignore", "node_modules\n");

        let examples = root.join("examples-repo");
        write(&examples, "examples/tic-tac-toe/typescript/src/index.ts", "// game entry\n");
        write(&examples, "examples/tic-tac-toe/typescript/src/board/state.ts", "// board\n");
        write(&examples, "examples/tic-tac-toe/typescript/README.md", "not copied\n");
        write(&examples, "examples/tic-tac-toe/rust/src/main.rs", "fn main() {}\n");

        let parent = root.join("work");
        std::fs::create_dir_all(&parent).unwrap();

        Fixture {
            parent,
            template,
            examples,
            cache: root.join("cache"),
            _tmp: tmp,
        }
    }

    fn scaffolder(fx: &Fixture, runner: FakeRunner) -> Scaffolder<TestConfig, FakeRunner> {
        let options = ScaffoldOptions {
            parent_dir: fx.parent.clone(),
            template_ref: Some(format!("file:{}", fx.template.display())),
            examples_ref: Some(format!("file:{}", fx.examples.display())),
            package_manager: Some(NPM),
            ..ScaffoldOptions::default()
        };
        let fetcher = ArchiveFetcher::new("scaffolder-test", ArchiveCache::new(&fx.cache));
        Scaffolder::new(TestConfig, fetcher, runner, options)
    }

    fn relative_files(root: &Path) -> Vec<(String, String)> {
        let mut files: Vec<(String, String)> = walkdir::WalkDir::new(root)
            .into_iter()
            .filter_map(Result::ok)
            .filter(|e| e.file_type().is_file())
            .map(|e| {
                let rel = e.path().strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/");
                (rel, std::fs::read_to_string(e.path()).unwrap())
            })
            .collect();
        files.sort();
        files
    }

    #[tokio::test]
    async fn test_scaffold_demo_end_to_end() {
        let fx = fixture();
        let scaffolder = scaffolder(&fx, FakeRunner::default());
        let reporter = RecordingReporter::default();

        let report = scaffolder
            .scaffold(&ProjectRequest::new("demo"), &reporter)
            .await
            .unwrap();

        let target = fx.parent.join("demo");
        assert_eq!(report.target, target);
        assert_eq!(report.stage, ScaffoldStage::Done);
        assert_eq!(report.project_title, "Demo");
        assert_eq!(report.package_name, "demo");

        let readme = std::fs::read_to_string(target.join("README.md")).unwrap();
        assert_eq!(readme, "# Demo\n\nPROJECT_NAME is ready.\n");
        let manifest = std::fs::read_to_string(target.join("package.json")).unwrap();
        assert!(manifest.contains("\"demo\""));

        assert_eq!(
            relative_files(&target.join("src")),
            relative_files(&fx.examples.join("examples/tic-tac-toe/typescript/src"))
        );
        assert!(target.join(".gitignore").exists());
        assert!(!target.join(STAGING_DIR).exists());

        assert!(report.steps.iter().all(StepOutcome::is_ok));
        assert_eq!(
            *reporter.stages.borrow(),
            vec![
                ScaffoldStage::NameResolved,
                ScaffoldStage::Cloned,
                ScaffoldStage::VcsChecked,
                ScaffoldStage::VcsInitialized,
                ScaffoldStage::DepsInstalled,
                ScaffoldStage::NameTemplated,
                ScaffoldStage::ExampleSpliced,
                ScaffoldStage::Committed,
                ScaffoldStage::Done,
            ]
        );
    }

    #[tokio::test]
    async fn test_commands_are_argv_in_project_directory() {
        let fx = fixture();
        let runner = FakeRunner::default();
        let scaffolder = scaffolder(&fx, runner);

        scaffolder
            .scaffold(&ProjectRequest::new("my app; rm -rf ~"), &crate::report::SilentReporter)
            .await
            .unwrap();

        let target = fx.parent.join("my app; rm -rf ~");
        let calls = scaffolder.runner.calls.borrow();
        assert!(calls.iter().all(|c| c.cwd == target));
        assert_eq!(
            scaffolder.runner.invocations(),
            vec![
                "git init",
                "npm install",
                "git add -A",
                "git commit -m \"Initial commit\" --no-verify",
            ]
        );
    }

    #[tokio::test]
    async fn test_suffixed_name_is_templated() {
        let fx = fixture();
        std::fs::create_dir_all(fx.parent.join("demo")).unwrap();
        let scaffolder = scaffolder(&fx, FakeRunner::default());

        let report = scaffolder
            .scaffold(&ProjectRequest::new("demo"), &crate::report::SilentReporter)
            .await
            .unwrap();

        assert_eq!(report.target, fx.parent.join("demo1"));
        let readme = std::fs::read_to_string(report.target.join("README.md")).unwrap();
        assert!(readme.starts_with("# Demo1\n"));
        let manifest = std::fs::read_to_string(report.target.join("package.json")).unwrap();
        assert!(manifest.contains("\"demo1\""));
    }

    #[tokio::test]
    async fn test_multi_word_name_gives_valid_package_name() {
        let fx = fixture();
        let scaffolder = scaffolder(&fx, FakeRunner::default());

        let report = scaffolder
            .scaffold(&ProjectRequest::new("my-cool-app"), &crate::report::SilentReporter)
            .await
            .unwrap();

        assert_eq!(report.project_title, "My Cool App");
        assert_eq!(report.package_name, "my-cool-app");
        let manifest = std::fs::read_to_string(report.target.join("package.json")).unwrap();
        assert!(manifest.contains("\"my-cool-app\""));
        assert!(!manifest.contains("my-cool app"));
    }

    #[tokio::test]
    async fn test_missing_example_rolls_back_everything() {
        let fx = fixture();
        let mut scaffolder = scaffolder(&fx, FakeRunner::default());
        scaffolder.options.example = Some("does-not-exist".to_string());

        let err = scaffolder
            .scaffold(&ProjectRequest::new("demo"), &crate::report::SilentReporter)
            .await
            .unwrap_err();

        assert!(matches!(err, ScaffoldError::ExampleNotFound { .. }));
        assert!(!fx.parent.join("demo").exists());
        assert!(fx.template.join("README.md").exists());
    }

    #[tokio::test]
    async fn test_example_in_other_language_only_is_not_found() {
        let fx = fixture();
        let mut scaffolder = scaffolder(&fx, FakeRunner::default());
        scaffolder.options.language = Some(Language::Python);

        let err = scaffolder
            .scaffold(&ProjectRequest::new("demo"), &crate::report::SilentReporter)
            .await
            .unwrap_err();

        assert!(matches!(err, ScaffoldError::ExampleNotFound { ref language, .. } if language == "python"));
        assert!(!fx.parent.join("demo").exists());
    }

    #[tokio::test]
    async fn test_missing_git_keeps_clone_and_stops() {
        let fx = fixture();
        let scaffolder = scaffolder(&fx, FakeRunner::default().without("git"));

        let err = scaffolder
            .scaffold(&ProjectRequest::new("demo"), &crate::report::SilentReporter)
            .await
            .unwrap_err();

        assert!(matches!(err, ScaffoldError::MissingPrerequisiteTool { tool: "Git", .. }));
        let target = fx.parent.join("demo");
        assert_eq!(
            std::fs::read_to_string(target.join("README.md")).unwrap(),
            "# PROJECT_NAME\n\nPROJECT_NAME is ready.\n"
        );
        assert!(scaffolder.runner.invocations().is_empty());
    }

    #[tokio::test]
    async fn test_install_failure_is_soft() {
        let fx = fixture();
        let scaffolder = scaffolder(&fx, FakeRunner::default().fail("npm install"));

        let report = scaffolder
            .scaffold(&ProjectRequest::new("demo"), &crate::report::SilentReporter)
            .await
            .unwrap();

        assert_eq!(report.stage, ScaffoldStage::Done);
        let install = report.step(STEP_INSTALL).unwrap();
        assert!(!install.is_ok());
        assert_eq!(report.failed_steps().count(), 1);
        assert!(report.step(STEP_COMMIT).unwrap().is_ok());
        assert!(fx.parent.join("demo/src/index.ts").exists());
    }

    #[tokio::test]
    async fn test_git_init_and_commit_failures_are_soft() {
        let fx = fixture();
        let runner = FakeRunner::default().fail("git init").fail("git commit");
        let scaffolder = scaffolder(&fx, runner);

        let report = scaffolder
            .scaffold(&ProjectRequest::new("demo"), &crate::report::SilentReporter)
            .await
            .unwrap();

        assert!(!report.step(STEP_GIT_INIT).unwrap().is_ok());
        assert!(!report.step(STEP_COMMIT).unwrap().is_ok());
        assert_eq!(report.stage, ScaffoldStage::Done);
    }

    #[tokio::test]
    async fn test_skip_install() {
        let fx = fixture();
        let mut scaffolder = scaffolder(&fx, FakeRunner::default());
        scaffolder.options.skip_install = true;
        let reporter = RecordingReporter::default();

        let report = scaffolder
            .scaffold(&ProjectRequest::new("demo"), &reporter)
            .await
            .unwrap();

        assert!(report.step(STEP_INSTALL).unwrap().skipped);
        assert!(!scaffolder
            .runner
            .invocations()
            .iter()
            .any(|c| c.starts_with("npm")));
        assert!(reporter.finished.borrow().contains(&STEP_INSTALL.to_string()));
    }

    #[tokio::test]
    async fn test_invalid_name_creates_nothing() {
        let fx = fixture();
        let scaffolder = scaffolder(&fx, FakeRunner::default());

        let err = scaffolder
            .scaffold(&ProjectRequest::new("../escape"), &crate::report::SilentReporter)
            .await
            .unwrap_err();

        assert!(matches!(err, ScaffoldError::InvalidProjectName { .. }));
        assert_eq!(std::fs::read_dir(&fx.parent).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_failed_template_fetch_leaves_nothing() {
        let fx = fixture();
        let mut scaffolder = scaffolder(&fx, FakeRunner::default());
        scaffolder.options.template_ref = Some(format!(
            "file:{}",
            fx.parent.join("missing-template.zip").display()
        ));

        let err = scaffolder
            .scaffold(&ProjectRequest::new("demo"), &crate::report::SilentReporter)
            .await
            .unwrap_err();

        assert!(matches!(err, ScaffoldError::Fetch(FetchError::Io { .. })));
        assert!(!fx.parent.join("demo").exists());
    }

    #[tokio::test]
    async fn test_missing_placeholder_file_is_fatal() {
        let fx = fixture();
        std::fs::remove_file(fx.template.join("package.json")).unwrap();
        let scaffolder = scaffolder(&fx, FakeRunner::default());

        let err = scaffolder
            .scaffold(&ProjectRequest::new("demo"), &crate::report::SilentReporter)
            .await
            .unwrap_err();

        assert!(matches!(err, ScaffoldError::FileIo { .. }));
        assert!(fx.parent.join("demo/README.md").exists());
    }

    #[test]
    fn test_plain_segment() {
        assert!(is_plain_segment("tic-tac-toe"));
        assert!(!is_plain_segment(""));
        assert!(!is_plain_segment(".."));
        assert!(!is_plain_segment("a/b"));
    }
}
