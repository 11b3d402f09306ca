//! Charm-style CLI prompts using cliclack

use crate::config::ScaffoldOptions;
use crate::error::ScaffoldError;
use crate::naming::validate_project_name;
use crate::product::ProductConfig;
use crate::report::Reporter;
use crate::runtime::{Language, StepOutcome, SystemRunner, ToolManager};
use crate::scaffold::{ProjectRequest, ScaffoldReport, Scaffolder};
use crate::templates::{ArchiveFetcher, ArchiveSource, CachePolicy};
use anyhow::{Context, Result};
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Name suggested when the user gives none
pub const DEFAULT_PROJECT_NAME: &str = "my-app";

/// CLI arguments for the create command
#[derive(Debug, Clone, Default)]
pub struct CreateArgs {
    /// Project name (prompted for when missing)
    pub name: Option<String>,

    /// Example to splice into the template
    pub example: Option<String>,

    /// Example language
    pub language: Option<String>,

    /// Directory to create the project in
    pub directory: Option<PathBuf>,

    /// Template reference override
    pub template: Option<String>,

    /// Examples reference override
    pub examples: Option<String>,

    /// Download archives even when cached
    pub refresh: bool,

    /// Skip dependency installation
    pub skip_install: bool,

    /// Kill any step running longer than this many seconds
    pub step_timeout: Option<u64>,

    /// Auto-confirm all prompts (non-interactive mode)
    pub yes: bool,
}

/// Shows each step as a spinner and each note as a log line
#[derive(Default)]
struct CliclackReporter {
    spinner: RefCell<Option<cliclack::ProgressBar>>,
}

impl Reporter for CliclackReporter {
    fn step_started(&self, label: &str) {
        let spinner = cliclack::spinner();
        spinner.start(format!("{label}..."));
        *self.spinner.borrow_mut() = Some(spinner);
    }

    fn step_finished(&self, outcome: &StepOutcome) {
        let spinner = self.spinner.borrow_mut().take();
        let label = &outcome.label;
        match (&outcome.error, spinner) {
            (None, Some(spinner)) if !outcome.skipped => spinner.stop(label),
            (None, spinner) => {
                if let Some(spinner) = spinner {
                    spinner.stop(format!("{label} (skipped)"));
                } else {
                    log_ui(cliclack::log::info(format!("{label} (skipped)")));
                }
            }
            (Some(error), spinner) => {
                if let Some(spinner) = spinner {
                    spinner.stop(format!("{label} failed"));
                }
                log_ui(cliclack::log::warning(format!("{label} failed: {error}")));
            }
        }
    }

    fn note(&self, message: &str) {
        log_ui(cliclack::log::info(message));
    }
}

/// Progress output is best effort; a closed terminal must not fail the run
fn log_ui(result: std::io::Result<()>) {
    if let Err(e) = result {
        tracing::debug!(error = %e, "terminal output failed");
    }
}

/// Run the CLI with interactive prompts
pub async fn run<C: ProductConfig>(config: &C, args: CreateArgs) -> Result<()> {
    cliclack::intro(config.display_name())?;

    // Step 1: Resolve language and references
    let language = select_language(config, &args)?;
    let fetcher = setup_fetcher(config, &args)?;
    let examples_source = ArchiveSource::resolve(
        args.examples.as_deref(),
        config.examples_ref_env(),
        config.default_examples_ref(),
    )?;

    // Step 2: Select example
    let example = select_example(config, &fetcher, &examples_source, language, &args).await?;

    // Step 3: Project name
    let name = select_name(&args)?;

    // Step 4: Report detected tools (advisory only)
    report_tools(config)?;

    // Step 5: Scaffold
    let options = ScaffoldOptions {
        parent_dir: args.directory.clone().unwrap_or_else(|| PathBuf::from(".")),
        example: Some(example),
        language: Some(language),
        template_ref: args.template.clone(),
        examples_ref: args.examples.clone(),
        skip_install: args.skip_install,
        ..ScaffoldOptions::default()
    };
    let runner = SystemRunner::new().with_timeout(args.step_timeout.map(Duration::from_secs));
    let scaffolder = Scaffolder::new(config.clone(), fetcher, runner, options);

    let reporter = CliclackReporter::default();
    match scaffolder.scaffold(&ProjectRequest::new(name), &reporter).await {
        Ok(report) => {
            summarize(&report)?;
            print_next_steps(config, &report.target)?;
            Ok(())
        }
        Err(e) => handle_failure(config, &args, e),
    }
}

fn select_language<C: ProductConfig>(config: &C, args: &CreateArgs) -> Result<Language> {
    if let Some(raw) = &args.language {
        let language = raw.parse::<Language>().map_err(anyhow::Error::msg)?;
        cliclack::log::info(format!("Language: {}", language.display_name()))?;
        return Ok(language);
    }

    if args.yes {
        let language = config.default_language();
        cliclack::log::info(format!("Language: {}", language.display_name()))?;
        return Ok(language);
    }

    let mut select = cliclack::select("Select a language");
    for lang in Language::ALL {
        select = select.item(lang, lang.display_name(), "");
    }
    let language: Language = select.initial_value(config.default_language()).interact()?;
    Ok(language)
}

fn setup_fetcher<C: ProductConfig>(config: &C, args: &CreateArgs) -> Result<ArchiveFetcher> {
    let policy = if args.refresh {
        CachePolicy::Refresh
    } else {
        CachePolicy::PreferCache
    };
    let fetcher = ArchiveFetcher::from_config(config).with_policy(policy);

    if args.refresh {
        cliclack::log::info("Refreshing cached archives")?;
    }
    tracing::debug!(cache = %fetcher.cache().root().display(), "archive cache");

    Ok(fetcher)
}

async fn select_example<C: ProductConfig>(
    config: &C,
    fetcher: &ArchiveFetcher,
    source: &ArchiveSource,
    language: Language,
    args: &CreateArgs,
) -> Result<String> {
    // If an example was specified via --example flag, use it directly
    if let Some(example) = &args.example {
        cliclack::log::info(format!("Using example: {example}"))?;
        return Ok(example.clone());
    }

    if args.yes {
        cliclack::log::info(format!("Using example: {}", config.default_example()))?;
        return Ok(config.default_example().to_string());
    }

    let spinner = cliclack::spinner();
    spinner.start("Loading examples...");
    let examples = match fetcher.list_examples(source, language.slug()).await {
        Ok(examples) => {
            spinner.stop(format!("{} example(s) available", examples.len()));
            examples
        }
        Err(e) => {
            spinner.stop("Could not list examples");
            cliclack::log::warning(format!("{e}"))?;
            Vec::new()
        }
    };

    match examples.len() {
        0 => Ok(config.default_example().to_string()),
        1 => {
            let example = examples.into_iter().next().unwrap_or_default();
            cliclack::log::info(format!("Using example: {example}"))?;
            Ok(example)
        }
        _ => {
            // Build select prompt - use indices to avoid borrow issues
            let mut select = cliclack::select("Select an example");
            for (idx, example) in examples.iter().enumerate() {
                select = select.item(idx, example, "");
            }
            if let Some(default_idx) = examples.iter().position(|e| e == config.default_example()) {
                select = select.initial_value(default_idx);
            }
            let selected_idx: usize = select.interact()?;
            examples
                .into_iter()
                .nth(selected_idx)
                .context("Selected example is out of range")
        }
    }
}

fn select_name(args: &CreateArgs) -> Result<String> {
    if let Some(name) = &args.name {
        validate_project_name(name)?;
        return Ok(name.clone());
    }

    if args.yes {
        return Ok(DEFAULT_PROJECT_NAME.to_string());
    }

    let name: String = cliclack::input("Project name")
        .placeholder(DEFAULT_PROJECT_NAME)
        .default_input(DEFAULT_PROJECT_NAME)
        .validate(|input: &String| validate_project_name(input).map_err(|e| e.to_string()))
        .interact()?;

    Ok(name)
}

fn report_tools<C: ProductConfig>(config: &C) -> Result<()> {
    let spinner = cliclack::spinner();
    spinner.start("Checking tools...");

    let tools: Vec<String> = std::iter::once(config.vcs())
        .chain(config.package_managers().iter().copied())
        .map(|tool| ToolManager::new(tool).info().to_string())
        .collect();

    spinner.stop(format!("Detected tools: {}", tools.join(", ")));
    Ok(())
}

fn summarize(report: &ScaffoldReport) -> Result<()> {
    let failed: Vec<&str> = report.failed_steps().map(|s| s.label.as_str()).collect();
    if failed.is_empty() {
        cliclack::log::success(format!(
            "Created {} with the {} example ({})",
            report.project_title, report.example, report.language
        ))?;
    } else {
        cliclack::log::warning(format!(
            "Created {} with some steps failing: {}",
            report.project_title,
            failed.join(", ")
        ))?;
    }
    Ok(())
}

fn handle_failure<C: ProductConfig>(config: &C, args: &CreateArgs, error: ScaffoldError) -> Result<()> {
    match &error {
        ScaffoldError::DestinationNotEmpty { path } => {
            cliclack::log::error(format!(
                "{} already has files in it. Pick another name or remove it first.",
                path.display()
            ))?;
        }
        ScaffoldError::MissingPrerequisiteTool { tool, docs_url } => {
            cliclack::log::error(format!(
                "{tool} is required but was not found. The template was left on disk; \
                 install {tool} ({docs_url}) and run `git init` inside the project."
            ))?;

            if !args.yes {
                let open_docs: bool = cliclack::confirm(format!("Open the {tool} installation page?"))
                    .initial_value(false)
                    .interact()?;
                if open_docs {
                    ToolManager::new(config.vcs()).open_docs()?;
                }
            }
        }
        ScaffoldError::ExampleNotFound { example, language } => {
            cliclack::log::error(format!(
                "Example '{example}' does not exist for {language}. The project directory was removed."
            ))?;
        }
        other => {
            cliclack::log::error(format!("{other}"))?;
        }
    }

    cliclack::outro_cancel("Project was not created")?;
    Err(error.into())
}

fn print_next_steps<C: ProductConfig>(config: &C, project_dir: &Path) -> Result<()> {
    let steps = config.next_steps(project_dir);

    println!();
    println!("  Next steps");
    println!();

    for (i, step) in steps.iter().enumerate() {
        println!("  {}.  {}", i + 1, step);
    }
    println!();
    println!("  Docs: {}", config.docs_url());

    cliclack::outro("Happy coding!")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_output_errors_are_not_fatal() {
        log_ui(Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed")));
        log_ui(Ok(()));
    }

    #[test]
    fn test_create_args_default_is_interactive() {
        let args = CreateArgs::default();
        assert!(!args.yes);
        assert!(args.name.is_none());
        assert!(args.step_timeout.is_none());
    }
}
