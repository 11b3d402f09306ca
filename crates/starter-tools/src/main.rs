//! Starter CLI - Project scaffolding from a template and an example

mod logging;

use anyhow::Result;
use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use colored::Colorize;
use scaffolder_core::runtime::tool::{NPM, PNPM, YARN};
use scaffolder_core::runtime::{Language, ToolConfig};
use scaffolder_core::tui::CreateArgs;
use scaffolder_core::{ArchiveFetcher, ArchiveSource, CachePolicy, ProductConfig};
use std::path::PathBuf;

/// CLI version
pub const CLI_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Starter product configuration
#[derive(Clone)]
pub struct StarterConfig;

impl ProductConfig for StarterConfig {
    fn name(&self) -> &'static str {
        "starter"
    }

    fn display_name(&self) -> &'static str {
        "Starter"
    }

    fn default_template_ref(&self) -> &'static str {
        "starter-dev/starter-template#main"
    }

    fn template_ref_env(&self) -> &'static str {
        "STARTER_TEMPLATE_REF"
    }

    fn default_examples_ref(&self) -> &'static str {
        "starter-dev/starter-examples#main"
    }

    fn examples_ref_env(&self) -> &'static str {
        "STARTER_EXAMPLES_REF"
    }

    fn default_example(&self) -> &'static str {
        "tic-tac-toe"
    }

    fn default_language(&self) -> Language {
        Language::TypeScript
    }

    fn docs_url(&self) -> &'static str {
        "https://github.com/starter-dev/starter-template#readme"
    }

    fn cli_description(&self) -> &'static str {
        "CLI for scaffolding starter projects from a template and an example"
    }

    fn package_managers(&self) -> &'static [ToolConfig] {
        &[NPM, PNPM, YARN]
    }

    fn user_agent(&self) -> &'static str {
        concat!("starter-tools/", env!("CARGO_PKG_VERSION"))
    }
}

#[derive(Parser, Debug)]
#[command(name = "starter-tools")]
#[command(version)]
pub struct Args {
    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new project
    Create(CliCreateArgs),
    /// List the examples available for a language
    Examples(ExamplesArgs),
    /// Pack a local directory into a zip usable as a template or examples reference
    Pack(PackArgs),
    /// Inspect or clear the archive cache
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },
}

#[derive(Parser, Debug)]
pub struct CliCreateArgs {
    /// Project name (prompted for when omitted)
    pub name: Option<String>,

    /// Example to use in place of the template's src
    #[arg(short, long)]
    pub example: Option<String>,

    /// Example language (typescript, javascript, python, rust)
    #[arg(short, long)]
    pub language: Option<String>,

    /// Directory to create the project in
    #[arg(short = 'C', long)]
    pub directory: Option<PathBuf>,

    /// Template reference (URL, owner/repo#rev, or local path)
    #[arg(long)]
    pub template: Option<String>,

    /// Examples reference (URL, owner/repo#rev, or local path)
    #[arg(long)]
    pub examples: Option<String>,

    /// Download archives even if they are cached
    #[arg(long)]
    pub refresh: bool,

    /// Skip dependency installation
    #[arg(long = "skip-install")]
    pub skip_install: bool,

    /// Kill any step that runs longer than this many seconds
    #[arg(long = "step-timeout", value_name = "SECS")]
    pub step_timeout: Option<u64>,

    /// Auto-confirm all prompts (non-interactive mode)
    #[arg(short, long)]
    pub yes: bool,
}

impl From<CliCreateArgs> for CreateArgs {
    fn from(args: CliCreateArgs) -> Self {
        CreateArgs {
            name: args.name,
            example: args.example,
            language: args.language,
            directory: args.directory,
            template: args.template,
            examples: args.examples,
            refresh: args.refresh,
            skip_install: args.skip_install,
            step_timeout: args.step_timeout,
            yes: args.yes,
        }
    }
}

#[derive(Parser, Debug)]
pub struct ExamplesArgs {
    /// Example language (typescript, javascript, python, rust)
    #[arg(short, long)]
    pub language: Option<String>,

    /// Examples reference (URL, owner/repo#rev, or local path)
    #[arg(long)]
    pub examples: Option<String>,

    /// Download the archive even if it is cached
    #[arg(long)]
    pub refresh: bool,
}

#[derive(Parser, Debug)]
pub struct PackArgs {
    /// Directory to pack
    pub dir: PathBuf,

    /// Output zip path (defaults to <dir>.zip)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum CacheAction {
    /// Print the cache directory
    Path,
    /// Remove every cached archive
    Clear,
}

async fn list_examples(config: &StarterConfig, args: ExamplesArgs) -> Result<()> {
    let language = match &args.language {
        Some(raw) => raw.parse::<Language>().map_err(anyhow::Error::msg)?,
        None => config.default_language(),
    };
    let source = ArchiveSource::resolve(
        args.examples.as_deref(),
        config.examples_ref_env(),
        config.default_examples_ref(),
    )?;
    let policy = if args.refresh {
        CachePolicy::Refresh
    } else {
        CachePolicy::PreferCache
    };

    let fetcher = ArchiveFetcher::from_config(config).with_policy(policy);
    let examples = fetcher.list_examples(&source, language.slug()).await?;

    println!(
        "{}",
        format!("{} examples for {}", config.display_name(), language)
            .cyan()
            .bold()
    );
    println!();
    if examples.is_empty() {
        println!("  {}", "(none)".dimmed());
    }
    for example in examples {
        let marker = if example == config.default_example() {
            " (default)".dimmed().to_string()
        } else {
            String::new()
        };
        println!("  {} {}{}", "->".blue(), example, marker);
    }

    Ok(())
}

fn run_cache(config: &StarterConfig, action: CacheAction) -> Result<()> {
    let fetcher = ArchiveFetcher::from_config(config);
    let cache = fetcher.cache();
    match action {
        CacheAction::Path => println!("{}", cache.root().display()),
        CacheAction::Clear => {
            cache.clear()?;
            println!("{} {}", "Cleared".green().bold(), cache.root().display());
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let config = StarterConfig;
    let matches = Args::command().about(config.cli_description()).get_matches();
    let args = Args::from_arg_matches(&matches)?;
    logging::init_logging(args.verbose, args.quiet)?;
    tracing::debug!(version = CLI_VERSION, "starting");

    // Handle subcommands
    match args.command {
        Some(Command::Create(create_args)) => {
            let result = scaffolder_core::run(&config, create_args.into()).await;

            // Ensure cursor is visible on normal exit
            let _ = console::Term::stderr().show_cursor();

            result
        }
        Some(Command::Examples(examples_args)) => list_examples(&config, examples_args).await,
        Some(Command::Pack(pack_args)) => {
            scaffolder_core::templates::pack_archive(&pack_args.dir, pack_args.output).map(|_| ())
        }
        Some(Command::Cache { action }) => run_cache(&config, action),
        None => {
            // No subcommand provided, default to create behavior (interactive mode)
            let result = scaffolder_core::run(&config, CreateArgs::default()).await;

            // Ensure cursor is visible on normal exit
            let _ = console::Term::stderr().show_cursor();

            result
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_create_args_parse() {
        let args = Args::parse_from([
            "starter-tools",
            "-vv",
            "create",
            "my-game",
            "--example",
            "tic-tac-toe",
            "-l",
            "rust",
            "--skip-install",
            "--step-timeout",
            "120",
            "-y",
        ]);
        assert_eq!(args.verbose, 2);

        let Some(Command::Create(create)) = args.command else {
            panic!("expected create subcommand");
        };
        let create: CreateArgs = create.into();
        assert_eq!(create.name.as_deref(), Some("my-game"));
        assert_eq!(create.example.as_deref(), Some("tic-tac-toe"));
        assert_eq!(create.language.as_deref(), Some("rust"));
        assert!(create.skip_install);
        assert_eq!(create.step_timeout, Some(120));
        assert!(create.yes);
    }

    #[test]
    fn test_cache_subcommand_parses() {
        let args = Args::parse_from(["starter-tools", "cache", "clear"]);
        assert!(matches!(
            args.command,
            Some(Command::Cache {
                action: CacheAction::Clear
            })
        ));
    }

    #[test]
    fn test_default_refs_parse() {
        let config = StarterConfig;
        assert!(config.default_template_ref().parse::<ArchiveSource>().is_ok());
        assert!(config.default_examples_ref().parse::<ArchiveSource>().is_ok());
    }
}
