#![forbid(unsafe_code)]

mod cmd;
mod output;

use anyhow::Context;
use clap::{CommandFactory, Parser, Subcommand};
use output::{CliError, OutputMode, render_error};
use std::env;
use std::path::PathBuf;
use tandem_core::config::{EffectiveConfig, resolve_config};
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    name = "tdm",
    author,
    version,
    about = "tandem: find the employees who worked together the longest",
    long_about = None
)]
struct Cli {
    /// Output format: pretty, text or json.
    #[arg(long, global = true, value_enum, value_name = "FORMAT")]
    format: Option<OutputMode>,

    /// Shorthand for `--format json`.
    #[arg(long, global = true, hide = true)]
    json: bool,

    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only log errors.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Read settings from this file instead of `./tandem.toml`.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Default log filter when `TANDEM_LOG` is unset.
    fn default_log_filter(&self) -> &'static str {
        if self.quiet {
            "error"
        } else if self.verbose || env::var("DEBUG").is_ok() {
            "tandem_core=debug,tdm=debug,info"
        } else {
            "tandem_core=info,tdm=info,warn"
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        next_help_heading = "Analysis",
        about = "Find the longest-collaborating pair",
        long_about = "Read an assignment CSV, report the pair of employees with the most \
                      overlapping days across all shared projects, and list every \
                      per-project overlap.",
        after_help = "EXAMPLES:\n    # Analyze a file\n    tdm analyze assignments.csv\n\n    # Close open-ended rows at a fixed date\n    tdm analyze assignments.csv --today 2024-06-30\n\n    # Emit machine-readable output\n    tdm analyze assignments.csv --format json"
    )]
    Analyze(cmd::analyze::AnalyzeArgs),

    #[command(
        next_help_heading = "Analysis",
        about = "List every pair's total overlap",
        long_about = "List total overlapping days for every pair of employees, longest first. \
                      Ties are ordered by employee id.",
        after_help = "EXAMPLES:\n    # Top five pairs\n    tdm pairs assignments.csv --limit 5\n\n    # Use the sort-and-sweep scan\n    tdm pairs assignments.csv --strategy sweep"
    )]
    Pairs(cmd::pairs::PairsArgs),

    #[command(
        next_help_heading = "Analysis",
        about = "List per-project overlaps",
        long_about = "List each overlapping pair of assignments, grouped by project.",
        after_help = "EXAMPLES:\n    # All projects\n    tdm details assignments.csv\n\n    # One project\n    tdm details assignments.csv --project 12"
    )]
    Details(cmd::details::DetailsArgs),

    #[command(
        next_help_heading = "Setup",
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n    # Bash\n    tdm completions bash > ~/.local/share/bash-completion/completions/tdm"
    )]
    Completions(cmd::completions::CompletionsArgs),
}

fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_env("TANDEM_LOG").unwrap_or_else(|_| EnvFilter::new(default_filter));

    let format = env::var("TANDEM_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

/// Load configuration, reporting failures in a mode resolved without it.
fn load_config(cli: &Cli, project_root: &std::path::Path) -> anyhow::Result<EffectiveConfig> {
    resolve_config(project_root, cli.config.as_deref(), cli.json).map_err(|err| {
        let output = output::resolve_output_mode(cli.format, cli.json, None);
        if let Err(render_err) = render_error(output, &CliError::from_code(err.code(), err.to_string())) {
            debug!("failed to render error: {render_err}");
        }
        anyhow::Error::new(err)
    })
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.default_log_filter());

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    if let Commands::Completions(args) = &cli.command {
        let mut command = Cli::command();
        return cmd::completions::run_completions(args.shell, &mut command);
    }

    let project_root = env::current_dir().context("cannot determine the working directory")?;
    let config = load_config(&cli, &project_root)?;
    let output = output::resolve_output_mode(cli.format, cli.json, Some(&config.resolved_output));
    debug!(?output, "resolved output mode");

    match &cli.command {
        Commands::Analyze(args) => cmd::analyze::run_analyze(args, &config.project, output),
        Commands::Pairs(args) => cmd::pairs::run_pairs(args, &config.project, output),
        Commands::Details(args) => cmd::details::run_details(args, &config.project, output),
        Commands::Completions(_) => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tandem_core::engine::OverlapStrategy;

    #[test]
    fn format_flag_parses_before_subcommand() {
        let cli = Cli::parse_from(["tdm", "--format", "json", "analyze", "a.csv"]);
        assert_eq!(cli.format, Some(OutputMode::Json));
        assert!(matches!(cli.command, Commands::Analyze(_)));
    }

    #[test]
    fn json_flag_after_subcommand() {
        let cli = Cli::parse_from(["tdm", "pairs", "a.csv", "--json"]);
        assert!(cli.json);
    }

    #[test]
    fn analyze_accepts_today_and_strategy() {
        let cli = Cli::parse_from([
            "tdm",
            "analyze",
            "a.csv",
            "--today",
            "2024-06-30",
            "--strategy",
            "sweep",
        ]);
        let Commands::Analyze(args) = cli.command else {
            panic!("expected analyze");
        };
        assert_eq!(args.input.file, PathBuf::from("a.csv"));
        assert_eq!(
            args.input.today,
            chrono::NaiveDate::from_ymd_opt(2024, 6, 30)
        );
        assert_eq!(args.input.strategy, Some(OverlapStrategy::Sweep));
    }

    #[test]
    fn bad_date_is_rejected() {
        let result = Cli::try_parse_from(["tdm", "analyze", "a.csv", "--today", "June"]);
        assert!(result.is_err());
    }

    #[test]
    fn bad_strategy_is_rejected() {
        let result = Cli::try_parse_from(["tdm", "analyze", "a.csv", "--strategy", "magic"]);
        assert!(result.is_err());
    }

    #[test]
    fn pairs_limit_parses() {
        let cli = Cli::parse_from(["tdm", "pairs", "a.csv", "-n", "3"]);
        let Commands::Pairs(args) = cli.command else {
            panic!("expected pairs");
        };
        assert_eq!(args.limit, Some(3));
    }

    #[test]
    fn details_project_parses() {
        let cli = Cli::parse_from(["tdm", "details", "a.csv", "--project", "P1"]);
        let Commands::Details(args) = cli.command else {
            panic!("expected details");
        };
        assert_eq!(args.project.as_deref(), Some("P1"));
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        assert!(Cli::try_parse_from(["tdm", "-q", "-v", "pairs", "a.csv"]).is_err());
        let cli = Cli::parse_from(["tdm", "-q", "pairs", "a.csv"]);
        assert_eq!(cli.default_log_filter(), "error");
    }

    #[test]
    fn config_flag_is_global() {
        let cli = Cli::parse_from(["tdm", "details", "a.csv", "--config", "alt.toml"]);
        assert_eq!(cli.config, Some(PathBuf::from("alt.toml")));
    }

    #[test]
    fn completions_subcommand_parses() {
        let cli = Cli::parse_from(["tdm", "completions", "bash"]);
        assert!(matches!(
            cli.command,
            Commands::Completions(cmd::completions::CompletionsArgs {
                shell: clap_complete::Shell::Bash,
            })
        ));
    }

    #[test]
    fn completion_script_names_the_binary() {
        let mut buf = Vec::new();
        cmd::completions::write_completions(
            clap_complete::Shell::Bash,
            &mut Cli::command(),
            &mut buf,
        );
        let script = String::from_utf8(buf).unwrap();
        assert!(script.contains("tdm"));
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }
}
