//! Shared input handling for the commands that read an assignment file.

use std::fs::File;
use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use clap::Args;
use tandem_core::config::ProjectConfig;
use tandem_core::engine::{CollaborationReport, EngineOptions, OverlapStrategy, analyze};
use tandem_core::error::ErrorCode;
use tandem_core::observer::TracingObserver;
use tandem_core::parse::{ParseOptions, ParsedInput, parse_assignments};
use tracing::{debug, info};

use crate::output::{CliError, OutputMode, render_error};

/// Arguments shared by every command that analyzes an assignment file.
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// CSV file with `EmpID, ProjectID, DateFrom, DateTo` rows.
    pub file: PathBuf,

    /// Treat the first row as data instead of a header.
    #[arg(long)]
    pub no_header: bool,

    /// Reference date for open-ended assignments (defaults to the local date).
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub today: Option<NaiveDate>,

    /// Overlap algorithm: `pairwise` or `sweep`. Overrides `[engine] strategy`.
    #[arg(long, value_name = "STRATEGY")]
    pub strategy: Option<OverlapStrategy>,
}

impl InputArgs {
    fn parse_options(&self, config: &ProjectConfig) -> ParseOptions {
        let mut options = config.input.parse_options();
        if self.no_header {
            options.has_header = false;
        }
        options
    }

    fn engine_options(&self, config: &ProjectConfig) -> EngineOptions {
        let today = self.today.unwrap_or_else(|| Local::now().date_naive());
        let options = config.engine.engine_options(today);
        self.strategy.map_or(options, |strategy| options.with_strategy(strategy))
    }
}

/// A parsed file and the engine's report on it.
#[derive(Debug)]
pub struct Analysis {
    pub parsed: ParsedInput,
    pub report: CollaborationReport,
}

/// Report `code` on stderr and return the matching error.
fn fail(output: OutputMode, code: ErrorCode, message: &str) -> anyhow::Error {
    if let Err(err) = render_error(output, &CliError::from_code(code, message)) {
        debug!("failed to render error: {err}");
    }
    anyhow::anyhow!("{message}")
}

/// Read and parse `args.file`, then run the engine over it.
///
/// Unreadable files, empty files, malformed CSV and files without a single
/// usable row are errors. A file with rows but no overlap is not.
pub fn load_and_analyze(
    args: &InputArgs,
    config: &ProjectConfig,
    output: OutputMode,
) -> anyhow::Result<Analysis> {
    let file = File::open(&args.file).map_err(|err| {
        fail(
            output,
            ErrorCode::InputUnreadable,
            &format!("cannot open {}: {err}", args.file.display()),
        )
    })?;

    info!("processing {}", args.file.display());
    let parsed = parse_assignments(file, &args.parse_options(config), &TracingObserver)
        .map_err(|err| fail(output, err.code(), &err.to_string()))?;

    if parsed.assignments.is_empty() {
        return Err(fail(
            output,
            ErrorCode::NoValidRows,
            ErrorCode::NoValidRows.message(),
        ));
    }

    let options = args.engine_options(config);
    debug!(
        today = %options.today,
        strategy = options.strategy.as_str(),
        "engine options"
    );
    let report = analyze(&parsed.assignments, &options, &TracingObserver);

    if let Some(longest) = &report.longest {
        info!(
            "longest collaborating pair: {} and {} with {} days",
            longest.pair.first(),
            longest.pair.second(),
            longest.total_days
        );
    }

    Ok(Analysis { parsed, report })
}
