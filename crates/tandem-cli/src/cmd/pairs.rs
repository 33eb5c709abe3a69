use std::io::{self, Write};

use clap::Args;
use serde::Serialize;
use tandem_core::config::ProjectConfig;
use tandem_core::model::{CollaborationTotals, EmployeeId};

use crate::cmd::analyze::NO_COLLABORATION;
use crate::cmd::input::{InputArgs, load_and_analyze};
use crate::output::{OutputMode, Renderable, pretty_section, render_list};

/// Arguments for `tdm pairs`.
#[derive(Args, Debug)]
pub struct PairsArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Show only the first N pairs.
    #[arg(long, short = 'n', value_name = "N")]
    pub limit: Option<usize>,
}

/// One ranked pair total.
#[derive(Debug, Clone, Serialize)]
pub struct PairRow {
    pub rank: usize,
    pub first: EmployeeId,
    pub second: EmployeeId,
    pub total_days: u64,
}

impl Renderable for PairRow {
    fn render_human(&self, w: &mut dyn Write) -> io::Result<()> {
        writeln!(
            w,
            "{:>4}. {:>10} + {:<10} {:>8} days",
            self.rank,
            self.first.to_string(),
            self.second.to_string(),
            self.total_days
        )
    }

    fn render_json(&self, w: &mut dyn Write) -> io::Result<()> {
        serde_json::to_writer(&mut *w, self).map_err(io::Error::other)?;
        writeln!(w)
    }

    fn render_table(&self, w: &mut dyn Write) -> io::Result<()> {
        writeln!(
            w,
            "{}  {}  {}  {}",
            self.rank, self.first, self.second, self.total_days
        )
    }

    fn table_headers() -> &'static [&'static str] {
        &["rank", "first", "second", "total_days"]
    }
}

/// Totals in rank order: descending by days, ties by pair.
pub fn ranked_rows(totals: &CollaborationTotals, limit: Option<usize>) -> Vec<PairRow> {
    totals
        .ranked()
        .into_iter()
        .take(limit.unwrap_or(usize::MAX))
        .enumerate()
        .map(|(i, (pair, total_days))| PairRow {
            rank: i + 1,
            first: pair.first(),
            second: pair.second(),
            total_days,
        })
        .collect()
}

/// List every pair's total collaboration days.
///
/// # Errors
///
/// Returns an error if the file cannot be read or holds no valid rows.
pub fn run_pairs(args: &PairsArgs, config: &ProjectConfig, output: OutputMode) -> anyhow::Result<()> {
    let analysis = load_and_analyze(&args.input, config, output)?;
    if analysis.report.totals.is_empty() && !output.is_json() {
        println!("{NO_COLLABORATION}");
        return Ok(());
    }

    let rows = ranked_rows(&analysis.report.totals, args.limit);

    if output.is_pretty() {
        let stdout = io::stdout();
        pretty_section(&mut stdout.lock(), "Pair totals")?;
    }
    render_list(&rows, output)?;
    Ok(())
}
