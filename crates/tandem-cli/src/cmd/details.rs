use std::io::{self, Write};

use clap::Args;
use serde::Serialize;
use tandem_core::config::ProjectConfig;
use tandem_core::model::{CollaborationRecord, EmployeeId, ProjectId};

use crate::cmd::analyze::NO_COLLABORATION;
use crate::cmd::input::{InputArgs, load_and_analyze};
use crate::output::{OutputMode, Renderable, pretty_section, render_list};

/// Arguments for `tdm details`.
#[derive(Args, Debug)]
pub struct DetailsArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Only show collaborations on this project.
    #[arg(long, short = 'p', value_name = "ID")]
    pub project: Option<String>,
}

/// One per-project overlap.
#[derive(Debug, Clone, Serialize)]
pub struct DetailRow {
    pub project: ProjectId,
    pub first: EmployeeId,
    pub second: EmployeeId,
    pub days: u64,
}

impl From<CollaborationRecord> for DetailRow {
    fn from(record: CollaborationRecord) -> Self {
        Self {
            project: record.project,
            first: record.pair.first(),
            second: record.pair.second(),
            days: record.overlap_days,
        }
    }
}

impl Renderable for DetailRow {
    fn render_human(&self, w: &mut dyn Write) -> io::Result<()> {
        writeln!(
            w,
            "{:<14} {:>10} + {:<10} {:>8} days",
            self.project.to_string(),
            self.first.to_string(),
            self.second.to_string(),
            self.days
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
            self.project, self.first, self.second, self.days
        )
    }

    fn table_headers() -> &'static [&'static str] {
        &["project", "first", "second", "days"]
    }
}

/// Records in project order, optionally restricted to one project.
pub fn detail_rows(records: Vec<CollaborationRecord>, project: Option<&ProjectId>) -> Vec<DetailRow> {
    records
        .into_iter()
        .filter(|record| project.is_none_or(|wanted| &record.project == wanted))
        .map(DetailRow::from)
        .collect()
}

/// List per-project collaboration records.
///
/// # Errors
///
/// Returns an error if the file cannot be read or holds no valid rows.
pub fn run_details(
    args: &DetailsArgs,
    config: &ProjectConfig,
    output: OutputMode,
) -> anyhow::Result<()> {
    let analysis = load_and_analyze(&args.input, config, output)?;
    if analysis.report.records.is_empty() && !output.is_json() {
        println!("{NO_COLLABORATION}");
        return Ok(());
    }

    let project = args.project.as_deref().map(ProjectId::from);
    let rows = detail_rows(analysis.report.records, project.as_ref());

    if output.is_pretty() {
        let stdout = io::stdout();
        pretty_section(&mut stdout.lock(), "Collaborations")?;
    }
    render_list(&rows, output)?;
    Ok(())
}
