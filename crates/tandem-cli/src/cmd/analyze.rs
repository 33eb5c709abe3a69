use std::io::{self, Write};

use clap::Args;
use serde::Serialize;
use tandem_core::config::ProjectConfig;
use tandem_core::model::{CollaborationRecord, LongestCollaboration};

use crate::cmd::input::{InputArgs, load_and_analyze};
use crate::output::{OutputMode, pretty_kv, pretty_rule, pretty_section, render_mode};

/// Printed when the file has rows but no two employees ever overlapped.
pub const NO_COLLABORATION: &str = "No employee collaborations found";

/// Arguments for `tdm analyze`.
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

#[derive(Debug, Serialize)]
struct AnalyzeView {
    longest: Option<LongestCollaboration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'static str>,
    collaborations: Vec<CollaborationRecord>,
    assignments: usize,
    skipped_rows: usize,
}

fn render_text(view: &AnalyzeView, w: &mut dyn Write) -> io::Result<()> {
    let Some(longest) = &view.longest else {
        return writeln!(w, "{NO_COLLABORATION}");
    };
    writeln!(
        w,
        "longest  {}  {}  {}",
        longest.pair.first(),
        longest.pair.second(),
        longest.total_days
    )?;
    writeln!(w, "project  first  second  days")?;
    for record in &view.collaborations {
        writeln!(
            w,
            "{}  {}  {}  {}",
            record.project,
            record.pair.first(),
            record.pair.second(),
            record.overlap_days
        )?;
    }
    Ok(())
}

fn render_pretty(view: &AnalyzeView, w: &mut dyn Write) -> io::Result<()> {
    let Some(longest) = &view.longest else {
        writeln!(w, "{NO_COLLABORATION}")?;
        return pretty_kv(w, "Rows", view.assignments.to_string());
    };

    pretty_section(w, "Longest collaboration")?;
    pretty_kv(
        w,
        "Employees",
        format!("{} and {}", longest.pair.first(), longest.pair.second()),
    )?;
    pretty_kv(w, "Total days", longest.total_days.to_string())?;
    pretty_kv(w, "Rows", view.assignments.to_string())?;
    if view.skipped_rows > 0 {
        pretty_kv(w, "Skipped", view.skipped_rows.to_string())?;
    }

    writeln!(w)?;
    pretty_section(w, "Collaborations")?;
    writeln!(
        w,
        "{:<14} {:>12} {:>12} {:>8}",
        "Project", "Employee 1", "Employee 2", "Days"
    )?;
    for record in &view.collaborations {
        writeln!(
            w,
            "{:<14} {:>12} {:>12} {:>8}",
            record.project.to_string(),
            record.pair.first().to_string(),
            record.pair.second().to_string(),
            record.overlap_days
        )?;
    }
    pretty_rule(w)
}

/// Find the longest-collaborating pair and list every overlap.
///
/// # Errors
///
/// Returns an error if the file cannot be read or holds no valid rows.
pub fn run_analyze(
    args: &AnalyzeArgs,
    config: &ProjectConfig,
    output: OutputMode,
) -> anyhow::Result<()> {
    let analysis = load_and_analyze(&args.input, config, output)?;
    let report = analysis.report;

    let view = AnalyzeView {
        message: (!report.has_collaboration()).then_some(NO_COLLABORATION),
        longest: report.longest,
        collaborations: report.records,
        assignments: analysis.parsed.assignments.len(),
        skipped_rows: analysis.parsed.skipped.len(),
    };

    render_mode(output, &view, render_text, render_pretty)
}
