//! `relgraph next` — rank the packages that can release right now.

use std::io::Write;

use clap::Args;
use serde::Serialize;

use relgraph_core::config::RelgraphConfig;
use relgraph_core::export::ranked_report;
use relgraph_core::rank::{NextRelease, who_is_next};

use crate::cmd::pipeline::{CatalogArgs, IgnoreArgs};
use crate::output::{OutputMode, pretty_section, render_mode};

/// Arguments for `relgraph next`.
#[derive(Args, Debug, Clone, Default)]
pub struct NextArgs {
    #[command(flatten)]
    pub catalog: CatalogArgs,

    #[command(flatten)]
    pub ignore: IgnoreArgs,

    /// Print each candidate's source URL under it.
    #[arg(long)]
    pub with_urls: bool,

    /// Show at most this many candidates.
    #[arg(long)]
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
struct NextReport {
    count: usize,
    candidates: Vec<NextRelease>,
    #[serde(skip)]
    with_urls: bool,
}

/// Execute `relgraph next`.
pub fn run_next(args: &NextArgs, config: &RelgraphConfig, output: OutputMode) -> anyhow::Result<()> {
    let catalog = args.catalog.prepare(config, output)?;
    let ignore = args.ignore.resolve(config);

    let mut candidates = who_is_next(&catalog, &ignore);
    if let Some(limit) = args.limit {
        candidates.truncate(limit);
    }

    let report = NextReport {
        count: candidates.len(),
        candidates,
        with_urls: args.with_urls || config.report.with_urls,
    };

    render_mode(output, &report, render_next_text, render_next_pretty)
}

fn render_next_text(report: &NextReport, w: &mut dyn Write) -> std::io::Result<()> {
    if report.candidates.is_empty() {
        return Ok(());
    }
    writeln!(w, "{}", ranked_report(&report.candidates, report.with_urls))
}

fn render_next_pretty(report: &NextReport, w: &mut dyn Write) -> std::io::Result<()> {
    if report.candidates.is_empty() {
        return writeln!(w, "(no unblocked packages are ready to release)");
    }

    pretty_section(w, &format!("Next to release ({})", report.count))?;
    let width = report
        .candidates
        .iter()
        .map(|next| next.name.len())
        .max()
        .unwrap_or(0);
    for (rank, next) in report.candidates.iter().enumerate() {
        writeln!(
            w,
            "{:>3}. {:<width$}  blocking {}",
            rank + 1,
            next.name,
            next.blocking_count
        )?;
        if report.with_urls {
            writeln!(w, "     {}", next.url.as_deref().unwrap_or("(no url)"))?;
        }
    }
    Ok(())
}
