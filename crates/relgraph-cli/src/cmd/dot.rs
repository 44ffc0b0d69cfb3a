//! `relgraph dot` — Graphviz description of the unreleased packages.

use clap::Args;

use relgraph_core::config::RelgraphConfig;
use relgraph_core::export::dot_graph;

use crate::cmd::pipeline::CatalogArgs;
use crate::output::{OutputMode, write_document};

/// Arguments for `relgraph dot`.
#[derive(Args, Debug, Clone, Default)]
pub struct DotArgs {
    #[command(flatten)]
    pub catalog: CatalogArgs,
}

/// Execute `relgraph dot`. Always writes DOT regardless of output mode.
pub fn run_dot(args: &DotArgs, config: &RelgraphConfig, output: OutputMode) -> anyhow::Result<()> {
    let catalog = args.catalog.prepare(config, output)?;
    write_document(&dot_graph(&catalog))
}
