//! `relgraph filter` — write the filtered catalog back out as YAML, so
//! pipeline stages can be chained or inspected.

use clap::Args;

use relgraph_core::config::RelgraphConfig;

use crate::cmd::pipeline::CatalogArgs;
use crate::output::{CliError, OutputMode, render_error, write_document};

/// Arguments for `relgraph filter`.
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    #[command(flatten)]
    pub catalog: CatalogArgs,
}

/// Execute `relgraph filter`.
pub fn run_filter(
    args: &FilterArgs,
    config: &RelgraphConfig,
    output: OutputMode,
) -> anyhow::Result<()> {
    let catalog = args.catalog.prepare(config, output)?;
    match catalog.to_yaml_string() {
        Ok(text) => write_document(text.trim_end()),
        Err(err) => {
            render_error(output, &CliError::from(&err))?;
            Err(err.into())
        }
    }
}
