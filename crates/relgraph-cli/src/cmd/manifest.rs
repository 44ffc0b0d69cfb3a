//! `relgraph manifest` — checkout list for the packages that can release next,
//! or with `--all` for every package left after filtering.

use clap::Args;

use relgraph_core::config::RelgraphConfig;
use relgraph_core::export::manifest;
use relgraph_core::rank::{NextRelease, who_is_next};

use crate::cmd::pipeline::{CatalogArgs, IgnoreArgs};
use crate::output::{OutputMode, write_document};

/// Arguments for `relgraph manifest`.
#[derive(Args, Debug, Clone, Default)]
pub struct ManifestArgs {
    #[command(flatten)]
    pub catalog: CatalogArgs,

    #[command(flatten)]
    pub ignore: IgnoreArgs,

    /// List every package in the filtered catalog, in catalog order, instead
    /// of only the ranked candidates.
    #[arg(long)]
    pub all: bool,
}

/// Execute `relgraph manifest`. Always writes the manifest text.
pub fn run_manifest(
    args: &ManifestArgs,
    config: &RelgraphConfig,
    output: OutputMode,
) -> anyhow::Result<()> {
    let catalog = args.catalog.prepare(config, output)?;
    let entries: Vec<NextRelease> = if args.all {
        catalog.iter().map(NextRelease::from).collect()
    } else {
        who_is_next(&catalog, &args.ignore.resolve(config))
    };
    write_document(&manifest(&entries))
}
