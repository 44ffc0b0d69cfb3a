//! Shared catalog loading and filtering for every command.
//!
//! The pipeline runs in a fixed order: read → closure pass → depth filter →
//! target filter → unreleased filter. Flags switch stages on; the config file
//! supplies defaults for anything the flags leave unset.

use std::collections::BTreeSet;
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use tracing::{debug, info};

use relgraph_core::config::RelgraphConfig;
use relgraph_core::filter::{filter_by_depth, filter_by_targets, filter_unreleased};
use relgraph_core::{Catalog, closure};

use crate::output::{CliError, OutputMode, render_error};

/// Catalog input and filter flags shared by all graph commands.
#[derive(Args, Debug, Clone, Default)]
pub struct CatalogArgs {
    /// Catalog YAML file mapping package name to record (`-` reads stdin).
    #[arg(value_name = "CATALOG", default_value = "-")]
    pub catalog: PathBuf,

    /// Keep only packages within this many hops of the unblocked roots.
    #[arg(long)]
    pub depth: Option<usize>,

    /// Keep only these packages and whatever transitively blocks them.
    #[arg(long = "target", value_name = "NAME")]
    pub targets: Vec<String>,

    /// Read additional targets from a file, one name per line (`#` comments).
    #[arg(long, value_name = "PATH")]
    pub targets_file: Option<PathBuf>,

    /// Drop packages that have already released.
    #[arg(long)]
    pub unreleased_only: bool,

    /// Fill in missing `blocking`/`recursive_blocking` sets from `blocked_by`.
    #[arg(long)]
    pub derive_closure: bool,
}

/// Blocker names that do not keep a package from being ranked.
#[derive(Args, Debug, Clone, Default)]
pub struct IgnoreArgs {
    /// Treat this blocker as already released (repeatable).
    #[arg(long = "ignore", value_name = "NAME")]
    pub ignore: Vec<String>,
}

impl IgnoreArgs {
    /// Flag values merged with `[rank] ignore` from the config.
    pub fn resolve(&self, config: &RelgraphConfig) -> BTreeSet<String> {
        let mut ignore = config.rank.ignore_set();
        ignore.extend(self.ignore.iter().cloned());
        ignore
    }
}

/// Read a catalog from a file, or stdin for `-`.
///
/// Parse failures are rendered as a structured error before bailing.
pub fn load_catalog(path: &Path, output: OutputMode) -> anyhow::Result<Catalog> {
    let text = if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read catalog from stdin")?;
        buf
    } else {
        match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) => {
                render_error(
                    output,
                    &CliError::with_details(
                        format!("cannot read catalog {}: {err}", path.display()),
                        "pass a YAML catalog file, or `-` to read stdin",
                        "catalog_unreadable",
                    ),
                )?;
                anyhow::bail!("catalog not readable: {}", path.display());
            }
        }
    };

    match Catalog::from_yaml_str(&text) {
        Ok(catalog) => {
            info!(packages = catalog.len(), "catalog loaded");
            Ok(catalog)
        }
        Err(err) => {
            render_error(output, &CliError::from(&err))?;
            Err(err).with_context(|| format!("Failed to load catalog {}", path.display()))
        }
    }
}

/// Parse a targets file: one name per line, blank lines and `#` comments
/// ignored.
pub fn parse_targets(text: &str) -> impl Iterator<Item = String> + '_ {
    text.lines()
        .map(|line| line.split('#').next().unwrap_or_default().trim())
        .filter(|line| !line.is_empty())
        .map(str::to_string)
}

impl CatalogArgs {
    /// Every target from flags, the targets file, and the config.
    pub fn resolve_targets(&self, config: &RelgraphConfig) -> anyhow::Result<BTreeSet<String>> {
        let mut targets: BTreeSet<String> = config.filter.targets.iter().cloned().collect();
        targets.extend(self.targets.iter().cloned());
        if let Some(path) = &self.targets_file {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read targets file {}", path.display()))?;
            targets.extend(parse_targets(&text));
        }
        Ok(targets)
    }

    /// Load the catalog and run every enabled pipeline stage.
    pub fn prepare(&self, config: &RelgraphConfig, output: OutputMode) -> anyhow::Result<Catalog> {
        let mut catalog = load_catalog(&self.catalog, output)?;

        if self.derive_closure || config.filter.derive_closure {
            catalog = closure::derive_all(&catalog);
        }

        if let Some(depth) = self.depth.or(config.filter.depth) {
            catalog = filter_by_depth(&catalog, depth);
            debug!(depth, remaining = catalog.len(), "depth filter applied");
        }

        let targets = self.resolve_targets(config)?;
        if !targets.is_empty() {
            catalog = filter_by_targets(&catalog, &targets);
            debug!(targets = targets.len(), remaining = catalog.len(), "target filter applied");
        }

        if self.unreleased_only || config.filter.unreleased_only {
            catalog = filter_unreleased(&catalog);
        }

        Ok(catalog)
    }
}
