//! `relgraph completions` — shell completion scripts for the subcommands,
//! their filter flags, and the `--format` values.

use anyhow::Result;
use clap::Args;
use clap_complete::{Shell, generate};

/// Arguments for `relgraph completions`.
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate for (bash, zsh, fish, elvish, powershell).
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Write the completion script for `shell` to stdout. It needs no catalog or
/// config, so `main` runs it before either is resolved.
///
/// # Errors
///
/// Returns an error if writing to stdout fails.
pub fn run_completions(shell: Shell, command: &mut clap::Command) -> Result<()> {
    let mut out = std::io::stdout();
    generate(shell, command, "relgraph", &mut out);
    Ok(())
}
