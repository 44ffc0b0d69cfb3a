#![forbid(unsafe_code)]

mod cmd;
mod output;

use clap::{CommandFactory, Parser, Subcommand};
use output::{OutputMode, resolve_output_mode};
use relgraph_core::config::resolve_config;
use std::env;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "relgraph: release-blocking graph for package catalogs",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format (default: pretty on a TTY, text when piped).
    #[arg(long, value_enum, global = true)]
    format: Option<OutputMode>,

    /// Shorthand for `--format json`.
    #[arg(long, global = true, hide = true)]
    json: bool,

    /// Config file (default: ./relgraph.toml, then the user config dir).
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        next_help_heading = "Report",
        about = "Rank packages that can release next",
        long_about = "List unreleased packages with no outstanding blockers, ordered by how many packages releasing them would unblock.",
        after_help = "EXAMPLES:\n    # Rank the whole catalog\n    relgraph next catalog.yaml\n\n    # Only look two hops out, ignoring catkin as a blocker\n    relgraph next catalog.yaml --depth 2 --ignore catkin\n\n    # Emit machine-readable output\n    relgraph next catalog.yaml --format json"
    )]
    Next(cmd::next::NextArgs),

    #[command(
        next_help_heading = "Export",
        about = "Write a Graphviz digraph of unreleased packages",
        long_about = "Write a DOT digraph: yellow nodes are ready to release, red nodes are blocked, edges point from a package to its blocker.",
        after_help = "EXAMPLES:\n    # Render to SVG\n    relgraph dot catalog.yaml | dot -Tsvg > graph.svg\n\n    # Only what blocks rviz\n    relgraph dot catalog.yaml --derive-closure --target rviz"
    )]
    Dot(cmd::dot::DotArgs),

    #[command(
        next_help_heading = "Export",
        about = "Write a checkout manifest for the next releases",
        long_about = "Write a `repositories:` manifest listing the packages that can release next. Packages without a URL are kept as commented placeholders.",
        after_help = "EXAMPLES:\n    # Manifest for vcs import\n    relgraph manifest catalog.yaml > next.repos\n\n    # Everything still unreleased under a target\n    relgraph manifest catalog.yaml --derive-closure --target rviz --unreleased-only --all"
    )]
    Manifest(cmd::manifest::ManifestArgs),

    #[command(
        next_help_heading = "Export",
        about = "Write the filtered catalog as YAML",
        long_about = "Run the loading and filter stages and write the resulting catalog back out as YAML.",
        after_help = "EXAMPLES:\n    # Precompute closures once, reuse the result\n    relgraph filter catalog.yaml --derive-closure > closed.yaml\n    relgraph next closed.yaml --target rviz"
    )]
    Filter(cmd::filter::FilterArgs),

    #[command(
        next_help_heading = "Project Maintenance",
        about = "Generate shell completion scripts",
        after_help = "EXAMPLES:\n    # Generate bash completions\n    relgraph completions bash"
    )]
    Completions(cmd::completions::CompletionsArgs),
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("RELGRAPH_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose || env::var("DEBUG").is_ok() {
            "relgraph=debug,relgraph_core=debug,info"
        } else {
            "relgraph=info,relgraph_core=info,warn"
        })
    });

    let format = env::var("RELGRAPH_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Commands::Completions(args) = &cli.command {
        let mut command = Cli::command();
        return cmd::completions::run_completions(args.shell, &mut command);
    }

    let project_root = env::current_dir()?;
    let config = resolve_config(cli.config.as_deref(), &project_root)?;
    let output = resolve_output_mode(cli.format, cli.json, config.output.as_deref());
    debug!(?output, "output mode resolved");

    match &cli.command {
        Commands::Next(args) => cmd::next::run_next(args, &config, output),
        Commands::Dot(args) => cmd::dot::run_dot(args, &config, output),
        Commands::Manifest(args) => cmd::manifest::run_manifest(args, &config, output),
        Commands::Filter(args) => cmd::filter::run_filter(args, &config, output),
        Commands::Completions(_) => Ok(()),
    }
}
