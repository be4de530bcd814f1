//! # pacrat-cli
//!
//! Command-line frontend for querying package indexes (PyPI, npm,
//! crates.io, Docker Hub) through one normalized interface.
//!
//! This is the dispatch layer: it parses arguments, sets up logging, wires
//! the providers to a shared query cache, and prints normalized results as
//! JSON. All index-specific behavior lives in `pacrat-providers`.

use std::time::Duration;

use clap::{Parser, Subcommand};
use pacrat_core::PacratError;
use tracing::{error, info};

mod commands;
mod output;

use commands::CommandContext;

/// Query package indexes (PyPI, npm, crates.io, Docker Hub)
#[derive(Parser)]
#[command(name = "pacrat", version, about = "Uniform package index queries")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Custom User-Agent for upstream requests
    #[arg(long, global = true)]
    pub user_agent: Option<String>,

    /// Disable the in-process response cache
    #[arg(long, global = true)]
    pub no_cache: bool,

    /// Per-request timeout in seconds
    #[arg(long, global = true, default_value_t = 30)]
    pub timeout: u64,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search a package index
    Search {
        /// Index to search: pypi, npm, crates, or docker
        index: String,
        /// Package name or search query
        query: String,
        /// Maximum number of results
        #[arg(short, long, default_value_t = 5)]
        limit: usize,
    },
    /// Get details for one package
    Info {
        /// Index to query: pypi, npm, or crates
        index: String,
        /// Package name
        name: String,
        /// Specific version (default: latest)
        #[arg(long)]
        version: Option<String>,
    },
    /// List Docker Hub tags for an image
    Tags {
        /// Image name, namespace-qualified or official
        image: String,
    },
    /// Inspect one Docker Hub tag
    TagInfo {
        /// Image name, namespace-qualified or official
        image: String,
        /// Tag to resolve
        tag: String,
    },
}

fn main() {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    if let Err(error) = run_cli(cli) {
        let user_error = error
            .downcast_ref::<PacratError>()
            .map(PacratError::is_user_error)
            .unwrap_or(false);
        error!("{error:#}");
        eprintln!("error: {error:#}");
        std::process::exit(if user_error { 2 } else { 1 });
    }
}

fn run_cli(cli: Cli) -> anyhow::Result<()> {
    let rt = tokio::runtime::Runtime::new()?;

    rt.block_on(async {
        let ctx = CommandContext::new(
            cli.user_agent,
            !cli.no_cache,
            Duration::from_secs(cli.timeout),
        )?;
        info!("pacrat v{} ready", env!("CARGO_PKG_VERSION"));
        commands::dispatch_command(cli.command, &ctx).await
    })
}

fn setup_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "pacrat={level},pacrat_providers={level},pacrat_cache={level}"
        ))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
