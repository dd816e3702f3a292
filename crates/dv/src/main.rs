//! dv CLI - Documentation site builder.
//!
//! Provides commands for:
//! - `build`: Generate the site configuration bundle for each release
//! - `check`: Validate every release without writing anything
//! - `releases`: List releases and resolve release identifiers

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{BuildArgs, CheckArgs, ReleasesArgs};
use output::Output;

/// dv - Documentation site builder.
#[derive(Parser)]
#[command(name = "dv", version, about)]
struct Cli {
    /// Enable verbose output (per-release build logs).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build site configuration bundles.
    Build(BuildArgs),
    /// Validate releases and report every problem.
    Check(CheckArgs),
    /// List releases per channel.
    Releases(ReleasesArgs),
}

/// Level used when neither `--verbose` nor a valid `RUST_LOG` is given.
const DEFAULT_LOG_LEVEL: &str = "warn";

// --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
fn log_filter(verbose: bool, rust_log: Option<&str>) -> EnvFilter {
    if verbose {
        return EnvFilter::new("info");
    }
    rust_log
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_LEVEL))
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(cli.verbose, rust_log.as_deref()))
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Build(args) => args.execute(),
        Commands::Check(args) => args.execute(),
        Commands::Releases(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
