//! gram CLI - Instagram image tag preprocessor.
//!
//! Provides commands for:
//! - `build`: Expand `{% gram %}` tags in a directory of markdown documents
//! - `tag`: Render a single directive

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{BuildArgs, TagArgs};
use output::Output;

/// gram - Instagram image tag preprocessor.
#[derive(Parser)]
#[command(name = "gram", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Expand gram tags in every markdown document under the source directory.
    Build(BuildArgs),
    /// Render a single gram directive to stdout.
    Tag(TagArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    let verbose = match &cli.command {
        Commands::Build(args) => args.verbose,
        Commands::Tag(args) => args.verbose,
    };

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Build(args) => args.execute(),
        Commands::Tag(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
