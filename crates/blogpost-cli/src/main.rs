// crates/blogpost-cli/src/main.rs - CLI Application Entry Point
//
// `create-post` asks a few questions and writes the skeleton of a new blog
// post into the content directory:
//
// ┌──────────────┐    ┌──────────────────┐    ┌──────────────┐
// │ Tag catalog  │───▶│ Interactive      │───▶│ Post writer  │
// │ (scan posts) │    │ prompts          │    │ (one file)   │
// └──────────────┘    └──────────────────┘    └──────────────┘
//
// Nothing is written until every question has been answered. Any failure
// ends the run with a non-zero exit code and a readable message.
//
// EXAMPLE USAGE:
// ```bash
// create-post                      # Run from the site root
// create-post --open               # Open the new post in $EDITOR afterwards
// create-post -c site.toml -v      # Custom config, debug logging on stderr
// ```

use anyhow::Result;
use clap::Parser;
use tracing::Level;

mod cli; // Command-line arguments
mod commands; // The create flow
mod context; // Loaded configuration and resolved paths
mod services; // Terminal prompts and editor integration

use cli::Cli;
use context::Context;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let ctx = Context::new(cli.config.as_deref())?;
    commands::create::handle(&ctx, cli.open)
}

/// Logs go to stderr so they never interleave with the prompts on stdout
fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
