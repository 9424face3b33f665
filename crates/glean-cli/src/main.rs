//! Glean CLI - weekly market-research insight reporter
//!
//! Usage:
//!   glean record --file rows.csv --run-id 20260701   Archive a weekly record
//!   glean insights                                   Generate insights for the newest run
//!   glean trends                                     Trend analytics across runs
//!   glean templates                                  Show narrative templates

mod cli;
mod commands;
mod history;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    match cli.command {
        Commands::Record {
            file,
            run_id,
            generated_at,
            output,
        } => commands::cmd_record(
            &cli.records_dir,
            &file,
            &run_id,
            generated_at.as_deref(),
            output.as_deref(),
        ),
        Commands::Insights {
            current,
            output,
            markdown,
        } => commands::cmd_insights(
            &cli.records_dir,
            current.as_deref(),
            output.as_deref(),
            markdown.as_deref(),
        ),
        Commands::Trends { output } => commands::cmd_trends(&cli.records_dir, output.as_deref()),
        Commands::Templates { insight_type } => commands::cmd_templates(insight_type.as_deref()),
        Commands::Config => commands::cmd_config(),
    }
}
