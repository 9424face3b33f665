//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI
//! arguments. The actual command implementations are in the `commands`
//! module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Glean - Automated insight reports over weekly market-research runs
#[derive(Parser)]
#[command(name = "glean")]
#[command(about = "Weekly market-research insight reporter", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Directory containing archived weekly record JSON files
    #[arg(long, default_value = "analyses", global = true)]
    pub records_dir: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build a weekly record from a CSV export and archive it
    Record {
        /// CSV file with theme,score,count columns
        #[arg(short, long)]
        file: PathBuf,

        /// Run identifier for the new record
        #[arg(long)]
        run_id: String,

        /// Record timestamp, RFC 3339 (defaults to now)
        #[arg(long)]
        generated_at: Option<String>,

        /// Output path (defaults to <records-dir>/weekly-<run-id>.json)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate insights for the newest (or a named) run
    Insights {
        /// Run id to treat as current (defaults to the newest record;
        /// records newer than it are ignored, enabling backfill)
        #[arg(long)]
        current: Option<String>,

        /// Insight JSON output path
        /// (defaults to <records-dir>/insights-<run-id>.json)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Also write a Markdown report to this path
        #[arg(long)]
        markdown: Option<PathBuf>,
    },

    /// Compute trend analytics across all archived runs
    Trends {
        /// Trend JSON output path (defaults to <records-dir>/trends.json)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show resolved narrative templates
    Templates {
        /// Show a single insight type
        #[arg(long = "type")]
        insight_type: Option<String>,
    },

    /// Print the resolved threshold configuration
    Config,
}
