//! Record archiving command

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use glean_core::models::WeeklyRecord;

use crate::history::record_path;

pub fn cmd_record(
    records_dir: &Path,
    file: &Path,
    run_id: &str,
    generated_at: Option<&str>,
    output: Option<&Path>,
) -> Result<()> {
    let generated_at = match generated_at {
        Some(raw) => DateTime::parse_from_rfc3339(raw)
            .with_context(|| format!("Invalid --generated-at '{}' (use RFC 3339)", raw))?
            .with_timezone(&Utc),
        None => Utc::now(),
    };

    let csv_file = fs::File::open(file)
        .with_context(|| format!("Failed to open CSV file {}", file.display()))?;
    let record = WeeklyRecord::from_csv_reader(run_id, generated_at, csv_file)
        .with_context(|| format!("Failed to build record from {}", file.display()))?;

    let output_path = output
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| record_path(records_dir, run_id));
    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&output_path, serde_json::to_string_pretty(&record)?)
        .with_context(|| format!("Failed to write {}", output_path.display()))?;

    println!();
    println!("📦 Archived weekly record");
    println!("   Run:    {}", record.run_id);
    println!("   Themes: {}", record.len());
    println!("   Items:  {}", record.total_count());
    println!("   Score:  {:.2}", record.total_score());
    println!("   File:   {}", output_path.display());

    Ok(())
}
