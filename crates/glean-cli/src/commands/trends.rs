//! Trend analytics command

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use glean_core::trends::build_trend_report;

use crate::history::load_history;

pub fn cmd_trends(records_dir: &Path, output: Option<&Path>) -> Result<()> {
    let series = load_history(records_dir)?;
    let report = build_trend_report(&series);

    let output_path = output
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| records_dir.join("trends.json"));
    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&output_path, serde_json::to_string_pretty(&report)?)
        .with_context(|| format!("Failed to write {}", output_path.display()))?;

    println!();
    println!("📈 Trend analytics across {} runs", report.runs.len());
    println!("   ─────────────────────────────────────────────────────────────");

    if let Some(latest) = report.runs.last() {
        println!(
            "   Latest: {} ({} themes, mean score {:.2})",
            latest.run_id, latest.theme_count, latest.mean_score
        );
    } else {
        println!("   No archived records found.");
    }

    if let Some(deltas) = &report.deltas {
        println!(
            "   Mean score: {:.2} → {:.2} ({:+.2})",
            deltas.mean_score.previous, deltas.mean_score.current, deltas.mean_score.delta
        );
        for mover in &deltas.top_rising_themes {
            println!("   ▲ {} {:+.2}", mover.theme, mover.delta);
        }
        for mover in &deltas.top_falling_themes {
            println!("   ▼ {} {:+.2}", mover.theme, mover.delta);
        }
    }

    println!();
    println!("   Wrote {}", output_path.display());

    Ok(())
}
