//! Record archive loading
//!
//! The archive is a directory of `weekly-*.json` files, one per run.
//! Unreadable files are skipped with a warning so one corrupt archive
//! never blocks the week's report; ordering and duplicate checks happen
//! in `HistorySeries::from_records`.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use glean_core::models::{HistorySeries, WeeklyRecord};

/// Load every archived weekly record under `dir` into a history series.
pub fn load_history(dir: &Path) -> Result<HistorySeries> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("Failed to read records dir {}", dir.display()))?;

    let mut records = Vec::new();
    for entry in entries {
        let entry = entry?;
        let path = entry.path();

        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if !name.starts_with("weekly-") || !name.ends_with(".json") {
            continue;
        }

        match read_record(&path) {
            Ok(record) => records.push(record),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Skipping unreadable record file");
            }
        }
    }

    HistorySeries::from_records(records)
        .with_context(|| format!("Inconsistent record archive in {}", dir.display()))
}

fn read_record(path: &Path) -> Result<WeeklyRecord> {
    let content = fs::read_to_string(path)?;
    let record: WeeklyRecord = serde_json::from_str(&content)?;
    Ok(record)
}

/// Default archive path for a run's record file
pub fn record_path(dir: &Path, run_id: &str) -> std::path::PathBuf {
    dir.join(format!("weekly-{}.json", run_id))
}
