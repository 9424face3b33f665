//! Domain models for Glean
//!
//! A [`WeeklyRecord`] is one week's snapshot of the market-research
//! pipeline: per-theme aggregate scores and item counts, keyed by theme
//! name. Records are immutable once built; the fallible constructors are
//! the only way untrusted tabular input enters the system. A
//! [`HistorySeries`] is the chronologically ordered archive of past
//! records the insight engine compares against.

use std::collections::BTreeMap;
use std::io::Read;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Aggregate score and item count for one theme in one week
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThemeScore {
    /// Aggregate score for the theme this week (finite)
    pub score: f64,
    /// Number of research items contributing to the score
    pub count: u32,
}

/// A raw input row, as exported from the upstream spreadsheet
#[derive(Debug, Clone, Deserialize)]
pub struct RecordRow {
    pub theme: String,
    pub score: f64,
    pub count: u32,
}

/// One week's analysis snapshot
///
/// Theme names are unique within a record. Themes are held in a
/// `BTreeMap` so iteration (and serialization) is deterministic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyRecord {
    /// Opaque run identifier, used only for ordering and labeling
    pub run_id: String,
    /// When the upstream analysis produced this record
    pub generated_at: DateTime<Utc>,
    themes: BTreeMap<String, ThemeScore>,
}

impl WeeklyRecord {
    /// Build a record from raw tabular rows.
    ///
    /// Fails with [`Error::MalformedRecord`] on an empty theme name, a
    /// non-finite score, or a duplicate theme within the record.
    pub fn from_rows(
        run_id: impl Into<String>,
        generated_at: DateTime<Utc>,
        rows: impl IntoIterator<Item = RecordRow>,
    ) -> Result<Self> {
        let run_id = run_id.into();
        let mut themes = BTreeMap::new();

        for (index, row) in rows.into_iter().enumerate() {
            let theme = row.theme.trim();
            if theme.is_empty() {
                return Err(Error::MalformedRecord(format!(
                    "row {}: missing theme name",
                    index + 1
                )));
            }
            if !row.score.is_finite() {
                return Err(Error::MalformedRecord(format!(
                    "row {}: score for '{}' is not a finite number",
                    index + 1,
                    theme
                )));
            }
            let entry = ThemeScore {
                score: row.score,
                count: row.count,
            };
            if themes.insert(theme.to_string(), entry).is_some() {
                return Err(Error::MalformedRecord(format!(
                    "row {}: duplicate theme '{}'",
                    index + 1,
                    theme
                )));
            }
        }

        Ok(Self {
            run_id,
            generated_at,
            themes,
        })
    }

    /// Build a record from a CSV export with `theme,score,count` columns.
    pub fn from_csv_reader<R: Read>(
        run_id: impl Into<String>,
        generated_at: DateTime<Utc>,
        reader: R,
    ) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut rows = Vec::new();
        for (index, result) in csv_reader.deserialize::<RecordRow>().enumerate() {
            let row = result.map_err(|e| {
                Error::MalformedRecord(format!("row {}: {}", index + 1, e))
            })?;
            rows.push(row);
        }

        Self::from_rows(run_id, generated_at, rows)
    }

    /// Theme names in lexicographic order
    pub fn theme_names(&self) -> impl Iterator<Item = &str> {
        self.themes.keys().map(String::as_str)
    }

    /// Themes with their scores, in lexicographic order by name
    pub fn themes(&self) -> &BTreeMap<String, ThemeScore> {
        &self.themes
    }

    /// Score for a theme, if present
    pub fn score(&self, theme: &str) -> Option<f64> {
        self.themes.get(theme).map(|t| t.score)
    }

    /// Item count for a theme, if present
    pub fn count(&self, theme: &str) -> Option<u32> {
        self.themes.get(theme).map(|t| t.count)
    }

    /// Sum of all theme scores (computed on demand)
    pub fn total_score(&self) -> f64 {
        self.themes.values().map(|t| t.score).sum()
    }

    /// Sum of all item counts (computed on demand)
    pub fn total_count(&self) -> u64 {
        self.themes.values().map(|t| u64::from(t.count)).sum()
    }

    pub fn len(&self) -> usize {
        self.themes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.themes.is_empty()
    }
}

/// Chronologically ordered archive of past weekly records
///
/// Invariants: timestamps strictly increase, run ids are unique. The
/// insight engine treats a series as read-only; the constructors enforce
/// the invariants so detectors never have to.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HistorySeries {
    records: Vec<WeeklyRecord>,
}

impl HistorySeries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a series from records in any order.
    ///
    /// Records are sorted by timestamp (then run id) before the
    /// invariants are checked, so callers may pass archive files in
    /// whatever order they were discovered.
    pub fn from_records(mut records: Vec<WeeklyRecord>) -> Result<Self> {
        records.sort_by(|a, b| {
            a.generated_at
                .cmp(&b.generated_at)
                .then_with(|| a.run_id.cmp(&b.run_id))
        });

        let mut series = Self::new();
        for record in records {
            series.push(record)?;
        }
        Ok(series)
    }

    /// Append a record, which must be newer than the latest entry.
    pub fn push(&mut self, record: WeeklyRecord) -> Result<()> {
        if self.records.iter().any(|r| r.run_id == record.run_id) {
            return Err(Error::InvalidData(format!(
                "duplicate run id '{}' in history",
                record.run_id
            )));
        }
        if let Some(last) = self.records.last() {
            if record.generated_at <= last.generated_at {
                return Err(Error::InvalidData(format!(
                    "run '{}' is not newer than run '{}'",
                    record.run_id, last.run_id
                )));
            }
        }
        self.records.push(record);
        Ok(())
    }

    /// Records in chronological order, oldest first
    pub fn records(&self) -> &[WeeklyRecord] {
        &self.records
    }

    /// The newest record, if any
    pub fn latest(&self) -> Option<&WeeklyRecord> {
        self.records.last()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Detach the newest record to serve as the current week,
    /// leaving the rest as its history.
    pub fn split_latest(mut self) -> Option<(WeeklyRecord, HistorySeries)> {
        let current = self.records.pop()?;
        Some((current, self))
    }

    /// Detach the named run to serve as the current week. Records newer
    /// than it are discarded, so a historical run can be re-analyzed
    /// against only the records that preceded it.
    pub fn split_at_run(mut self, run_id: &str) -> Option<(WeeklyRecord, HistorySeries)> {
        let index = self.records.iter().position(|r| r.run_id == run_id)?;
        self.records.truncate(index + 1);
        let current = self.records.pop()?;
        Some((current, self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 7, day, 6, 0, 0).unwrap()
    }

    fn row(theme: &str, score: f64, count: u32) -> RecordRow {
        RecordRow {
            theme: theme.to_string(),
            score,
            count,
        }
    }

    #[test]
    fn test_record_from_rows() {
        let record = WeeklyRecord::from_rows(
            "20260701",
            ts(1),
            vec![row("AI agents", 8.4, 5), row("Fintech", 3.0, 2)],
        )
        .unwrap();

        assert_eq!(record.len(), 2);
        assert_eq!(record.score("AI agents"), Some(8.4));
        assert_eq!(record.count("Fintech"), Some(2));
        assert_eq!(record.score("Missing"), None);
        assert!((record.total_score() - 11.4).abs() < 1e-9);
        assert_eq!(record.total_count(), 7);
    }

    #[test]
    fn test_record_rejects_duplicate_theme() {
        let err = WeeklyRecord::from_rows(
            "r1",
            ts(1),
            vec![row("AI", 1.0, 1), row("AI", 2.0, 2)],
        )
        .unwrap_err();
        assert!(matches!(err, Error::MalformedRecord(_)));
    }

    #[test]
    fn test_record_rejects_non_finite_score() {
        let err =
            WeeklyRecord::from_rows("r1", ts(1), vec![row("AI", f64::NAN, 1)]).unwrap_err();
        assert!(matches!(err, Error::MalformedRecord(_)));
    }

    #[test]
    fn test_record_rejects_empty_theme() {
        let err = WeeklyRecord::from_rows("r1", ts(1), vec![row("  ", 1.0, 1)]).unwrap_err();
        assert!(matches!(err, Error::MalformedRecord(_)));
    }

    #[test]
    fn test_record_from_csv() {
        let csv = "theme,score,count\nAI agents,8.4,5\nFintech,3.0,2\n";
        let record = WeeklyRecord::from_csv_reader("r1", ts(1), csv.as_bytes()).unwrap();
        assert_eq!(record.score("AI agents"), Some(8.4));
        assert_eq!(record.count("AI agents"), Some(5));
    }

    #[test]
    fn test_record_from_csv_non_numeric_score() {
        let csv = "theme,score,count\nAI agents,not-a-number,5\n";
        let err = WeeklyRecord::from_csv_reader("r1", ts(1), csv.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::MalformedRecord(_)));
    }

    #[test]
    fn test_history_sorts_and_validates() {
        let r1 = WeeklyRecord::from_rows("r1", ts(1), vec![row("AI", 1.0, 1)]).unwrap();
        let r2 = WeeklyRecord::from_rows("r2", ts(2), vec![row("AI", 2.0, 1)]).unwrap();
        let r3 = WeeklyRecord::from_rows("r3", ts(3), vec![row("AI", 3.0, 1)]).unwrap();

        // Out-of-order input ends up chronologically sorted
        let series = HistorySeries::from_records(vec![r3.clone(), r1.clone(), r2.clone()]).unwrap();
        let ids: Vec<&str> = series.records().iter().map(|r| r.run_id.as_str()).collect();
        assert_eq!(ids, vec!["r1", "r2", "r3"]);
        assert_eq!(series.latest().unwrap().run_id, "r3");
    }

    #[test]
    fn test_history_rejects_duplicate_run_id() {
        let r1 = WeeklyRecord::from_rows("r1", ts(1), vec![row("AI", 1.0, 1)]).unwrap();
        let dup = WeeklyRecord::from_rows("r1", ts(2), vec![row("AI", 2.0, 1)]).unwrap();
        let err = HistorySeries::from_records(vec![r1, dup]).unwrap_err();
        assert!(matches!(err, Error::InvalidData(_)));
    }

    #[test]
    fn test_history_rejects_equal_timestamps() {
        let r1 = WeeklyRecord::from_rows("r1", ts(1), vec![row("AI", 1.0, 1)]).unwrap();
        let r2 = WeeklyRecord::from_rows("r2", ts(1), vec![row("AI", 2.0, 1)]).unwrap();
        let err = HistorySeries::from_records(vec![r1, r2]).unwrap_err();
        assert!(matches!(err, Error::InvalidData(_)));
    }

    #[test]
    fn test_split_latest() {
        let r1 = WeeklyRecord::from_rows("r1", ts(1), vec![row("AI", 1.0, 1)]).unwrap();
        let r2 = WeeklyRecord::from_rows("r2", ts(2), vec![row("AI", 2.0, 1)]).unwrap();
        let series = HistorySeries::from_records(vec![r1, r2]).unwrap();

        let (current, history) = series.split_latest().unwrap();
        assert_eq!(current.run_id, "r2");
        assert_eq!(history.len(), 1);
        assert_eq!(history.latest().unwrap().run_id, "r1");
    }

    #[test]
    fn test_split_at_run_discards_newer() {
        let r1 = WeeklyRecord::from_rows("r1", ts(1), vec![row("AI", 1.0, 1)]).unwrap();
        let r2 = WeeklyRecord::from_rows("r2", ts(2), vec![row("AI", 2.0, 1)]).unwrap();
        let r3 = WeeklyRecord::from_rows("r3", ts(3), vec![row("AI", 3.0, 1)]).unwrap();
        let series = HistorySeries::from_records(vec![r1, r2, r3]).unwrap();

        let (current, history) = series.split_at_run("r2").unwrap();
        assert_eq!(current.run_id, "r2");
        assert_eq!(history.len(), 1);
        assert_eq!(history.latest().unwrap().run_id, "r1");
    }

    #[test]
    fn test_record_json_round_trip() {
        let record = WeeklyRecord::from_rows(
            "20260701",
            ts(1),
            vec![row("AI agents", 8.4, 5)],
        )
        .unwrap();
        let json = serde_json::to_string(&record).unwrap();
        let back: WeeklyRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record, back);
    }
}
