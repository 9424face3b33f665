//! Trend analytics across archived weekly runs
//!
//! Summarizes each run and compares the last two: headline metric
//! deltas plus the top rising and falling themes by score change. This
//! is descriptive reporting over the whole series, distinct from the
//! threshold-driven insight detectors.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::HistorySeries;

/// Headline numbers for one run
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub run_id: String,
    pub generated_at: DateTime<Utc>,
    pub theme_count: usize,
    pub total_count: u64,
    pub total_score: f64,
    /// Mean theme score (0.0 for an empty record)
    pub mean_score: f64,
}

/// A metric compared across the last two runs
#[derive(Debug, Clone, Serialize)]
pub struct MetricDelta {
    pub previous: f64,
    pub current: f64,
    pub delta: f64,
}

/// One theme's score movement between the last two runs
#[derive(Debug, Clone, Serialize)]
pub struct ThemeDelta {
    pub theme: String,
    pub previous: f64,
    pub current: f64,
    pub delta: f64,
}

/// Last-two-runs comparison
#[derive(Debug, Clone, Serialize)]
pub struct TrendDeltas {
    pub mean_score: MetricDelta,
    pub theme_count: MetricDelta,
    /// Up to five biggest positive movers, largest delta first
    pub top_rising_themes: Vec<ThemeDelta>,
    /// Up to five biggest negative movers, largest drop first
    pub top_falling_themes: Vec<ThemeDelta>,
}

/// Trend analytics over a whole series
#[derive(Debug, Clone, Serialize)]
pub struct TrendReport {
    pub runs: Vec<RunSummary>,
    /// Present once there are at least two runs to compare
    pub deltas: Option<TrendDeltas>,
}

const TOP_MOVERS: usize = 5;

/// Build trend analytics over every record in the series.
pub fn build_trend_report(series: &HistorySeries) -> TrendReport {
    let runs: Vec<RunSummary> = series
        .records()
        .iter()
        .map(|record| {
            let theme_count = record.len();
            let total_score = record.total_score();
            RunSummary {
                run_id: record.run_id.clone(),
                generated_at: record.generated_at,
                theme_count,
                total_count: record.total_count(),
                total_score,
                mean_score: if theme_count > 0 {
                    total_score / theme_count as f64
                } else {
                    0.0
                },
            }
        })
        .collect();

    let deltas = match series.records() {
        [.., previous, current] => {
            let prev_summary = &runs[runs.len() - 2];
            let curr_summary = &runs[runs.len() - 1];

            // Union of theme names across both runs; a missing side
            // counts as zero so new and vanished themes still rank
            let mut movements: Vec<ThemeDelta> = Vec::new();
            let mut themes: Vec<&str> = previous
                .theme_names()
                .chain(current.theme_names())
                .collect();
            themes.sort_unstable();
            themes.dedup();

            for theme in themes {
                let prev_score = previous.score(theme).unwrap_or(0.0);
                let curr_score = current.score(theme).unwrap_or(0.0);
                let delta = curr_score - prev_score;
                if delta != 0.0 {
                    movements.push(ThemeDelta {
                        theme: theme.to_string(),
                        previous: prev_score,
                        current: curr_score,
                        delta,
                    });
                }
            }

            let mut rising: Vec<ThemeDelta> =
                movements.iter().filter(|m| m.delta > 0.0).cloned().collect();
            rising.sort_by(|a, b| {
                b.delta
                    .partial_cmp(&a.delta)
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then_with(|| a.theme.cmp(&b.theme))
            });
            rising.truncate(TOP_MOVERS);

            let mut falling: Vec<ThemeDelta> =
                movements.iter().filter(|m| m.delta < 0.0).cloned().collect();
            falling.sort_by(|a, b| {
                a.delta
                    .partial_cmp(&b.delta)
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then_with(|| a.theme.cmp(&b.theme))
            });
            falling.truncate(TOP_MOVERS);

            Some(TrendDeltas {
                mean_score: MetricDelta {
                    previous: prev_summary.mean_score,
                    current: curr_summary.mean_score,
                    delta: curr_summary.mean_score - prev_summary.mean_score,
                },
                theme_count: MetricDelta {
                    previous: prev_summary.theme_count as f64,
                    current: curr_summary.theme_count as f64,
                    delta: curr_summary.theme_count as f64 - prev_summary.theme_count as f64,
                },
                top_rising_themes: rising,
                top_falling_themes: falling,
            })
        }
        _ => None,
    };

    TrendReport { runs, deltas }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{HistorySeries, RecordRow, WeeklyRecord};
    use chrono::TimeZone;

    fn record(run_id: &str, day: u32, rows: &[(&str, f64, u32)]) -> WeeklyRecord {
        WeeklyRecord::from_rows(
            run_id,
            Utc.with_ymd_and_hms(2026, 7, day, 6, 0, 0).unwrap(),
            rows.iter().map(|(theme, score, count)| RecordRow {
                theme: theme.to_string(),
                score: *score,
                count: *count,
            }),
        )
        .unwrap()
    }

    #[test]
    fn test_single_run_has_no_deltas() {
        let series =
            HistorySeries::from_records(vec![record("r1", 1, &[("AI", 4.0, 2)])]).unwrap();
        let report = build_trend_report(&series);

        assert_eq!(report.runs.len(), 1);
        assert!(report.deltas.is_none());
        assert_eq!(report.runs[0].theme_count, 1);
        assert_eq!(report.runs[0].mean_score, 4.0);
    }

    #[test]
    fn test_deltas_compare_last_two_runs() {
        let series = HistorySeries::from_records(vec![
            record("r1", 1, &[("AI", 4.0, 2), ("Ops", 6.0, 3)]),
            record("r2", 8, &[("AI", 9.0, 4), ("Ops", 2.0, 3), ("Web", 1.0, 1)]),
        ])
        .unwrap();
        let report = build_trend_report(&series);
        let deltas = report.deltas.unwrap();

        assert_eq!(deltas.theme_count.delta, 1.0);
        assert_eq!(deltas.top_rising_themes.len(), 2); // AI +5, Web +1
        assert_eq!(deltas.top_rising_themes[0].theme, "AI");
        assert_eq!(deltas.top_rising_themes[0].delta, 5.0);
        assert_eq!(deltas.top_falling_themes.len(), 1); // Ops -4
        assert_eq!(deltas.top_falling_themes[0].theme, "Ops");
    }

    #[test]
    fn test_vanished_theme_counts_as_falling_to_zero() {
        let series = HistorySeries::from_records(vec![
            record("r1", 1, &[("Legacy", 5.0, 3)]),
            record("r2", 8, &[("Fresh", 2.0, 2)]),
        ])
        .unwrap();
        let deltas = build_trend_report(&series).deltas.unwrap();

        assert_eq!(deltas.top_falling_themes[0].theme, "Legacy");
        assert_eq!(deltas.top_falling_themes[0].current, 0.0);
        assert_eq!(deltas.top_rising_themes[0].theme, "Fresh");
        assert_eq!(deltas.top_rising_themes[0].previous, 0.0);
    }

    #[test]
    fn test_top_movers_capped_and_tie_broken_by_name() {
        let rows = |score: f64| -> Vec<RecordRow> {
            (0..8)
                .map(|i| RecordRow {
                    theme: format!("T{}", i),
                    score,
                    count: 1,
                })
                .collect()
        };
        let r1 = WeeklyRecord::from_rows(
            "r1",
            Utc.with_ymd_and_hms(2026, 7, 1, 6, 0, 0).unwrap(),
            rows(0.0),
        )
        .unwrap();
        let r2 = WeeklyRecord::from_rows(
            "r2",
            Utc.with_ymd_and_hms(2026, 7, 8, 6, 0, 0).unwrap(),
            rows(3.0),
        )
        .unwrap();

        let series = HistorySeries::from_records(vec![r1, r2]).unwrap();
        let deltas = build_trend_report(&series).deltas.unwrap();

        // All eight tie at +3.0; the five lexicographically earliest win
        let names: Vec<&str> = deltas
            .top_rising_themes
            .iter()
            .map(|m| m.theme.as_str())
            .collect();
        assert_eq!(names, vec!["T0", "T1", "T2", "T3", "T4"]);
    }
}
