//! Rising/falling ranking detector
//!
//! Among the themes that qualified for a delta insight, flags the single
//! largest gain as `rising_theme` and the single largest drop as
//! `falling_theme`. These are layered on top of the raw delta insights,
//! not a replacement for them. Ties on the extreme delta break toward
//! the lexicographically earliest theme name so output is reproducible.

use super::delta::{qualifying_deltas, QualifyingDelta};
use super::engine::{ratio_confidence, AnalysisContext, Detector};
use super::types::{Insight, InsightType};

pub struct RankingDetector;

impl RankingDetector {
    fn flag(
        ctx: &AnalysisContext<'_>,
        insight_type: InsightType,
        q: &QualifyingDelta,
    ) -> Insight {
        let confidence = ratio_confidence(q.delta.abs(), ctx.config.delta_threshold * 2.0);
        Insight::new(insight_type, confidence)
            .with_evidence("theme", q.theme.clone())
            .with_evidence("previous", q.previous)
            .with_evidence("current", q.current)
            .with_evidence("delta", q.delta)
            .with_evidence("previous_run", q.previous_run.clone())
    }
}

impl Detector for RankingDetector {
    fn name(&self) -> &'static str {
        "ranking"
    }

    fn detect(&self, ctx: &AnalysisContext<'_>) -> Vec<Insight> {
        let deltas = qualifying_deltas(ctx);
        let mut insights = Vec::new();

        // qualifying_deltas is ordered by theme name, so keeping the
        // first strictly-greater extreme gives the lexicographic
        // tie-break for free.
        let rising = deltas
            .iter()
            .filter(|q| q.delta > 0.0)
            .fold(None::<&QualifyingDelta>, |best, q| match best {
                Some(b) if q.delta <= b.delta => Some(b),
                _ => Some(q),
            });
        let falling = deltas
            .iter()
            .filter(|q| q.delta < 0.0)
            .fold(None::<&QualifyingDelta>, |best, q| match best {
                Some(b) if q.delta >= b.delta => Some(b),
                _ => Some(q),
            });

        if let Some(q) = rising {
            insights.push(Self::flag(ctx, InsightType::RisingTheme, q));
        }
        if let Some(q) = falling {
            insights.push(Self::flag(ctx, InsightType::FallingTheme, q));
        }

        insights
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::InsightConfig;
    use crate::models::{HistorySeries, RecordRow, WeeklyRecord};
    use chrono::{TimeZone, Utc};

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
    fn test_rising_and_falling_flags() {
        let history = HistorySeries::from_records(vec![record(
            "r1",
            1,
            &[("AI", 5.0, 5), ("Ops", 9.0, 5), ("Web", 4.0, 5)],
        )])
        .unwrap();
        let current = record(
            "r2",
            8,
            &[("AI", 11.0, 5), ("Ops", 3.0, 5), ("Web", 7.0, 5)],
        );
        let config = InsightConfig::default();
        let ctx = AnalysisContext::new(&current, &history, &config);

        let insights = RankingDetector.detect(&ctx);
        assert_eq!(insights.len(), 2);
        assert_eq!(insights[0].insight_type, InsightType::RisingTheme);
        assert_eq!(insights[0].theme(), Some("AI"));
        assert_eq!(insights[1].insight_type, InsightType::FallingTheme);
        assert_eq!(insights[1].theme(), Some("Ops"));
    }

    #[test]
    fn test_tie_breaks_to_earliest_name() {
        let history = HistorySeries::from_records(vec![record(
            "r1",
            1,
            &[("Zeta", 0.0, 5), ("Alpha", 0.0, 5)],
        )])
        .unwrap();
        // Identical +5.0 deltas; Alpha wins the tie
        let current = record("r2", 8, &[("Zeta", 5.0, 5), ("Alpha", 5.0, 5)]);
        let config = InsightConfig::default();
        let ctx = AnalysisContext::new(&current, &history, &config);

        let insights = RankingDetector.detect(&ctx);
        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].insight_type, InsightType::RisingTheme);
        assert_eq!(insights[0].theme(), Some("Alpha"));
    }

    #[test]
    fn test_only_rising_when_no_negative_deltas() {
        let history =
            HistorySeries::from_records(vec![record("r1", 1, &[("AI", 5.0, 5)])]).unwrap();
        let current = record("r2", 8, &[("AI", 8.4, 5)]);
        let config = InsightConfig::default();
        let ctx = AnalysisContext::new(&current, &history, &config);

        let insights = RankingDetector.detect(&ctx);
        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].insight_type, InsightType::RisingTheme);
    }

    #[test]
    fn test_no_history_means_no_ranking() {
        let history = HistorySeries::new();
        let current = record("r1", 1, &[("AI", 8.4, 5)]);
        let config = InsightConfig::default();
        let ctx = AnalysisContext::new(&current, &history, &config);

        assert!(RankingDetector.detect(&ctx).is_empty());
    }

    #[test]
    fn test_zero_delta_is_neither_rising_nor_falling() {
        let history =
            HistorySeries::from_records(vec![record("r1", 1, &[("AI", 5.0, 5)])]).unwrap();
        let current = record("r2", 8, &[("AI", 5.0, 5)]);
        let config = InsightConfig {
            delta_threshold: 0.0,
            ..InsightConfig::default()
        };
        let ctx = AnalysisContext::new(&current, &history, &config);

        // Qualifies for a delta insight at threshold zero, but a flat
        // line is not a riser or a faller
        assert!(RankingDetector.detect(&ctx).is_empty());
    }
}
