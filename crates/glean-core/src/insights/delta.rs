//! Delta detector
//!
//! Compares each theme's score against the immediately preceding run and
//! reports week-over-week changes at or above the configured threshold.

use super::engine::{ratio_confidence, AnalysisContext, Detector};
use super::types::{Insight, InsightType};

/// A theme whose week-over-week change cleared the delta threshold
#[derive(Debug, Clone)]
pub(crate) struct QualifyingDelta {
    pub theme: String,
    pub previous: f64,
    pub current: f64,
    pub delta: f64,
    pub previous_run: String,
}

/// Themes present in both the current record and the immediately
/// preceding one, whose absolute change clears the threshold and whose
/// current count clears the min-count guard. Ordered by theme name.
///
/// Shared with the ranking detector, which layers rising/falling flags
/// on top of the same qualifying set.
pub(crate) fn qualifying_deltas(ctx: &AnalysisContext<'_>) -> Vec<QualifyingDelta> {
    let Some(previous) = ctx.previous() else {
        return Vec::new();
    };

    let mut deltas = Vec::new();
    for (theme, entry) in ctx.current.themes() {
        let Some(previous_score) = previous.score(theme) else {
            continue;
        };
        if entry.count < ctx.config.min_count {
            continue;
        }

        let delta = entry.score - previous_score;
        if delta.abs() < ctx.config.delta_threshold {
            continue;
        }

        deltas.push(QualifyingDelta {
            theme: theme.clone(),
            previous: previous_score,
            current: entry.score,
            delta,
            previous_run: previous.run_id.clone(),
        });
    }

    deltas
}

pub struct DeltaDetector;

impl Detector for DeltaDetector {
    fn name(&self) -> &'static str {
        "delta"
    }

    fn detect(&self, ctx: &AnalysisContext<'_>) -> Vec<Insight> {
        qualifying_deltas(ctx)
            .into_iter()
            .map(|q| {
                let confidence =
                    ratio_confidence(q.delta.abs(), ctx.config.delta_threshold * 2.0);
                Insight::new(InsightType::Delta, confidence)
                    .with_evidence("theme", q.theme)
                    .with_evidence("previous", q.previous)
                    .with_evidence("current", q.current)
                    .with_evidence("delta", q.delta)
                    .with_evidence("previous_run", q.previous_run)
            })
            .collect()
    }
}
