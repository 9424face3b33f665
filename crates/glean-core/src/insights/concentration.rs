//! Concentration detector
//!
//! Flags themes holding an outsized share of the week's total score.
//! This is the only detector that needs no history, so first-ever runs
//! can still produce a report.

use super::engine::{AnalysisContext, Detector};
use super::types::{Insight, InsightType};

pub struct ConcentrationDetector;

impl Detector for ConcentrationDetector {
    fn name(&self) -> &'static str {
        "concentration"
    }

    fn detect(&self, ctx: &AnalysisContext<'_>) -> Vec<Insight> {
        let total_score = ctx.current.total_score();
        if total_score == 0.0 {
            return Vec::new();
        }

        let mut insights = Vec::new();
        for (theme, entry) in ctx.current.themes() {
            if entry.count < ctx.config.min_count {
                continue;
            }

            let share = entry.score / total_score;
            if share < ctx.config.concentration_threshold {
                continue;
            }

            insights.push(
                // Share is already a [0, 1] fraction under well-formed
                // input, so it doubles as the confidence.
                Insight::new(InsightType::Concentration, share)
                    .with_evidence("theme", theme.clone())
                    .with_evidence("share", share)
                    .with_evidence("share_pct", share * 100.0)
                    .with_evidence("total_score", total_score),
            );
        }

        insights
    }
}
