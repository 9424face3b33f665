//! Anomaly detector
//!
//! Compares each theme's current score against its own historical
//! distribution: a theme is anomalous when it deviates from its mean by
//! more than `anomaly_multiplier` population standard deviations.
//! Requires at least `min_count` historical samples, so a theme seen
//! once or twice can never look anomalous.

use super::engine::{ratio_confidence, AnalysisContext, Detector};
use super::types::{Insight, InsightType};

/// Mean and population standard deviation of a sample set
fn mean_and_std_dev(samples: &[f64]) -> (f64, f64) {
    let n = samples.len() as f64;
    let mean = samples.iter().sum::<f64>() / n;
    let variance = samples.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / n;
    (mean, variance.sqrt())
}

pub struct AnomalyDetector;

impl Detector for AnomalyDetector {
    fn name(&self) -> &'static str {
        "anomaly"
    }

    fn detect(&self, ctx: &AnalysisContext<'_>) -> Vec<Insight> {
        let min_samples = ctx.config.min_count as usize;
        let mut insights = Vec::new();

        for (theme, entry) in ctx.current.themes() {
            if entry.count < ctx.config.min_count {
                continue;
            }

            let samples: Vec<f64> = ctx
                .history
                .records()
                .iter()
                .filter_map(|r| r.score(theme))
                .collect();
            if samples.len() < min_samples {
                continue;
            }

            let (mean, std_dev) = mean_and_std_dev(&samples);
            if std_dev == 0.0 {
                // A flat history has no volatility to deviate from
                continue;
            }

            let deviation = (entry.score - mean).abs();
            let limit = ctx.config.anomaly_multiplier * std_dev;
            if deviation < limit {
                continue;
            }

            let confidence = ratio_confidence(deviation, limit * 2.0);
            insights.push(
                Insight::new(InsightType::Anomaly, confidence)
                    .with_evidence("theme", theme.clone())
                    .with_evidence("mean", mean)
                    .with_evidence("std_dev", std_dev)
                    .with_evidence("current", entry.score)
                    .with_evidence("z_ratio", deviation / std_dev)
                    .with_evidence("samples", samples.len()),
            );
        }

        insights
    }
}
