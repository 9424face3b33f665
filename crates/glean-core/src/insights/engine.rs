//! Insight engine - runs detectors over the current week against history

use crate::config::InsightConfig;
use crate::error::Result;
use crate::models::{HistorySeries, WeeklyRecord};

use super::anomaly::AnomalyDetector;
use super::concentration::ConcentrationDetector;
use super::delta::DeltaDetector;
use super::ranking::RankingDetector;
use super::types::Insight;

/// Everything a detector may look at: the current record, the history
/// preceding it, and the resolved thresholds. Borrowed, never mutated.
pub struct AnalysisContext<'a> {
    pub current: &'a WeeklyRecord,
    pub history: &'a HistorySeries,
    pub config: &'a InsightConfig,
}

impl<'a> AnalysisContext<'a> {
    pub fn new(
        current: &'a WeeklyRecord,
        history: &'a HistorySeries,
        config: &'a InsightConfig,
    ) -> Self {
        Self {
            current,
            history,
            config,
        }
    }

    /// The record immediately preceding the current one, if any
    pub fn previous(&self) -> Option<&WeeklyRecord> {
        self.history.latest()
    }
}

/// Trait for insight detectors
///
/// Detectors are pure arithmetic over the context: no I/O, no shared
/// state, deterministic output. Each runs independently of the others.
pub trait Detector: Send + Sync {
    /// Human-readable name for diagnostics
    fn name(&self) -> &'static str;

    /// Examine the context and produce findings, ordered by theme name
    fn detect(&self, ctx: &AnalysisContext<'_>) -> Vec<Insight>;
}

/// The main insight engine
///
/// Construction validates the configuration; a bad threshold aborts
/// before any record is touched. `generate` is a pure function of its
/// inputs, so independent weekly runs can be processed in parallel and
/// retried freely.
pub struct InsightEngine {
    config: InsightConfig,
    detectors: Vec<Box<dyn Detector>>,
}

impl std::fmt::Debug for InsightEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InsightEngine")
            .field("config", &self.config)
            .field("detectors", &self.detectors.len())
            .finish()
    }
}

impl InsightEngine {
    /// Create an engine with the built-in detectors, in emission order:
    /// delta, rising/falling ranking, concentration, anomaly.
    pub fn new(config: InsightConfig) -> Result<Self> {
        config.validate()?;

        let detectors: Vec<Box<dyn Detector>> = vec![
            Box::new(DeltaDetector),
            Box::new(RankingDetector),
            Box::new(ConcentrationDetector),
            Box::new(AnomalyDetector),
        ];

        Ok(Self { config, detectors })
    }

    /// The configuration this engine was built with
    pub fn config(&self) -> &InsightConfig {
        &self.config
    }

    /// Run every detector over the current record against its history.
    ///
    /// `history` excludes the current record. An empty history is not an
    /// error: the history-dependent detectors simply find nothing and
    /// concentration still runs. Output is grouped by detector in
    /// registration order, each group sorted by theme name.
    pub fn generate(&self, current: &WeeklyRecord, history: &HistorySeries) -> Vec<Insight> {
        let ctx = AnalysisContext::new(current, history, &self.config);
        let mut insights = Vec::new();

        for detector in &self.detectors {
            let findings = detector.detect(&ctx);
            tracing::debug!(
                detector = detector.name(),
                count = findings.len(),
                run = %current.run_id,
                "Detector pass complete"
            );
            insights.extend(findings);
        }

        insights
    }

    /// Names of the registered detectors, in emission order
    pub fn detector_names(&self) -> Vec<&'static str> {
        self.detectors.iter().map(|d| d.name()).collect()
    }
}

/// Confidence as a ratio clamped to [0, 1].
///
/// A non-positive denominator means the threshold itself is zero, so any
/// qualifying observation saturates confidence rather than dividing by
/// zero.
pub(crate) fn ratio_confidence(numerator: f64, denominator: f64) -> f64 {
    if denominator <= 0.0 {
        return 1.0;
    }
    (numerator / denominator).clamp(0.0, 1.0)
}
