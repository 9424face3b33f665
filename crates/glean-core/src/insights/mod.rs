//! Insight engine - automated findings over weekly research runs
//!
//! The engine compares the current week's record against its history and
//! emits typed, evidence-backed insights according to configured
//! thresholds. Detectors run in a fixed order so output is reproducible:
//!
//! - **Delta** - week-over-week score changes above a threshold
//! - **Rising/Falling ranking** - the single biggest gainer and loser
//! - **Concentration** - one theme dominating the week's total score
//! - **Anomaly** - scores outside a theme's historical volatility
//!
//! ## Usage
//!
//! ```rust,ignore
//! use glean_core::config::InsightConfig;
//! use glean_core::insights::InsightEngine;
//!
//! let engine = InsightEngine::new(InsightConfig::default())?;
//! let insights = engine.generate(&current, &history);
//! ```

pub mod anomaly;
pub mod concentration;
pub mod delta;
pub mod engine;
pub mod ranking;
pub mod types;

pub use anomaly::AnomalyDetector;
pub use concentration::ConcentrationDetector;
pub use delta::DeltaDetector;
pub use engine::{AnalysisContext, Detector, InsightEngine};
pub use ranking::RankingDetector;
pub use types::{EvidenceValue, Insight, InsightType};
