//! Glean Core Library
//!
//! Shared functionality for the Glean weekly insight reporter:
//! - Record model for weekly market-research snapshots
//! - History series over archived runs
//! - Threshold configuration with file and environment overrides
//! - Insight engine with pluggable detectors (delta, ranking,
//!   concentration, anomaly)
//! - Narrative template library and renderer
//! - Markdown report builder and trend analytics

pub mod config;
pub mod error;
pub mod insights;
pub mod models;
pub mod narrative;
pub mod report;
pub mod templates;
pub mod trends;

pub use config::InsightConfig;
pub use error::{Error, Result};
pub use insights::{
    AnalysisContext, Detector, EvidenceValue, Insight, InsightEngine, InsightType,
};
pub use models::{HistorySeries, RecordRow, ThemeScore, WeeklyRecord};
pub use narrative::{NarrativeRenderer, RenderFailure};
pub use report::render_markdown;
pub use templates::{InsightTemplate, TemplateLibrary};
pub use trends::{build_trend_report, TrendReport};
