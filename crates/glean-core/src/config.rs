//! Threshold configuration for the insight engine
//!
//! Config is resolved once per run, before the engine is constructed,
//! with a three-layer resolution:
//! 1. Embedded defaults (compiled into the binary)
//! 2. Override file in the data dir (~/.local/share/glean/config/insights.toml)
//! 3. GLEAN_* environment variables
//!
//! The engine receives the resolved value by value and never looks up
//! settings mid-run.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use serde::Deserialize;

use crate::error::{Error, Result};

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/insights.toml");

/// Immutable per-run thresholds for the insight engine
#[derive(Debug, Clone, PartialEq)]
pub struct InsightConfig {
    /// Minimum item count a theme needs this week before any detector
    /// reports it (also the minimum historical sample count for the
    /// anomaly detector). Must be >= 1.
    pub min_count: u32,
    /// Minimum absolute week-over-week score change for a delta insight.
    /// Must be finite and >= 0.
    pub delta_threshold: f64,
    /// Minimum share of the week's total score for a concentration
    /// insight. Must be in (0, 1].
    pub concentration_threshold: f64,
    /// Multiple of the historical standard deviation a score must deviate
    /// by to count as anomalous. Must be finite and > 1.
    pub anomaly_multiplier: f64,
    /// Optional narrative template override file
    pub template_path: Option<PathBuf>,
}

impl Default for InsightConfig {
    fn default() -> Self {
        Self {
            min_count: 3,
            delta_threshold: 2.0,
            concentration_threshold: 0.6,
            anomaly_multiplier: 2.0,
            template_path: None,
        }
    }
}

/// On-disk representation: every field optional so override files may
/// set only what they change
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    insights: ConfigValues,
}

#[derive(Debug, Default, Deserialize)]
struct ConfigValues {
    min_count: Option<u32>,
    delta_threshold: Option<f64>,
    concentration_threshold: Option<f64>,
    anomaly_multiplier: Option<f64>,
    template_path: Option<PathBuf>,
}

impl InsightConfig {
    /// Resolve configuration: embedded defaults, then the data-dir
    /// override file (if present), then environment variables.
    pub fn load() -> Result<Self> {
        let mut config = Self::from_embedded()?;

        if let Some(path) = default_config_path() {
            if path.exists() {
                let content = fs::read_to_string(&path)?;
                config.apply_file(&content)?;
                tracing::debug!(path = %path.display(), "Applied config override file");
            }
        }

        config.apply_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Parse the embedded default config
    pub fn from_embedded() -> Result<Self> {
        let mut config = Self::default();
        config.apply_file(DEFAULT_CONFIG)?;
        Ok(config)
    }

    /// Layer values from a TOML config document over this config
    pub fn apply_file(&mut self, content: &str) -> Result<()> {
        let file: ConfigFile = toml::from_str(content)?;
        let values = file.insights;

        if let Some(v) = values.min_count {
            self.min_count = v;
        }
        if let Some(v) = values.delta_threshold {
            self.delta_threshold = v;
        }
        if let Some(v) = values.concentration_threshold {
            self.concentration_threshold = v;
        }
        if let Some(v) = values.anomaly_multiplier {
            self.anomaly_multiplier = v;
        }
        if let Some(v) = values.template_path {
            self.template_path = Some(v);
        }
        Ok(())
    }

    /// Layer GLEAN_* environment variables over this config
    pub fn apply_env(&mut self) -> Result<()> {
        let vars: HashMap<String, String> = std::env::vars().collect();
        self.apply_env_from(|name| vars.get(name).cloned())
    }

    /// Layer named settings from an arbitrary lookup (tested without
    /// touching process environment)
    pub fn apply_env_from<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup("GLEAN_MIN_COUNT") {
            self.min_count = parse_setting("GLEAN_MIN_COUNT", &raw)?;
        }
        if let Some(raw) = lookup("GLEAN_DELTA_THRESHOLD") {
            self.delta_threshold = parse_setting("GLEAN_DELTA_THRESHOLD", &raw)?;
        }
        if let Some(raw) = lookup("GLEAN_CONCENTRATION_THRESHOLD") {
            self.concentration_threshold = parse_setting("GLEAN_CONCENTRATION_THRESHOLD", &raw)?;
        }
        if let Some(raw) = lookup("GLEAN_ANOMALY_MULTIPLIER") {
            self.anomaly_multiplier = parse_setting("GLEAN_ANOMALY_MULTIPLIER", &raw)?;
        }
        if let Some(raw) = lookup("GLEAN_TEMPLATE_PATH") {
            let trimmed = raw.trim();
            if !trimmed.is_empty() {
                self.template_path = Some(PathBuf::from(trimmed));
            }
        }
        Ok(())
    }

    /// Check every threshold against its stated domain.
    ///
    /// Wrong thresholds silently producing wrong insights is worse than
    /// aborting the run, so this is checked before any detector executes.
    pub fn validate(&self) -> Result<()> {
        if self.min_count < 1 {
            return Err(Error::InvalidConfiguration(format!(
                "min_count must be >= 1, got {}",
                self.min_count
            )));
        }
        if !self.delta_threshold.is_finite() || self.delta_threshold < 0.0 {
            return Err(Error::InvalidConfiguration(format!(
                "delta_threshold must be a finite number >= 0, got {}",
                self.delta_threshold
            )));
        }
        if !self.concentration_threshold.is_finite()
            || self.concentration_threshold <= 0.0
            || self.concentration_threshold > 1.0
        {
            return Err(Error::InvalidConfiguration(format!(
                "concentration_threshold must be in (0, 1], got {}",
                self.concentration_threshold
            )));
        }
        if !self.anomaly_multiplier.is_finite() || self.anomaly_multiplier <= 1.0 {
            return Err(Error::InvalidConfiguration(format!(
                "anomaly_multiplier must be > 1, got {}",
                self.anomaly_multiplier
            )));
        }
        Ok(())
    }
}

fn parse_setting<T: std::str::FromStr>(name: &str, raw: &str) -> Result<T> {
    raw.trim().parse().map_err(|_| {
        Error::InvalidConfiguration(format!("{} has unparseable value '{}'", name, raw))
    })
}

/// Default config override path in the platform data dir
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("glean").join("config").join("insights.toml"))
}
