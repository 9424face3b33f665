//! Core types for the insight engine

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Types of insights that can be generated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightType {
    /// Week-over-week score change above the delta threshold
    Delta,
    /// The single largest positive delta this week
    RisingTheme,
    /// The single largest negative delta this week
    FallingTheme,
    /// One theme holding an outsized share of the week's total score
    Concentration,
    /// Score deviating from the historical mean beyond expected volatility
    Anomaly,
}

impl InsightType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InsightType::Delta => "delta",
            InsightType::RisingTheme => "rising_theme",
            InsightType::FallingTheme => "falling_theme",
            InsightType::Concentration => "concentration",
            InsightType::Anomaly => "anomaly",
        }
    }

    /// All insight types, in detector emission order
    pub fn all() -> &'static [InsightType] {
        &[
            InsightType::Delta,
            InsightType::RisingTheme,
            InsightType::FallingTheme,
            InsightType::Concentration,
            InsightType::Anomaly,
        ]
    }
}

impl fmt::Display for InsightType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for InsightType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "delta" => Ok(InsightType::Delta),
            "rising_theme" => Ok(InsightType::RisingTheme),
            "falling_theme" => Ok(InsightType::FallingTheme),
            "concentration" => Ok(InsightType::Concentration),
            "anomaly" => Ok(InsightType::Anomaly),
            _ => Err(format!("Unknown insight type: {}", s)),
        }
    }
}

/// A single evidence metric: numeric or textual
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EvidenceValue {
    Number(f64),
    Text(String),
}

impl EvidenceValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            EvidenceValue::Number(n) => Some(*n),
            EvidenceValue::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            EvidenceValue::Number(_) => None,
            EvidenceValue::Text(s) => Some(s),
        }
    }
}

impl fmt::Display for EvidenceValue {
    /// Whole numbers render without a decimal point, everything else
    /// with two decimals, so narratives stay readable and deterministic.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvidenceValue::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e12 {
                    write!(f, "{:.0}", n)
                } else {
                    write!(f, "{:.2}", n)
                }
            }
            EvidenceValue::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<f64> for EvidenceValue {
    fn from(n: f64) -> Self {
        EvidenceValue::Number(n)
    }
}

impl From<u32> for EvidenceValue {
    fn from(n: u32) -> Self {
        EvidenceValue::Number(f64::from(n))
    }
}

impl From<usize> for EvidenceValue {
    fn from(n: usize) -> Self {
        EvidenceValue::Number(n as f64)
    }
}

impl From<&str> for EvidenceValue {
    fn from(s: &str) -> Self {
        EvidenceValue::Text(s.to_string())
    }
}

impl From<String> for EvidenceValue {
    fn from(s: String) -> Self {
        EvidenceValue::Text(s)
    }
}

/// An evidence-backed finding produced by one detector
///
/// `title` and `narrative` are `None` until the narrative renderer fills
/// them; a rendering failure leaves them `None` without invalidating the
/// insight itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    /// Which detector produced this finding
    #[serde(rename = "type")]
    pub insight_type: InsightType,
    /// Rendered headline, if narrative rendering succeeded
    pub title: Option<String>,
    /// Rendered narrative text, if narrative rendering succeeded
    pub narrative: Option<String>,
    /// Named metrics supporting the finding
    pub evidence: BTreeMap<String, EvidenceValue>,
    /// How strongly the evidence supports the finding, in [0, 1]
    pub confidence: f64,
}

impl Insight {
    /// Create an insight with confidence clamped to [0, 1]
    pub fn new(insight_type: InsightType, confidence: f64) -> Self {
        Self {
            insight_type,
            title: None,
            narrative: None,
            evidence: BTreeMap::new(),
            confidence: confidence.clamp(0.0, 1.0),
        }
    }

    /// Attach one evidence metric
    pub fn with_evidence(mut self, key: impl Into<String>, value: impl Into<EvidenceValue>) -> Self {
        self.evidence.insert(key.into(), value.into());
        self
    }

    /// The theme this insight is about, when evidence carries one
    pub fn theme(&self) -> Option<&str> {
        self.evidence.get("theme").and_then(EvidenceValue::as_text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insight_type_round_trip() {
        for &t in InsightType::all() {
            assert_eq!(InsightType::from_str(t.as_str()).unwrap(), t);
        }
        assert!(InsightType::from_str("emergence").is_err());
    }

    #[test]
    fn test_evidence_value_display() {
        assert_eq!(EvidenceValue::Number(3.0).to_string(), "3");
        assert_eq!(EvidenceValue::Number(3.4).to_string(), "3.40");
        assert_eq!(EvidenceValue::Number(-2.5).to_string(), "-2.50");
        assert_eq!(EvidenceValue::Text("AI agents".into()).to_string(), "AI agents");
    }

    #[test]
    fn test_insight_builder_clamps_confidence() {
        let insight = Insight::new(InsightType::Delta, 1.7)
            .with_evidence("theme", "AI agents")
            .with_evidence("delta", 3.4);

        assert_eq!(insight.confidence, 1.0);
        assert_eq!(insight.theme(), Some("AI agents"));
        assert_eq!(
            insight.evidence.get("delta"),
            Some(&EvidenceValue::Number(3.4))
        );
    }

    #[test]
    fn test_insight_serializes_type_as_string() {
        let insight = Insight::new(InsightType::RisingTheme, 0.5);
        let json = serde_json::to_value(&insight).unwrap();
        assert_eq!(json["type"], "rising_theme");
        assert!(json["narrative"].is_null());
    }
}
