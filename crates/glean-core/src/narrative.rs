//! Narrative renderer
//!
//! Fills an insight's title and narrative from its type's templates,
//! substituting every `{{placeholder}}` with the matching evidence
//! value. Rendering failures are isolated per insight: one bad template
//! never invalidates the rest of the report, and no insight is dropped.
//!
//! Output is plain text with no markup escaping; the caller owns the
//! target format.

use regex::Regex;

use crate::error::{Error, Result};
use crate::insights::{Insight, InsightType};
use crate::templates::TemplateLibrary;

const PLACEHOLDER_PATTERN: &str = r"\{\{\s*([A-Za-z0-9_]+)\s*\}\}";

/// A rendering failure for one insight, surfaced alongside the partial
/// results rather than aborting them
#[derive(Debug)]
pub struct RenderFailure {
    /// Index into the insight slice passed to `render_all`
    pub index: usize,
    pub insight_type: InsightType,
    pub error: Error,
}

pub struct NarrativeRenderer {
    library: TemplateLibrary,
    placeholder: Regex,
}

impl NarrativeRenderer {
    pub fn new(library: TemplateLibrary) -> Self {
        Self {
            library,
            placeholder: Regex::new(PLACEHOLDER_PATTERN).expect("placeholder pattern is valid"),
        }
    }

    /// Render one insight's title and narrative.
    ///
    /// Fails with `MissingTemplate` when the type has no template and
    /// `MissingEvidenceKey` when a referenced placeholder is absent from
    /// the insight's evidence.
    pub fn render(&self, insight: &Insight) -> Result<(String, String)> {
        let template = self.library.get(insight.insight_type)?;
        let title = self.substitute(&template.title, insight)?;
        let narrative = self.substitute(&template.narrative, insight)?;
        Ok((title, narrative))
    }

    /// Render every insight in place, returning the per-insight
    /// failures. Insights that fail keep `None` title/narrative but stay
    /// in the slice.
    pub fn render_all(&self, insights: &mut [Insight]) -> Vec<RenderFailure> {
        let mut failures = Vec::new();

        for (index, insight) in insights.iter_mut().enumerate() {
            match self.render(insight) {
                Ok((title, narrative)) => {
                    insight.title = Some(title);
                    insight.narrative = Some(narrative);
                }
                Err(error) => {
                    failures.push(RenderFailure {
                        index,
                        insight_type: insight.insight_type,
                        error,
                    });
                }
            }
        }

        failures
    }

    fn substitute(&self, template: &str, insight: &Insight) -> Result<String> {
        let mut output = String::with_capacity(template.len());
        let mut cursor = 0;

        for captures in self.placeholder.captures_iter(template) {
            let whole = captures.get(0).expect("capture 0 always present");
            let key = &captures[1];

            let value = insight.evidence.get(key).ok_or_else(|| {
                Error::MissingEvidenceKey {
                    insight_type: insight.insight_type.as_str().to_string(),
                    key: key.to_string(),
                }
            })?;

            output.push_str(&template[cursor..whole.start()]);
            output.push_str(&value.to_string());
            cursor = whole.end();
        }
        output.push_str(&template[cursor..]);

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::insights::InsightType;

    fn renderer_from(yaml: &str) -> NarrativeRenderer {
        NarrativeRenderer::new(TemplateLibrary::from_yaml_str(yaml).unwrap())
    }

    fn delta_insight() -> Insight {
        Insight::new(InsightType::Delta, 0.85)
            .with_evidence("theme", "AI agents")
            .with_evidence("previous", 5.0)
            .with_evidence("current", 8.4)
            .with_evidence("delta", 3.4)
            .with_evidence("previous_run", "20260630")
    }

    #[test]
    fn test_render_substitutes_evidence() {
        let renderer = NarrativeRenderer::new(TemplateLibrary::embedded().unwrap());
        let (title, narrative) = renderer.render(&delta_insight()).unwrap();

        assert_eq!(title, "Week-over-week shift in AI agents");
        assert_eq!(
            narrative,
            "AI agents moved from 5 to 8.40 (3.40 week-over-week) since run 20260630."
        );
    }

    #[test]
    fn test_missing_template() {
        let renderer = renderer_from("anomaly:\n  title: \"t\"\n  narrative: \"n\"");
        let err = renderer.render(&delta_insight()).unwrap_err();
        assert!(matches!(err, Error::MissingTemplate(_)));
    }

    #[test]
    fn test_missing_evidence_key() {
        let renderer =
            renderer_from("delta:\n  title: \"{{theme}}\"\n  narrative: \"{{nonexistent}}\"");
        let err = renderer.render(&delta_insight()).unwrap_err();
        assert!(
            matches!(err, Error::MissingEvidenceKey { key, .. } if key == "nonexistent")
        );
    }

    #[test]
    fn test_render_all_isolates_failures() {
        let renderer = renderer_from(
            "delta:\n  title: \"{{theme}}\"\n  narrative: \"{{theme}} moved {{delta}}\"",
        );

        let mut insights = vec![
            delta_insight(),
            // No template registered for concentration in this library
            Insight::new(InsightType::Concentration, 0.65).with_evidence("theme", "Fintech"),
            delta_insight(),
        ];

        let failures = renderer.render_all(&mut insights);

        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].index, 1);
        assert_eq!(failures[0].insight_type, InsightType::Concentration);

        // Nothing dropped; only the failed one lacks a narrative
        assert_eq!(insights.len(), 3);
        assert!(insights[0].narrative.is_some());
        assert!(insights[1].narrative.is_none());
        assert!(insights[2].narrative.is_some());
    }

    #[test]
    fn test_placeholder_whitespace_tolerated() {
        let renderer =
            renderer_from("delta:\n  title: \"{{ theme }}\"\n  narrative: \"n\"");
        let (title, _) = renderer.render(&delta_insight()).unwrap();
        assert_eq!(title, "AI agents");
    }
}
