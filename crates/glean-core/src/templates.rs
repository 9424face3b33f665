//! Narrative template library
//!
//! Templates are loaded with a two-layer resolution:
//! 1. Embedded defaults (compiled into the binary)
//! 2. Optional override file (the config's template path)
//!
//! This lets operators re-word narratives without modifying the source,
//! while automatically getting new default templates on upgrade. Types
//! missing from an override file fall back to the embedded defaults.
//!
//! Template files are YAML mapping insight type names to a title and a
//! narrative, both with `{{placeholder}}` variables filled from the
//! insight's evidence at render time.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::insights::InsightType;

/// Embedded default templates (compiled into binary)
const DEFAULT_TEMPLATES: &str = include_str!("../../../templates/insights.yml");

/// Title and narrative templates for one insight type
#[derive(Debug, Clone, Deserialize)]
pub struct InsightTemplate {
    pub title: String,
    pub narrative: String,
}

/// Typed mapping from insight type to its templates
pub struct TemplateLibrary {
    templates: HashMap<InsightType, InsightTemplate>,
    overridden: Vec<InsightType>,
}

impl TemplateLibrary {
    /// Load the embedded default templates
    pub fn embedded() -> Result<Self> {
        let templates = parse_templates(DEFAULT_TEMPLATES, true)?;
        Ok(Self {
            templates,
            overridden: Vec::new(),
        })
    }

    /// Load defaults, then merge an override file if one is given
    pub fn load(override_path: Option<&Path>) -> Result<Self> {
        let mut library = Self::embedded()?;
        if let Some(path) = override_path {
            let content = fs::read_to_string(path)?;
            library.merge_overrides(&content)?;
            tracing::debug!(path = %path.display(), "Applied template override file");
        }
        Ok(library)
    }

    /// Build a library from a YAML document alone (no embedded defaults).
    ///
    /// The template source contract is keyed lookup plus placeholder
    /// substitution; callers holding templates from elsewhere can enter
    /// through here.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let templates = parse_templates(content, true)?;
        Ok(Self {
            templates,
            overridden: Vec::new(),
        })
    }

    /// Merge templates from a YAML override document over this library
    pub fn merge_overrides(&mut self, content: &str) -> Result<()> {
        for (insight_type, template) in parse_templates(content, false)? {
            self.templates.insert(insight_type, template);
            if !self.overridden.contains(&insight_type) {
                self.overridden.push(insight_type);
            }
        }
        Ok(())
    }

    /// Template for an insight type; `MissingTemplate` when none is
    /// registered
    pub fn get(&self, insight_type: InsightType) -> Result<&InsightTemplate> {
        self.templates
            .get(&insight_type)
            .ok_or_else(|| Error::MissingTemplate(insight_type.as_str().to_string()))
    }

    /// Whether this type's template came from an override file
    pub fn is_overridden(&self, insight_type: InsightType) -> bool {
        self.overridden.contains(&insight_type)
    }

    /// Registered insight types, in detector emission order
    pub fn types(&self) -> Vec<InsightType> {
        InsightType::all()
            .iter()
            .copied()
            .filter(|t| self.templates.contains_key(t))
            .collect()
    }
}

/// Parse a YAML template document into a typed map.
///
/// Unknown type names are rejected in strict mode (embedded defaults
/// must be coherent) and skipped with a warning otherwise, so an
/// override file written for a newer version degrades gracefully.
fn parse_templates(content: &str, strict: bool) -> Result<HashMap<InsightType, InsightTemplate>> {
    let raw: HashMap<String, InsightTemplate> = serde_yaml::from_str(content)?;

    let mut templates = HashMap::new();
    for (name, template) in raw {
        match InsightType::from_str(&name) {
            Ok(insight_type) => {
                templates.insert(insight_type, template);
            }
            Err(_) if strict => {
                return Err(Error::InvalidData(format!(
                    "template file defines unknown insight type '{}'",
                    name
                )));
            }
            Err(_) => {
                tracing::warn!(insight_type = name, "Skipping unknown template type");
            }
        }
    }
    Ok(templates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_embedded_covers_every_type() {
        let library = TemplateLibrary::embedded().unwrap();
        for &t in InsightType::all() {
            let template = library.get(t).unwrap();
            assert!(!template.title.is_empty());
            assert!(!template.narrative.is_empty());
            assert!(!library.is_overridden(t));
        }
    }

    #[test]
    fn test_override_file_wins_and_partial_falls_back() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "delta:\n  title: \"Custom delta for {{{{theme}}}}\"\n  narrative: \"Moved by {{{{delta}}}}\""
        )
        .unwrap();

        let library = TemplateLibrary::load(Some(file.path())).unwrap();
        assert!(library.get(InsightType::Delta).unwrap().title.starts_with("Custom"));
        assert!(library.is_overridden(InsightType::Delta));

        // Types absent from the override keep their defaults
        assert!(!library.is_overridden(InsightType::Anomaly));
        assert!(library.get(InsightType::Anomaly).is_ok());
    }

    #[test]
    fn test_override_skips_unknown_types() {
        let mut library = TemplateLibrary::embedded().unwrap();
        library
            .merge_overrides("emergence:\n  title: \"old\"\n  narrative: \"old\"")
            .unwrap();
        assert_eq!(library.types().len(), InsightType::all().len());
    }

    #[test]
    fn test_missing_template_error() {
        let library = TemplateLibrary::from_yaml_str(
            "delta:\n  title: \"t\"\n  narrative: \"n\"",
        )
        .unwrap();
        let err = library.get(InsightType::Anomaly).unwrap_err();
        assert!(matches!(err, Error::MissingTemplate(name) if name == "anomaly"));
    }
}
