//! Narrative template inspection commands

use std::str::FromStr;

use anyhow::{bail, Result};
use glean_core::config::InsightConfig;
use glean_core::insights::InsightType;
use glean_core::templates::TemplateLibrary;

pub fn cmd_templates(insight_type: Option<&str>) -> Result<()> {
    let config = InsightConfig::load()?;
    let library = TemplateLibrary::load(config.template_path.as_deref())?;

    match insight_type {
        Some(name) => {
            let Ok(insight_type) = InsightType::from_str(name) else {
                bail!(
                    "Unknown insight type '{}'. Available: {}",
                    name,
                    InsightType::all()
                        .iter()
                        .map(|t| t.as_str())
                        .collect::<Vec<_>>()
                        .join(", ")
                );
            };
            let template = library.get(insight_type)?;

            println!();
            println!("📝 {}", insight_type);
            if library.is_overridden(insight_type) {
                println!("   (from override file)");
            }
            println!("   Title:     {}", template.title);
            println!("   Narrative: {}", template.narrative);
        }
        None => {
            println!();
            println!("📝 Narrative templates");
            println!("   ─────────────────────────────────────────────────────────────");
            for insight_type in library.types() {
                let template = library.get(insight_type)?;
                let marker = if library.is_overridden(insight_type) {
                    " (override)"
                } else {
                    ""
                };
                println!("   {:13} {}{}", insight_type.as_str(), template.title, marker);
            }
        }
    }

    Ok(())
}
