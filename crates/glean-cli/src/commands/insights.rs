//! Insight generation command

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use glean_core::config::InsightConfig;
use glean_core::insights::InsightEngine;
use glean_core::narrative::NarrativeRenderer;
use glean_core::report::render_markdown;
use glean_core::templates::TemplateLibrary;

use super::truncate;
use crate::history::load_history;

pub fn cmd_insights(
    records_dir: &Path,
    current_run: Option<&str>,
    output: Option<&Path>,
    markdown: Option<&Path>,
) -> Result<()> {
    let series = load_history(records_dir)?;
    let total_records = series.len();

    let (current, history) = match current_run {
        Some(run_id) => {
            let Some(split) = series.split_at_run(run_id) else {
                bail!("Run '{}' not found in {}", run_id, records_dir.display());
            };
            split
        }
        None => {
            let Some(split) = series.split_latest() else {
                bail!("No archived records found in {}", records_dir.display());
            };
            split
        }
    };

    let discarded = total_records - history.len() - 1;
    if discarded > 0 {
        tracing::info!(
            discarded,
            run = %current.run_id,
            "Ignoring records newer than the analyzed run"
        );
    }

    let config = InsightConfig::load()?;
    let engine = InsightEngine::new(config.clone())?;
    let mut insights = engine.generate(&current, &history);

    let library = TemplateLibrary::load(config.template_path.as_deref())?;
    let renderer = NarrativeRenderer::new(library);
    for failure in renderer.render_all(&mut insights) {
        tracing::warn!(
            insight = failure.insight_type.as_str(),
            index = failure.index,
            error = %failure.error,
            "Narrative rendering failed; insight emitted without narrative"
        );
    }

    let output_path = output.map(|p| p.to_path_buf()).unwrap_or_else(|| {
        records_dir.join(format!("insights-{}.json", current.run_id))
    });
    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent)?;
    }
    let payload = serde_json::json!({
        "run_id": current.run_id,
        "generated_at": current.generated_at,
        "insights": insights,
    });
    fs::write(&output_path, serde_json::to_string_pretty(&payload)?)
        .with_context(|| format!("Failed to write {}", output_path.display()))?;

    if let Some(markdown_path) = markdown {
        if let Some(parent) = markdown_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(markdown_path, render_markdown(&current, &insights))
            .with_context(|| format!("Failed to write {}", markdown_path.display()))?;
    }

    println!();
    println!("💡 Insights for run {}", current.run_id);
    println!(
        "   History: {} prior run{}",
        history.len(),
        if history.len() == 1 { "" } else { "s" }
    );
    println!("   ─────────────────────────────────────────────────────────────");

    if insights.is_empty() {
        println!("   No insights met thresholds for this run.");
    } else {
        println!(
            "   {:13} │ {:>4} │ {}",
            "Type", "Conf", "Narrative"
        );
        for insight in &insights {
            let narrative = insight
                .narrative
                .as_deref()
                .unwrap_or("(narrative unavailable)");
            println!(
                "   {:13} │ {:.2} │ {}",
                insight.insight_type.as_str(),
                insight.confidence,
                truncate(narrative, 60)
            );
        }
    }
    println!();
    println!("   Wrote {}", output_path.display());
    if let Some(markdown_path) = markdown {
        println!("   Wrote {}", markdown_path.display());
    }

    Ok(())
}
