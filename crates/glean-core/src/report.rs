//! Markdown report builder
//!
//! Formats a run's insights as a plain Markdown document. Pure string
//! assembly; where the report lands is the caller's concern.

use crate::insights::Insight;
use crate::models::WeeklyRecord;

/// Render the insight report for one run as Markdown.
///
/// Insights without a rendered narrative (a template failed for them)
/// still appear with their type, confidence, and evidence table.
pub fn render_markdown(record: &WeeklyRecord, insights: &[Insight]) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push(format!("# Automated Insights - {}", record.run_id));
    lines.push(String::new());
    lines.push(format!(
        "Generated UTC: {}",
        record.generated_at.format("%Y-%m-%dT%H:%M:%SZ")
    ));
    lines.push(String::new());

    if insights.is_empty() {
        lines.push("No automated insights met thresholds for this run.".to_string());
        lines.push(String::new());
        return finish(lines);
    }

    lines.push("## Top Automated Insights".to_string());
    lines.push(String::new());

    for (index, insight) in insights.iter().enumerate() {
        let number = index + 1;
        let title = insight
            .title
            .clone()
            .unwrap_or_else(|| format!("Insight {}", number));

        lines.push(format!("### {}. {}", number, title));
        lines.push(String::new());
        lines.push(format!("- **Type:** {}", insight.insight_type));
        lines.push(format!("- **Confidence:** {:.2}", insight.confidence));
        lines.push(String::new());

        if let Some(narrative) = &insight.narrative {
            lines.push(narrative.clone());
            lines.push(String::new());
        }

        lines.push("#### Evidence".to_string());
        lines.push(String::new());
        lines.push("| Metric | Value |".to_string());
        lines.push("| --- | --- |".to_string());
        for (key, value) in &insight.evidence {
            lines.push(format!("| {} | {} |", metric_label(key), value));
        }
        lines.push(String::new());
    }

    finish(lines)
}

/// "std_dev" -> "Std Dev"
fn metric_label(key: &str) -> String {
    key.split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn finish(lines: Vec<String>) -> String {
    let mut text = lines.join("\n");
    while text.ends_with('\n') {
        text.pop();
    }
    text.push('\n');
    text
}
