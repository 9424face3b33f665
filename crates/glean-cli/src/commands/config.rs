//! Configuration inspection command

use anyhow::Result;
use glean_core::config::{default_config_path, InsightConfig};

pub fn cmd_config() -> Result<()> {
    let config = InsightConfig::load()?;

    println!();
    println!("⚙️  Resolved insight configuration");
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   min_count:               {}", config.min_count);
    println!("   delta_threshold:         {}", config.delta_threshold);
    println!(
        "   concentration_threshold: {}",
        config.concentration_threshold
    );
    println!("   anomaly_multiplier:      {}", config.anomaly_multiplier);
    match &config.template_path {
        Some(path) => println!("   template_path:           {}", path.display()),
        None => println!("   template_path:           (embedded defaults)"),
    }

    if let Some(path) = default_config_path() {
        let status = if path.exists() { "active" } else { "not present" };
        println!();
        println!("   Override file: {} ({})", path.display(), status);
    }
    println!("   Environment overrides: GLEAN_MIN_COUNT, GLEAN_DELTA_THRESHOLD,");
    println!("   GLEAN_CONCENTRATION_THRESHOLD, GLEAN_ANOMALY_MULTIPLIER, GLEAN_TEMPLATE_PATH");

    Ok(())
}
