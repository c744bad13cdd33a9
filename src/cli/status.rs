//! Status command implementation

use colored::Colorize;

use crate::config::Config;
use crate::error::Result;

/// Run the status command to display configuration status
pub fn run(config_path: Option<&str>) -> Result<()> {
    println!("{}\n", "deepaudit Configuration Status".bold());

    let resolved = match config_path {
        Some(p) => p.to_string(),
        None => Config::default_path()?.display().to_string(),
    };
    println!("Config file: {}", resolved.cyan());

    let config = Config::load(config_path)?;

    if config.has_api_key() {
        println!("{} API key configured", "✓".green());
    } else {
        println!("{} API key not configured", "✗".red());
        println!("  → Run 'deepaudit init' to configure");
    }

    println!();
    println!("Effective limits:");
    println!("  Max code size:     {} bytes", config.limits.max_code_size);
    println!(
        "  Rate limit:        {} requests/minute",
        config.limits.rate_limit_per_minute
    );
    println!("  Cache TTL:         {} ms", config.limits.cache_ttl_ms);
    println!("  Remote timeout:    {} ms", config.limits.timeout_ms);
    println!();

    Ok(())
}
