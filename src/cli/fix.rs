//! Fix command implementation
//!
//! Re-runs validation and the remote call but never the cache: remediation
//! must always work from the engine's fresh answer.

use std::path::Path;

use colored::Colorize;

use crate::audit::Auditor;
use crate::client::GeminiClient;
use crate::config::Config;
use crate::error::Result;
use crate::models::AuditResult;

/// Run the fix command
pub async fn run(
    file: &str,
    report: &str,
    output: Option<&str>,
    config_path: Option<&str>,
) -> Result<()> {
    let config = Config::load(config_path)?;
    let code = std::fs::read_to_string(file)?;
    let file_name = Path::new(file)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| file.to_string());

    let report_json = std::fs::read_to_string(report)?;
    let audit: AuditResult = serde_json::from_str(&report_json)?;

    let oracle = GeminiClient::new(config.api_key.clone(), config.limits.timeout())?;
    let auditor = Auditor::new(oracle, config.limits);

    let fixed = auditor.fix(&code, &file_name, &audit.findings).await?;

    match output {
        Some(path) => {
            std::fs::write(path, &fixed)?;
            eprintln!("{} Remediated code written to {}", "✓".green(), path);
        }
        None => println!("{fixed}"),
    }

    Ok(())
}
