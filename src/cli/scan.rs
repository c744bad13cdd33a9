//! Scan command implementation

use std::path::Path;

use crate::audit::{Auditor, ScanOptions};
use crate::cli::OutputFormat;
use crate::client::GeminiClient;
use crate::config::Config;
use crate::error::Result;
use crate::output;

/// Run the scan command
pub async fn run(
    file: &str,
    client_id: Option<String>,
    no_cache: bool,
    format: OutputFormat,
    config_path: Option<&str>,
) -> Result<()> {
    let config = Config::load(config_path)?;
    let code = std::fs::read_to_string(file)?;
    let file_name = Path::new(file)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| file.to_string());

    let oracle = GeminiClient::new(config.api_key.clone(), config.limits.timeout())?;
    let auditor = Auditor::new(oracle, config.limits);

    let options = ScanOptions {
        client_id,
        skip_cache: no_cache,
    };
    let result = auditor.scan(&code, &file_name, &options).await?;
    log::debug!("Pipeline stats after scan: {:?}", auditor.stats());

    output::print(&result, format)
}
