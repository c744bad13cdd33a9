//! Init command implementation

use colored::Colorize;
use dialoguer::{Password, theme::ColorfulTheme};

use crate::config::Config;
use crate::error::Result;

/// Run the init command
pub async fn run(config_path: Option<&str>) -> Result<()> {
    println!("{}", "Welcome to deepaudit!".bold().green());
    println!("Let's set up your audit engine credentials.\n");

    let api_key: String = Password::with_theme(&ColorfulTheme::default())
        .with_prompt("Enter your Gemini API key")
        .interact()?;

    let mut config = Config::load(config_path).unwrap_or_default();
    config.api_key = Some(api_key);

    match config_path {
        Some(path) => config.save_to(path.into())?,
        None => config.save()?,
    }

    let saved_at = match config_path {
        Some(path) => path.to_string(),
        None => Config::default_path()?.display().to_string(),
    };
    println!("\n{} Configuration saved to: {}", "✓".green(), saved_at);

    println!("\n{}", "You're all set! Try running:".bold());
    println!("  {} - Audit a source file", "deepaudit scan <FILE>".cyan());
    println!("  {} - Show configuration status", "deepaudit status".cyan());

    Ok(())
}
