//! CLI command definitions and handlers

use clap::{Parser, Subcommand};

pub mod fix;
pub mod init;
pub mod scan;
pub mod status;

/// Output format options
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Pretty format - human-optimized rich report
    #[default]
    Pretty,
    /// Table format - one row per finding
    Table,
    /// JSON format - a full report document, reusable via `fix --report`
    Json,
}

/// deepaudit - CLI companion for the SecureCode AI deep audit engine
#[derive(Parser, Debug)]
#[command(name = "deepaudit")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (pretty, table, json)
    #[arg(
        long,
        global = true,
        env = "DEEPAUDIT_FORMAT",
        default_value = "pretty",
        hide_env = true,
        hide_possible_values = true
    )]
    pub format: OutputFormat,

    /// Override config file location
    #[arg(long, global = true, env = "DEEPAUDIT_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true, env = "DEEPAUDIT_DEBUG", hide_env = true)]
    pub debug: bool,

    /// Bypass the result cache, always call the audit engine
    #[arg(long, global = true, env = "DEEPAUDIT_NO_CACHE", hide_env = true)]
    pub no_cache: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize deepaudit configuration
    Init,

    /// Show configuration status and effective limits
    Status,

    /// Display version information
    Version,

    /// Run a security audit on a source file
    Scan {
        /// File to audit
        file: String,

        /// Client identity for rate limiting
        #[arg(long, env = "DEEPAUDIT_CLIENT_ID", hide_env = true)]
        client_id: Option<String>,
    },

    /// Generate remediated source from a previous audit report
    Fix {
        /// File to remediate
        file: String,

        /// Audit report JSON produced by `scan --format json`
        #[arg(long)]
        report: String,

        /// Write remediated code here instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },
}
