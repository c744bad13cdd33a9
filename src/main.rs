//! deepaudit CLI - companion for the SecureCode AI deep audit engine

use clap::Parser;

mod audit;
mod cache;
mod cli;
mod client;
mod config;
mod error;
mod limiter;
mod models;
mod normalize;
mod output;
mod validate;

use cli::{Cli, Commands};
use error::{Error, Result};

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        match &err {
            Error::Audit(audit_err) => {
                eprintln!("Error [{}]: {}", audit_err.code(), audit_err);
                if audit_err.is_transient() {
                    eprintln!("This looks transient; retrying may succeed.");
                }
            }
            other => eprintln!("Error: {}", other),
        }
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();

    match cli.command {
        Commands::Init => cli::init::run(cli.config.as_deref()).await,
        Commands::Status => cli::status::run(cli.config.as_deref()),
        Commands::Version => {
            println!("deepaudit version {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::Scan { file, client_id } => {
            cli::scan::run(
                &file,
                client_id,
                cli.no_cache,
                cli.format,
                cli.config.as_deref(),
            )
            .await
        }
        Commands::Fix {
            file,
            report,
            output,
        } => cli::fix::run(&file, &report, output.as_deref(), cli.config.as_deref()).await,
    }
}
