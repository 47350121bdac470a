// src/main.rs

use std::process::ExitCode;

use clap::Parser;
use tracing::warn;
use tracing_subscriber::EnvFilter;

mod ai;
mod auth;
mod cli;
mod settings;
mod sheets;

use cli::Cli;
use settings::io::load_settings_from_file;
use settings::AppSettings;

const DEFAULT_LOG_FILTER: &str = "info,hyper=warn,reqwest=warn,rustls=warn";

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env is normal.
    let _ = dotenvy::dotenv();
    init_logging();

    let cli = Cli::parse();
    let settings = match load_settings_from_file::<AppSettings>() {
        Ok(s) => s,
        Err(e) => {
            warn!("Falling back to default settings: {}", e);
            AppSettings::default()
        }
    }
    .with_env_overrides();

    match cli::run(cli.command, settings).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
