use crate::config::{ReportConfig, ScheduleConfig, ServerConfig, TelegramConfig};
use crate::delivery::TelegramClient;
use crate::pipeline::{ProfileOutcome, ReportRunner};
use clap::{Parser, Subcommand};
use std::net::IpAddr;
use std::path::PathBuf;

mod config;
mod delivery;
mod domain;
mod errors;
mod listings;
mod pipeline;
mod report;
mod scheduler;
mod server;

#[cfg(test)]
mod tests;

/// Daily real estate digest from vault notes to Telegram.
#[derive(Parser)]
#[command(name = "estate-report", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Send one report pass for every profile and exit
    Run,
    /// Send a pass now, then every day at the configured time
    Schedule,
    /// Serve static files and the config key endpoint
    Serve {
        #[arg(long)]
        host: Option<IpAddr>,
        #[arg(long)]
        port: Option<u16>,
        /// Directory to serve (defaults to SERVER_ROOT or the working directory)
        #[arg(long)]
        root: Option<PathBuf>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "estate_report=info".into()),
        )
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Command::Run => run_once(),
        Command::Schedule => schedule(),
        Command::Serve { host, port, root } => serve(host, port, root),
    };

    if let Err(e) = result {
        tracing::error!("❌ {e}");
        std::process::exit(1);
    }
}

fn run_once() -> Result<(), Box<dyn std::error::Error>> {
    let report = ReportConfig::from_env()?;
    let telegram = TelegramConfig::from_env()?;
    send_daily_report(&report, &telegram)?;
    Ok(())
}

fn schedule() -> Result<(), Box<dyn std::error::Error>> {
    let report = ReportConfig::from_env()?;
    let telegram = TelegramConfig::from_env()?;
    let schedule = ScheduleConfig::from_env()?;

    scheduler::run_forever(&schedule, || {
        if let Err(e) = send_daily_report(&report, &telegram) {
            tracing::error!("Report failed: {e}");
        }
    })
}

fn serve(
    host: Option<IpAddr>,
    port: Option<u16>,
    root: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = ServerConfig::from_env()?;
    if let Some(host) = host {
        config.host = host;
    }
    if let Some(port) = port {
        config.port = port;
    }
    if let Some(root) = root {
        config.root_dir = root;
    }

    server::serve(&config)?;
    Ok(())
}

/// One pass over every profile, logging what happened to each.
fn send_daily_report(
    report: &ReportConfig,
    telegram: &TelegramConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!("Starting daily real estate report...");

    let client = TelegramClient::new(telegram)?;
    let today = chrono::Local::now().date_naive();
    let results = ReportRunner::new(report, &client).run(today)?;

    if results.is_empty() {
        tracing::info!("No profiles found");
    }
    for result in &results {
        match &result.outcome {
            ProfileOutcome::Sent { chunks, properties } => tracing::info!(
                "{}: sent {chunks} message(s) covering {properties} properties",
                result.profile
            ),
            ProfileOutcome::MissingDocument => {
                tracing::warn!("{}: skipped, no latest report", result.profile)
            }
            ProfileOutcome::NoProperties => {
                tracing::warn!("{}: skipped, no properties found", result.profile)
            }
        }
    }

    tracing::info!("Daily report complete!");
    Ok(())
}
