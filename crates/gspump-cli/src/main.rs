//! gspump CLI
//!
//! Restores a GeoServer configuration backup through the REST API.

mod cli;
mod error;
mod logging;

use clap::Parser;
use colored::Colorize;
use gspump_core::{Pump, PumpOptions, PumpReport};
use gspump_fs::BackupPath;
use gspump_rest::{HttpRestClient, Pusher};

use cli::Cli;
use error::{CliError, Result};

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    logging::init(cli.verbose)
        .map_err(|e| CliError::user(format!("Failed to initialize logging: {}", e)))?;

    let config = cli.server_config()?;
    tracing::debug!("Using {:?}", config);

    let client = HttpRestClient::new(&config)?;
    let pump = Pump::new(
        Pusher::new(client, config.admin_url.clone()),
        PumpOptions {
            keep_going: cli.keep_going,
        },
    );

    let input_root = BackupPath::new(&cli.input_dir);
    if !input_root.is_dir() {
        tracing::warn!("Input directory {} does not exist", input_root);
    }

    let report = pump.pump_all(&input_root)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_summary(&report);
    }
    Ok(())
}

fn print_summary(report: &PumpReport) {
    println!(
        "{} {} pushed: {} created, {} updated, {} fallback-updated, {} failed",
        "gspump".green().bold(),
        report.pushed.len(),
        report.created(),
        report.updated(),
        report.fallback_updated(),
        report.failed(),
    );

    for record in report.failures() {
        println!("  {} {} {}", "failed".red(), record.kind, record.target);
    }

    if !report.skipped.is_empty() {
        println!("{} {} skipped", "gspump".yellow().bold(), report.skipped.len());
        for skipped in &report.skipped {
            println!("  {} {}: {}", "skipped".yellow(), skipped.path, skipped.error);
        }
    }
}
