//! Offline report: spending analysis and money personality for a CSV file.
//!
//! Usage: `report [CSV_PATH] [DAYS]`

use neurapay_agent::{
    analytics::{self, window_days, MIN_PROFILE_TRANSACTIONS},
    config::DEFAULT_TRANSACTIONS_CSV,
    csv_source::load_transactions,
    transactions::normalize,
};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let path = args
        .next()
        .or_else(|| std::env::var("TRANSACTIONS_CSV").ok())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_TRANSACTIONS_CSV));
    let days = match args.next() {
        Some(raw) => raw
            .parse::<i64>()
            .map_err(|_| format!("DAYS must be an integer, got {:?}", raw))?,
        None => 30,
    };
    let days = window_days(days);

    let records = normalize(&load_transactions(&path)?);
    info!(file = %path.display(), records = records.len(), days = days.get(), "Building report");

    let report = analytics::analyze(&records, days);
    println!("=== SPENDING ({} days) ===", days);
    println!("{}", serde_json::to_string_pretty(&report)?);

    match analytics::profile(&records) {
        Ok(profile) => {
            println!("\n=== MONEY PERSONALITY ===");
            println!("{}", serde_json::to_string_pretty(&profile)?);
        }
        Err(e) => warn!(
            "Skipping personality profile ({} of {} transactions): {}",
            records.len(),
            MIN_PROFILE_TRANSACTIONS,
            e
        ),
    }

    Ok(())
}
