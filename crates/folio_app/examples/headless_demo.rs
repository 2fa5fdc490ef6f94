//! Headless scenario demo
//!
//! Run with:
//! `cargo run -p folio_app --example headless_demo [scenario.json] [report.json]`
//!
//! Without arguments the bundled first-visit scenario runs and the report is
//! printed to stdout.

use anyhow::Result;
use folio_app::{run_loaded_scenario, HeadlessRunConfig, HeadlessScenario};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("folio_app=debug,folio_theme=debug,info")
        }))
        .init();

    let mut args = std::env::args().skip(1);
    let scenario = match args.next() {
        Some(path) => HeadlessScenario::from_path(&PathBuf::from(path))?,
        None => HeadlessScenario::from_json(include_str!("../tests/scenarios/first_visit.json"))?,
    };

    let outcome = run_loaded_scenario(&scenario, &HeadlessRunConfig::default())?;
    let report = outcome.report();
    match args.next() {
        Some(path) => {
            report.write_to_path(&PathBuf::from(&path))?;
            tracing::info!("report written to {}", path);
        }
        None => report.write_to_writer(&mut std::io::stdout())?,
    }

    if outcome.is_failed() {
        std::process::exit(1);
    }
    Ok(())
}
