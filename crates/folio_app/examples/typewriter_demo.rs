//! Live typewriter demo on a tokio runtime
//!
//! Run with:
//! `cargo run -p folio_app --example typewriter_demo`
//!
//! Prints the hero headline as it types, deletes and cycles for ten seconds.

use folio_app::prelude::*;
use folio_core::TokioTimers;
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let timers = TokioTimers::try_current()
        .ok_or_else(|| anyhow::anyhow!("no tokio runtime"))?;

    // Theme preference lands in the user config dir when there is one
    let host = PortfolioHost {
        headline_sink: Some(Arc::new(|text: &str| {
            let mut out = std::io::stdout().lock();
            let _ = write!(out, "\r\x1b[2K{text}|");
            let _ = out.flush();
        })),
        ..PortfolioHost::desktop(Arc::new(timers))
    };
    let mut page = Portfolio::new(FolioConfig::default(), host)?;
    tracing::info!(
        "{} - theme {} with accent {}",
        page.profile().name,
        page.theme(),
        page.palette().colors.accent.to_css()
    );

    tokio::time::sleep(Duration::from_secs(10)).await;
    page.teardown();
    println!();
    tracing::info!("stopped at '{}'", page.headline());
    Ok(())
}
