//! # Neakriti Digest
//!
//! Polls the neakriti.gr syndication feed, scrapes the full text of new
//! articles from selected sections, asks a hosted Gemini model for a short
//! Greek bullet summary, and stores one JSON file per article together with
//! a ledger of identifiers that have already been handled.
//!
//! ## Usage
//!
//! ```sh
//! GEMINI_API_KEY=... neakriti_digest
//! ```
//!
//! ## Architecture
//!
//! One sequential pass per invocation:
//! 1. **Ledger**: load previously processed identifiers
//! 2. **Feed**: fetch and parse the feed, keep allowed sections only
//! 3. **Scrape**: extract paragraph text from each new article page
//! 4. **Summarize**: one model request per article, no retries
//! 5. **Persist**: write `summaries/<id>.json`, then rewrite the ledger
//!
//! Articles that fail to scrape or summarize stay out of the ledger and are
//! tried again next run.

use clap::Parser;
use reqwest::Client;
use std::error::Error;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod api;
mod cli;
mod config;
mod error;
mod feed;
mod ledger;
mod models;
mod outputs;
mod pipeline;
mod scrapers;
mod utils;

use api::GeminiClient;
use cli::Cli;
use config::Settings;
use feed::RssFeed;
use pipeline::{Pipeline, PipelineOptions};
use scrapers::PageScraper;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("neakriti_digest starting up");

    // Missing GEMINI_API_KEY is rejected here by clap.
    let args = Cli::parse();
    debug!(config = ?args.config, "Parsed CLI arguments");

    let mut settings = match &args.config {
        Some(path) => Settings::from_yaml_file(path)?,
        None => Settings::default(),
    };
    args.apply(&mut settings);
    settings.validate()?;
    info!(
        feed_url = %settings.feed_url,
        ledger_file = %settings.ledger_file.display(),
        summary_dir = %settings.summary_dir.display(),
        min_text_chars = settings.min_text_chars,
        model = %settings.model_id,
        "Configuration resolved"
    );

    // One client per run, shared by the feed and page requests.
    let http = Client::builder()
        .user_agent(settings.user_agent.as_str())
        .timeout(settings.page_timeout())
        .build()?;
    let model_http = Client::builder().build()?;

    let feed = RssFeed::new(http.clone(), settings.feed_url.clone());
    let scraper = PageScraper::new(http, &settings.content_selectors, settings.min_text_chars)?;
    let gemini = GeminiClient::new(
        model_http,
        args.gemini_api_key.clone(),
        settings.model_id.clone(),
        settings.api_base_url.clone(),
        settings.model_timeout(),
    )?;

    let pipeline = Pipeline::new(feed, scraper, gemini, PipelineOptions::from(&settings));
    let report = pipeline.run().await?;

    let elapsed = start_time.elapsed();
    info!(
        entries = report.entries_seen,
        outside_sections = report.outside_sections,
        already_processed = report.already_processed,
        missing_id = report.missing_id,
        attempted = report.attempted(),
        saved = report.saved,
        skipped_no_text = report.skipped_no_text,
        skipped_no_summary = report.skipped_no_summary,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );

    Ok(())
}
