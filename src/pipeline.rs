//! The fetch → filter → scrape → summarize → persist driver.
//!
//! Articles are visited strictly one after another in feed order. Each one
//! ends in an [`ArticleState`]: only `Saved` articles enter the ledger, so
//! skipped ones are retried on the next run. The ledger file is written
//! once, after every entry has been visited.

use crate::api::Summarize;
use crate::config::Settings;
use crate::error::NewsResult;
use crate::feed::{FeedSource, article_id, is_allowed_section};
use crate::ledger::Ledger;
use crate::models::{ArticleState, FeedEntry, RunReport, StepOutcome, SummaryRecord};
use crate::outputs::json::write_summary;
use crate::scrapers::ArticleSource;
use crate::utils::ensure_writable_dir;
use std::path::PathBuf;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info, instrument, warn};

/// The parts of [`Settings`] the driver needs.
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub allowed_sections: Vec<String>,
    pub ledger_file: PathBuf,
    pub summary_dir: PathBuf,
    pub ledger_capacity: usize,
    /// Pause after each saved article.
    pub delay: Duration,
}

impl From<&Settings> for PipelineOptions {
    fn from(s: &Settings) -> Self {
        Self {
            allowed_sections: s.allowed_sections.clone(),
            ledger_file: s.ledger_file.clone(),
            summary_dir: s.summary_dir.clone(),
            ledger_capacity: s.ledger_capacity,
            delay: s.delay(),
        }
    }
}

/// One run of the digest, with its collaborators injected.
#[derive(Debug)]
pub struct Pipeline<F, A, S> {
    feed: F,
    articles: A,
    summarizer: S,
    options: PipelineOptions,
}

impl<F, A, S> Pipeline<F, A, S>
where
    F: FeedSource,
    A: ArticleSource,
    S: Summarize,
{
    pub fn new(feed: F, articles: A, summarizer: S, options: PipelineOptions) -> Self {
        Self {
            feed,
            articles,
            summarizer,
            options,
        }
    }

    /// Process every new eligible feed entry and persist the ledger.
    ///
    /// # Errors
    ///
    /// Fails on feed errors, on summary or ledger write errors, and if the
    /// summary directory cannot be prepared. Per-article scrape and model
    /// failures are not errors.
    #[instrument(level = "info", skip_all)]
    pub async fn run(&self) -> NewsResult<RunReport> {
        let opts = &self.options;
        ensure_writable_dir(&opts.summary_dir).await?;

        let mut ledger = Ledger::load(&opts.ledger_file, opts.ledger_capacity).await;
        let entries = self.feed.entries().await?;
        let mut report = RunReport::default();

        for entry in entries {
            report.entries_seen += 1;

            if !is_allowed_section(&entry.link, &opts.allowed_sections) {
                debug!(url = %entry.link, "Outside allowed sections");
                report.outside_sections += 1;
                continue;
            }
            let Some(id) = article_id(&entry.link) else {
                warn!(url = %entry.link, "Could not derive an article id; skipping");
                report.missing_id += 1;
                continue;
            };
            if ledger.contains(&id) {
                debug!(article_id = %id, "Already processed");
                report.already_processed += 1;
                continue;
            }

            let state = self.process_article(&id, &entry).await?;
            report.record(state);

            if state == ArticleState::Saved {
                ledger.push(id);
                if !opts.delay.is_zero() {
                    sleep(opts.delay).await;
                }
            }
        }

        ledger.save(&opts.ledger_file).await?;
        info!(
            retained = ledger.retained().len(),
            total = ledger.len(),
            path = %opts.ledger_file.display(),
            "Saved ledger"
        );
        Ok(report)
    }

    #[instrument(level = "info", skip_all, fields(article_id = %id))]
    async fn process_article(&self, id: &str, entry: &FeedEntry) -> NewsResult<ArticleState> {
        info!(url = %entry.link, title = entry.title.as_deref().unwrap_or(""), "Attempting article");

        let text = match self.articles.fetch_text(&entry.link).await {
            StepOutcome::Usable(text) => text,
            StepOutcome::NoUsableText => {
                warn!("Could not extract usable text; skipping");
                return Ok(ArticleState::SkippedNoText);
            }
            StepOutcome::Failure(reason) => {
                warn!(%reason, "Scrape failed; skipping");
                return Ok(ArticleState::SkippedNoText);
            }
        };
        info!(chars = text.chars().count(), "Text found; requesting summary");

        let summary = match self.summarizer.summarize(&text).await {
            StepOutcome::Usable(summary) => summary,
            StepOutcome::NoUsableText => {
                warn!("Model produced no summary; skipping");
                return Ok(ArticleState::SkippedNoSummary);
            }
            StepOutcome::Failure(reason) => {
                warn!(%reason, "Summarization failed; skipping");
                return Ok(ArticleState::SkippedNoSummary);
            }
        };

        let record = SummaryRecord {
            summary,
            url: entry.link.clone(),
        };
        write_summary(&self.options.summary_dir, id, &record).await?;
        info!("Saved article");
        Ok(ArticleState::Saved)
    }
}
