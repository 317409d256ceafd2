//! Article page scrapers.
//!
//! A scraper turns an article URL into its body text. Failures never
//! escape as errors: they come back as [`StepOutcome::NoUsableText`] or
//! [`StepOutcome::Failure`] so the pipeline can skip the article and try
//! it again on the next run.
//!
//! | Site | Module | Method |
//! |------|--------|--------|
//! | Neakriti | [`neakriti`] | HTML scraping with ordered selector fallbacks |

use crate::models::StepOutcome;

pub mod neakriti;

pub use neakriti::PageScraper;

/// Fetches an article page and extracts its body text.
pub trait ArticleSource {
    async fn fetch_text(&self, url: &str) -> StepOutcome<String>;
}
