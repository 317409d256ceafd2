//! Neakriti article scraper.
//!
//! Article pages have no stable markup, so the body container is located
//! through an ordered list of CSS selectors (by default `.article-body`,
//! `.field-name-body`, then `article`). The first selector matching any
//! element wins, and the text of every `<p>` inside it is joined with
//! single spaces.

use crate::error::{NewsError, NewsResult};
use crate::models::StepOutcome;
use crate::scrapers::ArticleSource;
use itertools::Itertools;
use once_cell::sync::Lazy;
use reqwest::Client;
use scraper::{Html, Selector};
use tracing::{debug, info, instrument, warn};

static PARAGRAPH: Lazy<Selector> =
    Lazy::new(|| Selector::parse("p").expect("`p` is a valid selector"));

/// Scrapes article pages with a shared HTTP client.
#[derive(Debug)]
pub struct PageScraper {
    client: Client,
    selectors: Vec<(String, Selector)>,
    min_text_chars: usize,
}

impl PageScraper {
    /// Build a scraper, compiling `selectors` in order.
    ///
    /// # Errors
    ///
    /// Returns [`NewsError::Selector`] if any selector is not valid CSS.
    pub fn new(client: Client, selectors: &[String], min_text_chars: usize) -> NewsResult<Self> {
        Ok(Self {
            client,
            selectors: compile_selectors(selectors)?,
            min_text_chars,
        })
    }

    async fn fetch_html(&self, url: &str) -> NewsResult<String> {
        let body = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        Ok(body)
    }
}

impl ArticleSource for PageScraper {
    #[instrument(level = "info", skip_all, fields(%url))]
    async fn fetch_text(&self, url: &str) -> StepOutcome<String> {
        let html = match self.fetch_html(url).await {
            Ok(html) => html,
            Err(e) => {
                warn!(error = %e, "Scraping error");
                return StepOutcome::Failure(e.to_string());
            }
        };

        let outcome = match extract_article_text(&html, &self.selectors) {
            Some(text) => apply_floor(text, self.min_text_chars),
            None => {
                debug!("No article container matched");
                StepOutcome::NoUsableText
            }
        };
        if let StepOutcome::Usable(text) = &outcome {
            info!(chars = text.chars().count(), "Parsed article");
        }
        outcome
    }
}

/// Compile selector strings, keeping their source text for logging.
pub fn compile_selectors(selectors: &[String]) -> NewsResult<Vec<(String, Selector)>> {
    selectors
        .iter()
        .map(|raw| {
            Selector::parse(raw)
                .map(|sel| (raw.clone(), sel))
                .map_err(|e| NewsError::Selector {
                    selector: raw.clone(),
                    reason: format!("{e:?}"),
                })
        })
        .collect()
}

/// Locate the article body and join its paragraph texts.
///
/// Returns `None` when no selector matches; a matched container without
/// paragraphs yields an empty string.
pub fn extract_article_text(html: &str, selectors: &[(String, Selector)]) -> Option<String> {
    let document = Html::parse_document(html);

    let (name, container) = selectors
        .iter()
        .find_map(|(name, sel)| document.select(sel).next().map(|el| (name, el)))?;
    debug!(selector = %name, "Matched article container");

    Some(
        container
            .select(&PARAGRAPH)
            .map(|p| p.text().collect::<String>())
            .join(" "),
    )
}

/// Keep `text` only if it has strictly more than `min_chars` characters.
pub fn apply_floor(text: String, min_chars: usize) -> StepOutcome<String> {
    let chars = text.chars().count();
    if chars > min_chars {
        StepOutcome::Usable(text)
    } else {
        debug!(chars, min_chars, "Extracted text below floor");
        StepOutcome::NoUsableText
    }
}
