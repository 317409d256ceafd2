//! Syndication feed fetching, section filtering and identifier derivation.
//!
//! The feed is parsed with `feed-rs`; only each entry's link (and title,
//! for logging) survives into [`FeedEntry`].

use crate::error::{NewsError, NewsResult};
use crate::models::FeedEntry;
use reqwest::Client;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

/// Source of feed entries, in feed order.
pub trait FeedSource {
    async fn entries(&self) -> NewsResult<Vec<FeedEntry>>;
}

/// Fetches one RSS/Atom feed over HTTP.
#[derive(Debug, Clone)]
pub struct RssFeed {
    client: Client,
    url: String,
}

impl RssFeed {
    /// Create a feed source for `url` using a shared HTTP client.
    ///
    /// The client's timeout and User-Agent apply to the feed request.
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

impl FeedSource for RssFeed {
    #[instrument(level = "info", skip_all, fields(url = %self.url))]
    async fn entries(&self) -> NewsResult<Vec<FeedEntry>> {
        let t0 = Instant::now();
        let bytes = self
            .client
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;
        let entries = parse_feed(&bytes)?;
        info!(
            count = entries.len(),
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "Fetched feed"
        );
        Ok(entries)
    }
}

/// Parse raw feed bytes into entries, dropping entries without a link.
pub fn parse_feed(bytes: &[u8]) -> NewsResult<Vec<FeedEntry>> {
    let feed = feed_rs::parser::parse(bytes).map_err(|e| NewsError::Feed(e.to_string()))?;

    let entries = feed
        .entries
        .into_iter()
        .filter_map(|entry| {
            let link = entry_link(&entry);
            if link.is_none() {
                warn!(id = %entry.id, "Feed entry has no link; ignoring");
            }
            link.map(|link| FeedEntry {
                link,
                title: entry.title.map(|t| t.content),
            })
        })
        .collect::<Vec<_>>();
    debug!(count = entries.len(), "Parsed feed entries");
    Ok(entries)
}

fn entry_link(entry: &feed_rs::model::Entry) -> Option<String> {
    let usable = |href: &str| !href.trim().is_empty();

    entry
        .links
        .iter()
        .find(|l| {
            usable(l.href.as_str())
                && l.rel
                    .as_deref()
                    .is_none_or(|rel| rel.is_empty() || rel.eq_ignore_ascii_case("alternate"))
        })
        .or_else(|| entry.links.iter().find(|l| usable(l.href.as_str())))
        .map(|l| l.href.trim().to_string())
        .or_else(|| {
            let id = entry.id.trim();
            (id.starts_with("http://") || id.starts_with("https://")).then(|| id.to_string())
        })
}

/// True when `link` contains at least one of the allowed section substrings.
pub fn is_allowed_section(link: &str, sections: &[String]) -> bool {
    sections.iter().any(|section| link.contains(section.as_str()))
}

/// Derive the article identifier from its link.
///
/// The identifier is the last path segment cut at the first underscore:
/// `https://www.neakriti.gr/kriti/2159092_some-title` gives `2159092`.
/// The segment is taken verbatim from the link (no percent-decoding or
/// re-encoding); any query string or fragment is cut off first.
/// Returns `None` when nothing is left.
pub fn article_id(link: &str) -> Option<String> {
    let path = link.split(['?', '#']).next().unwrap_or_default();

    let segment = path.rsplit('/').next().unwrap_or_default();
    let id = segment.split('_').next().unwrap_or_default();

    (!id.is_empty()).then(|| id.to_string())
}
