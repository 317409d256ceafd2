//! Data models shared across the pipeline.
//!
//! - [`FeedEntry`]: one item from the syndication feed, transient
//! - [`SummaryRecord`]: the persisted per-article JSON object
//! - [`StepOutcome`]: result of a scrape or summarize step
//! - [`ArticleState`]: terminal state of one article within a run
//! - [`RunReport`]: counters logged at the end of a run

use serde::{Deserialize, Serialize};

/// A feed item reduced to what the pipeline needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedEntry {
    /// Absolute URL of the article page.
    pub link: String,
    /// Entry title, used only for logging.
    pub title: Option<String>,
}

/// The JSON object written to `summaries/<id>.json`.
///
/// Field order is part of the file format: `summary` first, then `url`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SummaryRecord {
    /// Model-generated summary text.
    pub summary: String,
    /// Link of the source article.
    pub url: String,
}

/// Outcome of a step that may legitimately produce nothing.
///
/// `NoUsableText` and `Failure` both mean "skip this article for now";
/// they are kept apart so logs and reports can tell a thin page from a
/// broken request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome<T> {
    Usable(T),
    NoUsableText,
    Failure(String),
}

/// Terminal state of a single article in one run.
///
/// Only `Saved` adds the identifier to the ledger; skipped articles are
/// retried on the next invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArticleState {
    Saved,
    SkippedNoText,
    SkippedNoSummary,
}

/// Counters for one pipeline run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub entries_seen: usize,
    pub outside_sections: usize,
    pub missing_id: usize,
    pub already_processed: usize,
    pub saved: usize,
    pub skipped_no_text: usize,
    pub skipped_no_summary: usize,
}

impl RunReport {
    pub fn record(&mut self, state: ArticleState) {
        match state {
            ArticleState::Saved => self.saved += 1,
            ArticleState::SkippedNoText => self.skipped_no_text += 1,
            ArticleState::SkippedNoSummary => self.skipped_no_summary += 1,
        }
    }

    /// Articles that were actually attempted this run.
    pub fn attempted(&self) -> usize {
        self.saved + self.skipped_no_text + self.skipped_no_summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_record_field_order() {
        let record = SummaryRecord {
            summary: "• A • B • C".to_string(),
            url: "https://www.neakriti.gr/kriti/55_x".to_string(),
        };
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(
            json,
            r#"{"summary":"• A • B • C","url":"https://www.neakriti.gr/kriti/55_x"}"#
        );
    }

    #[test]
    fn test_run_report_record() {
        let mut report = RunReport::default();
        report.record(ArticleState::Saved);
        report.record(ArticleState::SkippedNoText);
        report.record(ArticleState::SkippedNoSummary);
        report.record(ArticleState::Saved);

        assert_eq!(report.saved, 2);
        assert_eq!(report.skipped_no_text, 1);
        assert_eq!(report.skipped_no_summary, 1);
        assert_eq!(report.attempted(), 4);
    }
}
