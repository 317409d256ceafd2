//! Run configuration.
//!
//! Every value has a compiled-in default, so the binary runs with no
//! arguments at all. An optional YAML file can override any subset of the
//! fields, and command-line flags override the file (see [`crate::cli`]).

use crate::error::{NewsError, NewsResult};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

pub const DEFAULT_FEED_URL: &str = "https://www.neakriti.gr/rss.xml";
pub const DEFAULT_LEDGER_FILE: &str = "processed_articles.json";
pub const DEFAULT_SUMMARY_DIR: &str = "summaries";
pub const DEFAULT_LEDGER_CAPACITY: usize = 500;
pub const DEFAULT_MIN_TEXT_CHARS: usize = 150;
pub const DEFAULT_MODEL_ID: &str = "gemini-3-flash-preview";
pub const DEFAULT_API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// All tunables of a run.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Syndication feed to poll.
    pub feed_url: String,
    /// A link is processed only if it contains one of these substrings.
    pub allowed_sections: Vec<String>,
    /// JSON array of already processed identifiers.
    pub ledger_file: PathBuf,
    /// Directory receiving `<id>.json` summary files.
    pub summary_dir: PathBuf,
    /// Number of most recent identifiers kept in the ledger file.
    pub ledger_capacity: usize,
    /// Extracted text must be strictly longer than this many characters.
    pub min_text_chars: usize,
    /// Timeout for the feed request and each article page request.
    pub page_timeout_secs: u64,
    /// Timeout for one model request.
    pub model_timeout_secs: u64,
    /// Pause after each saved article.
    pub delay_ms: u64,
    pub user_agent: String,
    /// Article body containers, tried in order.
    pub content_selectors: Vec<String>,
    pub model_id: String,
    pub api_base_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            feed_url: DEFAULT_FEED_URL.to_string(),
            allowed_sections: vec!["/kriti/".to_string(), "/ellada/".to_string()],
            ledger_file: PathBuf::from(DEFAULT_LEDGER_FILE),
            summary_dir: PathBuf::from(DEFAULT_SUMMARY_DIR),
            ledger_capacity: DEFAULT_LEDGER_CAPACITY,
            min_text_chars: DEFAULT_MIN_TEXT_CHARS,
            page_timeout_secs: 15,
            model_timeout_secs: 60,
            delay_ms: 1000,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            content_selectors: vec![
                ".article-body".to_string(),
                ".field-name-body".to_string(),
                "article".to_string(),
            ],
            model_id: DEFAULT_MODEL_ID.to_string(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
        }
    }
}

impl Settings {
    /// Parse settings from YAML; absent fields keep their defaults.
    pub fn from_yaml_str(yaml: &str) -> NewsResult<Self> {
        let settings: Settings = serde_yaml::from_str(yaml)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load and validate settings from the YAML file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an I/O, YAML or configuration error.
    #[instrument(level = "info", skip_all, fields(path = %path.display()))]
    pub fn from_yaml_file(path: &Path) -> NewsResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        let settings = Self::from_yaml_str(&raw)?;
        debug!(?settings, "Loaded settings file");
        Ok(settings)
    }

    /// Check the settings for values no run could work with.
    ///
    /// # Errors
    ///
    /// Returns [`NewsError::Config`] if:
    /// - `ledger_capacity` is zero
    /// - `allowed_sections` or `content_selectors` is empty
    /// - `feed_url` or `api_base_url` is not an absolute URL
    pub fn validate(&self) -> NewsResult<()> {
        for (name, value) in [("feed_url", &self.feed_url), ("api_base_url", &self.api_base_url)] {
            Url::parse(value)
                .map_err(|e| NewsError::Config(format!("{name} `{value}` is not a valid URL: {e}")))?;
        }
        if self.ledger_capacity == 0 {
            return Err(NewsError::Config("ledger_capacity must be at least 1".into()));
        }
        if self.allowed_sections.is_empty() {
            return Err(NewsError::Config("allowed_sections must not be empty".into()));
        }
        if self.content_selectors.is_empty() {
            return Err(NewsError::Config("content_selectors must not be empty".into()));
        }
        Ok(())
    }

    /// Timeout for the feed request and each article page request.
    pub fn page_timeout(&self) -> Duration {
        Duration::from_secs(self.page_timeout_secs)
    }

    /// Timeout for one model request.
    pub fn model_timeout(&self) -> Duration {
        Duration::from_secs(self.model_timeout_secs)
    }

    /// Pause after each saved article.
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_compiled_constants() {
        let s = Settings::default();
        assert_eq!(s.feed_url, "https://www.neakriti.gr/rss.xml");
        assert_eq!(s.allowed_sections, vec!["/kriti/", "/ellada/"]);
        assert_eq!(s.ledger_file, PathBuf::from("processed_articles.json"));
        assert_eq!(s.summary_dir, PathBuf::from("summaries"));
        assert_eq!(s.ledger_capacity, 500);
        assert_eq!(s.min_text_chars, 150);
        assert_eq!(s.page_timeout(), Duration::from_secs(15));
        assert_eq!(s.delay(), Duration::from_secs(1));
        assert!(s.validate().is_ok());
    }

    #[test]
    fn test_yaml_overrides_subset() {
        let yaml = "min_text_chars: 100\nsummary_dir: out\nallowed_sections:\n  - /kriti/\n";
        let s = Settings::from_yaml_str(yaml).unwrap();
        assert_eq!(s.min_text_chars, 100);
        assert_eq!(s.summary_dir, PathBuf::from("out"));
        assert_eq!(s.allowed_sections, vec!["/kriti/"]);
        assert_eq!(s.feed_url, DEFAULT_FEED_URL);
        assert_eq!(s.ledger_capacity, DEFAULT_LEDGER_CAPACITY);
    }

    #[test]
    fn test_yaml_rejects_unknown_field() {
        assert!(matches!(
            Settings::from_yaml_str("feed_urll: https://example.com/rss"),
            Err(NewsError::Yaml(_))
        ));
    }

    #[test]
    fn test_validate_rejects_zero_capacity() {
        assert!(matches!(
            Settings::from_yaml_str("ledger_capacity: 0"),
            Err(NewsError::Config(_))
        ));
    }

    #[test]
    fn test_validate_rejects_empty_selectors() {
        let s = Settings {
            content_selectors: vec![],
            ..Settings::default()
        };
        assert!(s.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_relative_feed_url() {
        assert!(matches!(
            Settings::from_yaml_str("feed_url: /rss.xml"),
            Err(NewsError::Config(_))
        ));
    }

    #[test]
    fn test_from_yaml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "delay_ms: 0\nmodel_id: test-model\n").unwrap();

        let s = Settings::from_yaml_file(&path).unwrap();
        assert_eq!(s.delay(), Duration::ZERO);
        assert_eq!(s.model_id, "test-model");
    }
}
