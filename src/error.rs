//! Error types for process-level failures.
//!
//! Per-article problems (a page without usable text, a failed model call)
//! are not errors here; they travel as [`crate::models::StepOutcome`] values
//! so the pipeline can skip the article and retry it on the next run.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum NewsError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML config error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Feed parsing failed: {0}")]
    Feed(String),

    #[error("Invalid CSS selector `{selector}`: {reason}")]
    Selector { selector: String, reason: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Model API error: {0}")]
    Api(String),
}

pub type NewsResult<T> = Result<T, NewsError>;
