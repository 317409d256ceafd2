//! Command-line interface definitions for Neakriti Digest.
//!
//! Every flag is optional except the model API key, which is normally
//! supplied through the `GEMINI_API_KEY` environment variable. Flags take
//! precedence over values loaded from `--config`.

use crate::config::Settings;
use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments for the Neakriti Digest application.
///
/// # Examples
///
/// ```sh
/// # Compiled-in defaults, key from the environment
/// GEMINI_API_KEY=... neakriti_digest
///
/// # Custom output locations
/// neakriti_digest --ledger-file state/ledger.json --summary-dir state/summaries
///
/// # Everything from a YAML file
/// neakriti_digest --config digest.yaml
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Optional path to a YAML settings file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Syndication feed URL
    #[arg(long)]
    pub feed_url: Option<String>,

    /// JSON file holding already processed article identifiers
    #[arg(short, long)]
    pub ledger_file: Option<PathBuf>,

    /// Output directory for per-article summary files
    #[arg(short, long)]
    pub summary_dir: Option<PathBuf>,

    /// Minimum extracted characters before an article is summarized
    #[arg(long)]
    pub min_text_chars: Option<usize>,

    /// Pause after each saved article, in milliseconds
    #[arg(long)]
    pub delay_ms: Option<u64>,

    /// Generative model identifier
    #[arg(long)]
    pub model: Option<String>,

    /// Gemini API key
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub gemini_api_key: String,
}

impl Cli {
    /// Overlay explicitly given flags onto `settings`.
    pub fn apply(&self, settings: &mut Settings) {
        if let Some(url) = &self.feed_url {
            settings.feed_url = url.clone();
        }
        if let Some(path) = &self.ledger_file {
            settings.ledger_file = path.clone();
        }
        if let Some(dir) = &self.summary_dir {
            settings.summary_dir = dir.clone();
        }
        if let Some(n) = self.min_text_chars {
            settings.min_text_chars = n;
        }
        if let Some(ms) = self.delay_ms {
            settings.delay_ms = ms;
        }
        if let Some(model) = &self.model {
            settings.model_id = model.clone();
        }
    }
}
