//! Generative model interaction.
//!
//! - [`Summarize`]: trait the pipeline depends on
//! - [`GeminiClient`]: `generateContent` REST client implementing it
//!
//! A failed request is reported once and never retried within a run; the
//! article stays out of the ledger and is attempted again next time.

use crate::error::{NewsError, NewsResult};
use crate::models::StepOutcome;
use crate::utils::truncate_for_log;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};

/// Prompt prefix; the article text follows after a blank line.
pub const PROMPT_PREFIX: &str = "Περίληψε το παρακάτω άρθρο σε 3 σύντομες κουκκίδες στα Ελληνικά:";

/// Turns article text into a short summary.
pub trait Summarize {
    async fn summarize(&self, text: &str) -> StepOutcome<String>;
}

/// Build the summarization prompt for `text`.
pub fn build_prompt(text: &str) -> String {
    format!("{PROMPT_PREFIX}\n\n{text}")
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
pub struct CandidatePart {
    pub text: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text parts of the first candidate.
    pub fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

/// Client for the hosted Gemini models, scoped to one run.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: Client,
    api_key: String,
    model: String,
    base_url: String,
    timeout: Duration,
}

impl GeminiClient {
    /// Create a client for `model` at `base_url`.
    ///
    /// # Arguments
    ///
    /// * `http` - HTTP client used for every request
    /// * `api_key` - sent as the `x-goog-api-key` header
    /// * `model` - model identifier, e.g. `gemini-3-flash-preview`
    /// * `base_url` - API root such as `https://generativelanguage.googleapis.com/v1beta`
    /// * `timeout` - per-request timeout
    ///
    /// # Errors
    ///
    /// Returns [`NewsError::Config`] if `api_key` is empty or blank.
    pub fn new(
        http: Client,
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> NewsResult<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(NewsError::Config("Gemini API key is empty".into()));
        }
        Ok(Self {
            http,
            api_key,
            model: model.into(),
            base_url: base_url.into(),
            timeout,
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }

    /// Send `prompt` and return the response text.
    ///
    /// # Errors
    ///
    /// Returns [`NewsError::Http`] on transport or decode failures and
    /// [`NewsError::Api`] on a non-success status.
    #[instrument(level = "info", skip_all, fields(model = %self.model))]
    pub async fn generate(&self, prompt: &str) -> NewsResult<String> {
        let t0 = Instant::now();
        let body = GenerateContentRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        let response = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .timeout(self.timeout)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(NewsError::Api(format!(
                "{status}: {}",
                truncate_for_log(&detail, 300)
            )));
        }

        let parsed: GenerateContentResponse = response.json().await?;
        let text = parsed.text();
        debug!(
            elapsed_ms = t0.elapsed().as_millis() as u64,
            response_preview = %truncate_for_log(&text, 120),
            "Model responded"
        );
        Ok(text)
    }
}

impl Summarize for GeminiClient {
    async fn summarize(&self, text: &str) -> StepOutcome<String> {
        match self.generate(&build_prompt(text)).await {
            Ok(summary) if summary.trim().is_empty() => {
                warn!("Model returned an empty summary");
                StepOutcome::NoUsableText
            }
            Ok(summary) => {
                info!(chars = summary.chars().count(), "Summary received");
                StepOutcome::Usable(summary)
            }
            Err(e) => {
                warn!(error = %e, "AI error");
                StepOutcome::Failure(e.to_string())
            }
        }
    }
}
