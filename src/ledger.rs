//! The processed-articles ledger.
//!
//! A flat JSON array of article identifiers, oldest first. An identifier in
//! the ledger is never fetched or summarized again. On save only the most
//! recent `capacity` identifiers are written, so very old articles can be
//! picked up again if they ever come back into the feed.

use crate::error::NewsResult;
use serde_json::Value;
use std::io::ErrorKind;
use std::path::Path;
use tokio::fs;
use tracing::{debug, info, instrument, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ledger {
    ids: Vec<String>,
    capacity: usize,
}

impl Ledger {
    /// Create an empty ledger that keeps at most `capacity` identifiers on save.
    pub fn new(capacity: usize) -> Self {
        Self {
            ids: Vec::new(),
            capacity,
        }
    }

    /// Create a ledger from identifiers already in memory, oldest first.
    pub fn with_ids(ids: Vec<String>, capacity: usize) -> Self {
        Self { ids, capacity }
    }

    /// Load the ledger at `path`.
    ///
    /// A missing, unreadable or malformed file yields an empty ledger; this
    /// never fails. Inside a valid JSON array, elements that are not
    /// strings are dropped with a warning and the rest are kept.
    #[instrument(level = "info", skip_all, fields(path = %path.display()))]
    pub async fn load(path: &Path, capacity: usize) -> Self {
        let raw = match fs::read_to_string(path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("No ledger yet; starting empty");
                return Self::new(capacity);
            }
            Err(e) => {
                warn!(error = %e, "Could not read ledger; starting empty");
                return Self::new(capacity);
            }
        };

        let values = match serde_json::from_str::<Vec<Value>>(&raw) {
            Ok(values) => values,
            Err(e) => {
                warn!(error = %e, "Ledger is not a JSON array; starting empty");
                return Self::new(capacity);
            }
        };

        let total = values.len();
        let ids = values
            .into_iter()
            .filter_map(|value| match value {
                Value::String(id) => Some(id),
                other => {
                    warn!(entry = %other, "Dropping non-string ledger entry");
                    None
                }
            })
            .collect::<Vec<_>>();
        info!(count = ids.len(), dropped = total - ids.len(), "Loaded ledger");
        Self::with_ids(ids, capacity)
    }

    /// Whether `id` has already been processed.
    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|known| known == id)
    }

    /// Record `id` as processed; it becomes the most recent entry.
    pub fn push(&mut self, id: impl Into<String>) {
        self.ids.push(id.into());
    }

    /// Number of identifiers held in memory, before the save-time cap.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// The identifiers that [`Ledger::save`] would write.
    pub fn retained(&self) -> &[String] {
        let start = self.ids.len().saturating_sub(self.capacity);
        &self.ids[start..]
    }

    /// Overwrite `path` with the most recent `capacity` identifiers.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::NewsError::Io`] if the file cannot be written.
    #[instrument(level = "info", skip_all, fields(path = %path.display()))]
    pub async fn save(&self, path: &Path) -> NewsResult<()> {
        let retained = self.retained();
        let json = serde_json::to_string(retained)?;
        fs::write(path, json).await?;
        debug!(
            retained = retained.len(),
            dropped = self.ids.len() - retained.len(),
            "Wrote ledger"
        );
        Ok(())
    }
}
