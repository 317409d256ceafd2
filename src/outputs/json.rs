//! Per-article JSON summary files.
//!
//! Each saved article becomes `{summary_dir}/{article_id}.json` holding a
//! [`SummaryRecord`]. Files are written once per successful attempt; an
//! existing file for the same identifier is overwritten. The ledger, not
//! the presence of these files, decides what gets reprocessed.

use crate::error::NewsResult;
use crate::models::SummaryRecord;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{error, info, instrument};

/// Path of the summary file for `article_id`.
pub fn summary_path(summary_dir: &Path, article_id: &str) -> PathBuf {
    summary_dir.join(format!("{article_id}.json"))
}

/// Serialize `record` to `{summary_dir}/{article_id}.json`.
///
/// Non-ASCII text is written as UTF-8, not escaped.
#[instrument(level = "info", skip_all, fields(%article_id))]
pub async fn write_summary(
    summary_dir: &Path,
    article_id: &str,
    record: &SummaryRecord,
) -> NewsResult<PathBuf> {
    let json = serde_json::to_string(record)?;
    let path = summary_path(summary_dir, article_id);

    if let Err(e) = fs::write(&path, json).await {
        error!(path = %path.display(), error = %e, "Failed writing summary");
        return Err(e.into());
    }
    info!(path = %path.display(), "Wrote summary file");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_write_summary_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let record = SummaryRecord {
            summary: "• Σεισμός 4,2 Ρίχτερ\n• Χωρίς ζημιές".to_string(),
            url: "https://www.neakriti.gr/kriti/2159092_seismos".to_string(),
        };

        let path = write_summary(dir.path(), "2159092", &record).await.unwrap();

        assert_eq!(path, dir.path().join("2159092.json"));
        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("Σεισμός"), "Greek text must not be escaped: {raw}");
        let back: SummaryRecord = serde_json::from_str(&raw).unwrap();
        assert_eq!(back, record);
    }

    #[tokio::test]
    async fn test_write_summary_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let first = SummaryRecord {
            summary: "old".to_string(),
            url: "u".to_string(),
        };
        let second = SummaryRecord {
            summary: "new".to_string(),
            url: "u".to_string(),
        };

        write_summary(dir.path(), "7", &first).await.unwrap();
        write_summary(dir.path(), "7", &second).await.unwrap();

        let raw = std::fs::read_to_string(dir.path().join("7.json")).unwrap();
        assert_eq!(raw, r#"{"summary":"new","url":"u"}"#);
    }
}
