//! Local JSON history cache.
//!
//! Keeps a flat array of [`HistorySample`]s on disk so that a history
//! survives without the database. Writes go through a temporary file and a
//! rename.

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::domain::HistorySample;
use crate::domain::sample::should_append;
use crate::error::TrackerError;

/// Handle on the JSON history file.
#[derive(Debug, Clone)]
pub struct HistoryFile {
    path: PathBuf,
}

impl HistoryFile {
    /// Creates a handle for `path`. The file is not touched.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads all samples. A missing file is an empty history.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::HistoryFile`] if the file exists but cannot be
    /// read or parsed.
    pub async fn load(&self) -> Result<Vec<HistorySample>, TrackerError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(self.error("read", &e)),
        };
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }
        serde_json::from_slice(&bytes).map_err(|e| self.error("parse", &e))
    }

    /// Replaces the file contents with `samples`.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::HistoryFile`] on I/O or serialization failure.
    pub async fn save(&self, samples: &[HistorySample]) -> Result<(), TrackerError> {
        let json = serde_json::to_vec_pretty(samples).map_err(|e| self.error("encode", &e))?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| self.error("create dir", &e))?;
        }
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json)
            .await
            .map_err(|e| self.error("write", &e))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| self.error("rename", &e))
    }

    /// Appends `sample` if the last stored sample is older than
    /// `min_interval` (or there is none). Returns the full history and
    /// whether the sample was appended.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::HistoryFile`] on I/O or parse failure.
    pub async fn record(
        &self,
        sample: HistorySample,
        now: DateTime<Utc>,
        min_interval: Duration,
    ) -> Result<(Vec<HistorySample>, bool), TrackerError> {
        let mut history = self.load().await?;
        if !should_append(history.last(), now, min_interval) {
            return Ok((history, false));
        }
        history.push(sample);
        self.save(&history).await?;
        Ok((history, true))
    }

    fn error(&self, op: &str, err: &dyn std::fmt::Display) -> TrackerError {
        TrackerError::HistoryFile(format!("{op} {}: {err}", self.path.display()))
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::{AccountInfo, MicroAlgos};

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("{name}-{}.json", uuid::Uuid::new_v4()))
    }

    fn sample(ts: DateTime<Utc>) -> HistorySample {
        HistorySample::from_account(&AccountInfo::default(), MicroAlgos::new(1_000_000), ts)
    }

    #[tokio::test]
    async fn missing_file_is_empty() {
        let file = HistoryFile::new(temp_path("missing"));
        let Ok(history) = file.load().await else {
            panic!("load failed");
        };
        assert!(history.is_empty());
    }

    #[tokio::test]
    async fn record_applies_min_interval() {
        let file = HistoryFile::new(temp_path("record"));
        let hour = Duration::from_secs(3_600);
        let t0 = Utc::now();

        let Ok((history, appended)) = file.record(sample(t0), t0, hour).await else {
            panic!("first record failed");
        };
        assert!(appended);
        assert_eq!(history.len(), 1);

        let soon = t0 + chrono::Duration::minutes(10);
        let Ok((history, appended)) = file.record(sample(soon), soon, hour).await else {
            panic!("second record failed");
        };
        assert!(!appended);
        assert_eq!(history.len(), 1);

        let later = t0 + chrono::Duration::minutes(61);
        let Ok((history, appended)) = file.record(sample(later), later, hour).await else {
            panic!("third record failed");
        };
        assert!(appended);
        assert_eq!(history.len(), 2);

        let Ok(reloaded) = file.load().await else {
            panic!("reload failed");
        };
        assert_eq!(reloaded, history);
        let _ = tokio::fs::remove_file(file.path()).await;
    }

    #[tokio::test]
    async fn corrupt_file_is_an_error() {
        let path = temp_path("corrupt");
        let _ = tokio::fs::write(&path, b"{not json").await;
        let file = HistoryFile::new(&path);
        assert!(matches!(file.load().await, Err(TrackerError::HistoryFile(_))));
        let _ = tokio::fs::remove_file(&path).await;
    }
}
