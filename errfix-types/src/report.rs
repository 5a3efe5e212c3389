use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};

/// Outcome of one file's repair pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileStatus {
    /// At least one literal was repaired and the file was (or would be)
    /// rewritten.
    Changed,
    /// Every literal already conformed; the file was left untouched.
    Unchanged,
    /// Scanning or I/O failed; the file was left untouched (fail closed).
    Failed,
}

/// Per-file report emitted by the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileReport {
    pub path: Utf8PathBuf,
    pub status: FileStatus,

    /// Tagged literals located in the file.
    #[serde(default)]
    pub literals_seen: usize,

    /// Literals that required repair.
    #[serde(default)]
    pub literals_repaired: usize,

    /// Failure detail when `status` is [`FileStatus::Failed`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl FileReport {
    pub fn failed(path: Utf8PathBuf, message: impl Into<String>) -> Self {
        Self {
            path,
            status: FileStatus::Failed,
            literals_seen: 0,
            literals_repaired: 0,
            message: Some(message.into()),
        }
    }
}

/// Aggregate counts over one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub changed: usize,
    pub unchanged: usize,
    pub failed: usize,
}

impl RunSummary {
    pub fn record(&mut self, report: &FileReport) {
        match report.status {
            FileStatus::Changed => self.changed += 1,
            FileStatus::Unchanged => self.unchanged += 1,
            FileStatus::Failed => self.failed += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.changed + self.unchanged + self.failed
    }
}
