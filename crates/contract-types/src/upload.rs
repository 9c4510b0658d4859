//! Client-side upload records
//!
//! An [`UploadFile`] only lives as long as the upload dialog that created it.
//! The mutators here are the only way to move one forward, and they refuse to
//! touch a record once it has reached a terminal status.

use serde::{Deserialize, Serialize};

/// Upper bound of [`UploadFile::progress`]
pub const PROGRESS_COMPLETE: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadStatus {
    Uploading,
    Success,
    Error,
}

impl UploadStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UploadStatus::Uploading => "uploading",
            UploadStatus::Success => "success",
            UploadStatus::Error => "error",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, UploadStatus::Uploading)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadFile {
    pub id: String,
    pub name: String,
    pub size: u64, // Bytes
    pub status: UploadStatus,
    pub progress: f64, // 0.0 - 100.0
}

impl UploadFile {
    pub fn new(id: impl Into<String>, name: impl Into<String>, size: u64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            size,
            status: UploadStatus::Uploading,
            progress: 0.0,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Add `increment` percent, clamped to 100. Negative or NaN increments
    /// count as zero. Returns true when this call brought progress to 100.
    pub fn advance(&mut self, increment: f64) -> bool {
        if self.is_terminal() || self.progress >= PROGRESS_COMPLETE {
            return false;
        }

        let step = if increment.is_nan() { 0.0 } else { increment.max(0.0) };
        self.progress = (self.progress + step).min(PROGRESS_COMPLETE);
        self.progress >= PROGRESS_COMPLETE
    }

    /// Move to a terminal status. Ignored unless the record is still uploading
    /// and `outcome` is itself terminal.
    pub fn settle(&mut self, outcome: UploadStatus) -> bool {
        if self.is_terminal() || !outcome.is_terminal() {
            return false;
        }
        self.progress = PROGRESS_COMPLETE;
        self.status = outcome;
        true
    }

    /// `"42%"` while uploading, otherwise the status name
    pub fn status_label(&self) -> String {
        match self.status {
            UploadStatus::Uploading => format!("{}%", self.progress.round() as u32),
            other => other.as_str().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_file_starts_uploading_at_zero() {
        let file = UploadFile::new("a1", "lease.pdf", 2048);
        assert_eq!(file.status, UploadStatus::Uploading);
        assert_eq!(file.progress, 0.0);
        assert_eq!(file.status_label(), "0%");
    }

    #[test]
    fn test_advance_clamps_at_complete() {
        let mut file = UploadFile::new("a1", "lease.pdf", 2048);

        assert!(!file.advance(60.0));
        assert!(file.advance(60.0));
        assert_eq!(file.progress, 100.0);

        // Already at 100, further ticks report nothing new
        assert!(!file.advance(10.0));
        assert_eq!(file.progress, 100.0);
    }

    #[test]
    fn test_advance_ignores_negative_and_nan() {
        let mut file = UploadFile::new("a1", "lease.pdf", 2048);
        file.advance(20.0);
        file.advance(-5.0);
        file.advance(f64::NAN);
        assert_eq!(file.progress, 20.0);
    }

    #[test]
    fn test_settle_is_terminal() {
        let mut file = UploadFile::new("a1", "lease.pdf", 2048);
        file.advance(100.0);

        assert!(file.settle(UploadStatus::Error));
        assert!(!file.settle(UploadStatus::Success));
        assert!(!file.advance(5.0));
        assert_eq!(file.status, UploadStatus::Error);
        assert_eq!(file.status_label(), "error");
    }

    #[test]
    fn test_settle_rejects_uploading_outcome() {
        let mut file = UploadFile::new("a1", "lease.pdf", 2048);
        assert!(!file.settle(UploadStatus::Uploading));
        assert_eq!(file.status, UploadStatus::Uploading);
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let mut file = UploadFile::new("a1", "lease.pdf", 2048);
        file.advance(100.0);
        file.settle(UploadStatus::Success);

        let json = serde_json::to_string(&file).unwrap();
        assert!(json.contains(r#""status":"success""#));
    }

    #[test]
    fn test_label_rounds_progress() {
        let mut file = UploadFile::new("a1", "lease.pdf", 2048);
        file.advance(41.6);
        assert_eq!(file.status_label(), "42%");
    }
}
