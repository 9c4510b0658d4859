//! Upload dialog file set
//!
//! Files enter as `uploading` at 0% and are advanced one tick at a time by an
//! [`UploadTransport`]. Each file is independent: ticking one never touches
//! another, and a file that has settled is never ticked again.

pub mod transport;

use contract_types::upload::PROGRESS_COMPLETE;
use contract_types::{UploadFile, UploadStatus};
use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::UploadConfig;
use crate::display::format_file_size;
use crate::error::DashboardError;

pub use transport::{SimulatedTransport, UploadTransport};

/// A file picked or dropped by the user, before it becomes an [`UploadFile`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub size: u64,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            size,
        }
    }
}

/// A file that was refused at selection time
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rejection {
    pub name: String,
    pub reason: String,
}

/// Result of adding a batch of files
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SelectionReport {
    /// Ids of the new upload records, in selection order
    pub accepted: Vec<String>,
    pub rejected: Vec<Rejection>,
}

/// What a single tick did to a file
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    /// Still uploading, at this progress
    Progressed(f64),
    /// Reached 100% on this tick and settled
    Completed(UploadStatus),
    /// Unknown id or already terminal; the caller should stop its timer
    Idle,
}

impl TickOutcome {
    /// True when the file needs no more ticks
    pub fn is_finished(&self) -> bool {
        !matches!(self, TickOutcome::Progressed(_))
    }
}

/// An upload record plus the derived fields the file list renders
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UploadEntry {
    #[serde(flatten)]
    pub file: UploadFile,
    pub size_label: String,
    pub status_label: String,
    /// Larger than the advertised per-file limit
    pub exceeds_size_hint: bool,
}

#[derive(Debug, Clone)]
pub struct UploadQueue {
    config: UploadConfig,
    files: Vec<UploadFile>,
}

impl UploadQueue {
    pub fn new(config: UploadConfig) -> Self {
        Self {
            config,
            files: Vec::new(),
        }
    }

    pub fn config(&self) -> &UploadConfig {
        &self.config
    }

    pub fn files(&self) -> &[UploadFile] {
        &self.files
    }

    pub fn get(&self, id: &str) -> Option<&UploadFile> {
        self.files.iter().find(|f| f.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Number of files still uploading
    pub fn pending(&self) -> usize {
        self.files.iter().filter(|f| !f.is_terminal()).count()
    }

    /// Check one file against the extension allowlist
    pub fn check(&self, file: &SelectedFile) -> Result<(), DashboardError> {
        if self.config.accepts(&file.name) {
            Ok(())
        } else {
            Err(DashboardError::UnsupportedFileType(format!(
                "{} (accepted: {})",
                file.name,
                self.config.accepted_extensions.join(", ")
            )))
        }
    }

    /// Add a batch of picked or dropped files. Accepted files start uploading
    /// at 0%; the rest are reported back and never enter the set.
    pub fn add_files<I>(&mut self, selected: I) -> SelectionReport
    where
        I: IntoIterator<Item = SelectedFile>,
    {
        let mut report = SelectionReport::default();

        for file in selected {
            if let Err(err) = self.check(&file) {
                warn!(name = %file.name, "rejected upload: {}", err);
                report.rejected.push(Rejection {
                    name: file.name,
                    reason: err.to_string(),
                });
                continue;
            }

            let id = Uuid::new_v4().to_string();
            debug!(id = %id, name = %file.name, size = file.size, "upload started");
            self.files.push(UploadFile::new(id.clone(), file.name, file.size));
            report.accepted.push(id);
        }

        report
    }

    /// Advance one file by one tick
    pub fn tick<T>(&mut self, id: &str, transport: &mut T) -> TickOutcome
    where
        T: UploadTransport + ?Sized,
    {
        let Some(file) = self.files.iter_mut().find(|f| f.id == id) else {
            return TickOutcome::Idle;
        };
        if file.is_terminal() {
            return TickOutcome::Idle;
        }

        let increment = transport.progress_increment(file);
        file.advance(increment);

        if file.progress < PROGRESS_COMPLETE {
            debug!(id, progress = file.progress, "upload progress");
            return TickOutcome::Progressed(file.progress);
        }

        let outcome = transport.outcome(file);
        if file.settle(outcome) {
            info!(id, name = %file.name, status = outcome.as_str(), "upload finished");
            TickOutcome::Completed(outcome)
        } else {
            // Transport answered with a non-terminal status; ask again next tick
            TickOutcome::Progressed(file.progress)
        }
    }

    /// Tick every file that is still uploading. Returns how many remain.
    pub fn tick_all<T>(&mut self, transport: &mut T) -> usize
    where
        T: UploadTransport + ?Sized,
    {
        let ids: Vec<String> = self
            .files
            .iter()
            .filter(|f| !f.is_terminal())
            .map(|f| f.id.clone())
            .collect();

        for id in &ids {
            self.tick(id, transport);
        }
        self.pending()
    }

    pub fn entries(&self) -> Vec<UploadEntry> {
        self.files
            .iter()
            .map(|file| UploadEntry {
                size_label: format_file_size(file.size),
                status_label: file.status_label(),
                exceeds_size_hint: file.size > self.config.max_file_size_bytes,
                file: file.clone(),
            })
            .collect()
    }

    /// Drop every record, e.g. when the dialog closes
    /// Drop one file from the set, whatever its status
    pub fn remove(&mut self, id: &str) -> Option<UploadFile> {
        let index = self.files.iter().position(|f| f.id == id)?;
        let file = self.files.remove(index);
        debug!(id, name = %file.name, "upload removed");
        Some(file)
    }

    pub fn reset(&mut self) {
        if !self.files.is_empty() {
            debug!(count = self.files.len(), "upload list cleared");
        }
        self.files.clear();
    }

    /// Hand over the current file set and clear it. Nothing is sent anywhere.
    pub fn take_for_processing(&mut self) -> Vec<UploadFile> {
        let files = std::mem::take(&mut self.files);
        info!(count = files.len(), "processing uploaded files");
        files
    }
}
