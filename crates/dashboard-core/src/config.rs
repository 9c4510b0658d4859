//! Dashboard configuration
//!
//! Every field has a default, so an empty JSON object is a valid config.
//! The demo constants (tick interval, success rate) live here instead of in
//! the code that uses them.

use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};

use crate::error::{DashboardError, Result};

pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const DEFAULT_DATA_URL: &str = "/contracts.json";
pub const DEFAULT_DEMO_PASSWORD: &str = "test123";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Rows per table page
    pub page_size: usize,
    /// Where the contract collection is fetched from
    pub data_url: String,
    /// Password accepted by the mock login
    pub demo_password: String,
    pub upload: UploadConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            data_url: DEFAULT_DATA_URL.to_string(),
            demo_password: DEFAULT_DEMO_PASSWORD.to_string(),
            upload: UploadConfig::default(),
        }
    }
}

impl DashboardConfig {
    /// Parse and validate a JSON config document
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| DashboardError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(DashboardError::InvalidConfig(
                "page_size must be at least 1".to_string(),
            ));
        }
        self.upload.validate()
    }

    /// Page size as a non-zero value. Falls back to the default if the config
    /// was built by hand with a zero page size.
    pub fn page_size(&self) -> NonZeroUsize {
        NonZeroUsize::new(self.page_size).unwrap_or(DEFAULT_PAGE_SIZE_NZ)
    }
}

const DEFAULT_PAGE_SIZE_NZ: NonZeroUsize = match NonZeroUsize::new(DEFAULT_PAGE_SIZE) {
    Some(size) => size,
    None => panic!("default page size is zero"),
};

/// Upload dialog settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    /// Milliseconds between progress ticks for each file
    pub tick_interval_ms: u32,
    /// Exclusive upper bound of the per-tick progress increment, in percent
    pub max_increment: f64,
    /// Probability that a simulated upload ends in success
    pub success_rate: f64,
    /// Lower-case extensions including the dot
    pub accepted_extensions: Vec<String>,
    /// Advisory per-file limit; larger files are flagged, not refused
    pub max_file_size_bytes: u64,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 200,
            max_increment: 30.0,
            success_rate: 0.8,
            accepted_extensions: vec![".pdf".to_string(), ".doc".to_string(), ".docx".to_string()],
            max_file_size_bytes: 10 * 1024 * 1024,
        }
    }
}

impl UploadConfig {
    pub fn validate(&self) -> Result<()> {
        if self.tick_interval_ms == 0 {
            return Err(DashboardError::InvalidConfig(
                "upload.tick_interval_ms must be at least 1".to_string(),
            ));
        }
        if !(self.max_increment.is_finite() && self.max_increment > 0.0) {
            return Err(DashboardError::InvalidConfig(format!(
                "upload.max_increment must be positive, got {}",
                self.max_increment
            )));
        }
        if !(0.0..=1.0).contains(&self.success_rate) {
            return Err(DashboardError::InvalidConfig(format!(
                "upload.success_rate must be within [0, 1], got {}",
                self.success_rate
            )));
        }
        if self.accepted_extensions.is_empty() {
            return Err(DashboardError::InvalidConfig(
                "upload.accepted_extensions must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Case-insensitive extension check against the allowlist
    pub fn accepts(&self, file_name: &str) -> bool {
        let lower = file_name.to_lowercase();
        self.accepted_extensions
            .iter()
            .any(|ext| lower.ends_with(&ext.to_lowercase()) && lower.len() > ext.len())
    }

    /// Value for an `<input type="file" accept=...>` attribute
    pub fn accept_attribute(&self) -> String {
        self.accepted_extensions.join(",")
    }
}
