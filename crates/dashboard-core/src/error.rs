use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Failed to fetch contracts: {0}")]
    Fetch(String),

    #[error("Failed to parse contracts: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Contract not found: {0}")]
    NotFound(String),

    #[error("Invalid username or password")]
    AuthenticationFailed,

    #[error("Invalid filter value: {0}")]
    InvalidFilter(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

pub type Result<T> = std::result::Result<T, DashboardError>;
