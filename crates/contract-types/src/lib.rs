//! Contract dashboard data model
//!
//! Serde types shared by the dashboard logic and the web bindings.

pub mod types;
pub mod upload;

pub use types::{Clause, Contract, ContractStatus, Evidence, Insight, RiskLevel, UnknownVariant};
pub use upload::{UploadFile, UploadStatus};
