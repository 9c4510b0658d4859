//! Contract dashboard logic
//!
//! Platform-neutral state behind the contract list, detail page, upload
//! dialog and mock login. Nothing here touches the browser; the web app wraps
//! these types and drives them from DOM events and timers.
//!
//! - [`engine::derive`]: filter and paginate a contract collection
//! - [`DashboardState`]: load state, filters and current page for the list view
//! - [`ContractDetail`]: one contract with the evidence toggle
//! - [`UploadQueue`]: per-file simulated upload progress
//! - [`SessionManager`]: mock login persisted in a [`KeyValueStore`]

pub mod catalog;
pub mod config;
pub mod dashboard;
pub mod detail;
pub mod display;
pub mod engine;
pub mod error;
pub mod filter;
pub mod pagination;
pub mod session;
pub mod source;
pub mod upload;

pub use catalog::ContractCatalog;
pub use config::{DashboardConfig, UploadConfig};
pub use dashboard::{DashboardState, EmptyState, LoadState};
pub use detail::{ContractDetail, DetailModel};
pub use display::{format_file_size, ContractRow, Tone};
pub use engine::{derive, DerivedPage};
pub use error::{DashboardError, Result};
pub use filter::{ContractFilter, RiskFilter, StatusFilter};
pub use pagination::PageSummary;
pub use session::{KeyValueStore, MemoryStore, Session, SessionManager};
pub use upload::{
    SelectedFile, SelectionReport, SimulatedTransport, TickOutcome, UploadEntry, UploadQueue,
    UploadTransport,
};
