//! Host-independent half of loading `contracts.json`
//!
//! The host performs the request; these helpers turn what came back into
//! contracts or a [`DashboardError`].

use contract_types::Contract;

use crate::error::{DashboardError, Result};

/// Map an HTTP response status to `Ok` for 2xx and a `Fetch` error otherwise
pub fn check_status(url: &str, status: u16, status_text: &str) -> Result<()> {
    if (200..300).contains(&status) {
        return Ok(());
    }
    let reason = if status_text.is_empty() {
        status.to_string()
    } else {
        format!("{} {}", status, status_text)
    };
    Err(DashboardError::Fetch(format!("{} returned {}", url, reason)))
}

/// Network-level failure before any status was received
pub fn network_error(url: &str, detail: &str) -> DashboardError {
    DashboardError::Fetch(format!("{}: {}", url, detail))
}

/// Parse a response body. Anything other than an array of contract records
/// is a `Parse` error.
pub fn parse_contracts(body: &str) -> Result<Vec<Contract>> {
    Ok(serde_json::from_str(body)?)
}
