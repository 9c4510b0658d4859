//! Display helpers shared by the table, detail and upload views

use chrono::NaiveDate;
use contract_types::{Contract, ContractStatus, RiskLevel};
use serde::Serialize;

/// `January 15, 2024`
pub fn format_date_long(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// `Jan 15, 2024`
pub fn format_date_short(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// Render a 0-1 score as a whole percentage (0.923 -> 92)
pub fn percent(score: f64) -> u32 {
    (score * 100.0).round().max(0.0) as u32
}

const SIZE_UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

/// Human-readable file size in base-1024 units with at most two decimals,
/// trailing zeros dropped: `0 Bytes`, `512 Bytes`, `1.5 KB`, `2 MB`
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut unit = 0;
    let mut value = bytes as f64;
    while value >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let fixed = format!("{:.2}", value);
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", trimmed, SIZE_UNITS[unit])
}

/// Visual weight of a badge; the frontend maps these to colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Positive,
    Caution,
    Negative,
}

pub fn status_tone(status: ContractStatus) -> Tone {
    match status {
        ContractStatus::Active => Tone::Positive,
        ContractStatus::RenewalDue => Tone::Caution,
        ContractStatus::Expired => Tone::Negative,
    }
}

pub fn risk_tone(risk: RiskLevel) -> Tone {
    match risk {
        RiskLevel::Low => Tone::Positive,
        RiskLevel::Medium => Tone::Caution,
        RiskLevel::High => Tone::Negative,
    }
}

/// One line of the contract table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContractRow {
    pub id: String,
    pub name: String,
    pub parties: String,
    pub expiry: String,
    pub status: ContractStatus,
    pub status_tone: Tone,
    pub risk: RiskLevel,
    pub risk_tone: Tone,
}

impl From<&Contract> for ContractRow {
    fn from(contract: &Contract) -> Self {
        Self {
            id: contract.id.clone(),
            name: contract.name.clone(),
            parties: contract.parties.clone(),
            expiry: format_date_short(contract.expiry),
            status: contract.status,
            status_tone: status_tone(contract.status),
            risk: contract.risk,
            risk_tone: risk_tone(contract.risk),
        }
    }
}
