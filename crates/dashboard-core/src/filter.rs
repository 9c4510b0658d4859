//! Contract filters
//!
//! Three independent predicates (free text, status, risk) combined with AND.
//! Each predicate only looks at the contract in front of it, so the order in
//! which they are applied never changes the result.

use std::fmt;
use std::str::FromStr;

use contract_types::{Contract, ContractStatus, RiskLevel};
use serde::{Serialize, Serializer};

use crate::error::DashboardError;

/// Sentinel label meaning "no restriction"
pub const ALL_LABEL: &str = "All";

/// A select-box filter: either the "All" sentinel or one concrete value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Choice<T> {
    All,
    Only(T),
}

impl<T> Default for Choice<T> {
    fn default() -> Self {
        Choice::All
    }
}

impl<T: PartialEq> Choice<T> {
    pub fn admits(&self, value: &T) -> bool {
        match self {
            Choice::All => true,
            Choice::Only(wanted) => wanted == value,
        }
    }
}

impl<T: fmt::Display> fmt::Display for Choice<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Choice::All => f.write_str(ALL_LABEL),
            Choice::Only(value) => value.fmt(f),
        }
    }
}

impl<T: fmt::Display> Serialize for Choice<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<T> FromStr for Choice<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == ALL_LABEL {
            return Ok(Choice::All);
        }
        s.parse()
            .map(Choice::Only)
            .map_err(|e: T::Err| DashboardError::InvalidFilter(e.to_string()))
    }
}

pub type StatusFilter = Choice<ContractStatus>;
pub type RiskFilter = Choice<RiskLevel>;

/// Options offered by the status select, in display order
pub fn status_options() -> Vec<StatusFilter> {
    std::iter::once(Choice::All)
        .chain(ContractStatus::ALL.into_iter().map(Choice::Only))
        .collect()
}

/// Options offered by the risk select, in display order
pub fn risk_options() -> Vec<RiskFilter> {
    std::iter::once(Choice::All)
        .chain(RiskLevel::ALL.into_iter().map(Choice::Only))
        .collect()
}

/// The full filter tuple applied to the contract list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContractFilter {
    pub search_term: String,
    pub status: StatusFilter,
    pub risk: RiskFilter,
}

impl ContractFilter {
    pub fn new(search_term: impl Into<String>, status: StatusFilter, risk: RiskFilter) -> Self {
        Self {
            search_term: search_term.into(),
            status,
            risk,
        }
    }

    pub fn is_unrestricted(&self) -> bool {
        self.search_term.is_empty() && self.status == Choice::All && self.risk == Choice::All
    }

    pub fn matches(&self, contract: &Contract) -> bool {
        matches_search(contract, &self.search_term)
            && self.status.admits(&contract.status)
            && self.risk.admits(&contract.risk)
    }

    /// Contracts that pass every predicate, in input order
    pub fn apply<'a>(&self, contracts: &'a [Contract]) -> Vec<&'a Contract> {
        // Lower-case the needle once instead of per contract
        let needle = self.search_term.to_lowercase();
        contracts
            .iter()
            .filter(|c| {
                contains_folded(c, &needle)
                    && self.status.admits(&c.status)
                    && self.risk.admits(&c.risk)
            })
            .collect()
    }
}

/// Case-insensitive substring match on name or parties. An empty term
/// matches everything.
pub fn matches_search(contract: &Contract, term: &str) -> bool {
    contains_folded(contract, &term.to_lowercase())
}

fn contains_folded(contract: &Contract, needle: &str) -> bool {
    needle.is_empty()
        || contract.name.to_lowercase().contains(needle)
        || contract.parties.to_lowercase().contains(needle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn contract(
        id: &str,
        name: &str,
        parties: &str,
        status: ContractStatus,
        risk: RiskLevel,
    ) -> Contract {
        Contract {
            id: id.to_string(),
            name: name.to_string(),
            parties: parties.to_string(),
            start: None,
            expiry: NaiveDate::from_ymd_opt(2025, 12, 31).unwrap(),
            status,
            risk,
            clauses: None,
            insights: None,
            evidence: None,
        }
    }

    fn sample() -> Vec<Contract> {
        use ContractStatus::*;
        use RiskLevel::*;
        vec![
            contract("1", "Acme Corp Master Agreement", "Acme Corp, Beta LLC", Active, Low),
            contract("2", "Office Lease", "Acme Corp, Beta LLC", Expired, High),
            contract("3", "Supply Agreement", "Gamma Inc", RenewalDue, Medium),
        ]
    }

    #[test]
    fn test_search_matches_name_or_parties_case_insensitive() {
        let contracts = sample();
        let filter = ContractFilter::new("acme", Choice::All, Choice::All);

        let ids: Vec<&str> = filter
            .apply(&contracts)
            .iter()
            .map(|c| c.id.as_str())
            .collect();
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[test]
    fn test_search_without_match_is_empty() {
        let contracts = sample();
        let filter = ContractFilter::new("zzz", Choice::All, Choice::All);
        assert!(filter.apply(&contracts).is_empty());
    }

    #[test]
    fn test_empty_filter_keeps_everything_in_order() {
        let contracts = sample();
        let filter = ContractFilter::default();

        assert!(filter.is_unrestricted());
        let ids: Vec<&str> = filter
            .apply(&contracts)
            .iter()
            .map(|c| c.id.as_str())
            .collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_status_and_risk_compose_with_and() {
        let contracts = sample();

        let expired = Choice::Only(ContractStatus::Expired);

        let filter = ContractFilter::new("", expired, Choice::Only(RiskLevel::High));
        assert_eq!(filter.apply(&contracts).len(), 1);

        let filter = ContractFilter::new("", expired, Choice::Only(RiskLevel::Low));
        assert!(filter.apply(&contracts).is_empty());
    }

    #[test]
    fn test_matches_agrees_with_apply() {
        let contracts = sample();
        let filter = ContractFilter::new("LEASE", Choice::All, Choice::Only(RiskLevel::High));

        let applied = filter.apply(&contracts);
        let by_matches: Vec<&Contract> = contracts.iter().filter(|c| filter.matches(c)).collect();
        assert_eq!(applied, by_matches);
    }

    #[test]
    fn test_choice_parses_sentinel_and_values() {
        assert_eq!("All".parse::<StatusFilter>().unwrap(), Choice::All);
        assert_eq!(
            "Renewal Due".parse::<StatusFilter>().unwrap(),
            Choice::Only(ContractStatus::RenewalDue)
        );
        assert_eq!("High".parse::<RiskFilter>().unwrap(), Choice::Only(RiskLevel::High));

        let err = "Critical".parse::<RiskFilter>().unwrap_err();
        assert!(matches!(err, DashboardError::InvalidFilter(_)));
    }

    #[test]
    fn test_options_in_display_order() {
        let labels: Vec<String> = status_options().iter().map(|o| o.to_string()).collect();
        assert_eq!(labels, vec!["All", "Active", "Expired", "Renewal Due"]);

        let labels: Vec<String> = risk_options().iter().map(|o| o.to_string()).collect();
        assert_eq!(labels, vec!["All", "Low", "Medium", "High"]);
    }

    #[test]
    fn test_filter_serializes_labels() {
        let filter = ContractFilter::new(
            "acme",
            Choice::Only(ContractStatus::RenewalDue),
            Choice::All,
        );
        let json = serde_json::to_value(&filter).unwrap();
        assert_eq!(json["status"], "Renewal Due");
        assert_eq!(json["risk"], "All");
    }
}
