//! Filter + paginate in one pass
//!
//! [`derive`] is a pure function of its inputs. Callers hold the state and
//! call it again whenever any input changes.

use std::num::NonZeroUsize;

use contract_types::Contract;
use serde::Serialize;

use crate::filter::ContractFilter;
use crate::pagination::{page_slice, total_pages, PageSummary};

/// The visible slice of a filtered contract collection
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedPage<'a> {
    pub contracts: Vec<&'a Contract>,
    pub total_pages: usize,
    /// Size of the filtered set across all pages
    pub total_matches: usize,
    pub summary: PageSummary,
}

impl DerivedPage<'_> {
    pub fn is_empty(&self) -> bool {
        self.contracts.is_empty()
    }
}

/// Apply `filter` to `all`, then cut out page `page_index` (1-based).
///
/// Input order is preserved. A page index past the last page gives an empty
/// page with the correct `total_pages`.
pub fn derive<'a>(
    all: &'a [Contract],
    filter: &ContractFilter,
    page_size: NonZeroUsize,
    page_index: usize,
) -> DerivedPage<'a> {
    let filtered = filter.apply(all);
    let total_matches = filtered.len();

    DerivedPage {
        contracts: page_slice(&filtered, page_size, page_index).to_vec(),
        total_pages: total_pages(total_matches, page_size),
        total_matches,
        summary: PageSummary::new(total_matches, page_size, page_index),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::Choice;
    use chrono::NaiveDate;
    use contract_types::{ContractStatus, RiskLevel};
    use pretty_assertions::assert_eq;

    fn numbered(count: usize) -> Vec<Contract> {
        (1..=count)
            .map(|i| Contract {
                id: format!("c-{:03}", i),
                name: format!("Agreement {}", i),
                parties: "Acme Corp".to_string(),
                start: None,
                expiry: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
                status: if i <= 3 {
                    ContractStatus::Expired
                } else {
                    ContractStatus::Active
                },
                risk: if i % 2 == 0 {
                    RiskLevel::High
                } else {
                    RiskLevel::Low
                },
                clauses: None,
                insights: None,
                evidence: None,
            })
            .collect()
    }

    fn ten() -> NonZeroUsize {
        NonZeroUsize::new(10).unwrap()
    }

    #[test]
    fn test_unfiltered_pages() {
        let all = numbered(25);
        let filter = ContractFilter::default();

        let first = derive(&all, &filter, ten(), 1);
        assert_eq!(first.total_pages, 3);
        assert_eq!(first.contracts.len(), 10);
        assert_eq!(first.contracts[0].id, "c-001");

        let last = derive(&all, &filter, ten(), 3);
        assert_eq!(last.contracts.len(), 5);
        assert_eq!(last.contracts[4].id, "c-025");
    }

    #[test]
    fn test_status_filter_ignores_risk_when_all() {
        let all = numbered(10);
        let filter = ContractFilter::new("", Choice::Only(ContractStatus::Expired), Choice::All);

        let page = derive(&all, &filter, ten(), 1);
        let ids: Vec<&str> = page.contracts.iter().map(|c| c.id.as_str()).collect();

        assert_eq!(ids, vec!["c-001", "c-002", "c-003"]);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.total_matches, 3);
    }

    #[test]
    fn test_no_matches_means_zero_pages() {
        let all = numbered(25);
        let filter = ContractFilter::new("zzz", Choice::All, Choice::All);

        let page = derive(&all, &filter, ten(), 1);
        assert!(page.is_empty());
        assert_eq!(page.total_pages, 0);
    }

    #[test]
    fn test_page_beyond_total_is_empty_not_error() {
        let all = numbered(25);
        let page = derive(&all, &ContractFilter::default(), ten(), 7);

        assert!(page.is_empty());
        assert_eq!(page.total_pages, 3);
        assert!(!page.summary.has_next);
    }
}
