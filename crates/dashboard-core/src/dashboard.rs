//! Contract list view state
//!
//! Holds the loaded collection, the three filter inputs and the current page.
//! Changing a filter input moves the user back to page 1, since their
//! position in the old result set means nothing in the new one.

use std::num::NonZeroUsize;
use std::sync::Arc;

use contract_types::Contract;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::catalog::ContractCatalog;
use crate::engine::{derive, DerivedPage};
use crate::error::DashboardError;
use crate::filter::{ContractFilter, RiskFilter, StatusFilter};

/// Where the one-time fetch of the collection stands
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState {
    Loading,
    /// Terminal for this load; the UI offers a retry
    Failed(String),
    Ready(Arc<[Contract]>),
}

/// Why the table has nothing to show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyState {
    /// The collection itself is empty
    NoContracts,
    /// The filters exclude every contract
    NoMatches,
}

impl EmptyState {
    pub fn message(&self) -> &'static str {
        match self {
            EmptyState::NoContracts => "No contracts yet",
            EmptyState::NoMatches => "No contracts match your filters",
        }
    }

    /// Only an empty collection gets the "upload your first contract" prompt
    pub fn offers_upload(&self) -> bool {
        matches!(self, EmptyState::NoContracts)
    }
}

pub const LOAD_FAILED_MESSAGE: &str = "Failed to load contracts. Please try again.";

#[derive(Debug, Clone)]
pub struct DashboardState {
    load: LoadState,
    filter: ContractFilter,
    current_page: usize,
    page_size: NonZeroUsize,
}

impl DashboardState {
    pub fn new(page_size: NonZeroUsize) -> Self {
        Self {
            load: LoadState::Loading,
            filter: ContractFilter::default(),
            current_page: 1,
            page_size,
        }
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load
    }

    pub fn filter(&self) -> &ContractFilter {
        &self.filter
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_size(&self) -> NonZeroUsize {
        self.page_size
    }

    /// Loaded collection, empty while loading or after a failure
    pub fn contracts(&self) -> &[Contract] {
        match &self.load {
            LoadState::Ready(contracts) => contracts.as_ref(),
            _ => &[],
        }
    }

    /// Lookup handle over the loaded collection for the detail view
    pub fn catalog(&self) -> Option<ContractCatalog> {
        match &self.load {
            LoadState::Ready(contracts) => Some(ContractCatalog::from(Arc::clone(contracts))),
            _ => None,
        }
    }

    /// Enter the loading state, e.g. when the user hits retry
    pub fn begin_load(&mut self) {
        self.load = LoadState::Loading;
    }

    /// Record the outcome of a fetch. A new collection also resets the page.
    pub fn finish_load(&mut self, result: Result<Vec<Contract>, DashboardError>) {
        match result {
            Ok(contracts) => {
                info!(count = contracts.len(), "contracts loaded");
                self.load = LoadState::Ready(contracts.into());
                self.current_page = 1;
            }
            Err(err) => {
                warn!(error = %err, "contract load failed");
                self.load = LoadState::Failed(LOAD_FAILED_MESSAGE.to_string());
            }
        }
    }

    pub fn set_search_term(&mut self, term: &str) {
        if self.filter.search_term != term {
            self.filter.search_term = term.to_string();
            self.reset_page();
        }
    }

    pub fn set_status_filter(&mut self, status: StatusFilter) {
        if self.filter.status != status {
            self.filter.status = status;
            self.reset_page();
        }
    }

    pub fn set_risk_filter(&mut self, risk: RiskFilter) {
        if self.filter.risk != risk {
            self.filter.risk = risk;
            self.reset_page();
        }
    }

    /// Parse a select-box label ("All", "Renewal Due", ...) and apply it
    pub fn select_status(&mut self, label: &str) -> Result<(), DashboardError> {
        let status: StatusFilter = label.parse()?;
        self.set_status_filter(status);
        Ok(())
    }

    pub fn select_risk(&mut self, label: &str) -> Result<(), DashboardError> {
        let risk: RiskFilter = label.parse()?;
        self.set_risk_filter(risk);
        Ok(())
    }

    /// Jump to a page. Any index >= 1 is accepted; past the end is simply empty.
    pub fn go_to_page(&mut self, page: usize) {
        self.current_page = page.max(1);
        debug!(page = self.current_page, "page changed");
    }

    /// Returns false when already on the last page
    pub fn next_page(&mut self) -> bool {
        if self.current_page < self.total_pages() {
            self.go_to_page(self.current_page + 1);
            true
        } else {
            false
        }
    }

    /// Returns false when already on the first page
    pub fn previous_page(&mut self) -> bool {
        if self.current_page > 1 {
            self.go_to_page(self.current_page - 1);
            true
        } else {
            false
        }
    }

    pub fn view(&self) -> DerivedPage<'_> {
        derive(self.contracts(), &self.filter, self.page_size, self.current_page)
    }

    pub fn total_pages(&self) -> usize {
        self.view().total_pages
    }

    /// `None` when there is something to show or the collection is not loaded
    pub fn empty_state(&self) -> Option<EmptyState> {
        let LoadState::Ready(contracts) = &self.load else {
            return None;
        };
        if contracts.is_empty() {
            Some(EmptyState::NoContracts)
        } else if self.filter.apply(contracts).is_empty() {
            Some(EmptyState::NoMatches)
        } else {
            None
        }
    }

    fn reset_page(&mut self) {
        debug!(filter = ?self.filter, "filter changed, back to page 1");
        self.current_page = 1;
    }
}
