//! Contract list view
//!
//! Wraps [`DashboardState`]: JS forwards the search box, the two selects and
//! the pagination buttons, then re-renders from `getPage()`.

use dashboard_core::dashboard::LOAD_FAILED_MESSAGE;
use dashboard_core::filter::{risk_options, status_options};
use dashboard_core::source::parse_contracts;
use dashboard_core::{
    ContractDetail, ContractRow, DashboardConfig, DashboardError, DashboardState, EmptyState,
    LoadState, PageSummary,
};
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::detail::ContractDetailView;

/// Everything the list page renders
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageView {
    /// "loading", "failed" or "ready"
    pub load: &'static str,
    /// Set when the load failed; the UI shows it next to a retry button
    pub error: Option<String>,
    pub rows: Vec<ContractRow>,
    pub summary: PageSummary,
    pub page_numbers: Vec<usize>,
    pub empty: Option<EmptyView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmptyView {
    pub kind: EmptyState,
    pub message: &'static str,
    pub offers_upload: bool,
}

impl From<EmptyState> for EmptyView {
    fn from(kind: EmptyState) -> Self {
        Self {
            kind,
            message: kind.message(),
            offers_upload: kind.offers_upload(),
        }
    }
}

#[wasm_bindgen]
pub struct ContractDashboard {
    config: DashboardConfig,
    state: DashboardState,
}

impl Default for ContractDashboard {
    fn default() -> Self {
        Self::from_config(DashboardConfig::default())
    }
}

impl ContractDashboard {
    fn from_config(config: DashboardConfig) -> Self {
        let state = DashboardState::new(config.page_size());
        Self { config, state }
    }

    /// Parse a config document (testable without JsValue)
    fn with_config_internal(json: &str) -> Result<Self, String> {
        DashboardConfig::from_json(json)
            .map(Self::from_config)
            .map_err(|e| e.to_string())
    }

    fn load_json_internal(&mut self, body: &str) -> bool {
        self.state.finish_load(parse_contracts(body));
        matches!(self.state.load_state(), LoadState::Ready(_))
    }

    fn page_view_internal(&self) -> PageView {
        let (load, error) = match self.state.load_state() {
            LoadState::Loading => ("loading", None),
            LoadState::Failed(message) => ("failed", Some(message.clone())),
            LoadState::Ready(_) => ("ready", None),
        };
        let page = self.state.view();

        PageView {
            load,
            error,
            rows: page.contracts.iter().map(|c| ContractRow::from(*c)).collect(),
            page_numbers: page.summary.page_numbers(),
            summary: page.summary,
            empty: self.state.empty_state().map(EmptyView::from),
        }
    }

    fn open_detail_internal(&self, id: &str) -> Result<ContractDetail, DashboardError> {
        let catalog = self
            .state
            .catalog()
            .ok_or_else(|| DashboardError::NotFound(id.to_string()))?;
        ContractDetail::from_catalog(&catalog, id)
    }
}

#[wasm_bindgen]
impl ContractDashboard {
    /// Dashboard with the default configuration
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self::default()
    }

    /// Dashboard configured from a JSON document; `{}` gives the defaults
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(json: &str) -> Result<ContractDashboard, JsValue> {
        Self::with_config_internal(json).map_err(|e| JsValue::from_str(&e))
    }

    #[wasm_bindgen(getter, js_name = dataUrl)]
    pub fn data_url(&self) -> String {
        self.config.data_url.clone()
    }

    #[wasm_bindgen(getter, js_name = pageSize)]
    pub fn page_size(&self) -> usize {
        self.state.page_size().get()
    }

    /// Back to the loading state before a retry
    #[wasm_bindgen(js_name = beginLoad)]
    pub fn begin_load(&mut self) {
        self.state.begin_load();
    }

    /// Install the fetched document. Returns false and enters the failed
    /// state when the body is not a valid contract list.
    #[wasm_bindgen(js_name = loadJson)]
    pub fn load_json(&mut self, body: &str) -> bool {
        let ready = self.load_json_internal(body);
        if ready {
            crate::log(&format!("Loaded {} contracts", self.state.contracts().len()));
        } else {
            crate::log("Contract document could not be parsed");
        }
        ready
    }

    /// Record a failed fetch
    #[wasm_bindgen(js_name = failLoad)]
    pub fn fail_load(&mut self, message: &str) {
        crate::log(&format!("Contract fetch failed: {}", message));
        self.state
            .finish_load(Err(DashboardError::Fetch(message.to_string())));
    }

    #[wasm_bindgen(getter, js_name = isLoading)]
    pub fn is_loading(&self) -> bool {
        matches!(self.state.load_state(), LoadState::Loading)
    }

    /// The user-facing load failure message, if the load failed
    #[wasm_bindgen(getter, js_name = loadError)]
    pub fn load_error(&self) -> Option<String> {
        match self.state.load_state() {
            LoadState::Failed(_) => Some(LOAD_FAILED_MESSAGE.to_string()),
            _ => None,
        }
    }

    #[wasm_bindgen(js_name = setSearchTerm)]
    pub fn set_search_term(&mut self, term: &str) {
        self.state.set_search_term(term);
    }

    /// `label` is one of `statusOptions()`; anything else throws and leaves
    /// the filter unchanged
    #[wasm_bindgen(js_name = setStatusFilter)]
    pub fn set_status_filter(&mut self, label: &str) -> Result<(), JsValue> {
        self.state
            .select_status(label)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    #[wasm_bindgen(js_name = setRiskFilter)]
    pub fn set_risk_filter(&mut self, label: &str) -> Result<(), JsValue> {
        self.state
            .select_risk(label)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    #[wasm_bindgen(js_name = statusOptions)]
    pub fn status_options(&self) -> Vec<String> {
        status_options().iter().map(ToString::to_string).collect()
    }

    #[wasm_bindgen(js_name = riskOptions)]
    pub fn risk_options(&self) -> Vec<String> {
        risk_options().iter().map(ToString::to_string).collect()
    }

    #[wasm_bindgen(js_name = goToPage)]
    pub fn go_to_page(&mut self, page: usize) {
        self.state.go_to_page(page);
    }

    #[wasm_bindgen(js_name = nextPage)]
    pub fn next_page(&mut self) -> bool {
        self.state.next_page()
    }

    #[wasm_bindgen(js_name = previousPage)]
    pub fn previous_page(&mut self) -> bool {
        self.state.previous_page()
    }

    #[wasm_bindgen(getter, js_name = currentPage)]
    pub fn current_page(&self) -> usize {
        self.state.current_page()
    }

    #[wasm_bindgen(getter, js_name = totalPages)]
    pub fn total_pages(&self) -> usize {
        self.state.total_pages()
    }

    /// Rows, footer summary and empty state for the current page
    #[wasm_bindgen(js_name = getPage)]
    pub fn get_page(&self) -> Result<JsValue, JsValue> {
        crate::to_js(&self.page_view_internal())
    }

    /// Detail view for a loaded contract. Throws "Contract not found" for an
    /// unknown id.
    #[wasm_bindgen(js_name = openDetail)]
    pub fn open_detail(&self, id: &str) -> Result<ContractDetailView, JsValue> {
        self.open_detail_internal(id)
            .map(ContractDetailView::from)
            .map_err(crate::detail::detail_error)
    }
}

/// Create a dashboard and run its initial fetch. Fetch and parse failures
/// put the dashboard in the failed state instead of rejecting.
#[wasm_bindgen(js_name = loadDashboard)]
pub async fn load_dashboard(config_json: Option<String>) -> Result<ContractDashboard, JsValue> {
    let mut dashboard = match config_json {
        Some(json) => ContractDashboard::with_config(&json)?,
        None => ContractDashboard::new(),
    };

    let result = crate::fetch::fetch_contracts(&dashboard.config.data_url).await;
    if let Err(err) = &result {
        crate::log(&format!("Contract load failed: {}", err));
    }
    dashboard.state.finish_load(result);
    Ok(dashboard)
}
