//! Contract detail page

use dashboard_core::detail::NOT_FOUND_MESSAGE;
use dashboard_core::{ContractCatalog, ContractDetail, DashboardError, DetailModel};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub struct ContractDetailView {
    detail: ContractDetail,
}

impl From<ContractDetail> for ContractDetailView {
    fn from(detail: ContractDetail) -> Self {
        Self { detail }
    }
}

/// Unknown ids surface as the page's "Contract not found" message
pub(crate) fn detail_error(err: DashboardError) -> JsValue {
    match err {
        DashboardError::NotFound(_) => JsValue::from_str(NOT_FOUND_MESSAGE),
        other => JsValue::from_str(&other.to_string()),
    }
}

impl ContractDetailView {
    fn from_json_internal(body: &str, id: &str) -> Result<Self, DashboardError> {
        let catalog = ContractCatalog::from_json(body)?;
        ContractDetail::from_catalog(&catalog, id).map(Self::from)
    }

    fn model_internal(&self) -> DetailModel {
        self.detail.render()
    }
}

#[wasm_bindgen]
impl ContractDetailView {
    /// Build the view from a freshly fetched contracts document
    #[wasm_bindgen(js_name = fromJson)]
    pub fn from_json(body: &str, id: &str) -> Result<ContractDetailView, JsValue> {
        Self::from_json_internal(body, id).map_err(detail_error)
    }

    #[wasm_bindgen(getter)]
    pub fn id(&self) -> String {
        self.detail.contract().id.clone()
    }

    #[wasm_bindgen(getter, js_name = evidenceVisible)]
    pub fn evidence_visible(&self) -> bool {
        self.detail.evidence_visible()
    }

    /// Show or hide the evidence panel; returns the new visibility
    #[wasm_bindgen(js_name = toggleEvidence)]
    pub fn toggle_evidence(&mut self) -> bool {
        self.detail.toggle_evidence()
    }

    #[wasm_bindgen(js_name = getModel)]
    pub fn get_model(&self) -> Result<JsValue, JsValue> {
        crate::to_js(&self.model_internal())
    }
}
