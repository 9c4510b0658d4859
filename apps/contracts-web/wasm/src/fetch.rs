//! One-shot fetch of the contract collection

use contract_types::Contract;
use dashboard_core::source::{check_status, network_error, parse_contracts};
use dashboard_core::DashboardError;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

use crate::storage::describe;

/// JSON GET for `url`, allowed to cross origins
fn json_request(url: &str) -> Result<Request, DashboardError> {
    let opts = RequestInit::new();
    opts.set_method("GET");
    opts.set_mode(RequestMode::Cors);

    let request =
        Request::new_with_str_and_init(url, &opts).map_err(|e| network_error(url, &describe(&e)))?;
    request
        .headers()
        .set("Accept", "application/json")
        .map_err(|e| network_error(url, &describe(&e)))?;
    Ok(request)
}

/// GET `url` and return the body text. Network failures and non-2xx
/// statuses are `Fetch` errors.
pub async fn fetch_text(url: &str) -> Result<String, DashboardError> {
    let window = web_sys::window().ok_or_else(|| network_error(url, "No window"))?;
    let request = json_request(url)?;

    let response = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| network_error(url, &describe(&e)))?;
    let response: Response = response
        .dyn_into()
        .map_err(|e| network_error(url, &describe(&e)))?;

    check_status(url, response.status(), &response.status_text())?;

    let body = response
        .text()
        .map_err(|e| network_error(url, &describe(&e)))?;
    let body = JsFuture::from(body)
        .await
        .map_err(|e| network_error(url, &describe(&e)))?;
    body.as_string()
        .ok_or_else(|| network_error(url, "response body is not text"))
}

/// Fetch and parse the collection
pub async fn fetch_contracts(url: &str) -> Result<Vec<Contract>, DashboardError> {
    let body = fetch_text(url).await?;
    parse_contracts(&body)
}

/// Fetch the raw contracts document for `ContractDashboard.loadJson` or
/// `ContractDetailView.fromJson`. Rejects with the error message.
#[wasm_bindgen(js_name = fetchContracts)]
pub async fn fetch_contracts_js(url: String) -> Result<String, JsValue> {
    let body = fetch_text(&url)
        .await
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    crate::log(&format!("Fetched {} ({} bytes)", url, body.len()));
    Ok(body)
}

#[cfg(test)]
#[cfg(target_arch = "wasm32")]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_request_allows_cross_origin_data_url() {
        let request = json_request("https://data.example.org/contracts.json").unwrap();
        assert_eq!(request.mode(), RequestMode::Cors);
        assert_eq!(request.method(), "GET");
        assert_eq!(
            request.headers().get("Accept").unwrap().as_deref(),
            Some("application/json")
        );
    }
}
