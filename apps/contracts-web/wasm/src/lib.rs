//! WASM bindings for the contract dashboard
//!
//! All state is held in Rust. JavaScript only handles DOM events, rendering
//! and file I/O, and reads view models back as plain objects.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { AuthSession, ContractDashboard, UploadDialog, fetchContracts }
//!     from './pkg/contracts_wasm.js';
//!
//! await init();
//!
//! const auth = new AuthSession();
//! if (!auth.isAuthenticated) auth.login(username, password);
//!
//! const dashboard = new ContractDashboard();
//! try {
//!     dashboard.loadJson(await fetchContracts(dashboard.dataUrl));
//! } catch (e) {
//!     dashboard.failLoad(String(e));
//! }
//! dashboard.setSearchTerm("acme");
//! render(dashboard.getPage());
//!
//! const upload = new UploadDialog();
//! upload.setChangeCallback(() => renderFiles(upload.getFiles()));
//! upload.addFiles(input.files);
//! ```

pub mod auth;
pub mod dashboard;
pub mod detail;
pub mod fetch;
pub mod storage;
pub mod upload;

use serde::Serialize;
use wasm_bindgen::prelude::*;

pub use auth::AuthSession;
pub use dashboard::ContractDashboard;
pub use detail::ContractDetailView;
pub use storage::LocalStorage;
pub use upload::UploadDialog;

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    log("Contracts WASM initialized");
}

/// Get the library version
#[wasm_bindgen]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// `0 Bytes`, `1.5 KB`, `2 MB`
#[wasm_bindgen(js_name = formatFileSize)]
pub fn format_file_size(bytes: f64) -> String {
    dashboard_core::format_file_size(bytes.max(0.0) as u64)
}

/// Write a line to the browser console. A no-op off wasm so the internals
/// stay testable natively.
pub(crate) fn log(message: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::log_1(&message.into());
    #[cfg(not(target_arch = "wasm32"))]
    let _ = message;
}

pub(crate) fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}
