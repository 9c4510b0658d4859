//! Mock login backed by localStorage

use dashboard_core::config::DEFAULT_DEMO_PASSWORD;
use dashboard_core::SessionManager;
use wasm_bindgen::prelude::*;

use crate::storage::LocalStorage;

#[wasm_bindgen]
pub struct AuthSession {
    manager: SessionManager<LocalStorage>,
}

#[wasm_bindgen]
impl AuthSession {
    /// Open the session store and pick up a persisted login, if any.
    /// `demo_password` defaults to the built-in demo password.
    #[wasm_bindgen(constructor)]
    pub fn new(demo_password: Option<String>) -> Result<AuthSession, JsValue> {
        let store = LocalStorage::open().map_err(|e| JsValue::from_str(&e.to_string()))?;
        let password = demo_password.unwrap_or_else(|| DEFAULT_DEMO_PASSWORD.to_string());
        let mut manager = SessionManager::new(store, password);

        if manager
            .restore()
            .map_err(|e| JsValue::from_str(&e.to_string()))?
        {
            crate::log("Restored saved session");
        }
        Ok(Self { manager })
    }

    /// Throws "Invalid username or password" on a wrong password
    pub fn login(&mut self, username: &str, password: &str) -> Result<(), JsValue> {
        let issued_at_ms = js_sys::Date::now() as u64;
        self.manager
            .login(username, password, issued_at_ms)
            .map(|_| ())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn logout(&mut self) -> Result<(), JsValue> {
        self.manager
            .logout()
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    #[wasm_bindgen(getter, js_name = isAuthenticated)]
    pub fn is_authenticated(&self) -> bool {
        self.manager.is_authenticated()
    }

    #[wasm_bindgen(getter)]
    pub fn username(&self) -> Option<String> {
        self.manager.username().map(str::to_string)
    }

    #[wasm_bindgen(getter)]
    pub fn token(&self) -> Option<String> {
        self.manager.session().map(|s| s.token.clone())
    }
}
