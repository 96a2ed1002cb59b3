pub mod api_client;
pub mod chat_stream;
pub mod config;
pub mod error;
pub mod sse;

pub use api_client::ApiClient;
pub use config::ApiConfig;
pub use error::ApiError;

use std::sync::RwLock;

use lazy_static::lazy_static;
use wasm_bindgen::prelude::*;

lazy_static! {
    static ref API_CONFIG: RwLock<ApiConfig> = RwLock::new(ApiConfig::default());
}

/// Replace the backend location. Empty string means same origin.
pub fn init_api_config(base_url: &str) {
    match API_CONFIG.write() {
        Ok(mut cfg) => *cfg = ApiConfig::from_url(base_url),
        Err(e) => crate::error_log!("API config lock poisoned: {}", e),
    }
}

/// JS entry point so the hosting page can point the console at another
/// backend before the first request goes out.
#[wasm_bindgen]
pub fn init_api_config_js(base_url: &str) {
    init_api_config(base_url);
    crate::debug_log!("API base URL set to '{}'", base_url);
}

/// Pick up a non-empty `window.API_BASE_URL` when the hosting page defines
/// one; the compile-time default stays otherwise.
pub fn load_runtime_config() {
    let Some(window) = web_sys::window() else {
        return;
    };
    let value = js_sys::Reflect::get(&window, &JsValue::from_str("API_BASE_URL")).ok();
    let base_url = value
        .and_then(|v| v.as_string())
        .filter(|v| !v.trim().is_empty());
    if let Some(base_url) = base_url {
        init_api_config(&base_url);
        crate::debug_log!("API base URL from window: '{}'", base_url);
    }
}

/// Full URL for a `/v1` path using the current configuration.
pub(crate) fn api_url(path: &str) -> String {
    match API_CONFIG.read() {
        Ok(cfg) => cfg.url(path),
        Err(poisoned) => poisoned.into_inner().url(path),
    }
}
