use thiserror::Error;
use wasm_bindgen::JsValue;

/// Everything that can go wrong talking to the backend.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// fetch() rejected before a response arrived.
    #[error("network error: {0}")]
    Network(String),

    #[error("request failed: {status} {text}")]
    Status { status: u16, text: String },

    #[error("stream error: {0}")]
    Stream(String),

    #[error("unexpected response: {0}")]
    Decode(String),

    #[error("browser error: {0}")]
    Dom(String),
}

impl ApiError {
    pub(crate) fn from_js(kind: fn(String) -> ApiError, value: JsValue) -> ApiError {
        let text = value
            .as_string()
            .or_else(|| {
                js_sys::Reflect::get(&value, &JsValue::from_str("message"))
                    .ok()
                    .and_then(|m| m.as_string())
            })
            .unwrap_or_else(|| format!("{:?}", value));
        kind(text)
    }

    /// True when the request was cancelled through an `AbortSignal`.
    pub fn is_abort(&self) -> bool {
        match self {
            ApiError::Network(msg) | ApiError::Stream(msg) => msg.to_lowercase().contains("abort"),
            _ => false,
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

impl From<ApiError> for JsValue {
    fn from(err: ApiError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
