use wasm_bindgen::prelude::*;

#[macro_use]
mod macros;
pub mod chat_session;
pub mod command_executors;
pub mod components;
pub mod constants;
pub mod dom_utils;
pub mod i18n;
pub mod messages; // Message / Command enums
pub mod models;
pub mod network;
pub mod pages;
pub mod reducers;
pub mod router;
pub mod schema_validation;
pub mod state;
pub mod storage;
pub mod styles;
pub mod table;
pub mod toast;
pub mod update; // Root reducer
pub mod utils;
pub mod views;

pub use network::init_api_config_js;

// Main entry point for the WASM application
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    // Initialize better panic messages
    console_error_panic_hook::set_once();

    let document = dom_utils::document()?;
    network::load_runtime_config();

    // Restore the two persisted preferences before the first render.
    let theme = storage::load_theme();
    let language = storage::load_language();
    state::APP_STATE.with(|state| {
        let mut state = state.borrow_mut();
        state.theme = theme;
        state.language = language;
    });
    if let Err(e) = storage::apply_theme(theme) {
        warn_log!("Failed to apply stored theme: {:?}", e);
    }

    styles::ensure_styles(&document)?;
    views::create_shell(&document)?;
    router::install_popstate_listener()?;

    debug_log!("Starting console at {}", router::current_route().path());
    state::dispatch_global_message(messages::Message::RouteChanged(router::current_route()));

    Ok(())
}
