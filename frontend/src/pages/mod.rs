// frontend/src/pages/mod.rs
//
// One module per routed page. `render` rebuilds `#page-root` for the
// current route.

pub mod chat;
pub mod files;
pub mod knowledgebase_chat;
pub mod knowledgebase_embeddings;
pub mod knowledgebase_settings;
pub mod not_found;
pub mod ocr;

use wasm_bindgen::JsValue;
use web_sys::Document;

use crate::constants::ID_PAGE_ROOT;
use crate::dom_utils;
use crate::router::Route;
use crate::state::{AppState, ChatTarget};

pub fn render(document: &Document, state: &AppState) -> Result<(), JsValue> {
    let root = dom_utils::by_id(document, ID_PAGE_ROOT)?;
    let focus = dom_utils::store_focus(document);
    dom_utils::clear(&root);

    let page = match &state.route {
        Route::Chat => chat::build(document, state)?,
        Route::KnowledgeBaseChat => knowledgebase_chat::build(document, state)?,
        Route::KnowledgeBaseSettings => knowledgebase_settings::build(document, state)?,
        Route::Files => files::build(document, state)?,
        Route::Embeddings => knowledgebase_embeddings::build(document, state)?,
        Route::Ocr => ocr::build(document, state)?,
        Route::NotFound(path) => not_found::build(document, state, path)?,
    };
    root.append_child(&page)?;

    // Chat pages fill the transcript and button state once attached.
    let chat_target = match state.route {
        Route::Chat => Some(ChatTarget::General),
        Route::KnowledgeBaseChat => Some(ChatTarget::KnowledgeBase),
        _ => None,
    };
    if let Some(target) = chat_target {
        crate::components::chat_transcript::refresh(document, state, target)?;
        chat::refresh_buttons(document, state, target)?;
    }

    dom_utils::restore_focus(document, focus);
    Ok(())
}
