//! Chat grounded in the selected knowledge base.

use wasm_bindgen::JsValue;
use web_sys::{Document, Element};

use crate::components::knowledge_base_selector;
use crate::state::{AppState, ChatTarget};

pub fn build(document: &Document, state: &AppState) -> Result<Element, JsValue> {
    let selector = knowledge_base_selector::build(document, &state.kb_chat.kbs, state.language)?;
    super::chat::build_layout(document, state, ChatTarget::KnowledgeBase, Some(selector))
}
