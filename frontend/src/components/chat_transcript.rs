//! Scrollable list of chat turns plus the pending assistant output.

use wasm_bindgen::JsValue;
use web_sys::{Document, Element};

use crate::constants::ID_CHAT_TRANSCRIPT;
use crate::dom_utils::{self, el};
use crate::models::ChatRole;
use crate::state::{AppState, ChatTarget};

pub fn build(document: &Document) -> Result<Element, JsValue> {
    let list = el(document, "div", "chat-transcript", "")?;
    list.set_id(ID_CHAT_TRANSCRIPT);
    list.set_attribute("aria-live", "polite")?;
    Ok(list)
}

/// Rebuild the transcript rows of `target` and keep the view scrolled to the
/// newest entry.
pub fn refresh(document: &Document, state: &AppState, target: ChatTarget) -> Result<(), JsValue> {
    let Some(list) = document.get_element_by_id(ID_CHAT_TRANSCRIPT) else {
        return Ok(());
    };
    dom_utils::clear(&list);

    let session = state.session(target);
    for entry in session.history() {
        let row = message_row(document, entry.role, &entry.content)?;
        row.set_attribute("data-key", &entry.key.to_string())?;
        list.append_child(&row)?;
    }
    if !session.scratch().is_empty() || session.is_streaming() {
        let row = message_row(document, ChatRole::Assistant, session.scratch())?;
        row.class_list().add_1("chat-message-pending")?;
        if session.is_streaming() {
            row.class_list().add_1("chat-message-streaming")?;
        }
        list.append_child(&row)?;
    }

    list.set_scroll_top(list.scroll_height());
    Ok(())
}

fn message_row(document: &Document, role: ChatRole, content: &str) -> Result<Element, JsValue> {
    let row = el(document, "div", &format!("chat-message chat-message-{}", role.as_str()), "")?;
    let role_el = el(document, "div", "chat-role", role.as_str())?;
    row.append_child(&role_el)?;
    // Text content only; model output is never interpreted as markup.
    let body = el(document, "div", "chat-content", "")?;
    body.set_text_content(Some(content));
    row.append_child(&body)?;
    Ok(row)
}
