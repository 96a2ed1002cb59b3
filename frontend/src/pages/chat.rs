//! Chat playground: transcript and prompt on the left, instructions and
//! sampling sliders on the right. The knowledge-base chat page reuses the
//! same layout with a KB selector on top of the sidebar.

use wasm_bindgen::JsValue;
use web_sys::{Document, Element};

use crate::components::{chat_transcript, sampling_controls};
use crate::constants::{
    ID_CHAT_CLEAR, ID_CHAT_INPUT, ID_CHAT_INSTRUCTIONS, ID_CHAT_SEND, ID_CHAT_SIDEBAR,
};
use crate::dom_utils::{self, button, el};
use crate::i18n::{t, Label};
use crate::messages::Message;
use crate::state::{AppState, ChatTarget};

pub fn build(document: &Document, state: &AppState) -> Result<Element, JsValue> {
    build_layout(document, state, ChatTarget::General, None)
}

pub(crate) fn build_layout(
    document: &Document,
    state: &AppState,
    target: ChatTarget,
    sidebar_top: Option<Element>,
) -> Result<Element, JsValue> {
    let lang = state.language;
    let session = state.session(target);
    let page = el(document, "div", "chat-page", "")?;

    // Main column ----------------------------------------------------------
    let main = el(document, "section", "chat-main", "")?;
    let transcript = chat_transcript::build(document)?;
    main.append_child(&transcript)?;

    let form = el(document, "form", "chat-form", "")?;
    let input = el(document, "textarea", "chat-input", "")?;
    input.set_id(ID_CHAT_INPUT);
    input.set_attribute("rows", "4")?;
    input.set_attribute("placeholder", t(lang, Label::PromptPlaceholder))?;
    input.set_text_content(Some(session.input()));
    dom_utils::on_value(&input, "input", move |text| {
        Some(Message::ChatInputChanged { target, text })
    })?;
    dom_utils::on_enter(&input, move || Message::SubmitChat(target))?;
    form.append_child(&input)?;

    let actions = el(document, "div", "chat-actions", "")?;
    let send = el(document, "button", "btn btn-primary", t(lang, Label::Send))?;
    send.set_id(ID_CHAT_SEND);
    send.set_attribute("type", "submit")?;
    actions.append_child(&send)?;
    let clear = button(document, "btn btn-outline", t(lang, Label::Clear))?;
    clear.set_id(ID_CHAT_CLEAR);
    dom_utils::on_click(&clear, move || Message::ClearChat(target))?;
    actions.append_child(&clear)?;
    form.append_child(&actions)?;

    dom_utils::on_submit(&form, move || Message::SubmitChat(target))?;
    main.append_child(&form)?;
    page.append_child(&main)?;

    // Sidebar --------------------------------------------------------------
    let sidebar = el(document, "aside", "chat-sidebar", "")?;
    sidebar.set_id(ID_CHAT_SIDEBAR);
    if let Some(top) = sidebar_top {
        sidebar.append_child(&top)?;
    }

    let label = el(document, "label", "field-label", t(lang, Label::Instructions))?;
    label.set_attribute("for", ID_CHAT_INSTRUCTIONS)?;
    sidebar.append_child(&label)?;
    let instructions = el(document, "textarea", "chat-instructions", "")?;
    instructions.set_id(ID_CHAT_INSTRUCTIONS);
    instructions.set_attribute("rows", "6")?;
    instructions.set_attribute("placeholder", t(lang, Label::InstructionsPlaceholder))?;
    instructions.set_text_content(Some(session.instructions()));
    dom_utils::on_value(&instructions, "input", move |text| {
        Some(Message::InstructionsChanged { target, text })
    })?;
    sidebar.append_child(&instructions)?;

    let sampling = sampling_controls::build(document, target, state.sampling(target), lang)?;
    sidebar.append_child(&sampling)?;
    page.append_child(&sidebar)?;

    Ok(page)
}

/// Sync the send button and prompt text with the session without
/// rebuilding the page.
pub fn refresh_buttons(document: &Document, state: &AppState, target: ChatTarget) -> Result<(), JsValue> {
    let session = state.session(target);
    let blocked = match target {
        ChatTarget::General => false,
        ChatTarget::KnowledgeBase => state.kb_chat.kbs.selected.is_none(),
    };

    if let Some(send) = document.get_element_by_id(ID_CHAT_SEND) {
        dom_utils::set_disabled(&send, blocked || !session.can_submit())?;
        send.set_attribute("aria-busy", if session.is_streaming() { "true" } else { "false" })?;
    }
    if let Some(input) = document.get_element_by_id(ID_CHAT_INPUT) {
        dom_utils::set_control_value(&input, session.input());
    }
    Ok(())
}
