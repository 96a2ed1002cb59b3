//! Modal dialogs for creating and deleting knowledge bases.
//!
//! Rendered into `#dialog-root`; an empty root means no dialog is open.

use wasm_bindgen::JsValue;
use web_sys::{Document, Element};

use crate::constants::ID_DIALOG_ROOT;
use crate::dom_utils::{self, button, el};
use crate::i18n::{t, Label, Language};
use crate::messages::Message;
use crate::state::{AppState, Dialog};

pub fn render(document: &Document, state: &AppState) -> Result<(), JsValue> {
    let root = dom_utils::by_id(document, ID_DIALOG_ROOT)?;
    dom_utils::clear(&root);
    let Some(dialog) = &state.dialog else {
        return Ok(());
    };
    let lang = state.language;

    let (backdrop, content) = shell(document)?;
    match dialog {
        Dialog::CreateKnowledgeBase { name } => create_body(document, &content, name, lang)?,
        Dialog::ConfirmDeleteKnowledgeBase { kb_id, name } => {
            delete_body(document, &content, *kb_id, name, lang)?
        }
    }
    root.append_child(&backdrop)?;
    dom_utils::focus_first_interactive(&content);
    Ok(())
}

/// Backdrop plus content panel. Clicking the backdrop closes the dialog.
fn shell(document: &Document) -> Result<(Element, Element), JsValue> {
    let backdrop = el(document, "div", "modal", "")?;
    backdrop.set_attribute("role", "dialog")?;
    backdrop.set_attribute("aria-modal", "true")?;
    let content = el(document, "div", "modal-content", "")?;
    backdrop.append_child(&content)?;

    let backdrop_js: JsValue = backdrop.clone().into();
    dom_utils::on_click_if(
        &backdrop,
        move |event| event.target().map_or(false, |t| JsValue::from(t) == backdrop_js),
        || Message::CloseDialog,
    )?;
    Ok((backdrop, content))
}

fn create_body(document: &Document, content: &Element, name: &str, lang: Language) -> Result<(), JsValue> {
    let title = el(document, "h2", "modal-title", t(lang, Label::CreateKnowledgeBase))?;
    content.append_child(&title)?;

    let form = el(document, "form", "modal-form", "")?;
    let label = el(document, "label", "field-label", t(lang, Label::Name))?;
    label.set_attribute("for", "kb-name-input")?;
    form.append_child(&label)?;

    let input = document.create_element("input")?;
    input.set_id("kb-name-input");
    input.set_attribute("type", "text")?;
    input.set_attribute("autocomplete", "off")?;
    input.set_attribute("value", name)?;
    dom_utils::on_value(&input, "input", |text| Some(Message::DialogInputChanged(text)))?;
    form.append_child(&input)?;

    let actions = el(document, "div", "modal-actions", "")?;
    let cancel = button(document, "btn btn-outline", t(lang, Label::Cancel))?;
    dom_utils::on_click(&cancel, || Message::CloseDialog)?;
    actions.append_child(&cancel)?;
    let create = el(document, "button", "btn btn-primary", t(lang, Label::Create))?;
    create.set_attribute("type", "submit")?;
    actions.append_child(&create)?;
    form.append_child(&actions)?;

    dom_utils::on_submit(&form, || Message::ConfirmCreateKnowledgeBase)?;
    content.append_child(&form)?;
    Ok(())
}

fn delete_body(
    document: &Document,
    content: &Element,
    kb_id: i64,
    name: &str,
    lang: Language,
) -> Result<(), JsValue> {
    let title = el(document, "h2", "modal-title", t(lang, Label::DeleteKnowledgeBase))?;
    content.append_child(&title)?;
    let name_el = el(document, "p", "modal-name", name)?;
    content.append_child(&name_el)?;
    let description = el(document, "p", "modal-description", t(lang, Label::DeleteKnowledgeBaseConfirm))?;
    content.append_child(&description)?;

    let actions = el(document, "div", "modal-actions", "")?;
    let cancel = button(document, "btn btn-outline", t(lang, Label::Cancel))?;
    dom_utils::on_click(&cancel, || Message::CloseDialog)?;
    actions.append_child(&cancel)?;
    let delete = button(document, "btn btn-danger", t(lang, Label::Delete))?;
    dom_utils::on_click(&delete, move || Message::ConfirmDeleteKnowledgeBase(kb_id))?;
    actions.append_child(&delete)?;
    content.append_child(&actions)?;
    Ok(())
}
