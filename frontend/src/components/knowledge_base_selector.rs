//! `<select>` listing the knowledge bases of the active page.

use wasm_bindgen::JsValue;
use web_sys::{Document, Element};

use crate::dom_utils::{self, el};
use crate::i18n::{t, Language, Label};
use crate::messages::Message;
use crate::state::KbSelection;

pub fn build(document: &Document, kbs: &KbSelection, lang: Language) -> Result<Element, JsValue> {
    let wrapper = el(document, "label", "kb-selector", "")?;
    let caption = el(document, "span", "field-label", t(lang, Label::KnowledgeBase))?;
    wrapper.append_child(&caption)?;

    let select = document.create_element("select")?;
    select.set_attribute("data-testid", "kb-select")?;

    if kbs.list.is_empty() {
        let text = if kbs.loading {
            t(lang, Label::Loading)
        } else {
            t(lang, Label::NoKnowledgeBases)
        };
        let option = el(document, "option", "", text)?;
        option.set_attribute("value", "")?;
        select.append_child(&option)?;
        dom_utils::set_disabled(&select, true)?;
    } else {
        if kbs.selected.is_none() {
            let placeholder = el(document, "option", "", t(lang, Label::SelectKnowledgeBase))?;
            placeholder.set_attribute("value", "")?;
            placeholder.set_attribute("selected", "")?;
            select.append_child(&placeholder)?;
        }
        for kb in &kbs.list {
            let option = el(document, "option", "", &kb.name)?;
            option.set_attribute("value", &kb.id.to_string())?;
            if kbs.is_selected(kb.id) {
                option.set_attribute("selected", "")?;
            }
            select.append_child(&option)?;
        }
    }

    dom_utils::on_value(&select, "change", |value| {
        value.parse::<i64>().ok().map(Message::SelectKnowledgeBase)
    })?;
    wrapper.append_child(&select)?;
    Ok(wrapper)
}
