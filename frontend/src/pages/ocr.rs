//! Image upload for text recognition.

use wasm_bindgen::JsValue;
use web_sys::{Document, Element};

use crate::constants::{ID_OCR_INPUT, ID_OCR_OUTPUT, ID_OCR_SUBMIT};
use crate::dom_utils::{self, el};
use crate::i18n::{t, Label};
use crate::messages::Message;
use crate::state::AppState;

pub fn build(document: &Document, state: &AppState) -> Result<Element, JsValue> {
    let lang = state.language;
    let page = el(document, "div", "ocr-page", "")?;

    let picker = el(document, "label", "btn btn-primary file-picker", "")?;
    picker.set_id(ID_OCR_SUBMIT);
    let caption = if state.ocr.busy {
        t(lang, Label::Uploading)
    } else {
        t(lang, Label::OcrChooseImage)
    };
    let caption_el = el(document, "span", "", caption)?;
    picker.append_child(&caption_el)?;

    let input = document.create_element("input")?;
    input.set_id(ID_OCR_INPUT);
    input.set_class_name("visually-hidden");
    input.set_attribute("type", "file")?;
    input.set_attribute("accept", "image/*")?;
    dom_utils::set_disabled(&input, state.ocr.busy)?;
    dom_utils::on_file(&input, Message::SubmitOcr)?;
    picker.append_child(&input)?;
    if state.ocr.busy {
        picker.set_attribute("aria-disabled", "true")?;
    }
    page.append_child(&picker)?;

    let label = el(document, "label", "field-label", t(lang, Label::OcrResult))?;
    label.set_attribute("for", ID_OCR_OUTPUT)?;
    page.append_child(&label)?;
    let output = el(document, "textarea", "ocr-output", "")?;
    output.set_id(ID_OCR_OUTPUT);
    output.set_attribute("readonly", "")?;
    output.set_attribute("rows", "16")?;
    output.set_text_content(Some(&state.ocr.output));
    page.append_child(&output)?;

    Ok(page)
}
