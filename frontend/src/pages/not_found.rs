use wasm_bindgen::JsValue;
use web_sys::{Document, Element};

use crate::dom_utils::{self, el};
use crate::i18n::{t, Label};
use crate::messages::Message;
use crate::router::Route;
use crate::state::AppState;

pub fn build(document: &Document, state: &AppState, path: &str) -> Result<Element, JsValue> {
    let lang = state.language;
    let page = el(document, "div", "not-found", "")?;
    let title = el(document, "h1", "not-found-title", t(lang, Label::NotFoundTitle))?;
    page.append_child(&title)?;
    let path_el = el(document, "code", "not-found-path", path)?;
    page.append_child(&path_el)?;

    let home = el(document, "a", "btn btn-primary", t(lang, Label::NotFoundLink))?;
    home.set_attribute("href", "/")?;
    dom_utils::on_click(&home, || Message::Navigate(Route::Chat))?;
    page.append_child(&home)?;
    Ok(page)
}
