// frontend/src/views.rs
//
// Renders the parts of the UI named by a `View` from the current state.
// Every call takes a shared borrow of `APP_STATE`; nothing here dispatches
// messages synchronously.
//
use wasm_bindgen::JsValue;
use web_sys::Document;

use crate::constants::{ID_APP_CONTAINER, ID_DIALOG_ROOT, ID_NAVBAR, ID_PAGE_ROOT};
use crate::dom_utils::{self, rebuild_scope, ListenerScope};
use crate::messages::View;
use crate::state::APP_STATE;

pub fn render(view: View) -> Result<(), JsValue> {
    let document = dom_utils::document()?;
    APP_STATE.with(|state| {
        let state = state.borrow();
        match view {
            View::Navbar => rebuild_scope(ListenerScope::Navbar, || {
                crate::components::navbar::render(&document, &state)
            }),
            View::Page => rebuild_scope(ListenerScope::Page, || crate::pages::render(&document, &state)),
            View::ChatTranscript(target) => {
                crate::components::chat_transcript::refresh(&document, &state, target)?;
                crate::pages::chat::refresh_buttons(&document, &state, target)
            }
            View::ChatControls(target) => {
                crate::components::sampling_controls::refresh(&document, state.sampling(target))?;
                crate::pages::chat::refresh_buttons(&document, &state, target)
            }
            View::Dialog => rebuild_scope(ListenerScope::Dialog, || {
                crate::components::dialog::render(&document, &state)
            }),
        }
    })
}

/// Build the static shell: navbar, page root and dialog root inside
/// `#app-container`.
pub fn create_shell(document: &Document) -> Result<(), JsValue> {
    let body = document
        .body()
        .ok_or_else(|| JsValue::from_str("document has no body"))?;

    let container = match document.get_element_by_id(ID_APP_CONTAINER) {
        Some(el) => el,
        None => {
            let el = document.create_element("div")?;
            el.set_id(ID_APP_CONTAINER);
            body.append_child(&el)?;
            el
        }
    };
    dom_utils::clear(&container);

    let navbar = document.create_element("header")?;
    navbar.set_id(ID_NAVBAR);
    navbar.set_class_name("navbar");
    container.append_child(&navbar)?;

    let page = document.create_element("main")?;
    page.set_id(ID_PAGE_ROOT);
    page.set_class_name("page");
    container.append_child(&page)?;

    let dialog = document.create_element("div")?;
    dialog.set_id(ID_DIALOG_ROOT);
    container.append_child(&dialog)?;

    Ok(())
}
