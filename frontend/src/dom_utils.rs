//! dom_utils.rs – thin helper layer for repetitive DOM operations.
//!
//! Element builders plus small wrappers for disabling, focus and event
//! wiring so views don't repeat the same `Closure` boilerplate.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use gloo_timers::callback::Timeout;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, Element, Event, HtmlElement, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement,
    KeyboardEvent,
};

use crate::messages::Message;
use crate::state::dispatch_global_message;

pub fn document() -> Result<Document, JsValue> {
    web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document on window"))
}

pub fn by_id(document: &Document, id: &str) -> Result<Element, JsValue> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("#{} not found", id)))
}

pub fn set_disabled(el: &Element, disabled: bool) -> Result<(), JsValue> {
    if disabled {
        el.set_attribute("disabled", "")
    } else {
        el.remove_attribute("disabled")
    }
}

/// Remove all children.
pub fn clear(el: &Element) {
    el.set_inner_html("");
}

/// `<tag class="class">text</tag>`; empty class or text is skipped.
pub fn el(document: &Document, tag: &str, class: &str, text: &str) -> Result<Element, JsValue> {
    let e = document.create_element(tag)?;
    if !class.is_empty() {
        e.set_class_name(class);
    }
    if !text.is_empty() {
        e.set_text_content(Some(text));
    }
    Ok(e)
}

pub fn button(document: &Document, class: &str, label: &str) -> Result<Element, JsValue> {
    let b = el(document, "button", class, label)?;
    b.set_attribute("type", "button")?;
    Ok(b)
}

// ---------------------------------------------------------------------------
// Event wiring
// ---------------------------------------------------------------------------

/// Part of the shell whose listeners are replaced together when it is
/// rebuilt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerScope {
    Navbar,
    Page,
    Dialog,
}

type Listener = Closure<dyn FnMut(Event)>;

thread_local! {
    static ACTIVE_SCOPE: Cell<Option<ListenerScope>> = const { Cell::new(None) };
    static LISTENERS: RefCell<HashMap<ListenerScope, Vec<Listener>>> = RefCell::new(HashMap::new());
}

/// Run `build` so that every listener it attaches belongs to `scope`, and
/// release the listeners of the previous build of that scope.
///
/// The old closures are dropped on the next tick: the rebuild usually runs
/// inside one of them.
pub fn rebuild_scope<R>(scope: ListenerScope, build: impl FnOnce() -> R) -> R {
    let stale = LISTENERS.with(|map| map.borrow_mut().remove(&scope));
    if let Some(stale) = stale {
        Timeout::new(0, move || drop(stale)).forget();
    }
    let outer = ACTIVE_SCOPE.with(|active| active.replace(Some(scope)));
    let result = build();
    ACTIVE_SCOPE.with(|active| active.set(outer));
    result
}

/// Number of listeners currently held for `scope`.
pub fn listener_count(scope: ListenerScope) -> usize {
    LISTENERS.with(|map| map.borrow().get(&scope).map_or(0, Vec::len))
}

fn listen<F>(target: &Element, event: &str, handler: F) -> Result<(), JsValue>
where
    F: FnMut(Event) + 'static,
{
    let cb = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    target.add_event_listener_with_callback(event, cb.as_ref().unchecked_ref())?;
    match ACTIVE_SCOPE.with(Cell::get) {
        Some(scope) => LISTENERS.with(|map| map.borrow_mut().entry(scope).or_default().push(cb)),
        // Built outside any scope: lives as long as the page.
        None => cb.forget(),
    }
    Ok(())
}

/// `<details>` opened or closed; `make` receives the new state.
pub fn on_toggle<F>(target: &Element, make: F) -> Result<(), JsValue>
where
    F: Fn(bool) -> Message + 'static,
{
    listen(target, "toggle", move |event| {
        let open = event
            .target()
            .and_then(|t| t.dyn_into::<Element>().ok())
            .is_some_and(|details| details.has_attribute("open"));
        dispatch_global_message(make(open));
    })
}

/// Dispatch the message built by `make` on every click.
pub fn on_click<F>(target: &Element, make: F) -> Result<(), JsValue>
where
    F: Fn() -> Message + 'static,
{
    listen(target, "click", move |event| {
        event.prevent_default();
        dispatch_global_message(make());
    })
}

/// Like [`on_click`] but only when `accept` returns true for the event, e.g.
/// clicks on a backdrop but not on its children.
pub fn on_click_if<P, F>(target: &Element, accept: P, make: F) -> Result<(), JsValue>
where
    P: Fn(&Event) -> bool + 'static,
    F: Fn() -> Message + 'static,
{
    listen(target, "click", move |event| {
        if accept(&event) {
            dispatch_global_message(make());
        }
    })
}

/// Form submit (button click or Enter) without a page reload.
pub fn on_submit<F>(target: &Element, make: F) -> Result<(), JsValue>
where
    F: Fn() -> Message + 'static,
{
    listen(target, "submit", move |event| {
        event.prevent_default();
        dispatch_global_message(make());
    })
}

/// Enter without Shift in a text area submits; Shift+Enter inserts a newline.
pub fn on_enter<F>(target: &Element, make: F) -> Result<(), JsValue>
where
    F: Fn() -> Message + 'static,
{
    listen(target, "keydown", move |event| {
        let Some(key) = event.dyn_ref::<KeyboardEvent>() else {
            return;
        };
        if key.key() == "Enter" && !key.shift_key() && !key.is_composing() {
            event.prevent_default();
            dispatch_global_message(make());
        }
    })
}

/// Dispatch the message built from the control's current value on `event`
/// (`input` or `change`). `make` returns `None` for values it rejects.
pub fn on_value<F>(target: &Element, event: &str, make: F) -> Result<(), JsValue>
where
    F: Fn(String) -> Option<Message> + 'static,
{
    listen(target, event, move |ev| {
        let value = ev.current_target().and_then(|t| control_value(&t));
        if let Some(msg) = value.and_then(|v| make(v)) {
            dispatch_global_message(msg);
        }
    })
}

/// Dispatch a message for the first file picked in an `<input type=file>`,
/// then reset the input so picking the same file again fires `change`.
pub fn on_file<F>(target: &Element, make: F) -> Result<(), JsValue>
where
    F: Fn(web_sys::File) -> Message + 'static,
{
    listen(target, "change", move |ev| {
        let Some(input) = ev
            .current_target()
            .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
        else {
            return;
        };
        let file = input.files().and_then(|list| list.get(0));
        input.set_value("");
        if let Some(file) = file {
            dispatch_global_message(make(file));
        }
    })
}

fn control_value(target: &web_sys::EventTarget) -> Option<String> {
    if let Some(input) = target.dyn_ref::<HtmlInputElement>() {
        return Some(input.value());
    }
    if let Some(area) = target.dyn_ref::<HtmlTextAreaElement>() {
        return Some(area.value());
    }
    target.dyn_ref::<HtmlSelectElement>().map(|s| s.value())
}

// ---------------------------------------------------------------------------
// Focus Management Utilities
// ---------------------------------------------------------------------------

/// Focus the first interactive element within the given container.
/// Returns true if an element was focused, false otherwise.
pub fn focus_first_interactive(container: &Element) -> bool {
    let focusable_selectors = [
        "input:not([disabled])",
        "textarea:not([disabled])",
        "button:not([disabled])",
        "select:not([disabled])",
    ];

    for selector in &focusable_selectors {
        if let Ok(Some(element)) = container.query_selector(selector) {
            if let Ok(html_element) = element.dyn_into::<HtmlElement>() {
                let _ = html_element.focus();
                return true;
            }
        }
    }
    false
}

/// Id and caret of the focused text control, if it has an id.
pub fn store_focus(document: &Document) -> Option<(String, Option<u32>)> {
    let active = document.active_element()?;
    let id = active.id();
    if id.is_empty() {
        return None;
    }
    let caret = active
        .dyn_ref::<HtmlInputElement>()
        .and_then(|i| i.selection_end().ok().flatten())
        .or_else(|| {
            active
                .dyn_ref::<HtmlTextAreaElement>()
                .and_then(|a| a.selection_end().ok().flatten())
        });
    Some((id, caret))
}

/// Re-focus the element stored by [`store_focus`] after a rebuild.
pub fn restore_focus(document: &Document, stored: Option<(String, Option<u32>)>) {
    let Some((id, caret)) = stored else {
        return;
    };
    let Some(element) = document.get_element_by_id(&id) else {
        return;
    };
    if let Some(html) = element.dyn_ref::<HtmlElement>() {
        let _ = html.focus();
    }
    if let Some(pos) = caret {
        if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
            let _ = input.set_selection_range(pos, pos);
        } else if let Some(area) = element.dyn_ref::<HtmlTextAreaElement>() {
            let _ = area.set_selection_range(pos, pos);
        }
    }
}

/// Set the value of an input or textarea without firing events.
pub fn set_control_value(el: &Element, value: &str) {
    if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
        if input.value() != value {
            input.set_value(value);
        }
    } else if let Some(area) = el.dyn_ref::<HtmlTextAreaElement>() {
        if area.value() != value {
            area.set_value(value);
        }
    }
}
