//! Browser tests for the DOM layer: navbar highlighting, table rendering,
//! transcript escaping and the knowledge-base dialogs.
//!
//! Run with: wasm-pack test --headless --chrome frontend

use wasm_bindgen_test::*;
use web_sys::Document;

use zxrag_console::dom_utils::{listener_count, ListenerScope};
use zxrag_console::messages::{Message, View};
use zxrag_console::models::ApiFile;
use zxrag_console::table::TableAction;
use zxrag_console::state::TableId;
use zxrag_console::router::Route;
use zxrag_console::state::{AppState, ChatTarget, APP_STATE};
use zxrag_console::{update, views};

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> Document {
    web_sys::window().unwrap().document().unwrap()
}

/// Fresh shell and state, then run `msgs` through the reducer without
/// executing any network command.
fn setup(msgs: Vec<Message>) -> Document {
    let document = document();
    views::create_shell(&document).unwrap();
    APP_STATE.with(|state| {
        let mut state = state.borrow_mut();
        *state = AppState::new();
        for msg in msgs {
            update::update(&mut state, msg);
        }
    });
    document
}

fn epoch() -> u64 {
    APP_STATE.with(|state| state.borrow().page_epoch)
}

fn dispatch(msg: Message) {
    APP_STATE.with(|state| {
        update::update(&mut state.borrow_mut(), msg);
    });
}

fn file(i: usize) -> ApiFile {
    ApiFile {
        id: format!("file-{}", i),
        filename: format!("doc-{}.pdf", i),
        bytes: 2048,
        created_at: 1_700_000_000,
        object: "file".into(),
        purpose: "fine-tune".into(),
    }
}

#[wasm_bindgen_test]
fn navbar_highlights_current_route() {
    let document = setup(vec![Message::RouteChanged(Route::Files)]);
    views::render(View::Navbar).unwrap();

    let active = document
        .query_selector("#navbar .nav-link.active")
        .unwrap()
        .expect("one active link");
    assert_eq!(active.get_attribute("href").as_deref(), Some("/knowledgebase/files"));
}

#[wasm_bindgen_test]
fn file_table_paginates_fetched_rows() {
    let document = setup(vec![Message::RouteChanged(Route::Files)]);
    dispatch(Message::FilesLoaded {
        epoch: epoch(),
        files: (0..12).map(file).collect(),
    });
    views::render(View::Page).unwrap();

    let rows = document.query_selector_all("#file-table tbody tr").unwrap();
    assert_eq!(rows.length(), 10);

    let page = document
        .query_selector("#file-table .table-page")
        .unwrap()
        .unwrap();
    assert_eq!(page.text_content().as_deref(), Some("Page 1 of 2"));

    let summary = document
        .query_selector("#file-table .table-selection")
        .unwrap()
        .unwrap();
    assert_eq!(summary.text_content().as_deref(), Some("0 of 12 row(s) selected."));
}

#[wasm_bindgen_test]
fn empty_table_shows_no_results() {
    let document = setup(vec![Message::RouteChanged(Route::Files)]);
    dispatch(Message::FilesLoaded {
        epoch: epoch(),
        files: Vec::new(),
    });
    views::render(View::Page).unwrap();

    let empty = document
        .query_selector("#file-table .table-empty")
        .unwrap()
        .unwrap();
    assert_eq!(empty.text_content().as_deref(), Some("No results."));
}

#[wasm_bindgen_test]
fn transcript_renders_text_not_markup() {
    let document = setup(vec![
        Message::RouteChanged(Route::Chat),
        Message::ChatInputChanged {
            target: ChatTarget::General,
            text: "<b>hi</b>".into(),
        },
        Message::SubmitChat(ChatTarget::General),
    ]);
    views::render(View::Page).unwrap();

    let content = document
        .query_selector("#chat-transcript .chat-message-user .chat-content")
        .unwrap()
        .unwrap();
    assert_eq!(content.text_content().as_deref(), Some("<b>hi</b>"));
    assert!(content.query_selector("b").unwrap().is_none());

    // Streaming: the send button stays disabled until the request settles.
    let send = document.get_element_by_id("chat-send").unwrap();
    assert!(send.has_attribute("disabled"));
}

#[wasm_bindgen_test]
fn create_dialog_opens_and_closes() {
    let document = setup(vec![
        Message::RouteChanged(Route::KnowledgeBaseSettings),
        Message::OpenCreateKnowledgeBaseDialog,
    ]);
    views::render(View::Dialog).unwrap();
    assert!(document.get_element_by_id("kb-name-input").is_some());

    dispatch(Message::CloseDialog);
    views::render(View::Dialog).unwrap();
    let root = document.get_element_by_id("dialog-root").unwrap();
    assert_eq!(root.child_element_count(), 0);
}

#[wasm_bindgen_test]
fn language_toggle_translates_navbar() {
    let document = setup(vec![
        Message::RouteChanged(Route::Chat),
        Message::ToggleLanguage,
    ]);
    views::render(View::Navbar).unwrap();

    let active = document
        .query_selector("#navbar .nav-link.active")
        .unwrap()
        .unwrap();
    assert_eq!(active.text_content().as_deref(), Some("聊天"));
}

#[wasm_bindgen_test]
fn page_rebuilds_replace_their_listeners() {
    let _document = setup(vec![Message::RouteChanged(Route::Files)]);
    dispatch(Message::FilesLoaded {
        epoch: epoch(),
        files: (0..12).map(file).collect(),
    });
    views::render(View::Page).unwrap();
    let first = listener_count(ListenerScope::Page);
    assert!(first > 0);

    for _ in 0..3 {
        views::render(View::Page).unwrap();
    }
    assert_eq!(listener_count(ListenerScope::Page), first);
}

#[wasm_bindgen_test]
fn columns_menu_reopens_after_rebuild() {
    let document = setup(vec![
        Message::RouteChanged(Route::Files),
        Message::Table {
            table: TableId::Files,
            action: TableAction::SetColumnsMenuOpen(true),
        },
        Message::Table {
            table: TableId::Files,
            action: TableAction::ToggleColumn("bytes".into()),
        },
    ]);
    views::render(View::Page).unwrap();

    let menu = document
        .query_selector("#file-table details.table-columns")
        .unwrap()
        .unwrap();
    assert!(menu.has_attribute("open"));
}
