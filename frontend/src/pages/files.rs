//! Global file listing backed by `/v1/files`.

use wasm_bindgen::JsValue;
use web_sys::{Document, Element};

use crate::components::data_table::{text_cell, DataTable};
use crate::constants::ID_FILE_TABLE;
use crate::dom_utils::{self, button, el};
use crate::i18n::{t, Label, Language};
use crate::messages::Message;
use crate::models::ApiFile;
use crate::state::{AppState, TableId};
use crate::utils::{format_bytes, format_unix_ts};

pub fn build(document: &Document, state: &AppState) -> Result<Element, JsValue> {
    let lang = state.language;
    let page_state = &state.files;
    let page = el(document, "div", "files-page", "")?;

    let header = el(document, "div", "page-header", "")?;
    let title = el(document, "h1", "page-title", t(lang, Label::Files))?;
    header.append_child(&title)?;
    let upload = upload_button(document, "file-upload", page_state.busy, lang, Message::UploadFile)?;
    header.append_child(&upload)?;
    page.append_child(&header)?;

    let busy = page_state.busy;
    let table = DataTable {
        dom_id: ID_FILE_TABLE,
        table: TableId::Files,
        state: &page_state.files.table,
        loading: page_state.files.loading,
        lang,
    };
    let cell = move |document: &Document, file: &ApiFile, column: &str| {
        file_cell(document, file, column, lang, busy, FileActions::Global)
    };
    let grid = table.build(document, &cell)?;
    page.append_child(&grid)?;
    Ok(page)
}

/// Which row actions a file table offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FileActions {
    Global,
    KnowledgeBase,
}

pub(crate) fn file_cell(
    document: &Document,
    file: &ApiFile,
    column: &str,
    lang: Language,
    busy: bool,
    actions: FileActions,
) -> Result<Element, JsValue> {
    match column {
        "id" => el(document, "code", "cell-id", &file.id),
        "bytes" => text_cell(document, &format_bytes(file.bytes)),
        "created_at" => text_cell(document, &format_unix_ts(file.created_at)),
        "actions" => action_cell(document, file, lang, busy, actions),
        _ => text_cell(document, &file.filename),
    }
}

fn action_cell(
    document: &Document,
    file: &ApiFile,
    lang: Language,
    busy: bool,
    actions: FileActions,
) -> Result<Element, JsValue> {
    let cell = el(document, "div", "row-actions", "")?;

    let copy = button(document, "btn btn-ghost btn-sm", t(lang, Label::CopyId))?;
    let id = file.id.clone();
    dom_utils::on_click(&copy, move || Message::CopyId(id.clone()))?;
    cell.append_child(&copy)?;

    if actions == FileActions::KnowledgeBase {
        let embed = button(document, "btn btn-ghost btn-sm", t(lang, Label::CreateEmbeddings))?;
        dom_utils::set_disabled(&embed, busy)?;
        let id = file.id.clone();
        dom_utils::on_click(&embed, move || Message::CreateEmbeddings(id.clone()))?;
        cell.append_child(&embed)?;
    }

    let delete = button(document, "btn btn-ghost btn-sm btn-danger-text", t(lang, Label::Delete))?;
    dom_utils::set_disabled(&delete, busy)?;
    let id = file.id.clone();
    dom_utils::on_click(&delete, move || match actions {
        FileActions::Global => Message::DeleteFile(id.clone()),
        FileActions::KnowledgeBase => Message::DeleteKbFile(id.clone()),
    })?;
    cell.append_child(&delete)?;

    Ok(cell)
}

/// File picker styled as a button; picking a file dispatches `make(file)`.
pub(crate) fn upload_button(
    document: &Document,
    id: &str,
    busy: bool,
    lang: Language,
    make: fn(web_sys::File) -> Message,
) -> Result<Element, JsValue> {
    let label = el(document, "label", "btn btn-primary file-picker", "")?;
    let caption = if busy {
        t(lang, Label::Uploading)
    } else {
        t(lang, Label::Upload)
    };
    let caption_el = el(document, "span", "", caption)?;
    label.append_child(&caption_el)?;
    if busy {
        label.set_attribute("aria-disabled", "true")?;
    }

    let input = document.create_element("input")?;
    input.set_id(id);
    input.set_class_name("visually-hidden");
    input.set_attribute("type", "file")?;
    dom_utils::set_disabled(&input, busy)?;
    dom_utils::on_file(&input, make)?;
    label.append_child(&input)?;
    Ok(label)
}
