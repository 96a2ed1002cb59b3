//! Knowledge-base management: the KB list with create, and for the
//! selected KB its files (upload, delete, create embeddings) and vectors.

use wasm_bindgen::JsValue;
use web_sys::{Document, Element};

use super::files::{file_cell, upload_button, FileActions};
use crate::components::data_table::DataTable;
use crate::constants::{ID_KB_FILE_TABLE, ID_KB_HEADER, ID_KB_NAV};
use crate::dom_utils::{self, button, el};
use crate::i18n::{t, Label, Language};
use crate::messages::Message;
use crate::models::ApiFile;
use crate::state::{AppState, KbSection, KbSettingsPageState, TableId};

pub fn build(document: &Document, state: &AppState) -> Result<Element, JsValue> {
    let lang = state.language;
    let page_state = &state.kb_settings;
    let page = el(document, "div", "kb-settings-page", "")?;

    let nav = kb_nav(document, page_state, lang)?;
    page.append_child(&nav)?;

    let main = el(document, "section", "kb-settings-main", "")?;
    match page_state.kbs.selected_kb() {
        Some(kb) => {
            let header = el(document, "div", "page-header", "")?;
            header.set_id(ID_KB_HEADER);
            let title = el(document, "h1", "page-title", &kb.name)?;
            header.append_child(&title)?;
            let delete = button(document, "btn btn-outline btn-danger-text", t(lang, Label::DeleteKnowledgeBase))?;
            dom_utils::set_disabled(&delete, page_state.busy)?;
            let kb_id = kb.id;
            dom_utils::on_click(&delete, move || Message::RequestDeleteKnowledgeBase(kb_id))?;
            header.append_child(&delete)?;
            main.append_child(&header)?;

            let tabs = section_tabs(document, page_state.section, lang)?;
            main.append_child(&tabs)?;
            let section = match page_state.section {
                KbSection::Files => files_section(document, page_state, lang)?,
                KbSection::Vector => super::knowledgebase_embeddings::table(
                    document,
                    &page_state.embeddings,
                    TableId::KbEmbeddings,
                    lang,
                )?,
            };
            main.append_child(&section)?;
        }
        None => {
            let text = if page_state.kbs.loading {
                t(lang, Label::Loading)
            } else {
                t(lang, Label::NoKnowledgeBases)
            };
            let empty = el(document, "p", "empty-state", text)?;
            main.append_child(&empty)?;
        }
    }
    page.append_child(&main)?;
    Ok(page)
}

fn kb_nav(document: &Document, page_state: &KbSettingsPageState, lang: Language) -> Result<Element, JsValue> {
    let nav = el(document, "aside", "kb-nav", "")?;
    nav.set_id(ID_KB_NAV);

    let create = button(document, "btn btn-primary", t(lang, Label::CreateKnowledgeBase))?;
    dom_utils::set_disabled(&create, page_state.busy)?;
    dom_utils::on_click(&create, || Message::OpenCreateKnowledgeBaseDialog)?;
    nav.append_child(&create)?;

    let list = el(document, "ul", "kb-list", "")?;
    for kb in &page_state.kbs.list {
        let item = document.create_element("li")?;
        let class = if page_state.kbs.is_selected(kb.id) {
            "kb-link active"
        } else {
            "kb-link"
        };
        let link = button(document, class, &kb.name)?;
        link.set_attribute("data-kb-id", &kb.id.to_string())?;
        let kb_id = kb.id;
        dom_utils::on_click(&link, move || Message::SelectKnowledgeBase(kb_id))?;
        item.append_child(&link)?;
        list.append_child(&item)?;
    }
    nav.append_child(&list)?;
    Ok(nav)
}

fn section_tabs(document: &Document, current: KbSection, lang: Language) -> Result<Element, JsValue> {
    let tabs = el(document, "div", "tab-bar", "")?;
    for (section, label) in [(KbSection::Files, Label::Files), (KbSection::Vector, Label::Vector)] {
        let class = if section == current {
            "tab-button active"
        } else {
            "tab-button"
        };
        let tab = button(document, class, t(lang, label))?;
        dom_utils::on_click(&tab, move || Message::SelectKbSection(section))?;
        tabs.append_child(&tab)?;
    }
    Ok(tabs)
}

fn files_section(document: &Document, page_state: &KbSettingsPageState, lang: Language) -> Result<Element, JsValue> {
    let section = el(document, "div", "kb-files", "")?;

    let toolbar = el(document, "div", "section-toolbar", "")?;
    let upload = upload_button(document, "kb-file-upload", page_state.busy, lang, Message::UploadKbFile)?;
    toolbar.append_child(&upload)?;
    section.append_child(&toolbar)?;

    let busy = page_state.busy;
    let table = DataTable {
        dom_id: ID_KB_FILE_TABLE,
        table: TableId::KbFiles,
        state: &page_state.files.table,
        loading: page_state.files.loading,
        lang,
    };
    let cell = move |document: &Document, file: &ApiFile, column: &str| {
        file_cell(document, file, column, lang, busy, FileActions::KnowledgeBase)
    };
    let grid = table.build(document, &cell)?;
    section.append_child(&grid)?;
    Ok(section)
}
