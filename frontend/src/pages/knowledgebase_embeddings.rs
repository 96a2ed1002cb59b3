//! Embeddings of the selected knowledge base. The same table is the
//! "Vector" section of the settings page.

use wasm_bindgen::JsValue;
use web_sys::{Document, Element};

use crate::components::data_table::{text_cell, DataTable};
use crate::components::knowledge_base_selector;
use crate::constants::{CELL_PREVIEW_GRAPHEMES, ID_EMBEDDINGS_SIDEBAR, ID_EMBEDDING_TABLE};
use crate::dom_utils::el;
use crate::i18n::{t, Label, Language};
use crate::models::ApiEmbedding;
use crate::state::{AppState, Listing, TableId};
use crate::utils::truncate_graphemes;

pub fn build(document: &Document, state: &AppState) -> Result<Element, JsValue> {
    let lang = state.language;
    let page = el(document, "div", "embeddings-page", "")?;

    let sidebar = el(document, "aside", "embeddings-sidebar", "")?;
    sidebar.set_id(ID_EMBEDDINGS_SIDEBAR);
    let selector = knowledge_base_selector::build(document, &state.embeddings.kbs, lang)?;
    sidebar.append_child(&selector)?;
    page.append_child(&sidebar)?;

    let main = el(document, "section", "embeddings-main", "")?;
    let title = el(document, "h1", "page-title", t(lang, Label::NavEmbeddings))?;
    main.append_child(&title)?;
    let listing = table(document, &state.embeddings.embeddings, TableId::Embeddings, lang)?;
    main.append_child(&listing)?;
    page.append_child(&main)?;
    Ok(page)
}

pub(crate) fn table(
    document: &Document,
    listing: &Listing<ApiEmbedding>,
    table: TableId,
    lang: Language,
) -> Result<Element, JsValue> {
    let view = DataTable {
        dom_id: ID_EMBEDDING_TABLE,
        table,
        state: &listing.table,
        loading: listing.loading,
        lang,
    };
    view.build(document, &embedding_cell)
}

fn embedding_cell(document: &Document, embedding: &ApiEmbedding, column: &str) -> Result<Element, JsValue> {
    match column {
        "index" => text_cell(document, &embedding.index.to_string()),
        "dimension" => text_cell(document, &embedding.embedding.len().to_string()),
        "text" => {
            let cell = text_cell(document, &truncate_graphemes(&embedding.text, CELL_PREVIEW_GRAPHEMES))?;
            cell.set_attribute("title", &embedding.text)?;
            Ok(cell)
        }
        _ => text_cell(document, &embedding.filename),
    }
}
