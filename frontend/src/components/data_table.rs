//! Data table widget: filter toolbar, column menu, sortable headers, row
//! selection and pagination footer over a [`TableState`].
//!
//! The widget is rebuilt on every page render; all interaction goes through
//! `Message::Table` so the state stays in [`crate::state::AppState`].

use wasm_bindgen::JsValue;
use web_sys::{Document, Element};

use crate::constants::PAGE_SIZE_OPTIONS;
use crate::dom_utils::{self, button, el};
use crate::i18n::{t, Label, Language};
use crate::messages::Message;
use crate::state::TableId;
use crate::table::{SortDirection, TableAction, TableRow, TableState};

/// Builds the content of one body cell for `column`.
pub type CellRenderer<'a, T> = &'a dyn Fn(&Document, &T, &str) -> Result<Element, JsValue>;

pub struct DataTable<'a, T> {
    pub dom_id: &'static str,
    pub table: TableId,
    pub state: &'a TableState<T>,
    pub loading: bool,
    pub lang: Language,
}

fn action(table: TableId, action: TableAction) -> Message {
    Message::Table { table, action }
}

pub fn column_label(key: &str) -> Label {
    match key {
        "id" => Label::ColId,
        "filename" => Label::ColFilename,
        "bytes" => Label::ColSize,
        "created_at" => Label::ColCreated,
        "index" => Label::ColIndex,
        "text" => Label::ColText,
        "dimension" => Label::ColDimension,
        _ => Label::ColActions,
    }
}

fn sort_indicator(state_sort: Option<(&'static str, SortDirection)>, key: &str) -> &'static str {
    match state_sort {
        Some((k, SortDirection::Asc)) if k == key => " ↑",
        Some((k, SortDirection::Desc)) if k == key => " ↓",
        _ => "",
    }
}

impl<'a, T: TableRow> DataTable<'a, T> {
    pub fn build(&self, document: &Document, cell: CellRenderer<'_, T>) -> Result<Element, JsValue> {
        let root = el(document, "div", "data-table", "")?;
        root.set_id(self.dom_id);
        let toolbar = self.toolbar(document)?;
        root.append_child(&toolbar)?;
        let grid = self.grid(document, cell)?;
        root.append_child(&grid)?;
        let footer = self.footer(document)?;
        root.append_child(&footer)?;
        Ok(root)
    }

    fn toolbar(&self, document: &Document) -> Result<Element, JsValue> {
        let table = self.table;
        let bar = el(document, "div", "table-toolbar", "")?;

        let filter = document.create_element("input")?;
        filter.set_id(&format!("{}-filter", self.dom_id));
        filter.set_class_name("table-filter");
        filter.set_attribute("type", "text")?;
        filter.set_attribute("placeholder", t(self.lang, Label::FilterFilenames))?;
        filter.set_attribute("value", self.state.filter())?;
        dom_utils::on_value(&filter, "input", move |text| {
            Some(action(table, TableAction::SetFilter(text)))
        })?;
        bar.append_child(&filter)?;

        if !self.state.filter().is_empty() {
            let reset = button(document, "btn btn-ghost", t(self.lang, Label::Reset))?;
            dom_utils::on_click(&reset, move || action(table, TableAction::ResetFilters))?;
            bar.append_child(&reset)?;
        }

        let menu = el(document, "details", "table-columns", "")?;
        if self.state.is_columns_menu_open() {
            menu.set_attribute("open", "")?;
        }
        dom_utils::on_toggle(&menu, move |open| {
            action(table, TableAction::SetColumnsMenuOpen(open))
        })?;
        let summary = el(document, "summary", "btn btn-outline", t(self.lang, Label::Columns))?;
        menu.append_child(&summary)?;
        let list = el(document, "div", "table-columns-list", "")?;
        for column in self.state.columns().iter().filter(|c| c.hideable) {
            let item = el(document, "label", "table-columns-item", "")?;
            let check = document.create_element("input")?;
            check.set_attribute("type", "checkbox")?;
            if self.state.is_column_visible(column.key) {
                check.set_attribute("checked", "")?;
            }
            let key = column.key;
            dom_utils::on_value(&check, "change", move |_| {
                Some(action(table, TableAction::ToggleColumn(key.to_string())))
            })?;
            item.append_child(&check)?;
            let caption = el(document, "span", "", t(self.lang, column_label(key)))?;
            item.append_child(&caption)?;
            list.append_child(&item)?;
        }
        menu.append_child(&list)?;
        bar.append_child(&menu)?;

        Ok(bar)
    }

    fn grid(&self, document: &Document, cell: CellRenderer<'_, T>) -> Result<Element, JsValue> {
        let table = self.table;
        let columns = self.state.visible_columns();
        let grid = el(document, "table", "table", "")?;

        // Header -----------------------------------------------------------
        let thead = document.create_element("thead")?;
        let head_row = document.create_element("tr")?;

        let select_all = el(document, "th", "table-select", "")?;
        let check = document.create_element("input")?;
        check.set_attribute("type", "checkbox")?;
        check.set_attribute("aria-label", "Select page")?;
        if self.state.is_page_selected() {
            check.set_attribute("checked", "")?;
        }
        dom_utils::on_value(&check, "change", move |_| {
            Some(action(table, TableAction::TogglePageSelection))
        })?;
        select_all.append_child(&check)?;
        head_row.append_child(&select_all)?;

        for column in &columns {
            let th = document.create_element("th")?;
            let label = t(self.lang, column_label(column.key));
            if column.sortable {
                let text = format!("{}{}", label, sort_indicator(self.state.sort(), column.key));
                let sort = button(document, "table-sort", &text)?;
                let key = column.key;
                dom_utils::on_click(&sort, move || {
                    action(table, TableAction::ToggleSort(key.to_string()))
                })?;
                th.append_child(&sort)?;
            } else {
                th.set_text_content(Some(label));
            }
            head_row.append_child(&th)?;
        }
        thead.append_child(&head_row)?;
        grid.append_child(&thead)?;

        // Body -------------------------------------------------------------
        let tbody = document.create_element("tbody")?;
        let rows = self.state.page_rows();
        if rows.is_empty() {
            let tr = document.create_element("tr")?;
            let text = if self.loading {
                t(self.lang, Label::Loading)
            } else {
                t(self.lang, Label::NoResults)
            };
            let td = el(document, "td", "table-empty", text)?;
            td.set_attribute("colspan", &(columns.len() + 1).to_string())?;
            tr.append_child(&td)?;
            tbody.append_child(&tr)?;
        }
        for row in rows {
            let id = row.row_id();
            let tr = document.create_element("tr")?;
            tr.set_attribute("data-row-id", &id)?;
            if self.state.is_selected(&id) {
                tr.set_attribute("data-state", "selected")?;
            }

            let td = el(document, "td", "table-select", "")?;
            let check = document.create_element("input")?;
            check.set_attribute("type", "checkbox")?;
            check.set_attribute("aria-label", "Select row")?;
            if self.state.is_selected(&id) {
                check.set_attribute("checked", "")?;
            }
            let row_id = id.clone();
            dom_utils::on_value(&check, "change", move |_| {
                Some(action(table, TableAction::ToggleRow(row_id.clone())))
            })?;
            td.append_child(&check)?;
            tr.append_child(&td)?;

            for column in &columns {
                let td = document.create_element("td")?;
                let content = cell(document, row, column.key)?;
                td.append_child(&content)?;
                tr.append_child(&td)?;
            }
            tbody.append_child(&tr)?;
        }
        grid.append_child(&tbody)?;

        Ok(grid)
    }

    fn footer(&self, document: &Document) -> Result<Element, JsValue> {
        let table = self.table;
        let footer = el(document, "div", "table-footer", "")?;

        let (selected, total) = self.state.selection_summary();
        let summary = el(
            document,
            "div",
            "table-selection",
            &format!("{} {} {} {}", selected, t(self.lang, Label::Of), total, t(self.lang, Label::RowsSelected)),
        )?;
        footer.append_child(&summary)?;

        let controls = el(document, "div", "table-pagination", "")?;

        let size_label = el(document, "label", "table-page-size", t(self.lang, Label::RowsPerPage))?;
        let size = document.create_element("select")?;
        for option in PAGE_SIZE_OPTIONS {
            let opt = el(document, "option", "", &option.to_string())?;
            opt.set_attribute("value", &option.to_string())?;
            if option == self.state.page_size() {
                opt.set_attribute("selected", "")?;
            }
            size.append_child(&opt)?;
        }
        dom_utils::on_value(&size, "change", move |value| {
            value
                .parse::<usize>()
                .ok()
                .map(|n| action(table, TableAction::SetPageSize(n)))
        })?;
        size_label.append_child(&size)?;
        controls.append_child(&size_label)?;

        let page = el(
            document,
            "span",
            "table-page",
            &format!(
                "{} {} {} {}",
                t(self.lang, Label::Page),
                self.state.page_index() + 1,
                t(self.lang, Label::Of),
                self.state.page_count()
            ),
        )?;
        controls.append_child(&page)?;

        let nav: [(&str, TableAction, bool); 4] = [
            ("«", TableAction::FirstPage, self.state.can_previous()),
            ("‹", TableAction::PreviousPage, self.state.can_previous()),
            ("›", TableAction::NextPage, self.state.can_next()),
            ("»", TableAction::LastPage, self.state.can_next()),
        ];
        for (glyph, nav_action, enabled) in nav {
            let btn = button(document, "btn btn-outline btn-icon", glyph)?;
            dom_utils::set_disabled(&btn, !enabled)?;
            dom_utils::on_click(&btn, move || action(table, nav_action.clone()))?;
            controls.append_child(&btn)?;
        }

        footer.append_child(&controls)?;
        Ok(footer)
    }
}

/// Plain text cell.
pub fn text_cell(document: &Document, text: &str) -> Result<Element, JsValue> {
    el(document, "span", "", text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_indicator_only_on_sorted_column() {
        assert_eq!(sort_indicator(Some(("bytes", SortDirection::Asc)), "bytes"), " ↑");
        assert_eq!(sort_indicator(Some(("bytes", SortDirection::Desc)), "bytes"), " ↓");
        assert_eq!(sort_indicator(Some(("bytes", SortDirection::Asc)), "id"), "");
        assert_eq!(sort_indicator(None, "id"), "");
    }

    #[test]
    fn every_column_has_a_label() {
        for column in crate::table::FILE_COLUMNS
            .iter()
            .chain(crate::table::EMBEDDING_COLUMNS)
        {
            let label = column_label(column.key);
            assert!(column.key == "actions" || label != Label::ColActions);
        }
    }
}
