//! Client-side table model shared by the file and embedding listings.
//!
//! Holds one fetched collection plus the view state layered on top of it:
//! sorting, a filename filter, pagination, hidden columns and row
//! selection.  Everything here is pure so it runs under native tests.

use std::cmp::Ordering;
use std::collections::HashSet;

use crate::constants::{DEFAULT_PAGE_SIZE, PAGE_SIZE_OPTIONS};
use crate::models::{ApiEmbedding, ApiFile};

#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
}

impl CellValue {
    fn compare(&self, other: &CellValue) -> Ordering {
        match (self, other) {
            (CellValue::Number(a), CellValue::Number(b)) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
            (CellValue::Text(a), CellValue::Text(b)) => a.to_lowercase().cmp(&b.to_lowercase()),
            (CellValue::Number(_), CellValue::Text(_)) => Ordering::Less,
            (CellValue::Text(_), CellValue::Number(_)) => Ordering::Greater,
        }
    }
}

/// A record that can be shown in a [`TableState`].
pub trait TableRow {
    fn row_id(&self) -> String;

    /// Sort key for a column.
    fn cell(&self, column: &str) -> CellValue;

    /// Text matched by the filter box.
    fn filter_text(&self) -> &str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnDef {
    pub key: &'static str,
    pub sortable: bool,
    pub hideable: bool,
}

impl ColumnDef {
    pub const fn new(key: &'static str, sortable: bool, hideable: bool) -> Self {
        Self { key, sortable, hideable }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

/// User interactions on a table.
#[derive(Debug, Clone, PartialEq)]
pub enum TableAction {
    ToggleSort(String),
    SetFilter(String),
    ResetFilters,
    SetPageSize(usize),
    FirstPage,
    PreviousPage,
    NextPage,
    LastPage,
    ToggleColumn(String),
    /// The Columns menu was opened or closed by the user.
    SetColumnsMenuOpen(bool),
    ToggleRow(String),
    TogglePageSelection,
}

#[derive(Debug, Clone)]
pub struct TableState<T> {
    columns: &'static [ColumnDef],
    rows: Vec<T>,
    sort: Option<(&'static str, SortDirection)>,
    filter: String,
    page_index: usize,
    page_size: usize,
    hidden: HashSet<&'static str>,
    columns_menu_open: bool,
    selected: HashSet<String>,
}

impl<T: TableRow> TableState<T> {
    pub fn new(columns: &'static [ColumnDef]) -> Self {
        Self {
            columns,
            rows: Vec::new(),
            sort: None,
            filter: String::new(),
            page_index: 0,
            page_size: DEFAULT_PAGE_SIZE,
            hidden: HashSet::new(),
            columns_menu_open: false,
            selected: HashSet::new(),
        }
    }

    /// Replace the whole collection. Duplicate ids collapse to their first
    /// occurrence; selection is cleared and the page index clamped.
    pub fn set_rows(&mut self, rows: Vec<T>) {
        let mut seen = HashSet::new();
        self.rows = rows.into_iter().filter(|r| seen.insert(r.row_id())).collect();
        self.selected.clear();
        self.clamp_page();
    }

    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    pub fn columns(&self) -> &'static [ColumnDef] {
        self.columns
    }

    /// Apply `action`. Returns false when the rendered table already shows
    /// the result.
    pub fn apply(&mut self, action: TableAction) -> bool {
        match action {
            TableAction::ToggleSort(column) => self.toggle_sort(&column),
            TableAction::SetFilter(text) => self.set_filter(text),
            TableAction::ResetFilters => self.set_filter(String::new()),
            TableAction::SetPageSize(size) => self.set_page_size(size),
            TableAction::FirstPage => self.page_index = 0,
            TableAction::PreviousPage => self.page_index = self.page_index.saturating_sub(1),
            TableAction::NextPage => {
                if self.page_index + 1 < self.page_count() {
                    self.page_index += 1;
                }
            }
            TableAction::LastPage => self.page_index = self.page_count() - 1,
            TableAction::ToggleColumn(column) => self.toggle_column(&column),
            TableAction::SetColumnsMenuOpen(open) => {
                self.columns_menu_open = open;
                return false;
            }
            TableAction::ToggleRow(id) => {
                if !self.selected.remove(&id) {
                    self.selected.insert(id);
                }
            }
            TableAction::TogglePageSelection => self.toggle_page_selection(),
        }
        true
    }

    // ---------------- sorting ----------------

    fn toggle_sort(&mut self, column: &str) {
        let Some(def) = self.columns.iter().find(|c| c.key == column && c.sortable) else {
            return;
        };
        self.sort = match self.sort {
            Some((key, SortDirection::Asc)) if key == def.key => Some((def.key, SortDirection::Desc)),
            Some((key, SortDirection::Desc)) if key == def.key => None,
            _ => Some((def.key, SortDirection::Asc)),
        };
    }

    pub fn sort(&self) -> Option<(&'static str, SortDirection)> {
        self.sort
    }

    // ---------------- filtering ----------------

    fn set_filter(&mut self, text: String) {
        if text != self.filter {
            self.filter = text;
            self.page_index = 0;
        }
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    /// Rows passing the filter, in display order.
    pub fn filtered_rows(&self) -> Vec<&T> {
        let needle = self.filter.trim().to_lowercase();
        let mut rows: Vec<&T> = self
            .rows
            .iter()
            .filter(|r| needle.is_empty() || r.filter_text().to_lowercase().contains(&needle))
            .collect();

        if let Some((key, direction)) = self.sort {
            // sort_by is stable, so ties keep fetch order in both directions.
            rows.sort_by(|a, b| {
                let ord = a.cell(key).compare(&b.cell(key));
                match direction {
                    SortDirection::Asc => ord,
                    SortDirection::Desc => ord.reverse(),
                }
            });
        }
        rows
    }

    // ---------------- pagination ----------------

    fn set_page_size(&mut self, size: usize) {
        if PAGE_SIZE_OPTIONS.contains(&size) {
            self.page_size = size;
            self.clamp_page();
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    /// Number of pages; at least 1 even when empty.
    pub fn page_count(&self) -> usize {
        let total = self.filtered_rows().len();
        total.div_ceil(self.page_size).max(1)
    }

    pub fn can_previous(&self) -> bool {
        self.page_index > 0
    }

    pub fn can_next(&self) -> bool {
        self.page_index + 1 < self.page_count()
    }

    fn clamp_page(&mut self) {
        let last = self.page_count() - 1;
        if self.page_index > last {
            self.page_index = last;
        }
    }

    /// Rows on the current page.
    pub fn page_rows(&self) -> Vec<&T> {
        self.filtered_rows()
            .into_iter()
            .skip(self.page_index * self.page_size)
            .take(self.page_size)
            .collect()
    }

    // ---------------- columns ----------------

    fn toggle_column(&mut self, column: &str) {
        let Some(def) = self.columns.iter().find(|c| c.key == column && c.hideable) else {
            return;
        };
        if !self.hidden.remove(def.key) {
            self.hidden.insert(def.key);
        }
    }

    pub fn is_columns_menu_open(&self) -> bool {
        self.columns_menu_open
    }

    pub fn is_column_visible(&self, column: &str) -> bool {
        !self.hidden.contains(column)
    }

    pub fn visible_columns(&self) -> Vec<ColumnDef> {
        self.columns
            .iter()
            .filter(|c| self.is_column_visible(c.key))
            .copied()
            .collect()
    }

    // ---------------- selection ----------------

    fn toggle_page_selection(&mut self) {
        let ids: Vec<String> = self.page_rows().iter().map(|r| r.row_id()).collect();
        if ids.iter().all(|id| self.selected.contains(id)) {
            for id in &ids {
                self.selected.remove(id);
            }
        } else {
            self.selected.extend(ids);
        }
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    pub fn is_page_selected(&self) -> bool {
        let page = self.page_rows();
        !page.is_empty() && page.iter().all(|r| self.selected.contains(&r.row_id()))
    }

    /// `(selected, total)` counted over the filtered rows.
    pub fn selection_summary(&self) -> (usize, usize) {
        let filtered = self.filtered_rows();
        let selected = filtered
            .iter()
            .filter(|r| self.selected.contains(&r.row_id()))
            .count();
        (selected, filtered.len())
    }
}

// ---------------------------------------------------------------------------
// Backend records
// ---------------------------------------------------------------------------

pub const FILE_COLUMNS: &[ColumnDef] = &[
    ColumnDef::new("id", true, true),
    ColumnDef::new("filename", true, false),
    ColumnDef::new("bytes", true, true),
    ColumnDef::new("created_at", true, true),
    ColumnDef::new("actions", false, false),
];

pub const EMBEDDING_COLUMNS: &[ColumnDef] = &[
    ColumnDef::new("index", true, true),
    ColumnDef::new("filename", true, false),
    ColumnDef::new("text", false, true),
    ColumnDef::new("dimension", true, true),
];

impl TableRow for ApiFile {
    fn row_id(&self) -> String {
        self.id.clone()
    }

    fn cell(&self, column: &str) -> CellValue {
        match column {
            "id" => match self.id.parse::<f64>() {
                Ok(n) => CellValue::Number(n),
                Err(_) => CellValue::Text(self.id.clone()),
            },
            "bytes" => CellValue::Number(self.bytes as f64),
            "created_at" => CellValue::Number(self.created_at as f64),
            _ => CellValue::Text(self.filename.clone()),
        }
    }

    fn filter_text(&self) -> &str {
        &self.filename
    }
}

impl TableRow for ApiEmbedding {
    fn row_id(&self) -> String {
        self.id.clone()
    }

    fn cell(&self, column: &str) -> CellValue {
        match column {
            "index" => CellValue::Number(self.index as f64),
            "dimension" => CellValue::Number(self.embedding.len() as f64),
            "text" => CellValue::Text(self.text.clone()),
            _ => CellValue::Text(self.filename.clone()),
        }
    }

    fn filter_text(&self) -> &str {
        &self.filename
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: u32,
        name: &'static str,
        size: f64,
    }

    impl TableRow for Row {
        fn row_id(&self) -> String {
            self.id.to_string()
        }

        fn cell(&self, column: &str) -> CellValue {
            match column {
                "size" => CellValue::Number(self.size),
                "id" => CellValue::Number(self.id as f64),
                _ => CellValue::Text(self.name.to_string()),
            }
        }

        fn filter_text(&self) -> &str {
            self.name
        }
    }

    const COLUMNS: &[ColumnDef] = &[
        ColumnDef::new("id", true, false),
        ColumnDef::new("name", true, true),
        ColumnDef::new("size", true, true),
        ColumnDef::new("actions", false, false),
    ];

    fn rows(n: u32) -> Vec<Row> {
        (0..n)
            .map(|i| Row {
                id: i,
                name: if i % 2 == 0 { "Report.pdf" } else { "notes.txt" },
                size: (n - i) as f64,
            })
            .collect()
    }

    fn table(n: u32) -> TableState<Row> {
        let mut t = TableState::new(COLUMNS);
        t.set_rows(rows(n));
        t
    }

    fn ids(rows: Vec<&Row>) -> Vec<u32> {
        rows.into_iter().map(|r| r.id).collect()
    }

    #[test]
    fn sort_cycles_asc_desc_none() {
        let mut t = table(3);
        t.apply(TableAction::ToggleSort("size".into()));
        assert_eq!(ids(t.filtered_rows()), vec![2, 1, 0]);
        t.apply(TableAction::ToggleSort("size".into()));
        assert_eq!(ids(t.filtered_rows()), vec![0, 1, 2]);
        t.apply(TableAction::ToggleSort("size".into()));
        assert_eq!(t.sort(), None);
        assert_eq!(ids(t.filtered_rows()), vec![0, 1, 2]);
    }

    #[test]
    fn unsortable_column_is_ignored() {
        let mut t = table(3);
        t.apply(TableAction::ToggleSort("actions".into()));
        assert_eq!(t.sort(), None);
    }

    #[test]
    fn text_sort_is_case_insensitive_and_stable() {
        let mut t = table(4);
        t.apply(TableAction::ToggleSort("name".into()));
        // notes < Report ignoring case; equal names keep fetch order.
        assert_eq!(ids(t.filtered_rows()), vec![1, 3, 0, 2]);
        t.apply(TableAction::ToggleSort("name".into()));
        assert_eq!(ids(t.filtered_rows()), vec![0, 2, 1, 3]);
    }

    #[test]
    fn filter_matches_substring_and_resets_page() {
        let mut t = table(30);
        t.apply(TableAction::NextPage);
        assert_eq!(t.page_index(), 1);
        t.apply(TableAction::SetFilter("REPORT".into()));
        assert_eq!(t.page_index(), 0);
        assert_eq!(t.filtered_rows().len(), 15);
        t.apply(TableAction::ResetFilters);
        assert_eq!(t.filtered_rows().len(), 30);
    }

    #[test]
    fn pagination_bounds() {
        let mut t = table(25);
        assert_eq!(t.page_count(), 3);
        assert_eq!(t.page_rows().len(), 10);
        t.apply(TableAction::LastPage);
        assert_eq!(t.page_index(), 2);
        assert_eq!(t.page_rows().len(), 5);
        t.apply(TableAction::NextPage);
        assert_eq!(t.page_index(), 2);
        t.apply(TableAction::FirstPage);
        t.apply(TableAction::PreviousPage);
        assert_eq!(t.page_index(), 0);

        t.apply(TableAction::SetPageSize(7));
        assert_eq!(t.page_size(), 10);
        t.apply(TableAction::SetPageSize(50));
        assert_eq!(t.page_count(), 1);
    }

    #[test]
    fn empty_table_has_one_page() {
        let t = table(0);
        assert_eq!(t.page_count(), 1);
        assert!(!t.can_next());
        assert!(!t.can_previous());
    }

    #[test]
    fn page_index_is_clamped_when_data_shrinks() {
        let mut t = table(45);
        t.apply(TableAction::LastPage);
        assert_eq!(t.page_index(), 4);
        t.set_rows(rows(12));
        assert_eq!(t.page_index(), 1);
        t.set_rows(Vec::new());
        assert_eq!(t.page_index(), 0);
    }

    #[test]
    fn duplicate_ids_collapse_to_first() {
        let mut t = TableState::new(COLUMNS);
        t.set_rows(vec![
            Row { id: 1, name: "a", size: 1.0 },
            Row { id: 1, name: "b", size: 2.0 },
        ]);
        assert_eq!(t.rows().len(), 1);
        assert_eq!(t.rows()[0].name, "a");
    }

    #[test]
    fn selection_counts_filtered_rows_and_clears_on_refresh() {
        let mut t = table(12);
        t.apply(TableAction::TogglePageSelection);
        assert!(t.is_page_selected());
        assert_eq!(t.selection_summary(), (10, 12));

        t.apply(TableAction::ToggleRow("0".into()));
        assert!(!t.is_selected("0"));
        assert_eq!(t.selection_summary(), (9, 12));

        t.apply(TableAction::SetFilter("notes".into()));
        assert_eq!(t.selection_summary(), (5, 6));

        t.set_rows(rows(12));
        assert_eq!(t.selection_summary().0, 0);
    }

    #[test]
    fn select_all_toggles_off_when_page_fully_selected() {
        let mut t = table(3);
        t.apply(TableAction::TogglePageSelection);
        t.apply(TableAction::TogglePageSelection);
        assert_eq!(t.selection_summary(), (0, 3));
    }

    #[test]
    fn only_hideable_columns_toggle() {
        let mut t = table(1);
        t.apply(TableAction::ToggleColumn("size".into()));
        t.apply(TableAction::ToggleColumn("id".into()));
        let keys: Vec<_> = t.visible_columns().iter().map(|c| c.key).collect();
        assert_eq!(keys, vec!["id", "name", "actions"]);
        t.apply(TableAction::ToggleColumn("size".into()));
        assert!(t.is_column_visible("size"));
    }

    #[test]
    fn file_ids_sort_numerically_when_possible() {
        let file = |id: &str| ApiFile {
            id: id.into(),
            filename: format!("{}.txt", id),
            bytes: 1,
            created_at: 0,
            object: "file".into(),
            purpose: String::new(),
        };
        let mut t = TableState::new(FILE_COLUMNS);
        t.set_rows(vec![file("10"), file("9"), file("100")]);
        t.apply(TableAction::ToggleSort("id".into()));
        let ids: Vec<_> = t.filtered_rows().iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, vec!["9", "10", "100"]);
    }
}
