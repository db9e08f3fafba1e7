use crate::entity::{field, value_text, ColumnDescriptor, Row, SortState};
use crate::table::sort::sort_rows;
use std::sync::Arc;

pub const EMPTY_MESSAGE: &str = "No data available";
pub const LOADING_MESSAGE: &str = "Loading data...";

/// Action offered on a row. The table does not interpret it; whoever handles
/// `id` receives the untouched source row alongside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowAction {
    pub id: &'static str,
    pub label: &'static str,
}

impl RowAction {
    pub const fn new(id: &'static str, label: &'static str) -> Self {
        Self { id, label }
    }
}

pub type ActionProvider = Arc<dyn Fn(&Row) -> Vec<RowAction> + Send + Sync>;

#[derive(Debug, Clone, PartialEq)]
pub struct RenderedRow<'a> {
    pub row: &'a Row,
    pub cells: Vec<String>,
    pub actions: Vec<RowAction>,
}

/// Loading, empty and populated output never mix.
#[derive(Debug, Clone, PartialEq)]
pub enum TableOutput<'a> {
    Loading,
    Empty { message: String },
    Rows(Vec<RenderedRow<'a>>),
}

/// Turns loaded rows into what the table shows. Holds only the page-supplied
/// shape; sort and search state are passed in on each call.
#[derive(Clone)]
pub struct TableRenderer {
    columns: Vec<ColumnDescriptor>,
    search_keys: Vec<String>,
    actions: Option<ActionProvider>,
}

impl TableRenderer {
    pub fn new(columns: Vec<ColumnDescriptor>) -> Self {
        Self {
            columns,
            search_keys: Vec::new(),
            actions: None,
        }
    }

    /// Row fields the search box looks at.
    pub fn searchable<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.search_keys = keys.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_actions<F>(mut self, provider: F) -> Self
    where
        F: Fn(&Row) -> Vec<RowAction> + Send + Sync + 'static,
    {
        self.actions = Some(Arc::new(provider));
        self
    }

    pub fn columns(&self) -> &[ColumnDescriptor] {
        &self.columns
    }

    pub fn is_searchable(&self) -> bool {
        !self.search_keys.is_empty()
    }

    pub fn is_sortable(&self, key: &str) -> bool {
        self.columns
            .iter()
            .any(|column| column.key == key && column.sortable)
    }

    pub fn has_actions(&self) -> bool {
        self.actions.is_some()
    }

    /// Column labels, with an arrow on the actively sorted column.
    pub fn headers(&self, sort: Option<&SortState>) -> Vec<String> {
        let mut headers: Vec<String> = self
            .columns
            .iter()
            .map(|column| match sort {
                Some(state) if column.sortable && state.key == column.key => {
                    format!("{} {}", column.label, state.direction.arrow())
                }
                _ => column.label.clone(),
            })
            .collect();

        if self.has_actions() {
            headers.push("Actions".to_string());
        }
        headers
    }

    fn matches_search(&self, row: &Row, needle: &str) -> bool {
        self.search_keys
            .iter()
            .any(|key| value_text(field(row, key)).to_lowercase().contains(needle))
    }

    /// Rows narrowed by the search query and ordered by the active sort.
    pub fn order_rows<'a>(
        &self,
        rows: &'a [Row],
        sort: Option<&SortState>,
        search: &str,
    ) -> Vec<&'a Row> {
        let needle = search.trim().to_lowercase();
        let visible: Vec<&Row> = if needle.is_empty() || !self.is_searchable() {
            rows.iter().collect()
        } else {
            rows.iter()
                .filter(|row| self.matches_search(row, &needle))
                .collect()
        };

        sort_rows(visible, sort)
    }

    pub fn render_cell(&self, column: &ColumnDescriptor, row: &Row) -> String {
        let value = field(row, &column.key);
        match &column.render {
            Some(formatter) => formatter(value, row),
            None => value_text(value),
        }
    }

    pub fn render<'a>(
        &self,
        rows: &'a [Row],
        sort: Option<&SortState>,
        search: &str,
        loading: bool,
    ) -> TableOutput<'a> {
        if loading {
            return TableOutput::Loading;
        }

        let ordered = self.order_rows(rows, sort, search);
        if ordered.is_empty() {
            return TableOutput::Empty {
                message: EMPTY_MESSAGE.to_string(),
            };
        }

        let rendered = ordered
            .into_iter()
            .map(|row| RenderedRow {
                row,
                cells: self
                    .columns
                    .iter()
                    .map(|column| self.render_cell(column, row))
                    .collect(),
                actions: self
                    .actions
                    .as_ref()
                    .map(|provider| provider(row))
                    .unwrap_or_default(),
            })
            .collect();

        TableOutput::Rows(rendered)
    }
}
