use crate::entity::Row;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Cell formatter: `(value, row) -> text`. Called on every render, so it must
/// be free of side effects.
pub type CellFormatter = Arc<dyn Fn(&Value, &Row) -> String + Send + Sync>;

/// Describes one column of a table.
#[derive(Clone)]
pub struct ColumnDescriptor {
    pub key: String,
    pub label: String,
    pub sortable: bool,
    pub render: Option<CellFormatter>,
}

impl ColumnDescriptor {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            sortable: false,
            render: None,
        }
    }

    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    pub fn render<F>(mut self, formatter: F) -> Self
    where
        F: Fn(&Value, &Row) -> String + Send + Sync + 'static,
    {
        self.render = Some(Arc::new(formatter));
        self
    }
}

impl fmt::Debug for ColumnDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnDescriptor")
            .field("key", &self.key)
            .field("label", &self.label)
            .field("sortable", &self.sortable)
            .field("render", &self.render.is_some())
            .finish()
    }
}
