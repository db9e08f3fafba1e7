use serde::{Deserialize, Serialize};

/// Paginated list response: `{ content, number, totalPages, totalElements, size }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub content: Vec<T>,
    #[serde(default)]
    pub number: u32,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_elements: u64,
    #[serde(default)]
    pub size: u32,
}

impl<T> Page<T> {
    pub fn empty(size: u32) -> Self {
        Self {
            content: Vec::new(),
            number: 0,
            total_pages: 0,
            total_elements: 0,
            size,
        }
    }
}
