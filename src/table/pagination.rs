use crate::entity::Page;

/// Position within a paginated resource. `current_page` is zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub current_page: u32,
    pub total_pages: u32,
    pub total_elements: u64,
    pub size: u32,
}

impl Pagination {
    pub fn new(size: u32) -> Self {
        Self {
            current_page: 0,
            total_pages: 0,
            total_elements: 0,
            size: size.max(1),
        }
    }

    /// Page metadata of a response; keeps `fallback_size` if the server sent none.
    pub fn from_page<T>(page: &Page<T>, fallback_size: u32) -> Self {
        let size = if page.size > 0 { page.size } else { fallback_size };
        Self {
            current_page: page.number,
            total_pages: page.total_pages,
            total_elements: page.total_elements,
            size: size.max(1),
        }
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 0
    }

    pub fn has_next(&self) -> bool {
        self.total_pages > 0 && self.current_page < self.total_pages - 1
    }

    /// Brings a requested page into `[0, total_pages - 1]`.
    pub fn clamp(&self, page: u32) -> u32 {
        if self.total_pages == 0 {
            0
        } else {
            page.min(self.total_pages - 1)
        }
    }

    pub fn next_page(&self) -> Option<u32> {
        self.has_next().then(|| self.current_page + 1)
    }

    pub fn previous_page(&self) -> Option<u32> {
        self.has_previous().then(|| self.current_page - 1)
    }

    /// "Showing X to Y of Z results"
    pub fn summary(&self) -> String {
        if self.total_elements == 0 {
            return "Showing 0 to 0 of 0 results".to_string();
        }

        let size = u64::from(self.size);
        let page = u64::from(self.current_page);
        let from = page * size + 1;
        let to = ((page + 1) * size).min(self.total_elements);

        format!(
            "Showing {} to {} of {} results",
            from, to, self.total_elements
        )
    }

    pub fn page_label(&self) -> String {
        format!("Page {} of {}", self.current_page + 1, self.total_pages)
    }
}
