use crate::api::client::{AdminApiClient, QueryParams};
use crate::entity::{field, value_text, ApiError, FilterState, Page, ResourceKind, Row};
use async_trait::async_trait;
use log::info;
use std::sync::Arc;

/// One page request for a list resource.
#[derive(Debug, Clone, PartialEq)]
pub struct ListQuery {
    pub resource: ResourceKind,
    pub page: u32,
    pub size: u32,
    pub filters: FilterState,
}

impl ListQuery {
    pub fn to_params(&self) -> QueryParams {
        let mut params = self.filters.to_query();
        params.push(("page", self.page.to_string()));
        params.push(("size", self.size.to_string()));
        if let Some(sort) = self.resource.fixed_sort() {
            params.push(("sort", sort.to_string()));
        }
        params
    }
}

/// Filter and slice a whole collection into the requested page.
pub fn page_locally(rows: Vec<Row>, query: &ListQuery) -> Page<Row> {
    let size = query.size.max(1);
    let matching: Vec<Row> = rows
        .into_iter()
        .filter(|row| {
            query
                .filters
                .iter()
                .all(|(key, value)| value_text(field(row, key.as_str())) == value)
        })
        .collect();

    let total_elements = matching.len() as u64;
    let total_pages = matching.len().div_ceil(size as usize) as u32;
    let content = matching
        .into_iter()
        .skip(query.page as usize * size as usize)
        .take(size as usize)
        .collect();

    Page {
        content,
        number: query.page,
        total_pages,
        total_elements,
        size,
    }
}

/// Source of list pages
#[async_trait]
pub trait ListSource: Send + Sync {
    async fn fetch_page(&self, query: &ListQuery) -> Result<Page<Row>, ApiError>;
}

/// List pages served by the admin REST API
pub struct ApiListSource {
    client: Arc<AdminApiClient>,
}

impl ApiListSource {
    pub fn new(client: Arc<AdminApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ListSource for ApiListSource {
    async fn fetch_page(&self, query: &ListQuery) -> Result<Page<Row>, ApiError> {
        info!(
            "Fetching {} page {} (size {}, {} filters)",
            query.resource,
            query.page,
            query.size,
            query.filters.len()
        );

        if !query.resource.is_server_paged() {
            let rows: Vec<Row> = self.client.get_json(query.resource.list_path(), &[]).await?;
            return Ok(page_locally(rows, query));
        }

        self.client
            .get_json(query.resource.list_path(), &query.to_params())
            .await
    }
}
