use crate::api::list_service::{ListQuery, ListSource};
use crate::entity::{AdminError, ApiError, FilterKey, FilterState, ResourceKind, Row, SortState};
use crate::table::{FilterModel, Pagination, SortModel};
use log::{debug, error, info};
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListStatus {
    Idle,
    Loading,
}

/// What happened to one fetch.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    /// Rows and pagination were replaced.
    Applied,
    /// A newer fetch was issued while this one was in flight; its result was dropped.
    Superseded,
    /// Nothing changed; the error is for the caller to report.
    Failed(ApiError),
}

impl FetchOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, FetchOutcome::Applied)
    }

    pub fn error(&self) -> Option<&ApiError> {
        match self {
            FetchOutcome::Failed(err) => Some(err),
            _ => None,
        }
    }
}

/// Copy of a list's state at one instant.
#[derive(Debug, Clone)]
pub struct ListSnapshot {
    pub resource: ResourceKind,
    pub rows: Vec<Row>,
    pub pagination: Pagination,
    pub local_filters: FilterState,
    pub applied_filters: FilterState,
    pub active_preset: Option<&'static str>,
    pub sort: Option<SortState>,
    pub search: String,
    pub status: ListStatus,
    pub last_error: Option<ApiError>,
}

impl ListSnapshot {
    pub fn is_loading(&self) -> bool {
        self.status == ListStatus::Loading
    }
}

struct ListState {
    rows: Vec<Row>,
    pagination: Pagination,
    filters: FilterModel,
    sort: SortModel,
    search: String,
    status: ListStatus,
    last_error: Option<ApiError>,
}

/// Authoritative state of one paginated resource tab and the only caller of
/// its list endpoint.
///
/// Every fetch takes a ticket from a monotonic counter. A response is applied
/// only while its ticket is still the latest one issued, so overlapping
/// requests can never leave an older page on screen.
pub struct ResourceList {
    resource: ResourceKind,
    source: Arc<dyn ListSource + Send + Sync>,
    state: Mutex<ListState>,
    latest_ticket: AtomicU64,
}

impl ResourceList {
    pub fn new(
        resource: ResourceKind,
        source: Arc<dyn ListSource + Send + Sync>,
        page_size: u32,
    ) -> Self {
        Self {
            resource,
            source,
            state: Mutex::new(ListState {
                rows: Vec::new(),
                pagination: Pagination::new(page_size),
                filters: FilterModel::new(resource),
                sort: SortModel::new(),
                search: String::new(),
                status: ListStatus::Idle,
                last_error: None,
            }),
            latest_ticket: AtomicU64::new(0),
        }
    }

    pub fn resource(&self) -> ResourceKind {
        self.resource
    }

    fn lock(&self) -> MutexGuard<'_, ListState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Initial load of the first page.
    pub async fn load(&self) -> FetchOutcome {
        self.fetch(0).await
    }

    /// Re-fetch the current page with the applied filters.
    pub async fn refresh(&self) -> FetchOutcome {
        let page = self.lock().pagination.current_page;
        self.fetch(page).await
    }

    /// Jump to `page`, clamped to the known page range.
    pub async fn go_to_page(&self, page: u32) -> FetchOutcome {
        let target = self.lock().pagination.clamp(page);
        self.fetch(target).await
    }

    pub async fn next_page(&self) -> Option<FetchOutcome> {
        let target = self.lock().pagination.next_page()?;
        Some(self.fetch(target).await)
    }

    pub async fn previous_page(&self) -> Option<FetchOutcome> {
        let target = self.lock().pagination.previous_page()?;
        Some(self.fetch(target).await)
    }

    /// Edit the pending filter form. Nothing is fetched.
    pub fn edit_filter(&self, key: FilterKey, value: &str) -> Result<(), AdminError> {
        self.lock().filters.edit(key, value)
    }

    /// Submit the pending filter form and go back to the first page.
    pub async fn apply_local(&self) -> FetchOutcome {
        self.lock().filters.apply_local();
        self.fetch(0).await
    }

    /// Submit the pending filter form and fetch `page` in the same request.
    /// The page is not clamped, since the range for the new filter is unknown.
    pub async fn apply_local_at(&self, page: u32) -> FetchOutcome {
        self.lock().filters.apply_local();
        self.fetch(page).await
    }

    pub async fn apply_filters(&self, filter: FilterState) -> Result<FetchOutcome, AdminError> {
        self.lock().filters.apply(filter)?;
        Ok(self.fetch(0).await)
    }

    pub async fn clear_filters(&self) -> FetchOutcome {
        self.lock().filters.clear();
        self.fetch(0).await
    }

    pub async fn select_quick_preset(&self, key: &str) -> Result<FetchOutcome, AdminError> {
        let preset = self.lock().filters.select_preset(key)?;
        info!("Quick filter {} on {}", preset.label, self.resource);
        Ok(self.fetch(0).await)
    }

    /// Client-side only.
    pub fn toggle_sort(&self, key: &str) -> SortState {
        self.lock().sort.toggle(key).clone()
    }

    /// Client-side only.
    pub fn set_search(&self, query: &str) {
        self.lock().search = query.to_string();
    }

    /// Run a mutation and, once it succeeds, re-fetch the current page.
    pub async fn run_action<F>(&self, action: F) -> Result<FetchOutcome, ApiError>
    where
        F: Future<Output = Result<(), ApiError>> + Send,
    {
        if let Err(err) = action.await {
            error!("Action on {} failed: {}", self.resource, err);
            return Err(err);
        }
        Ok(self.refresh().await)
    }

    pub fn snapshot(&self) -> ListSnapshot {
        let state = self.lock();
        ListSnapshot {
            resource: self.resource,
            rows: state.rows.clone(),
            pagination: state.pagination,
            local_filters: state.filters.local().clone(),
            applied_filters: state.filters.applied().clone(),
            active_preset: state.filters.active_preset().map(|preset| preset.key),
            sort: state.sort.state().cloned(),
            search: state.search.clone(),
            status: state.status,
            last_error: state.last_error.clone(),
        }
    }

    async fn fetch(&self, page: u32) -> FetchOutcome {
        let (ticket, query) = {
            let mut state = self.lock();
            let ticket = self.latest_ticket.fetch_add(1, Ordering::SeqCst) + 1;
            state.status = ListStatus::Loading;
            let query = ListQuery {
                resource: self.resource,
                page,
                size: state.pagination.size,
                filters: state.filters.applied().clone(),
            };
            (ticket, query)
        };

        debug!("{} fetch #{}: {:?}", self.resource, ticket, query.to_params());
        let result = self.source.fetch_page(&query).await;

        let mut state = self.lock();
        if self.latest_ticket.load(Ordering::SeqCst) != ticket {
            debug!("Discarding superseded {} fetch #{}", self.resource, ticket);
            return FetchOutcome::Superseded;
        }

        state.status = ListStatus::Idle;
        match result {
            Ok(page) => {
                state.pagination = Pagination::from_page(&page, query.size);
                state.rows = page.content;
                state.last_error = None;
                FetchOutcome::Applied
            }
            Err(err) => {
                error!("Failed to fetch {}: {}", self.resource, err);
                state.last_error = Some(err.clone());
                FetchOutcome::Failed(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Page;
    use async_trait::async_trait;
    use serde_json::json;
    use std::collections::VecDeque;
    use tokio::sync::oneshot;

    struct GatedSource {
        gates: Mutex<VecDeque<oneshot::Receiver<Page<Row>>>>,
    }

    #[async_trait]
    impl ListSource for GatedSource {
        async fn fetch_page(&self, _query: &ListQuery) -> Result<Page<Row>, ApiError> {
            let gate = self.gates.lock().unwrap().pop_front();
            match gate {
                Some(rx) => rx
                    .await
                    .map_err(|_| ApiError::Network("gate dropped".to_string())),
                None => Err(ApiError::Network("no gate".to_string())),
            }
        }
    }

    fn page_of(id: i64) -> Page<Row> {
        Page {
            content: vec![json!({ "id": id }).as_object().cloned().unwrap()],
            number: 0,
            total_pages: 1,
            total_elements: 1,
            size: 20,
        }
    }

    #[tokio::test]
    async fn stale_response_is_discarded() {
        let (first_tx, first_rx) = oneshot::channel();
        let (second_tx, second_rx) = oneshot::channel();
        let source = GatedSource {
            gates: Mutex::new(VecDeque::from(vec![first_rx, second_rx])),
        };
        let list = ResourceList::new(ResourceKind::Deposits, Arc::new(source), 20);

        let (first, second, _) = tokio::join!(list.load(), list.refresh(), async {
            tokio::task::yield_now().await;
            first_tx.send(page_of(1)).unwrap();
            tokio::task::yield_now().await;
            second_tx.send(page_of(2)).unwrap();
        });

        assert_eq!(first, FetchOutcome::Superseded);
        assert_eq!(second, FetchOutcome::Applied);
        let snapshot = list.snapshot();
        assert_eq!(snapshot.rows[0]["id"], json!(2));
        assert_eq!(snapshot.status, ListStatus::Idle);
    }

    #[tokio::test]
    async fn sort_and_search_do_not_fetch() {
        let source = GatedSource {
            gates: Mutex::new(VecDeque::new()),
        };
        let list = ResourceList::new(ResourceKind::Users, Arc::new(source), 20);

        let state = list.toggle_sort("username");
        list.set_search("alice");

        let snapshot = list.snapshot();
        assert_eq!(snapshot.sort, Some(state));
        assert_eq!(snapshot.search, "alice");
        assert_eq!(snapshot.status, ListStatus::Idle);
    }
}
