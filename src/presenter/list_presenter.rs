use crate::entity::{row_id, AdminError, ApiError, FilterKey, FilterState, SortDirection};
use crate::interactor::resource_list::{FetchOutcome, ListSnapshot, ResourceList};
use crate::table::{presets_for, TableOutput, TableRenderer};
use crate::view::table_view::{ScreenRow, TableBody, TableScreen, TableView};
use anyhow::Result;
use async_trait::async_trait;
use log::debug;
use std::sync::Arc;

#[async_trait]
pub trait ListPresenter: Send + Sync {
    async fn show(&self) -> Result<()>;
    /// Render an applied fetch, or report its failure once.
    async fn present(&self, outcome: FetchOutcome) -> Result<()>;
    async fn render(&self) -> Result<()>;
    async fn refresh(&self) -> Result<()>;
    async fn go_to_page(&self, page: u32) -> Result<()>;
    async fn next_page(&self) -> Result<()>;
    async fn previous_page(&self) -> Result<()>;
    async fn edit_filter(&self, key: FilterKey, value: &str) -> Result<()>;
    async fn apply_local_filters(&self) -> Result<()>;
    async fn apply_filters(&self, filter: FilterState) -> Result<()>;
    async fn clear_filters(&self) -> Result<()>;
    async fn select_quick_preset(&self, key: &str) -> Result<()>;
    async fn toggle_sort(&self, key: &str) -> Result<()>;
    async fn search(&self, query: &str) -> Result<()>;
    async fn report_action(
        &self,
        result: std::result::Result<FetchOutcome, ApiError>,
        success_message: &str,
        failure_message: &str,
    ) -> Result<()>;
}

pub struct ListPresenterImpl<V> {
    list: Arc<ResourceList>,
    renderer: TableRenderer,
    view: Arc<V>,
}

impl<V> ListPresenterImpl<V>
where
    V: TableView,
{
    pub fn new(list: Arc<ResourceList>, renderer: TableRenderer, view: Arc<V>) -> Self {
        Self {
            list,
            renderer,
            view,
        }
    }

    pub fn list(&self) -> Arc<ResourceList> {
        self.list.clone()
    }

    /// Sort a sortable column in the given direction without rendering.
    pub fn sort_by(&self, key: &str, direction: SortDirection) -> Result<(), AdminError> {
        if !self.renderer.is_sortable(key) {
            return Err(AdminError::NotSortable(key.to_string()));
        }
        if self.list.toggle_sort(key).direction != direction {
            self.list.toggle_sort(key);
        }
        Ok(())
    }

    pub fn build_screen(&self, snapshot: &ListSnapshot) -> TableScreen {
        let presets = presets_for(snapshot.resource);
        let active_preset = snapshot.active_preset.and_then(|key| {
            presets
                .iter()
                .find(|preset| preset.key == key)
                .map(|preset| preset.label.to_string())
        });

        let body = match self.renderer.render(
            &snapshot.rows,
            snapshot.sort.as_ref(),
            &snapshot.search,
            snapshot.is_loading(),
        ) {
            TableOutput::Loading => TableBody::Loading,
            TableOutput::Empty { message } => TableBody::Empty(message),
            TableOutput::Rows(rows) => TableBody::Rows(
                rows.into_iter()
                    .map(|rendered| ScreenRow {
                        id: row_id(rendered.row),
                        cells: rendered.cells,
                        actions: rendered
                            .actions
                            .iter()
                            .map(|action| action.label.to_string())
                            .collect(),
                    })
                    .collect(),
            ),
        };

        TableScreen {
            title: snapshot.resource.title().to_string(),
            presets: presets.iter().map(|preset| preset.label.to_string()).collect(),
            active_preset,
            applied_filters: snapshot
                .applied_filters
                .iter()
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .collect(),
            search: snapshot.search.clone(),
            headers: self.renderer.headers(snapshot.sort.as_ref()),
            body,
            summary: snapshot.pagination.summary(),
            page_label: snapshot.pagination.page_label(),
            has_previous: snapshot.pagination.has_previous(),
            has_next: snapshot.pagination.has_next(),
        }
    }

    async fn report_error(&self, err: &ApiError) -> Result<()> {
        match err.session_end() {
            Some(reason) => self.view.display_session_ended(reason).await,
            None => self.view.display_error(err.to_string()).await,
        }
    }

    async fn report_admin_error(&self, err: AdminError) -> Result<()> {
        match err {
            AdminError::Api(api) => self.report_error(&api).await,
            other => self.view.display_error(other.to_string()).await,
        }
    }

    async fn handle_outcome(&self, outcome: FetchOutcome) -> Result<()> {
        match outcome {
            FetchOutcome::Applied => self.render().await,
            FetchOutcome::Superseded => {
                debug!("{} result superseded, not rendering", self.list.resource());
                Ok(())
            }
            FetchOutcome::Failed(err) => self.report_error(&err).await,
        }
    }

    async fn handle_result(&self, result: std::result::Result<FetchOutcome, AdminError>) -> Result<()> {
        match result {
            Ok(outcome) => self.handle_outcome(outcome).await,
            Err(err) => self.report_admin_error(err).await,
        }
    }
}

#[async_trait]
impl<V> ListPresenter for ListPresenterImpl<V>
where
    V: TableView + Send + Sync,
{
    async fn show(&self) -> Result<()> {
        let outcome = self.list.load().await;
        self.handle_outcome(outcome).await
    }

    async fn present(&self, outcome: FetchOutcome) -> Result<()> {
        self.handle_outcome(outcome).await
    }

    async fn render(&self) -> Result<()> {
        let screen = self.build_screen(&self.list.snapshot());
        self.view.display_table(screen).await
    }

    async fn refresh(&self) -> Result<()> {
        let outcome = self.list.refresh().await;
        self.handle_outcome(outcome).await
    }

    async fn go_to_page(&self, page: u32) -> Result<()> {
        let outcome = self.list.go_to_page(page).await;
        self.handle_outcome(outcome).await
    }

    async fn next_page(&self) -> Result<()> {
        match self.list.next_page().await {
            Some(outcome) => self.handle_outcome(outcome).await,
            None => Ok(()),
        }
    }

    async fn previous_page(&self) -> Result<()> {
        match self.list.previous_page().await {
            Some(outcome) => self.handle_outcome(outcome).await,
            None => Ok(()),
        }
    }

    async fn edit_filter(&self, key: FilterKey, value: &str) -> Result<()> {
        if let Err(err) = self.list.edit_filter(key, value) {
            return self.report_admin_error(err).await;
        }
        Ok(())
    }

    async fn apply_local_filters(&self) -> Result<()> {
        let outcome = self.list.apply_local().await;
        self.handle_outcome(outcome).await
    }

    async fn apply_filters(&self, filter: FilterState) -> Result<()> {
        let result = self.list.apply_filters(filter).await;
        self.handle_result(result).await
    }

    async fn clear_filters(&self) -> Result<()> {
        let outcome = self.list.clear_filters().await;
        self.handle_outcome(outcome).await
    }

    async fn select_quick_preset(&self, key: &str) -> Result<()> {
        let result = self.list.select_quick_preset(key).await;
        self.handle_result(result).await
    }

    async fn toggle_sort(&self, key: &str) -> Result<()> {
        if !self.renderer.is_sortable(key) {
            debug!("Column {} is not sortable", key);
            return Ok(());
        }
        self.list.toggle_sort(key);
        self.render().await
    }

    async fn search(&self, query: &str) -> Result<()> {
        self.list.set_search(query);
        self.render().await
    }

    async fn report_action(
        &self,
        result: std::result::Result<FetchOutcome, ApiError>,
        success_message: &str,
        failure_message: &str,
    ) -> Result<()> {
        match result {
            Ok(outcome) => {
                self.view.display_success(success_message.to_string()).await?;
                self.handle_outcome(outcome).await
            }
            Err(err) => match err.session_end() {
                Some(reason) => self.view.display_session_ended(reason).await,
                None => {
                    self.view
                        .display_error(format!("{}: {}", failure_message, err))
                        .await
                }
            },
        }
    }
}
