use std::sync::Arc;

use crate::api::{
    AdminActionService, AdminApiClient, ApiActionService, ApiAuthService, ApiListSource,
    ApiNotificationService, AppConfig, AuthService, ListSource, NotificationService,
};
use crate::entity::{AdminError, ResourceKind};
use crate::interactor::{
    AnnouncementInteractorImpl, CatalogInteractorImpl, CommunityInteractorImpl,
    FinancialInteractorImpl, NotificationInteractor, NotificationInteractorImpl, ResourceList,
    SupportInteractorImpl, UserInteractorImpl,
};
use crate::services::NotificationPoller;
use crate::session::Session;

/// ServiceContainer provides access to core application dependencies
pub struct ServiceContainer {
    config: AppConfig,
    session: Arc<Session>,
    api_client: Arc<AdminApiClient>,

    // API services
    list_source: Arc<dyn ListSource + Send + Sync>,
    action_service: Arc<dyn AdminActionService + Send + Sync>,
    notification_service: Arc<dyn NotificationService + Send + Sync>,
    auth_service: Arc<dyn AuthService + Send + Sync>,
}

impl ServiceContainer {
    /// Wire the API client and services against the configured back end
    pub fn new(config: AppConfig) -> Result<Self, AdminError> {
        let session = Arc::new(match &config.auth_token {
            Some(token) => Session::with_token(token.clone()),
            None => Session::new(),
        });

        let api_client = Arc::new(AdminApiClient::new(&config, session.clone())?);

        let list_source =
            Arc::new(ApiListSource::new(api_client.clone())) as Arc<dyn ListSource + Send + Sync>;
        let action_service = Arc::new(ApiActionService::new(api_client.clone()))
            as Arc<dyn AdminActionService + Send + Sync>;
        let notification_service = Arc::new(ApiNotificationService::new(api_client.clone()))
            as Arc<dyn NotificationService + Send + Sync>;
        let auth_service =
            Arc::new(ApiAuthService::new(api_client.clone())) as Arc<dyn AuthService + Send + Sync>;

        Ok(Self {
            config,
            session,
            api_client,
            list_source,
            action_service,
            notification_service,
            auth_service,
        })
    }

    // Accessor methods

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn session(&self) -> Arc<Session> {
        self.session.clone()
    }

    pub fn api_client(&self) -> Arc<AdminApiClient> {
        self.api_client.clone()
    }

    pub fn list_source(&self) -> Arc<dyn ListSource + Send + Sync> {
        self.list_source.clone()
    }

    pub fn action_service(&self) -> Arc<dyn AdminActionService + Send + Sync> {
        self.action_service.clone()
    }

    pub fn notification_service(&self) -> Arc<dyn NotificationService + Send + Sync> {
        self.notification_service.clone()
    }

    pub fn auth_service(&self) -> Arc<dyn AuthService + Send + Sync> {
        self.auth_service.clone()
    }

    // Factories; every call yields an independent list

    pub fn resource_list(&self, resource: ResourceKind) -> Arc<ResourceList> {
        let page_size = match resource {
            ResourceKind::CommunityMessages => resource.default_page_size(),
            _ => self.config.page_size,
        };
        Arc::new(ResourceList::new(resource, self.list_source(), page_size))
    }

    pub fn financial_interactor(&self) -> FinancialInteractorImpl {
        FinancialInteractorImpl::new(
            self.resource_list(ResourceKind::Deposits),
            self.resource_list(ResourceKind::Withdrawals),
            self.action_service(),
        )
    }

    pub fn user_interactor(&self) -> UserInteractorImpl {
        UserInteractorImpl::new(self.resource_list(ResourceKind::Users), self.action_service())
    }

    pub fn community_interactor(&self) -> CommunityInteractorImpl {
        CommunityInteractorImpl::new(
            self.resource_list(ResourceKind::CommunityMessages),
            self.action_service(),
        )
    }

    pub fn support_interactor(&self) -> SupportInteractorImpl {
        SupportInteractorImpl::new(
            self.resource_list(ResourceKind::SupportTickets),
            self.action_service(),
        )
    }

    pub fn catalog_interactor(&self) -> CatalogInteractorImpl {
        CatalogInteractorImpl::new(
            self.resource_list(ResourceKind::Plans),
            self.resource_list(ResourceKind::PromoCodes),
            self.action_service(),
        )
    }

    pub fn announcement_interactor(&self) -> AnnouncementInteractorImpl {
        AnnouncementInteractorImpl::new(self.action_service())
    }

    pub fn notification_interactor(&self) -> Arc<NotificationInteractorImpl> {
        Arc::new(NotificationInteractorImpl::new(self.notification_service()))
    }

    pub fn notification_poller(
        &self,
        interactor: Arc<dyn NotificationInteractor + Send + Sync>,
    ) -> NotificationPoller {
        NotificationPoller::new(
            interactor,
            self.session(),
            self.config.notification_poll_interval(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resumes_session_from_configured_token() {
        let config = AppConfig {
            auth_token: Some("stored-token".to_string()),
            ..AppConfig::default()
        };
        let container = ServiceContainer::new(config).unwrap();

        assert!(container.session().is_authenticated());
        assert_eq!(container.api_client().base_url(), "http://localhost:8080/api");
    }

    #[test]
    fn lists_are_independent() {
        let container = ServiceContainer::new(AppConfig::default()).unwrap();
        let messages = container.resource_list(ResourceKind::CommunityMessages);
        let users = container.resource_list(ResourceKind::Users);

        assert_eq!(messages.snapshot().pagination.size, 50);
        assert_eq!(users.snapshot().pagination.size, 20);
        assert!(!Arc::ptr_eq(&users, &container.resource_list(ResourceKind::Users)));
    }
}
