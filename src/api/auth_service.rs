use crate::api::client::AdminApiClient;
use crate::api::models::{LoginRequest, LoginResponse};
use crate::entity::{AdminError, AdminUser};
use async_trait::async_trait;
use log::{info, warn};
use std::sync::Arc;

#[async_trait]
pub trait AuthService: Send + Sync {
    /// Sign in; only accounts with the admin role may use the console.
    async fn login(&self, username_or_phone: &str, password: &str) -> Result<AdminUser, AdminError>;
    fn logout(&self);
}

pub struct ApiAuthService {
    client: Arc<AdminApiClient>,
}

impl ApiAuthService {
    pub fn new(client: Arc<AdminApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AuthService for ApiAuthService {
    async fn login(&self, username_or_phone: &str, password: &str) -> Result<AdminUser, AdminError> {
        let response: LoginResponse = self
            .client
            .post_json(
                "/auth/login",
                &LoginRequest {
                    username_or_phone,
                    password,
                },
            )
            .await?;

        if !response.user.is_admin() {
            warn!(
                "Login refused for {}: role {}",
                response.user.username, response.user.role
            );
            return Err(AdminError::AccessDenied);
        }

        info!("Welcome back, {}!", response.user.full_name);
        self.client
            .session()
            .start(response.token, Some(response.user.clone()));
        Ok(response.user)
    }

    fn logout(&self) {
        self.client.session().logout();
    }
}
