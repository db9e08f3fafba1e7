use crate::entity::AdminError;
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const DEFAULT_NOTIFICATION_POLL_SECS: u64 = 20;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Base URL of the admin REST API
    pub api_base_url: String,

    /// Timeout applied to every request
    pub request_timeout_secs: u64,

    /// Rows requested per page
    pub page_size: u32,

    /// Interval of the notification poller
    pub notification_poll_secs: u64,

    /// Stored bearer credential, if any
    #[serde(default)]
    pub auth_token: Option<String>,

    #[serde(default)]
    pub username: Option<String>,

    #[serde(default)]
    pub password: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            page_size: DEFAULT_PAGE_SIZE,
            notification_poll_secs: DEFAULT_NOTIFICATION_POLL_SECS,
            auth_token: None,
            username: None,
            password: None,
        }
    }
}

impl AppConfig {
    /// Defaults overlaid with `ADMIN_*` environment variables
    /// (`ADMIN_API_BASE_URL`, `ADMIN_PAGE_SIZE`, ...).
    pub fn from_env() -> Result<Self, AdminError> {
        let settings = config::Config::builder()
            .set_default("api_base_url", DEFAULT_API_BASE_URL)?
            .set_default("request_timeout_secs", DEFAULT_REQUEST_TIMEOUT_SECS as i64)?
            .set_default("page_size", i64::from(DEFAULT_PAGE_SIZE))?
            .set_default("notification_poll_secs", DEFAULT_NOTIFICATION_POLL_SECS as i64)?
            .add_source(config::Environment::with_prefix("ADMIN"))
            .build()?;

        let mut config: AppConfig = settings.try_deserialize()?;
        config.api_base_url = config.api_base_url.trim_end_matches('/').to_string();
        config.page_size = config.page_size.max(1);
        Ok(config)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn notification_poll_interval(&self) -> Duration {
        Duration::from_secs(self.notification_poll_secs.max(1))
    }

    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (&self.username, &self.password) {
            (Some(username), Some(password)) => Some((username.as_str(), password.as_str())),
            _ => None,
        }
    }
}
