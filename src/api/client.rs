use crate::api::config::AppConfig;
use crate::api::models::{ErrorBody, BANNED_ERROR_CODE};
use crate::entity::{AdminError, ApiError};
use crate::session::Session;
use log::{debug, error, warn};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

/// Query parameters of a request, in send order.
pub type QueryParams = Vec<(&'static str, String)>;

/// Keeps only the parameters that carry a non-empty value.
pub fn optional_params(pairs: &[(&'static str, Option<&str>)]) -> QueryParams {
    pairs
        .iter()
        .filter_map(|(key, value)| match value {
            Some(value) if !value.is_empty() => Some((*key, value.to_string())),
            _ => None,
        })
        .collect()
}

/// Maps a non-success response to the error taxonomy of the dashboard.
pub fn classify_error(status: StatusCode, body: &str) -> ApiError {
    let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();

    if status == StatusCode::UNAUTHORIZED {
        return ApiError::Unauthorized;
    }

    if status == StatusCode::FORBIDDEN && parsed.error.as_deref() == Some(BANNED_ERROR_CODE) {
        return ApiError::Banned {
            reason: parsed
                .ban_reason
                .filter(|reason| !reason.trim().is_empty())
                .unwrap_or_else(|| "unspecified".to_string()),
        };
    }

    if status.is_client_error() {
        let message = parsed
            .message
            .or(parsed.error)
            .unwrap_or_else(|| body.trim().to_string());
        let message = if message.is_empty() {
            status
                .canonical_reason()
                .unwrap_or("Request rejected")
                .to_string()
        } else {
            message
        };
        return ApiError::Validation {
            status: status.as_u16(),
            message,
        };
    }

    ApiError::Unexpected(format!("HTTP {}: {}", status.as_u16(), body.trim()))
}

fn transport_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        ApiError::Timeout
    } else {
        ApiError::Network(err.to_string())
    }
}

/// HTTP client for the admin REST API. Every call carries the session's
/// bearer credential and shares one fixed timeout.
pub struct AdminApiClient {
    http_client: Client,
    base_url: String,
    session: Arc<Session>,
}

impl AdminApiClient {
    pub fn new(config: &AppConfig, session: Arc<Session>) -> Result<Self, AdminError> {
        let http_client = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| ApiError::Unexpected(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    pub fn session(&self) -> Arc<Session> {
        self.session.clone()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str, query: &[(&'static str, String)]) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let mut builder = self.http_client.request(method, url);
        if !query.is_empty() {
            builder = builder.query(query);
        }
        builder
    }

    async fn execute(&self, builder: RequestBuilder) -> Result<Response, ApiError> {
        let token = self.session.token();
        let builder = match &token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        };

        let response = builder.send().await.map_err(|e| {
            error!("Admin API request failed: {}", e);
            transport_error(e)
        })?;

        let status = response.status();
        debug!("Admin API response: {} {}", status, response.url().path());

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let err = classify_error(status, &body);

        // Only a request that carried a credential can invalidate the session.
        if token.is_some() {
            if let Some(reason) = err.session_end() {
                self.session.end(reason);
            }
        } else {
            warn!("Unauthenticated request rejected: {}", err);
        }

        Err(err)
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Unexpected(format!("Failed to parse response: {}", e)))
    }

    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&'static str, String)],
    ) -> Result<T, ApiError> {
        let response = self.execute(self.request(Method::GET, path, query)).await?;
        Self::decode(response).await
    }

    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let response = self
            .execute(self.request(Method::POST, path, &[]).json(body))
            .await?;
        Self::decode(response).await
    }

    /// Mutating call whose response body is ignored.
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        query: &[(&'static str, String)],
    ) -> Result<(), ApiError> {
        self.execute(self.request(method, path, query)).await?;
        Ok(())
    }

    /// Mutating call with a JSON body whose response body is ignored.
    pub async fn send_json<B>(&self, method: Method, path: &str, body: &B) -> Result<(), ApiError>
    where
        B: Serialize + ?Sized + Sync,
    {
        self.execute(self.request(method, path, &[]).json(body))
            .await?;
        Ok(())
    }
}
