use crate::entity::SessionEnd;

/// Failure of a single call to the admin REST API.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Session expired, please log in again")]
    Unauthorized,

    #[error("Your account has been banned. Reason: {reason}")]
    Banned { reason: String },

    #[error("{message}")]
    Validation { status: u16, message: String },

    #[error("Unexpected API error: {0}")]
    Unexpected(String),
}

impl ApiError {
    /// How this error ends the admin session, if it does at all.
    pub fn session_end(&self) -> Option<SessionEnd> {
        match self {
            ApiError::Unauthorized => Some(SessionEnd::Expired),
            ApiError::Banned { reason } => Some(SessionEnd::Banned {
                reason: reason.clone(),
            }),
            _ => None,
        }
    }

    pub fn ends_session(&self) -> bool {
        self.session_end().is_some()
    }
}

// Error type for the application
#[derive(Debug, thiserror::Error)]
pub enum AdminError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Invalid filter: {0}")]
    InvalidFilter(String),

    #[error("Unknown quick filter preset: {0}")]
    UnknownPreset(String),

    #[error("Column {0} is not sortable")]
    NotSortable(String),

    #[error("Invalid notification: {0}")]
    InvalidNotification(String),

    #[error("Access denied. Admin privileges required.")]
    AccessDenied,

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}
