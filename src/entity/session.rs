use serde::{Deserialize, Serialize};
use std::fmt;

pub const ADMIN_ROLE: &str = "ADMIN";

/// Profile of the signed-in administrator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminUser {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    pub role: String,
}

impl AdminUser {
    pub fn is_admin(&self) -> bool {
        self.role == ADMIN_ROLE
    }
}

/// Why a session was torn down.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEnd {
    Expired,
    Banned { reason: String },
    LoggedOut,
}

impl fmt::Display for SessionEnd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionEnd::Expired => write!(f, "Session expired, please log in again"),
            SessionEnd::Banned { reason } => {
                write!(f, "Your account has been banned. Reason: {}", reason)
            }
            SessionEnd::LoggedOut => write!(f, "Logged out successfully"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionStatus {
    SignedOut,
    Active,
    Ended(SessionEnd),
}
