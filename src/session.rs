//! Session context shared by everything that talks to the admin API.
//!
//! The credential and the signed-in admin live here instead of in any global
//! storage, so the API client and tests receive the session explicitly.
use crate::entity::{AdminUser, SessionEnd, SessionStatus};
use log::{info, warn};
use std::sync::{PoisonError, RwLock};
use tokio::sync::watch;

pub struct Session {
    token: RwLock<Option<String>>,
    user: RwLock<Option<AdminUser>>,
    status_tx: watch::Sender<SessionStatus>,
}

impl Session {
    /// A session with no credential.
    pub fn new() -> Self {
        let (status_tx, _) = watch::channel(SessionStatus::SignedOut);
        Self {
            token: RwLock::new(None),
            user: RwLock::new(None),
            status_tx,
        }
    }

    /// A session resumed from a stored bearer credential.
    pub fn with_token(token: impl Into<String>) -> Self {
        let session = Self::new();
        session.start(token, None);
        session
    }

    pub fn start(&self, token: impl Into<String>, user: Option<AdminUser>) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = Some(token.into());
        if let Some(user) = &user {
            info!("Admin session started for {}", user.username);
        }
        *self.user.write().unwrap_or_else(PoisonError::into_inner) = user;
        self.status_tx.send_replace(SessionStatus::Active);
    }

    /// Clear the credential and tell every subscriber why.
    pub fn end(&self, reason: SessionEnd) {
        let had_token = self
            .token
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
            .is_some();
        *self.user.write().unwrap_or_else(PoisonError::into_inner) = None;

        if had_token {
            warn!("Admin session ended: {}", reason);
        }
        self.status_tx.send_replace(SessionStatus::Ended(reason));
    }

    pub fn logout(&self) {
        self.end(SessionEnd::LoggedOut);
    }

    pub fn token(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn current_user(&self) -> Option<AdminUser> {
        self.user
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    pub fn status(&self) -> SessionStatus {
        self.status_tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionStatus> {
        self.status_tx.subscribe()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resumed_session_is_active() {
        let session = Session::with_token("abc");
        assert_eq!(session.token().as_deref(), Some("abc"));
        assert_eq!(session.status(), SessionStatus::Active);
    }

    #[test]
    fn ending_clears_credential_and_user() {
        let session = Session::new();
        session.start(
            "abc",
            Some(AdminUser {
                id: 1,
                username: "root".into(),
                full_name: "Root Admin".into(),
                email: "root@example.com".into(),
                role: "ADMIN".into(),
            }),
        );
        let mut rx = session.subscribe();

        session.end(SessionEnd::Banned {
            reason: "fraud".into(),
        });

        assert!(!session.is_authenticated());
        assert!(session.current_user().is_none());
        assert!(rx.has_changed().unwrap());
        assert_eq!(
            *rx.borrow_and_update(),
            SessionStatus::Ended(SessionEnd::Banned {
                reason: "fraud".into()
            })
        );
    }
}
