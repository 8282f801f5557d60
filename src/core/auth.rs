//! Auth gate for guarded views
//!
//! The gate is a [`Session`] object injected wherever a guard decision is
//! needed; there is no process-wide singleton. Any pair of credentials that
//! passes validation is accepted. The resulting flag is persisted through a
//! [`SessionStore`] so it survives restarts.

use crate::core::error::{AuthError, FieldErrors, Result, SessionError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;
use validator::Validate;

/// Login form input
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Credentials {
    #[validate(length(min = 2, message = "Username must be at least 2 characters"))]
    pub username: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Validate both fields, collecting one message per failing field
    pub fn check(&self) -> std::result::Result<(), FieldErrors> {
        self.validate().map_err(FieldErrors::from)
    }
}

/// The signed-in user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    pub logged_in_at: DateTime<Utc>,
}

/// Authorization context derived from a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthContext {
    /// Signed-in user
    User { username: String },

    /// No authentication (public access)
    Anonymous,
}

impl AuthContext {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthContext::User { .. })
    }

    pub fn username(&self) -> Option<&str> {
        match self {
            AuthContext::User { username } => Some(username),
            AuthContext::Anonymous => None,
        }
    }
}

/// Authorization policy for a route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthPolicy {
    /// Public access (no auth required)
    Public,

    /// Any authenticated user
    Authenticated,
}

impl AuthPolicy {
    /// Check if auth context satisfies this policy
    pub fn check(&self, context: &AuthContext) -> bool {
        match self {
            AuthPolicy::Public => true,
            AuthPolicy::Authenticated => context.is_authenticated(),
        }
    }
}

/// Persistence for the auth flag
pub trait SessionStore: Send + Sync {
    /// Load the persisted user, if any
    fn load(&self) -> std::result::Result<Option<User>, SessionError>;

    /// Persist the given user, or clear the flag with `None`
    fn save(&self, user: Option<&User>) -> std::result::Result<(), SessionError>;
}

/// Process-wide auth state with a login/logout lifecycle
#[derive(Clone)]
pub struct Session {
    store: Arc<dyn SessionStore>,
    user: Option<User>,
}

impl Session {
    /// Restore the session from its store
    ///
    /// An unreadable flag restores as signed out so that `logout` can
    /// overwrite it; I/O failures still propagate.
    pub fn restore(store: Arc<dyn SessionStore>) -> Result<Self> {
        let user = match store.load() {
            Ok(user) => user,
            Err(err @ SessionError::Corrupt { .. }) => {
                warn!(error = %err, "discarding unreadable session");
                None
            }
            Err(err) => return Err(err.into()),
        };
        debug!(authenticated = user.is_some(), "session restored");
        Ok(Self { store, user })
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn context(&self) -> AuthContext {
        match &self.user {
            Some(user) => AuthContext::User {
                username: user.username.clone(),
            },
            None => AuthContext::Anonymous,
        }
    }

    /// Sign in with the given credentials
    ///
    /// Credentials are only checked for shape; any valid pair signs in.
    pub fn login(&mut self, credentials: &Credentials) -> Result<&User> {
        credentials.check().map_err(AuthError::InvalidCredentials)?;

        let user = User {
            id: Uuid::new_v4().to_string(),
            username: credentials.username.clone(),
            logged_in_at: Utc::now(),
        };
        self.store.save(Some(&user))?;
        info!(username = %user.username, "signed in");

        Ok(self.user.insert(user))
    }

    /// Sign out and clear the persisted flag
    pub fn logout(&mut self) -> Result<()> {
        self.store.save(None)?;
        if let Some(user) = self.user.take() {
            info!(username = %user.username, "signed out");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::FleetError;
    use crate::storage::session::{FileSessionStore, InMemorySessionStore};

    fn session() -> Session {
        Session::restore(Arc::new(InMemorySessionStore::new())).unwrap()
    }

    #[test]
    fn test_policy_check() {
        let user = AuthContext::User {
            username: "amy".to_string(),
        };
        assert!(AuthPolicy::Authenticated.check(&user));
        assert!(AuthPolicy::Public.check(&AuthContext::Anonymous));
        assert!(!AuthPolicy::Authenticated.check(&AuthContext::Anonymous));
    }

    #[test]
    fn test_credentials_validation_bounds() {
        assert!(Credentials::new("ab", "123456").check().is_ok());

        let errors = Credentials::new("a", "12345").check().unwrap_err();
        assert_eq!(
            errors.get("username"),
            Some("Username must be at least 2 characters")
        );
        assert_eq!(
            errors.get("password"),
            Some("Password must be at least 6 characters")
        );
    }

    #[test]
    fn test_login_and_logout() {
        let mut session = session();
        assert!(!session.is_authenticated());

        let user = session.login(&Credentials::new("amy", "secret1")).unwrap();
        assert_eq!(user.username, "amy");
        assert!(session.is_authenticated());
        assert_eq!(session.context().username(), Some("amy"));

        session.logout().unwrap();
        assert!(!session.is_authenticated());
        assert_eq!(session.context(), AuthContext::Anonymous);
    }

    #[test]
    fn test_rejected_login_keeps_anonymous() {
        let mut session = session();
        let err = session.login(&Credentials::new("amy", "123")).unwrap_err();
        match err {
            FleetError::Auth(auth) => {
                assert!(auth.field_errors().get("password").is_some());
                assert!(auth.field_errors().get("username").is_none());
            }
            other => panic!("Expected auth error, got {:?}", other),
        }
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_corrupt_flag_restores_signed_out() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("auth-storage.json");
        std::fs::write(&path, "{not json").unwrap();

        let mut session = Session::restore(Arc::new(FileSessionStore::new(&path))).unwrap();
        assert!(!session.is_authenticated());

        session.logout().unwrap();
        let body: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(body["is_authenticated"], false);
    }

    #[test]
    fn test_unreadable_store_still_fails() {
        let dir = tempfile::tempdir().unwrap();
        // a directory cannot be read as a file
        let store = FileSessionStore::new(dir.path());
        let err = Session::restore(Arc::new(store)).err().unwrap();
        assert!(matches!(err, FleetError::Session(SessionError::Io { .. })));
    }

    #[test]
    fn test_session_survives_restore() {
        let store = Arc::new(InMemorySessionStore::new());
        let mut first = Session::restore(store.clone()).unwrap();
        first.login(&Credentials::new("bob", "hunter22")).unwrap();

        let second = Session::restore(store).unwrap();
        assert_eq!(second.user().map(|u| u.username.as_str()), Some("bob"));
    }
}
