//! Typed error handling for fleetview
//!
//! The filter-sort engine and the table contract are infallible; everything
//! here belongs to the collaborators around them (data fetching, the auth
//! gate, configuration and session persistence). All of these errors are
//! recovered at the view boundary: fetch failures become a notice plus an
//! empty listing, missing records become a not-found view, and credential
//! problems become inline field messages.
//!
//! # Error Categories
//!
//! - [`FetchError`]: the remote API could not be reached or answered badly
//! - [`AuthError`]: credentials were rejected
//! - [`ConfigError`]: configuration could not be read or parsed
//! - [`SessionError`]: the persisted auth flag could not be read or written

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T, E = FleetError> = std::result::Result<T, E>;

/// The main error type for fleetview
#[derive(Debug, Error)]
pub enum FleetError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Session(#[from] SessionError),

    /// A template failed to render
    #[error("Render error: {0}")]
    Render(String),
}

impl FleetError {
    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            FleetError::Fetch(e) => e.error_code(),
            FleetError::Auth(_) => "INVALID_CREDENTIALS",
            FleetError::Config(_) => "CONFIG_ERROR",
            FleetError::Session(_) => "SESSION_ERROR",
            FleetError::Render(_) => "RENDER_ERROR",
        }
    }
}

impl From<tera::Error> for FleetError {
    fn from(err: tera::Error) -> Self {
        // tera keeps the useful part of the message in the source chain
        let mut message = err.to_string();
        let mut source = std::error::Error::source(&err);
        while let Some(inner) = source {
            message.push_str(": ");
            message.push_str(&inner.to_string());
            source = inner.source();
        }
        FleetError::Render(message)
    }
}

// =============================================================================
// Fetch Errors
// =============================================================================

/// Errors raised while fetching from the remote API
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request never produced a response
    #[error("Request to {url} failed: {message}")]
    Transport { url: String, message: String },

    /// The API answered with a non-success status
    #[error("Request to {url} returned status {status}")]
    Status { url: String, status: u16 },

    /// The response body did not match the expected shape
    #[error("Could not decode response from {url}: {message}")]
    Decode { url: String, message: String },
}

impl FetchError {
    pub fn error_code(&self) -> &'static str {
        match self {
            FetchError::Transport { .. } => "FETCH_TRANSPORT",
            FetchError::Status { .. } => "FETCH_STATUS",
            FetchError::Decode { .. } => "FETCH_DECODE",
        }
    }
}

// =============================================================================
// Auth Errors
// =============================================================================

/// Per-field validation messages, keyed by field name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(pub BTreeMap<String, String>);

impl FieldErrors {
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.insert(field.into(), message.into());
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|(field, message)| format!("{}: {}", field, message))
            .collect();
        f.write_str(&parts.join("; "))
    }
}

impl From<validator::ValidationErrors> for FieldErrors {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields = FieldErrors::default();
        for (field, errs) in errors.field_errors() {
            if let Some(first) = errs.first() {
                let message = first
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field));
                fields.insert(field.to_string(), message);
            }
        }
        fields
    }
}

/// Errors related to logging in
#[derive(Debug, Error)]
pub enum AuthError {
    /// Credentials failed validation; messages are shown next to each field
    #[error("Invalid credentials ({0})")]
    InvalidCredentials(FieldErrors),
}

impl AuthError {
    pub fn field_errors(&self) -> &FieldErrors {
        match self {
            AuthError::InvalidCredentials(errors) => errors,
        }
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

// =============================================================================
// Session Errors
// =============================================================================

/// Errors related to the persisted auth flag
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Could not access session file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Session file {path} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Could not encode state for {path}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to acquire session lock")]
    Lock,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_per_category() {
        let auth: FleetError = AuthError::InvalidCredentials(FieldErrors::default()).into();
        let config: FleetError = ConfigError::Invalid("api.base_url".to_string()).into();
        let session: FleetError = SessionError::Lock.into();
        let render = FleetError::Render("missing variable".to_string());

        assert_eq!(auth.error_code(), "INVALID_CREDENTIALS");
        assert_eq!(config.error_code(), "CONFIG_ERROR");
        assert_eq!(session.error_code(), "SESSION_ERROR");
        assert_eq!(render.error_code(), "RENDER_ERROR");
    }

    #[test]
    fn test_fetch_error_codes() {
        let err: FleetError = FetchError::Status {
            url: "https://api.example/ships".to_string(),
            status: 500,
        }
        .into();
        assert_eq!(err.error_code(), "FETCH_STATUS");
        assert!(err.to_string().contains("500"));
    }

    #[test]
    fn test_encode_failure_is_not_reported_as_corrupt() {
        let source = serde_json::from_str::<u8>("x").unwrap_err();
        let err = SessionError::Encode {
            path: PathBuf::from("auth-storage.json"),
            source,
        };
        assert!(err.to_string().starts_with("Could not encode state for auth-storage.json"));
        assert!(!err.to_string().contains("corrupt"));
    }

    #[test]
    fn test_field_errors_display() {
        let mut errors = FieldErrors::default();
        errors.insert("username", "too short");
        errors.insert("password", "too short");
        assert_eq!(errors.to_string(), "password: too short; username: too short");
        assert_eq!(errors.get("username"), Some("too short"));
    }
}
