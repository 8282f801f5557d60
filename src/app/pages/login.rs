//! Login view

use crate::app::render::{LOGIN, Templates};
use crate::app::router::{Route, after_login};
use crate::core::auth::{Credentials, Session};
use crate::core::error::{FieldErrors, FleetError, Result};
use serde::Serialize;

/// Result of submitting the login form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    /// Signed in; continue to this route
    Success(Route),
    /// Validation failed; shown next to each field
    Invalid(FieldErrors),
}

/// Login form state
#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    /// Path that triggered the redirect to the login view
    pub from: Option<String>,
    pub errors: FieldErrors,
}

impl LoginForm {
    pub fn new(from: Option<String>) -> Self {
        Self {
            from,
            errors: FieldErrors::default(),
        }
    }

    /// Submit credentials to the session
    ///
    /// Validation failures are kept on the form; storage failures are
    /// returned as errors.
    pub fn submit(&mut self, session: &mut Session, credentials: &Credentials) -> Result<LoginOutcome> {
        match session.login(credentials) {
            Ok(_) => {
                self.errors = FieldErrors::default();
                Ok(LoginOutcome::Success(after_login(self.from.as_deref())))
            }
            Err(FleetError::Auth(err)) => {
                self.errors = err.field_errors().clone();
                Ok(LoginOutcome::Invalid(self.errors.clone()))
            }
            Err(err) => Err(err),
        }
    }

    pub fn render(&self, templates: &Templates) -> Result<String> {
        templates.render(
            LOGIN,
            &LoginContext {
                username_error: self.errors.get("username"),
                password_error: self.errors.get("password"),
            },
        )
    }
}

#[derive(Serialize)]
struct LoginContext<'a> {
    username_error: Option<&'a str>,
    password_error: Option<&'a str>,
}
