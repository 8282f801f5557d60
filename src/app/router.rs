//! Route table and the auth guard
//!
//! Guarded routes are only rendered for an authenticated session. Anyone
//! else is redirected to the login view, which remembers where they were
//! heading and sends them there after signing in.

use crate::core::auth::{AuthContext, AuthPolicy};
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;
use tracing::debug;

/// Where the login view sends users that did not come from a guarded route
pub const DEFAULT_AFTER_LOGIN: &str = "/ships";

/// Every view of the application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Login,
    Ships,
    ShipDetail(String),
    Rockets,
    RocketDetail(String),
    /// Any path that matches no route
    NotFound(String),
}

fn ship_detail_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^/ships/([^/]+)$").expect("valid ship route pattern"))
}

fn rocket_detail_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^/rocket/([^/]+)$").expect("valid rocket route pattern"))
}

impl Route {
    /// Resolve a path; query strings, fragments and trailing slashes are ignored
    pub fn parse(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim_end_matches('/');
        let normalized = if trimmed.is_empty() { "/" } else { trimmed };

        match normalized {
            "/" => Route::Home,
            "/login" => Route::Login,
            "/ships" => Route::Ships,
            "/rockets" => Route::Rockets,
            other => {
                if let Some(caps) = ship_detail_pattern().captures(other) {
                    Route::ShipDetail(caps[1].to_string())
                } else if let Some(caps) = rocket_detail_pattern().captures(other) {
                    Route::RocketDetail(caps[1].to_string())
                } else {
                    Route::NotFound(other.to_string())
                }
            }
        }
    }

    /// Canonical path of this route
    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Login => "/login".to_string(),
            Route::Ships => "/ships".to_string(),
            Route::ShipDetail(id) => format!("/ships/{}", id),
            Route::Rockets => "/rockets".to_string(),
            Route::RocketDetail(id) => format!("/rocket/{}", id),
            Route::NotFound(path) => path.clone(),
        }
    }

    pub fn policy(&self) -> AuthPolicy {
        match self {
            Route::Ships | Route::ShipDetail(_) | Route::Rockets | Route::RocketDetail(_) => {
                AuthPolicy::Authenticated
            }
            Route::Home | Route::Login | Route::NotFound(_) => AuthPolicy::Public,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Outcome of guarding a route
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// The route may be rendered
    Render(Route),

    /// The user must sign in first; `from` is the path they asked for
    Redirect { to: Route, from: String },
}

/// Decide whether `route` may be rendered for `context`
pub fn guard(route: Route, context: &AuthContext) -> Navigation {
    if route.policy().check(context) {
        Navigation::Render(route)
    } else {
        debug!(path = %route, "redirecting to login");
        Navigation::Redirect {
            to: Route::Login,
            from: route.path(),
        }
    }
}

/// Where to go after a successful login
///
/// Returns to the path that triggered the redirect, or the ships listing.
/// The login view itself is never a destination.
pub fn after_login(from: Option<&str>) -> Route {
    match from.map(Route::parse) {
        Some(Route::Login) | None => Route::parse(DEFAULT_AFTER_LOGIN),
        Some(route) => route,
    }
}
