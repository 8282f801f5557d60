//! 404 view

use crate::app::render::{NOT_FOUND, Templates};
use crate::core::error::Result;
use serde::Serialize;

#[derive(Serialize)]
struct NotFoundContext<'a> {
    details: bool,
    kind: &'a str,
    back_to: &'a str,
}

/// Render the 404 view
///
/// `details` is `(kind, listing)` when a detail record is missing, which
/// links back to that listing instead of the home page.
pub fn render(templates: &Templates, details: Option<(&str, &str)>) -> Result<String> {
    let (kind, back_to) = details.unwrap_or_default();
    templates.render(
        NOT_FOUND,
        &NotFoundContext {
            details: details.is_some(),
            kind,
            back_to,
        },
    )
}
