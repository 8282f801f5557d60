//! Query state for listing views: search term, sort field and direction

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sort direction for a listing column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// The opposite direction
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    /// Arrow shown next to the active column header
    pub fn indicator(self) -> &'static str {
        match self {
            SortDirection::Asc => "↑",
            SortDirection::Desc => "↓",
        }
    }

    /// Parse a direction, falling back to ascending for anything unrecognised
    pub fn parse_lenient(s: &str) -> Self {
        s.parse().unwrap_or_default()
    }
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            other => Err(format!("unknown sort direction '{}'", other)),
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Asc => f.write_str("asc"),
            SortDirection::Desc => f.write_str("desc"),
        }
    }
}

/// User-controlled search and sort parameters of one listing
///
/// Owned by the listing controller; it lives as long as the controller does.
///
/// # Example
/// ```
/// use fleetview::core::query::{QueryState, SortDirection};
///
/// let query = QueryState::sorted_by("name")
///     .with_search("bo")
///     .with_search_fields(["name", "type", "home_port"]);
/// assert_eq!(query.sort_direction, SortDirection::Asc);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryState {
    /// Case-insensitive substring to search for; empty matches everything
    pub search_query: String,

    /// Attribute the view is ordered by
    pub sort_field: String,

    pub sort_direction: SortDirection,

    /// Attributes the search is restricted to; `None` or empty scans all
    /// string attributes
    pub search_fields: Option<Vec<String>>,
}

impl QueryState {
    pub fn sorted_by(field: impl Into<String>) -> Self {
        Self {
            sort_field: field.into(),
            ..Self::default()
        }
    }

    pub fn with_search(mut self, query: impl Into<String>) -> Self {
        self.search_query = query.into();
        self
    }

    pub fn with_direction(mut self, direction: SortDirection) -> Self {
        self.sort_direction = direction;
        self
    }

    pub fn with_search_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.search_fields = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    /// Parse a sort expression of the form `field`, `field:asc` or `field:desc`
    ///
    /// An unknown direction suffix degrades to ascending.
    pub fn parse_sort(expr: &str) -> (String, SortDirection) {
        match expr.rsplit_once(':') {
            Some((field, direction)) => {
                (field.to_string(), SortDirection::parse_lenient(direction))
            }
            None => (expr.to_string(), SortDirection::Asc),
        }
    }

    /// Apply the header-click policy
    ///
    /// Clicking the active column flips the direction; clicking another
    /// column switches to it and resets to ascending.
    pub fn toggle_sort(&mut self, field: &str) {
        if self.sort_field == field {
            self.sort_direction = self.sort_direction.flipped();
        } else {
            self.sort_field = field.to_string();
            self.sort_direction = SortDirection::Asc;
        }
    }

    /// Search fields that actually restrict the search
    pub fn effective_search_fields(&self) -> Option<&[String]> {
        self.search_fields
            .as_deref()
            .filter(|fields| !fields.is_empty())
    }
}
