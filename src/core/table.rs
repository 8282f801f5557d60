//! Tabular display contract
//!
//! Everything a rendering surface needs to present a [`View`]: column
//! definitions, the loading and empty states, one sort target per column and
//! the handler that receives user intents. Surfaces never decide a new query
//! state themselves, they only report what the user asked for.

use crate::core::query::{QueryState, SortDirection};
use crate::core::record::Record;
use crate::core::view::View;
use std::fmt;
use std::sync::Arc;

/// Message shown while the collection is still being fetched
pub const LOADING_MESSAGE: &str = "Loading...";

/// Message shown when nothing matches the current search
pub const NO_RESULTS_MESSAGE: &str = "No data found matching your search criteria.";

/// How a column turns a record into display text
pub enum CellRender<R> {
    /// Show the raw attribute value as text
    Raw,

    /// Show the output of a custom formatter
    Formatter(Arc<dyn Fn(&R) -> String + Send + Sync>),
}

impl<R> Clone for CellRender<R> {
    fn clone(&self) -> Self {
        match self {
            CellRender::Raw => CellRender::Raw,
            CellRender::Formatter(f) => CellRender::Formatter(Arc::clone(f)),
        }
    }
}

impl<R> fmt::Debug for CellRender<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellRender::Raw => f.write_str("Raw"),
            CellRender::Formatter(_) => f.write_str("Formatter(..)"),
        }
    }
}

/// One column of a table
#[derive(Debug, Clone)]
pub struct Column<R> {
    /// Attribute the column shows and sorts by
    pub key: String,
    /// Header text
    pub label: String,
    pub render: CellRender<R>,
}

impl<R: Record> Column<R> {
    /// Column showing the raw attribute value
    pub fn raw(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            render: CellRender::Raw,
        }
    }

    /// Column rendered through a custom formatter
    pub fn formatted<F>(key: impl Into<String>, label: impl Into<String>, formatter: F) -> Self
    where
        F: Fn(&R) -> String + Send + Sync + 'static,
    {
        Self {
            key: key.into(),
            label: label.into(),
            render: CellRender::Formatter(Arc::new(formatter)),
        }
    }

    /// Display text of this column for `record`
    ///
    /// A missing or null attribute renders as an empty cell.
    pub fn cell(&self, record: &R) -> String {
        match &self.render {
            CellRender::Raw => record
                .field_value(&self.key)
                .map(|value| value.to_string())
                .unwrap_or_default(),
            CellRender::Formatter(format) => format(record),
        }
    }
}

/// Receiver of the intents a table surface reports
pub trait TableHandler<R> {
    /// The search box changed
    fn on_search_change(&mut self, query: &str);

    /// A column header was clicked
    fn on_sort_change(&mut self, field: &str);

    /// A row was activated; receives the record itself, never its position
    fn on_row_click(&mut self, record: &R);
}

/// A clickable column header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderCell {
    pub key: String,
    pub label: String,
    /// Set on the column the view is currently sorted by
    pub active: Option<SortDirection>,
}

impl HeaderCell {
    /// Label followed by the direction arrow when active
    pub fn caption(&self) -> String {
        match self.active {
            Some(direction) => format!("{} {}", self.label, direction.indicator()),
            None => self.label.clone(),
        }
    }
}

/// A rendered row, still attached to its originating record
#[derive(Debug)]
pub struct TableRow<'a, R> {
    pub record: &'a R,
    pub cells: Vec<String>,
}

/// Body state of a table
#[derive(Debug)]
pub enum TableBody<'a, R> {
    /// View is empty while the collection is loading
    Loading,
    /// View is empty after loading finished
    NoResults,
    Rows(Vec<TableRow<'a, R>>),
}

impl<R> TableBody<'_, R> {
    /// Placeholder text for the empty states
    pub fn message(&self) -> Option<&'static str> {
        match self {
            TableBody::Loading => Some(LOADING_MESSAGE),
            TableBody::NoResults => Some(NO_RESULTS_MESSAGE),
            TableBody::Rows(_) => None,
        }
    }
}

/// Everything a surface needs to draw one state of a table
#[derive(Debug)]
pub struct TableFrame<'a, R> {
    pub title: String,
    pub search_placeholder: String,
    pub search_query: String,
    pub headers: Vec<HeaderCell>,
    pub body: TableBody<'a, R>,
    /// Loading overlay; may be set while rows from a previous fetch are shown
    pub loading: bool,
}

impl<'a, R: Record> TableFrame<'a, R> {
    pub fn build(
        title: impl Into<String>,
        columns: &[Column<R>],
        view: &View<'a, R>,
        query: &QueryState,
        loading: bool,
    ) -> Self {
        let headers = columns
            .iter()
            .map(|column| HeaderCell {
                key: column.key.clone(),
                label: column.label.clone(),
                active: (column.key == query.sort_field).then_some(query.sort_direction),
            })
            .collect();

        let body = if view.is_empty() {
            if loading {
                TableBody::Loading
            } else {
                TableBody::NoResults
            }
        } else {
            TableBody::Rows(
                view.iter()
                    .map(|record| TableRow {
                        record,
                        cells: columns.iter().map(|column| column.cell(record)).collect(),
                    })
                    .collect(),
            )
        };

        Self {
            title: title.into(),
            search_placeholder: "Search...".to_string(),
            search_query: query.search_query.clone(),
            headers,
            body,
            loading,
        }
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.search_placeholder = placeholder.into();
        self
    }

    pub fn rows(&self) -> &[TableRow<'a, R>] {
        match &self.body {
            TableBody::Rows(rows) => rows,
            _ => &[],
        }
    }

    /// Report a click on the header with the given key
    ///
    /// Returns `false` when no column has that key.
    pub fn click_header(&self, key: &str, handler: &mut dyn TableHandler<R>) -> bool {
        match self.headers.iter().find(|header| header.key == key) {
            Some(header) => {
                handler.on_sort_change(&header.key);
                true
            }
            None => false,
        }
    }

    /// Report activation of the row at `position` (as displayed)
    ///
    /// The handler receives the record; returns `false` when out of range.
    pub fn click_row(&self, position: usize, handler: &mut dyn TableHandler<R>) -> bool {
        match self.rows().get(position) {
            Some(row) => {
                handler.on_row_click(row.record);
                true
            }
            None => false,
        }
    }
}

/// A surface able to present table frames
pub trait TableSurface<R: Record> {
    type Output;

    fn render(&mut self, frame: &TableFrame<'_, R>) -> Self::Output;
}
