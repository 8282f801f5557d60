//! Listing controller: owns the collection and the query state
//!
//! The controller is the [`TableHandler`] of a listing. Surfaces report
//! intents to it; it applies the sort toggle policy, keeps the search term,
//! and turns row activations into a pending navigation.
//!
//! Surfaces draw from a [`Snapshot`], which shares the collection with the
//! controller instead of borrowing the controller itself, so a frame built
//! from a snapshot can report clicks back to the controller.

use crate::app::notify::Notice;
use crate::app::router::Route;
use crate::core::query::QueryState;
use crate::core::record::Record;
use crate::core::table::{Column, TableFrame, TableHandler};
use crate::core::view::{View, derive_view};
use std::sync::Arc;
use tracing::{debug, warn};

/// Controller state of one listing view
pub struct ListingController<R> {
    records: Arc<Vec<R>>,
    query: QueryState,
    loading: bool,
    notice: Option<Notice>,
    navigation: Option<Route>,
    detail_route: fn(&R) -> Route,
}

/// Immutable copy of a listing's state for one render pass
pub struct Snapshot<R> {
    pub records: Arc<Vec<R>>,
    pub query: QueryState,
    pub loading: bool,
}

impl<R: Record> Snapshot<R> {
    pub fn view(&self) -> View<'_, R> {
        derive_view(&self.records, &self.query)
    }

    pub fn frame(&self, title: &str, columns: &[Column<R>]) -> TableFrame<'_, R> {
        TableFrame::build(title, columns, &self.view(), &self.query, self.loading)
    }
}

impl<R: Record> ListingController<R> {
    /// Create a controller with an initial query and the route a row opens
    pub fn new(query: QueryState, detail_route: fn(&R) -> Route) -> Self {
        Self {
            records: Arc::new(Vec::new()),
            query,
            loading: false,
            notice: None,
            navigation: None,
            detail_route,
        }
    }

    pub fn query(&self) -> &QueryState {
        &self.query
    }

    pub fn query_mut(&mut self) -> &mut QueryState {
        &mut self.query
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    /// Mark the collection as being fetched
    pub fn begin_loading(&mut self) {
        self.loading = true;
        self.notice = None;
    }

    /// Finish a fetch
    ///
    /// On failure the collection becomes empty and `on_error` is kept as the
    /// notice to show.
    pub fn finish_loading(&mut self, result: anyhow::Result<Vec<R>>, on_error: Notice) {
        self.loading = false;
        match result {
            Ok(records) => {
                debug!(count = records.len(), "listing loaded");
                self.records = Arc::new(records);
            }
            Err(err) => {
                warn!(error = %err, "listing failed to load");
                self.records = Arc::new(Vec::new());
                self.notice = Some(on_error);
            }
        }
    }

    /// Replace the collection directly
    pub fn set_records(&mut self, records: Vec<R>) {
        self.records = Arc::new(records);
    }

    /// Take the notice raised by the last fetch
    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }

    /// Take the route requested by the last row activation
    pub fn take_navigation(&mut self) -> Option<Route> {
        self.navigation.take()
    }

    pub fn snapshot(&self) -> Snapshot<R> {
        Snapshot {
            records: Arc::clone(&self.records),
            query: self.query.clone(),
            loading: self.loading,
        }
    }
}

impl<R: Record> TableHandler<R> for ListingController<R> {
    fn on_search_change(&mut self, query: &str) {
        self.query.search_query = query.to_string();
    }

    fn on_sort_change(&mut self, field: &str) {
        self.query.toggle_sort(field);
        debug!(field, direction = %self.query.sort_direction, "sort changed");
    }

    fn on_row_click(&mut self, record: &R) {
        self.navigation = Some((self.detail_route)(record));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::query::SortDirection;
    use crate::core::record::DynamicRecord;

    fn controller() -> ListingController<DynamicRecord> {
        let mut controller = ListingController::new(QueryState::sorted_by("name"), |r: &DynamicRecord| {
            Route::ShipDetail(r.id.clone())
        });
        controller.set_records(vec![
            DynamicRecord::new("1").with("name", "Bob").with("type", "Tug"),
            DynamicRecord::new("2").with("name", "Amy").with("type", "Barge"),
        ]);
        controller
    }

    fn columns() -> Vec<Column<DynamicRecord>> {
        vec![Column::raw("name", "Name"), Column::raw("type", "Type")]
    }

    #[test]
    fn test_header_clicks_follow_toggle_policy() {
        let mut controller = controller();

        let snapshot = controller.snapshot();
        snapshot.frame("Ships", &columns()).click_header("name", &mut controller);
        assert_eq!(controller.query().sort_direction, SortDirection::Desc);

        let snapshot = controller.snapshot();
        snapshot.frame("Ships", &columns()).click_header("type", &mut controller);
        assert_eq!(controller.query().sort_field, "type");
        assert_eq!(controller.query().sort_direction, SortDirection::Asc);
    }

    #[test]
    fn test_row_click_navigates_to_record_after_reorder() {
        let mut controller = controller();
        controller.on_sort_change("name");

        // descending by name: Bob first
        let snapshot = controller.snapshot();
        snapshot.frame("Ships", &columns()).click_row(0, &mut controller);
        assert_eq!(
            controller.take_navigation(),
            Some(Route::ShipDetail("1".to_string()))
        );
        assert_eq!(controller.take_navigation(), None);
    }

    #[test]
    fn test_search_change_updates_view() {
        let mut controller = controller();
        controller.on_search_change("AM");
        let snapshot = controller.snapshot();
        assert_eq!(snapshot.view().ids(), vec!["2"]);
    }

    #[test]
    fn test_failed_load_empties_and_raises_notice() {
        let mut controller = controller();
        controller.begin_loading();
        assert!(controller.snapshot().loading);

        controller.finish_loading(Err(anyhow::anyhow!("offline")), Notice::listing_failed("ships"));
        assert!(!controller.is_loading());
        assert!(controller.records().is_empty());
        assert!(controller.take_notice().is_some());
        assert!(controller.take_notice().is_none());
    }

    #[test]
    fn test_successful_load_replaces_records() {
        let mut controller = controller();
        controller.begin_loading();
        controller.finish_loading(
            Ok(vec![DynamicRecord::new("9").with("name", "Zed")]),
            Notice::listing_failed("ships"),
        );
        assert_eq!(controller.records().len(), 1);
        assert!(controller.take_notice().is_none());
    }
}
