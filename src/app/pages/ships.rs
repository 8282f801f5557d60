//! Ships listing: a searchable, sortable table

use crate::app::controller::ListingController;
use crate::app::notify::Notice;
use crate::app::render::TextSurface;
use crate::app::router::Route;
use crate::core::query::QueryState;
use crate::core::table::{Column, TableSurface};
use crate::core::theme::{Role, Theme};
use crate::entities::Ship;
use crate::storage::DataSource;

pub const TITLE: &str = "Ships";
pub const SEARCH_PLACEHOLDER: &str = "Search ships...";

/// Attributes the search box looks at
pub const SEARCH_FIELDS: [&str; 3] = ["name", "type", "home_port"];

pub fn columns(theme: Theme) -> Vec<Column<Ship>> {
    vec![
        Column::formatted("name", "Name", move |ship: &Ship| {
            theme.paint(Role::Accent, &ship.name)
        }),
        Column::raw("type", "Type"),
        Column::raw("home_port", "Home Port"),
        Column::formatted("active", "Status", move |ship: &Ship| {
            let role = if ship.active { Role::Success } else { Role::Danger };
            theme.paint(role, ship.status_label())
        }),
    ]
}

/// Sorted by name ascending with an empty search
pub fn initial_query() -> QueryState {
    QueryState::sorted_by("name").with_search_fields(SEARCH_FIELDS)
}

pub fn controller() -> ListingController<Ship> {
    ListingController::new(initial_query(), |ship: &Ship| {
        Route::ShipDetail(ship.id.clone())
    })
}

/// Fetch the collection into the controller
pub async fn load(controller: &mut ListingController<Ship>, source: &dyn DataSource) {
    controller.begin_loading();
    let result = source.list_ships().await;
    controller.finish_loading(result, Notice::listing_failed("ships"));
}

/// Render the current state of the listing
pub fn render(controller: &ListingController<Ship>, surface: &mut TextSurface) -> String {
    let columns = columns(surface.theme());
    let snapshot = controller.snapshot();
    let frame = snapshot
        .frame(TITLE, &columns)
        .with_placeholder(SEARCH_PLACEHOLDER);
    surface.render(&frame)
}
