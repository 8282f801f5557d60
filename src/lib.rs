//! # fleetview
//!
//! A catalog and detail viewer for the SpaceX fleet (rockets and ships),
//! built around a small filter-sort engine and a tabular display contract.
//!
//! ## Features
//!
//! - **Filter-Sort Engine**: derive a view from any collection of records and a query state
//! - **Tabular Display Contract**: columns with render strategies, loading and empty states, sort targets
//! - **Typed Records**: entities expose their attributes through [`impl_record!`]
//! - **Guarded Routes**: session-based auth gate with redirect back to the requested view
//! - **Cached Fetching**: SpaceX v4 API client behind a short-lived request cache
//! - **Theming**: light and dark palettes for the text surface
//!
//! ## Quick Start
//!
//! ```rust
//! use fleetview::prelude::*;
//!
//! let ships = vec![
//!     DynamicRecord::new("1").with("name", "Bob").with("type", "Tug"),
//!     DynamicRecord::new("2").with("name", "Amy").with("type", "Barge"),
//! ];
//!
//! let query = QueryState::sorted_by("name").with_search("b");
//! let view = derive_view(&ships, &query);
//! assert_eq!(view.ids(), vec!["2", "1"]);
//! ```

pub mod app;
pub mod config;
pub mod core;
pub mod entities;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        auth::{AuthContext, AuthPolicy, Credentials, Session, SessionStore, User},
        error::{FleetError, Result},
        field::{FieldKind, FieldValue},
        query::{QueryState, SortDirection},
        record::{DynamicRecord, Record},
        table::{CellRender, Column, TableBody, TableFrame, TableHandler, TableSurface},
        theme::{Theme, ThemeMode, ThemeStore},
        view::{View, derive_view},
    };

    // === Macros ===
    pub use crate::impl_record;

    // === Entities ===
    pub use crate::entities::{Entity, Rocket, Ship};

    // === Storage ===
    pub use crate::storage::{
        CachedDataSource, DataSource, FileSessionStore, FileThemeStore, InMemoryDataSource,
        InMemorySessionStore, InMemoryThemeStore, SpaceXClient,
    };

    // === App ===
    pub use crate::app::{
        App, Screen,
        controller::ListingController,
        render::TextSurface,
        router::{Navigation, Route},
    };

    // === Config ===
    pub use crate::config::FleetConfig;

    // === External dependencies ===
    pub use async_trait::async_trait;
}
