//! Core module: the filter-sort engine, the table contract and the types
//! they share

pub mod auth;
pub mod error;
pub mod field;
pub mod format;
pub mod query;
pub mod record;
pub mod table;
pub mod theme;
pub mod view;

pub use auth::{AuthContext, AuthPolicy, Credentials, Session, SessionStore, User};
pub use error::{FleetError, Result};
pub use field::{FieldKind, FieldValue};
pub use query::{QueryState, SortDirection};
pub use record::{DynamicRecord, Record};
pub use table::{CellRender, Column, TableFrame, TableHandler, TableSurface};
pub use theme::{Theme, ThemeMode, ThemeStore};
pub use view::{View, derive_view};
