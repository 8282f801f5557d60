//! Entity models for the fleet catalog
//!
//! Each model mirrors the payload of the SpaceX v4 API and exposes its scalar
//! attributes as a [`Record`] through [`impl_record!`](crate::impl_record).

pub mod macros;
pub mod rocket;
pub mod ship;

pub use rocket::{Dimension, Mass, Rocket};
pub use ship::{Mission, Ship};

use crate::core::record::Record;

/// A record type served by the data source under its own resource path
pub trait Entity: Record {
    /// Plural resource name, used in API paths and routes (e.g. "ships")
    fn resource_name() -> &'static str;

    /// Singular name used in messages (e.g. "ship")
    fn resource_name_singular() -> &'static str;
}
