//! Data sources and session persistence
//!
//! The listing and detail views only see the [`DataSource`] trait. The HTTP
//! client talks to the SpaceX API, the cache wraps any source with a
//! short-lived request cache, and the in-memory source serves fixed data for
//! tests and development.

pub mod cache;
pub mod in_memory;
pub mod session;
pub mod spacex;

pub use cache::CachedDataSource;
pub use in_memory::InMemoryDataSource;
pub use session::{FileSessionStore, FileThemeStore, InMemorySessionStore, InMemoryThemeStore};
pub use spacex::SpaceXClient;

use crate::entities::{Rocket, Ship};
use anyhow::Result;
use async_trait::async_trait;

/// Source of fleet records
///
/// Implementations are agnostic to transport and authentication. Detail
/// lookups return `Ok(None)` when the record does not exist.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// List all ships in API order
    async fn list_ships(&self) -> Result<Vec<Ship>>;

    /// Get a ship by ID
    async fn get_ship(&self, id: &str) -> Result<Option<Ship>>;

    /// List all rockets in API order
    async fn list_rockets(&self) -> Result<Vec<Rocket>>;

    /// Get a rocket by ID
    async fn get_rocket(&self, id: &str) -> Result<Option<Rocket>>;
}

#[async_trait]
impl<S: DataSource + ?Sized> DataSource for std::sync::Arc<S> {
    async fn list_ships(&self) -> Result<Vec<Ship>> {
        (**self).list_ships().await
    }

    async fn get_ship(&self, id: &str) -> Result<Option<Ship>> {
        (**self).get_ship(id).await
    }

    async fn list_rockets(&self) -> Result<Vec<Rocket>> {
        (**self).list_rockets().await
    }

    async fn get_rocket(&self, id: &str) -> Result<Option<Rocket>> {
        (**self).get_rocket(id).await
    }
}
