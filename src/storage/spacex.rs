//! HTTP client for the SpaceX v4 REST API

use crate::config::ApiConfig;
use crate::core::error::FetchError;
use crate::entities::{Entity, Rocket, Ship};
use crate::storage::DataSource;
use anyhow::Result;
use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

/// Public base URL of the API
pub const DEFAULT_BASE_URL: &str = "https://api.spacexdata.com/v4";

/// Data source backed by the SpaceX REST API
#[derive(Debug, Clone)]
pub struct SpaceXClient {
    http: reqwest::Client,
    base_url: Url,
}

impl SpaceXClient {
    /// Create a client for the given base URL with a request timeout
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| anyhow::anyhow!("Invalid API base URL '{}': {}", base_url, e))?;
        if base_url.cannot_be_a_base() {
            anyhow::bail!("API base URL '{}' cannot have path segments", base_url);
        }

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("fleetview/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { http, base_url })
    }

    pub fn from_config(config: &ApiConfig) -> Result<Self> {
        Self::new(&config.base_url, Duration::from_secs(config.timeout_secs))
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url_for(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty();
            path.extend(segments);
        }
        url
    }

    /// GET a JSON document; `Ok(None)` on 404
    async fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<Option<T>, FetchError> {
        let url = self.url_for(segments);
        debug!(%url, "fetching");

        let response = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(|e| FetchError::Transport {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            debug!(%url, "not found");
            return Ok(None);
        }
        if !status.is_success() {
            warn!(%url, status = status.as_u16(), "request failed");
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.json::<T>().await.map_err(|e| FetchError::Decode {
            url: url.to_string(),
            message: e.to_string(),
        })?;
        Ok(Some(body))
    }

    /// List every record of an entity type
    pub async fn list<E: Entity + DeserializeOwned>(&self) -> Result<Vec<E>, FetchError> {
        let resource = E::resource_name();
        match self.get_json::<Vec<E>>(&[resource]).await? {
            Some(items) => {
                debug!(resource, count = items.len(), "listed");
                Ok(items)
            }
            None => Err(FetchError::Status {
                url: self.url_for(&[resource]).to_string(),
                status: StatusCode::NOT_FOUND.as_u16(),
            }),
        }
    }

    /// Get one record of an entity type by ID
    pub async fn get<E: Entity + DeserializeOwned>(&self, id: &str) -> Result<Option<E>, FetchError> {
        self.get_json::<E>(&[E::resource_name(), id]).await
    }
}

#[async_trait]
impl DataSource for SpaceXClient {
    async fn list_ships(&self) -> Result<Vec<Ship>> {
        Ok(self.list::<Ship>().await?)
    }

    async fn get_ship(&self, id: &str) -> Result<Option<Ship>> {
        Ok(self.get::<Ship>(id).await?)
    }

    async fn list_rockets(&self) -> Result<Vec<Rocket>> {
        Ok(self.list::<Rocket>().await?)
    }

    async fn get_rocket(&self, id: &str) -> Result<Option<Rocket>> {
        Ok(self.get::<Rocket>(id).await?)
    }
}
