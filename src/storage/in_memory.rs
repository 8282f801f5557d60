//! In-memory data source for testing and development

use crate::entities::{Dimension, Mass, Mission, Rocket, Ship};
use crate::storage::DataSource;
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use std::sync::{Arc, RwLock};

/// In-memory data source
///
/// Records are served in insertion order. Uses RwLock for thread-safe access.
#[derive(Clone, Default)]
pub struct InMemoryDataSource {
    ships: Arc<RwLock<Vec<Ship>>>,
    rockets: Arc<RwLock<Vec<Rocket>>>,
}

impl InMemoryDataSource {
    /// Create an empty data source
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ships(self, ships: Vec<Ship>) -> Self {
        if let Ok(mut guard) = self.ships.write() {
            *guard = ships;
        }
        self
    }

    pub fn with_rockets(self, rockets: Vec<Rocket>) -> Self {
        if let Ok(mut guard) = self.rockets.write() {
            *guard = rockets;
        }
        self
    }

    /// Add a ship at the end of the listing
    pub fn push_ship(&self, ship: Ship) -> Result<()> {
        self.ships
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?
            .push(ship);
        Ok(())
    }

    /// A small fleet with two ships and two rockets
    pub fn sample() -> Self {
        Self::new()
            .with_ships(vec![
                sample_ship("ship-1", "GO Ms Tree", "High Speed Craft", "Port Canaveral", true),
                sample_ship("ship-2", "American Champion", "Tug", "Port of Los Angeles", false),
            ])
            .with_rockets(vec![
                sample_rocket("rocket-1", "Falcon 1", false, 6_700_000.0, "2006-03-24"),
                sample_rocket("rocket-2", "Falcon 9", true, 50_000_000.0, "2010-06-04"),
            ])
    }
}

fn sample_ship(id: &str, name: &str, ship_type: &str, port: &str, active: bool) -> Ship {
    Ship {
        id: id.to_string(),
        name: name.to_string(),
        ship_type: Some(ship_type.to_string()),
        home_port: Some(port.to_string()),
        image: None,
        active,
        year_built: Some(2015),
        roles: vec!["Fairing Recovery".to_string()],
        mass_kg: Some(449_964.0),
        mass_lbs: Some(992_000.0),
        missions: vec![Mission {
            name: "COTS 1".to_string(),
            flight: Some(serde_json::json!(7)),
        }],
        launches: Vec::new(),
        model: None,
        link: None,
    }
}

fn sample_rocket(id: &str, name: &str, active: bool, cost: f64, first_flight: &str) -> Rocket {
    Rocket {
        id: id.to_string(),
        name: name.to_string(),
        rocket_type: Some("rocket".to_string()),
        description: format!("{} is a launch vehicle developed by SpaceX.", name),
        flickr_images: vec![
            "https://imgur.com/DaCfMsj.jpg".to_string(),
            "https://imgur.com/azYafd8.jpg".to_string(),
        ],
        active,
        cost_per_launch: cost,
        success_rate_pct: 40.0,
        first_flight: first_flight.to_string(),
        height: Dimension {
            meters: Some(22.25),
            feet: Some(73.0),
        },
        diameter: Dimension {
            meters: Some(1.68),
            feet: Some(5.5),
        },
        mass: Mass {
            kg: Some(30_146.0),
            lb: Some(66_460.0),
        },
        stages: Some(2),
        boosters: Some(0),
        country: Some("Republic of the Marshall Islands".to_string()),
        company: Some("SpaceX".to_string()),
        wikipedia: Some(format!("https://en.wikipedia.org/wiki/{}", name.replace(' ', "_"))),
    }
}

#[async_trait]
impl DataSource for InMemoryDataSource {
    async fn list_ships(&self) -> Result<Vec<Ship>> {
        let ships = self
            .ships
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(ships.clone())
    }

    async fn get_ship(&self, id: &str) -> Result<Option<Ship>> {
        let ships = self
            .ships
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(ships.iter().find(|ship| ship.id == id).cloned())
    }

    async fn list_rockets(&self) -> Result<Vec<Rocket>> {
        let rockets = self
            .rockets
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(rockets.clone())
    }

    async fn get_rocket(&self, id: &str) -> Result<Option<Rocket>> {
        let rockets = self
            .rockets
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(rockets.iter().find(|rocket| rocket.id == id).cloned())
    }
}
