//! Ship and rocket detail views

use crate::app::carousel::Carousel;
use crate::app::notify::Notice;
use crate::app::pages::not_found;
use crate::app::render::{ROCKET_DETAIL, SHIP_DETAIL, Templates};
use crate::core::error::Result;
use crate::core::theme::{Role, Theme};
use crate::entities::{Entity, Rocket, Ship};
use crate::storage::DataSource;
use serde::Serialize;
use tracing::warn;

/// Lifecycle of a detail view
#[derive(Debug, Clone, PartialEq)]
pub enum DetailState<T> {
    Loading,
    /// The record does not exist, or could not be fetched
    NotFound,
    Loaded(T),
}

/// A detail view together with the notice its fetch raised
#[derive(Debug, Clone)]
pub struct Detail<T> {
    pub state: DetailState<T>,
    pub notice: Option<Notice>,
}

impl<T: Entity> Detail<T> {
    pub fn loading() -> Self {
        Self {
            state: DetailState::Loading,
            notice: None,
        }
    }

    /// Settle a fetch; errors fall back to the not-found view with a notice
    pub fn settle(id: &str, result: anyhow::Result<Option<T>>) -> Self {
        match result {
            Ok(Some(record)) => Self {
                state: DetailState::Loaded(record),
                notice: None,
            },
            Ok(None) => Self {
                state: DetailState::NotFound,
                notice: None,
            },
            Err(err) => {
                warn!(kind = T::resource_name_singular(), id, error = %err, "detail failed to load");
                Self {
                    state: DetailState::NotFound,
                    notice: Some(Notice::details_failed(T::resource_name_singular())),
                }
            }
        }
    }

    pub fn record(&self) -> Option<&T> {
        match &self.state {
            DetailState::Loaded(record) => Some(record),
            _ => None,
        }
    }

    /// Placeholder shown while loading or when the record is missing
    fn placeholder(&self, templates: &Templates) -> Result<Option<String>> {
        let back_to = T::resource_name();
        match &self.state {
            DetailState::Loading => Ok(Some(format!("Back to {}\n\nLoading...\n", back_to))),
            DetailState::NotFound => {
                not_found::render(templates, Some((T::resource_name_singular(), back_to))).map(Some)
            }
            DetailState::Loaded(_) => Ok(None),
        }
    }
}

pub async fn load_ship(source: &dyn DataSource, id: &str) -> Detail<Ship> {
    Detail::settle(id, source.get_ship(id).await)
}

pub async fn load_rocket(source: &dyn DataSource, id: &str) -> Detail<Rocket> {
    Detail::settle(id, source.get_rocket(id).await)
}

#[derive(Serialize)]
struct MissionLine {
    name: String,
    flight: String,
}

#[derive(Serialize)]
struct ShipDetailContext {
    name: String,
    ship_type: String,
    status: String,
    home_port: String,
    year_built: String,
    mass: String,
    image: Option<String>,
    roles: Vec<String>,
    missions: Vec<MissionLine>,
}

impl ShipDetailContext {
    fn new(ship: &Ship, theme: &Theme) -> Self {
        let role = if ship.active { Role::Success } else { Role::Danger };
        Self {
            name: theme.paint(Role::Accent, &ship.name),
            ship_type: ship.ship_type.clone().unwrap_or_default(),
            status: theme.paint(role, ship.status_label()),
            home_port: ship.home_port.clone().unwrap_or_else(|| "Unknown".to_string()),
            year_built: ship.year_built_label(),
            mass: ship.mass_label(),
            image: ship.image.clone(),
            roles: ship.roles.clone(),
            missions: ship
                .missions
                .iter()
                .map(|mission| MissionLine {
                    name: mission.name.clone(),
                    flight: mission.flight_label(),
                })
                .collect(),
        }
    }
}

pub fn render_ship(detail: &Detail<Ship>, templates: &Templates, theme: &Theme) -> Result<String> {
    if let Some(placeholder) = detail.placeholder(templates)? {
        return Ok(placeholder);
    }
    match detail.record() {
        Some(ship) => templates.render(SHIP_DETAIL, &ShipDetailContext::new(ship, theme)),
        None => Ok(String::new()),
    }
}

#[derive(Serialize)]
struct RocketDetailContext {
    name: String,
    status: String,
    description: String,
    slide: Option<String>,
    slide_position: usize,
    slide_count: usize,
    indicators: String,
    height: String,
    diameter: String,
    mass: String,
    stages: String,
    boosters: String,
    success_rate: String,
    cost: String,
    cost_gauge: String,
    first_flight: String,
    country: String,
    company: String,
    wikipedia: Option<String>,
}

fn count_label(value: Option<i64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "?".to_string())
}

impl RocketDetailContext {
    fn new(rocket: &Rocket, carousel: &Carousel, theme: &Theme) -> Self {
        let role = if rocket.active { Role::Success } else { Role::Danger };
        Self {
            name: theme.paint(Role::Accent, &rocket.name),
            status: theme.paint(role, rocket.status_label()),
            description: rocket.description.clone(),
            slide: carousel.current().map(|slide| slide.image.clone()),
            slide_position: carousel.position() + 1,
            slide_count: carousel.len(),
            indicators: carousel.indicators(),
            height: rocket.height.label(),
            diameter: rocket.diameter.label(),
            mass: rocket.mass.label(),
            stages: count_label(rocket.stages),
            boosters: count_label(rocket.boosters),
            success_rate: rocket.success_rate_pct.to_string(),
            cost: rocket.cost_label(),
            cost_gauge: rocket.cost_gauge_label(),
            first_flight: rocket.first_flight_label(),
            country: rocket.country.clone().unwrap_or_default(),
            company: rocket.company.clone().unwrap_or_default(),
            wikipedia: rocket.wikipedia.clone(),
        }
    }
}

/// Carousel over every image of a rocket
pub fn rocket_carousel(rocket: &Rocket) -> Carousel {
    Carousel::from_images(&rocket.name, &rocket.flickr_images, None)
}

pub fn render_rocket(
    detail: &Detail<Rocket>,
    carousel: &Carousel,
    templates: &Templates,
    theme: &Theme,
) -> Result<String> {
    if let Some(placeholder) = detail.placeholder(templates)? {
        return Ok(placeholder);
    }
    match detail.record() {
        Some(rocket) => templates.render(
            ROCKET_DETAIL,
            &RocketDetailContext::new(rocket, carousel, theme),
        ),
        None => Ok(String::new()),
    }
}
