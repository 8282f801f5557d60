//! Ship model

use serde::{Deserialize, Serialize};

/// A mission a ship took part in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mission {
    pub name: String,
    /// Flight number; the API has served both numbers and strings here
    #[serde(default)]
    pub flight: Option<serde_json::Value>,
}

impl Mission {
    pub fn flight_label(&self) -> String {
        match &self.flight {
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(serde_json::Value::Null) | None => "?".to_string(),
            Some(other) => other.to_string(),
        }
    }
}

/// A support ship of the fleet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ship {
    pub id: String,
    pub name: String,

    #[serde(rename = "type", default)]
    pub ship_type: Option<String>,

    #[serde(default)]
    pub home_port: Option<String>,

    #[serde(default)]
    pub image: Option<String>,

    #[serde(default)]
    pub active: bool,

    #[serde(default)]
    pub year_built: Option<i64>,

    #[serde(default)]
    pub roles: Vec<String>,

    #[serde(default)]
    pub mass_kg: Option<f64>,

    #[serde(default)]
    pub mass_lbs: Option<f64>,

    #[serde(default)]
    pub missions: Vec<Mission>,

    #[serde(default)]
    pub launches: Vec<String>,

    #[serde(default)]
    pub model: Option<String>,

    #[serde(default)]
    pub link: Option<String>,
}

crate::impl_record!(Ship, "ship", "ships", id: id, {
    "id" => id,
    "name" => name,
    "type" => ship_type,
    "home_port" => home_port,
    "image" => image,
    "active" => active,
    "year_built" => year_built,
    "mass_kg" => mass_kg,
    "mass_lbs" => mass_lbs,
    "model" => model,
    "link" => link,
});

impl Ship {
    pub fn status_label(&self) -> &'static str {
        if self.active { "Active" } else { "Inactive" }
    }

    pub fn year_built_label(&self) -> String {
        match self.year_built {
            Some(year) if year != 0 => year.to_string(),
            _ => "Unknown".to_string(),
        }
    }

    pub fn mass_label(&self) -> String {
        match self.mass_kg {
            Some(kg) if kg != 0.0 => {
                let lbs = self
                    .mass_lbs
                    .map(|lbs| lbs.to_string())
                    .unwrap_or_else(|| "?".to_string());
                format!("{} kg ({} lbs)", kg, lbs)
            }
            _ => "Unknown".to_string(),
        }
    }
}
