//! Rocket model

use crate::core::format::{group_thousands, truncate_with_ellipsis};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Cost at which the cost gauge is full
pub const COST_GAUGE_CEILING: f64 = 100_000_000.0;

/// Characters of description shown on listing cards
pub const CARD_SUMMARY_CHARS: usize = 250;

/// A length in both unit systems
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Dimension {
    pub meters: Option<f64>,
    pub feet: Option<f64>,
}

impl Dimension {
    pub fn label(&self) -> String {
        format!("{}m / {}ft", unit(self.meters), unit(self.feet))
    }
}

/// A mass in both unit systems
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Mass {
    pub kg: Option<f64>,
    pub lb: Option<f64>,
}

impl Mass {
    pub fn label(&self) -> String {
        let grouped = |v: Option<f64>| v.map(group_thousands).unwrap_or_else(|| "?".to_string());
        format!("{}kg / {}lb", grouped(self.kg), grouped(self.lb))
    }
}

fn unit(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "?".to_string())
}

/// A launch vehicle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rocket {
    pub id: String,
    pub name: String,

    #[serde(rename = "type", default)]
    pub rocket_type: Option<String>,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub flickr_images: Vec<String>,

    #[serde(default)]
    pub active: bool,

    #[serde(default)]
    pub cost_per_launch: f64,

    #[serde(default)]
    pub success_rate_pct: f64,

    /// ISO date (`YYYY-MM-DD`)
    #[serde(default)]
    pub first_flight: String,

    #[serde(default)]
    pub height: Dimension,

    #[serde(default)]
    pub diameter: Dimension,

    #[serde(default)]
    pub mass: Mass,

    #[serde(default)]
    pub stages: Option<i64>,

    #[serde(default)]
    pub boosters: Option<i64>,

    #[serde(default)]
    pub country: Option<String>,

    #[serde(default)]
    pub company: Option<String>,

    #[serde(default)]
    pub wikipedia: Option<String>,
}

crate::impl_record!(Rocket, "rocket", "rockets", id: id, {
    "id" => id,
    "name" => name,
    "type" => rocket_type,
    "description" => description,
    "active" => active,
    "cost_per_launch" => cost_per_launch,
    "success_rate_pct" => success_rate_pct,
    "first_flight" => first_flight,
    "stages" => stages,
    "boosters" => boosters,
    "country" => country,
    "company" => company,
    "wikipedia" => wikipedia,
});

impl Rocket {
    pub fn status_label(&self) -> &'static str {
        if self.active { "Active" } else { "Inactive" }
    }

    /// Cost with a dollar sign and grouped digits
    pub fn cost_label(&self) -> String {
        format!("${}", group_thousands(self.cost_per_launch))
    }

    /// Share of the cost gauge filled, capped at 100
    pub fn cost_gauge_pct(&self) -> f64 {
        (self.cost_per_launch / COST_GAUGE_CEILING * 100.0).min(100.0)
    }

    /// Uncapped, rounded gauge caption (e.g. `"50%"`)
    pub fn cost_gauge_label(&self) -> String {
        format!(
            "{}%",
            (self.cost_per_launch / COST_GAUGE_CEILING * 100.0).round()
        )
    }

    pub fn first_flight_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.first_flight, "%Y-%m-%d").ok()
    }

    /// First flight as `M/D/YYYY`, or the raw value if it is not a date
    pub fn first_flight_label(&self) -> String {
        match self.first_flight_date() {
            Some(date) => date.format("%-m/%-d/%Y").to_string(),
            None => self.first_flight.clone(),
        }
    }

    /// Short description for listing cards
    pub fn summary(&self) -> String {
        truncate_with_ellipsis(&self.description, CARD_SUMMARY_CHARS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::field::FieldValue;
    use crate::core::record::Record;
    use serde_json::json;

    fn falcon9() -> Rocket {
        serde_json::from_value(json!({
            "id": "5e9d0d95eda69973a809d1ec",
            "name": "Falcon 9",
            "type": "rocket",
            "active": true,
            "stages": 2,
            "boosters": 0,
            "cost_per_launch": 50000000,
            "success_rate_pct": 98,
            "first_flight": "2010-06-04",
            "country": "United States",
            "company": "SpaceX",
            "height": { "meters": 70, "feet": 229.6 },
            "diameter": { "meters": 3.7, "feet": 12 },
            "mass": { "kg": 549054, "lb": 1207920 },
            "flickr_images": ["https://farm1.staticflickr.com/929/28787338307_3453a11a77_b.jpg"],
            "wikipedia": "https://en.wikipedia.org/wiki/Falcon_9",
            "description": "Falcon 9 is a two-stage rocket designed and manufactured by SpaceX."
        }))
        .unwrap()
    }

    #[test]
    fn test_labels() {
        let rocket = falcon9();
        assert_eq!(rocket.status_label(), "Active");
        assert_eq!(rocket.cost_label(), "$50,000,000");
        assert_eq!(rocket.cost_gauge_pct(), 50.0);
        assert_eq!(rocket.cost_gauge_label(), "50%");
        assert_eq!(rocket.first_flight_label(), "6/4/2010");
        assert_eq!(rocket.height.label(), "70m / 229.6ft");
        assert_eq!(rocket.mass.label(), "549,054kg / 1,207,920lb");
    }

    #[test]
    fn test_cost_gauge_is_capped() {
        let mut rocket = falcon9();
        rocket.cost_per_launch = 150_000_000.0;
        assert_eq!(rocket.cost_gauge_pct(), 100.0);
        assert_eq!(rocket.cost_gauge_label(), "150%");
    }

    #[test]
    fn test_unparseable_first_flight_is_shown_raw() {
        let mut rocket = falcon9();
        rocket.first_flight = "TBD".to_string();
        assert_eq!(rocket.first_flight_label(), "TBD");
    }

    #[test]
    fn test_numbers_are_records_numbers() {
        let rocket = falcon9();
        assert_eq!(
            rocket.field_value("cost_per_launch").and_then(|v| v.as_number()),
            Some(50_000_000.0)
        );
        assert_eq!(rocket.field_value("stages"), Some(FieldValue::Integer(2)));
    }

    #[test]
    fn test_summary() {
        let rocket = falcon9();
        assert!(rocket.summary().ends_with("..."));
    }
}
