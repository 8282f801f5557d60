//! Landing view

use crate::app::render::{HOME, Templates};
use crate::core::error::Result;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Stat {
    pub title: &'static str,
    pub value: &'static str,
}

/// Headline figures shown on the landing view
pub const FLEET_STATS: [Stat; 3] = [
    Stat {
        title: "Ships",
        value: "27+",
    },
    Stat {
        title: "Rockets",
        value: "8+",
    },
    Stat {
        title: "Launches",
        value: "200+",
    },
];

#[derive(Serialize)]
struct HomeContext {
    stats: &'static [Stat],
}

pub fn render(templates: &Templates) -> Result<String> {
    templates.render(HOME, &HomeContext { stats: &FLEET_STATS })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_home_lists_stats() {
        let templates = Templates::new().unwrap();
        let out = render(&templates).unwrap();
        assert!(out.contains("SpaceX Fleet Statistics"));
        assert!(out.contains("  Ships: 27+"));
        assert!(out.contains("  Launches: 200+"));
    }
}
