//! Rockets listing: status tabs over a grid of cards

use crate::app::carousel::{Carousel, Slide};
use crate::app::notify::Notice;
use crate::app::render::{ROCKET_CARD, Templates};
use crate::app::router::Route;
use crate::core::error::Result;
use crate::core::table::LOADING_MESSAGE;
use crate::core::theme::{Role, Theme};
use crate::entities::Rocket;
use crate::storage::DataSource;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use tracing::warn;

pub const TITLE: &str = "Rockets";

/// Images shown on a listing card
pub const CARD_IMAGES: usize = 2;

/// Status filter of the rockets listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RocketTab {
    #[default]
    All,
    Active,
    Inactive,
}

impl RocketTab {
    pub const ALL: [RocketTab; 3] = [RocketTab::All, RocketTab::Active, RocketTab::Inactive];

    pub fn label(self) -> &'static str {
        match self {
            RocketTab::All => "All Rockets",
            RocketTab::Active => "Active",
            RocketTab::Inactive => "Inactive",
        }
    }

    pub fn matches(self, rocket: &Rocket) -> bool {
        match self {
            RocketTab::All => true,
            RocketTab::Active => rocket.active,
            RocketTab::Inactive => !rocket.active,
        }
    }
}

impl FromStr for RocketTab {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Ok(RocketTab::All),
            "active" => Ok(RocketTab::Active),
            "inactive" => Ok(RocketTab::Inactive),
            other => Err(format!("unknown tab '{}', expected all, active or inactive", other)),
        }
    }
}

impl fmt::Display for RocketTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Template context of one card
#[derive(Debug, Clone, Serialize)]
pub struct RocketCard {
    pub id: String,
    pub name: String,
    pub status: String,
    pub slides: Vec<Slide>,
    pub indicators: String,
    pub summary: String,
    pub path: String,
}

impl RocketCard {
    pub fn new(rocket: &Rocket, theme: &Theme) -> Self {
        let carousel = Carousel::from_images(&rocket.name, &rocket.flickr_images, Some(CARD_IMAGES));
        let role = if rocket.active { Role::Success } else { Role::Danger };
        Self {
            id: rocket.id.clone(),
            name: theme.paint(Role::Accent, &rocket.name),
            status: theme.paint(role, rocket.status_label()),
            indicators: carousel.indicators(),
            slides: carousel.slides().to_vec(),
            summary: rocket.summary(),
            path: Route::RocketDetail(rocket.id.clone()).path(),
        }
    }
}

/// State of the rockets listing
#[derive(Debug, Default)]
pub struct RocketsPage {
    rockets: Vec<Rocket>,
    tab: RocketTab,
    loading: bool,
    notice: Option<Notice>,
}

impl RocketsPage {
    pub fn new(tab: RocketTab) -> Self {
        Self {
            tab,
            ..Self::default()
        }
    }

    pub fn tab(&self) -> RocketTab {
        self.tab
    }

    pub fn select_tab(&mut self, tab: RocketTab) {
        self.tab = tab;
    }

    pub async fn load(&mut self, source: &dyn DataSource) {
        self.loading = true;
        let result = source.list_rockets().await;
        self.loading = false;
        match result {
            Ok(rockets) => self.rockets = rockets,
            Err(err) => {
                warn!(error = %err, "rockets failed to load");
                self.rockets.clear();
                self.notice = Some(Notice::listing_failed("rockets"));
            }
        }
    }

    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }

    /// Rockets under the selected tab, in API order
    pub fn visible(&self) -> impl Iterator<Item = &Rocket> {
        self.rockets.iter().filter(move |rocket| self.tab.matches(rocket))
    }

    pub fn cards(&self, theme: &Theme) -> Vec<RocketCard> {
        self.visible().map(|rocket| RocketCard::new(rocket, theme)).collect()
    }

    pub fn render(&self, templates: &Templates, theme: &Theme) -> Result<String> {
        let tabs = RocketTab::ALL
            .iter()
            .map(|tab| {
                if *tab == self.tab {
                    theme.paint(Role::Accent, &format!("[{}]", tab.label()))
                } else {
                    tab.label().to_string()
                }
            })
            .collect::<Vec<_>>()
            .join("  ");

        let mut out = format!("{}\n{}\n\n", theme.paint(Role::Accent, TITLE), tabs);
        if self.loading {
            out.push_str(LOADING_MESSAGE);
            out.push('\n');
            return Ok(out);
        }
        for card in self.cards(theme) {
            out.push_str(&templates.render(ROCKET_CARD, &card)?);
            out.push('\n');
        }
        Ok(out)
    }
}
