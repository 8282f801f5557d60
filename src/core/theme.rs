//! Light and dark color schemes

use crate::core::error::SessionError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Active color scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }
}

impl FromStr for ThemeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "light" => Ok(ThemeMode::Light),
            "dark" => Ok(ThemeMode::Dark),
            other => Err(format!("unknown theme '{}', expected light or dark", other)),
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThemeMode::Light => f.write_str("light"),
            ThemeMode::Dark => f.write_str("dark"),
        }
    }
}

/// A 24-bit color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Parse `#RRGGBB` (an `AA` suffix is accepted and ignored)
    pub fn parse_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#')?;
        if digits.len() != 6 && digits.len() != 8 {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(digits.get(i..i + 2)?, 16).ok();
        Some(Rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    fn ansi_fg(self) -> String {
        format!("\x1b[38;2;{};{};{}m", self.0, self.1, self.2)
    }
}

/// Ten shades of one color, lightest first
pub type Shades = [&'static str; 10];

const BRAND: Shades = [
    "#e0f2ff", "#b8e0ff", "#8cccff", "#5eb8ff", "#36a3ff", "#1a8eff", "#007aff", "#0061cc",
    "#00499a", "#003169",
];

const SUCCESS: Shades = [
    "#ECFDF5", "#D1FAE5", "#A7F3D0", "#6EE7B7", "#34D399", "#10B981", "#059669", "#047857",
    "#065F46", "#064E3B",
];

const WARNING: Shades = [
    "#FFFBEB", "#FEF3C7", "#FDE68A", "#FCD34D", "#FBBF24", "#F59E0B", "#D97706", "#B45309",
    "#92400E", "#78350F",
];

const ERROR: Shades = [
    "#FEF2F2", "#FEE2E2", "#FECACA", "#FCA5A5", "#F87171", "#EF4444", "#DC2626", "#B91C1C",
    "#991B1B", "#7F1D1D",
];

const NEUTRAL: Shades = [
    "#FBFBFC", "#EEEFF2", "#DADBE2", "#CBD5E1", "#8D90A7", "#6F728F", "#454966", "#383A4B",
    "#313038", "#21222C",
];

const DARK: Shades = [
    "#d5d7e0", "#acaebf", "#8c8fa3", "#666980", "#4d4f66", "#34354a", "#2b2c3d", "#1d1e30",
    "#0c0d21", "#01010a",
];

/// Semantic roles the text surface paints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Accent,
    Success,
    Warning,
    Danger,
    Dimmed,
}

/// A resolved color scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub mode: ThemeMode,
    /// Whether output may carry ANSI color escapes
    pub color: bool,
}

impl Theme {
    pub fn new(mode: ThemeMode, color: bool) -> Self {
        Self { mode, color }
    }

    /// Flip between light and dark
    pub fn toggle(&mut self) {
        self.mode = self.mode.toggled();
    }

    /// Hex color for a role in the current mode
    ///
    /// Dark mode uses lighter shades so text stays readable on dark
    /// backgrounds.
    pub fn hex(&self, role: Role) -> &'static str {
        let shade = match self.mode {
            ThemeMode::Light => 6,
            ThemeMode::Dark => 4,
        };
        match role {
            Role::Accent => BRAND[shade],
            Role::Success => SUCCESS[shade],
            Role::Warning => WARNING[shade],
            Role::Danger => ERROR[shade],
            Role::Dimmed => match self.mode {
                ThemeMode::Light => NEUTRAL[5],
                ThemeMode::Dark => DARK[2],
            },
        }
    }

    /// Page background for the current mode
    pub fn background(&self) -> &'static str {
        match self.mode {
            ThemeMode::Light => "#FFFFFF",
            ThemeMode::Dark => DARK[7],
        }
    }

    /// Wrap `text` in the role's color when color output is enabled
    pub fn paint(&self, role: Role, text: &str) -> String {
        if !self.color {
            return text.to_string();
        }
        match Rgb::parse_hex(self.hex(role)) {
            Some(rgb) => format!("{}{}\x1b[0m", rgb.ansi_fg(), text),
            None => text.to_string(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::new(ThemeMode::Light, false)
    }
}

/// Persistence for the chosen color scheme
pub trait ThemeStore: Send + Sync {
    /// Load the persisted mode, if one was ever saved
    fn load(&self) -> Result<Option<ThemeMode>, SessionError>;

    fn save(&self, mode: ThemeMode) -> Result<(), SessionError>;
}
