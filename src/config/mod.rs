//! Configuration loading and management

use crate::core::error::ConfigError;
use crate::core::theme::ThemeMode;
use crate::storage::spacex::DEFAULT_BASE_URL;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable overriding the API base URL
pub const API_URL_ENV: &str = "FLEETVIEW_API_URL";

/// Remote API settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the SpaceX v4 API
    pub base_url: String,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 10,
        }
    }
}

/// Request cache settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// How long a successful response is reused, in seconds
    pub ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { ttl_secs: 300 }
    }
}

/// Session persistence settings
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// File holding the auth flag; defaults to the user data directory
    pub path: Option<PathBuf>,
}

impl SessionConfig {
    /// Resolved session file path
    pub fn resolved_path(&self) -> PathBuf {
        self.path.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .unwrap_or_else(std::env::temp_dir)
                .join("fleetview")
                .join("auth-storage.json")
        })
    }
}

/// Complete configuration of the application
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FleetConfig {
    pub api: ApiConfig,
    pub cache: CacheConfig,
    pub session: SessionConfig,

    /// Color scheme; when unset the last toggled scheme is restored
    pub theme: Option<ThemeMode>,

    /// Emit ANSI colors
    pub color: bool,

    /// Default tracing filter when `RUST_LOG` is unset
    pub log_filter: String,
}

impl Default for FleetConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            cache: CacheConfig::default(),
            session: SessionConfig::default(),
            theme: None,
            color: true,
            log_filter: "fleetview=warn".to_string(),
        }
    }
}

impl FleetConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` when given, otherwise use defaults; then apply
    /// environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_yaml_file(path)?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from an environment lookup
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(API_URL_ENV).filter(|u| !u.trim().is_empty()) {
            self.api.base_url = url;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api.base_url.trim().is_empty() {
            return Err(ConfigError::Invalid("api.base_url must not be empty".to_string()));
        }
        if self.api.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "api.timeout_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = FleetConfig::default();
        assert_eq!(config.api.base_url, "https://api.spacexdata.com/v4");
        assert_eq!(config.cache.ttl_secs, 300);
        assert_eq!(config.theme, None);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = FleetConfig::from_yaml_str("theme: dark\ncache:\n  ttl_secs: 60\n").unwrap();
        assert_eq!(config.theme, Some(ThemeMode::Dark));
        assert_eq!(config.cache.ttl_secs, 60);
        assert_eq!(config.api.timeout_secs, 10);
    }

    #[test]
    fn test_yaml_serialization() {
        let config = FleetConfig::default();
        let yaml = serde_yaml::to_string(&config).unwrap();

        // Should be able to parse it back
        let parsed = FleetConfig::from_yaml_str(&yaml).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = FleetConfig::from_yaml_str("api:\n  timeout_secs: 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = FleetConfig::from_yaml_str("theme: sepia\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_env_override() {
        let mut config = FleetConfig::default();
        config.apply_env(|key| (key == API_URL_ENV).then(|| "http://localhost:1234".to_string()));
        assert_eq!(config.api.base_url, "http://localhost:1234");

        config.apply_env(|_| Some("  ".to_string()));
        assert_eq!(config.api.base_url, "http://localhost:1234");
    }

    #[test]
    fn test_missing_file() {
        let err = FleetConfig::from_yaml_file("/definitely/not/here.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
