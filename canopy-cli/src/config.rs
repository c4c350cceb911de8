//! TOML configuration for the Canopy CLI.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Root configuration structure as read from the `canopy.toml` file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub moderation: ModerationConfig,
    #[serde(default)]
    pub geocoding: GeocodingConfig,
}

/// Backend API section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Root URL of the platform backend.
    #[serde(default = "default_base_url")]
    pub base_url: Url,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

fn default_base_url() -> Url {
    Url::parse("http://localhost:3001").expect("valid default URL")
}

/// Moderation section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModerationConfig {
    /// Shared code that unlocks the add/remove event forms. Gating, not
    /// authentication: anyone who knows it can moderate. Moderation
    /// commands refuse to run while this is unset.
    #[serde(default)]
    pub secret: String,
}

/// Geocoding section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodingConfig {
    /// Root URL of a Nominatim-compatible geocoding service.
    #[serde(default = "default_geocoding_endpoint")]
    pub endpoint: Url,
}

impl Default for GeocodingConfig {
    fn default() -> Self {
        Self {
            endpoint: default_geocoding_endpoint(),
        }
    }
}

fn default_geocoding_endpoint() -> Url {
    Url::parse("https://nominatim.openstreetmap.org").expect("valid default URL")
}

impl FileConfig {
    /// Load the TOML file, falling back to defaults when it does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!(path = %path.display(), "no config file found, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }
}
