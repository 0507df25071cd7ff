//! Runtime configuration.
//!
//! Defaults target the public API. `from_env` applies overrides:
//!
//! - `EXPLORER_API_URL` - base URL of the API (a trailing `/` is added if missing)
//! - `EXPLORER_RESIDENT_PREVIEW` - how many residents a location detail resolves

use crate::clients::DEFAULT_PREVIEW;
use crate::view::PageSpan;
use thiserror::Error;
use url::Url;

pub const DEFAULT_API_URL: &str = "https://rickandmortyapi.com/api/";

/// Errors raised while loading configuration.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid API base URL '{value}': {reason}")]
    InvalidBaseUrl { value: String, reason: String },

    #[error("Invalid value for {var}: '{value}'")]
    InvalidNumber { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExplorerConfig {
    /// Always ends in `/` so collection paths join beneath it.
    pub base_url: Url,
    pub resident_preview: usize,
    pub character_window: PageSpan,
    pub location_window: PageSpan,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_API_URL).expect("DEFAULT_API_URL is a valid absolute URL"),
            resident_preview: DEFAULT_PREVIEW,
            character_window: PageSpan::default(),
            location_window: PageSpan::UNBOUNDED,
        }
    }
}

impl ExplorerConfig {
    /// Create a config from environment variables, falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Ok(value) = std::env::var("EXPLORER_API_URL") {
            config.base_url = parse_base_url(&value)?;
        }
        if let Ok(value) = std::env::var("EXPLORER_RESIDENT_PREVIEW") {
            config.resident_preview = value.trim().parse().map_err(|_| ConfigError::InvalidNumber {
                var: "EXPLORER_RESIDENT_PREVIEW",
                value,
            })?;
        }
        Ok(config)
    }

    pub fn with_base_url(mut self, value: &str) -> Result<Self, ConfigError> {
        self.base_url = parse_base_url(value)?;
        Ok(self)
    }
}

/// Parse and normalize a base URL so that it ends in `/`.
pub fn parse_base_url(value: &str) -> Result<Url, ConfigError> {
    let trimmed = value.trim();
    let normalized = if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{trimmed}/")
    };
    let url = Url::parse(&normalized).map_err(|e| ConfigError::InvalidBaseUrl {
        value: value.to_string(),
        reason: e.to_string(),
    })?;
    if url.cannot_be_a_base() {
        return Err(ConfigError::InvalidBaseUrl {
            value: value.to_string(),
            reason: "cannot be a base".into(),
        });
    }
    Ok(url)
}
