//! User settings
//!
//! Read from `<config_dir>/aniview/config.json`. Every key is optional;
//! `ANIVIEW_ENDPOINT` overrides the endpoint from the file.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::anilist::DEFAULT_ENDPOINT;

pub const ENDPOINT_ENV: &str = "ANIVIEW_ENDPOINT";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub endpoint: String,
    pub search_per_page: u32,
    pub genre_per_page: u32,
    pub home_row_size: u32,
    pub debounce_ms: u64,
    pub window_width: f32,
    pub window_height: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            search_per_page: 40,
            genre_per_page: 24,
            home_row_size: 10,
            debounce_ms: 500,
            window_width: 1200.0,
            window_height: 800.0,
        }
    }
}

impl Settings {
    /// Default location of the settings file
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("aniview").join("config.json"))
    }

    /// Load settings, falling back to defaults on any problem
    pub fn load() -> Self {
        let mut settings = match Self::path() {
            Some(path) => match Self::from_file(&path) {
                Ok(Some(settings)) => {
                    tracing::info!("Loaded settings from {:?}", path);
                    settings
                }
                Ok(None) => Self::default(),
                Err(e) => {
                    tracing::warn!("Ignoring settings at {:?}: {}", path, e);
                    Self::default()
                }
            },
            None => Self::default(),
        };

        if let Ok(endpoint) = std::env::var(ENDPOINT_ENV) {
            settings.apply_endpoint_override(&endpoint);
        }
        settings
    }

    /// `Ok(None)` when the file does not exist
    pub fn from_file(path: &Path) -> Result<Option<Self>, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(raw) => Ok(Some(Self::from_json(&raw)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ConfigError::Io(e)),
        }
    }

    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(raw)?)
    }

    fn apply_endpoint_override(&mut self, endpoint: &str) {
        let endpoint = endpoint.trim();
        if !endpoint.is_empty() {
            tracing::debug!("Endpoint overridden by {}: {}", ENDPOINT_ENV, endpoint);
            self.endpoint = endpoint.to_string();
        }
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert_eq!(s.endpoint, "https://graphql.anilist.co");
        assert_eq!(s.search_per_page, 40);
        assert_eq!(s.genre_per_page, 24);
        assert_eq!(s.debounce(), Duration::from_millis(500));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let s = Settings::from_json(r#"{ "debounce_ms": 250, "genre_per_page": 50 }"#).unwrap();
        assert_eq!(s.debounce_ms, 250);
        assert_eq!(s.genre_per_page, 50);
        assert_eq!(s.search_per_page, 40);
        assert_eq!(s.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_malformed_file() {
        assert!(matches!(
            Settings::from_json("{ debounce_ms: }"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let path = std::env::temp_dir().join("aniview-test-does-not-exist").join("config.json");
        assert!(Settings::from_file(&path).unwrap().is_none());
    }

    #[test]
    fn test_endpoint_override() {
        let mut s = Settings::default();
        s.apply_endpoint_override("   ");
        assert_eq!(s.endpoint, DEFAULT_ENDPOINT);
        s.apply_endpoint_override("http://127.0.0.1:4000/graphql");
        assert_eq!(s.endpoint, "http://127.0.0.1:4000/graphql");
    }
}
