//! Config module.
//! Loads the application config (API endpoint, default profile fields, log filter)
//! from an optional JSON file. Uses serde for JSON serialization.
//! Missing keys fall back to defaults; env vars override the file.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;

pub const DEFAULT_API_URL: &str = "https://api.wikitree.com/api.php";

/// Env var overriding `api_url`
pub const API_URL_ENV: &str = "WIKITREE_API_URL";
/// Env var overriding `log_filter`
pub const LOG_FILTER_ENV: &str = "FANCHART_LOG";

/// Profile fields requested by default (enough to draw a fan chart).
const DEFAULT_FIELDS: &[&str] = &[
    "Id",
    "Name",
    "FirstName",
    "LastNameAtBirth",
    "BirthName",
    "BirthNamePrivate",
    "Gender",
    "BirthDate",
    "BirthLocation",
    "DeathDate",
    "DeathLocation",
    "Father",
    "Mother",
    "Photo",
    "PhotoData",
    "Parents",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api_url: String,
    pub fields: Vec<String>,
    /// `EnvFilter` directive string, e.g. "fanchart=debug"
    pub log_filter: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            fields: DEFAULT_FIELDS.iter().map(|f| f.to_string()).collect(),
            log_filter: None,
        }
    }
}

impl AppConfig {
    /// Loads config from `path` if given, otherwise defaults, then applies env overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Applies overrides from a variable lookup (the process env in production).
    fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(API_URL_ENV).filter(|u| !u.is_empty()) {
            self.api_url = url;
        }
        if let Some(filter) = lookup(LOG_FILTER_ENV).filter(|f| !f.is_empty()) {
            self.log_filter = Some(filter);
        }
    }
}
