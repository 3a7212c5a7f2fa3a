//! Error types for the WikiTree API client and config loading.

use thiserror::Error;

/// Errors surfaced by [`crate::api::TreeApi`].
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request to WikiTree API failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("WikiTree API error {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("could not decode WikiTree API response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("WikiTree API returned an empty result")]
    EmptyResponse,

    /// The first result element carried no `person` object.
    #[error("no person returned for key '{key}' (status: {status})")]
    MissingPerson { key: String, status: String },
}

/// Errors while loading [`crate::config::AppConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}
