//! Gistwatcher: comments, stars and forks for a collection of gists
//!
//! This crate retrieves gist metadata either by walking an account's paginated
//! listing or from an explicit list of gist IDs/URLs, and can optionally scrape
//! the star and fork counters from each gist's public page.

pub mod config;
pub mod fetch;
pub mod gist;
pub mod output;
pub mod run;

use thiserror::Error;

/// Main error type for Gistwatcher operations
#[derive(Debug, Error)]
pub enum GistError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to build request for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Pagination error: {0}")]
    Pagination(#[from] fetch::PaginationError),

    #[error("First page request to {url} failed: {message}")]
    FirstPageTransport { url: String, message: String },

    #[error("First page request returned HTTP {status}: {body}")]
    FirstPage { status: u16, body: String },

    #[error("Failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        source: serde_json::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("no Gists were retrieved")]
    NoItemsRetrieved,
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Please use account name and password for GitHub or your access token for using GitHub API")]
    MissingCredentials,

    #[error("Both an access token and a name/password pair were given; use only one")]
    ConflictingCredentials,

    #[error("Both account name and password are required for basic authentication")]
    IncompleteCredentials,
}

/// Result type alias for Gistwatcher operations
pub type Result<T> = std::result::Result<T, GistError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::{Credentials, Settings, Target};
pub use gist::{extract_gist_id, RawItem, ResultRecord};
pub use output::ResultSet;
pub use run::{watch, RunContext};
