use crate::fetch::DEFAULT_CONCURRENCY;
use serde::Deserialize;
use std::path::PathBuf;

/// Base API URL of the GitHub API
pub const DEFAULT_API_URL: &str = "https://api.github.com/";

/// Base URL of the public gist pages
pub const DEFAULT_GIST_URL: &str = "https://gist.github.com/";

/// Tunable settings for a run
///
/// Every key is optional in the TOML file; missing keys fall back to the
/// values GitHub itself expects.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Settings {
    /// Base URL of the REST API, with trailing slash
    pub api_url: String,

    /// Base URL of the HTML gist pages, with trailing slash
    pub gist_url: String,

    /// Maximum number of requests in flight at once
    pub workers: usize,

    /// Items requested per listing page
    pub per_page: u32,

    /// Per-request timeout enforced by the HTTP client (seconds)
    pub timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            gist_url: DEFAULT_GIST_URL.to_string(),
            workers: DEFAULT_CONCURRENCY,
            per_page: 100,
            timeout_secs: 30,
        }
    }
}

/// Which gists a run retrieves
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// The authenticated account's own listing
    Own,

    /// Another account's public listing
    User(String),

    /// Comma-separated gist IDs or URLs
    Ids(String),

    /// File with one gist ID or URL per line
    File(PathBuf),
}

impl Target {
    /// Resolves the target from the mutually exclusive selector flags
    pub fn from_flags(username: Option<String>, url: Option<String>, file: Option<PathBuf>) -> Self {
        let non_empty = |s: Option<String>| s.map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        if let Some(ids) = non_empty(url) {
            Target::Ids(ids)
        } else if let Some(path) = file.filter(|p| !p.as_os_str().is_empty()) {
            Target::File(path)
        } else if let Some(user) = non_empty(username) {
            Target::User(user)
        } else {
            Target::Own
        }
    }

    /// Returns the listing endpoint for the listing targets
    pub fn listing_url(&self, api_url: &str) -> Option<String> {
        match self {
            Target::Own => Some(format!("{}gists", api_url)),
            Target::User(user) => Some(format!("{}users/{}/gists", api_url, user)),
            Target::Ids(_) | Target::File(_) => None,
        }
    }
}
