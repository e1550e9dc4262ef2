use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Owner block of a gist as returned by the API
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Owner {
    pub login: String,
}

/// One gist as decoded from the REST API
///
/// A request that did not produce a gist is still represented here, with
/// `error` holding the failure text so the item is reported instead of
/// silently dropped.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawItem {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub html_url: String,

    #[serde(default)]
    pub public: bool,

    pub created_at: Option<DateTime<Utc>>,

    pub updated_at: Option<DateTime<Utc>>,

    pub description: Option<String>,

    #[serde(default)]
    pub comments: u64,

    pub owner: Option<Owner>,

    #[serde(skip)]
    pub error: Option<String>,
}

impl RawItem {
    /// Builds an item standing in for a failed request
    pub fn failed(id: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            error: Some(error.into()),
            ..Self::default()
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// Login of the owning account, if the API reported one
    pub fn owner_login(&self) -> Option<&str> {
        self.owner.as_ref().map(|o| o.login.as_str())
    }
}

/// Normalized, user-facing record for one gist
///
/// Absent values are omitted from the JSON output, so a count of zero
/// (`Some(0)`) stays distinguishable from a count that was never retrieved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResultRecord {
    #[serde(rename = "gist_id", skip_serializing_if = "String::is_empty")]
    pub id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub public: Option<bool>,

    #[serde(rename = "create_at", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub stars: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub forks: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ResultRecord {
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}
