//! `Link` header parsing for paginated API listings
//!
//! GitHub announces adjacent pages in a header of the form
//! `<https://api.github.com/gists?page=2>; rel="next", <...>; rel="last"`.

use regex::Regex;
use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;
use thiserror::Error;
use url::Url;

static LINK_ENTRY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^<(\w.+?)>; rel="(\w.+?)"$"#).expect("link entry pattern is valid")
});

/// Errors raised while discovering the page count
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaginationError {
    #[error("Malformed link header entry: '{0}'")]
    Malformed(String),

    #[error("Invalid URL '{url}' in link header: {message}")]
    InvalidUrl { url: String, message: String },

    #[error("Link to last page has no usable page number: {0}")]
    MissingPageNumber(String),
}

/// Relation of a linked page to the current one
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Relation {
    Next,
    Last,
    Prev,
    First,
    Other(String),
}

impl From<&str> for Relation {
    fn from(rel: &str) -> Self {
        match rel {
            "next" => Relation::Next,
            "last" => Relation::Last,
            "prev" => Relation::Prev,
            "first" => Relation::First,
            other => Relation::Other(other.to_string()),
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Relation::Next => f.write_str("next"),
            Relation::Last => f.write_str("last"),
            Relation::Prev => f.write_str("prev"),
            Relation::First => f.write_str("first"),
            Relation::Other(other) => f.write_str(other),
        }
    }
}

/// One entry of a `Link` header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageToken {
    pub relation: Relation,
    pub url: String,
    pub query: HashMap<String, String>,
}

impl PageToken {
    pub fn query_param(&self, key: &str) -> Option<&str> {
        self.query.get(key).map(String::as_str)
    }
}

/// Parses a `Link` header into page tokens, in header order
///
/// An empty header yields no tokens, meaning the listing has a single page.
///
/// # Example
///
/// ```
/// use gistwatcher::fetch::{parse_link_header, Relation};
///
/// let header = r#"<https://x/y?page=2>; rel="next", <https://x/y?page=5>; rel="last""#;
/// let tokens = parse_link_header(header).unwrap();
/// assert_eq!(tokens[1].relation, Relation::Last);
/// assert_eq!(tokens[1].query_param("page"), Some("5"));
/// ```
pub fn parse_link_header(header: &str) -> Result<Vec<PageToken>, PaginationError> {
    if header.trim().is_empty() {
        return Ok(Vec::new());
    }

    header.split(',').map(parse_entry).collect()
}

fn parse_entry(entry: &str) -> Result<PageToken, PaginationError> {
    let entry = entry.trim();
    let captures = LINK_ENTRY
        .captures(entry)
        .ok_or_else(|| PaginationError::Malformed(entry.to_string()))?;

    let raw_url = &captures[1];
    let url = Url::parse(raw_url).map_err(|e| PaginationError::InvalidUrl {
        url: raw_url.to_string(),
        message: e.to_string(),
    })?;

    Ok(PageToken {
        relation: Relation::from(&captures[2]),
        url: raw_url.to_string(),
        query: url.query_pairs().into_owned().collect(),
    })
}

/// Returns the number of the last page announced by the tokens
///
/// `Ok(None)` when there is no `last` relation.
pub fn last_page(tokens: &[PageToken]) -> Result<Option<u32>, PaginationError> {
    let Some(last) = tokens.iter().find(|t| t.relation == Relation::Last) else {
        return Ok(None);
    };

    last.query_param("page")
        .and_then(|page| page.parse::<u32>().ok())
        .map(Some)
        .ok_or_else(|| PaginationError::MissingPageNumber(last.url.clone()))
}
